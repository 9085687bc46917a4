//! Hotel and room catalog
//!
//! Reads go through the response cache; writes invalidate the entries they
//! make stale. Hotel list pages are not invalidated and expire on their TTL.

use std::sync::Arc;

use tracing::info;

use crate::application::cache::ResponseCache;
use crate::domain::{
    DomainError, DomainResult, Hotel, HotelFilter, RepositoryProvider, Room, RoomType,
    UpdateHotelDto,
};
use crate::shared::{PaginatedResult, PaginationParams};

#[derive(Debug, Clone)]
pub struct NewHotel {
    pub name: String,
    pub location: String,
    pub rating: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewRoom {
    pub hotel_id: String,
    pub room_type: RoomType,
    pub base_price: f64,
}

pub struct CatalogService {
    repos: Arc<dyn RepositoryProvider>,
    cache: ResponseCache,
}

impl CatalogService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, cache: ResponseCache) -> Self {
        Self { repos, cache }
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_hotels(
        &self,
        filter: HotelFilter,
        params: PaginationParams,
    ) -> DomainResult<PaginatedResult<Hotel>> {
        let key = self.cache.keys.hotel_list(filter, params);
        self.cache
            .read_through(&key, self.cache.ttls.hotel_list, || {
                self.repos.hotels().list(filter, params)
            })
            .await
    }

    pub async fn get_hotel(&self, id: &str) -> DomainResult<Hotel> {
        let key = self.cache.keys.hotel(id);
        self.cache
            .read_through(&key, self.cache.ttls.hotel, || async {
                self.repos
                    .hotels()
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Hotel", id))
            })
            .await
    }

    /// Rooms of one hotel. An unknown hotel is a 404, not an empty list.
    pub async fn hotel_rooms(&self, hotel_id: &str) -> DomainResult<Vec<Room>> {
        let key = self.cache.keys.hotel_rooms(hotel_id);
        self.cache
            .read_through(&key, self.cache.ttls.hotel_rooms, || async {
                if !self.repos.hotels().exists(hotel_id).await? {
                    return Err(DomainError::not_found("Hotel", hotel_id));
                }
                self.repos.rooms().find_by_hotel(hotel_id).await
            })
            .await
    }

    pub async fn list_rooms(&self) -> DomainResult<Vec<Room>> {
        self.repos.rooms().find_all().await
    }

    // ── Commands (admin) ────────────────────────────────────────

    pub async fn create_hotel(&self, input: NewHotel) -> DomainResult<Hotel> {
        let hotel = Hotel::new(
            input.name.trim(),
            input.location.trim(),
            input.rating.unwrap_or(0),
        )?;
        self.repos.hotels().insert(&hotel).await?;

        info!(hotel_id = %hotel.id, name = %hotel.name, "Hotel created");
        Ok(hotel)
    }

    pub async fn update_hotel(&self, id: &str, dto: UpdateHotelDto) -> DomainResult<Hotel> {
        dto.validate()?;
        let hotel = self
            .repos
            .hotels()
            .update(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("Hotel", id))?;

        self.cache.invalidate(&[self.cache.keys.hotel(id)]).await;
        info!(hotel_id = %id, "Hotel updated");
        Ok(hotel)
    }

    /// Add a room to an existing hotel.
    pub async fn create_room(&self, input: NewRoom) -> DomainResult<Room> {
        if !self.repos.hotels().exists(&input.hotel_id).await? {
            return Err(DomainError::not_found("Hotel", input.hotel_id));
        }

        let room = Room::new(input.hotel_id, input.room_type, input.base_price)?;
        self.repos.rooms().insert(&room).await?;

        self.cache
            .invalidate(&[
                self.cache.keys.hotel(&room.hotel_id),
                self.cache.keys.hotel_rooms(&room.hotel_id),
            ])
            .await;
        info!(room_id = %room.id, hotel_id = %room.hotel_id, "Room created");
        Ok(room)
    }
}
