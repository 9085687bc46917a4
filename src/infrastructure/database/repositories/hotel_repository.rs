//! SeaORM implementation of HotelRepository
//!
//! `Hotel::rooms` is not stored on the hotel row; it is rebuilt from the
//! rooms table on every read.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::debug;

use crate::domain::{DomainResult, Hotel, HotelFilter, HotelRepository, UpdateHotelDto};
use crate::infrastructure::database::entities::{hotel, room};
use crate::shared::{PaginatedResult, PaginationParams};

use super::db_err;

pub struct SeaOrmHotelRepository {
    db: DatabaseConnection,
}

impl SeaOrmHotelRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Room ids grouped by hotel id, in insertion order.
    async fn room_ids_for(&self, hotel_ids: Vec<String>) -> DomainResult<HashMap<String, Vec<String>>> {
        if hotel_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(String, String)> = room::Entity::find()
            .select_only()
            .column(room::Column::HotelId)
            .column(room::Column::Id)
            .filter(room::Column::HotelId.is_in(hotel_ids))
            .order_by_asc(room::Column::CreatedAt)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
        for (hotel_id, room_id) in rows {
            grouped.entry(hotel_id).or_default().push(room_id);
        }
        Ok(grouped)
    }
}

fn model_to_domain(m: hotel::Model, rooms: Vec<String>) -> Hotel {
    Hotel {
        id: m.id,
        name: m.name,
        location: m.location,
        rating: m.rating,
        rooms,
        created_at: m.created_at,
    }
}

#[async_trait]
impl HotelRepository for SeaOrmHotelRepository {
    async fn insert(&self, h: &Hotel) -> DomainResult<()> {
        debug!(hotel_id = %h.id, "Inserting hotel");

        let model = hotel::ActiveModel {
            id: Set(h.id.clone()),
            name: Set(h.name.clone()),
            location: Set(h.location.clone()),
            rating: Set(h.rating),
            created_at: Set(h.created_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Hotel>> {
        let Some(model) = hotel::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut rooms = self.room_ids_for(vec![model.id.clone()]).await?;
        let room_ids = rooms.remove(&model.id).unwrap_or_default();
        Ok(Some(model_to_domain(model, room_ids)))
    }

    async fn list(
        &self,
        filter: HotelFilter,
        params: PaginationParams,
    ) -> DomainResult<PaginatedResult<Hotel>> {
        let mut query = hotel::Entity::find();
        if let Some(rating) = filter.rating {
            query = query.filter(hotel::Column::Rating.eq(rating));
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;

        let models = query
            .order_by_asc(hotel::Column::CreatedAt)
            .order_by_asc(hotel::Column::Id)
            .offset(params.offset())
            .limit(params.limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut rooms = self
            .room_ids_for(models.iter().map(|m| m.id.clone()).collect())
            .await?;

        let items = models
            .into_iter()
            .map(|m| {
                let room_ids = rooms.remove(&m.id).unwrap_or_default();
                model_to_domain(m, room_ids)
            })
            .collect();

        Ok(PaginatedResult::new(items, total, params))
    }

    async fn update(&self, id: &str, dto: UpdateHotelDto) -> DomainResult<Option<Hotel>> {
        let Some(existing) = hotel::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active: hotel::ActiveModel = existing.into();
        if let Some(name) = dto.name {
            active.name = Set(name);
        }
        if let Some(location) = dto.location {
            active.location = Set(location);
        }
        if let Some(rating) = dto.rating {
            active.rating = Set(rating);
        }

        active.update(&self.db).await.map_err(db_err)?;
        self.find_by_id(id).await
    }

    async fn exists(&self, id: &str) -> DomainResult<bool> {
        let n = hotel::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(n > 0)
    }
}
