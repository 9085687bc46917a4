//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{
    BookingRepository, HotelRepository, RepositoryProvider, RoomRepository, UserRepository,
};

use super::booking_repository::SeaOrmBookingRepository;
use super::hotel_repository::SeaOrmHotelRepository;
use super::room_repository::SeaOrmRoomRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let hotel = repos.hotels().find_by_id(&id).await?;
/// let free = repos.bookings().is_room_available(&room_id, &period).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    hotels: SeaOrmHotelRepository,
    rooms: SeaOrmRoomRepository,
    bookings: SeaOrmBookingRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            hotels: SeaOrmHotelRepository::new(db.clone()),
            rooms: SeaOrmRoomRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn hotels(&self) -> &dyn HotelRepository {
        &self.hotels
    }

    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }
}
