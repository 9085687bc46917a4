//! Domain layer
//!
//! Entities and the resource-store traits the application layer talks to.
//! One submodule per aggregate.

pub mod booking;
pub mod cache;
pub mod hotel;
pub mod room;
pub mod user;

pub use booking::{Booking, BookingPeriod, BookingRepository};
pub use cache::CacheStore;
pub use hotel::{Hotel, HotelFilter, HotelRepository, UpdateHotelDto};
pub use room::{Room, RoomRepository, RoomType};
pub use user::{GetUserDto, UpdateUserDto, User, UserRepository, UserRole};

pub use crate::shared::errors::{DomainError, DomainResult};

/// Access to every resource store through one handle.
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn hotels(&self) -> &dyn HotelRepository;
    fn rooms(&self) -> &dyn RoomRepository;
    fn bookings(&self) -> &dyn BookingRepository;
}
