//! Booking aggregate
//!
//! Contains the Booking entity, the booked date range, and repository interface.

pub mod model;
pub mod repository;

pub use model::{Booking, BookingPeriod};
pub use repository::BookingRepository;
