//! Hotel aggregate

pub mod model;
pub mod repository;

pub use model::{Hotel, HotelFilter, UpdateHotelDto, MAX_RATING};
pub use repository::HotelRepository;
