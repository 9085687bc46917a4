pub mod auth;
pub mod bookings;
pub mod health;
pub mod hotels;
pub mod metrics;
pub mod request_id;
pub mod rooms;
pub mod users;
