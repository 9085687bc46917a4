//! Users module: account self-service and admin listing

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
