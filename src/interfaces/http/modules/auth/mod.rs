//! Authentication module: login and registration

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
