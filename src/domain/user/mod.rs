//! User aggregate
//!
//! Contains the User entity, query/update DTOs, and repository interface.

pub mod model;
pub mod repository;

mod dto_get;
mod dto_update;

pub use model::{User, UserRole};

pub use dto_get::GetUserDto;
pub use dto_update::UpdateUserDto;

pub use repository::UserRepository;
