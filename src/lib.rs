//! # Hotel Reservation Service
//!
//! REST backend for browsing hotels and booking rooms.
//!
//! ## Architecture
//!
//! - **domain**: entities, invariants and resource-store traits
//! - **application**: use-case services and the read-through response cache
//! - **infrastructure**: SeaORM persistence, Redis / in-memory cache, JWT and bcrypt
//! - **interfaces**: axum REST API with Swagger documentation
//! - **server**: runtime wiring and graceful shutdown
//! - **fixtures**: development seed data

pub mod application;
pub mod config;
pub mod domain;
pub mod fixtures;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

pub use interfaces::http::{create_api_router, ApiDependencies};
