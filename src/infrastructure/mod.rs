//! Infrastructure layer - external concerns

pub mod cache;
pub mod crypto;
pub mod database;

pub use cache::{connect_cache, MemoryCacheStore, RedisCacheStore};
pub use database::{init_database, run_migrations, DatabaseConfig, SeaOrmRepositoryProvider};
