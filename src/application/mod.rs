//! Application layer
//!
//! Use-case services sitting between the HTTP handlers and the resource
//! stores.

pub mod booking;
pub mod cache;
pub mod catalog;
pub mod identity;

pub use booking::{BookRoom, BookingService};
pub use cache::{CacheKeys, CacheTtls, ResponseCache};
pub use catalog::{CatalogService, NewHotel, NewRoom};
pub use identity::{AuthResult, IdentityService, RegisterUser};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::infrastructure::cache::MemoryCacheStore;
    use crate::infrastructure::database::test_connection;
    use crate::infrastructure::SeaOrmRepositoryProvider;

    use super::{CacheKeys, CacheTtls, ResponseCache};

    pub async fn repos() -> Arc<SeaOrmRepositoryProvider> {
        Arc::new(SeaOrmRepositoryProvider::new(test_connection().await))
    }

    pub fn memory_cache() -> ResponseCache {
        ResponseCache::new(
            Arc::new(MemoryCacheStore::new()),
            CacheKeys::new("test:"),
            CacheTtls::default(),
        )
    }
}
