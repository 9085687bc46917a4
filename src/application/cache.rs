//! Read-through response cache
//!
//! Query results are serialized to JSON and stored under prefixed keys
//! with a fixed TTL per kind. Cache failures are logged and never fail the
//! request: a broken cache behaves like a permanent miss.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{CacheStore, DomainResult, HotelFilter};
use crate::shared::PaginationParams;

/// Cache key builder. Every key starts with the configured prefix.
#[derive(Debug, Clone)]
pub struct CacheKeys {
    prefix: String,
}

impl CacheKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn hotel(&self, id: &str) -> String {
        format!("{}hotel:{}", self.prefix, id)
    }

    pub fn hotel_rooms(&self, hotel_id: &str) -> String {
        format!("{}hotel:{}:rooms", self.prefix, hotel_id)
    }

    /// One key per (filter, page, limit) after clamping, so `?limit=500`
    /// and `?limit=100` share an entry.
    pub fn hotel_list(&self, filter: HotelFilter, params: PaginationParams) -> String {
        let rating = filter
            .rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| "any".into());
        format!(
            "{}hotels:rating={}:page={}:limit={}",
            self.prefix, rating, params.page, params.limit
        )
    }

    pub fn booking(&self, id: &str) -> String {
        format!("{}booking:{}", self.prefix, id)
    }
}

impl Default for CacheKeys {
    fn default() -> Self {
        Self::new("hotel-reservation:")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CacheTtls {
    pub hotel: Duration,
    pub hotel_rooms: Duration,
    pub hotel_list: Duration,
    pub booking: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            hotel: Duration::from_secs(300),
            hotel_rooms: Duration::from_secs(60),
            hotel_list: Duration::from_secs(30),
            booking: Duration::from_secs(60),
        }
    }
}

#[derive(Clone)]
pub struct ResponseCache {
    store: Arc<dyn CacheStore>,
    pub keys: CacheKeys,
    pub ttls: CacheTtls,
}

impl ResponseCache {
    pub fn new(store: Arc<dyn CacheStore>, keys: CacheKeys, ttls: CacheTtls) -> Self {
        Self { store, keys, ttls }
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// Serve `key` from the cache, or run `load` and cache its result.
    /// Errors from `load` are returned as-is and never cached.
    pub async fn read_through<T, F, Fut>(&self, key: &str, ttl: Duration, load: F) -> DomainResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = DomainResult<T>>,
    {
        if let Some(hit) = self.lookup(key).await {
            return Ok(hit);
        }
        let value = load().await?;
        self.put(key, &value, ttl).await;
        Ok(value)
    }

    pub async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "Cache read failed");
                None
            }
        };

        let decoded = raw.and_then(|raw| match serde_json::from_str(&raw) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(key, error = %e, "Discarding undecodable cache entry");
                None
            }
        });

        let result = if decoded.is_some() { "hit" } else { "miss" };
        metrics::counter!("cache_requests_total", "result" => result).increment(1);
        debug!(key, result, "Cache lookup");
        decoded
    }

    pub async fn put<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "Failed to serialize cache entry");
                return;
            }
        };
        if let Err(e) = self.store.set(key, &raw, ttl).await {
            warn!(key, error = %e, "Cache write failed");
        }
    }

    pub async fn invalidate(&self, keys: &[String]) {
        for key in keys {
            if let Err(e) = self.store.delete(key).await {
                warn!(key = %key, error = %e, "Cache invalidation failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::infrastructure::cache::MemoryCacheStore;
    use crate::shared::{CacheError, CacheResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn cache() -> ResponseCache {
        ResponseCache::new(
            Arc::new(MemoryCacheStore::new()),
            CacheKeys::new("t:"),
            CacheTtls::default(),
        )
    }

    struct BrokenStore;

    #[async_trait]
    impl CacheStore for BrokenStore {
        async fn get(&self, _: &str) -> CacheResult<Option<String>> {
            Err(CacheError::Backend("down".into()))
        }
        async fn set(&self, _: &str, _: &str, _: Duration) -> CacheResult<()> {
            Err(CacheError::Backend("down".into()))
        }
        async fn delete(&self, _: &str) -> CacheResult<()> {
            Err(CacheError::Backend("down".into()))
        }
        async fn ping(&self) -> CacheResult<()> {
            Err(CacheError::Backend("down".into()))
        }
        fn backend(&self) -> &'static str {
            "broken"
        }
    }

    #[test]
    fn keys_are_prefixed_and_keep_the_id_verbatim() {
        let keys = CacheKeys::new("p:");
        assert_eq!(keys.hotel("abc"), "p:hotel:abc");
        assert_ne!(keys.hotel(" abc "), keys.hotel("abc"));
        assert_eq!(keys.hotel_rooms("abc"), "p:hotel:abc:rooms");
        assert_eq!(keys.booking("b1"), "p:booking:b1");
    }

    #[test]
    fn list_key_uses_clamped_pagination() {
        let keys = CacheKeys::new("");
        let a = keys.hotel_list(HotelFilter::default(), PaginationParams::new(None, Some(500)));
        let b = keys.hotel_list(HotelFilter::default(), PaginationParams::new(Some(1), Some(100)));
        assert_eq!(a, b);
        assert_eq!(a, "hotels:rating=any:page=1:limit=100");

        let rated = keys.hotel_list(HotelFilter { rating: Some(4) }, PaginationParams::default());
        assert_eq!(rated, "hotels:rating=4:page=1:limit=20");
    }

    #[tokio::test]
    async fn second_read_is_served_from_cache() {
        let cache = cache();
        let loads = AtomicU32::new(0);

        for _ in 0..2 {
            let v: Vec<i32> = cache
                .read_through("k", Duration::from_secs(60), || async {
                    loads.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![1, 2, 3])
                })
                .await
                .unwrap();
            assert_eq!(v, vec![1, 2, 3]);
        }
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let cache = cache();
        let res: DomainResult<String> = cache
            .read_through("k", Duration::from_secs(60), || async {
                Err(DomainError::not_found("Hotel", "x"))
            })
            .await;
        assert!(res.is_err());
        assert!(cache.lookup::<String>("k").await.is_none());
    }

    #[tokio::test]
    async fn invalidate_forces_reload() {
        let cache = cache();
        cache.put("k", &"old", Duration::from_secs(60)).await;
        cache.invalidate(&["k".to_string()]).await;

        let v: String = cache
            .read_through("k", Duration::from_secs(60), || async { Ok("new".to_string()) })
            .await
            .unwrap();
        assert_eq!(v, "new");
    }

    #[tokio::test]
    async fn broken_backend_falls_through_to_loader() {
        let cache = ResponseCache::new(Arc::new(BrokenStore), CacheKeys::default(), CacheTtls::default());
        let v: u32 = cache
            .read_through("k", Duration::from_secs(1), || async { Ok(7) })
            .await
            .unwrap();
        assert_eq!(v, 7);
        cache.invalidate(&["k".to_string()]).await;
    }

    #[tokio::test]
    async fn garbage_entry_is_a_miss() {
        let cache = cache();
        cache
            .store()
            .set("k", "not json", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(cache.lookup::<Vec<u8>>("k").await.is_none());
    }
}
