//! Cache backends and start-up selection

pub mod memory;
pub mod redis;

pub use memory::MemoryCacheStore;
pub use self::redis::RedisCacheStore;

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::domain::CacheStore;
use crate::shared::{retry_with_backoff, CacheError, RetryConfig};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Connect to Redis when a URL is given, falling back to the in-process
/// store when the URL is absent or Redis stays unreachable.
pub async fn connect_cache(redis_url: Option<&str>) -> Arc<dyn CacheStore> {
    let Some(url) = redis_url.filter(|u| !u.trim().is_empty()) else {
        info!("No Redis URL configured, using in-memory cache");
        return Arc::new(MemoryCacheStore::new());
    };

    let connected = retry_with_backoff(
        &RetryConfig::default(),
        "redis_connect",
        || async {
            let store = RedisCacheStore::connect(url, CONNECT_TIMEOUT).await?;
            store.ping().await?;
            Ok::<_, CacheError>(store)
        },
        |_| true,
    )
    .await;

    match connected {
        Ok(store) => {
            info!("🗄️ Connected to Redis cache");
            Arc::new(store)
        }
        Err(e) => {
            warn!(error = %e, "Redis unavailable, falling back to in-memory cache");
            Arc::new(MemoryCacheStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_url_means_memory() {
        assert_eq!(connect_cache(None).await.backend(), "memory");
        assert_eq!(connect_cache(Some("  ")).await.backend(), "memory");
    }
}
