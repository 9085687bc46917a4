//! Key-value cache port
//!
//! Values are opaque strings (serialized JSON). Every entry carries a TTL.

use std::time::Duration;

use async_trait::async_trait;

use crate::shared::CacheResult;

#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    async fn ping(&self) -> CacheResult<()>;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}
