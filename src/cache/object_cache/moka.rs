use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaCacheWrapper);

/// 进程内缓存，过期时间在构建时统一设置
pub struct MokaCacheWrapper {
    inner: Cache<String, String>,
}

impl MokaCacheWrapper {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        Ok(Self::with_settings(
            config.cache.memory.max_capacity,
            Duration::from_secs(config.cache.default_ttl),
        ))
    }

    pub fn with_settings(max_capacity: u64, ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}, ttl: {:?}",
            max_capacity, ttl
        );
        Self { inner }
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some(value) => CacheResult::Found(value),
            None => {
                debug!("Key not found in cache: {}", key);
                CacheResult::NotFound
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        // 单项 TTL 不生效，统一使用构建时的 TTL
        if ttl != 0 {
            debug!("Moka cache ignores per-item TTL for key: {}", key);
        }
        self.inner.insert(key, value).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ObjectCacheExt;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let cache = MokaCacheWrapper::with_settings(16, Duration::from_secs(60));
        assert_eq!(cache.get_raw("user:1").await, CacheResult::NotFound);

        cache.insert_raw("user:1".to_string(), "alice".to_string(), 0).await;
        assert_eq!(
            cache.get_raw("user:1").await,
            CacheResult::Found("alice".to_string())
        );

        cache.remove("user:1").await;
        assert_eq!(cache.get_raw("user:1").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let cache = MokaCacheWrapper::with_settings(16, Duration::from_secs(60));
        cache
            .insert_json("ids".to_string(), &vec![3_i64, 5, 8], 0)
            .await;
        assert_eq!(
            cache.get_json::<Vec<i64>>("ids").await,
            CacheResult::Found(vec![3, 5, 8])
        );

        cache
            .insert_raw("broken".to_string(), "{not json".to_string(), 0)
            .await;
        assert_eq!(
            cache.get_json::<Vec<i64>>("broken").await,
            CacheResult::ExistsButNoValue
        );
    }
}
