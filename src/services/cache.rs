use crate::models::PreferenceVector;
use crate::services::store::{StoreError, UserVectorStore};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a user's preference vector
    pub fn user_vector(user_id: &str) -> String {
        format!("user_vector:{}", user_id)
    }
}

/// In-process TTL cache in front of a [`UserVectorStore`].
///
/// Misses are cached too, so users without a vector do not hit storage on
/// every search. Vectors change out of band; the TTL bounds staleness.
pub struct CachedVectorStore {
    inner: Arc<dyn UserVectorStore>,
    cache: moka::future::Cache<String, Option<PreferenceVector>>,
}

impl CachedVectorStore {
    pub fn new(inner: Arc<dyn UserVectorStore>, capacity: u64, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner, cache }
    }

    /// Drop a cached entry, e.g. after the vector was recomputed upstream
    pub async fn invalidate(&self, user_id: &str) {
        self.cache.invalidate(&CacheKey::user_vector(user_id)).await;
    }
}

#[async_trait]
impl UserVectorStore for CachedVectorStore {
    async fn get(&self, user_id: &str) -> Result<Option<PreferenceVector>, StoreError> {
        let key = CacheKey::user_vector(user_id);

        if let Some(cached) = self.cache.get(&key).await {
            tracing::trace!("Vector cache hit: {}", key);
            return Ok(cached);
        }

        let vector = self.inner.get(user_id).await?;
        self.cache.insert(key, vector).await;

        Ok(vector)
    }
}
