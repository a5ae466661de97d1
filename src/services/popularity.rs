use crate::services::store::{PopularityCounter, StoreError};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur with the popularity counter
#[derive(Debug, Error)]
pub enum PopularityError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),
}

impl From<redis::RedisError> for StoreError {
    fn from(value: redis::RedisError) -> Self {
        StoreError::Popularity(PopularityError::RedisError(value))
    }
}

/// Search phrase popularity kept in a Redis sorted set.
///
/// Each phrase is a member scored by its usage count; `ZINCRBY` keeps the
/// increment atomic across service instances.
pub struct RedisPopularityCounter {
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    key: String,
}

impl RedisPopularityCounter {
    pub async fn new(redis_url: &str, key: impl Into<String>) -> Result<Self, PopularityError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            key: key.into(),
        })
    }
}

#[async_trait]
impl PopularityCounter for RedisPopularityCounter {
    async fn increment(&self, phrase: &str) -> Result<(), StoreError> {
        let mut conn = self.redis.lock().await;
        let score: f64 = redis::cmd("ZINCRBY")
            .arg(&self.key)
            .arg(1)
            .arg(phrase)
            .query_async(&mut *conn)
            .await?;
        drop(conn);

        tracing::trace!("Popularity of '{}' is now {}", phrase, score);
        Ok(())
    }

    async fn top(&self, n: usize) -> Result<Vec<String>, StoreError> {
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut conn = self.redis.lock().await;
        let phrases: Vec<String> = redis::cmd("ZREVRANGE")
            .arg(&self.key)
            .arg(0)
            .arg(n as isize - 1)
            .query_async(&mut *conn)
            .await?;

        Ok(phrases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_increment_and_top() {
        let counter = RedisPopularityCounter::new("redis://127.0.0.1:6379", "test:popular_keywords")
            .await
            .expect("Failed to connect to Redis");

        counter.increment("rent support").await.unwrap();
        counter.increment("rent support").await.unwrap();
        counter.increment("job training").await.unwrap();

        let top = counter.top(1).await.unwrap();
        assert_eq!(top, vec!["rent support".to_string()]);
    }
}
