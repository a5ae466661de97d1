// Service exports
pub mod cache;
pub mod popularity;
pub mod postgres;
pub mod store;

pub use cache::{CacheKey, CachedVectorStore};
pub use popularity::{PopularityError, RedisPopularityCounter};
pub use postgres::{PostgresClient, PostgresError};
pub use store::{PolicyStore, PopularityCounter, StoreError, UserVectorStore};
