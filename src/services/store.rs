use crate::core::EligibilityQuery;
use crate::models::{PolicyCandidate, PreferenceVector};
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by external collaborators
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] super::postgres::PostgresError),

    #[error("Popularity store error: {0}")]
    Popularity(#[from] super::popularity::PopularityError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Executes eligibility queries against stored policy rules
#[async_trait]
pub trait PolicyStore: Send + Sync {
    /// Return every policy whose eligibility rules accept `query`.
    ///
    /// When `with_vectors` is set each candidate carries its preference vector.
    async fn find_candidates(
        &self,
        query: &EligibilityQuery,
        with_vectors: bool,
    ) -> Result<Vec<PolicyCandidate>, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

/// Supplies stored user preference vectors
#[async_trait]
pub trait UserVectorStore: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<Option<PreferenceVector>, StoreError>;
}

/// Counts how often normalized search phrases are used
#[async_trait]
pub trait PopularityCounter: Send + Sync {
    async fn increment(&self, phrase: &str) -> Result<(), StoreError>;

    /// Most popular phrases, most frequent first
    async fn top(&self, n: usize) -> Result<Vec<String>, StoreError>;
}
