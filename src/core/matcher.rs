use crate::core::keywords::KeywordPopularityRecorder;
use crate::core::query::EligibilityQueryBuilder;
use crate::core::similarity::rank;
use crate::models::{EligibilityCriteria, PolicyCandidate, RankedResult, SearchRequest};
use crate::services::{PolicyStore, StoreError, UserVectorStore};
use std::sync::Arc;

/// Result of a policy search
#[derive(Debug)]
pub struct MatchResult {
    pub policies: Vec<RankedResult>,
    /// Whether results were ordered by similarity to the user's vector
    pub personalized: bool,
}

impl MatchResult {
    fn unranked(candidates: Vec<PolicyCandidate>) -> Self {
        Self {
            policies: candidates.into_iter().map(RankedResult::unranked).collect(),
            personalized: false,
        }
    }
}

/// Main search orchestrator
///
/// # Pipeline Stages
/// 1. Criteria normalization
/// 2. Region code expansion and query assembly
/// 3. Eligibility query against the policy store
/// 4. Similarity ranking (personalized search only)
/// 5. Keyword popularity recording (non-empty results only)
#[derive(Clone)]
pub struct PolicyMatcher {
    builder: EligibilityQueryBuilder,
    policies: Arc<dyn PolicyStore>,
    vectors: Arc<dyn UserVectorStore>,
    popularity: KeywordPopularityRecorder,
}

impl PolicyMatcher {
    pub fn new(
        builder: EligibilityQueryBuilder,
        policies: Arc<dyn PolicyStore>,
        vectors: Arc<dyn UserVectorStore>,
        popularity: KeywordPopularityRecorder,
    ) -> Self {
        Self {
            builder,
            policies,
            vectors,
            popularity,
        }
    }

    pub fn policy_store(&self) -> &Arc<dyn PolicyStore> {
        &self.policies
    }

    pub fn popularity(&self) -> &KeywordPopularityRecorder {
        &self.popularity
    }

    /// Guest search: eligibility filtering only, in store order
    pub async fn filter_only(&self, request: &SearchRequest) -> Result<MatchResult, StoreError> {
        let candidates = self.find_candidates(request, false).await?;
        Ok(MatchResult::unranked(candidates))
    }

    /// Personalized search: eligibility filtering, then similarity ranking.
    ///
    /// Falls back to unranked results when the user has no stored vector or
    /// the vector lookup fails.
    pub async fn filter_and_rank(
        &self,
        user_id: &str,
        request: &SearchRequest,
    ) -> Result<MatchResult, StoreError> {
        let user_vector = match self.vectors.get(user_id).await {
            Ok(vector) => vector,
            Err(e) => {
                tracing::warn!("Failed to fetch preference vector for {}, skipping ranking: {}", user_id, e);
                None
            }
        };

        let candidates = self.find_candidates(request, user_vector.is_some()).await?;

        let Some(user_vector) = user_vector else {
            tracing::debug!("No preference vector for {}, returning unranked results", user_id);
            return Ok(MatchResult::unranked(candidates));
        };

        Ok(MatchResult {
            policies: rank(&user_vector, candidates),
            personalized: true,
        })
    }

    async fn find_candidates(
        &self,
        request: &SearchRequest,
        with_vectors: bool,
    ) -> Result<Vec<PolicyCandidate>, StoreError> {
        let criteria = EligibilityCriteria::from_request(request);
        let terms: Vec<String> = criteria.search_terms().into_iter().map(str::to_string).collect();

        if criteria.is_unfiltered() {
            tracing::debug!("Search has no criteria after normalization, querying unfiltered");
        }

        let query = self.builder.build(criteria);
        let candidates = self.policies.find_candidates(&query, with_vectors).await?;

        if !candidates.is_empty() {
            self.popularity.record(terms.as_slice());
        }

        Ok(candidates)
    }
}
