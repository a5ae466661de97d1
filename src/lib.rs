//! Youth Policy Match - eligibility filtering and personalized ranking
//!
//! This library normalizes a user's eligibility criteria, expands region
//! codes hierarchically, delegates eligibility matching to a policy store and
//! optionally orders the results by preference-vector similarity.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    cosine_similarity, expand_region_codes, rank, EligibilityQuery, EligibilityQueryBuilder,
    KeywordPopularityRecorder, PolicyMatcher, RegionDirectory,
};
pub use models::{EligibilityCriteria, PolicyCandidate, PreferenceVector, RankedResult, SearchRequest};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let v = PreferenceVector::new(0.5, 0.3, 0.2);
        assert!(cosine_similarity(Some(&v), Some(&v)) > 0.99);
    }
}
