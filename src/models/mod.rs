// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{EligibilityCriteria, PolicyCandidate, PreferenceVector, RankedResult};
pub use requests::{PopularKeywordsQuery, SearchRequest};
pub use responses::{ErrorResponse, HealthResponse, PopularKeywordsResponse, SearchResponse};
