// Core algorithm exports
pub mod keywords;
pub mod matcher;
pub mod normalize;
pub mod query;
pub mod region;
pub mod similarity;

pub use keywords::{normalize_search_phrase, KeywordPopularityRecorder};
pub use matcher::{MatchResult, PolicyMatcher};
pub use normalize::{normalize_list, normalize_scalar, normalize_values};
pub use query::{EligibilityQuery, EligibilityQueryBuilder};
pub use region::{expand_region_codes, is_province_code, RegionDirectory};
pub use similarity::{cosine_similarity, magnitude, rank};
