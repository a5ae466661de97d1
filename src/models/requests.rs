use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to search eligible policies.
///
/// List entries may be `null`, empty or whitespace; they are dropped during
/// normalization rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(range(max = 150))]
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(alias = "marital_status", rename = "maritalStatus", default)]
    pub marital_status: Option<String>,
    #[serde(default)]
    pub income: Option<u64>,
    #[serde(default)]
    pub regions: Vec<Option<String>>,
    #[serde(alias = "education_levels", rename = "educationLevels", default)]
    pub education_levels: Vec<Option<String>>,
    #[serde(alias = "employment_statuses", rename = "employmentStatuses", default)]
    pub employment_statuses: Vec<Option<String>>,
    #[serde(default)]
    pub majors: Vec<Option<String>>,
    #[serde(alias = "special_conditions", rename = "specialConditions", default)]
    pub special_conditions: Vec<Option<String>>,
    #[serde(default)]
    pub keywords: Vec<Option<String>>,
    #[serde(alias = "free_text", rename = "freeText", default)]
    pub free_text: Option<String>,
}

/// Query parameters for popular keyword lookup
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PopularKeywordsQuery {
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
}
