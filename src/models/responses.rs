use serde::{Deserialize, Serialize};
use crate::models::domain::RankedResult;

/// Response for policy search endpoints
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub policies: Vec<RankedResult>,
    pub total_results: usize,
    pub personalized: bool,
}

/// Popular keywords response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularKeywordsResponse {
    pub keywords: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
