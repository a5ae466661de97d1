use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;
use crate::core::{MatchResult, PolicyMatcher};
use crate::models::{ErrorResponse, HealthResponse, PopularKeywordsQuery, PopularKeywordsResponse, SearchRequest, SearchResponse};
use crate::services::{PopularityCounter, StoreError};
use std::sync::Arc;
use tracing::Instrument;

/// Header carrying the authenticated user id, set by the upstream gateway
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Upper bound for popular keyword lookups
pub const MAX_TOP_KEYWORDS: usize = 50;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: PolicyMatcher,
    pub popularity: Arc<dyn PopularityCounter>,
    pub default_top_n: usize,
}

/// Configure all policy-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/policies/search", web::post().to(search_policies))
        .route("/policies/search/personalized", web::post().to(search_personalized))
        .route("/keywords/popular", web::get().to(popular_keywords));
}

fn error_response(status: u16, error: &str, message: impl Into<String>) -> ErrorResponse {
    ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status,
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state
        .matcher
        .policy_store()
        .health_check()
        .await
        .unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn search_response(result: Result<MatchResult, StoreError>) -> HttpResponse {
    match result {
        Ok(result) if result.policies.is_empty() => HttpResponse::NotFound().json(error_response(
            404,
            "No matching policies",
            "No policies match the given criteria",
        )),
        Ok(result) => {
            tracing::info!(
                "Returning {} policies (personalized: {})",
                result.policies.len(),
                result.personalized
            );
            HttpResponse::Ok().json(SearchResponse {
                total_results: result.policies.len(),
                personalized: result.personalized,
                policies: result.policies,
            })
        }
        Err(e) => {
            tracing::error!("Policy search failed: {}", e);
            HttpResponse::InternalServerError().json(error_response(
                500,
                "Failed to search policies",
                e.to_string(),
            ))
        }
    }
}

fn validation_failure(req: &SearchRequest) -> Option<HttpResponse> {
    req.validate().err().map(|errors| {
        tracing::info!("Validation failed for search request: {:?}", errors);
        HttpResponse::BadRequest().json(error_response(400, "Validation failed", errors.to_string()))
    })
}

/// Guest search endpoint
///
/// POST /api/v1/policies/search
///
/// Filters by eligibility only; results keep the store's order and carry no
/// similarity score.
async fn search_policies(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
) -> impl Responder {
    if let Some(response) = validation_failure(&req) {
        return response;
    }

    let span = tracing::info_span!("policy_search", request_id = %uuid::Uuid::new_v4(), personalized = false);
    let result = state.matcher.filter_only(&req).instrument(span).await;

    search_response(result)
}

/// Personalized search endpoint
///
/// POST /api/v1/policies/search/personalized
///
/// Requires the `X-User-Id` header. Results are ordered by similarity to the
/// user's preference vector when one is stored.
async fn search_personalized(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    let user_id = http_req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let Some(user_id) = user_id else {
        return HttpResponse::Unauthorized().json(error_response(
            401,
            "Missing user",
            format!("{} header is required", USER_ID_HEADER),
        ));
    };

    if let Some(response) = validation_failure(&req) {
        return response;
    }

    let span = tracing::info_span!("policy_search", request_id = %uuid::Uuid::new_v4(), personalized = true, user_id);
    let result = state
        .matcher
        .filter_and_rank(user_id, &req)
        .instrument(span)
        .await;

    search_response(result)
}

/// Popular keywords endpoint
///
/// GET /api/v1/keywords/popular?limit={n}
async fn popular_keywords(
    state: web::Data<AppState>,
    query: web::Query<PopularKeywordsQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(error_response(400, "Validation failed", errors.to_string()));
    }

    let limit = query
        .limit
        .unwrap_or(state.default_top_n)
        .min(MAX_TOP_KEYWORDS);

    match state.popularity.top(limit).await {
        Ok(keywords) => HttpResponse::Ok().json(PopularKeywordsResponse { keywords }),
        Err(e) => {
            tracing::error!("Failed to fetch popular keywords: {}", e);
            HttpResponse::InternalServerError().json(error_response(
                500,
                "Failed to fetch popular keywords",
                e.to_string(),
            ))
        }
    }
}
