//! JSON HTTP server.
//!
//! Exposes the recommendation pipeline and the catalog read endpoints
//! to browser clients and other consumers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/recommend` | Rank the catalog against a query |
//! | `GET`  | `/api/title/{id}` | Full title record by id |
//! | `GET`  | `/api/filters` | Available filter values |
//! | `GET`  | `/api/stats` | Catalog statistics |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! All error responses share one schema:
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "query must not be empty" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `internal` (500).
//! An empty `recommendations` array is a successful `200` — "no matches"
//! and "something failed" are never conflated.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the static result
//! page can call the API from any host.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::catalog::{Catalog, FilterValues};
use crate::config::Config;
use crate::filters::{FilterCriteria, QueryScanner};
use crate::models::{MediaType, Recommendation, TitleRecord};
use crate::recommend::recommend;
use crate::stats::{catalog_stats, CatalogStats};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    catalog: Arc<Catalog>,
    scanner: Arc<QueryScanner>,
}

/// Starts the HTTP server.
///
/// Loads the catalog once, binds to `[server].bind`, and serves until
/// the process is terminated. The catalog is never mutated afterwards,
/// so handlers share it through `Arc` without locking.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let catalog = Catalog::load(&config.catalog.path, &config.vectorizer)?;
    println!(
        "Loaded {} titles, vocabulary of {} terms",
        catalog.len(),
        catalog.vocab_len()
    );

    let state = AppState {
        config: Arc::new(config.clone()),
        catalog: Arc::new(catalog),
        scanner: Arc::new(QueryScanner::new()?),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/recommend", post(handle_recommend))
        .route("/api/title/{id}", get(handle_title))
        .route("/api/filters", get(handle_filters))
        .route("/api/stats", get(handle_stats))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state);

    let bind_addr = &config.server.bind;
    println!("cinerank listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

/// Inner error detail with a machine-readable code and human-readable message.
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /api/recommend ============

/// JSON request body for `POST /api/recommend`.
#[derive(Debug, Deserialize)]
struct RecommendBody {
    query: String,
    /// Maximum results; defaults to `retrieval.final_limit`, clamped
    /// to `retrieval.max_limit`.
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    genre: Option<String>,
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    year_from: Option<i32>,
    #[serde(default)]
    year_to: Option<i32>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    media_type: Option<String>,
}

/// JSON response body for `POST /api/recommend`.
#[derive(Serialize)]
struct RecommendResponse {
    query: String,
    expanded_query: String,
    filters: FilterCriteria,
    recommendations: Vec<Recommendation>,
}

async fn handle_recommend(
    State(state): State<AppState>,
    Json(body): Json<RecommendBody>,
) -> Result<Json<RecommendResponse>, AppError> {
    if body.query.trim().is_empty() {
        return Err(bad_request("query must not be empty"));
    }

    let media_type: Option<MediaType> = match body.media_type.as_deref() {
        Some(raw) => Some(raw.parse().map_err(bad_request)?),
        None => None,
    };

    let year_range = match (body.year_from, body.year_to) {
        (Some(from), Some(to)) if from > to => {
            return Err(bad_request("year_from must not exceed year_to"));
        }
        (Some(from), Some(to)) => Some((from, to)),
        (Some(from), None) => Some((from, i32::MAX)),
        (None, Some(to)) => Some((i32::MIN, to)),
        (None, None) => None,
    };

    let explicit = FilterCriteria {
        genre: body.genre,
        year: body.year,
        year_range,
        languages: body.language.into_iter().collect(),
        media_type,
    };

    let limit = body
        .limit
        .unwrap_or(state.config.retrieval.final_limit)
        .clamp(1, state.config.retrieval.max_limit);

    let outcome = recommend(&state.catalog, &state.scanner, &body.query, limit, explicit)
        .map_err(|e| internal(e.to_string()))?;

    Ok(Json(RecommendResponse {
        query: outcome.query,
        expanded_query: outcome.expanded_query,
        filters: outcome.filters,
        recommendations: outcome.recommendations,
    }))
}

// ============ GET /api/title/{id} ============

async fn handle_title(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TitleRecord>, AppError> {
    state
        .catalog
        .find(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(format!("title not found: {}", id)))
}

// ============ GET /api/filters ============

async fn handle_filters(State(state): State<AppState>) -> Json<FilterValues> {
    Json(state.catalog.filter_values())
}

// ============ GET /api/stats ============

async fn handle_stats(State(state): State<AppState>) -> Json<CatalogStats> {
    Json(catalog_stats(&state.catalog))
}
