//! REST API endpoints.
//!
//! Axum-based HTTP API exposing match-outcome predictions,
//! head-to-head records, and player profiles.

use axum::routing::{get, post};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::dataset::DatasetError;
use crate::predict::PredictError;

pub mod routes;
pub mod state;

pub use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DatasetError> for ApiError {
    fn from(err: DatasetError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<PredictError> for ApiError {
    fn from(err: PredictError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Build the application router with all routes registered.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // ── Predictions ─────────────────────────────────────────────
        .route("/api/predictions", post(routes::predict::create_prediction))
        // ── Players ─────────────────────────────────────────────────
        .route("/api/players", get(routes::players::list_players))
        .route(
            "/api/players/:name/profile",
            get(routes::players::player_profile),
        )
        .route(
            "/api/head-to-head/:player1/:player2",
            get(routes::players::head_to_head),
        )
        // ── Meta ────────────────────────────────────────────────────
        .route("/api/meta", get(routes::meta::meta_info))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::InMemoryDataset;
    use crate::models::RankingTable;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    #[test]
    fn test_error_status_codes() {
        let resp = ApiError::NotFound("x".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = ApiError::BadRequest("x".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ApiError::Internal("x".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_predict_error_maps_to_bad_request() {
        let err: ApiError = PredictError::IdenticalPlayers.into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let dataset = Arc::new(InMemoryDataset::new(Vec::new(), RankingTable::default()));
        let state = AppState {
            matches: dataset.clone(),
            rankings: dataset.clone(),
            stats: dataset.stats(),
        };

        let app = build_router(state);
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
