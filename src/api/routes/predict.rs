use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Discipline, PredictionResult};
use crate::predict::predict;

#[derive(Debug, Deserialize)]
pub struct PredictionRequest {
    pub player1: String,
    pub player2: String,
    /// Discipline label; men's singles when omitted.
    pub discipline: Option<String>,
}

pub async fn create_prediction(
    State(state): State<AppState>,
    Json(req): Json<PredictionRequest>,
) -> Result<Json<PredictionResult>, ApiError> {
    let discipline = match req.discipline.as_deref() {
        Some(label) => label
            .parse::<Discipline>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => Discipline::MensSingles,
    };

    let matches = state
        .matches
        .matches_for_pair(&req.player1, &req.player2)
        .await?;
    let rankings = state.rankings.ranking_table().await?;
    let today = chrono::Utc::now().date_naive();

    let result = predict(
        &matches,
        &rankings,
        &req.player1,
        &req.player2,
        discipline,
        today,
    )?;
    Ok(Json(result))
}
