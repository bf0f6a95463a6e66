use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::dataset::DatasetStats;

#[derive(Debug, Serialize)]
pub struct MetaResponse {
    pub name: String,
    pub version: String,
    pub dataset: DatasetStats,
}

pub async fn meta_info(State(state): State<AppState>) -> Json<MetaResponse> {
    Json(MetaResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        dataset: state.stats.clone(),
    })
}
