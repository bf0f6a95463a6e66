use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{
    name_eq, Discipline, HeadToHeadSummary, MatchRecord, PlayerBreakdown, TeamSlot,
};
use crate::predict::{
    analyze_form, analyze_head_to_head, estimate_class, meetings_between, ranking_category,
};

// ── Player List ─────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PlayerListResponse {
    pub players: Vec<String>,
    pub total: usize,
}

pub async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<PlayerListResponse>, ApiError> {
    let players = state.matches.player_names().await?;
    Ok(Json(PlayerListResponse {
        total: players.len(),
        players,
    }))
}

// ── Player Profile ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProfileParams {
    /// Overrides which ranking list is consulted; inferred from the
    /// player's own singles history when omitted.
    pub discipline: Option<String>,
}

pub async fn player_profile(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<ProfileParams>,
) -> Result<Json<PlayerBreakdown>, ApiError> {
    let matches = state.matches.matches_for_player(&name).await?;
    if matches.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No match history for player: {}",
            name
        )));
    }

    let category = match params.discipline.as_deref() {
        Some(label) => label
            .parse::<Discipline>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?
            .ranking_category(),
        None => ranking_category(&matches, &name),
    };

    let rankings = state.rankings.ranking_table().await?;
    let points = category.map_or(0.0, |c| rankings.points_for(c, &name));
    let today = chrono::Utc::now().date_naive();

    let class = estimate_class(&matches, &name, today);
    let form = analyze_form(&matches, &name);

    Ok(Json(PlayerBreakdown {
        name: name.trim().to_string(),
        class_label: class.label().to_string(),
        class,
        form,
        ranking_category: category.map(str::to_string),
        ranking_points: points,
        matches_analyzed: matches.len(),
    }))
}

// ── Head-to-Head ────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MeetingRow {
    pub date: Option<NaiveDate>,
    pub tournament: Option<String>,
    pub tournament_class: String,
    pub score: Option<String>,
    pub winner: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HeadToHeadResponse {
    pub player1: String,
    pub player2: String,
    pub summary: HeadToHeadSummary,
    pub meetings: Vec<MeetingRow>,
}

pub async fn head_to_head(
    State(state): State<AppState>,
    Path((player1, player2)): Path<(String, String)>,
) -> Result<Json<HeadToHeadResponse>, ApiError> {
    if player1.trim().is_empty() || player2.trim().is_empty() {
        return Err(ApiError::BadRequest("Player name is empty".to_string()));
    }
    if name_eq(&player1, &player2) {
        return Err(ApiError::BadRequest(
            "Both sides name the same player".to_string(),
        ));
    }

    let matches = state.matches.matches_for_pair(&player1, &player2).await?;
    let today = chrono::Utc::now().date_naive();

    let summary = analyze_head_to_head(&matches, &player1, &player2, today);
    let meetings = meetings_between(&matches, &player1, &player2, today)
        .into_iter()
        .map(|m| MeetingRow {
            date: m.date,
            tournament: m.tournament.clone(),
            tournament_class: m.tournament_class.clone(),
            score: m.score.as_ref().map(|s| s.to_string()),
            winner: m.winner().map(|slot| winner_name(m, slot)),
        })
        .collect();

    Ok(Json(HeadToHeadResponse {
        player1: player1.trim().to_string(),
        player2: player2.trim().to_string(),
        summary,
        meetings,
    }))
}

fn winner_name(record: &MatchRecord, slot: TeamSlot) -> String {
    match slot {
        TeamSlot::Team1 => record.team1.join(" / "),
        TeamSlot::Team2 => record.team2.join(" / "),
    }
}
