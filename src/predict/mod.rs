//! Match-outcome prediction engine.
//!
//! Combines six factors into a win probability for a player pair:
//! - Estimated class level from recent tournament participation
//! - Recent form (current win streak)
//! - Head-to-head meeting history, time-decayed
//! - Average per-set point differential
//! - Tournament performance index
//! - Federation ranking points
//!
//! The engine is pure and synchronous. Callers materialize the relevant
//! match records and ranking table first; every prediction is then an
//! independent computation over immutable inputs, safe to run
//! concurrently for many pairs.

mod class_level;
mod form;
mod head_to_head;
mod probability;
mod weights;

pub use class_level::estimate_class;
pub use form::analyze_form;
pub use head_to_head::{analyze_head_to_head, meetings_between};
pub use probability::{
    class_level_score, combine, head_to_head_score, normalize_score, point_diff_score,
    ranking_score, MAX_PROBABILITY, MIN_PROBABILITY,
};
pub use weights::allocate_weights;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{
    name_eq, Discipline, FactorScores, FormSummary, MatchRecord, PlayerBreakdown,
    PlayerClassEstimate, PredictionResult, RankingTable, WeightContext,
};

/// Both players' average margins must be under this many points for the
/// meeting history to count as close.
const CLOSE_MARGIN: f64 = 5.0;

/// Contract violations by the caller. Data-quality problems never raise;
/// they degrade to neutral signals instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PredictError {
    #[error("Player name is empty")]
    EmptyPlayerName,

    #[error("Both sides name the same player")]
    IdenticalPlayers,
}

/// Predict the outcome of a match between two named players.
///
/// `matches` is the pooled history involving either player; `today`
/// anchors the recency windows so results are reproducible.
pub fn predict(
    matches: &[MatchRecord],
    rankings: &RankingTable,
    player1: &str,
    player2: &str,
    discipline: Discipline,
    today: NaiveDate,
) -> Result<PredictionResult, PredictError> {
    if player1.trim().is_empty() || player2.trim().is_empty() {
        return Err(PredictError::EmptyPlayerName);
    }
    if name_eq(player1, player2) {
        return Err(PredictError::IdenticalPlayers);
    }

    let class1 = estimate_class(matches, player1, today);
    let class2 = estimate_class(matches, player2, today);
    let form1 = analyze_form(matches, player1);
    let form2 = analyze_form(matches, player2);
    let h2h = analyze_head_to_head(matches, player1, player2, today);

    let category1 = ranking_category(matches, player1);
    let category2 = ranking_category(matches, player2);
    let points1 = category1.map_or(0.0, |c| rankings.points_for(c, player1));
    let points2 = category2.map_or(0.0, |c| rankings.points_for(c, player2));

    let context = WeightContext {
        has_head_to_head: h2h.exists(),
        same_class: class1.level == class2.level,
        elite_vs_lower: class1.is_elite() != class2.is_elite(),
        close_head_to_head: form1.avg_point_diff.abs() < CLOSE_MARGIN
            && form2.avg_point_diff.abs() < CLOSE_MARGIN,
    };
    let weights = allocate_weights(&context);

    let factor_scores = FactorScores {
        class_level: class_level_score(&class1, &class2, weights.class_level),
        recent_form: normalize_score(form1.win_streak as f64, form2.win_streak as f64),
        head_to_head: head_to_head_score(&h2h),
        point_differential: point_diff_score(form1.avg_point_diff, form2.avg_point_diff),
        tournament_performance: normalize_score(
            form1.tournament_performance,
            form2.tournament_performance,
        ),
        ranking: ranking_score(points1, points2),
    };

    let player1_probability = combine(&weights, &factor_scores);
    let player2_probability = 1.0 - player1_probability;

    Ok(PredictionResult {
        discipline,
        player1: breakdown(matches, player1, class1, form1, category1, points1),
        player2: breakdown(matches, player2, class2, form2, category2, points2),
        head_to_head: h2h,
        weights,
        context,
        factor_scores,
        player1_probability,
        player2_probability,
        odds_player1: 1.0 / player1_probability,
        odds_player2: 1.0 / player2_probability,
    })
}

/// Which ranking list applies to a player, from their own singles
/// history. Doubles-only players have no singles ranking signal.
pub fn ranking_category(matches: &[MatchRecord], player: &str) -> Option<&'static str> {
    let mut womens = false;
    for m in matches.iter().filter(|m| m.involves(player)) {
        match m.discipline {
            Discipline::MensSingles => return Some("HS"),
            Discipline::WomensSingles => womens = true,
            _ => {}
        }
    }
    womens.then_some("DS")
}

fn breakdown(
    matches: &[MatchRecord],
    player: &str,
    class: PlayerClassEstimate,
    form: FormSummary,
    category: Option<&'static str>,
    points: f64,
) -> PlayerBreakdown {
    PlayerBreakdown {
        name: player.trim().to_string(),
        class_label: class.label().to_string(),
        class,
        form,
        ranking_category: category.map(str::to_string),
        ranking_points: points,
        matches_analyzed: matches.iter().filter(|m| m.involves(player)).count(),
    }
}
