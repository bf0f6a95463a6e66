//! Prediction output types: weights, factor scores, and the result
//! payload returned to callers.

use serde::{Deserialize, Serialize};

use super::{Discipline, PlayerClassEstimate};

/// The six factor weights used to combine per-factor scores. Components
/// are non-negative and sum to 1.0 when the vector reaches the
/// probability calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub class_level: f64,
    pub recent_form: f64,
    pub head_to_head: f64,
    pub point_differential: f64,
    pub tournament_performance: f64,
    pub ranking: f64,
}

impl WeightVector {
    /// Components in declaration order.
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.class_level,
            self.recent_form,
            self.head_to_head,
            self.point_differential,
            self.tournament_performance,
            self.ranking,
        ]
    }

    /// Rebuild from components in declaration order.
    pub fn from_array(values: [f64; 6]) -> Self {
        Self {
            class_level: values[0],
            recent_form: values[1],
            head_to_head: values[2],
            point_differential: values[3],
            tournament_performance: values[4],
            ranking: values[5],
        }
    }

    pub fn sum(&self) -> f64 {
        self.to_array().iter().sum()
    }

    /// Scale the vector so its components sum to 1.0. A zero vector is
    /// returned unchanged rather than dividing by zero.
    pub fn normalized(&self) -> Self {
        let total = self.sum();
        if total <= 0.0 {
            return *self;
        }
        Self::from_array(self.to_array().map(|w| w / total))
    }

    /// Weighted sum of the per-factor scores.
    pub fn dot(&self, scores: &FactorScores) -> f64 {
        self.class_level * scores.class_level
            + self.recent_form * scores.recent_form
            + self.head_to_head * scores.head_to_head
            + self.point_differential * scores.point_differential
            + self.tournament_performance * scores.tournament_performance
            + self.ranking * scores.ranking
    }
}

/// Per-factor scores in [0, 1], always from player1's perspective.
/// Player2's score for any factor is one minus the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorScores {
    pub class_level: f64,
    pub recent_form: f64,
    pub head_to_head: f64,
    pub point_differential: f64,
    pub tournament_performance: f64,
    pub ranking: f64,
}

/// Situation flags that drove the weight allocation, reported for
/// explainability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightContext {
    /// At least one decided head-to-head meeting exists.
    pub has_head_to_head: bool,
    /// Both players estimated at the same class level.
    pub same_class: bool,
    /// Exactly one player is Elite class.
    pub elite_vs_lower: bool,
    /// Both players' average point margins are under five points.
    pub close_head_to_head: bool,
}

/// Direct-meeting statistics for a player pair: singles only, inside the
/// two-year window, the players on opposite sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadToHeadSummary {
    /// Meetings passing the filter, decided or not.
    pub meetings: usize,
    /// Meetings with a determinable winner; only these feed statistics.
    pub qualifying_matches: usize,
    pub player1_wins: usize,
    pub player2_wins: usize,
    /// player1's share of qualifying matches won; 0.5 when none exist.
    pub win_rate: f64,
    /// Time-decayed win totals, most recent meeting weighted highest.
    pub player1_weighted_wins: f64,
    pub player2_weighted_wins: f64,
}

impl HeadToHeadSummary {
    /// Whether any decided meeting exists to score from.
    pub fn exists(&self) -> bool {
        self.qualifying_matches > 0
    }
}

impl Default for HeadToHeadSummary {
    fn default() -> Self {
        Self {
            meetings: 0,
            qualifying_matches: 0,
            player1_wins: 0,
            player2_wins: 0,
            win_rate: 0.5,
            player1_weighted_wins: 0.0,
            player2_weighted_wins: 0.0,
        }
    }
}

/// One player's recent-form numbers over their ten most recent dated
/// matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSummary {
    /// Dated matches considered, capped at ten.
    pub matches_considered: usize,
    /// Wins among the considered matches.
    pub wins: usize,
    /// Consecutive wins counting back from the most recent decided match.
    pub win_streak: usize,
    /// Recency-weighted mean per-set point margin.
    pub avg_point_diff: f64,
    /// Recency-weighted tier points accumulated from tournament wins.
    pub tournament_performance: f64,
}

/// Everything the engine derived about one player, reported alongside
/// the probability for auditability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBreakdown {
    pub name: String,
    pub class: PlayerClassEstimate,
    /// Human-readable label for the estimated class level.
    pub class_label: String,
    pub form: FormSummary,
    /// Ranking list consulted for this player, when one applies.
    pub ranking_category: Option<String>,
    pub ranking_points: f64,
    /// Match records inspected for this player.
    pub matches_analyzed: usize,
}

/// The full prediction for one pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub discipline: Discipline,
    pub player1: PlayerBreakdown,
    pub player2: PlayerBreakdown,
    pub head_to_head: HeadToHeadSummary,
    pub weights: WeightVector,
    pub context: WeightContext,
    pub factor_scores: FactorScores,
    pub player1_probability: f64,
    pub player2_probability: f64,
    pub odds_player1: f64,
    pub odds_player2: f64,
}
