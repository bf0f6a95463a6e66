//! Per-factor scoring and the weighted probability combination.
//!
//! Every score is a value in [0, 1] from player1's perspective, with 0.5
//! meaning the factor carries no signal. Player2's score for a factor is
//! one minus player1's, which keeps the final probability symmetric
//! under swapping the players.

use crate::models::{FactorScores, HeadToHeadSummary, PlayerClassEstimate, WeightVector};

/// Probabilities are clamped into this range so decimal odds stay finite.
pub const MIN_PROBABILITY: f64 = 0.0001;
pub const MAX_PROBABILITY: f64 = 0.9999;

/// Normalize two non-negative magnitudes into player1's share. Both zero
/// (or any non-finite input) yields the neutral 0.5.
pub fn normalize_score(a: f64, b: f64) -> f64 {
    let a = a.abs();
    let b = b.abs();
    let total = a + b;
    if total > 0.0 && total.is_finite() {
        a / total
    } else {
        0.5
    }
}

/// Score the class-level gap between two players.
///
/// Unknown class on either side, or a zero class weight, mutes the
/// factor entirely. A clear gap with a trusted estimate is near-decisive;
/// otherwise the level ratio is blended toward 0.5 by how little the
/// estimates are trusted.
pub fn class_level_score(
    player1: &PlayerClassEstimate,
    player2: &PlayerClassEstimate,
    class_weight: f64,
) -> f64 {
    if player1.level == 0 || player2.level == 0 || class_weight <= 0.0 {
        return 0.5;
    }

    let diff = player1.level as i32 - player2.level as i32;
    let confidence = player1.confidence.max(player2.confidence);

    if diff.abs() >= 2 && confidence > 0.5 {
        return if diff > 0 { 0.99 } else { 0.01 };
    }
    if diff.abs() == 1 && confidence > 0.5 {
        return if diff > 0 { 0.80 } else { 0.20 };
    }

    let ratio = normalize_score(player1.level as f64, player2.level as f64);
    ratio * confidence + 0.5 * (1.0 - confidence)
}

/// Score the pair's meeting history from the time-decayed win totals.
pub fn head_to_head_score(h2h: &HeadToHeadSummary) -> f64 {
    if !h2h.exists() {
        return 0.5;
    }
    normalize_score(h2h.player1_weighted_wins, h2h.player2_weighted_wins)
}

/// Score the average per-set point margins. The +21 shift moves a
/// worst-case set loss to zero so the normalizer only sees non-negative
/// magnitudes.
pub fn point_diff_score(avg1: f64, avg2: f64) -> f64 {
    normalize_score((avg1 + 21.0).max(0.0), (avg2 + 21.0).max(0.0))
}

/// Score the ranking-points gap.
///
/// A missing ranking is a missing signal, not zero skill: one unranked
/// player gives the ranked one a fixed modest edge, and two unranked
/// players are even. Otherwise the points difference maps through four
/// bands, linearly interpolated inside each, oriented toward whichever
/// player holds more points.
pub fn ranking_score(points1: f64, points2: f64) -> f64 {
    if !points1.is_finite() || !points2.is_finite() {
        return 0.5;
    }
    let ranked1 = points1 > 0.0;
    let ranked2 = points2 > 0.0;
    match (ranked1, ranked2) {
        (false, false) => return 0.5,
        (true, false) => return 0.7,
        (false, true) => return 0.3,
        (true, true) => {}
    }

    let diff = (points1 - points2).abs();
    if diff == 0.0 {
        return 0.5;
    }
    let favored = if diff < 100.0 {
        0.55 + (diff / 100.0) * 0.05
    } else if diff < 300.0 {
        0.60 + ((diff - 100.0) / 200.0) * 0.10
    } else if diff < 500.0 {
        0.70 + ((diff - 300.0) / 200.0) * 0.15
    } else {
        (0.85 + ((diff - 500.0) / 1000.0) * 0.10).min(0.95)
    };

    if points1 > points2 {
        favored
    } else {
        1.0 - favored
    }
}

/// Combine the factor scores under the allocated weights into player1's
/// win probability. A non-finite sum degrades to even odds instead of
/// propagating.
pub fn combine(weights: &WeightVector, scores: &FactorScores) -> f64 {
    let p = weights.dot(scores);
    let p = if p.is_finite() { p } else { 0.5 };
    p.clamp(MIN_PROBABILITY, MAX_PROBABILITY)
}
