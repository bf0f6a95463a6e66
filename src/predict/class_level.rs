//! Class-level estimation from recent tournament participation.

use chrono::{Months, NaiveDate};
use std::collections::BTreeSet;

use crate::models::{class_score, MatchRecord, PlayerClassEstimate};

/// Matches newer than this many months drive the estimate; older history
/// is only consulted when the window is empty.
const RECENT_WINDOW_MONTHS: u32 = 6;

/// Estimate a player's competitive tier from the tournament classes they
/// have entered recently.
///
/// Only dated matches participate: recency weighting needs an ordering,
/// and a record without a date has none. When the player has no match in
/// the recent window the full dated history is used instead, with the
/// confidence floored at 0.5 so an established player does not look
/// uncertain after a quiet half-year.
pub fn estimate_class(
    matches: &[MatchRecord],
    player: &str,
    today: NaiveDate,
) -> PlayerClassEstimate {
    let cutoff = today
        .checked_sub_months(Months::new(RECENT_WINDOW_MONTHS))
        .unwrap_or(NaiveDate::MIN);

    let mut dated: Vec<(NaiveDate, &str)> = matches
        .iter()
        .filter(|m| m.involves(player))
        .filter_map(|m| m.date.map(|d| (d, m.tournament_class.as_str())))
        .collect();
    dated.sort_by(|a, b| b.0.cmp(&a.0));

    let recent: Vec<(NaiveDate, &str)> =
        dated.iter().filter(|(d, _)| *d >= cutoff).copied().collect();
    let fallback = recent.is_empty();
    let window = if fallback { dated } else { recent };

    if window.is_empty() {
        return PlayerClassEstimate::unknown();
    }

    let total = window.len();
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for (i, (_, label)) in window.iter().enumerate() {
        let weight = (total - i) as f64;
        weighted_sum += weight * class_score(label);
        weight_total += weight;
    }
    let average = weighted_sum / weight_total;

    let confidence = if fallback {
        (total as f64 / 10.0).clamp(0.5, 0.8)
    } else {
        // Distinct class labels as written in the exports, score table
        // aside: "A" and "SEN A" are two classes here even though they
        // carry the same score, and an unrecognized label still counts.
        let distinct = window
            .iter()
            .map(|(_, label)| *label)
            .filter(|label| !label.is_empty())
            .collect::<BTreeSet<&str>>()
            .len();
        let consistency_penalty = ((distinct as f64 - 1.0) / 5.0).max(0.0);
        ((total as f64 / 10.0).min(1.0) * (1.0 - consistency_penalty)).clamp(0.0, 1.0)
    };

    PlayerClassEstimate {
        level: level_from_average(average),
        confidence,
        average_class_value: average,
        sample_size: total,
    }
}

/// Map a weighted average class value to the integer tier ladder.
fn level_from_average(average: f64) -> u8 {
    if average >= 6.0 {
        7
    } else if average >= 4.5 {
        5
    } else if average >= 3.5 {
        4
    } else if average >= 2.5 {
        3
    } else if average >= 1.5 {
        2
    } else if average > 0.0 {
        1
    } else {
        0
    }
}
