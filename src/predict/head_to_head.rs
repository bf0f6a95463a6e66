//! Head-to-head extraction and time-decayed win statistics.

use chrono::{Months, NaiveDate};

use crate::models::{HeadToHeadSummary, MatchRecord};

/// Meetings older than this are no longer considered predictive.
const WINDOW_MONTHS: u32 = 24;

/// Per-step decay applied to older decided meetings.
const DECAY: f64 = 0.8;

/// The pair's direct meetings, newest first.
///
/// A meeting counts when it is a singles match of any discipline, dated
/// within the window, with the two players on opposite sides.
pub fn meetings_between<'a>(
    matches: &'a [MatchRecord],
    player1: &str,
    player2: &str,
    today: NaiveDate,
) -> Vec<&'a MatchRecord> {
    let cutoff = today
        .checked_sub_months(Months::new(WINDOW_MONTHS))
        .unwrap_or(NaiveDate::MIN);

    let mut meetings: Vec<&MatchRecord> = matches
        .iter()
        .filter(|m| m.discipline.is_singles())
        .filter(|m| m.date.is_some_and(|d| d >= cutoff))
        .filter(|m| {
            matches!(
                (m.side_of(player1), m.side_of(player2)),
                (Some(side1), Some(side2)) if side1 != side2
            )
        })
        .collect();
    meetings.sort_by(|a, b| b.date.cmp(&a.date));
    meetings
}

/// Collect the pair's direct meetings and score them.
///
/// Undecided meetings (no parseable result and no winner indicator, or
/// an even set split) stay in the meeting count but contribute nothing
/// to wins, the win rate, or the decayed totals.
pub fn analyze_head_to_head(
    matches: &[MatchRecord],
    player1: &str,
    player2: &str,
    today: NaiveDate,
) -> HeadToHeadSummary {
    let meetings = meetings_between(matches, player1, player2, today);

    let mut summary = HeadToHeadSummary {
        meetings: meetings.len(),
        ..Default::default()
    };

    let mut decided = 0u32;
    for m in &meetings {
        let won = m
            .side_of(player1)
            .and_then(|side| m.winner().map(|w| w == side));
        let Some(player1_won) = won else {
            continue;
        };
        let weight = DECAY.powi(decided as i32);
        if player1_won {
            summary.player1_wins += 1;
            summary.player1_weighted_wins += weight;
        } else {
            summary.player2_wins += 1;
            summary.player2_weighted_wins += weight;
        }
        decided += 1;
    }

    summary.qualifying_matches = summary.player1_wins + summary.player2_wins;
    if summary.qualifying_matches > 0 {
        summary.win_rate = summary.player1_wins as f64 / summary.qualifying_matches as f64;
    }

    summary
}
