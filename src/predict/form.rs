//! Recent-form analysis: win streak, point margins, tournament results.

use crate::models::{FormSummary, MatchRecord};

/// How many of the player's most recent matches feed the form numbers.
const RECENT_MATCHES: usize = 10;

/// Recency weight decrement per step back in time.
const RECENCY_STEP: f64 = 0.05;

/// Tier points awarded for a win, by tournament-class label. Labels are
/// matched case-sensitively as exported; an empty label earns nothing.
fn tier_points(label: &str) -> f64 {
    if label.is_empty() {
        0.0
    } else if label.contains("Elite") {
        3.0
    } else if label.contains('A') {
        2.0
    } else {
        1.0
    }
}

/// Summarize a player's form over their ten most recent dated matches in
/// any discipline.
///
/// The win streak is the current one: counting stops at the first loss,
/// while matches without a determinable winner neither extend nor break
/// it. Point margins are per set, signed from the player's perspective,
/// recency-weighted per match, and averaged over every set seen.
pub fn analyze_form(matches: &[MatchRecord], player: &str) -> FormSummary {
    let mut dated: Vec<&MatchRecord> = matches
        .iter()
        .filter(|m| m.involves(player) && m.date.is_some())
        .collect();
    dated.sort_by(|a, b| b.date.cmp(&a.date));
    dated.truncate(RECENT_MATCHES);

    let mut summary = FormSummary {
        matches_considered: dated.len(),
        ..Default::default()
    };

    let mut margin_sum = 0.0;
    let mut set_count = 0usize;
    let mut streak_open = true;

    for (i, m) in dated.iter().enumerate() {
        let weight = 1.0 - RECENCY_STEP * i as f64;

        match m.won_by(player) {
            Some(true) => {
                summary.wins += 1;
                if streak_open {
                    summary.win_streak += 1;
                }
                summary.tournament_performance += weight * tier_points(&m.tournament_class);
            }
            Some(false) => streak_open = false,
            None => {}
        }

        if let (Some(side), Some(score)) = (m.side_of(player), m.score.as_ref()) {
            for set in &score.sets {
                margin_sum += set.margin(side) as f64 * weight;
                set_count += 1;
            }
        }
    }

    if set_count > 0 {
        summary.avg_point_diff = margin_sum / set_count as f64;
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Discipline, MatchId, ScoreLine, TeamSlot};
    use chrono::NaiveDate;

    fn rec(date: &str, class: &str, player: &str, opponent: &str, result: &str) -> MatchRecord {
        MatchRecord {
            id: MatchId::generate(&[date, class, player, opponent, result]),
            date: NaiveDate::parse_from_str(date, "%d.%m.%Y").ok(),
            discipline: Discipline::MensSingles,
            tournament: None,
            tournament_class: class.to_string(),
            team1: vec![player.to_string()],
            team2: vec![opponent.to_string()],
            score: ScoreLine::parse(result),
            declared_winner: None,
        }
    }

    #[test]
    fn test_no_matches_is_zero_form() {
        let summary = analyze_form(&[], "A");
        assert_eq!(summary, FormSummary::default());
    }

    #[test]
    fn test_considers_at_most_ten_matches() {
        let matches: Vec<MatchRecord> = (1..=12)
            .map(|day| rec(&format!("{day:02}.05.2024"), "SEN B", "A", "B", "21-10, 21-10"))
            .collect();
        let summary = analyze_form(&matches, "A");
        assert_eq!(summary.matches_considered, 10);
        assert_eq!(summary.wins, 10);
    }

    #[test]
    fn test_streak_stops_at_first_loss() {
        // Newest first: win, win, loss, win.
        let matches = vec![
            rec("04.05.2024", "SEN B", "A", "B", "21-10, 21-10"),
            rec("03.05.2024", "SEN B", "A", "B", "21-10, 21-10"),
            rec("02.05.2024", "SEN B", "A", "B", "10-21, 10-21"),
            rec("01.05.2024", "SEN B", "A", "B", "21-10, 21-10"),
        ];
        let summary = analyze_form(&matches, "A");
        assert_eq!(summary.win_streak, 2);
        assert_eq!(summary.wins, 3);
    }

    #[test]
    fn test_undecided_match_does_not_break_streak() {
        let matches = vec![
            rec("03.05.2024", "SEN B", "A", "B", "21-10, 10-21"),
            rec("02.05.2024", "SEN B", "A", "B", "21-10, 21-10"),
            rec("01.05.2024", "SEN B", "A", "B", "21-10, 21-10"),
        ];
        let summary = analyze_form(&matches, "A");
        assert_eq!(summary.win_streak, 2);
    }

    #[test]
    fn test_avg_point_diff_single_match() {
        let matches = vec![rec("01.05.2024", "SEN B", "A", "B", "21-15, 21-12")];
        let summary = analyze_form(&matches, "A");
        assert!((summary.avg_point_diff - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_avg_point_diff_recency_weighted() {
        let matches = vec![
            rec("02.05.2024", "SEN B", "A", "B", "21-15"),
            rec("01.05.2024", "SEN B", "A", "B", "10-21"),
        ];
        let summary = analyze_form(&matches, "A");
        // (6 * 1.0 + (-11) * 0.95) / 2 sets
        assert!((summary.avg_point_diff - (6.0 - 10.45) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_diff_signed_from_team_two_side() {
        let matches = vec![rec("01.05.2024", "SEN B", "B", "A", "21-15, 21-12")];
        let summary = analyze_form(&matches, "A");
        assert!((summary.avg_point_diff + 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_tournament_performance_tiers_and_weights() {
        // Newest win in Elite (3 pts at weight 1.0), older win in SEN A
        // (2 pts at weight 0.95).
        let matches = vec![
            rec("02.05.2024", "Elite", "A", "B", "21-10, 21-10"),
            rec("01.05.2024", "SEN A", "A", "B", "21-10, 21-10"),
        ];
        let summary = analyze_form(&matches, "A");
        assert!((summary.tournament_performance - (3.0 + 1.9)).abs() < 1e-9);
    }

    #[test]
    fn test_losses_and_unlabeled_wins_earn_no_tier_points() {
        let matches = vec![
            rec("02.05.2024", "Elite", "A", "B", "10-21, 10-21"),
            rec("01.05.2024", "", "A", "B", "21-10, 21-10"),
        ];
        let summary = analyze_form(&matches, "A");
        assert_eq!(summary.tournament_performance, 0.0);
    }

    #[test]
    fn test_doubles_matches_count_toward_form() {
        let mut m = rec("01.05.2024", "SEN B", "A", "C", "21-10, 21-10");
        m.discipline = Discipline::MensDoubles;
        m.team1.push("Partner".to_string());
        m.team2.push("Other".to_string());
        let summary = analyze_form(&[m], "A");
        assert_eq!(summary.matches_considered, 1);
        assert_eq!(summary.wins, 1);
    }

    #[test]
    fn test_declared_winner_counts_without_sets() {
        let mut m = rec("01.05.2024", "SEN B", "A", "B", "21-x");
        m.declared_winner = Some(TeamSlot::Team1);
        let summary = analyze_form(&[m], "A");
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.avg_point_diff, 0.0);
    }
}
