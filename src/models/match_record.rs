//! Match records: raw league-export rows validated into typed records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::{name_eq, Discipline, MatchId};

/// Which side of the net a team played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSlot {
    Team1,
    Team2,
}

/// One set's final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub team1: u32,
    pub team2: u32,
}

impl SetScore {
    /// The side that scored more points, if any.
    pub fn winner(&self) -> Option<TeamSlot> {
        match self.team1.cmp(&self.team2) {
            std::cmp::Ordering::Greater => Some(TeamSlot::Team1),
            std::cmp::Ordering::Less => Some(TeamSlot::Team2),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Signed point margin from the given side's perspective.
    pub fn margin(&self, slot: TeamSlot) -> i32 {
        match slot {
            TeamSlot::Team1 => self.team1 as i32 - self.team2 as i32,
            TeamSlot::Team2 => self.team2 as i32 - self.team1 as i32,
        }
    }
}

/// A parsed result string: the ordered per-set scores of one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub sets: Vec<SetScore>,
}

impl ScoreLine {
    /// Parse a result string like `"21-18, 19-21, 21-15"`.
    ///
    /// Sets are comma-separated; scores within a set are separated by `-`
    /// or `/`. Parsing is all-or-nothing: a single malformed set makes the
    /// whole line unusable, so winner determination falls back to the
    /// explicit winner indicator instead of guessing from partial data.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut sets = Vec::new();
        for part in raw.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let scores: Vec<&str> = part.split(['-', '/']).collect();
            if scores.len() != 2 {
                return None;
            }
            let team1: u32 = scores[0].trim().parse().ok()?;
            let team2: u32 = scores[1].trim().parse().ok()?;
            sets.push(SetScore { team1, team2 });
        }
        if sets.is_empty() {
            return None;
        }
        Some(Self { sets })
    }

    /// Sets won by the given side.
    pub fn sets_won(&self, slot: TeamSlot) -> usize {
        self.sets.iter().filter(|s| s.winner() == Some(slot)).count()
    }

    /// The side that won the majority of sets. An even split yields no
    /// winner rather than a guess.
    pub fn winner(&self) -> Option<TeamSlot> {
        let team1 = self.sets_won(TeamSlot::Team1);
        let team2 = self.sets_won(TeamSlot::Team2);
        match team1.cmp(&team2) {
            std::cmp::Ordering::Greater => Some(TeamSlot::Team1),
            std::cmp::Ordering::Less => Some(TeamSlot::Team2),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for ScoreLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, set) in self.sets.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}-{}", set.team1, set.team2)?;
        }
        Ok(())
    }
}

/// One played match, validated at ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Deterministic content-derived ID, used to dedup overlapping exports.
    pub id: MatchId,

    /// Match date. None when the export row carried no parseable date;
    /// such records are excluded from every time-windowed computation.
    pub date: Option<NaiveDate>,

    /// Discipline the match was played in.
    pub discipline: Discipline,

    /// Tournament name, when the export carried one.
    pub tournament: Option<String>,

    /// Free-form skill-tier label ("Elite", "SEN A", …). Empty when absent.
    pub tournament_class: String,

    /// Players on team 1 (one for singles, two for doubles).
    pub team1: Vec<String>,

    /// Players on team 2.
    pub team2: Vec<String>,

    /// Parsed per-set scores. None when the result string was absent or
    /// malformed.
    pub score: Option<ScoreLine>,

    /// Winner per the export's explicit indicator, used as fallback when
    /// the result string cannot be parsed.
    pub declared_winner: Option<TeamSlot>,
}

impl MatchRecord {
    /// Which side the named player was on, if they played in this match.
    pub fn side_of(&self, player: &str) -> Option<TeamSlot> {
        if self.team1.iter().any(|p| name_eq(p, player)) {
            Some(TeamSlot::Team1)
        } else if self.team2.iter().any(|p| name_eq(p, player)) {
            Some(TeamSlot::Team2)
        } else {
            None
        }
    }

    /// Whether the named player appears on either side.
    pub fn involves(&self, player: &str) -> bool {
        self.side_of(player).is_some()
    }

    /// The winning side: derived from the score when possible, otherwise
    /// the export's explicit indicator. None means the match is undecided
    /// for statistics purposes.
    pub fn winner(&self) -> Option<TeamSlot> {
        self.score
            .as_ref()
            .and_then(|s| s.winner())
            .or(self.declared_winner)
    }

    /// Whether the named player won. None when the player did not play or
    /// no winner can be determined.
    pub fn won_by(&self, player: &str) -> Option<bool> {
        let side = self.side_of(player)?;
        let winner = self.winner()?;
        Some(side == winner)
    }
}

/// Errors raised when validating a raw export row.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Missing discipline label")]
    MissingDiscipline,

    #[error("Unknown discipline label: {0}")]
    UnknownDiscipline(String),

    #[error("Team {0} has no players")]
    EmptyTeam(u8),
}

/// One row of the scraped league export, field names as exported.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMatchRecord {
    #[serde(rename = "Date", default)]
    pub date: Option<String>,

    /// Discipline label; older exports use "Match", newer ones "Category".
    #[serde(rename = "Match", default)]
    pub match_label: Option<String>,

    #[serde(rename = "Category", default)]
    pub category_label: Option<String>,

    #[serde(rename = "Tournament", default)]
    pub tournament: Option<String>,

    #[serde(rename = "Tournament Class", default)]
    pub tournament_class: Option<String>,

    #[serde(rename = "Team 1 Player 1", default)]
    pub team1_player1: Option<String>,

    #[serde(rename = "Team 1 Player 2", default)]
    pub team1_player2: Option<String>,

    #[serde(rename = "Team 2 Player 1", default)]
    pub team2_player1: Option<String>,

    #[serde(rename = "Team 2 Player 2", default)]
    pub team2_player2: Option<String>,

    #[serde(rename = "Result", default)]
    pub result: Option<String>,

    #[serde(rename = "Winner", default)]
    pub winner: Option<String>,
}

/// Normalize an exported cell: trim and discard placeholder values.
fn clean(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl MatchRecord {
    /// Validate a raw export row into a typed record.
    pub fn from_raw(raw: RawMatchRecord) -> Result<Self, RecordError> {
        let label = clean(raw.match_label)
            .or_else(|| clean(raw.category_label))
            .ok_or(RecordError::MissingDiscipline)?;
        let discipline =
            Discipline::from_label(&label).ok_or(RecordError::UnknownDiscipline(label))?;

        let team1: Vec<String> = [clean(raw.team1_player1), clean(raw.team1_player2)]
            .into_iter()
            .flatten()
            .collect();
        let team2: Vec<String> = [clean(raw.team2_player1), clean(raw.team2_player2)]
            .into_iter()
            .flatten()
            .collect();
        if team1.is_empty() {
            return Err(RecordError::EmptyTeam(1));
        }
        if team2.is_empty() {
            return Err(RecordError::EmptyTeam(2));
        }

        let date_raw = clean(raw.date);
        let date = date_raw
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%d.%m.%Y").ok());

        let result_raw = clean(raw.result);
        let score = result_raw.as_deref().and_then(ScoreLine::parse);

        let declared_winner = clean(raw.winner).and_then(|w| match w.as_str() {
            "1" => Some(TeamSlot::Team1),
            "2" => Some(TeamSlot::Team2),
            _ => None,
        });

        let id = MatchId::generate(&[
            date_raw.as_deref().unwrap_or(""),
            &discipline.to_string(),
            &team1.join("+"),
            &team2.join("+"),
            result_raw.as_deref().unwrap_or(""),
        ]);

        Ok(Self {
            id,
            date,
            discipline,
            tournament: clean(raw.tournament),
            tournament_class: clean(raw.tournament_class).unwrap_or_default(),
            team1,
            team2,
            score,
            declared_winner,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(fields: &[(&str, &str)]) -> RawMatchRecord {
        let mut value = serde_json::Map::new();
        for (k, v) in fields {
            value.insert(k.to_string(), serde_json::Value::String(v.to_string()));
        }
        serde_json::from_value(serde_json::Value::Object(value)).unwrap()
    }

    fn singles(player1: &str, player2: &str, result: &str) -> MatchRecord {
        MatchRecord::from_raw(raw(&[
            ("Date", "12.03.2024"),
            ("Match", "Herresingle"),
            ("Tournament Class", "SEN B"),
            ("Team 1 Player 1", player1),
            ("Team 2 Player 1", player2),
            ("Result", result),
        ]))
        .unwrap()
    }

    #[test]
    fn test_score_line_parse() {
        let line = ScoreLine::parse("21-18, 19-21, 21-15").unwrap();
        assert_eq!(line.sets.len(), 3);
        assert_eq!(line.sets[0], SetScore { team1: 21, team2: 18 });
        assert_eq!(line.sets[1], SetScore { team1: 19, team2: 21 });
    }

    #[test]
    fn test_score_line_parse_slash_separator() {
        let line = ScoreLine::parse("21/15, 21/12").unwrap();
        assert_eq!(line.sets.len(), 2);
        assert_eq!(line.winner(), Some(TeamSlot::Team1));
    }

    #[test]
    fn test_score_line_parse_unparseable_set_rejects_line() {
        assert_eq!(ScoreLine::parse("21-18, 21-x"), None);
        assert_eq!(ScoreLine::parse("21-x"), None);
        assert_eq!(ScoreLine::parse("walkover"), None);
        assert_eq!(ScoreLine::parse(""), None);
    }

    #[test]
    fn test_score_line_skips_empty_segments() {
        let line = ScoreLine::parse("21-18, ").unwrap();
        assert_eq!(line.sets.len(), 1);
    }

    #[test]
    fn test_score_line_winner_majority() {
        let line = ScoreLine::parse("21-18, 19-21, 21-15").unwrap();
        assert_eq!(line.winner(), Some(TeamSlot::Team1));
        assert_eq!(line.sets_won(TeamSlot::Team1), 2);
        assert_eq!(line.sets_won(TeamSlot::Team2), 1);

        let line = ScoreLine::parse("18-21, 21-19, 15-21").unwrap();
        assert_eq!(line.winner(), Some(TeamSlot::Team2));
    }

    #[test]
    fn test_score_line_even_split_no_winner() {
        let line = ScoreLine::parse("21-18, 18-21").unwrap();
        assert_eq!(line.winner(), None);
    }

    #[test]
    fn test_set_margin_signed_per_side() {
        let line = ScoreLine::parse("21-15, 15-21").unwrap();
        assert_eq!(line.sets[0].margin(TeamSlot::Team1), 6);
        assert_eq!(line.sets[0].margin(TeamSlot::Team2), -6);
        assert_eq!(line.sets[1].margin(TeamSlot::Team1), -6);
    }

    #[test]
    fn test_score_line_display_round_trip() {
        let line = ScoreLine::parse("21-18, 19-21, 21-15").unwrap();
        assert_eq!(line.to_string(), "21-18, 19-21, 21-15");
    }

    #[test]
    fn test_from_raw_full_record() {
        let record = singles("Ola Nordmann", "Per Hansen", "21-18, 19-21, 21-15");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 12));
        assert_eq!(record.discipline, Discipline::MensSingles);
        assert_eq!(record.tournament_class, "SEN B");
        assert_eq!(record.team1, vec!["Ola Nordmann".to_string()]);
        assert_eq!(record.winner(), Some(TeamSlot::Team1));
    }

    #[test]
    fn test_from_raw_category_field_fallback() {
        let record = MatchRecord::from_raw(raw(&[
            ("Date", "01.02.2024"),
            ("Category", "Damesingle"),
            ("Team 1 Player 1", "Anne Lie"),
            ("Team 2 Player 1", "Ida Berg"),
        ]))
        .unwrap();
        assert_eq!(record.discipline, Discipline::WomensSingles);
    }

    #[test]
    fn test_from_raw_unparseable_date_kept_without_date() {
        let record = MatchRecord::from_raw(raw(&[
            ("Date", "sometime in March"),
            ("Match", "Herresingle"),
            ("Team 1 Player 1", "A"),
            ("Team 2 Player 1", "B"),
        ]))
        .unwrap();
        assert_eq!(record.date, None);
    }

    #[test]
    fn test_from_raw_missing_discipline() {
        let err = MatchRecord::from_raw(raw(&[
            ("Date", "01.02.2024"),
            ("Team 1 Player 1", "A"),
            ("Team 2 Player 1", "B"),
        ]))
        .unwrap_err();
        assert!(matches!(err, RecordError::MissingDiscipline));
    }

    #[test]
    fn test_from_raw_unknown_discipline() {
        let err = MatchRecord::from_raw(raw(&[
            ("Match", "Squash"),
            ("Team 1 Player 1", "A"),
            ("Team 2 Player 1", "B"),
        ]))
        .unwrap_err();
        assert!(matches!(err, RecordError::UnknownDiscipline(_)));
    }

    #[test]
    fn test_from_raw_empty_team() {
        let err = MatchRecord::from_raw(raw(&[
            ("Match", "Herresingle"),
            ("Team 1 Player 1", "NaN"),
            ("Team 2 Player 1", "B"),
        ]))
        .unwrap_err();
        assert!(matches!(err, RecordError::EmptyTeam(1)));
    }

    #[test]
    fn test_from_raw_doubles_partners() {
        let record = MatchRecord::from_raw(raw(&[
            ("Date", "05.05.2024"),
            ("Match", "Herredouble"),
            ("Team 1 Player 1", "A"),
            ("Team 1 Player 2", "B"),
            ("Team 2 Player 1", "C"),
            ("Team 2 Player 2", "D"),
        ]))
        .unwrap();
        assert_eq!(record.team1.len(), 2);
        assert_eq!(record.side_of("B"), Some(TeamSlot::Team1));
        assert_eq!(record.side_of("D"), Some(TeamSlot::Team2));
    }

    #[test]
    fn test_side_of_trims_and_ignores_case() {
        let record = singles("Bjørn Åsen", "Per Hansen", "21-10, 21-12");
        assert_eq!(record.side_of("bjørn åsen"), Some(TeamSlot::Team1));
        assert_eq!(record.side_of("  BJØRN ÅSEN "), Some(TeamSlot::Team1));
        assert_eq!(record.side_of("Someone Else"), None);
        assert!(record.involves("per hansen"));
    }

    #[test]
    fn test_winner_falls_back_to_declared() {
        let record = MatchRecord::from_raw(raw(&[
            ("Date", "12.03.2024"),
            ("Match", "Herresingle"),
            ("Team 1 Player 1", "A"),
            ("Team 2 Player 1", "B"),
            ("Result", "21-x"),
            ("Winner", "2"),
        ]))
        .unwrap();
        assert_eq!(record.score, None);
        assert_eq!(record.winner(), Some(TeamSlot::Team2));
        assert_eq!(record.won_by("B"), Some(true));
        assert_eq!(record.won_by("A"), Some(false));
    }

    #[test]
    fn test_winner_undetermined() {
        let record = MatchRecord::from_raw(raw(&[
            ("Date", "12.03.2024"),
            ("Match", "Herresingle"),
            ("Team 1 Player 1", "A"),
            ("Team 2 Player 1", "B"),
        ]))
        .unwrap();
        assert_eq!(record.winner(), None);
        assert_eq!(record.won_by("A"), None);
    }

    #[test]
    fn test_duplicate_rows_share_id() {
        let a = singles("Ola Nordmann", "Per Hansen", "21-18, 21-15");
        let b = singles("Ola Nordmann", "Per Hansen", "21-18, 21-15");
        let c = singles("Ola Nordmann", "Per Hansen", "21-18, 21-16");
        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
    }
}
