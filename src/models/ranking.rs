//! Federation ranking lists: per-category player points by season.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use super::name_eq;

/// Ranking category code for singles lists. Doubles results do not feed
/// the ranking comparison, so only these two lists are consulted.
pub const RANKING_CATEGORIES: [&str; 2] = ["HS", "DS"];

/// One player's row in a ranking list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub club: Option<String>,
    /// Points per season label. Season labels are four-digit years, so
    /// lexicographic order is chronological order.
    pub points_by_season: BTreeMap<String, f64>,
}

impl RankingEntry {
    /// Points from the most recent season with a positive total. Players
    /// whose every season is zero or missing count as unranked.
    pub fn latest_points(&self) -> f64 {
        self.points_by_season
            .iter()
            .rev()
            .find(|(_, pts)| **pts > 0.0)
            .map(|(_, pts)| *pts)
            .unwrap_or(0.0)
    }
}

/// Errors raised when validating a raw ranking row.
#[derive(Debug, Error)]
pub enum RankingError {
    #[error("Ranking row has no player name")]
    MissingName,
}

/// One row of the exported ranking list, field names as exported. Season
/// columns are captured as-is; values arrive as numbers or strings
/// depending on the export run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRankingEntry {
    #[serde(rename = "Navn", default)]
    pub name: Option<String>,

    #[serde(rename = "Klubb", default)]
    pub club: Option<String>,

    #[serde(flatten)]
    pub columns: BTreeMap<String, serde_json::Value>,
}

fn is_season_key(key: &str) -> bool {
    key.len() == 4 && key.chars().all(|c| c.is_ascii_digit())
}

/// Parse a season cell. Handles numeric cells and string cells, including
/// the decimal-comma form some export runs produce.
fn season_points(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        serde_json::Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s == "-" {
                return None;
            }
            s.parse::<f64>()
                .or_else(|_| s.replace(',', ".").parse::<f64>())
                .ok()
                .filter(|v| v.is_finite())
        }
        _ => None,
    }
}

impl RankingEntry {
    /// Validate a raw ranking row into a typed entry.
    pub fn from_raw(raw: RawRankingEntry) -> Result<Self, RankingError> {
        let name = raw
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or(RankingError::MissingName)?
            .to_string();

        let points_by_season = raw
            .columns
            .iter()
            .filter(|(key, _)| is_season_key(key))
            .filter_map(|(key, value)| season_points(value).map(|pts| (key.clone(), pts)))
            .collect();

        Ok(Self {
            name,
            club: raw.club.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()),
            points_by_season,
        })
    }
}

/// All ranking lists, keyed by category code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingTable {
    pub categories: HashMap<String, Vec<RankingEntry>>,
}

impl RankingTable {
    /// Find a player's row in one category.
    pub fn lookup(&self, category: &str, player: &str) -> Option<&RankingEntry> {
        self.categories
            .get(category)?
            .iter()
            .find(|entry| name_eq(&entry.name, player))
    }

    /// Current ranking points for a player in a category. Zero when the
    /// player is absent from the list, which the prediction layer treats
    /// as unranked.
    pub fn points_for(&self, category: &str, player: &str) -> f64 {
        self.lookup(category, player)
            .map(RankingEntry::latest_points)
            .unwrap_or(0.0)
    }

    /// Insert an entry, merging season columns when the player already
    /// appears in the category. Later exports win on season conflicts.
    pub fn upsert(&mut self, category: &str, entry: RankingEntry) {
        let list = self.categories.entry(category.to_string()).or_default();
        match list.iter_mut().find(|e| name_eq(&e.name, &entry.name)) {
            Some(existing) => {
                existing.points_by_season.extend(entry.points_by_season);
                if existing.club.is_none() {
                    existing.club = entry.club;
                }
            }
            None => list.push(entry),
        }
    }

    /// Number of ranking rows in one category.
    pub fn category_len(&self, category: &str) -> usize {
        self.categories.get(category).map_or(0, Vec::len)
    }

    /// Total number of ranking rows across all categories.
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, seasons: &[(&str, f64)]) -> RankingEntry {
        RankingEntry {
            name: name.to_string(),
            club: None,
            points_by_season: seasons
                .iter()
                .map(|(s, p)| (s.to_string(), *p))
                .collect(),
        }
    }

    #[test]
    fn test_latest_points_prefers_newest_season() {
        let e = entry("A", &[("2022", 900.0), ("2023", 1100.0), ("2024", 1350.0)]);
        assert_eq!(e.latest_points(), 1350.0);
    }

    #[test]
    fn test_latest_points_skips_zero_seasons() {
        let e = entry("A", &[("2023", 1100.0), ("2024", 0.0)]);
        assert_eq!(e.latest_points(), 1100.0);
    }

    #[test]
    fn test_latest_points_all_zero() {
        let e = entry("A", &[("2024", 0.0)]);
        assert_eq!(e.latest_points(), 0.0);
        assert_eq!(entry("B", &[]).latest_points(), 0.0);
    }

    #[test]
    fn test_from_raw_parses_numeric_and_string_seasons() {
        let raw: RawRankingEntry = serde_json::from_value(serde_json::json!({
            "Navn": " Ola Nordmann ",
            "Klubb": "BK Smash",
            "2023": 980.5,
            "2024": "1234,5",
            "Spiller-Id": "99887"
        }))
        .unwrap();
        let e = RankingEntry::from_raw(raw).unwrap();
        assert_eq!(e.name, "Ola Nordmann");
        assert_eq!(e.club.as_deref(), Some("BK Smash"));
        assert_eq!(e.points_by_season.len(), 2);
        assert_eq!(e.points_by_season["2023"], 980.5);
        assert_eq!(e.points_by_season["2024"], 1234.5);
    }

    #[test]
    fn test_from_raw_missing_name() {
        let raw: RawRankingEntry =
            serde_json::from_value(serde_json::json!({ "Klubb": "BK Smash" })).unwrap();
        assert!(matches!(
            RankingEntry::from_raw(raw),
            Err(RankingError::MissingName)
        ));
    }

    #[test]
    fn test_points_for_matches_names_loosely() {
        let mut table = RankingTable::default();
        table.upsert("HS", entry("Bjørn Åsen", &[("2024", 1500.0)]));
        assert_eq!(table.points_for("HS", "  bjørn åsen "), 1500.0);
        assert_eq!(table.points_for("HS", "Someone Else"), 0.0);
        assert_eq!(table.points_for("DS", "Bjørn Åsen"), 0.0);
    }

    #[test]
    fn test_upsert_merges_seasons() {
        let mut table = RankingTable::default();
        table.upsert("HS", entry("A", &[("2023", 900.0)]));
        table.upsert("HS", entry("A", &[("2024", 1200.0)]));
        assert_eq!(table.len(), 1);
        assert_eq!(table.points_for("HS", "A"), 1200.0);
    }

    #[test]
    fn test_category_len() {
        let mut table = RankingTable::default();
        table.upsert("HS", entry("A", &[("2024", 1200.0)]));
        table.upsert("HS", entry("B", &[("2024", 800.0)]));
        table.upsert("DS", entry("C", &[("2024", 950.0)]));
        assert_eq!(table.category_len("HS"), 2);
        assert_eq!(table.category_len("DS"), 1);
        assert_eq!(table.category_len("MIX"), 0);
        assert_eq!(table.len(), 3);
    }
}
