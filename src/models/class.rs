//! Tournament-class labels and derived player class estimates.

use serde::{Deserialize, Serialize};

/// Numeric class scores for tournament-class labels, ordered by priority.
///
/// The order matters for the substring fallback: earlier entries win, so a
/// combined label like "SEN B/A" resolves to the A score because "A" is
/// checked before "SEN B".
const CLASS_SCORES: &[(&str, f64)] = &[
    ("Elite", 7.0),
    ("X", 7.0),
    ("E", 7.0),
    ("SEN E", 7.0),
    ("SEN A", 5.0),
    ("A", 5.0),
    ("SEN B", 4.0),
    ("B", 4.0),
    ("SEN C", 3.0),
    ("C", 3.0),
    ("SEN D", 2.0),
    ("D", 2.0),
    ("SEN F", 1.0),
    ("F", 1.0),
];

/// Map a tournament-class label to its numeric score (higher is better).
///
/// Exact matches (case-insensitive) are tried first, then substring matches
/// in table order. An "E"-keyed substring hit only counts as Elite when the
/// label actually contains "ELITE" or "SEN E"; the letter E appears in far
/// too many unrelated labels ("SEN C", "Veteran") to trust on its own.
/// Unmatched labels score 0.0 (unknown).
pub fn class_score(label: &str) -> f64 {
    if label.trim().is_empty() {
        return 0.0;
    }
    let upper = label.to_uppercase();

    for (key, value) in CLASS_SCORES {
        if upper == key.to_uppercase() {
            return *value;
        }
    }

    for (key, value) in CLASS_SCORES {
        if upper.contains(&key.to_uppercase()) {
            if *key == "E" || *key == "SEN E" {
                if upper.contains("ELITE") || upper.contains("SEN E") {
                    return *value;
                }
                continue;
            }
            return *value;
        }
    }

    0.0
}

/// A player's estimated competitive tier, derived from recent
/// tournament-class participation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerClassEstimate {
    /// Integer class level, 0 (unknown) to 7 (Elite).
    pub level: u8,

    /// How trustworthy the estimate is, 0.0 to 1.0.
    /// Grows with sample size, shrinks when the player hops between classes.
    pub confidence: f64,

    /// Recency-weighted average of the numeric class scores.
    pub average_class_value: f64,

    /// Number of matches the estimate was computed from.
    pub sample_size: usize,
}

impl PlayerClassEstimate {
    /// The estimate for a player with no match history at all.
    pub fn unknown() -> Self {
        Self {
            level: 0,
            confidence: 0.0,
            average_class_value: 0.0,
            sample_size: 0,
        }
    }

    /// True when the player is estimated at Elite level.
    pub fn is_elite(&self) -> bool {
        self.level == 7
    }

    /// Display label for the estimated level.
    pub fn label(&self) -> &'static str {
        match self.level {
            7 => "Elite/SEN E",
            5 => "SEN A",
            4 => "SEN B",
            3 => "SEN C",
            2 => "SEN D",
            1 => "SEN F",
            _ => "Unknown",
        }
    }
}
