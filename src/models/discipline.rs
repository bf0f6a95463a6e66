//! Discipline (event type) classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The five disciplines played in the league.
///
/// Export files label these in Norwegian ("Herresingle", "Damedouble", …);
/// API payloads use the snake_case English names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discipline {
    MensSingles,
    WomensSingles,
    MensDoubles,
    WomensDoubles,
    MixedDoubles,
}

/// Error raised for a discipline label the parser does not recognize.
#[derive(Debug, Error)]
#[error("Unknown discipline label: {0}")]
pub struct UnknownDiscipline(pub String);

impl Discipline {
    /// Parse a discipline label as found in the league exports or an API
    /// request. Accepts the Norwegian export labels, the English names,
    /// and the short category codes, case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        let norm: String = label
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '_' || c == '-' { ' ' } else { c })
            .collect();
        match norm.as_str() {
            "herresingle" | "herresingel" | "hs" | "mens singles" | "men's singles" => {
                Some(Discipline::MensSingles)
            }
            "damesingle" | "damesingel" | "ds" | "womens singles" | "women's singles" => {
                Some(Discipline::WomensSingles)
            }
            "herredouble" | "herredobbel" | "hd" | "mens doubles" | "men's doubles" => {
                Some(Discipline::MensDoubles)
            }
            "damedouble" | "damedobbel" | "dd" | "womens doubles" | "women's doubles" => {
                Some(Discipline::WomensDoubles)
            }
            "mixed double" | "mixeddouble" | "mixed" | "mix" | "mixed doubles" => {
                Some(Discipline::MixedDoubles)
            }
            _ => None,
        }
    }

    /// True for the two singles disciplines.
    pub fn is_singles(&self) -> bool {
        matches!(self, Discipline::MensSingles | Discipline::WomensSingles)
    }

    /// True for the three doubles disciplines.
    pub fn is_doubles(&self) -> bool {
        !self.is_singles()
    }

    /// Ranking-table category code for this discipline.
    /// Ranking lists exist only for the singles categories.
    pub fn ranking_category(&self) -> Option<&'static str> {
        match self {
            Discipline::MensSingles => Some("HS"),
            Discipline::WomensSingles => Some("DS"),
            _ => None,
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Discipline::MensSingles => "men's singles",
            Discipline::WomensSingles => "women's singles",
            Discipline::MensDoubles => "men's doubles",
            Discipline::WomensDoubles => "women's doubles",
            Discipline::MixedDoubles => "mixed doubles",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Discipline {
    type Err = UnknownDiscipline;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| UnknownDiscipline(s.to_string()))
    }
}
