//! Dataset access: repositories over match records and ranking lists.
//!
//! The prediction engine is pure; these repositories materialize the
//! records it consumes. The service uses the in-memory implementation,
//! loaded once from the exported JSON files at startup.

mod json;

pub use json::{load_dataset, LoadReport};

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{MatchRecord, RankingTable};

/// Errors that can occur while loading or querying the dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Glob pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Data directory not found: {0}")]
    DataDirNotFound(PathBuf),
}

/// Read access to the match history.
#[async_trait]
pub trait MatchRecordRepository: Send + Sync {
    /// All records involving either named player.
    async fn matches_for_pair(
        &self,
        player1: &str,
        player2: &str,
    ) -> Result<Vec<MatchRecord>, DatasetError>;

    /// All records involving the named player.
    async fn matches_for_player(&self, player: &str) -> Result<Vec<MatchRecord>, DatasetError>;

    /// Every distinct player name in the dataset, sorted.
    async fn player_names(&self) -> Result<Vec<String>, DatasetError>;
}

/// Read access to the federation ranking lists.
#[async_trait]
pub trait RankingRepository: Send + Sync {
    async fn ranking_table(&self) -> Result<Arc<RankingTable>, DatasetError>;
}

/// Dataset summary reported by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub match_count: usize,
    pub player_count: usize,
    pub ranking_entries: usize,
    pub earliest_match: Option<NaiveDate>,
    pub latest_match: Option<NaiveDate>,
}

/// The whole dataset held in memory. League exports are small enough
/// that per-request filtering over the full match list is cheap.
pub struct InMemoryDataset {
    matches: Vec<MatchRecord>,
    rankings: Arc<RankingTable>,
}

impl InMemoryDataset {
    pub fn new(matches: Vec<MatchRecord>, rankings: RankingTable) -> Self {
        Self {
            matches,
            rankings: Arc::new(rankings),
        }
    }

    /// Distinct player names, first-seen spelling kept, sorted.
    fn distinct_players(&self) -> Vec<String> {
        let mut seen: BTreeMap<String, String> = BTreeMap::new();
        for m in &self.matches {
            for name in m.team1.iter().chain(m.team2.iter()) {
                seen.entry(name.trim().to_lowercase())
                    .or_insert_with(|| name.trim().to_string());
            }
        }
        seen.into_values().collect()
    }

    pub fn stats(&self) -> DatasetStats {
        let dates: Vec<NaiveDate> = self.matches.iter().filter_map(|m| m.date).collect();
        DatasetStats {
            match_count: self.matches.len(),
            player_count: self.distinct_players().len(),
            ranking_entries: self.rankings.len(),
            earliest_match: dates.iter().min().copied(),
            latest_match: dates.iter().max().copied(),
        }
    }
}

#[async_trait]
impl MatchRecordRepository for InMemoryDataset {
    async fn matches_for_pair(
        &self,
        player1: &str,
        player2: &str,
    ) -> Result<Vec<MatchRecord>, DatasetError> {
        Ok(self
            .matches
            .iter()
            .filter(|m| m.involves(player1) || m.involves(player2))
            .cloned()
            .collect())
    }

    async fn matches_for_player(&self, player: &str) -> Result<Vec<MatchRecord>, DatasetError> {
        Ok(self
            .matches
            .iter()
            .filter(|m| m.involves(player))
            .cloned()
            .collect())
    }

    async fn player_names(&self) -> Result<Vec<String>, DatasetError> {
        Ok(self.distinct_players())
    }
}

#[async_trait]
impl RankingRepository for InMemoryDataset {
    async fn ranking_table(&self) -> Result<Arc<RankingTable>, DatasetError> {
        Ok(self.rankings.clone())
    }
}
