use std::sync::Arc;

use crate::dataset::{DatasetStats, MatchRecordRepository, RankingRepository};

#[derive(Clone)]
pub struct AppState {
    pub matches: Arc<dyn MatchRecordRepository>,
    pub rankings: Arc<dyn RankingRepository>,
    /// Computed once at load time; the dataset is immutable while serving.
    pub stats: DatasetStats,
}
