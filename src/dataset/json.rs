//! Loading the exported league data from disk.
//!
//! Layout under the data directory:
//! - `matches/*.json`: arrays of match rows as exported
//! - `rankings/combined_rankings<CAT>.json`: one ranking list per
//!   category, the category taken from the filename suffix
//!
//! Export runs overlap between seasons, so rows are deduplicated by
//! content ID. Rows that fail validation are logged and skipped; a file
//! that cannot be read at all is skipped the same way so one broken
//! export does not take the service down.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::{DatasetError, InMemoryDataset};
use crate::models::{
    MatchId, MatchRecord, RankingEntry, RankingTable, RawMatchRecord, RawRankingEntry,
};

/// Counters from one dataset load, reported at startup and by the data
/// checking command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub match_files: usize,
    pub matches_loaded: usize,
    pub matches_skipped: usize,
    pub duplicates_dropped: usize,
    pub ranking_files: usize,
    pub ranking_entries: usize,
    pub ranking_rows_skipped: usize,
}

/// Load every match and ranking export under `data_dir`.
pub fn load_dataset(data_dir: &Path) -> Result<(InMemoryDataset, LoadReport), DatasetError> {
    if !data_dir.is_dir() {
        return Err(DatasetError::DataDirNotFound(data_dir.to_path_buf()));
    }

    let mut report = LoadReport::default();
    let matches = load_matches(data_dir, &mut report)?;
    let rankings = load_rankings(data_dir, &mut report)?;

    info!(
        "Loaded {} matches ({} skipped, {} duplicates) and {} ranking entries from {:?}",
        report.matches_loaded,
        report.matches_skipped,
        report.duplicates_dropped,
        report.ranking_entries,
        data_dir
    );

    Ok((InMemoryDataset::new(matches, rankings), report))
}

fn sorted_glob(pattern: PathBuf) -> Result<Vec<PathBuf>, DatasetError> {
    let pattern = pattern.to_string_lossy().into_owned();
    let mut paths: Vec<PathBuf> = glob::glob(&pattern)?.filter_map(Result::ok).collect();
    paths.sort();
    Ok(paths)
}

fn read_rows(path: &Path) -> Result<Vec<serde_json::Value>, DatasetError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn load_matches(
    data_dir: &Path,
    report: &mut LoadReport,
) -> Result<Vec<MatchRecord>, DatasetError> {
    let mut records = Vec::new();
    let mut seen: HashSet<MatchId> = HashSet::new();

    for path in sorted_glob(data_dir.join("matches").join("*.json"))? {
        report.match_files += 1;
        let rows = match read_rows(&path) {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Skipping unreadable match file {:?}: {}", path, e);
                continue;
            }
        };

        for (i, row) in rows.into_iter().enumerate() {
            let raw: RawMatchRecord = match serde_json::from_value(row) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("Skipping row {} in {:?}: {}", i, path, e);
                    report.matches_skipped += 1;
                    continue;
                }
            };
            match MatchRecord::from_raw(raw) {
                Ok(record) => {
                    if seen.insert(record.id.clone()) {
                        records.push(record);
                    } else {
                        report.duplicates_dropped += 1;
                    }
                }
                Err(e) => {
                    warn!("Skipping row {} in {:?}: {}", i, path, e);
                    report.matches_skipped += 1;
                }
            }
        }
    }

    report.matches_loaded = records.len();
    Ok(records)
}

fn load_rankings(data_dir: &Path, report: &mut LoadReport) -> Result<RankingTable, DatasetError> {
    let mut table = RankingTable::default();

    for path in sorted_glob(data_dir.join("rankings").join("combined_rankings*.json"))? {
        let Some(category) = category_from_filename(&path) else {
            warn!("Cannot derive ranking category from {:?}", path);
            continue;
        };
        report.ranking_files += 1;

        let rows = match read_rows(&path) {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Skipping unreadable ranking file {:?}: {}", path, e);
                continue;
            }
        };

        for (i, row) in rows.into_iter().enumerate() {
            let raw: RawRankingEntry = match serde_json::from_value(row) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("Skipping ranking row {} in {:?}: {}", i, path, e);
                    report.ranking_rows_skipped += 1;
                    continue;
                }
            };
            match RankingEntry::from_raw(raw) {
                Ok(entry) => table.upsert(&category, entry),
                Err(e) => {
                    warn!("Skipping ranking row {} in {:?}: {}", i, path, e);
                    report.ranking_rows_skipped += 1;
                }
            }
        }
    }

    report.ranking_entries = table.len();
    Ok(table)
}

/// `combined_rankingsHS.json` carries its category in the filename.
fn category_from_filename(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let suffix = stem.strip_prefix("combined_rankings")?.trim_start_matches('_');
    if suffix.is_empty() {
        None
    } else {
        Some(suffix.to_uppercase())
    }
}
