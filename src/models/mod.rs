//! Core data models for match records, rankings, and predictions.

mod class;
mod discipline;
mod ids;
mod match_record;
mod prediction;
mod ranking;

pub use class::*;
pub use discipline::*;
pub use ids::*;
pub use match_record::*;
pub use prediction::*;
pub use ranking::*;

/// Player-name equality as used everywhere names are compared. Exported
/// names vary in surrounding whitespace and letter case between files,
/// so comparisons trim and lowercase both sides.
pub fn name_eq(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
