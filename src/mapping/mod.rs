//! Correspondence between source and target samples

/// Brightness-rank matching of source colors onto target positions
pub mod rank;

pub use rank::{BrightnessRankMapper, Correspondence, MappedPoint, MappingSummary};
