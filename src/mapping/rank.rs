//! Brightness-rank correspondence
//!
//! Both sample sets are ordered darkest to brightest and paired rank by rank:
//! the `i`-th darkest source color lands on the `i`-th darkest target position.

use crate::io::error::{MorphError, Result};
use crate::sampling::pixel::{Rgba, Sample, SampleSet};

/// One source sample paired with one target sample of equal rank
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedPoint {
    /// Brightness rank shared by both samples
    pub rank: usize,
    /// Scan-order index of the source sample in its set
    pub source_index: usize,
    /// Scan-order index of the target sample in its set
    pub target_index: usize,
    /// Source sample providing the color
    pub source: Sample,
    /// Target sample providing the position
    pub target: Sample,
}

impl MappedPoint {
    /// Color carried over from the source
    pub const fn color(&self) -> Rgba {
        self.source.color
    }

    /// Position the color originates from
    pub const fn origin(&self) -> (u32, u32) {
        self.source.position()
    }

    /// Position the color is placed at
    pub const fn destination(&self) -> (u32, u32) {
        self.target.position()
    }
}

/// Counts describing how much of each set was used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MappingSummary {
    /// Pairs in the correspondence
    pub mapped: usize,
    /// Brightest source samples left without a partner
    pub unused_source: usize,
    /// Brightest target samples left without a partner
    pub unused_target: usize,
}

/// Rank-ordered list of mapped points
///
/// Iteration order is ascending brightness rank, which also defines the
/// overwrite order when mapped tiles overlap.
#[derive(Debug, Clone, PartialEq)]
pub struct Correspondence {
    points: Vec<MappedPoint>,
    summary: MappingSummary,
}

impl Correspondence {
    /// Mapped points in rank order
    pub fn points(&self) -> &[MappedPoint] {
        &self.points
    }

    /// Iterate mapped points in rank order
    pub fn iter(&self) -> std::slice::Iter<'_, MappedPoint> {
        self.points.iter()
    }

    /// Number of mapped pairs
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no pairs were mapped
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Usage counts for both input sets
    pub const fn summary(&self) -> MappingSummary {
        self.summary
    }
}

impl<'a> IntoIterator for &'a Correspondence {
    type Item = &'a MappedPoint;
    type IntoIter = std::slice::Iter<'a, MappedPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Pairs source and target samples by brightness rank
#[derive(Debug, Clone, Copy, Default)]
pub struct BrightnessRankMapper;

impl BrightnessRankMapper {
    /// Create a mapper
    pub const fn new() -> Self {
        Self
    }

    /// Build the rank correspondence between two sample sets
    ///
    /// When the sets differ in size only the first `min(|source|, |target|)`
    /// ranks are paired; the brighter tail of the larger set is left out.
    ///
    /// # Errors
    ///
    /// Returns `EmptySampleSet` if either set is empty
    pub fn map(&self, source: &SampleSet, target: &SampleSet) -> Result<Correspondence> {
        if source.is_empty() {
            return Err(MorphError::EmptySampleSet { set: "source" });
        }
        if target.is_empty() {
            return Err(MorphError::EmptySampleSet { set: "target" });
        }

        let source_order = rank_order(source);
        let target_order = rank_order(target);

        let points: Vec<MappedPoint> = source_order
            .iter()
            .zip(&target_order)
            .enumerate()
            .filter_map(|(rank, (&source_index, &target_index))| {
                Some(MappedPoint {
                    rank,
                    source_index,
                    target_index,
                    source: *source.get(source_index)?,
                    target: *target.get(target_index)?,
                })
            })
            .collect();

        let summary = MappingSummary {
            mapped: points.len(),
            unused_source: source.len() - points.len(),
            unused_target: target.len() - points.len(),
        };

        if summary.unused_source > 0 || summary.unused_target > 0 {
            log::debug!(
                "rank mapping truncated: {} source and {} target samples unused",
                summary.unused_source,
                summary.unused_target
            );
        }

        Ok(Correspondence { points, summary })
    }
}

// `sort_by` is stable: equal brightness keeps scan order
fn rank_order(samples: &SampleSet) -> Vec<usize> {
    let mut order: Vec<(usize, f64)> = samples
        .iter()
        .enumerate()
        .map(|(index, sample)| (index, sample.brightness))
        .collect();
    order.sort_by(|a, b| a.1.total_cmp(&b.1));
    order.into_iter().map(|(index, _)| index).collect()
}
