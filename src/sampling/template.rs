//! Target template extraction
//!
//! The target raster is expected to arrive already cover-fitted to the output
//! dimensions (see [`crate::io::image::cover_fit`]). Sampling matches the source
//! sampler, then near-transparent samples are dropped: they mark background
//! regions of the target silhouette and must not receive mapped pixels.

use crate::io::error::{MorphError, Result};
use crate::sampling::pixel::{PixelSampler, RasterView, Sample, SampleSet};
use rand::Rng;

/// Builds the set of positions that source pixels are mapped onto
#[derive(Debug, Clone, Copy)]
pub struct TargetTemplateBuilder {
    sampler: PixelSampler,
    alpha_threshold: u8,
    jitter_radius: u32,
}

impl TargetTemplateBuilder {
    /// Create a builder
    ///
    /// Samples with alpha strictly below `alpha_threshold` are discarded. A
    /// `jitter_radius` of zero disables positional jitter.
    pub const fn new(sampler: PixelSampler, alpha_threshold: u8, jitter_radius: u32) -> Self {
        Self {
            sampler,
            alpha_threshold,
            jitter_radius,
        }
    }

    /// Minimum alpha a sample needs to be retained
    pub const fn alpha_threshold(&self) -> u8 {
        self.alpha_threshold
    }

    /// Maximum per-axis positional offset
    pub const fn jitter_radius(&self) -> u32 {
        self.jitter_radius
    }

    /// Sample the fitted target, filter by alpha and apply jitter
    ///
    /// Jitter draws one offset per axis from `[-radius, radius]` for every
    /// retained sample and clamps the result to the raster. Color and
    /// brightness are untouched. No random numbers are drawn when the radius
    /// is zero.
    ///
    /// # Errors
    ///
    /// Returns `EmptySampleSet` if every sample falls below the alpha threshold
    pub fn build<R: Rng + ?Sized>(
        &self,
        raster: &RasterView<'_>,
        rng: &mut R,
    ) -> Result<SampleSet> {
        let sampled = self.sampler.sample(raster);
        let total = sampled.len();

        let retained: SampleSet = sampled
            .iter()
            .filter(|sample| sample.alpha() >= self.alpha_threshold)
            .map(|&sample| self.jitter(sample, raster, rng))
            .collect();

        if retained.is_empty() {
            return Err(MorphError::EmptySampleSet { set: "target" });
        }

        log::debug!(
            "target template kept {} of {total} samples (alpha >= {})",
            retained.len(),
            self.alpha_threshold
        );

        Ok(retained)
    }

    fn jitter<R: Rng + ?Sized>(
        &self,
        sample: Sample,
        raster: &RasterView<'_>,
        rng: &mut R,
    ) -> Sample {
        if self.jitter_radius == 0 {
            return sample;
        }

        let radius = i64::from(self.jitter_radius);
        let dx = rng.random_range(-radius..=radius);
        let dy = rng.random_range(-radius..=radius);

        Sample {
            x: offset_clamped(sample.x, dx, raster.width()),
            y: offset_clamped(sample.y, dy, raster.height()),
            ..sample
        }
    }
}

fn offset_clamped(coordinate: u32, offset: i64, extent: u32) -> u32 {
    let max = i64::from(extent.saturating_sub(1));
    (i64::from(coordinate) + offset).clamp(0, max) as u32
}
