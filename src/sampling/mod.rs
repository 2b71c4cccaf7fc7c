//! Sample extraction from raw RGBA rasters
//!
//! This module contains:
//! - Luminance weighting used as the sole ranking key
//! - Strided sampling of source rasters
//! - Alpha-filtered, optionally jittered target templates

/// Luminance weight sets and brightness computation
pub mod luminance;
/// Raster views, samples and the strided pixel sampler
pub mod pixel;
/// Target template extraction with alpha filtering and jitter
pub mod template;

pub use luminance::LuminanceWeights;
pub use pixel::{PixelSampler, RasterView, Rgba, Sample, SampleSet};
pub use template::TargetTemplateBuilder;
