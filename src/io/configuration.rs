//! Default parameters and the validated run configuration

use crate::animation::engine::EngineConfig;
use crate::io::error::{Result, check_dimensions, invalid_parameter};
use crate::render::mosaic::MosaicRenderer;
use crate::sampling::luminance::LuminanceWeights;
use crate::sampling::pixel::PixelSampler;
use crate::sampling::template::TargetTemplateBuilder;

// Sampling and mosaic defaults
/// Distance between sampled rows and columns
pub const DEFAULT_SAMPLE_STRIDE: u32 = 1;
/// Edge length of mosaic tiles
pub const DEFAULT_MOSAIC_BLOCK_SIZE: u32 = 1;
/// Maximum per-axis jitter applied to target positions
pub const DEFAULT_JITTER_RADIUS: u32 = 0;
/// Target samples with alpha below this are background
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 50;

/// Default output width and height when none is given
pub const DEFAULT_OUTPUT_SIZE: u32 = 256;

// Animation defaults
/// Length of one animation run
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 3000;
/// Progress at which particles leave their origin
pub const DEFAULT_SCATTER_START: f64 = 0.2;
/// Progress at which particles are pulled onto their target
pub const DEFAULT_CONVERGE_START: f64 = 0.4;
/// Local converge progress from which positions are locked to target
pub const DEFAULT_LOCK_THRESHOLD: f64 = 0.95;
/// Attraction per unit distance
pub const DEFAULT_FORCE_CONSTANT: f64 = 0.08;
/// Per-tick velocity multiplier
pub const DEFAULT_DAMPING_FACTOR: f64 = 0.88;
/// Distance at which a particle snaps onto its target
pub const DEFAULT_SNAP_DISTANCE: f64 = 0.5;
/// Edge length of a rendered particle
pub const DEFAULT_PARTICLE_SIZE: u32 = 1;

// Glow is cosmetic only
/// Speed in units per tick above which particles glow
pub const DEFAULT_GLOW_SPEED_THRESHOLD: f64 = 2.0;
/// Halo radius gained per unit of speed
pub const DEFAULT_GLOW_RADIUS_PER_SPEED: f64 = 0.5;
/// Halo opacity gained per unit of speed
pub const DEFAULT_GLOW_INTENSITY_PER_SPEED: f64 = 0.08;

/// Fixed seed for reproducible jitter and scatter
pub const DEFAULT_SEED: u64 = 42;

// Output settings
/// Frames per second when exporting an animation
pub const DEFAULT_FRAME_RATE: u32 = 60;
/// Suffix added to mosaic output filenames
pub const OUTPUT_SUFFIX: &str = "_mosaic";
/// Background of exported animation frames
pub const FRAME_BACKGROUND: [u8; 4] = [0, 0, 0, 255];

/// Every tunable of a run, built once at the boundary and passed inward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphConfig {
    /// Output raster width
    pub width: u32,
    /// Output raster height
    pub height: u32,
    /// Distance between sampled rows and columns
    pub sample_stride: u32,
    /// Edge length of mosaic tiles
    pub mosaic_block_size: u32,
    /// Maximum per-axis jitter applied to target positions
    pub jitter_radius: u32,
    /// Target samples with alpha below this are discarded
    pub alpha_threshold: u8,
    /// Weights used for every brightness computation in the run
    pub luminance: LuminanceWeights,
    /// Seed for target jitter; scatter uses `engine.seed`
    pub seed: u64,
    /// Animation parameters
    pub engine: EngineConfig,
}

impl MorphConfig {
    /// Configuration with default parameters for a `width x height` output
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            sample_stride: DEFAULT_SAMPLE_STRIDE,
            mosaic_block_size: DEFAULT_MOSAIC_BLOCK_SIZE,
            jitter_radius: DEFAULT_JITTER_RADIUS,
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            luminance: LuminanceWeights::default(),
            seed: DEFAULT_SEED,
            engine: EngineConfig::default(),
        }
    }

    /// Validate every parameter
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` for a zero output size and
    /// `InvalidParameter` for any other out-of-range value
    pub fn validate(&self) -> Result<()> {
        check_dimensions(self.width, self.height)?;
        if self.sample_stride == 0 {
            return Err(invalid_parameter(
                "sample_stride",
                &self.sample_stride,
                &"must be a positive integer",
            ));
        }
        if self.mosaic_block_size == 0 {
            return Err(invalid_parameter(
                "mosaic_block_size",
                &self.mosaic_block_size,
                &"must be a positive integer",
            ));
        }
        self.engine.validate()
    }

    /// Sampler shared by source and target
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the stride is zero
    pub fn sampler(&self) -> Result<PixelSampler> {
        PixelSampler::new(self.sample_stride, self.luminance)
    }

    /// Target template builder using this configuration's sampler
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the stride is zero
    pub fn template_builder(&self) -> Result<TargetTemplateBuilder> {
        Ok(TargetTemplateBuilder::new(
            self.sampler()?,
            self.alpha_threshold,
            self.jitter_radius,
        ))
    }

    /// Mosaic renderer for this configuration's block size
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the block size is zero
    pub fn mosaic_renderer(&self) -> Result<MosaicRenderer> {
        MosaicRenderer::new(self.mosaic_block_size)
    }
}
