//! Orchestration from decoded rasters to a correspondence and its two consumers

use crate::animation::engine::ParticleConvergenceEngine;
use crate::io::configuration::MorphConfig;
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::cover_fit;
use crate::mapping::rank::{BrightnessRankMapper, Correspondence};
use crate::render::mosaic::OutputRaster;
use crate::sampling::pixel::RasterView;
use image::RgbaImage;
use rand::{SeedableRng, rngs::StdRng};

/// Runs sampling and rank mapping, then hands the result to the mosaic
/// renderer or the animation engine
#[derive(Debug, Clone, Copy)]
pub struct MorphPipeline {
    config: MorphConfig,
}

impl MorphPipeline {
    /// Create a pipeline from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration parameter is out of range
    pub fn new(config: MorphConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub const fn config(&self) -> &MorphConfig {
        &self.config
    }

    /// Cover-fit both images to the output size and map them
    ///
    /// # Errors
    ///
    /// Returns an error if either image is empty or the target has no
    /// sample above the alpha threshold
    pub fn correspond_images(
        &self,
        source: &RgbaImage,
        target: &RgbaImage,
    ) -> Result<Correspondence> {
        let fitted_source = cover_fit(source, self.config.width, self.config.height)?;
        let fitted_target = cover_fit(target, self.config.width, self.config.height)?;
        self.correspond(
            &RasterView::from_image(&fitted_source)?,
            &RasterView::from_image(&fitted_target)?,
        )
    }

    /// Map raw rasters; the target must already match the output size
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The target dimensions differ from the output dimensions
    /// - The target has no sample above the alpha threshold
    pub fn correspond(
        &self,
        source: &RasterView<'_>,
        target: &RasterView<'_>,
    ) -> Result<Correspondence> {
        if (target.width(), target.height()) != (self.config.width, self.config.height) {
            return Err(invalid_parameter(
                "target",
                &format!("{}x{}", target.width(), target.height()),
                &format!(
                    "must match the output size {}x{}",
                    self.config.width, self.config.height
                ),
            ));
        }

        let source_samples = self.config.sampler()?.sample(source);
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let target_samples = self.config.template_builder()?.build(target, &mut rng)?;

        let correspondence = BrightnessRankMapper::new().map(&source_samples, &target_samples)?;
        log::info!(
            "mapped {} of {} source samples onto {} target positions",
            correspondence.len(),
            source_samples.len(),
            target_samples.len()
        );
        Ok(correspondence)
    }

    /// Rasterise the correspondence as a mosaic
    ///
    /// # Errors
    ///
    /// Returns an error if the configured block size or dimensions are invalid
    pub fn render_mosaic(&self, correspondence: &Correspondence) -> Result<OutputRaster> {
        self.config.mosaic_renderer()?.render(
            correspondence,
            self.config.width,
            self.config.height,
        )
    }

    /// Start an animation run over the correspondence
    ///
    /// # Errors
    ///
    /// Returns an error if the engine configuration is invalid or the
    /// correspondence is empty
    pub fn start_animation(
        &self,
        correspondence: &Correspondence,
    ) -> Result<ParticleConvergenceEngine> {
        ParticleConvergenceEngine::start(
            correspondence,
            self.config.width,
            self.config.height,
            self.config.engine,
        )
    }
}
