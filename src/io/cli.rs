//! Command-line interface for mosaic rendering and animation frame export

use crate::io::configuration::{
    DEFAULT_ALPHA_THRESHOLD, DEFAULT_ANIMATION_DURATION_MS, DEFAULT_DAMPING_FACTOR,
    DEFAULT_FORCE_CONSTANT, DEFAULT_FRAME_RATE, DEFAULT_JITTER_RADIUS, DEFAULT_MOSAIC_BLOCK_SIZE,
    DEFAULT_OUTPUT_SIZE, DEFAULT_PARTICLE_SIZE, DEFAULT_SAMPLE_STRIDE, DEFAULT_SEED,
    FRAME_BACKGROUND, MorphConfig, OUTPUT_SUFFIX,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{load_rgba, save_png};
use crate::io::progress::FrameProgress;
use crate::pipeline::MorphPipeline;
use crate::render::canvas::FrameCanvas;
use crate::sampling::luminance::LuminanceWeights;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(name = "pixelmorph")]
#[command(
    author,
    version,
    about = "Remap source pixels onto a target layout by brightness rank"
)]
/// Command-line arguments for the morph tool
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors and hide progress
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Log filter implied by the verbosity flags
    pub const fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Available operations
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render the source colors onto the target layout as a mosaic PNG
    Mosaic(MosaicArgs),
    /// Export the particle convergence animation as numbered PNG frames
    Animate(AnimateArgs),
}

/// Inputs and sampling options shared by every operation
#[derive(Args, Debug, Clone)]
pub struct MappingArgs {
    /// Image providing the colors
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Image providing the layout
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Output width in pixels
    #[arg(short = 'W', long, default_value_t = DEFAULT_OUTPUT_SIZE)]
    pub width: u32,

    /// Output height in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_OUTPUT_SIZE)]
    pub height: u32,

    /// Distance between sampled rows and columns
    #[arg(short, long, default_value_t = DEFAULT_SAMPLE_STRIDE)]
    pub stride: u32,

    /// Maximum per-axis jitter applied to target positions
    #[arg(short, long, default_value_t = DEFAULT_JITTER_RADIUS)]
    pub jitter: u32,

    /// Target pixels with alpha below this are treated as background
    #[arg(short, long, default_value_t = DEFAULT_ALPHA_THRESHOLD)]
    pub alpha_threshold: u8,

    /// Luminance weights used for brightness ranking
    #[arg(short, long, value_enum, default_value_t = LuminanceWeights::Rec601)]
    pub luminance: LuminanceWeights,

    /// Random seed for reproducible jitter and scatter
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

impl MappingArgs {
    /// Configuration with these sampling options and defaults elsewhere
    pub fn to_config(&self) -> MorphConfig {
        let mut config = MorphConfig::new(self.width, self.height);
        config.sample_stride = self.stride;
        config.jitter_radius = self.jitter;
        config.alpha_threshold = self.alpha_threshold;
        config.luminance = self.luminance;
        config.seed = self.seed;
        config.engine.seed = self.seed;
        config
    }
}

/// Options for mosaic rendering
#[derive(Args, Debug, Clone)]
pub struct MosaicArgs {
    #[command(flatten)]
    /// Inputs and sampling options
    pub mapping: MappingArgs,

    /// Edge length of each mosaic tile
    #[arg(short, long, default_value_t = DEFAULT_MOSAIC_BLOCK_SIZE)]
    pub block_size: u32,

    /// Output PNG (defaults to `<source>_mosaic.png` beside the source)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Options for animation frame export
#[derive(Args, Debug, Clone)]
pub struct AnimateArgs {
    #[command(flatten)]
    /// Inputs and sampling options
    pub mapping: MappingArgs,

    /// Directory receiving `frame_NNNNN.png` files and `final.png`
    #[arg(short, long)]
    pub output_dir: PathBuf,

    /// Animation length in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_ANIMATION_DURATION_MS)]
    pub duration_ms: u64,

    /// Simulated frames per second
    #[arg(short, long, default_value_t = DEFAULT_FRAME_RATE)]
    pub fps: u32,

    /// Attraction per unit distance during converge
    #[arg(long, default_value_t = DEFAULT_FORCE_CONSTANT)]
    pub force: f64,

    /// Per-tick velocity multiplier during converge
    #[arg(long, default_value_t = DEFAULT_DAMPING_FACTOR)]
    pub damping: f64,

    /// Edge length of each rendered particle
    #[arg(short, long, default_value_t = DEFAULT_PARTICLE_SIZE)]
    pub particle_size: u32,

    /// Edge length of tiles in the final authoritative frame
    #[arg(short, long, default_value_t = DEFAULT_MOSAIC_BLOCK_SIZE)]
    pub block_size: u32,
}

impl AnimateArgs {
    /// Configuration with these animation options applied
    pub fn to_config(&self) -> MorphConfig {
        let mut config = self.mapping.to_config();
        config.mosaic_block_size = self.block_size;
        config.engine.duration_ms = self.duration_ms;
        config.engine.attraction.force_constant = self.force;
        config.engine.attraction.damping = self.damping;
        config.engine.particle_size = self.particle_size;
        config
    }
}

/// Executes the parsed command
pub struct CommandRunner {
    cli: Cli,
}

impl CommandRunner {
    /// Create a runner for the parsed arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected command
    ///
    /// # Errors
    ///
    /// Returns an error if loading, mapping, rendering or writing fails
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Command::Mosaic(args) => self.mosaic(args).map(|_| ()),
            Command::Animate(args) => self.animate(args).map(|_| ()),
        }
    }

    /// Render a mosaic and return the path it was written to
    ///
    /// # Errors
    ///
    /// Returns an error if either image cannot be loaded, the configuration is
    /// invalid, mapping fails, or the PNG cannot be written
    pub fn mosaic(&self, args: &MosaicArgs) -> Result<PathBuf> {
        let mut config = args.mapping.to_config();
        config.mosaic_block_size = args.block_size;
        let pipeline = MorphPipeline::new(config)?;

        let correspondence = pipeline.correspond_images(
            &load_rgba(&args.mapping.source)?,
            &load_rgba(&args.mapping.target)?,
        )?;
        let raster = pipeline.render_mosaic(&correspondence)?;

        let output_path = args
            .output
            .clone()
            .unwrap_or_else(|| Self::get_output_path(&args.mapping.source));
        save_png(raster.as_image(), &output_path)?;

        log::info!("wrote mosaic to {}", output_path.display());
        Ok(output_path)
    }

    /// Export animation frames and return how many were written
    ///
    /// Ticks are spaced `1000 / fps` milliseconds apart from 0 up to the
    /// duration. After the completing tick the authoritative mosaic is written
    /// as `final.png`.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame rate is zero, loading or mapping fails,
    /// the engine cannot start, or a frame cannot be written
    pub fn animate(&self, args: &AnimateArgs) -> Result<usize> {
        if args.fps == 0 {
            return Err(invalid_parameter("fps", &args.fps, &"must be positive"));
        }

        let pipeline = MorphPipeline::new(args.to_config())?;
        let config = *pipeline.config();

        let correspondence = pipeline.correspond_images(
            &load_rgba(&args.mapping.source)?,
            &load_rgba(&args.mapping.target)?,
        )?;
        let mut engine = pipeline.start_animation(&correspondence)?;
        let mut canvas = FrameCanvas::new(config.width, config.height, FRAME_BACKGROUND)?;

        let interval_ms = 1000.0 / f64::from(args.fps);
        let duration_ms = config.engine.duration_ms as f64;
        let tick_count = (duration_ms / interval_ms).ceil() as u64 + 1;
        let progress = if self.cli.should_show_progress() {
            FrameProgress::new(tick_count)
        } else {
            FrameProgress::hidden(tick_count)
        };

        let mut frames_written = 0;
        for index in 0..tick_count {
            let elapsed_ms = (index as f64 * interval_ms).min(duration_ms);
            let frame = engine.tick(elapsed_ms)?;

            canvas.draw_frame(&frame.commands);
            let frame_path = args.output_dir.join(format!("frame_{index:05}.png"));
            save_png(canvas.image(), &frame_path)?;
            frames_written += 1;
            progress.frame_written(frame.phase, frame.progress);

            if frame.completed() {
                break;
            }
        }
        progress.finish();

        let final_raster = pipeline.render_mosaic(&correspondence)?;
        save_png(final_raster.as_image(), &args.output_dir.join("final.png"))?;

        log::info!(
            "wrote {frames_written} frames to {}",
            args.output_dir.display()
        );
        Ok(frames_written)
    }

    fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{}.png", stem.to_string_lossy(), OUTPUT_SUFFIX);

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
