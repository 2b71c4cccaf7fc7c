//! Tick-driven particle convergence engine
//!
//! The engine owns its particles and clock and does nothing between ticks. An
//! external scheduler calls [`ParticleConvergenceEngine::tick`] with the elapsed
//! run time; each call advances the simulation once and returns the draw
//! commands for that frame. Stopping the scheduler cancels the run.

use crate::animation::clock::{Phase, PhaseBoundaries, SimulationClock};
use crate::animation::easing::ease_out_cubic;
use crate::animation::particle::{Attraction, Particle};
use crate::io::configuration::{
    DEFAULT_ANIMATION_DURATION_MS, DEFAULT_DAMPING_FACTOR, DEFAULT_FORCE_CONSTANT,
    DEFAULT_GLOW_INTENSITY_PER_SPEED, DEFAULT_GLOW_RADIUS_PER_SPEED, DEFAULT_GLOW_SPEED_THRESHOLD,
    DEFAULT_PARTICLE_SIZE, DEFAULT_SEED, DEFAULT_SNAP_DISTANCE,
};
use crate::io::error::{MorphError, Result, check_dimensions, invalid_parameter};
use crate::mapping::rank::Correspondence;
use crate::sampling::pixel::Rgba;
use glam::DVec2;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Parameters for one animation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Run length in milliseconds
    pub duration_ms: u64,
    /// Phase boundaries in progress
    pub boundaries: PhaseBoundaries,
    /// Converge-phase physics
    pub attraction: Attraction,
    /// Edge length of each rendered particle square
    pub particle_size: u32,
    /// Speed in units per tick above which particles glow
    pub glow_speed_threshold: f64,
    /// Halo radius gained per unit of speed
    pub glow_radius_per_speed: f64,
    /// Halo opacity gained per unit of speed, capped at 1
    pub glow_intensity_per_speed: f64,
    /// Seed for scatter targets
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_ANIMATION_DURATION_MS,
            boundaries: PhaseBoundaries::default(),
            attraction: Attraction {
                force_constant: DEFAULT_FORCE_CONSTANT,
                damping: DEFAULT_DAMPING_FACTOR,
                snap_distance: DEFAULT_SNAP_DISTANCE,
            },
            particle_size: DEFAULT_PARTICLE_SIZE,
            glow_speed_threshold: DEFAULT_GLOW_SPEED_THRESHOLD,
            glow_radius_per_speed: DEFAULT_GLOW_RADIUS_PER_SPEED,
            glow_intensity_per_speed: DEFAULT_GLOW_INTENSITY_PER_SPEED,
            seed: DEFAULT_SEED,
        }
    }
}

impl EngineConfig {
    /// Validate every parameter
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero duration or particle size,
    /// unordered phase boundaries, a non-positive force, damping outside
    /// `(0, 1]`, a force and damping pair that makes the integrator diverge,
    /// or a negative snap distance or glow parameter
    pub fn validate(&self) -> Result<()> {
        if self.duration_ms == 0 {
            return Err(invalid_parameter(
                "animation_duration_ms",
                &self.duration_ms,
                &"must be positive",
            ));
        }
        self.boundaries.validate()?;

        let attraction = &self.attraction;
        if !attraction.force_constant.is_finite() || attraction.force_constant <= 0.0 {
            return Err(invalid_parameter(
                "force_constant",
                &attraction.force_constant,
                &"must be a positive finite number",
            ));
        }
        if attraction.damping.is_nan() || attraction.damping <= 0.0 || attraction.damping > 1.0 {
            return Err(invalid_parameter(
                "damping_factor",
                &attraction.damping,
                &"must lie in (0, 1]",
            ));
        }
        // Damped step v' = d(v + k e), x' = x + v' is stable only while k d < 2 (1 + d)
        let stability_limit = 2.0 * (1.0 + attraction.damping);
        if attraction.force_constant * attraction.damping >= stability_limit {
            return Err(invalid_parameter(
                "force_constant",
                &attraction.force_constant,
                &format!(
                    "must be below {:.3} for damping {} or particles diverge",
                    stability_limit / attraction.damping,
                    attraction.damping
                ),
            ));
        }
        if attraction.snap_distance.is_nan() || attraction.snap_distance < 0.0 {
            return Err(invalid_parameter(
                "snap_distance",
                &attraction.snap_distance,
                &"must be non-negative",
            ));
        }
        if self.particle_size == 0 {
            return Err(invalid_parameter(
                "particle_size",
                &self.particle_size,
                &"must be a positive integer",
            ));
        }
        for (parameter, value) in [
            ("glow_speed_threshold", self.glow_speed_threshold),
            ("glow_radius_per_speed", self.glow_radius_per_speed),
            ("glow_intensity_per_speed", self.glow_intensity_per_speed),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &"must be a non-negative finite number",
                ));
            }
        }
        Ok(())
    }
}

/// Cosmetic halo drawn around fast particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    /// Halo radius in pixels beyond the particle square
    pub radius: f64,
    /// Halo opacity in `[0, 1]`
    pub intensity: f64,
}

/// Draw instruction for one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCommand {
    /// Rounded column of the square's top-left corner
    pub x: i64,
    /// Rounded row of the square's top-left corner
    pub y: i64,
    /// Square edge length
    pub size: u32,
    /// Fill color
    pub color: Rgba,
    /// Optional halo for particles above the glow speed threshold
    pub glow: Option<Glow>,
}

/// Notable transitions reported by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// The run moved into a new phase
    PhaseEntered(Phase),
    /// Progress reached 1; reported exactly once per run
    Completed,
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickFrame {
    /// Overall progress in `[0, 1]`
    pub progress: f64,
    /// Phase the tick was processed in
    pub phase: Phase,
    /// Draw commands, one per particle
    pub commands: Vec<RenderCommand>,
    /// Transitions that happened during this tick
    pub events: Vec<EngineEvent>,
}

impl TickFrame {
    /// Whether this tick completed the run
    pub fn completed(&self) -> bool {
        self.events.contains(&EngineEvent::Completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Running,
    Completed,
    Cancelled,
}

/// Drives hold, scatter and converge phases over a particle per mapped point
#[derive(Debug, Clone)]
pub struct ParticleConvergenceEngine {
    particles: Vec<Particle>,
    clock: SimulationClock,
    config: EngineConfig,
    bounds: DVec2,
    phase: Option<Phase>,
    state: RunState,
    rng: StdRng,
}

impl ParticleConvergenceEngine {
    /// Start a run over a `width x height` raster
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - Either raster dimension is zero
    /// - The correspondence is empty, in which case the run never starts
    pub fn start(
        correspondence: &Correspondence,
        width: u32,
        height: u32,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        check_dimensions(width, height)?;

        if correspondence.is_empty() {
            log::warn!("animation did not start: correspondence has no mapped points");
            return Err(MorphError::EmptySampleSet {
                set: "correspondence",
            });
        }

        let particles: Vec<Particle> = correspondence.iter().map(Particle::from_mapped).collect();
        log::debug!(
            "starting animation with {} particles over {}ms",
            particles.len(),
            config.duration_ms
        );

        Ok(Self {
            particles,
            clock: SimulationClock::new(config.duration_ms)?,
            config,
            bounds: DVec2::new(f64::from(width), f64::from(height)),
            phase: None,
            state: RunState::Running,
            rng: StdRng::seed_from_u64(config.seed),
        })
    }

    /// Advance the simulation to `elapsed_ms` and return the frame to draw
    ///
    /// After cancellation ticks are accepted but do nothing and draw nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if `elapsed_ms` is invalid or earlier than the
    /// previous tick; the simulation state is left untouched
    pub fn tick(&mut self, elapsed_ms: f64) -> Result<TickFrame> {
        let p = self.clock.advance(elapsed_ms)?;
        let phase = self.config.boundaries.phase_at(p);

        if self.state == RunState::Cancelled {
            return Ok(TickFrame {
                progress: p,
                phase,
                commands: Vec::new(),
                events: Vec::new(),
            });
        }

        let mut events = Vec::new();
        if self.phase != Some(phase) {
            self.enter(phase);
            events.push(EngineEvent::PhaseEntered(phase));
        }

        let q = self.config.boundaries.local_progress(p);
        match phase {
            Phase::Hold => self.particles.iter_mut().for_each(Particle::hold),
            Phase::Scatter => {
                for particle in &mut self.particles {
                    particle.scatter(q);
                }
            }
            Phase::Converge => self.converge(q),
        }

        if p >= 1.0 && self.state == RunState::Running {
            self.state = RunState::Completed;
            events.push(EngineEvent::Completed);
            log::info!("animation complete with {} particles", self.particles.len());
        }

        Ok(TickFrame {
            progress: p,
            phase,
            commands: self.render_commands(),
            events,
        })
    }

    /// Stop the run and release the particles
    pub fn cancel(&mut self) {
        if self.state != RunState::Cancelled {
            log::debug!("animation cancelled at progress {:.3}", self.progress());
        }
        self.particles = Vec::new();
        self.state = RunState::Cancelled;
    }

    /// Particles in rank order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Phase of the last tick, `None` before the first tick
    pub const fn phase(&self) -> Option<Phase> {
        self.phase
    }

    /// Progress of the last tick
    pub fn progress(&self) -> f64 {
        self.clock.progress()
    }

    /// Whether progress has reached 1
    pub fn is_complete(&self) -> bool {
        self.state == RunState::Completed
    }

    /// Whether the run was cancelled
    pub fn is_cancelled(&self) -> bool {
        self.state == RunState::Cancelled
    }

    /// Parameters of this run
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn enter(&mut self, phase: Phase) {
        log::debug!(
            "animation entering {phase} phase at progress {:.3}",
            self.clock.progress()
        );
        self.phase = Some(phase);

        if phase == Phase::Scatter {
            let Self {
                particles,
                rng,
                bounds,
                ..
            } = self;
            for particle in particles.iter_mut() {
                let candidate = DVec2::new(
                    rng.random_range(0.0..bounds.x),
                    rng.random_range(0.0..bounds.y),
                );
                particle.assign_scatter_target(candidate);
            }
        }
    }

    fn converge(&mut self, q: f64) {
        if q >= self.config.boundaries.lock_threshold {
            self.particles.iter_mut().for_each(Particle::lock);
            return;
        }

        let eased = ease_out_cubic(q);
        let attraction = self.config.attraction;
        for particle in &mut self.particles {
            particle.attract(&attraction, eased);
        }
    }

    fn render_commands(&self) -> Vec<RenderCommand> {
        self.particles
            .iter()
            .map(|particle| {
                let (x, y) = particle.rounded_position();
                let speed = particle.speed();
                let glow = (speed > self.config.glow_speed_threshold).then(|| Glow {
                    radius: speed * self.config.glow_radius_per_speed,
                    intensity: (speed * self.config.glow_intensity_per_speed).min(1.0),
                });
                RenderCommand {
                    x,
                    y,
                    size: self.config.particle_size,
                    color: particle.color,
                    glow,
                }
            })
            .collect()
    }
}
