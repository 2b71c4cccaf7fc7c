//! Phase-driven particle convergence animation
//!
//! This module contains:
//! - Progress clock and phase boundaries (hold, scatter, converge)
//! - Easing curves
//! - Particle state and per-phase motion
//! - The tick-driven engine emitting render commands

/// Progress clock and phase classification
pub mod clock;
/// Easing and interpolation curves
pub mod easing;
/// Tick-driven convergence engine
pub mod engine;
/// Particle state and motion rules
pub mod particle;

pub use clock::{Phase, PhaseBoundaries, SimulationClock};
pub use engine::{
    EngineConfig, EngineEvent, Glow, ParticleConvergenceEngine, RenderCommand, TickFrame,
};
pub use particle::{Attraction, Particle};
