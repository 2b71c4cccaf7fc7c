//! Particle state and per-phase motion rules

use crate::mapping::rank::MappedPoint;
use crate::sampling::pixel::Rgba;
use glam::DVec2;

/// Attraction parameters for the converge phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attraction {
    /// Force per unit distance to target
    pub force_constant: f64,
    /// Per-tick velocity multiplier
    pub damping: f64,
    /// Distance at or below which the particle snaps onto its target
    pub snap_distance: f64,
}

/// One mapped pixel in flight from its origin to its target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Source position
    pub origin: DVec2,
    /// Position rendered this tick
    pub current: DVec2,
    /// Final position
    pub target: DVec2,
    /// Velocity in units per tick
    pub velocity: DVec2,
    /// Random point assigned on first entry into scatter
    pub scatter_target: Option<DVec2>,
    /// Source color
    pub color: Rgba,
}

impl Particle {
    /// Create a particle resting at `origin`
    pub const fn new(origin: DVec2, target: DVec2, color: Rgba) -> Self {
        Self {
            origin,
            current: origin,
            target,
            velocity: DVec2::ZERO,
            scatter_target: None,
            color,
        }
    }

    /// Create a particle from a mapped point: source position to target position
    pub fn from_mapped(point: &MappedPoint) -> Self {
        let (ox, oy) = point.origin();
        let (tx, ty) = point.destination();
        Self::new(
            DVec2::new(f64::from(ox), f64::from(oy)),
            DVec2::new(f64::from(tx), f64::from(ty)),
            point.color(),
        )
    }

    /// Assign the scatter point unless one is already set; returns the point in use
    pub fn assign_scatter_target(&mut self, candidate: DVec2) -> DVec2 {
        *self.scatter_target.get_or_insert(candidate)
    }

    /// Rest at the origin
    pub const fn hold(&mut self) {
        self.current = self.origin;
        self.velocity = DVec2::ZERO;
    }

    /// Move linearly from origin towards the scatter point by fraction `q`
    ///
    /// Without an assigned scatter point the particle stays where it is.
    pub fn scatter(&mut self, q: f64) {
        if let Some(scatter_target) = self.scatter_target {
            self.current = self.origin.lerp(scatter_target, q);
        }
    }

    /// One integration step towards the target
    ///
    /// `eased` in `[0, 1]` attenuates the force by up to half as the phase
    /// progresses. Within `snap_distance` the particle snaps and stops.
    pub fn attract(&mut self, attraction: &Attraction, eased: f64) {
        let offset = self.target - self.current;
        let distance = offset.length();

        if distance > attraction.snap_distance {
            let strength = attraction.force_constant * eased.mul_add(-0.5, 1.0);
            self.velocity += offset * strength;
            self.velocity *= attraction.damping;
            self.current += self.velocity;
        } else {
            self.lock();
        }
    }

    /// Place exactly on the target and stop
    pub const fn lock(&mut self) {
        self.current = self.target;
        self.velocity = DVec2::ZERO;
    }

    /// Whether the rendered position equals the target exactly
    pub fn is_at_target(&self) -> bool {
        self.current == self.target
    }

    /// Speed in units per tick
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Current position rounded to whole pixels
    pub fn rounded_position(&self) -> (i64, i64) {
        let rounded = self.current.round();
        (rounded.x as i64, rounded.y as i64)
    }
}
