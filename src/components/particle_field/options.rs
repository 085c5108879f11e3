//! Tunables for the particle field.
//!
//! The physics constants are hand-tuned for look rather than derived from
//! anything physical. They are kept as named defaults so a host can retune a
//! field without touching the simulation.

use serde::Deserialize;

use super::error::{FieldError, Result};
use super::theme::FieldStyle;

/// Smallest accepted `density` in px² per particle.
pub const MIN_DENSITY: f64 = 1000.0;

/// Hard ceiling on the particle count of one field. The per-frame neighbor
/// scan is O(particles x floaters), so this keeps a frame well under budget.
pub const MAX_PARTICLES: usize = 2000;

/// Per-frame motion constants.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Physics {
	/// Horizontal repulsion scale at full pointer influence
	pub push_x: f64,
	/// Vertical repulsion scale at full pointer influence
	pub push_y: f64,
	/// Velocity multiplier applied every frame on both axes
	pub friction: f64,
	/// Downward velocity added every frame after friction
	pub gravity: f64,
	/// Overshoot past the left/right edge before wrapping to the other side
	pub side_margin: f64,
	/// Overshoot past the bottom edge before recycling to the top
	pub bottom_margin: f64,
	/// Vertical position a recycled particle restarts at
	pub respawn_y: f64,
	/// How far above the top edge a particle may be pushed
	pub top_margin: f64,
}

impl Physics {
	/// Vertical velocity the field settles to with no pointer influence.
	pub fn terminal_velocity(&self) -> f64 {
		self.gravity / (1.0 - self.friction)
	}
}

impl Default for Physics {
	fn default() -> Self {
		Self {
			push_x: 0.06,
			push_y: 0.04,
			friction: 0.985,
			gravity: 0.002,
			side_margin: 10.0,
			bottom_margin: 20.0,
			respawn_y: -10.0,
			top_margin: 20.0,
		}
	}
}

/// Uniform range `[min, min + spread)`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Spread {
	/// Lower bound (inclusive)
	pub min: f64,
	/// Width of the range
	pub spread: f64,
}

impl Spread {
	/// Range starting at `min`, `spread` wide.
	pub const fn new(min: f64, spread: f64) -> Self {
		Self { min, spread }
	}

	/// Maps a unit sample `t` in `[0, 1)` into the range.
	pub fn at(&self, t: f64) -> f64 {
		self.min + t * self.spread
	}
}

/// Initial state distributions for new particles.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpawnRanges {
	/// Initial horizontal velocity
	pub vx: Spread,
	/// Initial vertical velocity (positive is down)
	pub vy: Spread,
	/// Radius of regular particles
	pub regular_radius: Spread,
	/// Radius of floaters
	pub floater_radius: Spread,
}

impl Default for SpawnRanges {
	fn default() -> Self {
		Self {
			vx: Spread::new(-0.15, 0.3),
			vy: Spread::new(0.35, 0.6),
			regular_radius: Spread::new(0.9, 1.8),
			floater_radius: Spread::new(2.2, 1.8),
		}
	}
}

/// Complete configuration for a particle field.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldOptions {
	/// Surface area in px² per particle
	pub density: f64,
	/// Particle count floor for any non-empty surface
	pub min_count: usize,
	/// Probability a new particle is a floater
	pub floater_chance: f64,
	/// Pointer repulsion radius, also the floater link radius
	pub influence_radius: f64,
	/// Maximum links drawn from one floater
	pub max_links: usize,
	/// Cap on the device pixel ratio used for the backing store
	pub max_pixel_ratio: f64,
	/// Motion constants
	pub physics: Physics,
	/// Initial velocity and radius distributions
	pub spawn: SpawnRanges,
	/// Dot and line colors
	pub style: FieldStyle,
}

impl Default for FieldOptions {
	fn default() -> Self {
		Self {
			density: 9000.0,
			min_count: 120,
			floater_chance: 0.12,
			influence_radius: 140.0,
			max_links: 4,
			max_pixel_ratio: 2.0,
			physics: Physics::default(),
			spawn: SpawnRanges::default(),
			style: FieldStyle::default(),
		}
	}
}

impl FieldOptions {
	/// Parse options from JSON; missing fields take their defaults.
	pub fn from_json(json: &str) -> Result<Self> {
		let options: FieldOptions = serde_json::from_str(json)?;
		options.validate()?;
		Ok(options)
	}

	/// Reject values that would make the simulation divide by zero or blow up.
	pub fn validate(&self) -> Result<()> {
		if !(self.density.is_finite() && self.density >= MIN_DENSITY) {
			return Err(invalid(format!(
				"density must be at least {MIN_DENSITY}, got {}",
				self.density
			)));
		}
		if self.min_count > MAX_PARTICLES {
			return Err(invalid(format!(
				"min_count must be at most {MAX_PARTICLES}, got {}",
				self.min_count
			)));
		}
		if !(self.influence_radius.is_finite() && self.influence_radius > 0.0) {
			return Err(invalid(format!(
				"influence_radius must be positive, got {}",
				self.influence_radius
			)));
		}
		if !(0.0..=1.0).contains(&self.floater_chance) {
			return Err(invalid(format!(
				"floater_chance must be within [0, 1], got {}",
				self.floater_chance
			)));
		}
		if !(self.max_pixel_ratio.is_finite() && self.max_pixel_ratio > 0.0) {
			return Err(invalid(format!(
				"max_pixel_ratio must be positive, got {}",
				self.max_pixel_ratio
			)));
		}

		let p = &self.physics;
		let finite = [
			p.push_x,
			p.push_y,
			p.friction,
			p.gravity,
			p.side_margin,
			p.bottom_margin,
			p.respawn_y,
			p.top_margin,
		]
		.iter()
		.all(|v| v.is_finite());
		if !finite {
			return Err(invalid("physics values must be finite".to_string()));
		}
		if p.side_margin < 0.0 || p.bottom_margin < 0.0 || p.top_margin < 0.0 {
			return Err(invalid("edge margins must not be negative".to_string()));
		}
		Ok(())
	}

	/// Particle count for a surface of `width` x `height` CSS pixels.
	///
	/// An empty (or non-finite) surface gets no particles; anything else gets
	/// at least `min_count` and never more than [`MAX_PARTICLES`].
	pub fn particle_count(&self, width: f64, height: f64) -> usize {
		let area = width.max(0.0) * height.max(0.0);
		if area <= 0.0 || !area.is_finite() {
			return 0;
		}
		// Float-to-int casts saturate, so a tiny density cannot overflow here.
		let by_area = (area / self.density).floor() as usize;
		self.min_count.max(by_area).min(MAX_PARTICLES)
	}
}

fn invalid(msg: String) -> FieldError {
	FieldError::InvalidOptions(msg)
}
