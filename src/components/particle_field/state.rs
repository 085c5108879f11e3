//! Particle field simulation state.
//!
//! Owns the particle set, the last known pointer position and the surface
//! size. Everything here is plain data so the physics and the neighbor scan
//! can be exercised without a canvas.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::options::FieldOptions;
use super::particles::Particle;

/// Pointer position in surface-local CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
	pub x: f64,
	pub y: f64,
}

/// A connective line from a floater to one of its neighbors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	/// Index of the floater
	pub from: usize,
	/// Index of the neighbor
	pub to: usize,
	pub distance: f64,
	pub alpha: f64,
}

/// Line alpha for a link of length `distance`: `base` at zero, fading
/// linearly to zero at `radius`.
pub fn link_alpha(distance: f64, radius: f64, base: f64) -> f64 {
	(base - (distance / radius) * base).max(0.0)
}

/// Up to `k` nearest particles to `particles[idx]` strictly within `radius`,
/// as `(index, squared distance)` ordered nearest first.
///
/// Equal distances keep scan order. This is a linear scan; calling it for
/// every floater makes a frame O(particles x floaters), fine for a few
/// hundred particles but not beyond.
pub fn nearest_neighbors(
	particles: &[Particle],
	idx: usize,
	radius: f64,
	k: usize,
) -> Vec<(usize, f64)> {
	let Some(a) = particles.get(idx) else {
		return Vec::new();
	};
	let max_d2 = radius * radius;

	let mut found: Vec<(usize, f64)> = particles
		.iter()
		.enumerate()
		.filter(|&(j, _)| j != idx)
		.filter_map(|(j, b)| {
			let (dx, dy) = (a.x - b.x, a.y - b.y);
			let d2 = dx * dx + dy * dy;
			(d2 < max_d2).then_some((j, d2))
		})
		.collect();

	// Stable sort, so ties stay in scan order.
	found.sort_by(|m, n| m.1.total_cmp(&n.1));
	found.truncate(k);
	found
}

/// Simulation state for one particle field.
pub struct FieldState {
	pub particles: Vec<Particle>,
	pub pointer: Pointer,
	pub options: FieldOptions,
	width: f64,
	height: f64,
	rng: SmallRng,
}

impl FieldState {
	/// Empty field; call [`FieldState::reset`] once the surface size is known.
	pub fn new(options: FieldOptions, seed: u64) -> Self {
		Self {
			particles: Vec::new(),
			pointer: Pointer::default(),
			options,
			width: 0.0,
			height: 0.0,
			rng: SmallRng::seed_from_u64(seed),
		}
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Replace the particle set with a fresh scatter sized for the surface.
	///
	/// The new set is built in full before it replaces the old one. A
	/// zero-area surface leaves the field empty.
	pub fn reset(&mut self, width: f64, height: f64) {
		self.width = width.max(0.0);
		self.height = height.max(0.0);

		let count = self.options.particle_count(self.width, self.height);
		let mut fresh = Vec::with_capacity(count);
		for _ in 0..count {
			fresh.push(Particle::spawn(&mut self.rng, self.width, self.height, &self.options));
		}
		self.particles = fresh;
	}

	pub fn set_pointer(&mut self, x: f64, y: f64) {
		self.pointer = Pointer { x, y };
	}

	/// Advance every particle by one frame.
	pub fn step(&mut self) {
		let Self {
			particles,
			pointer,
			options,
			width,
			height,
			rng,
		} = self;
		let physics = &options.physics;

		for p in particles.iter_mut() {
			p.repel(pointer.x, pointer.y, options.influence_radius, physics);
			p.integrate(physics);
			p.wrap(&mut *rng, *width, *height, physics);
		}
	}

	/// Connective lines for the current positions, floater by floater in
	/// scan order.
	pub fn links(&self) -> Vec<Link> {
		let radius = self.options.influence_radius;
		let base = self.options.style.line_alpha;

		self.particles
			.iter()
			.enumerate()
			.filter(|(_, p)| p.is_floater())
			.flat_map(|(i, _)| {
				nearest_neighbors(&self.particles, i, radius, self.options.max_links)
					.into_iter()
					.map(move |(j, d2)| {
						let distance = d2.sqrt();
						Link {
							from: i,
							to: j,
							distance,
							alpha: link_alpha(distance, radius, base),
						}
					})
			})
			.collect()
	}
}
