//! Particles and their per-frame physics.

use rand::Rng;

use super::options::{FieldOptions, Physics};

/// Whether a particle draws connective lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
	Regular,
	/// Links to its nearest neighbors each frame
	Floater,
}

/// A single falling dot.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	pub role: Role,
}

/// Repulsion strength for a pointer `distance` away: 1.0 on top of the
/// pointer, falling linearly to 0.0 at `radius` and beyond.
pub fn influence(distance: f64, radius: f64) -> f64 {
	if distance < radius {
		(radius - distance) / radius
	} else {
		0.0
	}
}

impl Particle {
	/// Scatter a new particle uniformly over a `width` x `height` surface.
	pub fn spawn<R: Rng>(rng: &mut R, width: f64, height: f64, opts: &FieldOptions) -> Self {
		let role = if rng.gen_bool(opts.floater_chance) {
			Role::Floater
		} else {
			Role::Regular
		};
		let radius = match role {
			Role::Floater => opts.spawn.floater_radius.at(rng.r#gen()),
			Role::Regular => opts.spawn.regular_radius.at(rng.r#gen()),
		};

		Self {
			x: rng.r#gen::<f64>() * width,
			y: rng.r#gen::<f64>() * height,
			vx: opts.spawn.vx.at(rng.r#gen()),
			vy: opts.spawn.vy.at(rng.r#gen()),
			radius,
			role,
		}
	}

	pub fn is_floater(&self) -> bool {
		self.role == Role::Floater
	}

	/// Push the particle away from the pointer at (`px`, `py`).
	///
	/// A particle exactly under the pointer has no defined direction and is
	/// left alone.
	pub fn repel(&mut self, px: f64, py: f64, radius: f64, physics: &Physics) {
		let (dx, dy) = (self.x - px, self.y - py);
		let dist = dx.hypot(dy);
		let f = influence(dist, radius);
		if f > 0.0 {
			// Offset keeps the unit vector finite as dist approaches zero.
			let norm = dist + 0.0001;
			self.vx += dx / norm * f * physics.push_x;
			self.vy += dy / norm * f * physics.push_y;
		}
	}

	/// Advance by one frame: move, then apply friction and gravity.
	pub fn integrate(&mut self, physics: &Physics) {
		self.x += self.vx;
		self.y += self.vy;
		self.vx *= physics.friction;
		self.vy = self.vy * physics.friction + physics.gravity;
	}

	/// Apply the edge policy for a `width` x `height` surface.
	///
	/// Falling past the bottom recycles the particle to the top at a fresh
	/// horizontal position. Left and right edges wrap around. The top edge
	/// is a ceiling: nothing recycles upward.
	pub fn wrap<R: Rng>(&mut self, rng: &mut R, width: f64, height: f64, physics: &Physics) {
		if self.y > height + physics.bottom_margin {
			self.y = physics.respawn_y;
			self.x = rng.r#gen::<f64>() * width;
		} else if self.y < -physics.top_margin {
			self.y = -physics.top_margin;
			self.vy = self.vy.max(0.0);
		}

		if self.x > width + physics.side_margin {
			self.x = -physics.side_margin;
		} else if self.x < -physics.side_margin {
			self.x = width + physics.side_margin;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	fn particle(x: f64, y: f64) -> Particle {
		Particle {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			radius: 1.0,
			role: Role::Regular,
		}
	}

	#[test]
	fn test_influence_falloff() {
		assert_eq!(influence(0.0, 140.0), 1.0);
		assert!((influence(70.0, 140.0) - 0.5).abs() < 1e-12);
		assert_eq!(influence(140.0, 140.0), 0.0);
		assert_eq!(influence(500.0, 140.0), 0.0);
	}

	#[test]
	fn test_repel_is_asymmetric() {
		let physics = Physics::default();
		let mut right = particle(1.0, 0.0);
		right.repel(0.0, 0.0, 140.0, &physics);
		assert!((right.vx - physics.push_x).abs() < 1e-3);
		assert!(right.vy.abs() < 1e-12);

		let mut below = particle(0.0, 1.0);
		below.repel(0.0, 0.0, 140.0, &physics);
		assert!((below.vy - physics.push_y).abs() < 1e-3);
		assert!(below.vx.abs() < 1e-12);
	}

	#[test]
	fn test_repel_under_pointer_is_finite() {
		let mut p = particle(50.0, 50.0);
		p.repel(50.0, 50.0, 140.0, &Physics::default());
		assert_eq!((p.vx, p.vy), (0.0, 0.0));
	}

	#[test]
	fn test_repel_outside_radius() {
		let mut p = particle(200.0, 0.0);
		p.repel(0.0, 0.0, 140.0, &Physics::default());
		assert_eq!((p.vx, p.vy), (0.0, 0.0));
	}

	#[test]
	fn test_integrate_applies_friction_and_gravity() {
		let physics = Physics::default();
		let mut p = particle(10.0, 10.0);
		p.vx = 1.0;
		p.vy = 1.0;
		p.integrate(&physics);
		assert_eq!((p.x, p.y), (11.0, 11.0));
		assert!((p.vx - 0.985).abs() < 1e-12);
		assert!((p.vy - 0.987).abs() < 1e-12);
	}

	#[test]
	fn test_bottom_recycles_to_top() {
		let mut rng = SmallRng::seed_from_u64(7);
		let physics = Physics::default();
		let mut p = particle(50.0, 621.0);
		p.wrap(&mut rng, 800.0, 600.0, &physics);
		assert_eq!(p.y, -10.0);
		assert!((0.0..=800.0).contains(&p.x));
	}

	#[test]
	fn test_sides_wrap() {
		let mut rng = SmallRng::seed_from_u64(7);
		let physics = Physics::default();

		let mut p = particle(811.0, 100.0);
		p.wrap(&mut rng, 800.0, 600.0, &physics);
		assert_eq!(p.x, -10.0);

		let mut p = particle(-11.0, 100.0);
		p.wrap(&mut rng, 800.0, 600.0, &physics);
		assert_eq!(p.x, 810.0);

		let mut p = particle(805.0, 100.0);
		p.wrap(&mut rng, 800.0, 600.0, &physics);
		assert_eq!(p.x, 805.0);
	}

	#[test]
	fn test_top_is_a_ceiling() {
		let mut rng = SmallRng::seed_from_u64(7);
		let mut p = particle(100.0, -35.0);
		p.vy = -2.0;
		p.wrap(&mut rng, 800.0, 600.0, &Physics::default());
		assert_eq!(p.y, -20.0);
		assert_eq!(p.vy, 0.0);
	}

	#[test]
	fn test_spawn_ranges() {
		let mut rng = SmallRng::seed_from_u64(42);
		let opts = FieldOptions::default();
		for _ in 0..500 {
			let p = Particle::spawn(&mut rng, 800.0, 600.0, &opts);
			assert!((0.0..=800.0).contains(&p.x));
			assert!((0.0..=600.0).contains(&p.y));
			assert!((-0.15..=0.15).contains(&p.vx));
			assert!((0.35..=0.95).contains(&p.vy));
			match p.role {
				Role::Floater => assert!((2.2..=4.0).contains(&p.radius)),
				Role::Regular => assert!((0.9..=2.7).contains(&p.radius)),
			}
		}
	}

	#[test]
	fn test_spawn_floater_share() {
		let mut rng = SmallRng::seed_from_u64(3);
		let opts = FieldOptions::default();
		let floaters = (0..10_000)
			.filter(|_| Particle::spawn(&mut rng, 100.0, 100.0, &opts).is_floater())
			.count();
		assert!((900..1500).contains(&floaters), "got {floaters} floaters");
	}
}
