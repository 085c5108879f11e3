//! Drawing the particle field.
//!
//! Rendering is two passes over the current state:
//! 1. Dots, one filled circle per particle
//! 2. Connective lines from each floater to its nearest neighbors
//!
//! All coordinates are CSS pixels; the canvas transform takes care of the
//! device pixel ratio.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::FieldState;

/// Immediate-mode drawing primitives the field needs.
pub trait Surface {
	fn clear(&self, width: f64, height: f64);
	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: &str);
	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), width: f64, color: &str);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: &str) {
		self.set_fill_style_str(color);
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.fill();
	}

	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), width: f64, color: &str) {
		self.set_stroke_style_str(color);
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}
}

/// Renders one frame of the field.
pub fn render(state: &FieldState, surface: &impl Surface) {
	let style = &state.options.style;

	surface.clear(state.width(), state.height());

	let fill = style.fill.to_css();
	for p in &state.particles {
		surface.fill_circle(p.x, p.y, p.radius, &fill);
	}

	for link in state.links() {
		if link.alpha <= 0.0 {
			continue;
		}
		let (a, b) = (&state.particles[link.from], &state.particles[link.to]);
		surface.stroke_line(
			(a.x, a.y),
			(b.x, b.y),
			style.line_width,
			&style.line.to_css(link.alpha),
		);
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use super::*;
	use crate::components::particle_field::options::FieldOptions;
	use crate::components::particle_field::particles::{Particle, Role};
	use crate::components::particle_field::theme::{FieldStyle, LineColor};

	#[derive(Debug, PartialEq)]
	enum Op {
		Clear(f64, f64),
		Circle(f64, f64, f64, String),
		Line((f64, f64), (f64, f64), f64, String),
	}

	#[derive(Default)]
	struct Recorder(RefCell<Vec<Op>>);

	impl Surface for Recorder {
		fn clear(&self, width: f64, height: f64) {
			self.0.borrow_mut().push(Op::Clear(width, height));
		}

		fn fill_circle(&self, x: f64, y: f64, radius: f64, color: &str) {
			self.0
				.borrow_mut()
				.push(Op::Circle(x, y, radius, color.to_string()));
		}

		fn stroke_line(&self, from: (f64, f64), to: (f64, f64), width: f64, color: &str) {
			self.0
				.borrow_mut()
				.push(Op::Line(from, to, width, color.to_string()));
		}
	}

	fn at(x: f64, y: f64, radius: f64, role: Role) -> Particle {
		Particle {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			radius,
			role,
		}
	}

	#[test]
	fn test_render_order() {
		let mut state = FieldState::new(FieldOptions::default(), 1);
		state.reset(200.0, 100.0);
		state.particles = vec![
			at(10.0, 10.0, 3.0, Role::Floater),
			at(10.0, 10.0, 1.0, Role::Regular),
			at(190.0, 90.0, 1.5, Role::Regular),
		];

		let surface = Recorder::default();
		render(&state, &surface);
		let ops = surface.0.into_inner();

		assert_eq!(ops[0], Op::Clear(200.0, 100.0));
		assert_eq!(ops[1], Op::Circle(10.0, 10.0, 3.0, "rgba(0, 0, 0, 1)".into()));
		assert_eq!(ops[3], Op::Circle(190.0, 90.0, 1.5, "rgba(0, 0, 0, 1)".into()));
		assert_eq!(
			ops[4],
			Op::Line((10.0, 10.0), (10.0, 10.0), 1.0, "rgba(0, 0, 0, 0.18)".into())
		);
		assert_eq!(ops.len(), 5);
	}

	#[test]
	fn test_render_uses_line_hue() {
		let mut options = FieldOptions::default();
		options.style = FieldStyle::hued(160.0);
		let mut state = FieldState::new(options, 1);
		state.reset(100.0, 100.0);
		state.particles = vec![at(0.0, 0.0, 2.0, Role::Floater), at(70.0, 0.0, 1.0, Role::Regular)];

		let surface = Recorder::default();
		render(&state, &surface);
		let ops = surface.0.into_inner();

		let Some(Op::Line(_, to, _, color)) = ops.last() else {
			panic!("expected a line, got {ops:?}");
		};
		assert_eq!(*to, (70.0, 0.0));
		assert_eq!(color, "hsla(160, 80%, 45%, 0.09)");
		assert_eq!(state.options.style.line, LineColor::Hue(160.0));
	}

	#[test]
	fn test_render_empty_field_only_clears() {
		let mut state = FieldState::new(FieldOptions::default(), 1);
		state.reset(0.0, 0.0);
		let surface = Recorder::default();
		render(&state, &surface);
		assert_eq!(surface.0.into_inner(), vec![Op::Clear(0.0, 0.0)]);
	}
}
