//! Imperative lifecycle for a particle field attached to a container element.
//!
//! [`FieldHandle::create`] appends a canvas to the container, watches the
//! container for resizes, listens for pointer movement on the window and
//! starts the frame loop. [`FieldHandle::destroy`] undoes all of it.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, ResizeObserver,
	ResizeObserverEntry, Window,
};

use super::error::{FieldError, Result};
use super::frame_loop::FrameLoop;
use super::options::FieldOptions;
use super::render::{self, Surface};
use super::state::FieldState;
use super::theme::LineColor;

/// Canvas plus its 2d context and the pixel ratio it was sized for.
struct Backing {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	pixel_ratio: f64,
}

/// Content-box size of `container` in CSS pixels: client size minus padding.
///
/// Used before the resize observer has reported; afterwards its
/// `contentRect` is authoritative.
fn content_size(window: &Window, container: &HtmlElement) -> Result<(f64, f64)> {
	let (mut w, mut h) = (container.client_width() as f64, container.client_height() as f64);
	if let Some(css) = window.get_computed_style(container)? {
		let px = |name: &str| {
			css.get_property_value(name)
				.ok()
				.and_then(|v| v.trim().trim_end_matches("px").parse::<f64>().ok())
				.unwrap_or(0.0)
		};
		w -= px("padding-left") + px("padding-right");
		h -= px("padding-top") + px("padding-bottom");
	}
	Ok((w, h))
}

/// Content-box size reported by the first resize observer entry.
fn observed_size(entries: &js_sys::Array) -> Option<(f64, f64)> {
	let entry: ResizeObserverEntry = entries.get(0).dyn_into().ok()?;
	let rect = entry.content_rect();
	Some((rect.width(), rect.height()))
}

impl Backing {
	/// Size the backing store to a `width` x `height` content box and rebuild
	/// the particle set.
	fn fit(&self, (width, height): (f64, f64), state: &mut FieldState) -> Result<()> {
		let (w, h) = (width.max(0.0), height.max(0.0));

		if w <= 0.0 || h <= 0.0 {
			self.canvas.set_width(0);
			self.canvas.set_height(0);
			state.reset(0.0, 0.0);
			return Ok(());
		}

		self.canvas.set_width((w * self.pixel_ratio).floor() as u32);
		self.canvas.set_height((h * self.pixel_ratio).floor() as u32);
		let style = self.canvas.style();
		style.set_property("width", &format!("{w}px"))?;
		style.set_property("height", &format!("{h}px"))?;
		// Resizing the backing store resets the transform.
		self.ctx
			.set_transform(self.pixel_ratio, 0.0, 0.0, self.pixel_ratio, 0.0, 0.0)?;

		state.reset(w, h);
		Ok(())
	}
}

/// Everything a live field holds on to.
struct Mounted {
	window: Window,
	canvas: HtmlCanvasElement,
	state: Rc<RefCell<FieldState>>,
	frames: Rc<FrameLoop>,
	observer: ResizeObserver,
	_on_resize: Closure<dyn FnMut(js_sys::Array)>,
	on_pointer: Closure<dyn FnMut(MouseEvent)>,
}

/// A running particle field. Dropping the handle destroys the field.
pub struct FieldHandle {
	mounted: Option<Mounted>,
}

impl FieldHandle {
	/// Attach a particle field to `container` and start animating it.
	///
	/// Fails when the environment lacks something the field needs (window,
	/// 2d canvas, resize observation) or when `options` are invalid. Callers
	/// are expected to log and carry on without the effect.
	pub fn create(container: &HtmlElement, options: FieldOptions) -> Result<Self> {
		options.validate()?;

		let window = web_sys::window().ok_or(FieldError::NoWindow)?;
		let document = window.document().ok_or(FieldError::NoDocument)?;

		let canvas: HtmlCanvasElement = document
			.create_element("canvas")?
			.dyn_into()
			.map_err(|_| FieldError::Dom("created element is not a canvas".into()))?;
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or(FieldError::NoContext)?
			.dyn_into()
			.map_err(|_| FieldError::NoContext)?;

		let ratio = window.device_pixel_ratio();
		let pixel_ratio = if ratio.is_finite() && ratio > 0.0 {
			ratio.min(options.max_pixel_ratio)
		} else {
			1.0
		};

		let style = canvas.style();
		style.set_property("display", "block")?;
		style.set_property("pointer-events", "none")?;

		let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
		let state = Rc::new(RefCell::new(FieldState::new(options, seed)));
		let backing = Rc::new(Backing {
			canvas: canvas.clone(),
			ctx,
			pixel_ratio,
		});

		backing.fit(content_size(&window, container)?, &mut state.borrow_mut())?;

		let (state_frame, backing_frame) = (state.clone(), backing.clone());
		let frames = Rc::new(FrameLoop::new(window.clone(), move || {
			let mut state = state_frame.borrow_mut();
			if state.is_empty() {
				// Nothing to draw; the next non-empty resize restarts the loop.
				backing_frame.ctx.clear(state.width(), state.height());
				return false;
			}
			state.step();
			render::render(&state, &backing_frame.ctx);
			true
		}));

		let (state_resize, frames_resize, container_resize, window_resize) =
			(state.clone(), frames.clone(), container.clone(), window.clone());
		let on_resize: Closure<dyn FnMut(js_sys::Array)> = Closure::new(move |entries: js_sys::Array| {
			let size = match observed_size(&entries) {
				Some(size) => size,
				None => match content_size(&window_resize, &container_resize) {
					Ok(size) => size,
					Err(e) => {
						warn!("portfolio-particles: cannot measure container: {}", e);
						return;
					}
				},
			};
			let fitted = backing.fit(size, &mut state_resize.borrow_mut());
			if let Err(e) = fitted {
				warn!("portfolio-particles: resize failed: {}", e);
				return;
			}
			if !state_resize.borrow().is_empty() {
				frames_resize.start();
			}
		});

		let (state_pointer, container_pointer) = (state.clone(), container.clone());
		let on_pointer: Closure<dyn FnMut(MouseEvent)> = Closure::new(move |ev: MouseEvent| {
			let rect = container_pointer.get_bounding_client_rect();
			state_pointer.borrow_mut().set_pointer(
				ev.client_x() as f64 - rect.left(),
				ev.client_y() as f64 - rect.top(),
			);
		});

		let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref())?;

		container.append_child(&canvas)?;
		observer.observe(container);
		if let Err(e) =
			window.add_event_listener_with_callback("mousemove", on_pointer.as_ref().unchecked_ref())
		{
			observer.disconnect();
			canvas.remove();
			return Err(e.into());
		}

		// The observer also fires once on observe(); refitting twice on mount
		// is harmless.
		if !state.borrow().is_empty() {
			frames.start();
		}

		debug!(
			"portfolio-particles: field created with {} particles at {}x pixel ratio",
			state.borrow().particles.len(),
			pixel_ratio
		);

		Ok(Self {
			mounted: Some(Mounted {
				window,
				canvas,
				state,
				frames,
				observer,
				_on_resize: on_resize,
				on_pointer,
			}),
		})
	}

	/// Stop animating, detach listeners and remove the canvas.
	///
	/// Calling this more than once is a no-op.
	pub fn destroy(&mut self) {
		let Some(m) = self.mounted.take() else {
			return;
		};

		m.frames.dispose();
		m.observer.disconnect();
		let _ = m
			.window
			.remove_event_listener_with_callback("mousemove", m.on_pointer.as_ref().unchecked_ref());
		m.canvas.remove();
		debug!("portfolio-particles: field destroyed");
	}

	/// False once the field has been destroyed.
	pub fn is_active(&self) -> bool {
		self.mounted.is_some()
	}

	/// Whether a frame is scheduled. False while the container has no area.
	pub fn is_animating(&self) -> bool {
		self.mounted.as_ref().is_some_and(|m| m.frames.is_running())
	}

	/// Number of particles currently simulated.
	pub fn particle_count(&self) -> usize {
		self.mounted
			.as_ref()
			.map_or(0, |m| m.state.borrow().particles.len())
	}

	/// Recolor the connective lines of a live field.
	pub fn set_line_color(&self, color: LineColor) {
		if let Some(ref m) = self.mounted {
			m.state.borrow_mut().options.style.line = color;
		}
	}
}

impl Drop for FieldHandle {
	fn drop(&mut self) {
		self.destroy();
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use wasm_bindgen_test::*;

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	fn container(width: u32, height: u32, padding: u32) -> HtmlElement {
		let document = web_sys::window().unwrap().document().unwrap();
		let div: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
		let style = div.style();
		style.set_property("width", &format!("{width}px")).unwrap();
		style.set_property("height", &format!("{height}px")).unwrap();
		style.set_property("padding", &format!("{padding}px")).unwrap();
		document.body().unwrap().append_child(&div).unwrap();
		div
	}

	#[wasm_bindgen_test]
	fn test_destroy_twice() {
		let div = container(800, 600, 0);
		let mut field = FieldHandle::create(&div, FieldOptions::default()).unwrap();
		assert!(field.is_active());
		assert!(field.is_animating());
		assert_eq!(field.particle_count(), 120);
		assert_eq!(div.child_element_count(), 1);

		field.destroy();
		field.destroy();

		assert!(!field.is_active());
		assert!(!field.is_animating());
		assert_eq!(field.particle_count(), 0);
		assert_eq!(div.child_element_count(), 0);
		div.remove();
	}

	#[wasm_bindgen_test]
	fn test_drop_removes_canvas() {
		let div = container(400, 300, 0);
		let field = FieldHandle::create(&div, FieldOptions::default()).unwrap();
		assert_eq!(div.child_element_count(), 1);
		drop(field);
		assert_eq!(div.child_element_count(), 0);
		div.remove();
	}

	#[wasm_bindgen_test]
	fn test_zero_area_does_not_animate() {
		let div = container(0, 0, 0);
		let mut field = FieldHandle::create(&div, FieldOptions::default()).unwrap();
		assert!(field.is_active());
		assert_eq!(field.particle_count(), 0);
		assert!(!field.is_animating());
		field.destroy();
		div.remove();
	}

	#[wasm_bindgen_test]
	fn test_canvas_sized_to_content_box() {
		let div = container(300, 200, 25);
		let field = FieldHandle::create(&div, FieldOptions::default()).unwrap();
		let canvas: HtmlCanvasElement = div.first_element_child().unwrap().dyn_into().unwrap();

		let window = web_sys::window().unwrap();
		let ratio = window.device_pixel_ratio().min(2.0);
		assert_eq!(canvas.width(), (300.0 * ratio).floor() as u32);
		assert_eq!(canvas.height(), (200.0 * ratio).floor() as u32);
		assert_eq!(canvas.style().get_property_value("width").unwrap(), "300px");

		drop(field);
		div.remove();
	}

	#[wasm_bindgen_test]
	fn test_invalid_options_rejected() {
		let div = container(300, 200, 0);
		let options = FieldOptions {
			density: 0.5,
			..FieldOptions::default()
		};
		assert!(matches!(
			FieldHandle::create(&div, options),
			Err(FieldError::InvalidOptions(_))
		));
		assert_eq!(div.child_element_count(), 0);
		div.remove();
	}
}
