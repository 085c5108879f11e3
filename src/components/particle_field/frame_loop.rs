//! `requestAnimationFrame` loop with an explicit owner.
//!
//! The loop runs a tick callback once per display refresh. The tick decides
//! whether another frame is wanted, so an idle field stops costing frames
//! until someone calls [`FrameLoop::start`] again.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::Window;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Self-rescheduling animation frame loop.
pub struct FrameLoop {
	window: Window,
	callback: FrameCallback,
	/// Id of the pending frame request, if any
	pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
	/// Wrap `tick` in a frame loop. Nothing runs until [`FrameLoop::start`].
	///
	/// `tick` returns `true` to keep the loop going.
	pub fn new(window: Window, mut tick: impl FnMut() -> bool + 'static) -> Self {
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let pending = Rc::new(Cell::new(None));

		let (callback_inner, pending_inner, window_inner) =
			(callback.clone(), pending.clone(), window.clone());
		*callback.borrow_mut() = Some(Closure::new(move || {
			pending_inner.set(None);
			if !tick() {
				return;
			}
			if let Some(ref cb) = *callback_inner.borrow() {
				request(&window_inner, cb, &pending_inner);
			}
		}));

		Self {
			window,
			callback,
			pending,
		}
	}

	/// Schedule the next frame unless one is already pending or the loop
	/// has been disposed.
	pub fn start(&self) {
		if self.pending.get().is_some() {
			return;
		}
		if let Some(ref cb) = *self.callback.borrow() {
			request(&self.window, cb, &self.pending);
		}
	}

	/// Cancel the pending frame, if any. The loop can be started again.
	pub fn stop(&self) {
		if let Some(id) = self.pending.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
	}

	pub fn is_running(&self) -> bool {
		self.pending.get().is_some()
	}

	/// Stop for good and release the frame closure. Safe to call repeatedly.
	pub fn dispose(&self) {
		self.stop();
		// The closure holds a handle to its own cell; dropping it here breaks
		// that cycle.
		self.callback.borrow_mut().take();
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.dispose();
	}
}

fn request(window: &Window, cb: &Closure<dyn FnMut()>, pending: &Cell<Option<i32>>) {
	match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
		Ok(id) => pending.set(Some(id)),
		Err(e) => warn!("portfolio-particles: requestAnimationFrame failed: {:?}", e),
	}
}
