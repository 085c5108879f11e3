//! Mouse-reactive particle field background.
//!
//! Renders a drifting field of dots on an HTML canvas with:
//! - Slow falling motion with friction, recycled from bottom to top
//! - Repulsion away from the pointer inside an influence radius
//! - Faint lines from "floater" particles to their nearest neighbors
//! - Automatic re-scatter whenever the container is resized
//!
//! # Example
//!
//! ```ignore
//! use portfolio_particles::{FieldOptions, ParticleField};
//!
//! let (hue, set_hue) = signal(210.0);
//! view! {
//!     <section class="about">
//!         <ParticleField hue=hue />
//!     </section>
//! }
//! ```
//!
//! Outside Leptos, [`FieldHandle::create`] attaches a field to any element and
//! [`FieldHandle::destroy`] tears it down.

mod component;
mod error;
mod frame_loop;
mod handle;
pub mod options;
mod particles;
mod render;
mod state;
pub mod theme;

pub use component::ParticleField;
pub use error::FieldError;
pub use handle::FieldHandle;
pub use options::FieldOptions;
pub use theme::{Color, FieldStyle, LineColor};
