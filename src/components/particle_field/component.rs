//! Leptos component wrapping a particle field.
//!
//! The component renders an empty container `div`; once it is mounted a
//! [`FieldHandle`] takes over the container and lives until the component is
//! cleaned up.

use leptos::prelude::*;
use log::warn;
use web_sys::HtmlElement;

use super::handle::FieldHandle;
use super::options::FieldOptions;
use super::theme::LineColor;

/// Renders a decorative particle field filling its container.
///
/// Size the container with CSS; the field follows it. Pass `hue` to tint the
/// connective lines and retint them live as the signal changes. If the
/// browser cannot host the effect the container simply stays empty.
#[component]
pub fn ParticleField(
	/// Field configuration; defaults when omitted.
	#[prop(optional)]
	options: Option<FieldOptions>,
	/// Hue in degrees for the connective lines, tracked live.
	#[prop(optional, into)]
	hue: Option<Signal<f64>>,
	/// CSS class of the container `div`.
	#[prop(default = "particle-field")]
	class: &'static str,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let handle = StoredValue::new_local(None::<FieldHandle>);
	let options = options.unwrap_or_default();

	Effect::new(move |_| {
		let Some(container) = container_ref.get() else {
			return;
		};
		if handle.with_value(Option::is_some) {
			return;
		}
		let container: HtmlElement = container.into();

		let mut options = options.clone();
		if let Some(hue) = hue {
			options.style.line = LineColor::Hue(hue.get_untracked());
		}

		match FieldHandle::create(&container, options) {
			Ok(field) => handle.set_value(Some(field)),
			Err(e) => warn!("portfolio-particles: effect disabled: {}", e),
		}
	});

	if let Some(hue) = hue {
		Effect::new(move |_| {
			let hue = hue.get();
			handle.with_value(|field| {
				if let Some(field) = field {
					field.set_line_color(LineColor::Hue(hue));
				}
			});
		});
	}

	on_cleanup(move || {
		handle.try_update_value(|field| {
			if let Some(mut field) = field.take() {
				field.destroy();
			}
		});
	});

	view! { <div node_ref=container_ref class=class aria-hidden="true" /> }
}
