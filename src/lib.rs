//! portfolio-particles: decorative particle field backgrounds for a portfolio page.
//!
//! This crate provides a WASM-based canvas component that renders a slowly
//! falling, pointer-reactive field of dots joined by faint constellation lines.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{
	Color, FieldError, FieldHandle, FieldOptions, FieldStyle, LineColor, ParticleField,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("portfolio-particles: logging initialized");
}

/// Load field options from a script element with id="field-options".
/// Expected format: JSON matching [`FieldOptions`]; missing keys keep their defaults.
fn load_field_options() -> Option<FieldOptions> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("field-options")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match FieldOptions::from_json(&json_text) {
		Ok(options) => {
			info!(
				"portfolio-particles: loaded options (density {}, radius {})",
				options.density, options.influence_radius
			);
			Some(options)
		}
		Err(e) => {
			warn!("portfolio-particles: ignoring field options: {}", e);
			None
		}
	}
}

/// A selectable "vibe" in the about section; each one tints the field.
struct Vibe {
	label: &'static str,
	hue: f64,
	desc: &'static str,
}

const VIBES: [Vibe; 4] = [
	Vibe {
		label: "WebGL",
		hue: 210.0,
		desc: "Lightweight shader tricks and immersive visuals without compromising performance.",
	},
	Vibe {
		label: "Motion",
		hue: 320.0,
		desc: "Crisp timelines, scroll choreography, and interactions that feel inevitable.",
	},
	Vibe {
		label: "UI",
		hue: 45.0,
		desc: "Beautiful, legible, and fast. Systems that scale and micro-interactions that delight.",
	},
	Vibe {
		label: "Systems",
		hue: 160.0,
		desc: "Organized code, clean data flow, and pragmatic tradeoffs to ship reliably.",
	},
];

/// Main application component.
/// Renders a hero and an about section, each over its own particle field.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let options = load_field_options().unwrap_or_default();
	let about_options = FieldOptions {
		style: FieldStyle::hued(VIBES[0].hue),
		..options.clone()
	};

	let (active, set_active) = signal(0usize);
	let hue = Signal::derive(move || VIBES[active.get()].hue);

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<section class="hero">
			<ParticleField options=options class="hero-bg" />
			<h1 class="hero-title">"Creative Developer"</h1>
		</section>

		<section class="about">
			<ParticleField options=about_options hue=hue class="about-bg" />
			<div class="vibes">
				{VIBES
					.iter()
					.enumerate()
					.map(|(i, v)| {
						view! {
							<button
								class="vibe"
								class:active=move || active.get() == i
								on:click=move |_| set_active.set(i)
							>
								{v.label}
							</button>
						}
					})
					.collect_view()}
			</div>
			<p class="vibe-desc">{move || VIBES[active.get()].desc}</p>
		</section>
	}
}
