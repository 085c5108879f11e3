//! Visual styling for the particle field.
//!
//! Colors for the dots and the connective lines drawn between floaters and
//! their neighbors.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Color {
	/// Red channel
	pub r: u8,
	/// Green channel
	pub g: u8,
	/// Blue channel
	pub b: u8,
	/// Opacity in `[0, 1]`; defaults to opaque when omitted from JSON
	#[serde(default = "opaque")]
	pub a: f64,
}

fn opaque() -> f64 {
	1.0
}

impl Color {
	/// Opaque black
	pub const BLACK: Color = Color::rgb(0, 0, 0);

	/// Opaque color from RGB channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color from RGB channels and an opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color at opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS `rgba()` string.
	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Color of the connective lines.
///
/// Line opacity is computed per link from its length, so the color only
/// carries the hue; the per-link alpha is applied at render time.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineColor {
	/// Fixed RGB color. The color's own alpha scales the link alpha.
	Rgb(Color),
	/// Hue in degrees, rendered at 80% saturation and 45% lightness.
	Hue(f64),
}

impl LineColor {
	/// CSS color string for a link drawn at `alpha`.
	pub fn to_css(self, alpha: f64) -> String {
		match self {
			LineColor::Rgb(c) => c.with_alpha(c.a * alpha).to_css(),
			LineColor::Hue(hue) => format!("hsla({}, 80%, 45%, {})", hue.rem_euclid(360.0), alpha),
		}
	}
}

impl Default for LineColor {
	fn default() -> Self {
		LineColor::Rgb(Color::BLACK)
	}
}

/// Complete visual style of a field.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldStyle {
	/// Dot fill color
	pub fill: Color,
	/// Connective line color
	pub line: LineColor,
	/// Connective line width in CSS pixels
	pub line_width: f64,
	/// Line alpha for a link of length zero; fades linearly to 0 at the influence radius
	pub line_alpha: f64,
}

impl FieldStyle {
	/// Black dots joined by faint black lines (default)
	pub fn ink() -> Self {
		Self {
			fill: Color::BLACK,
			line: LineColor::Rgb(Color::BLACK),
			line_width: 1.0,
			line_alpha: 0.18,
		}
	}

	/// Black dots joined by lines tinted with `hue`
	pub fn hued(hue: f64) -> Self {
		Self {
			line: LineColor::Hue(hue),
			..Self::ink()
		}
	}
}

impl Default for FieldStyle {
	fn default() -> Self {
		Self::ink()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_rgb_line_scales_alpha() {
		let line = LineColor::Rgb(Color::rgba(10, 20, 30, 0.5));
		assert_eq!(line.to_css(0.5), "rgba(10, 20, 30, 0.25)");
	}

	#[test]
	fn test_hue_line_wraps_degrees() {
		assert_eq!(LineColor::Hue(210.0).to_css(0.1), "hsla(210, 80%, 45%, 0.1)");
		assert_eq!(LineColor::Hue(-30.0).to_css(0.0), "hsla(330, 80%, 45%, 0)");
	}

	#[test]
	fn test_style_from_json() {
		let style: FieldStyle =
			serde_json::from_str(r#"{ "line": { "hue": 45 }, "line_width": 2 }"#).unwrap();
		assert_eq!(style.line, LineColor::Hue(45.0));
		assert_eq!(style.line_width, 2.0);
		assert_eq!(style.fill, Color::BLACK);
		assert_eq!(style.line_alpha, 0.18);
	}

	#[test]
	fn test_color_alpha_defaults_opaque() {
		let c: Color = serde_json::from_str(r#"{ "r": 1, "g": 2, "b": 3 }"#).unwrap();
		assert_eq!(c, Color::rgb(1, 2, 3));
	}
}
