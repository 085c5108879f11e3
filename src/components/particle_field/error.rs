//! Error types for the particle field.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Result type alias for particle field operations
pub type Result<T> = std::result::Result<T, FieldError>;

/// Reasons a particle field cannot be created.
///
/// Every variant except the option errors means the host environment is
/// unsupported; callers treat those as "render nothing".
#[derive(Debug, Error)]
pub enum FieldError {
	/// No global `window` (not running in a browser)
	#[error("no window available")]
	NoWindow,

	/// Window has no document
	#[error("no document available")]
	NoDocument,

	/// Canvas refused a 2d rendering context
	#[error("2d canvas context unavailable")]
	NoContext,

	/// A DOM call threw
	#[error("DOM call failed: {0}")]
	Dom(String),

	/// Options failed validation
	#[error("invalid field options: {0}")]
	InvalidOptions(String),

	/// Options JSON could not be parsed
	#[error("failed to parse field options: {0}")]
	Parse(#[from] serde_json::Error),
}

impl From<JsValue> for FieldError {
	fn from(value: JsValue) -> Self {
		FieldError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}
