//! Error types for the starfield background.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures the starfield can run into.
///
/// None of these ever reach the user: the host logs them and the background
/// simply does not render (or keeps its previous field).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StarfieldError {
	/// No `window` object (not running in a browser).
	#[error("no window available")]
	MissingWindow,

	/// The canvas exists but refused to hand out a 2D context.
	#[error("2D rendering context unavailable")]
	MissingContext,

	/// Provisioning was asked for a zero, negative or non-finite surface.
	#[error("invalid surface dimensions {width}x{height}")]
	InvalidDimensions {
		/// Requested width.
		width: f64,
		/// Requested height.
		height: f64,
	},

	/// A browser API call failed.
	#[error("browser call failed: {0}")]
	Js(String),
}

impl From<JsValue> for StarfieldError {
	fn from(value: JsValue) -> Self {
		Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

/// Result alias used across the starfield modules.
pub type Result<T> = std::result::Result<T, StarfieldError>;
