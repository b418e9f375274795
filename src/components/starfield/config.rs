//! Tunable starfield parameters.
//!
//! Every field has a default, so a host page can override just the values it
//! cares about:
//!
//! ```html
//! <script id="starfield-config" type="application/json">
//!   { "theme": "glacier", "high_count": 300 }
//! </script>
//! ```

use rand::Rng;
use serde::Deserialize;

/// Inclusive-exclusive range used for random draws.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct Range {
	/// Lower bound, included.
	pub min: f64,
	/// Upper bound, excluded.
	pub max: f64,
}

impl Range {
	/// Range over `[min, max)`.
	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	/// Whether `value` falls inside `[min, max)`.
	pub fn contains(&self, value: f64) -> bool {
		value >= self.min && value < self.max
	}

	/// Uniform draw from `[min, max)`. A degenerate range yields `min`.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
		self.min + rng.r#gen::<f64>() * (self.max - self.min)
	}
}

/// Per-axis pair of multipliers.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct Axes {
	/// Horizontal multiplier.
	pub x: f64,
	/// Vertical multiplier.
	pub y: f64,
}

/// Starfield configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarfieldConfig {
	/// Master switch. When off the host mounts a blank canvas.
	pub enabled: bool,
	/// Theme preset name (`nebula`, `ember`, `glacier`).
	pub theme: String,
	/// Viewport width at which the high density tier kicks in.
	pub breakpoint: f64,
	/// Star count below the breakpoint.
	pub low_count: usize,
	/// Star count at or above the breakpoint.
	pub high_count: usize,
	/// Probability that a star is a large sparkle star.
	pub sparkle_probability: f64,
	/// Radius of ordinary dot stars.
	pub dot_radius: Range,
	/// Radius of sparkle stars.
	pub sparkle_radius: Range,
	/// Magnitude of the per-tick brightness step.
	pub twinkle_step: Range,
	/// Drift velocity component range, in pixels per tick.
	pub drift: Range,
	/// Parallax shift per pixel of scroll, per depth layer.
	pub scroll_parallax: Axes,
	/// Parallax shift per unit of pointer offset, per depth layer.
	pub pointer_parallax: Axes,
	/// Fraction of the remaining distance the pointer moves each tick.
	pub pointer_smoothing: f64,
	/// Chance of a new shooting star per tick.
	pub streak_probability: f64,
	/// Shooting star length in pixels.
	pub streak_length: Range,
	/// Shooting star speed in pixels per tick.
	pub streak_speed: Range,
	/// Travel angle in radians.
	pub streak_angle: f64,
	/// Opacity lost per tick.
	pub streak_fade: f64,
	/// Frame cap.
	pub target_fps: f64,
	/// Quiet period before a burst of resize events re-provisions the field.
	pub resize_debounce_ms: u32,
}

impl Default for StarfieldConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			theme: "nebula".to_string(),
			breakpoint: 768.0,
			low_count: 120,
			high_count: 250,
			sparkle_probability: 0.12,
			dot_radius: Range::new(0.0, 1.2),
			sparkle_radius: Range::new(1.5, 4.0),
			twinkle_step: Range::new(0.005, 0.025),
			drift: Range::new(-0.015, 0.015),
			scroll_parallax: Axes { x: 0.03, y: 0.02 },
			pointer_parallax: Axes { x: 20.0, y: 20.0 },
			pointer_smoothing: 0.05,
			streak_probability: 0.001,
			streak_length: Range::new(150.0, 250.0),
			streak_speed: Range::new(8.0, 18.0),
			streak_angle: std::f64::consts::FRAC_PI_4,
			streak_fade: 0.01,
			target_fps: 40.0,
			resize_debounce_ms: 250,
		}
	}
}

impl StarfieldConfig {
	/// Parse a JSON override document; absent fields keep their defaults.
	pub fn from_json(json: &str) -> serde_json::Result<Self> {
		serde_json::from_str(json)
	}

	/// Star count for a surface of the given width.
	pub fn star_count(&self, width: f64) -> usize {
		if width < self.breakpoint {
			self.low_count
		} else {
			self.high_count
		}
	}

	/// Delay between the end of one frame and the start of the next.
	pub fn frame_interval_ms(&self) -> f64 {
		if self.target_fps > 0.0 {
			1000.0 / self.target_fps
		} else {
			1000.0 / Self::default().target_fps
		}
	}
}
