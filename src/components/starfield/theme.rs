//! Visual theming for the starfield.
//!
//! A theme picks the nebula colorwash baked into the backdrop and the colors
//! used for star glows, sparkle crosses and shooting stars.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha, 0.0..=1.0.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color, new alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * (1.0 - t) + other.r as f64 * t).round() as u8,
			g: (self.g as f64 * (1.0 - t) + other.g as f64 * t).round() as u8,
			b: (self.b as f64 * (1.0 - t) + other.b as f64 * t).round() as u8,
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	/// CSS color string, hex when opaque.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// One stop of the backdrop gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
	/// Offset along the gradient, 0.0..=1.0.
	pub offset: f64,
	/// Color at this offset.
	pub color: Color,
}

impl GradientStop {
	/// Stop at `offset`.
	pub const fn new(offset: f64, color: Color) -> Self {
		Self { offset, color }
	}
}

/// Nebula colorwash baked into the cached backdrop.
#[derive(Clone, Debug)]
pub struct NebulaStyle {
	/// Stops sorted by offset. Colors are clamped to the first/last stop
	/// outside their range.
	pub stops: Vec<GradientStop>,
}

impl NebulaStyle {
	/// Sample the gradient at `t`.
	pub fn sample(&self, t: f64) -> Color {
		let Some(first) = self.stops.first() else {
			return Color::rgba(0, 0, 0, 0.0);
		};
		if t <= first.offset {
			return first.color;
		}
		for pair in self.stops.windows(2) {
			let (a, b) = (pair[0], pair[1]);
			if t <= b.offset {
				let span = b.offset - a.offset;
				if span <= f64::EPSILON {
					return b.color;
				}
				return a.color.lerp(b.color, (t - a.offset) / span);
			}
		}
		self.stops[self.stops.len() - 1].color
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Preset name.
	pub name: &'static str,
	/// Backdrop gradient stops.
	pub nebula: NebulaStyle,
	/// Star glow and sparkle color; alpha is replaced by brightness.
	pub star: Color,
	/// Shooting star stroke color; alpha is replaced by opacity.
	pub streak: Color,
}

impl Theme {
	/// Purple core fading through teal (default)
	pub fn nebula() -> Self {
		Self {
			name: "nebula",
			nebula: NebulaStyle {
				stops: vec![
					GradientStop::new(0.0, Color::rgba(128, 90, 213, 0.15)),
					GradientStop::new(0.5, Color::rgba(56, 178, 172, 0.08)),
					GradientStop::new(1.0, Color::rgba(0, 0, 0, 0.0)),
				],
			},
			star: Color::rgb(255, 255, 255),
			streak: Color::rgb(255, 255, 255),
		}
	}

	/// Warm colorwash - rose into amber
	pub fn ember() -> Self {
		Self {
			name: "ember",
			nebula: NebulaStyle {
				stops: vec![
					GradientStop::new(0.0, Color::rgba(213, 90, 110, 0.16)),
					GradientStop::new(0.5, Color::rgba(200, 140, 60, 0.07)),
					GradientStop::new(1.0, Color::rgba(0, 0, 0, 0.0)),
				],
			},
			star: Color::rgb(255, 244, 230),
			streak: Color::rgb(255, 220, 190),
		}
	}

	/// Cool colorwash - deep blue into cyan
	pub fn glacier() -> Self {
		Self {
			name: "glacier",
			nebula: NebulaStyle {
				stops: vec![
					GradientStop::new(0.0, Color::rgba(80, 120, 255, 0.16)),
					GradientStop::new(0.5, Color::rgba(60, 190, 220, 0.07)),
					GradientStop::new(1.0, Color::rgba(0, 0, 0, 0.0)),
				],
			},
			star: Color::rgb(235, 245, 255),
			streak: Color::rgb(200, 230, 255),
		}
	}

	/// Look up a preset by name, falling back to the default.
	pub fn by_name(name: &str) -> Self {
		match name {
			"ember" => Self::ember(),
			"glacier" => Self::glacier(),
			"nebula" => Self::nebula(),
			other => {
				log::warn!("starfield: unknown theme '{other}', using default");
				Self::nebula()
			}
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::nebula()
	}
}
