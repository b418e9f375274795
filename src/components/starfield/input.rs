//! Scroll and pointer input, decoupled from the render step.
//!
//! Browser events write raw values here as they arrive. The frame stepper
//! reads them once per tick; the pointer is eased toward its latest target
//! so parallax never jumps.

/// Latest scroll offset plus an exponentially smoothed pointer offset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputState {
	scroll: f64,
	target: (f64, f64),
	pointer: (f64, f64),
	smoothing: f64,
}

impl InputState {
	/// `smoothing` is the fraction of the remaining distance covered per tick.
	pub fn new(smoothing: f64) -> Self {
		Self {
			smoothing: smoothing.clamp(0.0, 1.0),
			..Self::default()
		}
	}

	/// Record the raw page scroll offset, in pixels.
	pub fn set_scroll(&mut self, offset: f64) {
		if offset.is_finite() {
			self.scroll = offset;
		}
	}

	/// Record the raw pointer offset, already normalized to -0.5..=0.5.
	pub fn set_pointer(&mut self, x: f64, y: f64) {
		if x.is_finite() && y.is_finite() {
			self.target = (x.clamp(-0.5, 0.5), y.clamp(-0.5, 0.5));
		}
	}

	/// Ease the smoothed pointer toward the latest target. Once per tick.
	pub fn advance(&mut self) {
		self.pointer.0 += (self.target.0 - self.pointer.0) * self.smoothing;
		self.pointer.1 += (self.target.1 - self.pointer.1) * self.smoothing;
	}

	/// Latest scroll offset, unsmoothed.
	pub fn current_scroll(&self) -> f64 {
		self.scroll
	}

	/// Pointer offset after easing, -0.5..=0.5 per axis.
	pub fn smoothed_pointer(&self) -> (f64, f64) {
		self.pointer
	}

	#[cfg(test)]
	fn pointer_target(&self) -> (f64, f64) {
		self.target
	}
}

/// Map client coordinates to a viewport-relative offset in -0.5..=0.5.
pub fn normalize_pointer(client_x: f64, client_y: f64, width: f64, height: f64) -> (f64, f64) {
	let axis = |v: f64, extent: f64| {
		if extent > 0.0 {
			(v / extent - 0.5).clamp(-0.5, 0.5)
		} else {
			0.0
		}
	};
	(axis(client_x, width), axis(client_y, height))
}
