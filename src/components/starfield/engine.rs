//! The starfield engine: owns all animation state and its lifecycle.
//!
//! One instance is created when the host page mounts the background. Browser
//! callbacks feed it input through the `on_*` methods; the [`Timer`] drives
//! [`Starfield::on_timer`], which runs exactly one tick per accepted callback
//! and only then schedules the next.

use log::{debug, info, trace};
use rand::Rng;

use super::config::StarfieldConfig;
use super::field;
use super::input::InputState;
use super::particles::ParticleStore;
use super::scheduler::{LoopState, TickToken, Ticker, Timer};
use super::stepper::{self, FrameStats};
use super::surface::Surface;
use super::theme::Theme;

/// Animated starfield bound to a render surface.
pub struct Starfield<S: Surface, R: Rng> {
	surface: S,
	rng: R,
	config: StarfieldConfig,
	theme: Theme,
	input: InputState,
	store: ParticleStore,
	ticker: Ticker,
	frames: u64,
}

impl<S: Surface, R: Rng> Starfield<S, R> {
	/// Create a stopped engine with an empty field. Call [`Self::on_resize`]
	/// with the viewport size to populate it.
	pub fn new(surface: S, config: StarfieldConfig, theme: Theme, rng: R) -> Self {
		Self {
			surface,
			rng,
			input: InputState::new(config.pointer_smoothing),
			ticker: Ticker::new(config.frame_interval_ms()),
			store: ParticleStore::default(),
			frames: 0,
			config,
			theme,
		}
	}

	/// Begin ticking. Idempotent while running.
	pub fn start<T: Timer + ?Sized>(&mut self, timer: &mut T) {
		if self.ticker.start(timer) {
			info!(
				"starfield: started at {:.0} fps cap",
				1000.0 / self.ticker.interval_ms().max(1.0)
			);
		}
	}

	/// Halt ticking before the next scheduled frame. State is kept.
	pub fn stop(&mut self) {
		if self.ticker.stop() {
			info!("starfield: stopped after {} frames", self.frames);
		}
	}

	/// Whether the loop is running.
	pub fn state(&self) -> LoopState {
		self.ticker.state()
	}

	/// Timer callback. Runs one tick if the token belongs to the live
	/// schedule, then queues the next. Returns whether a tick ran.
	pub fn on_timer<T: Timer + ?Sized>(&mut self, token: TickToken, timer: &mut T) -> bool {
		if !self.ticker.accepts(token) {
			return false;
		}
		let stats = self.tick();
		trace!(
			"starfield: frame {} ({} stars, {} crosses, {} streaks)",
			self.frames, stats.stars, stats.crosses, stats.streaks
		);
		self.ticker.reschedule(timer);
		true
	}

	/// Advance input smoothing and step the field once.
	pub fn tick(&mut self) -> FrameStats {
		self.input.advance();
		self.frames += 1;
		stepper::step(
			&mut self.store,
			&self.input,
			&self.config,
			&self.theme,
			&mut self.rng,
			&mut self.surface,
		)
	}

	/// Regenerate backdrop and population for a new viewport size.
	///
	/// Invalid sizes are skipped and the previous field stays in place until
	/// a usable size arrives.
	pub fn on_resize(&mut self, width: f64, height: f64) {
		match field::provision(width, height, &self.config, &self.theme, &mut self.rng) {
			Ok(field) => {
				info!(
					"starfield: provisioned {} stars for {}x{}",
					field.particles.len(),
					width,
					height
				);
				self.surface.resize(width, height);
				self.surface.upload_backdrop(&field.backdrop);
				self.store = ParticleStore::new(field.particles, width, height);
			}
			Err(e) => debug!("starfield: skipping provisioning: {e}"),
		}
	}

	/// Page scrolled to `offset` pixels.
	pub fn on_scroll(&mut self, offset: f64) {
		self.input.set_scroll(offset);
	}

	/// Pointer moved; `x` and `y` are viewport-relative in -0.5..=0.5.
	pub fn on_pointer_move(&mut self, x: f64, y: f64) {
		self.input.set_pointer(x, y);
	}

	/// Current stars and shooting stars.
	pub fn store(&self) -> &ParticleStore {
		&self.store
	}

	/// Current input state.
	pub fn input(&self) -> &InputState {
		&self.input
	}

	/// The render surface.
	pub fn surface(&self) -> &S {
		&self.surface
	}

	/// Active configuration.
	pub fn config(&self) -> &StarfieldConfig {
		&self.config
	}

	/// Frames rendered since creation.
	pub fn frames(&self) -> u64 {
		self.frames
	}
}
