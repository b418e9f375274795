//! Live star and shooting-star state.
//!
//! The store is replaced wholesale on every provisioning and mutated in place
//! by the frame stepper, once per tick. Nothing else writes to it.

use rand::Rng;

use super::config::StarfieldConfig;

/// How a star is drawn on a given tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderStyle {
	/// Soft radial glow only.
	#[default]
	Glow,
	/// Glow with a plus-and-diagonal cross stroked over it.
	GlowCross,
}

/// A single background star.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Stored x, before parallax.
	pub x: f64,
	/// Stored y, before parallax.
	pub y: f64,
	/// Glow radius in pixels.
	pub radius: f64,
	/// Current brightness, always within 0.0..=1.0.
	pub brightness: f64,
	/// Signed brightness change applied each tick.
	pub brightness_step: f64,
	/// Horizontal drift per tick at layer 1.
	pub vx: f64,
	/// Vertical drift per tick at layer 1.
	pub vy: f64,
	/// Depth layer, 1..=3. Scales drift speed and parallax.
	pub layer: u8,
	/// Large star that may flicker into a cross.
	pub sparkle: bool,
	/// Style chosen on the most recent tick.
	pub style: RenderStyle,
}

impl Particle {
	/// Advance brightness by one step, reflecting off 0 and 1.
	///
	/// Crossing a bound flips the step sign exactly once, so brightness
	/// pendulums instead of sticking at the edge.
	pub fn twinkle(&mut self) {
		let next = self.brightness + self.brightness_step;
		self.brightness = if next > 1.0 {
			self.brightness_step = -self.brightness_step;
			2.0 - next
		} else if next < 0.0 {
			self.brightness_step = -self.brightness_step;
			-next
		} else {
			next
		}
		.clamp(0.0, 1.0);
	}

	/// Drift by the velocity scaled by depth layer, then wrap into bounds.
	pub fn drift(&mut self, width: f64, height: f64) {
		let layer = self.layer as f64;
		self.x = wrap(self.x + self.vx * layer, width);
		self.y = wrap(self.y + self.vy * layer, height);
	}

	/// Screen position after parallax. The stored position is untouched.
	pub fn parallax_position(
		&self,
		scroll: f64,
		pointer: (f64, f64),
		config: &StarfieldConfig,
	) -> (f64, f64) {
		let layer = self.layer as f64;
		(
			self.x
				+ scroll * (layer * config.scroll_parallax.x)
				+ pointer.0 * layer * config.pointer_parallax.x,
			self.y
				+ scroll * (layer * config.scroll_parallax.y)
				+ pointer.1 * layer * config.pointer_parallax.y,
		)
	}
}

/// Wrap a coordinate into `[0, extent)`.
fn wrap(value: f64, extent: f64) -> f64 {
	if extent <= 0.0 {
		return 0.0;
	}
	if (0.0..extent).contains(&value) {
		return value;
	}
	let wrapped = value.rem_euclid(extent);
	// rem_euclid of a tiny negative rounds up to `extent` itself
	if wrapped >= extent { 0.0 } else { wrapped }
}

/// A shooting star.
#[derive(Clone, Debug, PartialEq)]
pub struct Streak {
	/// Head x.
	pub x: f64,
	/// Head y.
	pub y: f64,
	/// Line length in pixels.
	pub length: f64,
	/// Distance moved per tick.
	pub speed: f64,
	/// Travel direction in radians.
	pub angle: f64,
	/// Starts at 1 and fades every tick.
	pub opacity: f64,
}

impl Streak {
	/// Spawn at the top edge at a random x.
	pub fn spawn<R: Rng + ?Sized>(width: f64, config: &StarfieldConfig, rng: &mut R) -> Self {
		Self {
			x: rng.r#gen::<f64>() * width,
			y: 0.0,
			length: config.streak_length.sample(rng),
			speed: config.streak_speed.sample(rng),
			angle: config.streak_angle,
			opacity: 1.0,
		}
	}

	/// Tail end of the line, trailing behind the head.
	pub fn tail(&self) -> (f64, f64) {
		(
			self.x - self.length * self.angle.cos(),
			self.y - self.length * self.angle.sin(),
		)
	}

	/// Move along the travel angle and fade.
	pub fn advance(&mut self, fade: f64) {
		self.x += self.speed * self.angle.cos();
		self.y += self.speed * self.angle.sin();
		self.opacity -= fade;
	}

	/// Fully faded, or the whole line has left the surface.
	pub fn is_spent(&self, width: f64, height: f64) -> bool {
		if self.opacity <= 0.0 {
			return true;
		}
		let (tx, ty) = self.tail();
		let (min_x, max_x) = (self.x.min(tx), self.x.max(tx));
		let (min_y, max_y) = (self.y.min(ty), self.y.max(ty));
		max_x < 0.0 || min_x > width || max_y < 0.0 || min_y > height
	}
}

/// Owns every star and the transient shooting-star pool.
#[derive(Clone, Debug, Default)]
pub struct ParticleStore {
	particles: Vec<Particle>,
	streaks: Vec<Streak>,
	width: f64,
	height: f64,
}

impl ParticleStore {
	/// Store for a `width` x `height` surface with no shooting stars yet.
	pub fn new(particles: Vec<Particle>, width: f64, height: f64) -> Self {
		Self {
			particles,
			streaks: Vec::new(),
			width,
			height,
		}
	}

	/// All stars.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Live shooting stars.
	pub fn streaks(&self) -> &[Streak] {
		&self.streaks
	}

	/// Surface width the population was provisioned for.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Surface height the population was provisioned for.
	pub fn height(&self) -> f64 {
		self.height
	}

	pub(super) fn particles_mut(&mut self) -> &mut [Particle] {
		&mut self.particles
	}

	/// Advance every streak and drop the spent ones.
	pub(super) fn advance_streaks(&mut self, fade: f64) {
		let (width, height) = (self.width, self.height);
		self.streaks.retain_mut(|s| {
			s.advance(fade);
			!s.is_spent(width, height)
		});
	}

	pub(super) fn push_streak(&mut self, streak: Streak) {
		self.streaks.push(streak);
	}
}
