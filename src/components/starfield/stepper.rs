//! One tick of the starfield: advance state, then repaint.
//!
//! Stars twinkle, drift by layer and wrap; they are drawn at a parallax
//! offset derived from scroll and the smoothed pointer, which never touches
//! the stored position. Shooting stars move, fade and are retired, and with
//! a small chance a new one is born.

use rand::Rng;

use super::config::StarfieldConfig;
use super::input::InputState;
use super::particles::{ParticleStore, RenderStyle, Streak};
use super::surface::Surface;
use super::theme::Theme;

/// What a single tick put on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
	/// Stars drawn.
	pub stars: usize,
	/// Sparkle crosses drawn.
	pub crosses: usize,
	/// Shooting stars drawn.
	pub streaks: usize,
}

/// Advance the store by one tick and draw it onto `surface`.
pub fn step<S, R>(
	store: &mut ParticleStore,
	input: &InputState,
	config: &StarfieldConfig,
	theme: &Theme,
	rng: &mut R,
	surface: &mut S,
) -> FrameStats
where
	S: Surface + ?Sized,
	R: Rng + ?Sized,
{
	let mut stats = FrameStats::default();
	let (width, height) = (store.width(), store.height());
	let scroll = input.current_scroll();
	let pointer = input.smoothed_pointer();

	surface.clear();
	surface.blit_backdrop();

	for p in store.particles_mut() {
		p.twinkle();
		p.drift(width, height);

		let (x, y) = p.parallax_position(scroll, pointer, config);
		p.style = if p.sparkle && rng.gen_bool(0.5) {
			RenderStyle::GlowCross
		} else {
			RenderStyle::Glow
		};

		let color = theme.star.with_alpha(p.brightness);
		surface.glow(x, y, p.radius, color);
		if p.style == RenderStyle::GlowCross {
			surface.cross(x, y, p.radius * 2.0, color);
			stats.crosses += 1;
		}
		stats.stars += 1;
	}

	store.advance_streaks(config.streak_fade);
	if width > 0.0 && rng.gen_bool(config.streak_probability.clamp(0.0, 1.0)) {
		store.push_streak(Streak::spawn(width, config, rng));
	}

	for s in store.streaks() {
		surface.streak((s.x, s.y), s.tail(), theme.streak.with_alpha(s.opacity));
		stats.streaks += 1;
	}

	stats
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::super::field::provision;
	use super::super::surface::recording::{Op, RecordingSurface};
	use super::*;

	fn setup(width: f64, height: f64, seed: u64) -> (ParticleStore, SmallRng) {
		let mut rng = SmallRng::seed_from_u64(seed);
		let field = provision(
			width,
			height,
			&StarfieldConfig::default(),
			&Theme::default(),
			&mut rng,
		)
		.unwrap();
		(ParticleStore::new(field.particles, width, height), rng)
	}

	#[test]
	fn test_invariants_hold_over_many_ticks() {
		let config = StarfieldConfig {
			streak_probability: 0.05,
			..StarfieldConfig::default()
		};
		let theme = Theme::default();
		let (mut store, mut rng) = setup(640.0, 480.0, 5);
		let mut input = InputState::new(config.pointer_smoothing);
		let mut surface = RecordingSurface::default();

		for tick in 0..2_000 {
			input.set_scroll(tick as f64);
			input.set_pointer(0.3, -0.2);
			input.advance();
			step(&mut store, &input, &config, &theme, &mut rng, &mut surface);
			surface.ops.clear();

			for p in store.particles() {
				assert!((0.0..=1.0).contains(&p.brightness));
				assert!((0.0..640.0).contains(&p.x));
				assert!((0.0..480.0).contains(&p.y));
			}
			for s in store.streaks() {
				assert!(s.opacity > 0.0);
			}
		}
	}

	#[test]
	fn test_draw_order() {
		let config = StarfieldConfig {
			streak_probability: 1.0,
			..StarfieldConfig::default()
		};
		let (mut store, mut rng) = setup(500.0, 500.0, 9);
		let input = InputState::new(config.pointer_smoothing);
		let mut surface = RecordingSurface::default();

		let stats = step(
			&mut store,
			&input,
			&config,
			&Theme::default(),
			&mut rng,
			&mut surface,
		);

		assert_eq!(surface.ops[0], Op::Clear);
		assert_eq!(surface.ops[1], Op::Blit);
		assert!(matches!(surface.ops.last(), Some(Op::Streak { .. })));
		let first_streak = surface
			.ops
			.iter()
			.position(|op| matches!(op, Op::Streak { .. }))
			.unwrap();
		assert!(
			surface.ops[..first_streak]
				.iter()
				.skip(2)
				.all(|op| matches!(op, Op::Glow { .. } | Op::Cross { .. }))
		);
		assert_eq!(stats.stars, 120);
		assert_eq!(stats.streaks, 1);
	}

	#[test]
	fn test_neutral_input_draws_at_stored_positions() {
		let config = StarfieldConfig::default();
		let (mut store, mut rng) = setup(700.0, 500.0, 21);
		let input = InputState::new(config.pointer_smoothing);
		let mut surface = RecordingSurface::default();

		step(
			&mut store,
			&input,
			&config,
			&Theme::default(),
			&mut rng,
			&mut surface,
		);

		let glows: Vec<(f64, f64)> = surface
			.ops
			.iter()
			.filter_map(|op| match op {
				Op::Glow { x, y, .. } => Some((*x, *y)),
				_ => None,
			})
			.collect();
		let stored: Vec<(f64, f64)> = store.particles().iter().map(|p| (p.x, p.y)).collect();
		assert_eq!(glows, stored);
	}

	#[test]
	fn test_only_sparkles_cross_and_they_flicker() {
		let config = StarfieldConfig {
			sparkle_probability: 0.5,
			..StarfieldConfig::default()
		};
		let theme = Theme::default();
		let (mut store, mut rng) = setup(1200.0, 800.0, 2);
		let input = InputState::new(config.pointer_smoothing);
		let mut surface = RecordingSurface::default();

		let sparkles = store.particles().iter().filter(|p| p.sparkle).count();
		let mut crosses = 0;
		for _ in 0..50 {
			let stats = step(&mut store, &input, &config, &theme, &mut rng, &mut surface);
			for p in store.particles() {
				if !p.sparkle {
					assert_eq!(p.style, RenderStyle::Glow);
				}
			}
			assert!(stats.crosses <= sparkles);
			crosses += stats.crosses;
		}
		let ratio = crosses as f64 / (sparkles * 50) as f64;
		assert!((0.4..0.6).contains(&ratio));
	}

	#[test]
	fn test_expired_streak_not_rendered_next_tick() {
		let config = StarfieldConfig {
			streak_probability: 0.0,
			..StarfieldConfig::default()
		};
		let theme = Theme::default();
		let (mut store, mut rng) = setup(2000.0, 2000.0, 4);
		store.push_streak(Streak {
			x: 100.0,
			y: 0.0,
			length: 150.0,
			speed: 1.0,
			angle: config.streak_angle,
			opacity: 0.015,
		});
		let input = InputState::new(config.pointer_smoothing);
		let mut surface = RecordingSurface::default();

		let first = step(&mut store, &input, &config, &theme, &mut rng, &mut surface);
		assert_eq!(first.streaks, 1);
		let second = step(&mut store, &input, &config, &theme, &mut rng, &mut surface);
		assert_eq!(second.streaks, 0);
		assert!(store.streaks().is_empty());
	}
}
