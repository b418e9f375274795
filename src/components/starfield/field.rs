//! Procedural generation of the star population and the nebula backdrop.
//!
//! [`provision`] is the only entry point. It is called on first layout and
//! again on every resize, and always returns a completely fresh field; the
//! caller throws the old one away.

use rand::Rng;

use super::config::StarfieldConfig;
use super::error::{Result, StarfieldError};
use super::particles::{Particle, RenderStyle};
use super::theme::{GradientStop, NebulaStyle, Theme};

/// Radius of the inner gradient circle, in pixels.
const INNER_RADIUS: f64 = 100.0;

/// A circle of the nebula gradient: center and radius, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
	/// Center x.
	pub x: f64,
	/// Center y.
	pub y: f64,
	/// Radius.
	pub r: f64,
}

/// Nebula backdrop for one surface size.
///
/// A two-circle radial gradient in the shape canvas `createRadialGradient`
/// takes. The surface paints it once into its own cache on upload and only
/// blits that cache afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Backdrop {
	/// Surface width in pixels.
	pub width: u32,
	/// Surface height in pixels.
	pub height: u32,
	/// Start circle, up and to the right of center.
	pub inner: Circle,
	/// End circle, centered and spanning most of the width.
	pub outer: Circle,
	/// Color stops along the gradient.
	pub stops: Vec<GradientStop>,
}

impl Backdrop {
	/// Lay out the gradient for a `width` x `height` surface.
	pub fn new(width: u32, height: u32, nebula: &NebulaStyle) -> Self {
		let (w, h) = (width as f64, height as f64);
		Self {
			width,
			height,
			inner: Circle {
				x: w * 0.7,
				y: h * 0.3,
				r: INNER_RADIUS,
			},
			outer: Circle {
				x: w * 0.5,
				y: h * 0.5,
				r: w * 0.8,
			},
			stops: nebula.stops.clone(),
		}
	}
}

/// Backdrop plus the full star population for one surface size.
#[derive(Clone, Debug)]
pub struct Field {
	/// Nebula gradient for this surface size.
	pub backdrop: Backdrop,
	/// Fresh star population.
	pub particles: Vec<Particle>,
}

/// Generate a fresh field for a `width` x `height` surface.
///
/// Draws are not seeded by contract: two calls with the same size give
/// statistically similar, different populations.
pub fn provision<R: Rng + ?Sized>(
	width: f64,
	height: f64,
	config: &StarfieldConfig,
	theme: &Theme,
	rng: &mut R,
) -> Result<Field> {
	if !(width.is_finite() && height.is_finite()) || width < 1.0 || height < 1.0 {
		return Err(StarfieldError::InvalidDimensions { width, height });
	}

	let backdrop = Backdrop::new(width as u32, height as u32, &theme.nebula);
	let count = config.star_count(width);
	let particles = (0..count)
		.map(|_| spawn_particle(width, height, config, rng))
		.collect();

	Ok(Field {
		backdrop,
		particles,
	})
}

fn spawn_particle<R: Rng + ?Sized>(
	width: f64,
	height: f64,
	config: &StarfieldConfig,
	rng: &mut R,
) -> Particle {
	let sparkle = rng.gen_bool(config.sparkle_probability.clamp(0.0, 1.0));
	let radius = if sparkle {
		config.sparkle_radius.sample(rng)
	} else {
		config.dot_radius.sample(rng)
	};
	let magnitude = config.twinkle_step.sample(rng);
	let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };

	Particle {
		x: rng.r#gen::<f64>() * width,
		y: rng.r#gen::<f64>() * height,
		radius,
		brightness: rng.r#gen::<f64>(),
		brightness_step: magnitude * sign,
		vx: config.drift.sample(rng),
		vy: config.drift.sample(rng),
		layer: rng.gen_range(1..=3),
		sparkle,
		style: RenderStyle::Glow,
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn generate(width: f64, height: f64, seed: u64) -> Result<Field> {
		let mut rng = SmallRng::seed_from_u64(seed);
		provision(
			width,
			height,
			&StarfieldConfig::default(),
			&Theme::default(),
			&mut rng,
		)
	}

	#[test]
	fn test_count_follows_density_tier() {
		assert_eq!(generate(500.0, 400.0, 1).unwrap().particles.len(), 120);
		assert_eq!(generate(1024.0, 400.0, 1).unwrap().particles.len(), 250);
	}

	#[test]
	fn test_particles_respect_ranges() {
		let config = StarfieldConfig::default();
		let field = generate(1280.0, 720.0, 7).unwrap();
		for p in &field.particles {
			assert!((0.0..1280.0).contains(&p.x));
			assert!((0.0..720.0).contains(&p.y));
			assert!((0.0..=1.0).contains(&p.brightness));
			assert!(config.twinkle_step.contains(p.brightness_step.abs()));
			assert!(config.drift.contains(p.vx));
			assert!(config.drift.contains(p.vy));
			assert!((1..=3).contains(&p.layer));
			if p.sparkle {
				assert!(config.sparkle_radius.contains(p.radius));
			} else {
				assert!(config.dot_radius.contains(p.radius));
			}
		}
	}

	#[test]
	fn test_population_mixes_kinds_and_layers() {
		let field = generate(1920.0, 1080.0, 3).unwrap();
		let sparkles = field.particles.iter().filter(|p| p.sparkle).count();
		// 12% of 250 is 30; a seeded draw lands well inside this band
		assert!((5..=70).contains(&sparkles));
		for layer in 1..=3 {
			assert!(field.particles.iter().any(|p| p.layer == layer));
		}
		assert!(field.particles.iter().any(|p| p.brightness_step > 0.0));
		assert!(field.particles.iter().any(|p| p.brightness_step < 0.0));
	}

	#[test]
	fn test_repeated_provisioning_differs() {
		let mut rng = SmallRng::seed_from_u64(11);
		let (config, theme) = (StarfieldConfig::default(), Theme::default());
		let a = provision(800.0, 600.0, &config, &theme, &mut rng).unwrap();
		let b = provision(800.0, 600.0, &config, &theme, &mut rng).unwrap();
		assert_eq!(a.particles.len(), b.particles.len());
		assert_ne!(a.particles, b.particles);
		assert_eq!(a.backdrop, b.backdrop);
	}

	#[test]
	fn test_invalid_dimensions_rejected() {
		for (w, h) in [(0.0, 600.0), (800.0, -1.0), (f64::NAN, 10.0), (0.5, 0.5)] {
			assert!(matches!(
				generate(w, h, 1),
				Err(StarfieldError::InvalidDimensions { .. })
			));
		}
	}

	#[test]
	fn test_backdrop_is_laid_out_for_surface() {
		let backdrop = generate(320.0, 200.0, 1).unwrap().backdrop;
		assert_eq!((backdrop.width, backdrop.height), (320, 200));
		let inner = Circle {
			x: 320.0 * 0.7,
			y: 200.0 * 0.3,
			r: 100.0,
		};
		let outer = Circle {
			x: 160.0,
			y: 100.0,
			r: 320.0 * 0.8,
		};
		assert_eq!(backdrop.inner, inner);
		assert_eq!(backdrop.outer, outer);
		assert_eq!(backdrop.stops, Theme::nebula().nebula.stops);
	}

	#[test]
	fn test_backdrop_size_does_not_grow_with_surface() {
		let nebula = Theme::nebula().nebula;
		let small = Backdrop::new(320, 200, &nebula);
		let huge = Backdrop::new(3840, 2160, &nebula);
		assert_eq!(huge.stops.len(), small.stops.len());
		assert_eq!(huge.outer.r, 3840.0 * 0.8);
	}

	/// Reference evaluation of the two-point conical gradient canvas applies
	/// to `createRadialGradient`, used to check the layout paints as intended.
	///
	/// Solves |p - c(t)| = r(t) and keeps the largest root with r(t) >= 0.
	fn resolve(inner: Circle, outer: Circle, x: f64, y: f64) -> Option<f64> {
		let (cdx, cdy, dr) = (outer.x - inner.x, outer.y - inner.y, outer.r - inner.r);
		let (pdx, pdy) = (x - inner.x, y - inner.y);

		let a = cdx * cdx + cdy * cdy - dr * dr;
		let b = pdx * cdx + pdy * cdy + inner.r * dr;
		let c = pdx * pdx + pdy * pdy - inner.r * inner.r;
		let radius_ok = |t: f64| inner.r + t * dr >= 0.0;

		if a.abs() < 1e-9 {
			if b.abs() < 1e-9 {
				return None;
			}
			let t = c / (2.0 * b);
			return radius_ok(t).then_some(t);
		}

		let disc = b * b - a * c;
		if disc < 0.0 {
			return None;
		}
		let root = disc.sqrt();
		let (t1, t2) = ((b + root) / a, (b - root) / a);
		let (hi, lo) = if t1 >= t2 { (t1, t2) } else { (t2, t1) };
		[hi, lo].into_iter().find(|&t| radius_ok(t))
	}

	fn alpha_at(backdrop: &Backdrop, x: f64, y: f64) -> f64 {
		let style = NebulaStyle {
			stops: backdrop.stops.clone(),
		};
		resolve(backdrop.inner, backdrop.outer, x, y).map_or(0.0, |t| style.sample(t).a)
	}

	#[test]
	fn test_backdrop_glows_near_inner_circle() {
		let nebula = Theme::nebula().nebula;
		let backdrop = Backdrop::new(1000, 800, &nebula);

		// Inside the inner circle the gradient pads to the first stop.
		let core = alpha_at(&backdrop, 700.5, 240.5);
		assert_eq!(core, nebula.stops[0].color.a);

		// Alpha falls off from the core toward the far corner.
		let mid = alpha_at(&backdrop, 400.5, 400.5);
		let corner = alpha_at(&backdrop, 0.5, 799.5);
		assert!(corner < mid);
		assert!(mid < core);
	}

	#[test]
	fn test_backdrop_transparent_beyond_outer_circle() {
		// Tall and narrow: the bottom corner is far outside the outer circle.
		let backdrop = Backdrop::new(100, 1000, &Theme::nebula().nebula);
		assert_eq!(alpha_at(&backdrop, 0.5, 999.5), 0.0);
	}

	#[test]
	fn test_conical_resolve_on_circles() {
		let inner = Circle {
			x: 0.0,
			y: 0.0,
			r: 10.0,
		};
		let outer = Circle {
			x: 0.0,
			y: 0.0,
			r: 110.0,
		};
		assert!((resolve(inner, outer, 10.0, 0.0).unwrap() - 0.0).abs() < 1e-9);
		assert!((resolve(inner, outer, 60.0, 0.0).unwrap() - 0.5).abs() < 1e-9);
		assert!((resolve(inner, outer, 0.0, 110.0).unwrap() - 1.0).abs() < 1e-9);
	}
}
