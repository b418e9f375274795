//! Drawing primitives the frame stepper issues each tick.

use super::field::Backdrop;
use super::theme::Color;

/// A 2D drawable area sized to the viewport.
///
/// Each tick is a full repaint: `clear`, `blit_backdrop`, then per-star and
/// per-streak primitives. The backdrop is uploaded once per provisioning and
/// blitted from the surface's own cache afterwards.
pub trait Surface {
	/// Resize the drawable area and drop any cached backdrop.
	fn resize(&mut self, width: f64, height: f64);

	/// Cache a freshly generated backdrop for later blits.
	fn upload_backdrop(&mut self, backdrop: &Backdrop);

	/// Wipe the whole surface.
	fn clear(&mut self);

	/// Copy the cached backdrop onto the surface.
	fn blit_backdrop(&mut self);

	/// Soft radial glow centered on (x, y). `color.a` carries brightness.
	fn glow(&mut self, x: f64, y: f64, radius: f64, color: Color);

	/// Plus and diagonal strokes of half-length `size` centered on (x, y).
	fn cross(&mut self, x: f64, y: f64, size: f64, color: Color);

	/// Straight line from `head` to `tail`.
	fn streak(&mut self, head: (f64, f64), tail: (f64, f64), color: Color);
}

/// Surface that records every call. Used by tests.
#[cfg(test)]
pub mod recording {
	use super::*;

	#[derive(Clone, Debug, PartialEq)]
	pub enum Op {
		Resize(f64, f64),
		Upload(u32, u32),
		Clear,
		Blit,
		Glow { x: f64, y: f64, radius: f64, alpha: f64 },
		Cross { x: f64, y: f64, size: f64, alpha: f64 },
		Streak { head: (f64, f64), tail: (f64, f64), alpha: f64 },
	}

	#[derive(Debug, Default)]
	pub struct RecordingSurface {
		pub ops: Vec<Op>,
	}

	impl RecordingSurface {
		/// Operations issued since the most recent `Clear`.
		pub fn last_frame(&self) -> &[Op] {
			let start = self
				.ops
				.iter()
				.rposition(|op| *op == Op::Clear)
				.unwrap_or(0);
			&self.ops[start..]
		}

		pub fn frames(&self) -> usize {
			self.ops.iter().filter(|op| **op == Op::Clear).count()
		}
	}

	impl Surface for RecordingSurface {
		fn resize(&mut self, width: f64, height: f64) {
			self.ops.push(Op::Resize(width, height));
		}

		fn upload_backdrop(&mut self, backdrop: &Backdrop) {
			self.ops.push(Op::Upload(backdrop.width, backdrop.height));
		}

		fn clear(&mut self) {
			self.ops.push(Op::Clear);
		}

		fn blit_backdrop(&mut self) {
			self.ops.push(Op::Blit);
		}

		fn glow(&mut self, x: f64, y: f64, radius: f64, color: Color) {
			self.ops.push(Op::Glow {
				x,
				y,
				radius,
				alpha: color.a,
			});
		}

		fn cross(&mut self, x: f64, y: f64, size: f64, color: Color) {
			self.ops.push(Op::Cross {
				x,
				y,
				size,
				alpha: color.a,
			});
		}

		fn streak(&mut self, head: (f64, f64), tail: (f64, f64), color: Color) {
			self.ops.push(Op::Streak {
				head,
				tail,
				alpha: color.a,
			});
		}
	}
}
