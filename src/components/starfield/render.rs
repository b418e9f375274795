//! Canvas rendering for the starfield.
//!
//! Implements [`Surface`] on a 2D canvas context. The nebula backdrop is
//! painted as a radial gradient into an off-screen canvas once per
//! provisioning and composited with `drawImage` every frame. Star glows are
//! radial gradients, sparkle crosses and shooting stars are plain strokes.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::error::{Result, StarfieldError};
use super::field::Backdrop;
use super::surface::Surface;
use super::theme::Color;

/// Line width of shooting stars.
const STREAK_WIDTH: f64 = 2.0;

/// Canvas-backed render surface.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	backdrop: HtmlCanvasElement,
	backdrop_ctx: CanvasRenderingContext2d,
	backdrop_ready: bool,
	width: f64,
	height: f64,
}

impl CanvasSurface {
	/// Wrap `canvas`, creating the off-screen backdrop cache alongside it.
	pub fn new(document: &Document, canvas: HtmlCanvasElement) -> Result<Self> {
		let ctx = context_2d(&canvas)?;
		let backdrop: HtmlCanvasElement = document
			.create_element("canvas")?
			.dyn_into()
			.map_err(|_| StarfieldError::MissingContext)?;
		let backdrop_ctx = context_2d(&backdrop)?;

		Ok(Self {
			width: canvas.width() as f64,
			height: canvas.height() as f64,
			canvas,
			ctx,
			backdrop,
			backdrop_ctx,
			backdrop_ready: false,
		})
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")?
		.ok_or(StarfieldError::MissingContext)?
		.dyn_into()
		.map_err(|_| StarfieldError::MissingContext)
}

fn rgba(color: Color) -> String {
	format!("rgba({}, {}, {}, {})", color.r, color.g, color.b, color.a)
}

impl Surface for CanvasSurface {
	fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.canvas.set_width(width as u32);
		self.canvas.set_height(height as u32);
		self.backdrop_ready = false;
	}

	fn upload_backdrop(&mut self, backdrop: &Backdrop) {
		self.backdrop.set_width(backdrop.width);
		self.backdrop.set_height(backdrop.height);
		let (inner, outer) = (backdrop.inner, backdrop.outer);
		let gradient = match self
			.backdrop_ctx
			.create_radial_gradient(inner.x, inner.y, inner.r, outer.x, outer.y, outer.r)
		{
			Ok(gradient) => gradient,
			Err(e) => {
				log::warn!("starfield: backdrop gradient failed: {}", StarfieldError::from(e));
				self.backdrop_ready = false;
				return;
			}
		};
		for stop in &backdrop.stops {
			let _ = gradient.add_color_stop(stop.offset.clamp(0.0, 1.0) as f32, &rgba(stop.color));
		}

		#[allow(deprecated)]
		self.backdrop_ctx.set_fill_style(&gradient);
		self.backdrop_ctx
			.fill_rect(0.0, 0.0, backdrop.width as f64, backdrop.height as f64);
		self.backdrop_ready = true;
	}

	fn clear(&mut self) {
		self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
	}

	fn blit_backdrop(&mut self) {
		if self.backdrop_ready {
			let _ = self
				.ctx
				.draw_image_with_html_canvas_element(&self.backdrop, 0.0, 0.0);
		}
	}

	fn glow(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		let size = radius * 2.0;
		if size <= 0.0 || color.a <= 0.0 {
			return;
		}
		let Ok(gradient) = self.ctx.create_radial_gradient(x, y, 0.0, x, y, size) else {
			return;
		};
		let _ = gradient.add_color_stop(0.0, &rgba(color));
		let _ = gradient.add_color_stop(0.5, &rgba(color.with_alpha(color.a * 0.6)));
		let _ = gradient.add_color_stop(1.0, &rgba(color.with_alpha(0.0)));

		#[allow(deprecated)]
		self.ctx.set_fill_style(&gradient);
		self.ctx.fill_rect(x - size, y - size, size * 2.0, size * 2.0);
	}

	fn cross(&mut self, x: f64, y: f64, size: f64, color: Color) {
		self.ctx.set_global_alpha(color.a);
		self.ctx.set_stroke_style_str(&color.with_alpha(1.0).to_css());
		self.ctx.set_line_width(1.0);

		self.ctx.begin_path();
		self.ctx.move_to(x - size, y);
		self.ctx.line_to(x + size, y);
		self.ctx.move_to(x, y - size);
		self.ctx.line_to(x, y + size);
		self.ctx.stroke();

		self.ctx.begin_path();
		self.ctx.move_to(x - size, y - size);
		self.ctx.line_to(x + size, y + size);
		self.ctx.move_to(x - size, y + size);
		self.ctx.line_to(x + size, y - size);
		self.ctx.stroke();

		self.ctx.set_global_alpha(1.0);
	}

	fn streak(&mut self, head: (f64, f64), tail: (f64, f64), color: Color) {
		self.ctx.set_stroke_style_str(&rgba(color));
		self.ctx.set_line_width(STREAK_WIDTH);
		self.ctx.begin_path();
		self.ctx.move_to(head.0, head.1);
		self.ctx.line_to(tail.0, tail.1);
		self.ctx.stroke();
	}
}
