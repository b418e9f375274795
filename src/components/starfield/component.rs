//! Leptos component hosting the starfield behind page content.
//!
//! The component renders a fixed, full-viewport canvas that ignores pointer
//! events, builds a [`Starfield`] on it once mounted, and wires window
//! scroll, mousemove and (debounced) resize listeners into the engine. Frames
//! are paced with `setTimeout` followed by `requestAnimationFrame`, scheduled
//! only after the previous frame finished.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, HtmlCanvasElement, MouseEvent, Window};

use super::config::StarfieldConfig;
use super::engine::Starfield;
use super::error::{Result, StarfieldError};
use super::input::normalize_pointer;
use super::render::CanvasSurface;
use super::scheduler::{TickToken, Timer};
use super::theme::Theme;

type SharedEngine = Rc<RefCell<Option<Starfield<CanvasSurface, SmallRng>>>>;

/// Window listeners kept alive for as long as the component is.
struct Listeners {
	_resize: Closure<dyn FnMut()>,
	_scroll: Closure<dyn FnMut()>,
	_pointer: Closure<dyn FnMut(MouseEvent)>,
}

/// [`Timer`] backed by `setTimeout` + `requestAnimationFrame`.
struct BrowserTimer {
	engine: SharedEngine,
}

impl Timer for BrowserTimer {
	fn schedule(&mut self, delay_ms: f64, token: TickToken) {
		let Some(window) = web_sys::window() else {
			return;
		};
		let engine = self.engine.clone();
		let on_frame = Closure::once_into_js(move || run_frame(&engine, token));
		let on_timeout = Closure::once_into_js(move || {
			if let Some(window) = web_sys::window() {
				let _ = window.request_animation_frame(on_frame.unchecked_ref());
			}
		});
		if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
			on_timeout.unchecked_ref(),
			delay_ms.round() as i32,
		) {
			warn!("starfield: could not schedule frame: {}", StarfieldError::from(e));
		}
	}
}

fn run_frame(engine: &SharedEngine, token: TickToken) {
	let mut timer = BrowserTimer {
		engine: engine.clone(),
	};
	if let Some(ref mut starfield) = *engine.borrow_mut() {
		starfield.on_timer(token, &mut timer);
	}
}

fn viewport(window: &Window) -> Result<(f64, f64)> {
	let width = window.inner_width()?.as_f64();
	let height = window.inner_height()?.as_f64();
	match (width, height) {
		(Some(w), Some(h)) => Ok((w, h)),
		_ => Err(StarfieldError::Js("viewport size is not a number".into())),
	}
}

/// Renders the animated starfield as a page background.
///
/// Pass a [`StarfieldConfig`] to override the defaults; with
/// `enabled = false` the canvas stays blank and no loop is started.
#[component]
pub fn StarfieldCanvas(#[prop(optional)] config: Option<StarfieldConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let engine: SharedEngine = Rc::new(RefCell::new(None));
	let listeners: Rc<RefCell<Option<Listeners>>> = Rc::new(RefCell::new(None));
	let config = config.unwrap_or_default();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if engine.borrow().is_some() {
			return;
		}
		if !config.enabled {
			info!("starfield: disabled by configuration");
			return;
		}
		if let Err(e) = mount(canvas, config.clone(), &engine, &listeners) {
			warn!("starfield: background disabled: {e}");
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="starfield-canvas"
			aria-hidden="true"
			style="position: fixed; inset: 0; display: block; z-index: -1; pointer-events: none;"
		/>
	}
}

/// Build the engine on `canvas`, attach listeners and start the loop.
fn mount(
	canvas: HtmlCanvasElement,
	config: StarfieldConfig,
	engine: &SharedEngine,
	listeners: &Rc<RefCell<Option<Listeners>>>,
) -> Result<()> {
	let window = web_sys::window().ok_or(StarfieldError::MissingWindow)?;
	let document = window.document().ok_or(StarfieldError::MissingWindow)?;
	let (width, height) = viewport(&window)?;

	let surface = CanvasSurface::new(&document, canvas)?;
	let theme = Theme::by_name(&config.theme);
	let seed = (js_sys::Math::random() * u32::MAX as f64) as u64
		| ((js_sys::Math::random() * u32::MAX as f64) as u64) << 32;
	let debounce_ms = config.resize_debounce_ms;

	let mut starfield = Starfield::new(surface, config, theme, SmallRng::seed_from_u64(seed));
	starfield.on_resize(width, height);
	starfield.on_scroll(window.scroll_y().unwrap_or(0.0));
	*engine.borrow_mut() = Some(starfield);

	*listeners.borrow_mut() = Some(attach_listeners(&window, engine, debounce_ms)?);

	let mut timer = BrowserTimer {
		engine: engine.clone(),
	};
	if let Some(ref mut starfield) = *engine.borrow_mut() {
		starfield.start(&mut timer);
	}
	Ok(())
}

/// Events fired during scrolling or pointer motion. None of the handlers call
/// `preventDefault`, so these are registered passive.
fn is_passive(event: &str) -> bool {
	matches!(event, "scroll" | "mousemove")
}

fn listen(window: &Window, event: &str, callback: &JsValue) -> Result<()> {
	let options = AddEventListenerOptions::new();
	options.set_passive(is_passive(event));
	window.add_event_listener_with_callback_and_add_event_listener_options(
		event,
		callback.unchecked_ref(),
		&options,
	)?;
	Ok(())
}

fn attach_listeners(window: &Window, engine: &SharedEngine, debounce_ms: u32) -> Result<Listeners> {
	// Resize events arrive in bursts; re-provision once they settle.
	let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
	let (engine_apply, pending_apply) = (engine.clone(), pending.clone());
	let apply_resize: Rc<Closure<dyn FnMut()>> = Rc::new(Closure::new(move || {
		pending_apply.set(None);
		let Some(win) = web_sys::window() else {
			return;
		};
		match viewport(&win) {
			Ok((w, h)) => {
				if let Some(ref mut starfield) = *engine_apply.borrow_mut() {
					starfield.on_resize(w, h);
				}
			}
			Err(e) => warn!("starfield: ignoring resize: {e}"),
		}
	}));

	let resize = Closure::<dyn FnMut()>::new(move || {
		let Some(win) = web_sys::window() else {
			return;
		};
		if let Some(handle) = pending.take() {
			win.clear_timeout_with_handle(handle);
		}
		let callback: &JsValue = (*apply_resize).as_ref();
		match win.set_timeout_with_callback_and_timeout_and_arguments_0(
			callback.unchecked_ref(),
			debounce_ms as i32,
		) {
			Ok(handle) => pending.set(Some(handle)),
			Err(e) => warn!("starfield: could not debounce resize: {}", StarfieldError::from(e)),
		}
	});

	let engine_scroll = engine.clone();
	let scroll = Closure::<dyn FnMut()>::new(move || {
		let Some(win) = web_sys::window() else {
			return;
		};
		let Ok(offset) = win.scroll_y() else {
			return;
		};
		if let Some(ref mut starfield) = *engine_scroll.borrow_mut() {
			starfield.on_scroll(offset);
		}
	});

	let engine_pointer = engine.clone();
	let pointer = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
		let Some(win) = web_sys::window() else {
			return;
		};
		let Ok((w, h)) = viewport(&win) else {
			return;
		};
		let (x, y) = normalize_pointer(ev.client_x() as f64, ev.client_y() as f64, w, h);
		if let Some(ref mut starfield) = *engine_pointer.borrow_mut() {
			starfield.on_pointer_move(x, y);
		}
	});

	listen(window, "resize", resize.as_ref())?;
	listen(window, "scroll", scroll.as_ref())?;
	listen(window, "mousemove", pointer.as_ref())?;

	Ok(Listeners {
		_resize: resize,
		_scroll: scroll,
		_pointer: pointer,
	})
}
