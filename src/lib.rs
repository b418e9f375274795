//! cosmic-starfield: ambient animated starfield background for web pages.
//!
//! This crate provides a WASM-based canvas component that paints a nebula
//! backdrop with twinkling, drifting stars and occasional shooting stars,
//! with parallax driven by page scroll and pointer position.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::starfield::{
	CanvasSurface, StarfieldCanvas, StarfieldConfig, StarfieldError, Theme,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("starfield: logging initialized");
}

/// Load settings from a script element with id="starfield-config".
/// Missing fields keep their defaults; a missing element yields `None`.
fn load_config() -> Option<StarfieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("starfield-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match StarfieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"starfield: loaded config (theme {}, enabled {})",
				config.theme, config.enabled
			);
			Some(config)
		}
		Err(e) => {
			warn!("starfield: failed to parse config, using defaults: {}", e);
			None
		}
	}
}

/// Main application component.
/// Mounts the starfield behind a static landing overlay.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Starfield" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<StarfieldCanvas config=config />
		<main class="starfield-overlay">
			<h1>"Starfield"</h1>
			<p class="subtitle">"Scroll or move the pointer to shift the layers."</p>
		</main>
	}
}
