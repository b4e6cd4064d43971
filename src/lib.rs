//! constellation: animated particle constellation for the browser.
//!
//! This crate provides a WASM canvas component that fills its container with
//! bouncing particles, links nearby ones with distance-weighted lines, and adds
//! a particle wherever the canvas is clicked.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::constellation::{
	ConfigError, ConstellationCanvas, ConstellationConfig, ConstellationState, FrameStats,
	LinkRule, Particle, ParticleStore, Surface,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("constellation: logging initialized");
}

/// Load configuration from a script element with id="constellation-config".
/// Expected format: JSON object, every field optional.
///
/// Returns `None` when the element is absent or its contents are invalid.
fn load_config() -> Option<ConstellationConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("constellation-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match ConstellationConfig::from_json(&json_text) {
		Ok(config) => {
			info!("constellation: loaded config {:?}", config);
			Some(config)
		}
		Err(e) => {
			warn!("constellation: ignoring config, using defaults: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads the config from the DOM and renders the constellation in a full-size container.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config().unwrap_or_default();
	let config_signal = Signal::derive(move || config.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Constellation" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div id="portfolio" class="constellation-container" style="width: 100vw; height: 100vh;">
			<ConstellationCanvas config=config_signal />
		</div>
	}
}
