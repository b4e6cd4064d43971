//! Leptos component hosting the constellation canvas.
//!
//! The canvas takes the size of its parent element. Once mounted, a
//! self-rescheduling `setTimeout` callback runs one frame per firing; a click
//! spawns a particle at the pointer; a window resize re-measures the parent and
//! resizes the canvas without re-seeding.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::config::ConstellationConfig;
use super::error::MountError;
use super::render::CanvasSurface;
use super::state::ConstellationState;

/// Simulation state together with the surface it draws on.
struct CanvasContext {
	state: ConstellationState,
	surface: CanvasSurface,
}

type Callback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Size of the canvas' containing element, or 0×0 when detached or hidden.
fn container_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.unwrap_or((0.0, 0.0))
}

fn make_rng(config: &ConstellationConfig) -> SmallRng {
	let seed = config
		.rng_seed
		.unwrap_or_else(|| (js_sys::Math::random() * u64::MAX as f64) as u64);
	debug!("constellation: rng seed {}", seed);
	SmallRng::seed_from_u64(seed)
}

/// Size the canvas, seed the state, and start the frame timer and resize listener.
fn mount(
	canvas: HtmlCanvasElement,
	config: ConstellationConfig,
	context: Rc<RefCell<Option<CanvasContext>>>,
	frame_cb: Callback,
	resize_cb: Callback,
) -> Result<(), MountError> {
	let window: Window = web_sys::window().ok_or(MountError::NoWindow)?;

	let (w, h) = container_size(&canvas);
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);

	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or(MountError::NoContext)?
		.dyn_into()
		.map_err(|_| MountError::NoContext)?;

	let interval = i32::try_from(config.frame_interval_ms).unwrap_or(i32::MAX);
	let rng = make_rng(&config);
	let state = ConstellationState::new(config, w, h, rng)?;
	*context.borrow_mut() = Some(CanvasContext {
		state,
		surface: CanvasSurface::new(ctx, w, h),
	});

	let (context_resize, canvas_resize) = (context.clone(), canvas.clone());
	*resize_cb.borrow_mut() = Some(Closure::new(move || {
		let (nw, nh) = container_size(&canvas_resize);
		canvas_resize.set_width(nw as u32);
		canvas_resize.set_height(nh as u32);
		if let Some(ref mut c) = *context_resize.borrow_mut() {
			c.surface.resize(nw, nh);
		}
		debug!("constellation: resized to {}x{}", nw, nh);
	}));
	if let Some(ref cb) = *resize_cb.borrow() {
		window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())?;
	}

	let (context_frame, frame_inner) = (context.clone(), frame_cb.clone());
	*frame_cb.borrow_mut() = Some(Closure::new(move || {
		if let Some(ref mut c) = *context_frame.borrow_mut() {
			c.state.tick(&mut c.surface);
		}
		let Some(win) = web_sys::window() else {
			return;
		};
		if let Some(ref cb) = *frame_inner.borrow() {
			let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
				cb.as_ref().unchecked_ref(),
				interval,
			);
		}
	}));
	if let Some(ref cb) = *frame_cb.borrow() {
		window.set_timeout_with_callback_and_timeout_and_arguments_0(
			cb.as_ref().unchecked_ref(),
			interval,
		)?;
	}

	Ok(())
}

/// Renders the animated constellation on a canvas filling its parent element.
///
/// Clicking the canvas adds a particle at the pointer. The animation runs for
/// as long as the page is open.
#[component]
pub fn ConstellationCanvas(#[prop(into)] config: Signal<ConstellationConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<CanvasContext>>> = Rc::new(RefCell::new(None));
	let frame_cb: Callback = Rc::new(RefCell::new(None));
	let resize_cb: Callback = Rc::new(RefCell::new(None));
	let (context_init, frame_init, resize_init) =
		(context.clone(), frame_cb.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		// Mount once; the timer keeps itself alive from here on.
		if context_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		if let Err(e) = mount(
			canvas,
			config.get(),
			context_init.clone(),
			frame_init.clone(),
			resize_init.clone(),
		) {
			error!("constellation: failed to mount canvas: {}", e);
		}
	});

	let context_click = context.clone();
	let on_click = move |ev: MouseEvent| {
		ev.prevent_default();
		let (x, y) = (ev.offset_x() as f64, ev.offset_y() as f64);
		if let Some(ref mut c) = *context_click.borrow_mut() {
			c.state.spawn_at(x, y);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="constellation-canvas"
			on:click=on_click
			style="display: block;"
		/>
	}
}
