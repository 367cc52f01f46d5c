use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, WheelEvent, Window};

use super::render;
use super::scene::GraphScene;
use crate::focus::{CameraDirector, FocusSignal};
use crate::graph::{GraphDataStore, GraphDataset};

const FRAME_DT: f32 = 0.016;
const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// 3D graph view whose camera follows focus requests.
///
/// `data` and `focus` arrive independently; the camera director is
/// re-evaluated whenever either one changes.
#[component]
pub fn GraphView(
	#[prop(into)] data: Signal<Option<GraphDataset>>,
	#[prop(into)] focus: Signal<Option<FocusSignal>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let scene: Rc<RefCell<Option<GraphScene>>> = Rc::new(RefCell::new(None));
	let director = Rc::new(RefCell::new(CameraDirector::default()));
	let size = Rc::new(Cell::new(FALLBACK_SIZE));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	let (scene_init, director_init, size_init, animate_init, resize_cb_init) = (
		scene.clone(),
		director.clone(),
		size.clone(),
		animate.clone(),
		resize_cb.clone(),
	);
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or(FALLBACK_SIZE)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(FALLBACK_SIZE.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(FALLBACK_SIZE.1)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		size_init.set((w, h));

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("Canvas 2d context unavailable");
			return;
		};

		if fullscreen {
			let (size_resize, canvas_resize) = (size_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				size_resize.set((nw, nh));
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (scene_anim, director_anim, size_anim, animate_inner) = (
			scene_init.clone(),
			director_init.clone(),
			size_init.clone(),
			animate_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let (w, h) = size_anim.get();
			if let Some(ref mut s) = *scene_anim.borrow_mut() {
				let mut director = director_anim.borrow_mut();
				if s.tick(FRAME_DT) {
					director.on_settle(&s.store, now);
				}
				let pose = director.tick(now);
				render::render(s, &pose, director.config().fov_y_deg, w, h, &ctx);
			} else {
				render::clear(&ctx, w, h);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Graph slot: rebuild the scene, then retry whatever focus is pending.
	let (scene_data, director_data) = (scene.clone(), director.clone());
	Effect::new(move |_| {
		let Some(dataset) = data.get() else {
			return;
		};
		info!(
			"Loading graph with {} nodes and {} links",
			dataset.nodes.len(),
			dataset.links.len()
		);
		let next = GraphScene::new(dataset);
		if let Some(signal) = focus.get_untracked() {
			director_data
				.borrow_mut()
				.on_focus_signal(&signal, &next.store, js_sys::Date::now());
		}
		*scene_data.borrow_mut() = Some(next);
	});

	// Focus slot: only a changed signal wakes the director.
	let latest_focus = Memo::new(move |_| focus.get());
	let (scene_focus, director_focus) = (scene.clone(), director.clone());
	Effect::new(move |_| {
		let Some(signal) = latest_focus.get() else {
			return;
		};
		let now = js_sys::Date::now();
		let mut director = director_focus.borrow_mut();
		match scene_focus.borrow().as_ref() {
			Some(s) => director.on_focus_signal(&signal, &s.store, now),
			None => director.on_focus_signal(&signal, &GraphDataStore::default(), now),
		};
	});

	let director_wh = director.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let factor = if ev.delta_y() > 0.0 { 1.1 } else { 0.9 };
		director_wh.borrow_mut().dolly(factor, js_sys::Date::now());
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-view-canvas"
			on:wheel=on_wheel
			style="display: block;"
		/>
	}
}
