use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scene::GraphScene;
use crate::focus::{CameraPose, Projection};

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// Node radius in world units.
const NODE_RADIUS: f64 = 3.0;
const MIN_NODE_PIXELS: f64 = 1.5;
/// Links shorter than this on screen go unlabelled.
const LABEL_MIN_PIXELS: f64 = 120.0;

fn group_color(group_index: usize) -> &'static str {
	COLORS[group_index % COLORS.len()]
}

pub fn clear(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
	ctx.set_fill_style_str("#000000");
	ctx.fill_rect(0.0, 0.0, width, height);
}

pub fn render(
	scene: &GraphScene,
	pose: &CameraPose,
	fov_y_deg: f32,
	width: f64,
	height: f64,
	ctx: &CanvasRenderingContext2d,
) {
	clear(ctx, width, height);

	let projection = Projection::new(pose, width, height, fov_y_deg);
	let projected: Vec<Option<(f64, f64, f64)>> = scene
		.store
		.nodes()
		.iter()
		.map(|n| n.position.and_then(|p| projection.project(p)))
		.collect();

	draw_links(scene, &projected, ctx);
	draw_nodes(scene, &projection, &projected, ctx);
}

fn draw_links(scene: &GraphScene, projected: &[Option<(f64, f64, f64)>], ctx: &CanvasRenderingContext2d) {
	let (dash, gap) = (6.0, 4.0);
	ctx.set_stroke_style_str("rgba(85, 85, 85, 0.9)");
	ctx.set_line_width(1.5);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(dash),
		&JsValue::from_f64(gap),
	));
	ctx.set_line_dash_offset(-(scene.flow_time * 30.0) % (dash + gap));

	let mut labels = Vec::new();
	for link in &scene.links {
		let (Some((x1, y1, _)), Some((x2, y2, _))) = (projected[link.source], projected[link.target])
		else {
			continue;
		};
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();

		if let Some(label) = &link.label {
			if (x2 - x1).hypot(y2 - y1) >= LABEL_MIN_PIXELS {
				labels.push((label, (x1 + x2) / 2.0, (y1 + y2) / 2.0));
			}
		}
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	ctx.set_fill_style_str("rgba(0, 243, 255, 0.6)");
	ctx.set_font("10px monospace");
	for (label, x, y) in labels {
		let _ = ctx.fill_text(label, x, y);
	}
}

fn draw_nodes(
	scene: &GraphScene,
	projection: &Projection,
	projected: &[Option<(f64, f64, f64)>],
	ctx: &CanvasRenderingContext2d,
) {
	// Far to near, so closer nodes paint over farther ones.
	let mut order: Vec<(usize, (f64, f64, f64))> = projected
		.iter()
		.enumerate()
		.filter_map(|(i, p)| p.map(|p| (i, p)))
		.collect();
	order.sort_by(|a, b| (b.1).2.total_cmp(&(a.1).2));

	let nodes = scene.store.nodes();
	for (i, (x, y, depth)) in order {
		let node = &nodes[i];
		let radius = (NODE_RADIUS * projection.scale_at(depth)).max(MIN_NODE_PIXELS);

		ctx.set_global_alpha(0.9);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(group_color(scene.store.group_index(&node.group)));
		ctx.fill();
		ctx.set_global_alpha(1.0);

		let font = (radius * 1.2).clamp(8.0, 18.0);
		ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
		ctx.set_font(&format!("{}px sans-serif", font));
		let _ = ctx.fill_text(&node.id, x + radius + 3.0, y + 3.0);
	}
}
