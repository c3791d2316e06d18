use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::config::OverviewStyle;
use super::scene::{Primitive, Scene, TextAlign, ViewRect};

const DASH: f64 = 4.0;
const GAP: f64 = 3.0;

/// Clears the surface and paints `scene` in order.
pub fn render(scene: &Scene, style: &OverviewStyle, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, scene.width, scene.height);
	ctx.set_fill_style_str(&scene.background);
	ctx.fill_rect(0.0, 0.0, scene.width, scene.height);

	for primitive in &scene.primitives {
		match primitive {
			Primitive::Rect {
				rect,
				fill,
				stroke,
				line_width,
				radius,
				dashed,
			} => draw_rect(ctx, rect, fill, stroke, *line_width, *radius, *dashed),
			Primitive::Label {
				text,
				x,
				y,
				font_px,
				color,
				align,
			} => {
				ctx.set_fill_style_str(color);
				ctx.set_font(&format!("{}px {}", font_px, style.font_family));
				ctx.set_text_baseline("middle");
				ctx.set_text_align(match align {
					TextAlign::Start => "left",
					TextAlign::Center => "center",
				});
				let _ = ctx.fill_text(text, *x, *y);
			}
		}
	}
}

fn draw_rect(
	ctx: &CanvasRenderingContext2d,
	rect: &ViewRect,
	fill: &str,
	stroke: &str,
	line_width: f64,
	radius: f64,
	dashed: bool,
) {
	rounded_rect_path(ctx, rect, radius);
	ctx.set_fill_style_str(fill);
	ctx.fill();

	if dashed {
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(DASH),
			&JsValue::from_f64(GAP),
		));
	}
	ctx.set_stroke_style_str(stroke);
	ctx.set_line_width(line_width);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, rect: &ViewRect, radius: f64) {
	let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
	let (x0, y0, x1, y1) = (rect.x, rect.y, rect.x + rect.width, rect.y + rect.height);
	ctx.begin_path();
	ctx.move_to(x0 + r, y0);
	ctx.line_to(x1 - r, y0);
	let _ = ctx.arc(x1 - r, y0 + r, r, -PI / 2.0, 0.0);
	ctx.line_to(x1, y1 - r);
	let _ = ctx.arc(x1 - r, y1 - r, r, 0.0, PI / 2.0);
	ctx.line_to(x0 + r, y1);
	let _ = ctx.arc(x0 + r, y1 - r, r, PI / 2.0, PI);
	ctx.line_to(x0, y0 + r);
	let _ = ctx.arc(x0 + r, y0 + r, r, PI, 1.5 * PI);
	ctx.close_path();
}
