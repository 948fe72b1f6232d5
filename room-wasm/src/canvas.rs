use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use room_core::{GridView, ItemView};

// Non-deprecated helpers to set canvas styles via property assignment.
pub fn set_fill_style(ctx: &CanvasRenderingContext2d, color: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("fillStyle"),
        &JsValue::from_str(color),
    );
}

pub fn set_stroke_style(ctx: &CanvasRenderingContext2d, color: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(color),
    );
}

/// Floor fill plus cell borders for one room panel at `origin`.
pub fn draw_grid(ctx: &CanvasRenderingContext2d, origin: (f64, f64), grid: &GridView) {
    let (ox, oy) = origin;
    let side = grid.size as f64 * grid.tile_size;

    set_fill_style(ctx, &grid.floor_color.css());
    ctx.fill_rect(ox, oy, side, side);

    set_stroke_style(ctx, "#888888");
    ctx.set_line_width(1.0);
    ctx.begin_path();
    for i in 0..=grid.size {
        let step = i as f64 * grid.tile_size;
        ctx.move_to(ox + step, oy);
        ctx.line_to(ox + step, oy + side);
        ctx.move_to(ox, oy + step);
        ctx.line_to(ox + side, oy + step);
    }
    ctx.stroke();
}

/// One furniture rectangle; the view's pixel coordinates are room-relative,
/// so only the panel origin is added here.
pub fn draw_item(ctx: &CanvasRenderingContext2d, origin: (f64, f64), view: &ItemView) {
    let (ox, oy) = origin;
    set_fill_style(ctx, &view.color.css());
    ctx.fill_rect(ox + view.pixel_x, oy + view.pixel_y, view.width_px, view.height_px);
    if view.selected {
        set_stroke_style(ctx, "#111111");
        ctx.set_line_width(2.0);
        ctx.stroke_rect(ox + view.pixel_x, oy + view.pixel_y, view.width_px, view.height_px);
    }
}
