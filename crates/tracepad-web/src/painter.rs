//! Replays engine output onto `CanvasRenderingContext2d`.
//!
//! This is the only module that touches the canvas API. All fallible
//! Canvas2D calls propagate `Result<(), JsValue>` to the runner.

use js_sys::Array;
use tracepad_engine::{DisplayList, DrawCommand, InkSegment, LineStyle, OutlineStyle};
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// Paint a full guide display list.
pub fn paint_list(ctx: &CanvasRenderingContext2d, list: &DisplayList) -> Result<(), JsValue> {
    for command in list.commands() {
        match command {
            DrawCommand::Clear { width, height } => wipe(ctx, *width, *height),
            DrawCommand::Line { from, to, style } => {
                apply_line_style(ctx, style)?;
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            DrawCommand::Text {
                text,
                center,
                font_size,
                style,
            } => {
                let (x, y) = (center.x as f64, center.y as f64);
                paint_outline_text(ctx, text, x, y, *font_size, style)?
            }
        }
    }
    Ok(())
}

/// Paint one ink segment with round caps and joins.
pub fn paint_segment(ctx: &CanvasRenderingContext2d, segment: &InkSegment) {
    ctx.begin_path();
    ctx.set_stroke_style_str(&segment.color().to_css());
    ctx.set_line_width(segment.width as f64);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.move_to(segment.x0 as f64, segment.y0 as f64);
    ctx.line_to(segment.x1 as f64, segment.y1 as f64);
    ctx.stroke();
}

/// Clear a region to transparent.
pub fn wipe(ctx: &CanvasRenderingContext2d, width: f32, height: f32) {
    ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
}

fn apply_line_style(ctx: &CanvasRenderingContext2d, style: &LineStyle) -> Result<(), JsValue> {
    ctx.set_stroke_style_str(&style.color.to_css());
    ctx.set_line_width(style.width as f64);
    set_dash(ctx, &style.dash)
}

fn paint_outline_text(
    ctx: &CanvasRenderingContext2d,
    text: &str,
    x: f64,
    y: f64,
    font_size: f32,
    style: &OutlineStyle,
) -> Result<(), JsValue> {
    ctx.set_font(&style.css_font(font_size));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    ctx.set_stroke_style_str(&style.stroke.to_css());
    ctx.set_line_width(style.width as f64);
    set_dash(ctx, &style.dash)?;
    ctx.stroke_text(text, x, y)?;

    ctx.set_fill_style_str(&style.fill.to_css());
    ctx.fill_text(text, x, y)
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: &[f32]) -> Result<(), JsValue> {
    let segments = Array::new();
    for d in dash {
        segments.push(&JsValue::from_f64(*d as f64));
    }
    ctx.set_line_dash(&JsValue::from(segments))
}
