//! WASM bridge: `#[wasm_bindgen]` free functions over a single `BoardRunner`.
//!
//! Host wiring (JS side):
//! - call `tracepad_init` once with the guide/ink canvas ids;
//! - forward mouse events to the pointer exports and touch lists to the
//!   touch exports; call `preventDefault()` when they return `true`;
//! - on a document-level `touchmove`, call `preventDefault()` while
//!   `tracepad_is_drawing()` is true so the page never scrolls mid-stroke.

pub mod painter;
pub mod runner;

use std::cell::RefCell;

use glam::Vec2;
use tracepad_engine::practice::normalize_word;
use tracepad_engine::{BoardConfig, CaseMode, GestureEvent, PracticeContent, Route, PALETTE};
use wasm_bindgen::prelude::*;

pub use runner::BoardRunner;

thread_local! {
    static RUNNER: RefCell<Option<BoardRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner. Calls before `tracepad_init` are no-ops.
fn with_runner<R>(f: impl FnOnce(&mut BoardRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("tracepad not initialized; call tracepad_init() first");
                None
            }
        }
    })
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub fn tracepad_init(
    guide_canvas_id: &str,
    ink_canvas_id: &str,
    container_id: Option<String>,
    config_json: Option<String>,
) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json {
        Some(json) => BoardConfig::from_json(&json).map_err(js_error)?,
        None => BoardConfig::default(),
    };
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let runner = BoardRunner::new(
        config,
        &document,
        guide_canvas_id,
        ink_canvas_id,
        container_id.as_deref(),
    )?;

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("tracepad: initialized");
    Ok(())
}

// ---- Content ----

/// Show one character. `case_mode` is `uppercase`, `lowercase` or `both`.
#[wasm_bindgen]
pub fn tracepad_set_character(character: &str, case_mode: &str) -> Result<(), JsValue> {
    let ch = character
        .chars()
        .next()
        .ok_or_else(|| JsValue::from_str("empty character"))?;
    let case: CaseMode = case_mode.parse().map_err(js_error)?;
    with_runner(|r| r.set_content(PracticeContent::character(ch, case))).unwrap_or(Ok(()))
}

/// Show a whole word, normalized the way the word input does.
#[wasm_bindgen]
pub fn tracepad_set_word(word: &str) -> Result<(), JsValue> {
    let Some(word) = normalize_word(word) else {
        return Ok(());
    };
    with_runner(|r| r.set_content(PracticeContent::word(word))).unwrap_or(Ok(()))
}

// ---- Practice session ----

/// Open the session a route fragment describes (`#/letters/random/both`,
/// `#/words/SOL`, ...). Returns false for selection screens.
#[wasm_bindgen]
pub fn tracepad_open_route(hash: &str) -> Result<bool, JsValue> {
    let route = Route::parse(hash);
    let seed = js_sys::Date::now() as u64;
    with_runner(|r| r.open_route(&route, seed)).unwrap_or(Ok(false))
}

/// Next character in the session (sequence or random).
#[wasm_bindgen]
pub fn tracepad_next() -> Result<(), JsValue> {
    with_runner(|r| r.next()).unwrap_or(Ok(()))
}

/// Cycle uppercase, lowercase and both. Returns the new case name, or
/// nothing outside a letter session.
#[wasm_bindgen]
pub fn tracepad_toggle_case() -> Result<Option<String>, JsValue> {
    let case = with_runner(|r| r.toggle_case()).unwrap_or(Ok(None))?;
    Ok(case.map(|c| c.as_str().to_string()))
}

/// Character the session is showing, for speech or labels.
#[wasm_bindgen]
pub fn tracepad_current_character() -> Option<String> {
    with_runner(|r| {
        r.session()
            .filter(|s| s.word().is_none())
            .map(|s| s.current_character().to_string())
    })
    .flatten()
}

/// Fragment that reopens the running session.
#[wasm_bindgen]
pub fn tracepad_session_hash() -> Option<String> {
    with_runner(|r| r.session().map(|s| s.route().to_hash())).flatten()
}

/// Grading result for the current ink as JSON.
#[wasm_bindgen]
pub fn tracepad_validate() -> String {
    let result = with_runner(|r| r.validate()).unwrap_or_default();
    serde_json::to_string(&result).unwrap_or_else(|_| "null".to_string())
}

#[wasm_bindgen]
pub fn tracepad_request_clear() {
    with_runner(|r| r.request_clear());
}

#[wasm_bindgen]
pub fn tracepad_set_stroke_color(hex: &str) -> Result<(), JsValue> {
    with_runner(|r| r.set_stroke_color(hex)).unwrap_or(Ok(()))
}

#[wasm_bindgen]
pub fn tracepad_set_surface_size(width: f32, height: f32) -> Result<(), JsValue> {
    with_runner(|r| r.set_surface_size(width, height)).unwrap_or(Ok(()))
}

#[wasm_bindgen]
pub fn tracepad_viewport_resized() -> Result<(), JsValue> {
    with_runner(|r| r.viewport_resized()).unwrap_or(Ok(()))
}

// ---- Gestures (client coordinates); return true => preventDefault() ----

#[wasm_bindgen]
pub fn tracepad_pointer_down(x: f32, y: f32) -> bool {
    gesture(GestureEvent::Start(Some(Vec2::new(x, y))))
}

#[wasm_bindgen]
pub fn tracepad_pointer_move(x: f32, y: f32) -> bool {
    gesture(GestureEvent::Move(Some(Vec2::new(x, y))))
}

#[wasm_bindgen]
pub fn tracepad_pointer_up() -> bool {
    gesture(GestureEvent::End)
}

#[wasm_bindgen]
pub fn tracepad_pointer_leave() -> bool {
    gesture(GestureEvent::Leave)
}

#[wasm_bindgen]
pub fn tracepad_touch_cancel() -> bool {
    gesture(GestureEvent::Cancel)
}

/// Touch start from the current touch list as flat `[x0, y0, x1, y1, ...]`.
/// Only the first contact draws.
#[wasm_bindgen]
pub fn tracepad_touch_start(touches: &[f32]) -> bool {
    gesture(GestureEvent::touch_start(&touch_points(touches)))
}

#[wasm_bindgen]
pub fn tracepad_touch_move(touches: &[f32]) -> bool {
    gesture(GestureEvent::touch_move(&touch_points(touches)))
}

#[wasm_bindgen]
pub fn tracepad_is_drawing() -> bool {
    with_runner(|r| r.board().is_drawing()).unwrap_or(false)
}

fn gesture(event: GestureEvent) -> bool {
    with_runner(|r| r.gesture(event)).unwrap_or(false)
}

fn touch_points(flat: &[f32]) -> Vec<Vec2> {
    flat.chunks_exact(2).map(|p| Vec2::new(p[0], p[1])).collect()
}

// ---- Layer data for hosts that render elsewhere ----

/// Ink segments, `InkSegment::FLOATS` floats each.
#[wasm_bindgen]
pub fn tracepad_ink_floats() -> Vec<f32> {
    with_runner(|r| r.ink_floats()).unwrap_or_default()
}

/// Ink tessellated into a triangle list, `InkVertex::FLOATS` floats per vertex.
#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn tracepad_ink_mesh() -> Vec<f32> {
    with_runner(|r| r.ink_mesh()).unwrap_or_default()
}

/// Guide layer draw commands as JSON.
#[wasm_bindgen]
pub fn tracepad_guide_json() -> String {
    with_runner(|r| r.guide_json()).unwrap_or_else(|| "[]".to_string())
}

// ---- Routes and palette (JSON strings) ----

/// Decode a URL fragment into a route object.
#[wasm_bindgen]
pub fn tracepad_route_parse(hash: &str) -> String {
    serde_json::to_string(&Route::parse(hash)).unwrap_or_else(|_| "null".to_string())
}

/// Encode a route object (as produced by `tracepad_route_parse`) into a fragment.
#[wasm_bindgen]
pub fn tracepad_route_hash(route_json: &str) -> Result<String, JsValue> {
    let route: Route = serde_json::from_str(route_json).map_err(js_error)?;
    Ok(route.to_hash())
}

/// The same fragment with another case. Only letter tracing routes change.
#[wasm_bindgen]
pub fn tracepad_route_with_case(hash: &str, case_mode: &str) -> Result<String, JsValue> {
    let case: CaseMode = case_mode.parse().map_err(js_error)?;
    Ok(Route::parse(hash).with_case(case).to_hash())
}

/// Ink swatches as `[[name, css], ...]`.
#[wasm_bindgen]
pub fn tracepad_palette() -> String {
    let swatches: Vec<(&str, String)> =
        PALETTE.iter().map(|(name, c)| (*name, c.to_css())).collect();
    serde_json::to_string(&swatches).unwrap_or_else(|_| "[]".to_string())
}
