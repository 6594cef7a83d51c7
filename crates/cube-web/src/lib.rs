//! WASM exports for the cube engine.
//!
//! The browser host owns the canvas and the render loop: it calls
//! `cube_frame` once per animation frame, forwards pointer events, and reads
//! piece/tile matrices straight out of wasm memory.

pub mod runner;

pub use runner::CubeRunner;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use cube_engine::{CubeConfig, InputEvent, MouseButton};

thread_local! {
    static RUNNER: RefCell<Option<CubeRunner>> = RefCell::new(None);
}

/// Run `f` against the runner. Before `cube_init` this logs and returns the
/// default value.
fn with_runner<R: Default>(f: impl FnOnce(&mut CubeRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            log::warn!("cube not initialized, call cube_init() first");
            R::default()
        }
    })
}

#[wasm_bindgen]
pub fn cube_init(width: f32, height: f32, config_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let mut config = if config_json.trim().is_empty() {
        CubeConfig::default()
    } else {
        CubeConfig::from_json(config_json).unwrap_or_else(|err| {
            log::warn!("bad cube config ({}), using defaults", err);
            CubeConfig::default()
        })
    };
    config.viewport_width = width;
    config.viewport_height = height;

    let runner = CubeRunner::new(config);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    log::info!("cube: initialized");
}

#[wasm_bindgen]
pub fn cube_frame(now: f64) {
    with_runner(|r| r.frame(now));
}

// ---- Input ----

#[wasm_bindgen]
pub fn cube_mouse_down(button: u32, x: f32, y: f32) {
    let button = MouseButton::from_code(button);
    with_runner(|r| r.push_input(InputEvent::MouseDown { button, x, y }));
}

#[wasm_bindgen]
pub fn cube_mouse_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::MouseMove { x, y }));
}

#[wasm_bindgen]
pub fn cube_mouse_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::MouseUp { x, y }));
}

#[wasm_bindgen]
pub fn cube_touch_start(x: f32, y: f32, touches: u32) {
    with_runner(|r| r.push_input(InputEvent::TouchStart { x, y, touches }));
}

#[wasm_bindgen]
pub fn cube_touch_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::TouchMove { x, y }));
}

#[wasm_bindgen]
pub fn cube_touch_end(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::TouchEnd { x, y }));
}

// ---- Commands ----

#[wasm_bindgen]
pub fn cube_resize(width: f32, height: f32) {
    with_runner(|r| r.resize(width, height));
}

/// Scramble with the given notation, or randomly when blank. Returns the
/// notation played; throws on malformed notation or while the cube is busy.
#[wasm_bindgen]
pub fn cube_scramble(notation: &str) -> Result<String, JsValue> {
    let result = with_runner(|r| Some(r.scramble(notation)))
        .ok_or_else(|| js_sys::Error::new("cube not initialized"))?;
    result.map_err(|err| js_sys::Error::new(&err.to_string()).into())
}

#[wasm_bindgen]
pub fn cube_reset() {
    with_runner(|r| r.reset());
}

#[wasm_bindgen]
pub fn cube_enable() {
    with_runner(|r| r.enable());
}

#[wasm_bindgen]
pub fn cube_disable() {
    with_runner(|r| r.disable());
}

#[wasm_bindgen]
pub fn cube_set_flip_config(value: u8) {
    with_runner(|r| r.set_flip_config(value));
}

#[wasm_bindgen]
pub fn cube_set_scramble_length(length: u32) {
    with_runner(|r| r.set_scramble_length(length as usize));
}

#[wasm_bindgen]
pub fn cube_float(on: bool) {
    with_runner(|r| r.set_float(on));
}

#[wasm_bindgen]
pub fn cube_elevate(complete: bool) {
    with_runner(|r| r.elevate(complete));
}

/// Zoom in for play (or out to the menu); `time` > 0 stretches it (ms).
#[wasm_bindgen]
pub fn cube_zoom(play: bool, time: f32) {
    with_runner(|r| r.zoom(play, time));
}

#[wasm_bindgen]
pub fn cube_show(show: bool) {
    with_runner(|r| r.show_cube(show));
}

#[wasm_bindgen]
pub fn cube_is_solved() -> bool {
    with_runner(|r| r.is_solved())
}

#[wasm_bindgen]
pub fn cube_is_animating() -> bool {
    with_runner(|r| r.is_animating())
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_pieces_ptr() -> *const f32 {
    with_runner(|r| Some(r.pieces_ptr())).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_piece_count() -> u32 {
    with_runner(|r| r.piece_count())
}

#[wasm_bindgen]
pub fn get_tiles_ptr() -> *const f32 {
    with_runner(|r| Some(r.tiles_ptr())).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_tile_count() -> u32 {
    with_runner(|r| r.tile_count())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| Some(r.events_ptr())).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len())
}

#[wasm_bindgen]
pub fn get_camera_ptr() -> *const f32 {
    with_runner(|r| Some(r.camera_ptr())).unwrap_or(std::ptr::null())
}
