//! Browser entry point for the BearEcho landing page.

use app::App;
use wasm_bindgen::prelude::wasm_bindgen;

/// Install the panic hook and console logger, then mount the app.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if let Err(err) = console_log::init_with_level(level) {
        leptos::logging::warn!("console logger unavailable: {err}");
    }

    leptos::mount::mount_to_body(App);
}
