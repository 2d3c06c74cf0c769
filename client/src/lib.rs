//! Dojo roster front end.
//!
//! ARCHITECTURE
//! ============
//! `router` decides the screen from the URL and auth session, `net` talks to
//! the hosted auth/data/storage platform, `state` holds the reactive data the
//! pages render, and `util` keeps presentation rules testable off-browser.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod router;
pub mod state;
pub mod util;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger already set: {e}");
    }
    leptos::mount::hydrate_body(app::App);
}
