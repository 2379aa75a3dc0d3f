//! # cuttlefish-client
//!
//! Leptos + WASM frontend for the Cuttlefish chat application.
//!
//! This crate contains the UI components, application state, the backend
//! gateway, and the synchronization engine that keeps the selected
//! conversation's cache consistent with server push events. The backend owns
//! all conversation data; the client never mutates its cache speculatively,
//! it issues actions and refetches when told to.

pub mod app;
pub mod components;
pub mod net;
pub mod state;
pub mod sync;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
