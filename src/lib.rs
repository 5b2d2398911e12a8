pub mod api;
pub mod app;
pub mod catalog;
pub mod components;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod export;
pub mod geo;
pub mod locale;
pub mod models;
pub mod validation;

#[cfg(feature = "ssr")]
pub mod admission;
#[cfg(feature = "ssr")]
pub mod auth;
#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod state;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;

    console_error_panic_hook::set_once();
    leptos::mount_to_body(App);
}
