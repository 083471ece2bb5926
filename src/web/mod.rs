//! Leptos front end (wasm32). Routes render the alias landing page; the footer
//! shows the logged-in user. Only `config` compiles natively.

pub mod config;

#[cfg(target_arch = "wasm32")]
mod api;
#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod platform;
#[cfg(target_arch = "wasm32")]
mod routes;
#[cfg(target_arch = "wasm32")]
mod session;

/// Mounts the app on `<body>`.
#[cfg(target_arch = "wasm32")]
pub fn mount() {
    leptos::prelude::mount_to_body(app::App);
}
