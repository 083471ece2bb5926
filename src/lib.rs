//! # Linkr (URL shortener client)
//!
//! `linkr` is the client side of the Linkr URL shortener. It turns a short
//! alias into one of three landing experiences: an automatic redirect, a
//! not-found message, or a password challenge with a retry loop.
//!
//! ## Alias Resolution
//!
//! The resolution workflow is a sans-IO state machine ([`workflow::Workflow`]).
//! Its operations return [`workflow::Command`]s that a driver executes:
//!
//! 1. **Lookup:** `POST /linkr/api/link/details` with the alias and an optional
//!    password. The response is normalized into a [`link::LookupResult`].
//! 2. **Hit:** after a password-bearing lookup redirects, a fire-and-forget
//!    `POST /linkr/api/link/hits/increment` records the authenticated hit.
//! 3. **Redirect:** navigation to the destination is armed once, after a
//!    fixed delay, and cancelled when the workflow is torn down.
//!
//! Two drivers share the state machine: the `linkr` terminal binary
//! (native) and the `linkr-web` Leptos app (wasm32).
//!
//! ## Session
//!
//! The logged-in user is read through [`session::SessionApi`] and rendered as a
//! footer with account and logout actions. Session state is injected, never
//! queried ad hoc.

pub mod api;
pub mod config;
pub mod error;
pub mod link;
pub mod runtime;
pub mod session;
pub mod web;
pub mod workflow;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
#[cfg(not(target_arch = "wasm32"))]
pub mod native;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub use error::AppError;

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
