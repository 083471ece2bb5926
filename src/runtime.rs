//! Detached task spawning for the single-threaded client runtimes: tokio's
//! `LocalSet` natively, the browser microtask queue on wasm32. Spawned futures
//! need not be `Send`.

use std::future::Future;

#[cfg(target_arch = "wasm32")]
pub fn spawn_detached<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    leptos::task::spawn_local(future);
}

/// Must be called from within a `tokio::task::LocalSet`.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_detached<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    tokio::task::spawn_local(future);
}
