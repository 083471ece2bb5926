//! Browser implementations of the redirect timer and navigator.

use crate::workflow::{Navigator, Timer, Workflow};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use std::time::Duration;

/// `setTimeout`-backed timer; dropping the `Timeout` clears it.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    type Handle = Timeout;

    fn start(&self, delay: Duration, callback: Box<dyn FnOnce() + 'static>) -> Timeout {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, callback)
    }
}

/// Full-page navigation that also marks the workflow as navigated.
#[derive(Clone, Copy)]
pub struct WindowNavigator {
    pub workflow: RwSignal<Workflow>,
}

impl Navigator for WindowNavigator {
    fn navigate(&self, destination: &str) {
        self.workflow.update(Workflow::mark_navigated);
        assign_location(destination);
    }
}

/// Replaces the current page with `destination`.
pub fn assign_location(destination: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(err) = window.location().set_href(destination) {
        tracing::warn!(?err, "navigation failed");
    }
}
