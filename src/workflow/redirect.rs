use std::time::Duration;
use tracing::debug;

/// One-shot timer. Dropping the returned handle cancels the callback.
pub trait Timer {
    type Handle;

    fn start(&self, delay: Duration, callback: Box<dyn FnOnce() + 'static>) -> Self::Handle;
}

/// Performs the full navigation to a destination URL.
pub trait Navigator {
    fn navigate(&self, destination: &str);
}

impl<F: Fn(&str)> Navigator for F {
    fn navigate(&self, destination: &str) {
        self(destination);
    }
}

struct Armed<H> {
    destination: String,
    _handle: H,
}

/// Delayed navigation tied to a workflow instance. Arms at most once; dropping
/// the scheduler cancels a pending navigation.
pub struct RedirectScheduler<T: Timer, N> {
    timer: T,
    navigator: N,
    armed: Option<Armed<T::Handle>>,
    cancelled: bool,
}

impl<T, N> RedirectScheduler<T, N>
where
    T: Timer,
    N: Navigator + Clone + 'static,
{
    pub fn new(timer: T, navigator: N) -> Self {
        Self {
            timer,
            navigator,
            armed: None,
            cancelled: false,
        }
    }

    /// Arms the navigation. Returns `false` when already armed or cancelled.
    pub fn schedule(&mut self, destination: &str, delay: Duration) -> bool {
        if self.cancelled {
            debug!(destination, "redirect scheduler torn down");
            return false;
        }
        if let Some(armed) = &self.armed {
            debug!(destination = %armed.destination, "redirect already armed");
            return false;
        }

        let navigator = self.navigator.clone();
        let target = destination.to_string();
        let handle = self.timer.start(
            delay,
            Box::new(move || {
                debug!(destination = %target, "redirecting");
                navigator.navigate(&target);
            }),
        );
        self.armed = Some(Armed {
            destination: destination.to_string(),
            _handle: handle,
        });
        true
    }

    /// Cancels a pending navigation. The scheduler stays disarmed afterwards
    /// and may not be re-armed for another destination.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        if let Some(armed) = self.armed.take() {
            debug!(destination = %armed.destination, "redirect cancelled");
        }
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}
