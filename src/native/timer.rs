use crate::workflow::Timer;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Redirect timer backed by a local tokio task. Must be used inside a `LocalSet`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioTimer;

/// Aborts the sleeping task when dropped.
#[derive(Debug)]
pub struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

impl Timer for TokioTimer {
    type Handle = AbortOnDrop;

    fn start(&self, delay: Duration, callback: Box<dyn FnOnce() + 'static>) -> AbortOnDrop {
        AbortOnDrop(tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            callback();
        }))
    }
}
