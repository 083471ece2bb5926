use super::{loader::LinkApi, types::IncrementHitsRequest};
use crate::{error::AppError, runtime::spawn_detached};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// Hit to record after a password-bearing lookup redirected.
#[derive(Debug)]
pub struct HitRequest {
    pub link_id: i64,
    pub password: SecretString,
}

impl HitRequest {
    fn to_wire(&self) -> IncrementHitsRequest {
        IncrementHitsRequest {
            link_id: self.link_id,
            password: Some(self.password.expose_secret().to_string()),
        }
    }
}

/// Best-effort hit counter. Outcomes are logged, never surfaced, and never
/// block the redirect.
#[derive(Clone)]
pub struct HitRecorder<A> {
    api: A,
}

impl<A: LinkApi + Clone + 'static> HitRecorder<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Fires the increment on a detached local task.
    pub fn record(&self, hit: HitRequest) {
        let recorder = self.clone();
        spawn_detached(async move {
            recorder.record_now(&hit).await.ok();
        });
    }

    /// Sends the increment and waits for the response.
    ///
    /// # Errors
    /// Returns the transport error after logging it.
    pub async fn record_now(&self, hit: &HitRequest) -> Result<(), AppError> {
        let result = self.api.increment_hits(&hit.to_wire()).await;
        match &result {
            Ok(()) => debug!(link_id = hit.link_id, "hit recorded"),
            Err(err) => debug!(link_id = hit.link_id, error = %err, "hit not recorded"),
        }
        result
    }
}
