//! gloo-net transport for the link and session endpoints with a consistent
//! timeout and error policy. Session calls include cookies; link calls do not.
//! Request bodies may carry link passwords and are never logged.

use super::config::AppConfig;
use crate::{
    api::{build_url_with_base, looks_like_timeout, sanitize_body},
    config::{Endpoints, DEFAULT_TIMEOUT},
    error::AppError,
    link::{
        types::{IncrementHitsRequest, LinkDetailsRequest},
        LinkApi, LinkDetailsResponse,
    },
    session::{SessionApi, SessionStatus},
};
use gloo_net::http::{Request, Response};
use gloo_timers::callback::Timeout;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use web_sys::{AbortController, AbortSignal, RequestCredentials};

/// Browser client for one Linkr deployment. Cheap to clone.
#[derive(Clone, Debug)]
pub struct WebClient {
    base_url: Arc<str>,
    endpoints: Arc<Endpoints>,
}

impl WebClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: Arc::from(config.api_base_url.as_str()),
            endpoints: Arc::new(config.endpoints.clone()),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn url(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }
}

impl LinkApi for WebClient {
    async fn link_details(
        &self,
        request: &LinkDetailsRequest,
    ) -> Result<LinkDetailsResponse, AppError> {
        let response = post_json(&self.url(&self.endpoints.link_details), request).await?;
        decode_any_status(response).await
    }

    async fn increment_hits(&self, request: &IncrementHitsRequest) -> Result<(), AppError> {
        let response = post_json(&self.url(&self.endpoints.increment_hits), request).await?;
        ensure_success(response).await.map(drop)
    }
}

impl SessionApi for WebClient {
    async fn status(&self) -> Result<SessionStatus, AppError> {
        let url = self.url(&self.endpoints.auth_check);
        let response = send(|signal| {
            Request::get(&url)
                .credentials(RequestCredentials::Include)
                .abort_signal(Some(signal))
                .build()
        })
        .await?;

        ensure_success(response)
            .await?
            .json::<SessionStatus>()
            .await
            .map_err(|err| AppError::Parse(format!("Invalid session status: {err}")))
    }

    async fn logout(&self) -> Result<(), AppError> {
        let url = self.url(&self.endpoints.auth_logout);
        let response = send(|signal| {
            Request::post(&url)
                .credentials(RequestCredentials::Include)
                .abort_signal(Some(signal))
                .build()
        })
        .await?;

        ensure_success(response).await.map(drop)
    }
}

/// Link endpoints are called without cookies.
async fn post_json<B: Serialize>(url: &str, body: &B) -> Result<Response, AppError> {
    let payload = serde_json::to_string(body)
        .map_err(|err| AppError::Serialization(format!("Cannot encode request body: {err}")))?;
    send(move |signal| {
        Request::post(url)
            .header("Content-Type", "application/json")
            .abort_signal(Some(signal))
            .body(payload)
    })
    .await
}

/// Sends the request built by `build`, aborting it after `DEFAULT_TIMEOUT`.
async fn send(
    build: impl FnOnce(&AbortSignal) -> Result<Request, gloo_net::Error>,
) -> Result<Response, AppError> {
    let controller = AbortController::new()
        .map_err(|_| AppError::Config("AbortController is unavailable.".to_string()))?;
    let abort = controller.clone();
    let timeout_ms = u32::try_from(DEFAULT_TIMEOUT.as_millis()).unwrap_or(u32::MAX);
    // Cleared on drop once the response arrives.
    let _deadline = Timeout::new(timeout_ms, move || abort.abort());

    let request = build(&controller.signal())
        .map_err(|err| AppError::Serialization(format!("Cannot build request: {err}")))?;
    request.send().await.map_err(|err| {
        let message = err.to_string();
        if looks_like_timeout(&message) {
            AppError::Timeout("The server did not answer in time.".to_string())
        } else {
            AppError::Network(format!("Cannot reach the server: {message}"))
        }
    })
}

/// Decodes the body whatever the status; the link endpoint reports failures
/// as JSON with non-2xx codes.
async fn decode_any_status<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    let ok = response.ok();
    let body = response
        .text()
        .await
        .map_err(|err| AppError::Parse(format!("Cannot read response body: {err}")))?;

    serde_json::from_str(&body).map_err(|err| {
        if ok {
            AppError::Parse(format!("Invalid response body: {err}"))
        } else {
            AppError::Http {
                status,
                message: sanitize_body(&body),
            }
        }
    })
}

/// Passes 2xx responses through; anything else becomes `AppError::Http`.
async fn ensure_success(response: Response) -> Result<Response, AppError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(AppError::Http {
        status,
        message: sanitize_body(&body),
    })
}
