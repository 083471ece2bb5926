//! reqwest transport for the link and session endpoints, with the same timeout
//! and error-body policy as the browser transport.

use crate::{
    api::{build_url_with_base, looks_like_timeout, sanitize_body},
    config::{Endpoints, DEFAULT_TIMEOUT},
    error::AppError,
    link::{
        types::{IncrementHitsRequest, LinkDetailsRequest},
        LinkApi, LinkDetailsResponse,
    },
    session::{SessionApi, SessionStatus},
    APP_USER_AGENT,
};
use reqwest::{header::COOKIE, Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::{sync::Arc, time::Duration};
use tracing::debug;
use url::Url;

/// HTTP client for one Linkr deployment. Cheap to clone.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    endpoints: Arc<Endpoints>,
    session_cookie: Option<Arc<SecretString>>,
}

impl HttpClient {
    /// Builds a client for the given base URL.
    ///
    /// # Errors
    /// Returns `AppError::Config` for an invalid base URL or client setup failure.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|err| AppError::Config(format!("Invalid base URL {base_url}: {err}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "Unsupported base URL scheme: {}",
                base_url.scheme()
            )));
        }

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url,
            endpoints: Arc::new(Endpoints::default()),
            session_cookie: None,
        })
    }

    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = Arc::new(endpoints);
        self
    }

    /// Sends the given `Cookie` header value on session requests.
    #[must_use]
    pub fn with_session_cookie(mut self, cookie: SecretString) -> Self {
        self.session_cookie = Some(Arc::new(cookie));
        self
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn url(&self, path: &str) -> String {
        build_url_with_base(self.base_url.as_str(), path)
    }

    fn with_cookie(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.session_cookie {
            Some(cookie) => builder.header(COOKIE, cookie.expose_secret()),
            None => builder,
        }
    }
}

impl LinkApi for HttpClient {
    async fn link_details(
        &self,
        request: &LinkDetailsRequest,
    ) -> Result<LinkDetailsResponse, AppError> {
        let url = self.url(&self.endpoints.link_details);
        debug!(%url, "requesting link details");
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(map_request_error)?;

        handle_json_any_status(response).await
    }

    async fn increment_hits(&self, request: &IncrementHitsRequest) -> Result<(), AppError> {
        let url = self.url(&self.endpoints.increment_hits);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(map_request_error)?;

        handle_empty_response(response).await
    }
}

impl SessionApi for HttpClient {
    async fn status(&self) -> Result<SessionStatus, AppError> {
        let url = self.url(&self.endpoints.auth_check);
        let response = self
            .with_cookie(self.client.get(&url))
            .send()
            .await
            .map_err(map_request_error)?;

        handle_json_response(response).await
    }

    async fn logout(&self) -> Result<(), AppError> {
        let url = self.url(&self.endpoints.auth_logout);
        let response = self
            .with_cookie(self.client.post(&url))
            .send()
            .await
            .map_err(map_request_error)?;

        handle_empty_response(response).await
    }
}

/// Maps reqwest errors into `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    let message = err.to_string();
    if err.is_timeout() || looks_like_timeout(&message) {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {message}"))
    }
}

/// Decodes the body whatever the status; the link endpoint reports failures
/// as JSON with non-2xx codes.
async fn handle_json_any_status<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| AppError::Parse(format!("Failed to read response: {err}")))?;

    serde_json::from_str(&body).map_err(|err| {
        if status.is_success() {
            AppError::Parse(format!("Failed to decode response: {err}"))
        } else {
            AppError::Http {
                status: status.as_u16(),
                message: sanitize_body(&body),
            }
        }
    })
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Http {
            status: status.as_u16(),
            message: sanitize_body(&body),
        })
    }
}

/// Handles empty responses and returns sanitized HTTP errors when needed.
async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Http {
            status: status.as_u16(),
            message: sanitize_body(&body),
        })
    }
}
