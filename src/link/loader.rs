use super::{
    alias::Alias,
    types::{IncrementHitsRequest, LinkDetailsRequest, LinkDetailsResponse, LookupResult},
};
use crate::error::AppError;
use secrecy::{ExposeSecret, SecretString};
use std::future::Future;
use tracing::{debug, error, warn};

/// Transport for the link endpoints. Implemented with reqwest natively and with
/// gloo-net in the browser; tests use in-memory fakes.
pub trait LinkApi {
    /// Looks up an alias. Server-reported failures arrive as a decoded body,
    /// not as an error.
    fn link_details(
        &self,
        request: &LinkDetailsRequest,
    ) -> impl Future<Output = Result<LinkDetailsResponse, AppError>>;

    /// Increments the hit counter of an authenticated link.
    fn increment_hits(
        &self,
        request: &IncrementHitsRequest,
    ) -> impl Future<Output = Result<(), AppError>>;
}

/// One lookup attempt. Built fresh for every attempt and never mutated.
#[derive(Debug)]
pub struct LookupRequest {
    alias: Alias,
    password: Option<SecretString>,
}

impl LookupRequest {
    #[must_use]
    pub fn new(alias: Alias, password: Option<SecretString>) -> Self {
        Self { alias, password }
    }

    #[must_use]
    pub fn alias(&self) -> &Alias {
        &self.alias
    }

    #[must_use]
    pub fn password(&self) -> Option<&SecretString> {
        self.password.as_ref()
    }

    #[must_use]
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    pub(crate) fn to_wire(&self) -> LinkDetailsRequest {
        LinkDetailsRequest {
            alias: self.alias.as_str().to_string(),
            password: self
                .password
                .as_ref()
                .map(|password| password.expose_secret().to_string()),
        }
    }
}

/// Issues lookups and normalizes every outcome into a [`LookupResult`].
#[derive(Clone)]
pub struct DetailsLoader<A> {
    api: A,
}

impl<A: LinkApi> DetailsLoader<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Looks up the alias, mapping transport failures to `TransportError`.
    pub async fn lookup(&self, request: &LookupRequest) -> LookupResult {
        match self.api.link_details(&request.to_wire()).await {
            Ok(response) => {
                let result = LookupResult::from_response(response, request.has_password());
                debug!(alias = %request.alias, ?result, "link lookup resolved");
                result
            }
            Err(cause) => {
                if cause.is_transport() {
                    warn!(alias = %request.alias, error = %cause, "link lookup failed");
                } else {
                    error!(alias = %request.alias, error = %cause, "link lookup could not be sent");
                }
                LookupResult::TransportError { cause }
            }
        }
    }
}
