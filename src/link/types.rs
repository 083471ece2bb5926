//! Request and response types for the link endpoints, plus the normalized
//! lookup outcome. Request payloads carry link passwords, so they must never be
//! logged.

use crate::error::AppError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize)]
pub struct LinkDetailsRequest {
    pub alias: String,
    pub password: Option<String>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct IncrementHitsRequest {
    pub link_id: i64,
    pub password: Option<String>,
}

/// Server-reported failure reason. Unknown codes decode to `Unrecognized`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum FailureCode {
    #[serde(rename = "failure_nonexistent_link")]
    NonexistentLink,
    #[serde(rename = "failure_incorrect_link_password")]
    IncorrectLinkPassword,
    #[serde(other)]
    Unrecognized,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkDetails {
    /// Only needed to record a hit.
    #[serde(default)]
    pub link_id: Option<i64>,
    #[serde(default)]
    pub outgoing_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkDetailsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub failure: Option<FailureCode>,
    #[serde(default)]
    pub details: Option<LinkDetails>,
}

/// Outcome of one lookup attempt. Exactly one variant per response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupResult {
    Redirect {
        link_id: Option<i64>,
        destination: String,
    },
    NotFound,
    PasswordRequired,
    PasswordRejected,
    TransportError { cause: AppError },
}

impl LookupResult {
    /// Normalizes a decoded response.
    ///
    /// A destination wins over any failure code. A password failure is a
    /// rejection only when the request carried a password; every other
    /// response without a destination is `NotFound`.
    #[must_use]
    pub fn from_response(response: LinkDetailsResponse, password_supplied: bool) -> Self {
        let destination = response.details.as_ref().and_then(|details| {
            details
                .outgoing_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(|url| (details.link_id, url.to_string()))
        });

        if let Some((link_id, destination)) = destination {
            return Self::Redirect {
                link_id,
                destination,
            };
        }

        match response.failure {
            Some(FailureCode::IncorrectLinkPassword) if password_supplied => Self::PasswordRejected,
            Some(FailureCode::IncorrectLinkPassword) => Self::PasswordRequired,
            Some(FailureCode::NonexistentLink | FailureCode::Unrecognized) | None => Self::NotFound,
        }
    }

    #[must_use]
    pub const fn needs_password(&self) -> bool {
        matches!(self, Self::PasswordRequired | Self::PasswordRejected)
    }

    #[must_use]
    pub fn destination(&self) -> Option<&str> {
        match self {
            Self::Redirect { destination, .. } => Some(destination),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> LinkDetailsResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn destination_yields_redirect() {
        let response = decode(json!({
            "success": true,
            "details": {"link_id": 7, "outgoing_url": "https://example.com"}
        }));
        assert_eq!(
            LookupResult::from_response(response, false),
            LookupResult::Redirect {
                link_id: Some(7),
                destination: "https://example.com".to_string()
            }
        );
    }

    #[test]
    fn destination_overrides_failure_code() {
        let response = decode(json!({
            "success": false,
            "failure": "failure_incorrect_link_password",
            "details": {"link_id": 3, "outgoing_url": "https://example.org"}
        }));
        assert_eq!(
            LookupResult::from_response(response, true).destination(),
            Some("https://example.org")
        );
    }

    #[test]
    fn destination_without_link_id_still_redirects() {
        let response = decode(json!({
            "success": true,
            "details": {"outgoing_url": "https://example.com"}
        }));
        assert_eq!(
            LookupResult::from_response(response, true),
            LookupResult::Redirect {
                link_id: None,
                destination: "https://example.com".to_string()
            }
        );
    }

    #[test]
    fn nonexistent_link_is_not_found() {
        let response = decode(json!({
            "success": false,
            "failure": "failure_nonexistent_link"
        }));
        assert_eq!(
            LookupResult::from_response(response, false),
            LookupResult::NotFound
        );
    }

    #[test]
    fn password_failure_depends_on_supplied_password() {
        let body = json!({"success": false, "failure": "failure_incorrect_link_password"});
        assert_eq!(
            LookupResult::from_response(decode(body.clone()), false),
            LookupResult::PasswordRequired
        );
        assert_eq!(
            LookupResult::from_response(decode(body), true),
            LookupResult::PasswordRejected
        );
    }

    #[test]
    fn unknown_or_absent_failure_defaults_to_not_found() {
        let unknown = decode(json!({"success": false, "failure": "failure_rate_limited"}));
        assert_eq!(unknown.failure, Some(FailureCode::Unrecognized));
        assert_eq!(
            LookupResult::from_response(unknown, false),
            LookupResult::NotFound
        );

        let empty = decode(json!({"success": true}));
        assert_eq!(
            LookupResult::from_response(empty, false),
            LookupResult::NotFound
        );

        let blank_url = decode(json!({
            "success": true,
            "details": {"link_id": 1, "outgoing_url": "  "}
        }));
        assert_eq!(
            LookupResult::from_response(blank_url, false),
            LookupResult::NotFound
        );
    }

    #[test]
    fn request_serializes_absent_password_as_null() {
        let request = LinkDetailsRequest {
            alias: "abc".to_string(),
            password: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"alias": "abc", "password": null})
        );
    }
}
