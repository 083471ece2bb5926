//! Session status for the footer. The status is fetched through an injected
//! [`SessionApi`] and refreshed explicitly after logout; nothing here reads
//! ambient global state. Only non-sensitive metadata (the username) is kept.

use crate::{config::Endpoints, error::AppError};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::debug;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionStatus {
    #[serde(default, alias = "isLoggedIn")]
    pub is_logged_in: bool,
    #[serde(default)]
    pub username: Option<String>,
}

/// Transport for the authentication endpoints.
pub trait SessionApi {
    fn status(&self) -> impl Future<Output = Result<SessionStatus, AppError>>;

    /// Invalidates the current session on the server.
    fn logout(&self) -> impl Future<Output = Result<(), AppError>>;
}

/// Fetches the status, treating failures as logged out.
pub async fn refresh<S: SessionApi>(api: &S) -> SessionStatus {
    match api.status().await {
        Ok(status) => status,
        Err(err) => {
            debug!(error = %err, "session status unavailable");
            SessionStatus::default()
        }
    }
}

/// Logs out, then refreshes the status so callers render the new state.
///
/// # Errors
/// Returns the logout error; the status is not refreshed in that case.
pub async fn logout_and_refresh<S: SessionApi>(api: &S) -> Result<SessionStatus, AppError> {
    api.logout().await?;
    Ok(refresh(api).await)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FooterAction {
    Account,
    Logout,
}

impl FooterAction {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Account => "ACCOUNT",
            Self::Logout => "LOGOUT",
        }
    }

    /// Page to navigate to, if the action navigates.
    #[must_use]
    pub fn target(self, endpoints: &Endpoints) -> Option<&str> {
        match self {
            Self::Account => Some(endpoints.account.as_str()),
            Self::Logout => None,
        }
    }
}

/// What the footer renders for a logged-in user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FooterModel {
    pub caption: &'static str,
    pub username: String,
    pub actions: [FooterAction; 2],
}

impl FooterModel {
    /// Returns `None` when there is no username to show.
    #[must_use]
    pub fn from_status(status: &SessionStatus) -> Option<Self> {
        let username = status
            .username
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())?;

        Some(Self {
            caption: "LOGGED IN AS",
            username: username.to_uppercase(),
            actions: [FooterAction::Account, FooterAction::Logout],
        })
    }
}
