//! Endpoint paths and workflow timing shared by the terminal and web front ends.
//! Both front ends start from these defaults and layer their own overrides on
//! top (CLI flags and env vars, or `window.LINKR_CONFIG`).

use std::time::Duration;

/// Delay between showing the success message and navigating away.
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Default request timeout applied to every HTTP call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Server routes consumed by the client. Paths are relative to the API base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub link_details: String,
    pub increment_hits: String,
    pub auth_check: String,
    pub auth_logout: String,
    pub home: String,
    pub account: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            link_details: "/linkr/api/link/details".to_string(),
            increment_hits: "/linkr/api/link/hits/increment".to_string(),
            auth_check: "/linkr/api/auth/check".to_string(),
            auth_logout: "/linkr/api/auth/logout".to_string(),
            home: "/linkr".to_string(),
            account: "/linkr/account".to_string(),
        }
    }
}

/// Parses a millisecond delay, falling back to the default for empty or invalid input.
#[must_use]
pub fn parse_redirect_delay(value: Option<&str>) -> Duration {
    value
        .map(str::trim)
        .and_then(|raw| raw.parse::<u64>().ok())
        .map_or(DEFAULT_REDIRECT_DELAY, Duration::from_millis)
}
