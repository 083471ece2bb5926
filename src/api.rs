//! Target-independent HTTP helpers. The reqwest transport (native) and the
//! gloo-net transport (wasm32) both build URLs and sanitize error bodies here
//! so the two front ends report failures the same way.

/// Maximum number of error body characters surfaced to the UI.
pub const MAX_ERROR_CHARS: usize = 200;

/// Builds a URL from an explicit base URL and the provided path.
#[must_use]
pub fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
#[must_use]
pub fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

/// Classifies a transport error message as a timeout or abort.
#[must_use]
pub fn looks_like_timeout(message: &str) -> bool {
    let lowered = message.to_lowercase();
    lowered.contains("timeout") || lowered.contains("timed out") || lowered.contains("abort")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_joins_base_and_path() {
        assert_eq!(
            build_url_with_base("https://lnk.example/", "/linkr/api/link/details"),
            "https://lnk.example/linkr/api/link/details"
        );
        assert_eq!(
            build_url_with_base("  ", "/linkr/api/auth/check"),
            "/linkr/api/auth/check"
        );
    }

    #[test]
    fn sanitize_body_truncates_and_defaults() {
        assert_eq!(sanitize_body("   "), "Request failed.");
        let long = "x".repeat(MAX_ERROR_CHARS + 50);
        assert_eq!(sanitize_body(&long).len(), MAX_ERROR_CHARS);
        assert_eq!(sanitize_body(" nope \n"), "nope");
    }

    #[test]
    fn timeout_detection() {
        assert!(looks_like_timeout("operation timed out"));
        assert!(looks_like_timeout("The user aborted a request."));
        assert!(!looks_like_timeout("connection refused"));
    }
}
