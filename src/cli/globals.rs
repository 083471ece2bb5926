use crate::{error::AppError, native::HttpClient};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

/// Connection settings shared by every subcommand.
#[derive(Debug)]
pub struct GlobalArgs {
    pub base_url: String,
    pub timeout: Duration,
    pub redirect_delay: Duration,
    pub session_cookie: Option<SecretString>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            timeout: crate::config::DEFAULT_TIMEOUT,
            redirect_delay: crate::config::DEFAULT_REDIRECT_DELAY,
            session_cookie: None,
        }
    }

    pub fn set_session_cookie(&mut self, cookie: SecretString) {
        self.session_cookie = Some(cookie);
    }

    /// Builds the HTTP client for these settings.
    ///
    /// # Errors
    /// Returns `AppError::Config` when the base URL is invalid.
    pub fn client(&self) -> Result<HttpClient, AppError> {
        let client = HttpClient::new(&self.base_url, Some(self.timeout))?;
        Ok(match &self.session_cookie {
            Some(cookie) => {
                client.with_session_cookie(SecretString::from(cookie.expose_secret().to_string()))
            }
            None => client,
        })
    }

    /// Absolute URL of the page offering link creation.
    #[must_use]
    pub fn home_url(&self) -> String {
        crate::api::build_url_with_base(&self.base_url, &crate::config::Endpoints::default().home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() {
        let mut args = GlobalArgs::new("https://lnk.example".to_string());
        assert_eq!(args.redirect_delay, Duration::from_millis(1500));
        assert!(args.session_cookie.is_none());

        args.set_session_cookie(SecretString::from("session=abc".to_string()));
        assert_eq!(
            args.session_cookie.as_ref().map(ExposeSecret::expose_secret),
            Some("session=abc")
        );
        assert_eq!(args.home_url(), "https://lnk.example/linkr");
        assert!(args.client().is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let args = GlobalArgs::new("lnk example".to_string());
        assert!(matches!(args.client(), Err(AppError::Config(_))));
    }
}
