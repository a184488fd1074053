//! HTTP implementation of [`AuthDelegate`] for native targets. It posts the
//! credentials as JSON and treats any 2xx as a successful login; session
//! cookies or tokens in the response are left to the caller's HTTP stack.

use crate::{
    auth::{types::LoginRequest, AuthDelegate},
    config::AppConfig,
    errors::{sanitize_body, AppError},
    APP_USER_AGENT,
};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

#[derive(Clone, Debug)]
pub struct HttpAuthDelegate {
    client: Client,
    login_url: Url,
}

impl HttpAuthDelegate {
    /// Builds a delegate for the configured login endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when the endpoint URL is invalid or the
    /// HTTP client cannot be created.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let login_url = config.login_url()?;
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|err| AppError::Config(format!("Error creating HTTP client: {err}")))?;

        Ok(Self { client, login_url })
    }

    #[must_use]
    pub fn login_url(&self) -> &Url {
        &self.login_url
    }
}

#[async_trait]
impl AuthDelegate for HttpAuthDelegate {
    #[instrument(skip_all, fields(url = %self.login_url))]
    async fn login(
        &self,
        email: &str,
        password: &SecretString,
        remember_me: bool,
    ) -> Result<(), AppError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.expose_secret().to_string(),
            remember_me,
        };

        let response = self
            .client
            .post(self.login_url.clone())
            .json(&request)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        debug!("Login endpoint responded with {status}");

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
}

fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_resolves_login_url() {
        let config = AppConfig {
            api_base_url: "https://auth.example.com/".to_string(),
            login_path: "/v1/auth/login".to_string(),
            request_timeout_secs: 5,
        };
        let delegate = HttpAuthDelegate::new(&config).unwrap();
        assert_eq!(
            delegate.login_url().as_str(),
            "https://auth.example.com/v1/auth/login"
        );
    }

    #[test]
    fn new_rejects_invalid_base_url() {
        let config = AppConfig {
            api_base_url: "::".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            HttpAuthDelegate::new(&config),
            Err(AppError::Config(_))
        ));
    }
}
