//! Browser implementation of [`AuthDelegate`]. The request goes through
//! `fetch` with cookies included and an abort timeout so a hung endpoint
//! cannot leave the form stuck in its loading state.

use crate::{
    auth::{AuthDelegate, types::LoginRequest},
    config::AppConfig,
    errors::{AppError, sanitize_body},
};
use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use gloo_timers::callback::Timeout;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};
use web_sys::{AbortController, AbortSignal, RequestCredentials};

pub struct WebAuthDelegate {
    login_url: Result<String, AppError>,
    timeout_ms: u32,
}

impl WebAuthDelegate {
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when the endpoint URL is invalid.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let login_url = config.login_url()?.to_string();
        let timeout_ms: u32 = config
            .request_timeout_secs
            .saturating_mul(1000)
            .try_into()
            .unwrap_or(u32::MAX);

        Ok(Self {
            login_url: Ok(login_url),
            timeout_ms,
        })
    }

    /// Delegate that fails every login with `err`.
    pub(crate) fn unconfigured(err: AppError) -> Self {
        Self {
            login_url: Err(err),
            timeout_ms: 0,
        }
    }
}

#[async_trait(?Send)]
impl AuthDelegate for WebAuthDelegate {
    #[instrument(skip_all)]
    async fn login(
        &self,
        email: &str,
        password: &SecretString,
        remember_me: bool,
    ) -> Result<(), AppError> {
        let url = self.login_url.clone()?;
        let payload = serde_json::to_string(&LoginRequest {
            email: email.to_string(),
            password: password.expose_secret().to_string(),
            remember_me,
        })
        .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;

        let response = send_with_timeout(self.timeout_ms, move |signal| {
            Request::post(&url)
                .header("Content-Type", "application/json")
                .credentials(RequestCredentials::Include)
                .abort_signal(Some(signal))
                .body(payload)
                .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))
        })
        .await?;

        debug!("Login endpoint responded with {}", response.status());
        handle_empty_response(response).await
    }
}

fn map_request_error(err: gloo_net::Error) -> AppError {
    let message = err.to_string();
    let lowered = message.to_lowercase();

    if lowered.contains("timeout") || lowered.contains("abort") {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {message}"))
    }
}

async fn send_with_timeout(
    timeout_ms: u32,
    build_request: impl FnOnce(&AbortSignal) -> Result<Request, AppError>,
) -> Result<Response, AppError> {
    let controller = AbortController::new()
        .map_err(|_| AppError::Config("Failed to initialize request timeout.".to_string()))?;
    let signal = controller.signal();
    let timeout_controller = controller.clone();
    let _timeout = Timeout::new(timeout_ms, move || timeout_controller.abort());

    let request = build_request(&signal)?;
    request.send().await.map_err(map_request_error)
}

async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    if response.ok() {
        Ok(())
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Http {
            status,
            message: sanitize_body(&body),
        })
    }
}
