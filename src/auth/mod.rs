//! Authentication delegate contract. The login view calls
//! [`AuthDelegate::login`] once per validated submit and only observes whether
//! it succeeded; sessions, tokens and redirects belong to the implementation.
//! Implementations must never log the password.

#[cfg(not(target_arch = "wasm32"))]
pub mod client;
pub mod types;

#[cfg(not(target_arch = "wasm32"))]
pub use client::HttpAuthDelegate;

use crate::errors::AppError;
use async_trait::async_trait;
use secrecy::SecretString;

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait AuthDelegate: Send + Sync {
    /// Exchanges credentials with the authentication backend.
    ///
    /// # Errors
    ///
    /// Returns an [`AppError`] when the backend rejects the credentials or
    /// cannot be reached.
    async fn login(
        &self,
        email: &str,
        password: &SecretString,
        remember_me: bool,
    ) -> Result<(), AppError>;
}
