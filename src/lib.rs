//! # login-form
//!
//! A login form with client-side validation and delegated authentication.
//!
//! ## Layers
//!
//! - [`form`] registers named fields with validation rules and gates submit
//!   callbacks on them.
//! - [`login`] is the login view-model: email, password and "remember me"
//!   fields, the loading and password-visibility state, and the rendered markup.
//! - [`auth`] defines the [`auth::AuthDelegate`] contract the view calls on a
//!   validated submit, plus an HTTP implementation for native targets.
//! - `web` (wasm32 only) renders the view-model with Leptos and supplies the
//!   delegate through an `AuthProvider` context.
//! - `cli` (native only) drives the view-model headlessly from the terminal.
//!
//! ## Failure policy
//!
//! Authentication failures are logged and not shown to the user unless the view
//! is built with [`login::AuthFailurePolicy::Surface`]. Validation errors are
//! always rendered inline under their field.
//!
//! Passwords are carried as `secrecy::SecretString` and are never logged or
//! written into markup.

pub mod auth;
#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
pub mod config;
pub mod errors;
pub mod form;
pub mod login;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

pub use errors::AppError;
