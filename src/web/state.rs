//! Auth context for the browser. The provider supplies the [`AuthDelegate`]
//! that the login page calls on a validated submit. Nothing about the session
//! is kept here; cookies set by the login endpoint stay `HttpOnly`.

use crate::{auth::AuthDelegate, config::AppConfig, web::client::WebAuthDelegate};
use leptos::prelude::*;
use std::sync::Arc;
use tracing::error;

#[derive(Clone)]
/// Delegate context shared through Leptos.
pub struct AuthContext {
    pub delegate: Arc<dyn AuthDelegate>,
}

impl AuthContext {
    #[must_use]
    pub fn new(delegate: Arc<dyn AuthDelegate>) -> Self {
        Self { delegate }
    }

    /// Context backed by the configured login endpoint.
    fn from_config() -> Self {
        let config = AppConfig::load();
        let delegate = WebAuthDelegate::new(&config).unwrap_or_else(|err| {
            error!("Login endpoint misconfigured: {err}");
            WebAuthDelegate::unconfigured(err)
        });
        Self::new(Arc::new(delegate))
    }
}

/// Provides the auth context. Without an explicit `delegate` the endpoint
/// comes from [`AppConfig::load`].
#[component]
pub fn AuthProvider(
    #[prop(optional)] delegate: Option<Arc<dyn AuthDelegate>>,
    children: Children,
) -> impl IntoView {
    let auth = delegate.map_or_else(AuthContext::from_config, AuthContext::new);
    provide_context(auth);

    view! { {children()} }
}

/// Returns the current auth context or one built from config.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(AuthContext::from_config)
}
