//! Browser rendering of the login view-model with Leptos. Compiled for
//! `wasm32` only; the delegate is supplied through [`AuthProvider`].

mod app;
mod client;
mod console;
mod login_page;
mod state;

pub use app::App;
pub use client::WebAuthDelegate;
pub use login_page::LoginPage;
pub use state::{AuthContext, AuthProvider, use_auth};

use leptos::prelude::mount_to_body;

/// Installs the panic hook and console logging, then mounts [`App`].
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console::init() {
        web_sys::console::warn_1(&format!("Logging disabled: {err}").into());
    }
    mount_to_body(App);
}
