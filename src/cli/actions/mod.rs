pub mod login;
pub mod render;

mod run;

use crate::{cli::commands::form, login::LoginView};
use secrecy::ExposeSecret;

#[derive(Debug)]
pub enum Action {
    Render(render::Args),
    Login(login::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}

/// Types the form input into the view the way a user would.
fn fill(view: &LoginView, input: &form::Options) {
    view.set_email(&input.email);
    view.set_password(input.password.expose_secret());
    view.set_remember_me(input.remember_me);
    for _ in 0..input.toggle_password {
        view.toggle_password_visibility();
    }
}
