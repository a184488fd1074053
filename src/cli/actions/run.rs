use crate::cli::actions::{Action, login, render};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Render(args) => render::execute(args),
        Action::Login(args) => login::execute(args).await,
    }
}
