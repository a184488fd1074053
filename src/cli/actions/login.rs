use crate::{
    auth::HttpAuthDelegate,
    cli::{actions::fill, commands::form},
    config::AppConfig,
    login::{AuthFailurePolicy, LoginView, SubmitOutcome},
};
use anyhow::{Context, Result, anyhow, bail};
use std::sync::Arc;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub form: form::Options,
    pub policy: AuthFailurePolicy,
}

/// Fill and submit the form, then print the resulting markup.
/// # Errors
/// Returns an error if the endpoint config is invalid, validation blocks the
/// submit, or the login endpoint rejects the credentials.
pub async fn execute(args: Args) -> Result<()> {
    let delegate = HttpAuthDelegate::new(&args.config).context("invalid login endpoint")?;
    info!("Login endpoint: {}", delegate.login_url());

    let view = LoginView::with_policy(Arc::new(delegate), args.policy);
    fill(&view, &args.form);

    let outcome = view.submit().await;
    println!("{}", view.render());

    match outcome {
        SubmitOutcome::LoggedIn => {
            info!("Logged in as {}", args.form.email);
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            let fields = errors.keys().cloned().collect::<Vec<_>>().join(", ");
            bail!("validation failed: {fields}")
        }
        SubmitOutcome::Failed(err) => Err(anyhow!(err).context("login failed")),
        SubmitOutcome::Busy => bail!("a login is already in progress"),
    }
}
