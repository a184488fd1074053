use crate::{
    auth::HttpAuthDelegate,
    cli::{actions::fill, commands::form},
    config::AppConfig,
    login::LoginView,
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub form: form::Options,
    pub validate: bool,
}

/// Fill the form and print its markup. Nothing is sent to the login endpoint.
/// # Errors
/// Returns an error if the endpoint config is invalid.
pub fn execute(args: Args) -> Result<()> {
    let delegate = HttpAuthDelegate::new(&args.config).context("invalid login endpoint")?;
    let view = LoginView::new(Arc::new(delegate));
    fill(&view, &args.form);

    if args.validate {
        let errors = view.validate();
        debug!("Validation found {} field error(s)", errors.len());
    }

    println!("{}", view.render());

    Ok(())
}
