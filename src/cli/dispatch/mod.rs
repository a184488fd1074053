//! Maps parsed CLI arguments to the action to run.

use crate::cli::actions::{Action, login, render};
use crate::cli::commands::{ARG_SURFACE_ERRORS, ARG_VALIDATE, CMD_LOGIN, CMD_RENDER, endpoint, form};
use crate::login::AuthFailurePolicy;
use anyhow::{Result, bail};

/// Map CLI matches to an action.
///
/// # Errors
/// Returns an error if the subcommand is unknown or an argument is missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((CMD_RENDER, sub)) => Ok(Action::Render(render::Args {
            config: endpoint::parse(sub)?,
            form: form::Options::parse(sub),
            validate: sub.get_flag(ARG_VALIDATE),
        })),
        Some((CMD_LOGIN, sub)) => Ok(Action::Login(login::Args {
            config: endpoint::parse(sub)?,
            form: form::Options::parse(sub),
            policy: if sub.get_flag(ARG_SURFACE_ERRORS) {
                AuthFailurePolicy::Surface
            } else {
                AuthFailurePolicy::LogOnly
            },
        })),
        Some((name, _)) => bail!("unknown command: {name}"),
        None => bail!("missing command, try --help"),
    }
}
