use crate::config::{AppConfig, DEFAULT_API_BASE_URL, DEFAULT_LOGIN_PATH};
use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_LOGIN_PATH: &str = "login-path";
pub const ARG_TIMEOUT: &str = "timeout";

/// Builds the endpoint config from matches.
///
/// # Errors
/// Returns an error if an argument is missing or blank.
pub fn parse(matches: &ArgMatches) -> Result<AppConfig> {
    let get_non_empty = |id: &str| {
        matches
            .get_one::<String>(id)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .with_context(|| format!("missing required argument: --{id}"))
    };

    Ok(AppConfig {
        api_base_url: get_non_empty(ARG_API_URL)?,
        login_path: get_non_empty(ARG_LOGIN_PATH)?,
        request_timeout_secs: matches
            .get_one::<u64>(ARG_TIMEOUT)
            .copied()
            .context("missing required argument: --timeout")?,
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Base URL of the authentication API")
                .default_value(DEFAULT_API_BASE_URL)
                .env("LOGIN_FORM_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_LOGIN_PATH)
                .long(ARG_LOGIN_PATH)
                .help("Login endpoint path, joined to the API URL")
                .default_value(DEFAULT_LOGIN_PATH)
                .env("LOGIN_FORM_LOGIN_PATH")
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds")
                .default_value("10")
                .env("LOGIN_FORM_TIMEOUT")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}
