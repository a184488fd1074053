use crate::cli::{actions::Action, commands, dispatch, telemetry};
use anyhow::Result;

/// Map verbosity count to tracing level
const fn get_verbosity_level(verbosity: u8) -> Option<tracing::Level> {
    match verbosity {
        0 => None,
        1 => Some(tracing::Level::WARN),
        2 => Some(tracing::Level::INFO),
        3 => Some(tracing::Level::DEBUG),
        _ => Some(tracing::Level::TRACE),
    }
}

/// Parses the command line, installs the subscriber and returns the action to run.
///
/// # Errors
///
/// Returns an error if telemetry initialization or action dispatch fails
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    // globals given after the subcommand only land in its matches
    let scope = matches.subcommand().map_or(&matches, |(_, sub)| sub);
    let verbosity_level = get_verbosity_level(
        scope
            .get_one::<u8>(commands::logging::ARG_VERBOSITY)
            .copied()
            .unwrap_or(0),
    );

    telemetry::init(verbosity_level)?;

    dispatch::handler(&matches)
}
