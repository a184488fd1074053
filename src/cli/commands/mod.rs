pub mod endpoint;
pub mod form;
pub mod logging;

use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const CMD_RENDER: &str = "render";
pub const CMD_LOGIN: &str = "login";
pub const ARG_VALIDATE: &str = "validate";
pub const ARG_SURFACE_ERRORS: &str = "surface-errors";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let render = form::with_args(
        Command::new(CMD_RENDER)
            .about("Fill the login form and print its markup")
            .arg(
                Arg::new(ARG_VALIDATE)
                    .long(ARG_VALIDATE)
                    .help("Run validation before rendering so field errors show")
                    .action(ArgAction::SetTrue),
            ),
    );

    let login = form::with_args(
        Command::new(CMD_LOGIN)
            .about("Fill and submit the login form against the authentication API")
            .arg(
                Arg::new(ARG_SURFACE_ERRORS)
                    .long(ARG_SURFACE_ERRORS)
                    .help("Show authentication failures in the form instead of only logging them")
                    .action(ArgAction::SetTrue),
            ),
    );

    let command = Command::new("login-form")
        .about("Login form with client-side validation")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(render)
        .subcommand(login);

    logging::with_args(endpoint::with_args(command))
}
