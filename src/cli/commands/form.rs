use clap::{Arg, ArgAction, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_REMEMBER_ME: &str = "remember-me";
pub const ARG_TOGGLE_PASSWORD: &str = "toggle-password";

/// Field input for one form session. Values are passed through untouched;
/// the form decides what is valid.
#[derive(Debug)]
pub struct Options {
    pub email: String,
    pub password: SecretString,
    pub remember_me: bool,
    pub toggle_password: u8,
}

impl Options {
    /// Parse form arguments from subcommand matches.
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        let get = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();

        Self {
            email: get(ARG_EMAIL),
            password: SecretString::from(get(ARG_PASSWORD)),
            remember_me: matches.get_flag(ARG_REMEMBER_ME),
            toggle_password: matches.get_count(ARG_TOGGLE_PASSWORD),
        }
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_EMAIL)
                .short('e')
                .long(ARG_EMAIL)
                .help("Email address typed into the form"),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .short('p')
                .long(ARG_PASSWORD)
                .help("Password typed into the form")
                .env("LOGIN_FORM_PASSWORD")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_REMEMBER_ME)
                .long(ARG_REMEMBER_ME)
                .help("Tick the \"Remember me\" checkbox")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_TOGGLE_PASSWORD)
                .short('t')
                .long(ARG_TOGGLE_PASSWORD)
                .help("Click the password visibility toggle, repeat to click again")
                .action(ArgAction::Count),
        )
}
