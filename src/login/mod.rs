//! Login form: the email, password and "remember me" fields, their validation
//! rules, and the view-model that submits them to an [`AuthDelegate`].
//!
//! [`AuthDelegate`]: crate::auth::AuthDelegate

pub mod markup;
pub mod view;

pub use markup::LoginMarkup;
pub use view::{AuthFailurePolicy, LoginView, SubmitOutcome, ViewState};

use crate::form::{FieldBinding, FormController, FormValues, PatternRule, Rules};
use secrecy::SecretString;

pub const EMAIL_FIELD: &str = "email";
pub const PASSWORD_FIELD: &str = "password";
pub const REMEMBER_ME_FIELD: &str = "rememberMe";

/// Matched case-insensitively.
pub const EMAIL_PATTERN: &str = r"^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$";
pub const MIN_PASSWORD_LENGTH: usize = 6;

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email address";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";

#[must_use]
pub fn email_rules() -> Rules {
    Rules::new()
        .required(EMAIL_REQUIRED)
        .pattern(PatternRule::new(EMAIL_PATTERN, true, EMAIL_INVALID))
}

#[must_use]
pub fn password_rules() -> Rules {
    Rules::new()
        .required(PASSWORD_REQUIRED)
        .min_length(MIN_PASSWORD_LENGTH, PASSWORD_TOO_SHORT)
}

/// Bindings returned when the login fields are registered on a form.
#[derive(Clone, Debug)]
pub struct LoginBindings {
    pub email: FieldBinding,
    pub password: FieldBinding,
    pub remember_me: FieldBinding,
}

pub fn register_login_fields(form: &mut FormController) -> LoginBindings {
    LoginBindings {
        email: form.register(EMAIL_FIELD, email_rules()),
        password: form.register(PASSWORD_FIELD, password_rules()),
        remember_me: form.register(REMEMBER_ME_FIELD, Rules::new()),
    }
}

/// Validated login input, alive for the duration of one submit.
#[derive(Debug)]
pub struct LoginFormInput {
    pub email: String,
    pub password: SecretString,
    pub remember_me: bool,
}

impl From<&FormValues> for LoginFormInput {
    fn from(values: &FormValues) -> Self {
        Self {
            email: values.text(EMAIL_FIELD).to_string(),
            password: SecretString::from(values.text(PASSWORD_FIELD).to_string()),
            remember_me: values.checked(REMEMBER_ME_FIELD),
        }
    }
}
