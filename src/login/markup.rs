//! Render snapshot of the login form. The snapshot carries everything a test
//! harness or a renderer needs: input ids and types, inline error messages, the
//! toggle and submit labels, and whether submit is disabled. `Display` emits
//! the equivalent HTML. The password value is never part of the snapshot.

use crate::{
    form::{FieldBinding, FieldValue, FormController},
    login::{LoginBindings, ViewState},
};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt;

pub const SUBMIT_LABEL: &str = "Login";
pub const SUBMIT_LOADING_LABEL: &str = "Logging in...";
pub const TOGGLE_SHOW_LABEL: &str = "Show";
pub const TOGGLE_HIDE_LABEL: &str = "Hide";

#[must_use]
pub const fn password_input_type(show_password: bool) -> &'static str {
    if show_password {
        "text"
    } else {
        "password"
    }
}

#[must_use]
pub const fn toggle_label(show_password: bool) -> &'static str {
    if show_password {
        TOGGLE_HIDE_LABEL
    } else {
        TOGGLE_SHOW_LABEL
    }
}

#[must_use]
pub const fn submit_label(is_loading: bool) -> &'static str {
    if is_loading {
        SUBMIT_LOADING_LABEL
    } else {
        SUBMIT_LABEL
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputMarkup {
    pub id: String,
    pub name: String,
    pub input_type: &'static str,
    /// Always empty for the password input.
    pub value: String,
    pub required: bool,
    pub min_length: Option<usize>,
    pub error: Option<String>,
}

impl InputMarkup {
    fn new(binding: &FieldBinding, input_type: &'static str, value: String, form: &FormController) -> Self {
        Self {
            id: binding.id.clone(),
            name: binding.name.clone(),
            input_type,
            value,
            required: binding.required,
            min_length: binding.min_length,
            error: form.error(&binding.name).map(|error| error.message.clone()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginMarkup {
    pub auth_error: Option<String>,
    pub email: InputMarkup,
    pub password: InputMarkup,
    pub toggle_label: &'static str,
    pub remember_me_id: String,
    pub remember_me: bool,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
}

impl LoginMarkup {
    pub(crate) fn new(bindings: &LoginBindings, form: &FormController, state: &ViewState) -> Self {
        let email_value = match form.value(&bindings.email.name) {
            Some(FieldValue::Text(text)) => text.clone(),
            _ => String::new(),
        };
        let remember_me = matches!(
            form.value(&bindings.remember_me.name),
            Some(FieldValue::Checked(true))
        );

        Self {
            auth_error: state.auth_error.clone(),
            email: InputMarkup::new(&bindings.email, "email", email_value, form),
            password: InputMarkup::new(
                &bindings.password,
                password_input_type(state.show_password),
                String::new(),
                form,
            ),
            toggle_label: toggle_label(state.show_password),
            remember_me_id: bindings.remember_me.id.clone(),
            remember_me,
            submit_label: submit_label(state.is_loading),
            submit_disabled: state.is_loading,
        }
    }
}

fn write_input(f: &mut fmt::Formatter<'_>, input: &InputMarkup) -> fmt::Result {
    write!(
        f,
        r#"<input id="{}" name="{}" type="{}""#,
        encode_double_quoted_attribute(&input.id),
        encode_double_quoted_attribute(&input.name),
        input.input_type,
    )?;
    if !input.value.is_empty() {
        write!(f, r#" value="{}""#, encode_double_quoted_attribute(&input.value))?;
    }
    if input.required {
        f.write_str(" required")?;
    }
    if let Some(min_length) = input.min_length {
        write!(f, r#" minlength="{min_length}""#)?;
    }
    if input.error.is_some() {
        f.write_str(r#" aria-invalid="true""#)?;
    }
    f.write_str(">")
}

fn write_error(f: &mut fmt::Formatter<'_>, error: Option<&String>) -> fmt::Result {
    match error {
        Some(message) => write!(f, r#"<span class="error">{}</span>"#, encode_text(message)),
        None => Ok(()),
    }
}

impl fmt::Display for LoginMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(r#"<div class="login-container"><form class="login-form" novalidate>"#)?;
        f.write_str("<h2>Login</h2>")?;

        if let Some(message) = &self.auth_error {
            write!(
                f,
                r#"<div class="auth-error" role="alert">{}</div>"#,
                encode_text(message)
            )?;
        }

        write!(
            f,
            r#"<div class="form-group"><label for="{}">Email</label>"#,
            encode_double_quoted_attribute(&self.email.id)
        )?;
        write_input(f, &self.email)?;
        write_error(f, self.email.error.as_ref())?;
        f.write_str("</div>")?;

        write!(
            f,
            r#"<div class="form-group"><label for="{}">Password</label><div class="password-input-container">"#,
            encode_double_quoted_attribute(&self.password.id)
        )?;
        write_input(f, &self.password)?;
        write!(
            f,
            r#"<button type="button" class="toggle-password">{}</button></div>"#,
            self.toggle_label
        )?;
        write_error(f, self.password.error.as_ref())?;
        f.write_str("</div>")?;

        let id = encode_double_quoted_attribute(&self.remember_me_id);
        write!(
            f,
            r#"<div class="form-group remember-me"><input id="{id}" name="{id}" type="checkbox"{}><label for="{id}">Remember me</label></div>"#,
            if self.remember_me { " checked" } else { "" }
        )?;

        write!(
            f,
            r#"<button type="submit" class="submit-button"{}>{}</button>"#,
            if self.submit_disabled { " disabled" } else { "" },
            self.submit_label
        )?;

        f.write_str("</form></div>")
    }
}
