//! Validation rules attached to a registered field.

use regex::{Regex, RegexBuilder};
use tracing::warn;

/// Current value of a registered field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl FieldValue {
    fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Checked(checked) => !checked,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LengthRule {
    pub value: usize,
    pub message: String,
}

#[derive(Clone, Debug)]
pub struct PatternRule {
    source: String,
    regex: Option<Regex>,
    pub message: String,
}

impl PatternRule {
    /// Compiles `source` once. An invalid pattern never matches.
    ///
    /// Classes and case folding are ASCII-only, like a browser pattern without
    /// the `u` flag: `[A-Z]` never matches `ſ` or the Kelvin sign.
    pub fn new(source: &str, case_insensitive: bool, message: impl Into<String>) -> Self {
        let regex = match RegexBuilder::new(source)
            .case_insensitive(case_insensitive)
            .unicode(false)
            .build()
        {
            Ok(regex) => Some(regex),
            Err(err) => {
                warn!("Invalid field pattern {source:?}: {err}");
                None
            }
        };

        Self {
            source: source.to_string(),
            regex,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(value))
    }
}

/// Constraints for one field, checked in the order required, min length, pattern.
#[derive(Clone, Debug, Default)]
pub struct Rules {
    pub required: Option<String>,
    pub min_length: Option<LengthRule>,
    pub pattern: Option<PatternRule>,
}

impl Rules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = Some(message.into());
        self
    }

    #[must_use]
    pub fn min_length(mut self, value: usize, message: impl Into<String>) -> Self {
        self.min_length = Some(LengthRule {
            value,
            message: message.into(),
        });
        self
    }

    #[must_use]
    pub fn pattern(mut self, rule: PatternRule) -> Self {
        self.pattern = Some(rule);
        self
    }

    /// Returns the message of the first rule `value` violates.
    ///
    /// Empty values only fail `required`; the other rules apply to input the
    /// user actually typed.
    #[must_use]
    pub fn check(&self, value: &FieldValue) -> Option<&str> {
        if value.is_empty() {
            return self.required.as_deref();
        }

        let FieldValue::Text(text) = value else {
            return None;
        };

        if let Some(rule) = &self.min_length {
            // UTF-16 code units, as the `minlength` attribute counts them
            if text.encode_utf16().count() < rule.value {
                return Some(rule.message.as_str());
            }
        }

        if let Some(rule) = &self.pattern {
            if !rule.is_match(text) {
                return Some(rule.message.as_str());
            }
        }

        None
    }
}
