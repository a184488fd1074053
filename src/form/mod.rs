//! Field registry with validation. Views register each input once, push values
//! from input events, and route submits through [`FormController::handle_submit`]
//! (or [`FormController::validate`] when the submit work is async) so the
//! callback only runs when every registered rule passes.
//!
//! Errors are recomputed from scratch on every submit attempt. After the first
//! attempt, changing a field re-validates that field alone, so a corrected
//! value clears its message without waiting for the next submit.

pub mod rules;

pub use rules::{FieldValue, LengthRule, PatternRule, Rules};

use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Metadata a view attaches to the input element of a registered field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldBinding {
    pub name: String,
    pub id: String,
    pub required: bool,
    pub min_length: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

pub type FieldErrors = BTreeMap<String, FieldError>;

/// Snapshot of field values taken by a successful submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, FieldValue>);

impl FormValues {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Text of `name`, or `""` when absent or not a text field.
    #[must_use]
    pub fn text(&self, name: &str) -> &str {
        match self.0.get(name) {
            Some(FieldValue::Text(text)) => text,
            _ => "",
        }
    }

    /// Checked state of `name`; absent or text fields read as unchecked.
    #[must_use]
    pub fn checked(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(FieldValue::Checked(true)))
    }
}

#[derive(Debug)]
struct Field {
    name: String,
    rules: Rules,
    value: FieldValue,
}

#[derive(Debug, Default)]
pub struct FormController {
    fields: Vec<Field>,
    errors: FieldErrors,
    submit_count: u32,
}

impl FormController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `rules`. Re-registering a field replaces its rules and
    /// keeps its current value.
    pub fn register(&mut self, name: &str, rules: Rules) -> FieldBinding {
        let binding = FieldBinding {
            name: name.to_string(),
            id: name.to_string(),
            required: rules.required.is_some(),
            min_length: rules.min_length.as_ref().map(|rule| rule.value),
        };

        if let Some(field) = self.field_mut(name) {
            field.rules = rules;
        } else {
            self.fields.push(Field {
                name: name.to_string(),
                rules,
                value: FieldValue::default(),
            });
        }

        binding
    }

    /// Updates a text field. Returns `false` when `name` is not registered.
    pub fn set_text(&mut self, name: &str, value: impl Into<String>) -> bool {
        self.set_value(name, FieldValue::Text(value.into()))
    }

    /// Updates a checkbox field. Returns `false` when `name` is not registered.
    pub fn set_checked(&mut self, name: &str, checked: bool) -> bool {
        self.set_value(name, FieldValue::Checked(checked))
    }

    fn set_value(&mut self, name: &str, value: FieldValue) -> bool {
        let submitted = self.is_submitted();
        let Some(field) = self.field_mut(name) else {
            debug!("Ignoring value for unregistered field {name}");
            return false;
        };
        field.value = value;

        if submitted {
            let error = field.rules.check(&field.value).map(|message| FieldError {
                field: field.name.clone(),
                message: message.to_string(),
            });
            match error {
                Some(error) => {
                    self.errors.insert(name.to_string(), error);
                }
                None => {
                    self.errors.remove(name);
                }
            }
        }

        true
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[must_use]
    pub fn error(&self, name: &str) -> Option<&FieldError> {
        self.errors.get(name)
    }

    /// Whether at least one submit has been attempted.
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submit_count > 0
    }

    #[must_use]
    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// Runs every registered rule against the current values.
    ///
    /// # Errors
    ///
    /// Returns the full error map when any field fails. The map replaces the
    /// previous attempt's errors rather than adding to them.
    #[instrument(skip(self))]
    pub fn validate(&mut self) -> Result<FormValues, FieldErrors> {
        self.submit_count = self.submit_count.saturating_add(1);
        self.run_rules()
    }

    /// Same checks as [`validate`](Self::validate) without counting as a submit
    /// attempt, so changes are not revalidated afterwards.
    ///
    /// # Errors
    ///
    /// Returns the full error map when any field fails.
    pub fn trigger(&mut self) -> Result<FormValues, FieldErrors> {
        self.run_rules()
    }

    fn run_rules(&mut self) -> Result<FormValues, FieldErrors> {
        self.errors = self
            .fields
            .iter()
            .filter_map(|field| {
                field.rules.check(&field.value).map(|message| {
                    (
                        field.name.clone(),
                        FieldError {
                            field: field.name.clone(),
                            message: message.to_string(),
                        },
                    )
                })
            })
            .collect();

        if self.errors.is_empty() {
            Ok(FormValues(
                self.fields
                    .iter()
                    .map(|field| (field.name.clone(), field.value.clone()))
                    .collect(),
            ))
        } else {
            debug!("Form validation failed for {} field(s)", self.errors.len());
            Err(self.errors.clone())
        }
    }

    /// Validates, then calls `on_valid` exactly once if every rule passed.
    pub fn handle_submit<R>(&mut self, on_valid: impl FnOnce(FormValues) -> R) -> Option<R> {
        self.validate().ok().map(on_valid)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|field| field.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> FormController {
        let mut form = FormController::new();
        form.register("name", Rules::new().required("Name is required"));
        form.register(
            "code",
            Rules::new().min_length(4, "Code must be at least 4 characters"),
        );
        form.register("subscribe", Rules::new());
        form
    }

    #[test]
    fn register_returns_binding_metadata() {
        let mut form = FormController::new();
        let binding = form.register("code", Rules::new().required("x").min_length(4, "y"));
        assert_eq!(binding.name, "code");
        assert_eq!(binding.id, "code");
        assert!(binding.required);
        assert_eq!(binding.min_length, Some(4));
    }

    #[test]
    fn register_twice_keeps_value_and_replaces_rules() {
        let mut form = FormController::new();
        form.register("name", Rules::new().required("first"));
        form.set_text("name", "kept");
        form.register("name", Rules::new().min_length(10, "second"));

        assert_eq!(form.value("name"), Some(&FieldValue::Text("kept".to_string())));
        let errors = form.validate().unwrap_err();
        assert_eq!(errors["name"].message, "second");
    }

    #[test]
    fn handle_submit_skips_callback_on_failure() {
        let mut form = controller();
        let mut calls = 0;
        let result = form.handle_submit(|_| calls += 1);

        assert!(result.is_none());
        assert_eq!(calls, 0);
        assert_eq!(form.error("name").map(|e| e.message.as_str()), Some("Name is required"));
        assert!(form.error("code").is_none());
    }

    #[test]
    fn handle_submit_calls_callback_once_with_values() {
        let mut form = controller();
        form.set_text("name", "ada");
        form.set_text("code", "1234");
        form.set_checked("subscribe", true);

        let mut calls = 0;
        let values = form.handle_submit(|values| {
            calls += 1;
            values
        });

        assert_eq!(calls, 1);
        let values = values.unwrap();
        assert_eq!(values.text("name"), "ada");
        assert_eq!(values.text("code"), "1234");
        assert!(values.checked("subscribe"));
        assert!(form.errors().is_empty());
    }

    #[test]
    fn repeated_invalid_submits_yield_identical_errors() {
        let mut form = controller();
        form.set_text("code", "12");

        let first = form.validate().unwrap_err();
        let second = form.validate().unwrap_err();

        assert_eq!(first, second);
        assert_eq!(form.errors().len(), 2);
        assert_eq!(form.submit_count(), 2);
    }

    #[test]
    fn changes_before_first_submit_do_not_validate() {
        let mut form = controller();
        form.set_text("code", "1");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn changes_after_submit_revalidate_the_field() {
        let mut form = controller();
        assert!(form.validate().is_err());
        assert!(form.error("name").is_some());

        form.set_text("name", "ada");
        assert!(form.error("name").is_none());

        form.set_text("code", "1");
        assert_eq!(
            form.error("code").map(|e| e.message.as_str()),
            Some("Code must be at least 4 characters")
        );
    }

    #[test]
    fn trigger_reports_errors_without_counting_a_submit() {
        let mut form = controller();
        let errors = form.trigger().unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(!form.is_submitted());
        assert_eq!(form.submit_count(), 0);

        form.set_text("name", "ada");
        assert!(form.error("name").is_some());
    }

    #[test]
    fn unregistered_fields_are_ignored() {
        let mut form = controller();
        assert!(!form.set_text("missing", "value"));
        assert!(form.value("missing").is_none());
    }

    #[test]
    fn unchecked_checkbox_reads_false() {
        let mut form = controller();
        form.set_text("name", "ada");
        let values = form.validate().unwrap();
        assert!(!values.checked("subscribe"));
    }
}
