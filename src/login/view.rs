//! Login view-model. It owns the form controller and the view state, and on a
//! validated submit calls the injected [`AuthDelegate`] while the in-flight
//! guard holds `is_loading`.
//!
//! State changes are published on a `watch` channel; renderers subscribe and
//! redraw whenever [`ViewState`] changes.

use crate::{
    auth::AuthDelegate,
    errors::AppError,
    form::{FieldErrors, FormController},
    login::{
        markup::LoginMarkup, register_login_fields, LoginBindings, LoginFormInput, EMAIL_FIELD,
        PASSWORD_FIELD, REMEMBER_ME_FIELD,
    },
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{debug, error, info, instrument};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub is_loading: bool,
    pub show_password: bool,
    /// Only set under [`AuthFailurePolicy::Surface`].
    pub auth_error: Option<String>,
}

/// What the view does with a failed login call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthFailurePolicy {
    /// Log the failure and leave the form untouched.
    #[default]
    LogOnly,
    /// Log the failure and show its message in a banner above the form.
    Surface,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// A login attempt was already in flight; nothing was done.
    Busy,
    Invalid(FieldErrors),
    LoggedIn,
    Failed(AppError),
}

/// Holds `is_loading` for the lifetime of one delegate call.
struct InFlight<'a> {
    state: &'a watch::Sender<ViewState>,
}

impl<'a> InFlight<'a> {
    fn begin(state: &'a watch::Sender<ViewState>) -> Option<Self> {
        let started = state.send_if_modified(|current| {
            if current.is_loading {
                false
            } else {
                current.is_loading = true;
                true
            }
        });
        started.then_some(Self { state })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|current| current.is_loading = false);
    }
}

pub struct LoginView {
    form: Mutex<FormController>,
    bindings: LoginBindings,
    state: watch::Sender<ViewState>,
    delegate: Arc<dyn AuthDelegate>,
    policy: AuthFailurePolicy,
}

impl LoginView {
    #[must_use]
    pub fn new(delegate: Arc<dyn AuthDelegate>) -> Self {
        Self::with_policy(delegate, AuthFailurePolicy::default())
    }

    #[must_use]
    pub fn with_policy(delegate: Arc<dyn AuthDelegate>, policy: AuthFailurePolicy) -> Self {
        let mut form = FormController::new();
        let bindings = register_login_fields(&mut form);
        let (state, _) = watch::channel(ViewState::default());

        Self {
            form: Mutex::new(form),
            bindings,
            state,
            delegate,
            policy,
        }
    }

    #[must_use]
    pub fn policy(&self) -> AuthFailurePolicy {
        self.policy
    }

    #[must_use]
    pub fn bindings(&self) -> &LoginBindings {
        &self.bindings
    }

    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every [`ViewState`] change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        self.lock_form().errors().clone()
    }

    pub fn set_email(&self, value: impl Into<String>) {
        self.lock_form().set_text(EMAIL_FIELD, value);
    }

    pub fn set_password(&self, value: impl Into<String>) {
        self.lock_form().set_text(PASSWORD_FIELD, value);
    }

    pub fn set_remember_me(&self, checked: bool) {
        self.lock_form().set_checked(REMEMBER_ME_FIELD, checked);
    }

    pub fn toggle_password_visibility(&self) {
        self.state
            .send_modify(|current| current.show_password = !current.show_password);
    }

    /// Runs validation without submitting, so errors show before the first login.
    pub fn validate(&self) -> FieldErrors {
        match self.lock_form().trigger() {
            Ok(_) => FieldErrors::new(),
            Err(errors) => errors,
        }
    }

    #[must_use]
    pub fn render(&self) -> LoginMarkup {
        let state = self.state();
        let form = self.lock_form();
        LoginMarkup::new(&self.bindings, &form, &state)
    }

    /// Validates the form and, when it passes, calls the delegate.
    ///
    /// `is_loading` is true from just before the delegate call until it
    /// settles, and is cleared even if this future is dropped mid-call.
    #[instrument(skip(self), fields(policy = ?self.policy))]
    pub async fn submit(&self) -> SubmitOutcome {
        if self.state.borrow().is_loading {
            debug!("Login already in progress; ignoring submit");
            return SubmitOutcome::Busy;
        }
        self.state
            .send_if_modified(|current| current.auth_error.take().is_some());

        let input = match self.lock_form().validate() {
            Ok(values) => LoginFormInput::from(&values),
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        let Some(_in_flight) = InFlight::begin(&self.state) else {
            return SubmitOutcome::Busy;
        };

        debug!("Submitting login");
        match self
            .delegate
            .login(&input.email, &input.password, input.remember_me)
            .await
        {
            Ok(()) => {
                info!("Login succeeded");
                SubmitOutcome::LoggedIn
            }
            Err(err) => {
                error!("Login failed: {err}");
                if self.policy == AuthFailurePolicy::Surface {
                    let message = err.to_string();
                    self.state
                        .send_modify(|current| current.auth_error = Some(message));
                }
                SubmitOutcome::Failed(err)
            }
        }
    }

    fn lock_form(&self) -> MutexGuard<'_, FormController> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::login::{EMAIL_INVALID, EMAIL_REQUIRED, PASSWORD_TOO_SHORT};
    use async_trait::async_trait;
    use secrecy::{ExposeSecret, SecretString};
    use tokio::sync::Notify;

    type Call = (String, String, bool);

    struct StubDelegate {
        outcome: Result<(), AppError>,
        gate: Option<Arc<Notify>>,
        calls: Mutex<Vec<Call>>,
    }

    impl StubDelegate {
        fn new(outcome: Result<(), AppError>) -> Self {
            Self {
                outcome,
                gate: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn gated(outcome: Result<(), AppError>, gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::new(outcome)
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AuthDelegate for StubDelegate {
        async fn login(
            &self,
            email: &str,
            password: &SecretString,
            remember_me: bool,
        ) -> Result<(), AppError> {
            self.calls.lock().unwrap().push((
                email.to_string(),
                password.expose_secret().to_string(),
                remember_me,
            ));
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.outcome.clone()
        }
    }

    fn rejected() -> AppError {
        AppError::Http {
            status: 401,
            message: "invalid credentials".to_string(),
        }
    }

    fn fill_valid(view: &LoginView) {
        view.set_email("user@example.com");
        view.set_password("secret1");
        view.set_remember_me(true);
    }

    #[tokio::test]
    async fn empty_email_blocks_submit() {
        let delegate = Arc::new(StubDelegate::new(Ok(())));
        let view = LoginView::new(delegate.clone());
        view.set_password("secret1");

        let outcome = view.submit().await;

        let errors = match outcome {
            SubmitOutcome::Invalid(errors) => errors,
            other => panic!("expected validation failure, got {other:?}"),
        };
        assert_eq!(errors["email"].message, EMAIL_REQUIRED);
        assert!(delegate.calls().is_empty());
        assert!(!view.state().is_loading);
    }

    #[tokio::test]
    async fn malformed_email_and_short_password_block_submit() {
        let delegate = Arc::new(StubDelegate::new(Ok(())));
        let view = LoginView::new(delegate.clone());
        view.set_email("not-an-email");
        view.set_password("abc");

        let outcome = view.submit().await;

        let errors = match outcome {
            SubmitOutcome::Invalid(errors) => errors,
            other => panic!("expected validation failure, got {other:?}"),
        };
        assert_eq!(errors["email"].message, EMAIL_INVALID);
        assert_eq!(errors["password"].message, PASSWORD_TOO_SHORT);
        assert!(delegate.calls().is_empty());
    }

    #[tokio::test]
    async fn resubmitting_invalid_input_does_not_accumulate_errors() {
        let view = LoginView::new(Arc::new(StubDelegate::new(Ok(()))));
        view.set_email("not-an-email");

        let SubmitOutcome::Invalid(first) = view.submit().await else {
            panic!("expected validation failure");
        };
        let SubmitOutcome::Invalid(second) = view.submit().await else {
            panic!("expected validation failure");
        };

        assert_eq!(first, second);
        assert_eq!(view.errors(), second);
    }

    #[tokio::test]
    async fn valid_input_calls_delegate_once_with_exact_triple() {
        let delegate = Arc::new(StubDelegate::new(Ok(())));
        let view = LoginView::new(delegate.clone());
        fill_valid(&view);

        let outcome = view.submit().await;

        assert!(matches!(outcome, SubmitOutcome::LoggedIn));
        assert_eq!(
            delegate.calls(),
            vec![("user@example.com".to_string(), "secret1".to_string(), true)]
        );
        assert!(!view.state().is_loading);
    }

    #[tokio::test]
    async fn loading_is_held_during_call_and_cleared_on_success() {
        let gate = Arc::new(Notify::new());
        let delegate = Arc::new(StubDelegate::gated(Ok(()), gate.clone()));
        let view = LoginView::new(delegate.clone());
        fill_valid(&view);

        let view_ref = &view;
        let observer = async move {
            let mut rx = view_ref.subscribe();
            assert!(rx.wait_for(|state| state.is_loading).await.is_ok());
            let markup = view_ref.render();
            assert!(markup.submit_disabled);
            assert_eq!(markup.submit_label, "Logging in...");
            gate.notify_one();
        };

        let (outcome, ()) = tokio::join!(view.submit(), observer);

        assert!(matches!(outcome, SubmitOutcome::LoggedIn));
        assert!(!view.state().is_loading);
        assert_eq!(view.render().submit_label, "Login");
    }

    #[tokio::test]
    async fn loading_is_cleared_on_failure_and_error_is_not_surfaced() {
        let gate = Arc::new(Notify::new());
        let delegate = Arc::new(StubDelegate::gated(Err(rejected()), gate.clone()));
        let view = LoginView::new(delegate.clone());
        fill_valid(&view);

        let view_ref = &view;
        let observer = async move {
            let mut rx = view_ref.subscribe();
            assert!(rx.wait_for(|state| state.is_loading).await.is_ok());
            gate.notify_one();
        };

        let (outcome, ()) = tokio::join!(view.submit(), observer);

        assert!(matches!(outcome, SubmitOutcome::Failed(AppError::Http { status: 401, .. })));
        let state = view.state();
        assert!(!state.is_loading);
        assert_eq!(state.auth_error, None);
        assert!(view.errors().is_empty());
    }

    #[tokio::test]
    async fn surface_policy_shows_failure_until_next_submit() {
        let delegate = Arc::new(StubDelegate::new(Err(rejected())));
        let view = LoginView::with_policy(delegate, AuthFailurePolicy::Surface);
        fill_valid(&view);

        assert!(matches!(view.submit().await, SubmitOutcome::Failed(_)));
        assert_eq!(
            view.state().auth_error.as_deref(),
            Some("Request failed (401): invalid credentials")
        );

        view.set_email("");
        assert!(matches!(view.submit().await, SubmitOutcome::Invalid(_)));
        assert_eq!(view.state().auth_error, None);
    }

    #[tokio::test]
    async fn submit_while_in_flight_is_ignored() {
        let gate = Arc::new(Notify::new());
        let delegate = Arc::new(StubDelegate::gated(Ok(()), gate.clone()));
        let view = LoginView::new(delegate.clone());
        fill_valid(&view);

        let view_ref = &view;
        let observer = async move {
            let mut rx = view_ref.subscribe();
            assert!(rx.wait_for(|state| state.is_loading).await.is_ok());
            assert!(matches!(view_ref.submit().await, SubmitOutcome::Busy));
            gate.notify_one();
        };

        let (outcome, ()) = tokio::join!(view.submit(), observer);

        assert!(matches!(outcome, SubmitOutcome::LoggedIn));
        assert_eq!(delegate.calls().len(), 1);
    }

    #[tokio::test]
    async fn dropping_submit_mid_call_clears_loading() {
        let gate = Arc::new(Notify::new());
        let delegate = Arc::new(StubDelegate::gated(Ok(()), gate));
        let view = LoginView::new(delegate);
        fill_valid(&view);

        {
            let submit = view.submit();
            tokio::pin!(submit);
            let mut rx = view.subscribe();
            tokio::select! {
                _ = &mut submit => panic!("delegate should still be pending"),
                loading = rx.wait_for(|state| state.is_loading) => assert!(loading.is_ok()),
            }
        }

        assert!(!view.state().is_loading);
    }

    #[tokio::test]
    async fn toggling_visibility_flips_input_type_only() {
        let view = LoginView::new(Arc::new(StubDelegate::new(Ok(()))));
        view.set_email("not-an-email");
        let _ = view.submit().await;
        let errors_before = view.errors();

        for clicks in 1..=4 {
            view.toggle_password_visibility();
            let markup = view.render();
            if clicks % 2 == 1 {
                assert_eq!(markup.password.input_type, "text");
                assert_eq!(markup.toggle_label, "Hide");
            } else {
                assert_eq!(markup.password.input_type, "password");
                assert_eq!(markup.toggle_label, "Show");
            }
            assert!(!view.state().is_loading);
            assert_eq!(view.errors(), errors_before);
        }
    }

    #[tokio::test]
    async fn validate_shows_errors_without_calling_delegate() {
        let delegate = Arc::new(StubDelegate::new(Ok(())));
        let view = LoginView::new(delegate.clone());

        let errors = view.validate();
        assert_eq!(errors["email"].message, "Email is required");
        assert_eq!(errors["password"].message, "Password is required");
        assert_eq!(view.render().email.error.as_deref(), Some("Email is required"));

        view.set_email("user@example.com");
        assert_eq!(
            view.errors()["email"].message,
            "Email is required",
            "validate alone does not turn on revalidation"
        );

        fill_valid(&view);
        assert!(view.validate().is_empty());
        assert!(delegate.calls().is_empty());
    }
}
