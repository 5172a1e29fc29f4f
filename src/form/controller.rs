//! Contact form state machine
//!
//! ```text
//! Idle ──submit, honeypot filled──▶ Success (nothing sent)
//! Idle ──submit, invalid─────────▶ Idle (errors shown)
//! Idle ──submit, valid───────────▶ Submitting ──▶ Success | Error
//! Success ──deadline passes──────▶ Idle
//! ```
//!
//! The network round trip is split in two so that the controller is never
//! borrowed across an await: [`FormController::begin_submit`] hands out the
//! request and [`FormController::finish_submit`] consumes the result.

use super::field::{FieldRole, FormField, FormMarkup};
use super::status::{self, MailtoFallback, StatusMessage};
use super::submit::{
    FormPayload, FormSubmitter, SubmissionRequest, SubmitError, SubmitMethod, SubmitResponse,
};
use super::validation::{self, ValidationRules};
use super::view::{FormLocator, FormView};
use crate::clock::Clock;
use crate::config::FormConfig;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormSubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Success,
    Error,
}

/// What a submit action led to, before any network traffic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStep {
    /// A request is already in flight
    Busy,
    /// Honeypot filled: fake success shown, nothing to send
    Suppressed,
    /// At least one field failed validation
    Invalid,
    /// Send this request, then call [`FormController::finish_submit`]
    Send(SubmissionRequest),
}

pub struct FormController<V> {
    view: V,
    fields: Vec<FormField>,
    endpoint: Url,
    method: SubmitMethod,
    rules: ValidationRules,
    fallback: MailtoFallback,
    success_clear_delay: Duration,
    state: FormSubmissionState,
    status: Option<StatusMessage>,
}

impl<V: FormView> FormController<V> {
    /// Locate the configured form. Returns `None` (inert) when the page has
    /// no such form or its action is not a usable URL.
    pub fn initialize<L>(locator: &L, view: V, config: &FormConfig) -> Option<Self>
    where
        L: FormLocator + ?Sized,
    {
        let Some(markup) = locator.locate_form(&config.form_id) else {
            debug!(form_id = %config.form_id, "no contact form on this page");
            return None;
        };
        Self::from_markup(markup, view, config)
    }

    pub fn from_markup(markup: FormMarkup, view: V, config: &FormConfig) -> Option<Self> {
        let endpoint = match Url::parse(markup.action.trim()) {
            Ok(url) => url,
            Err(err) => {
                warn!(action = %markup.action, "contact form disabled, bad action URL: {err}");
                return None;
            }
        };

        let fields: Vec<FormField> = markup
            .fields
            .iter()
            .map(|field| FormField::from_markup(field, &config.honeypot_name))
            .collect();

        debug!(
            endpoint = %endpoint,
            fields = fields.len(),
            "contact form initialised"
        );

        Some(Self {
            view,
            fields,
            endpoint,
            method: SubmitMethod::from_attribute(markup.method.as_deref()),
            rules: ValidationRules::from(config),
            fallback: MailtoFallback::new(&config.fallback_email),
            success_clear_delay: config.success_clear_delay(),
            state: FormSubmissionState::Idle,
            status: None,
        })
    }

    pub fn state(&self) -> FormSubmissionState {
        self.state
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Deadline of the current status message, for scheduling [`Self::tick`]
    pub fn status_deadline(&self) -> Option<Duration> {
        self.status.as_ref().and_then(|s| s.expires_at)
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Store the current DOM value of a field
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
    }

    pub fn on_blur(&mut self, index: usize) -> bool {
        self.validate_field(index)
    }

    /// Typing only re-checks a field that is already flagged, so errors do
    /// not appear while the user is still on their first attempt.
    pub fn on_input(&mut self, index: usize, value: impl Into<String>) {
        self.set_value(index, value);
        if self.fields.get(index).is_some_and(|f| !f.is_valid()) {
            self.validate_field(index);
        }
    }

    /// Validate one field and sync its inline error. Non-tracked and unknown
    /// fields always pass. The view is only touched when the displayed error
    /// actually changes.
    pub fn validate_field(&mut self, index: usize) -> bool {
        let Some(field) = self.fields.get_mut(index) else {
            return true;
        };
        if !field.is_tracked() {
            return true;
        }

        match validation::validate(field, &self.rules) {
            Ok(()) => {
                if field.error.take().is_some() {
                    self.view.clear_error(index);
                }
                true
            }
            Err(err) => {
                let message = err.to_string();
                if field.error.as_deref() != Some(message.as_str()) {
                    self.view.show_error(index, &message);
                    field.error = Some(message);
                }
                false
            }
        }
    }

    /// Validate every tracked field, annotating all failures in one pass
    pub fn validate_form(&mut self) -> bool {
        let mut all_valid = true;
        for index in 0..self.fields.len() {
            all_valid &= self.validate_field(index);
        }
        all_valid
    }

    fn honeypot_tripped(&self) -> bool {
        self.fields
            .iter()
            .any(|f| f.role == FieldRole::Honeypot && !f.value.is_empty())
    }

    fn payload(&self) -> FormPayload {
        let mut payload = FormPayload::default();
        for field in self.fields.iter().filter(|f| !f.name.is_empty()) {
            payload.push(field.name.as_str(), field.value.as_str());
        }
        payload
    }

    fn reset_fields(&mut self) {
        self.fields.iter_mut().for_each(FormField::reset);
        self.view.reset_form();
    }

    fn clear_all_field_errors(&mut self) {
        for (index, field) in self.fields.iter_mut().enumerate() {
            if field.error.take().is_some() {
                self.view.clear_error(index);
            }
        }
    }

    fn show_status(&mut self, status: StatusMessage) {
        self.view.show_status(&status);
        self.status = Some(status);
    }

    /// Handle a submit action up to the point of sending.
    ///
    /// The caller has already suppressed the native submission and synced
    /// field values with [`Self::set_value`].
    pub fn begin_submit(&mut self, now: Duration) -> SubmitStep {
        if self.state == FormSubmissionState::Submitting {
            debug!("submit ignored, request already in flight");
            return SubmitStep::Busy;
        }

        if self.honeypot_tripped() {
            info!("honeypot field filled, discarding submission");
            self.reset_fields();
            self.clear_all_field_errors();
            self.show_status(StatusMessage::success(
                status::SPAM_ABSORBED,
                now + self.success_clear_delay,
            ));
            self.state = FormSubmissionState::Success;
            return SubmitStep::Suppressed;
        }

        self.state = FormSubmissionState::Validating;
        if !self.validate_form() {
            self.show_status(StatusMessage::error(status::CORRECT_ERRORS));
            self.state = FormSubmissionState::Idle;
            return SubmitStep::Invalid;
        }

        self.state = FormSubmissionState::Submitting;
        self.view.set_loading(true);
        SubmitStep::Send(SubmissionRequest {
            endpoint: self.endpoint.clone(),
            method: self.method,
            payload: self.payload(),
        })
    }

    /// Apply the backend's answer. Always re-enables the submit control.
    pub fn finish_submit(
        &mut self,
        result: Result<SubmitResponse, SubmitError>,
        now: Duration,
    ) -> FormSubmissionState {
        if self.state != FormSubmissionState::Submitting {
            warn!(state = ?self.state, "submission result arrived with nothing in flight");
        }
        self.view.set_loading(false);

        match result.and_then(SubmitResponse::into_result) {
            Ok(body) => {
                info!("contact form delivered");
                debug!(%body, "form backend accepted submission");
                self.reset_fields();
                self.clear_all_field_errors();
                self.show_status(StatusMessage::success(
                    status::SENT,
                    now + self.success_clear_delay,
                ));
                self.state = FormSubmissionState::Success;
            }
            Err(err) => {
                warn!("form submission error: {err}");
                let text = err
                    .server_messages()
                    .unwrap_or_else(|| status::SUBMIT_FAILED.to_string());
                let fallback = self.fallback.clone();
                self.show_status(StatusMessage::error(text).with_fallback(fallback));
                self.state = FormSubmissionState::Error;
            }
        }
        self.state
    }

    /// Full submit flow around a single awaited network call
    pub async fn handle_submit<S, C>(&mut self, submitter: &S, clock: &C) -> FormSubmissionState
    where
        S: FormSubmitter + ?Sized,
        C: Clock + ?Sized,
    {
        let request = match self.begin_submit(clock.now()) {
            SubmitStep::Send(request) => request,
            step => {
                debug!(?step, "nothing to send");
                return self.state;
            }
        };
        let result = submitter.submit(&request).await;
        self.finish_submit(result, clock.now())
    }

    /// Clear an expired success status. Returns true if something changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        if !self.status.as_ref().is_some_and(|s| s.is_expired(now)) {
            return false;
        }
        self.status = None;
        self.view.clear_status();
        if self.state == FormSubmissionState::Success {
            self.state = FormSubmissionState::Idle;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::field::FieldMarkup;
    use crate::form::status::Severity;
    use crate::form::submit::MockFormSubmitter;
    use crate::form::view::FieldValidationView;
    use std::cell::{Cell, RefCell};
    use std::collections::BTreeMap;

    const NAME: usize = 0;
    const EMAIL: usize = 1;
    const MESSAGE: usize = 2;
    const HONEYPOT: usize = 3;

    /// View that records what a DOM would end up showing
    #[derive(Default)]
    struct RecordingView {
        errors: RefCell<BTreeMap<usize, String>>,
        show_error_calls: Cell<usize>,
        status: RefCell<Option<StatusMessage>>,
        status_clears: Cell<usize>,
        loading: RefCell<Vec<bool>>,
        resets: Cell<usize>,
    }

    impl FieldValidationView for RecordingView {
        fn show_error(&self, index: usize, message: &str) {
            self.show_error_calls.set(self.show_error_calls.get() + 1);
            self.errors.borrow_mut().insert(index, message.to_string());
        }

        fn clear_error(&self, index: usize) {
            self.errors.borrow_mut().remove(&index);
        }
    }

    impl FormView for RecordingView {
        fn show_status(&self, status: &StatusMessage) {
            *self.status.borrow_mut() = Some(status.clone());
        }

        fn clear_status(&self) {
            self.status_clears.set(self.status_clears.get() + 1);
            *self.status.borrow_mut() = None;
        }

        fn set_loading(&self, loading: bool) {
            self.loading.borrow_mut().push(loading);
        }

        fn reset_form(&self) {
            self.resets.set(self.resets.get() + 1);
        }
    }

    fn contact_markup() -> FormMarkup {
        FormMarkup {
            action: "https://formspree.io/f/xyzabcd".to_string(),
            method: Some("POST".to_string()),
            fields: vec![
                FieldMarkup::input("name", "text"),
                FieldMarkup::input("email", "email"),
                FieldMarkup::textarea("message"),
                FieldMarkup::input("_gotcha", "text"),
            ],
        }
    }

    fn config() -> FormConfig {
        FormConfig {
            fallback_email: "me@example.org".to_string(),
            ..Default::default()
        }
    }

    fn controller() -> FormController<RecordingView> {
        FormController::from_markup(contact_markup(), RecordingView::default(), &config())
            .expect("contact form should initialise")
    }

    fn fill(form: &mut FormController<RecordingView>, name: &str, email: &str, message: &str) {
        form.set_value(NAME, name);
        form.set_value(EMAIL, email);
        form.set_value(MESSAGE, message);
    }

    fn at(secs: u64) -> Duration {
        Duration::from_secs(secs)
    }

    mod initialize {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_missing_form_is_inert() {
            let locator = |_: &str| -> Option<FormMarkup> { None };
            let form = FormController::initialize(&locator, RecordingView::default(), &config());
            assert!(form.is_none());
        }

        #[test]
        fn test_locates_configured_form_id() {
            let locator = |id: &str| (id == "contactForm").then(contact_markup);
            let form = FormController::initialize(&locator, RecordingView::default(), &config())
                .unwrap();
            assert_eq!(form.fields().len(), 4);
            assert_eq!(form.state(), FormSubmissionState::Idle);
            assert_eq!(form.endpoint().as_str(), "https://formspree.io/f/xyzabcd");
        }

        #[test]
        fn test_bad_action_is_inert() {
            let markup = FormMarkup {
                action: "not a url".to_string(),
                ..contact_markup()
            };
            assert!(
                FormController::from_markup(markup, RecordingView::default(), &config()).is_none()
            );
        }

        #[test]
        fn test_honeypot_is_not_tracked() {
            let form = controller();
            assert!(!form.field(HONEYPOT).unwrap().is_tracked());
        }
    }

    mod validate_field {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_invalid_field_shows_error() {
            let mut form = controller();
            form.set_value(EMAIL, "x");

            assert!(!form.validate_field(EMAIL));
            assert_eq!(
                form.view().errors.borrow().get(&EMAIL).map(String::as_str),
                Some("Please enter a valid email address")
            );
            assert!(!form.field(EMAIL).unwrap().is_valid());
        }

        #[test]
        fn test_repeated_validation_shows_one_error() {
            let mut form = controller();
            form.set_value(NAME, "J");

            assert!(!form.validate_field(NAME));
            assert!(!form.validate_field(NAME));

            assert_eq!(form.view().show_error_calls.get(), 1);
            assert_eq!(form.view().errors.borrow().len(), 1);
        }

        #[test]
        fn test_changed_message_replaces_error() {
            let markup = FormMarkup {
                fields: vec![FieldMarkup::input("email", "email").with_min_length("6")],
                ..contact_markup()
            };
            let mut form =
                FormController::from_markup(markup, RecordingView::default(), &config()).unwrap();

            form.set_value(0, "a@b");
            form.validate_field(0);
            form.set_value(0, "abcdef");
            form.validate_field(0);

            assert_eq!(form.view().show_error_calls.get(), 2);
            assert_eq!(
                form.view().errors.borrow().get(&0).map(String::as_str),
                Some("Please enter a valid email address")
            );
        }

        #[test]
        fn test_fixing_value_clears_error() {
            let mut form = controller();
            form.set_value(MESSAGE, "short");
            assert!(!form.validate_field(MESSAGE));

            form.set_value(MESSAGE, "long enough now");
            assert!(form.validate_field(MESSAGE));
            assert!(form.view().errors.borrow().is_empty());
            assert!(form.field(MESSAGE).unwrap().is_valid());
        }

        #[test]
        fn test_untracked_and_unknown_fields_pass() {
            let mut form = controller();
            form.set_value(HONEYPOT, "");
            assert!(form.validate_field(HONEYPOT));
            assert!(form.validate_field(42));
            assert_eq!(form.view().show_error_calls.get(), 0);
        }
    }

    mod events {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_blur_validates() {
            let mut form = controller();
            assert!(!form.on_blur(NAME));
            assert!(form.view().errors.borrow().contains_key(&NAME));
        }

        #[test]
        fn test_input_on_clean_field_does_not_validate() {
            let mut form = controller();
            form.on_input(NAME, "J");
            assert!(form.view().errors.borrow().is_empty());
            assert_eq!(form.field(NAME).unwrap().value, "J");
        }

        #[test]
        fn test_input_on_flagged_field_revalidates() {
            let mut form = controller();
            form.on_blur(NAME);
            form.on_input(NAME, "Jo");
            assert!(form.view().errors.borrow().is_empty());
        }
    }

    mod validate_form {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_annotates_every_invalid_field() {
            let mut form = controller();
            fill(&mut form, "", "x", "short");

            assert!(!form.validate_form());
            let errors = form.view().errors.borrow();
            assert_eq!(errors.len(), 3);
            assert_eq!(errors[&NAME], "Please enter at least 2 characters");
            assert_eq!(errors[&MESSAGE], "Message must be at least 10 characters");
        }

        #[test]
        fn test_valid_form() {
            let mut form = controller();
            fill(&mut form, "Jo", "jo@example.com", "Hello, this is a longer message.");
            assert!(form.validate_form());
        }
    }

    mod submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_invalid_submission_sends_nothing() {
            let mut form = controller();
            fill(&mut form, "", "x", "hello there");
            let mut submitter = MockFormSubmitter::new();
            submitter.expect_submit().never();

            let state = form.handle_submit(&submitter, &|| at(1)).await;

            assert_eq!(state, FormSubmissionState::Idle);
            let errors = form.view().errors.borrow();
            assert!(errors.contains_key(&NAME));
            assert!(errors.contains_key(&EMAIL));
            assert!(!errors.contains_key(&MESSAGE));
            let status = form.status().unwrap();
            assert_eq!(status.text, "Please correct the errors below.");
            assert_eq!(status.severity, Severity::Error);
            assert!(form.view().loading.borrow().is_empty());
        }

        #[tokio::test]
        async fn test_honeypot_fakes_success_without_network() {
            let mut form = controller();
            fill(&mut form, "Spam Bot", "bot@spam.example", "Buy cheap things today!");
            form.set_value(HONEYPOT, "http://spam.example");
            let mut submitter = MockFormSubmitter::new();
            submitter.expect_submit().never();

            let state = form.handle_submit(&submitter, &|| at(1)).await;

            assert_eq!(state, FormSubmissionState::Success);
            assert_eq!(form.status().unwrap().severity, Severity::Success);
            assert_eq!(form.status().unwrap().text, "Form submitted successfully!");
            assert_eq!(form.view().resets.get(), 1);
            assert!(form.fields().iter().all(|f| f.value.is_empty()));
        }

        #[test]
        fn test_honeypot_short_circuits_validation() {
            let mut form = controller();
            form.set_value(HONEYPOT, "x");
            assert_eq!(form.begin_submit(at(0)), SubmitStep::Suppressed);
            assert!(form.view().errors.borrow().is_empty());
        }

        #[tokio::test]
        async fn test_successful_submission() {
            let mut form = controller();
            form.set_value(NAME, "J");
            form.on_blur(NAME);
            fill(&mut form, "Jo", "jo@example.com", "Hello, this is a longer message.");

            let mut submitter = MockFormSubmitter::new();
            submitter
                .expect_submit()
                .withf(|request| {
                    request.method == SubmitMethod::Post
                        && request.endpoint.as_str() == "https://formspree.io/f/xyzabcd"
                        && request.payload.get("name") == Some("Jo")
                        && request.payload.get("email") == Some("jo@example.com")
                        && request.payload.get("_gotcha") == Some("")
                })
                .times(1)
                .returning(|_| Ok(SubmitResponse::new(200, "{}")));

            let state = form.handle_submit(&submitter, &|| at(5)).await;

            assert_eq!(state, FormSubmissionState::Success);
            let status = form.status().unwrap();
            assert_eq!(status.text, "Thank you! Your message has been sent successfully.");
            assert_eq!(status.expires_at, Some(at(15)));
            assert!(form.fields().iter().all(|f| f.value.is_empty()));
            assert!(form.fields().iter().all(FormField::is_valid));
            assert!(form.view().errors.borrow().is_empty());
            assert_eq!(form.view().resets.get(), 1);
            assert_eq!(*form.view().loading.borrow(), vec![true, false]);
        }

        #[tokio::test]
        async fn test_structured_server_errors_are_shown_verbatim() {
            let mut form = controller();
            fill(&mut form, "Jo", "jo@example.com", "Hello, this is a longer message.");
            let mut submitter = MockFormSubmitter::new();
            submitter.expect_submit().times(1).returning(|_| {
                Ok(SubmitResponse::new(
                    422,
                    r#"{"errors":[{"message":"Email is invalid"}]}"#,
                ))
            });

            let state = form.handle_submit(&submitter, &|| at(5)).await;

            assert_eq!(state, FormSubmissionState::Error);
            let status = form.status().unwrap();
            assert_eq!(status.text, "Email is invalid");
            assert_eq!(status.severity, Severity::Error);
            assert_eq!(status.fallback.as_ref().unwrap().href(), "mailto:me@example.org");
            assert_eq!(*form.view().loading.borrow(), vec![true, false]);
            // Input is kept so the user can fix it
            assert_eq!(form.field(NAME).unwrap().value, "Jo");
            assert_eq!(form.view().resets.get(), 0);
        }

        #[tokio::test]
        async fn test_unstructured_server_error_is_generic() {
            let mut form = controller();
            fill(&mut form, "Jo", "jo@example.com", "Hello, this is a longer message.");
            let mut submitter = MockFormSubmitter::new();
            submitter
                .expect_submit()
                .returning(|_| Ok(SubmitResponse::new(502, "Bad Gateway")));

            form.handle_submit(&submitter, &|| at(5)).await;

            let status = form.status().unwrap();
            assert_eq!(status.text, "Unable to submit form.");
            assert!(status.fallback.is_some());
        }

        #[tokio::test]
        async fn test_network_failure_takes_error_path() {
            let mut form = controller();
            fill(&mut form, "Jo", "jo@example.com", "Hello, this is a longer message.");
            let mut submitter = MockFormSubmitter::new();
            submitter
                .expect_submit()
                .returning(|_| Err(SubmitError::Transport("connection reset".to_string())));

            let state = form.handle_submit(&submitter, &|| at(5)).await;

            assert_eq!(state, FormSubmissionState::Error);
            assert_eq!(form.status().unwrap().text, "Unable to submit form.");
            assert_eq!(*form.view().loading.borrow(), vec![true, false]);
        }

        #[test]
        fn test_success_body_that_is_not_json_is_an_error() {
            let mut form = controller();
            fill(&mut form, "Jo", "jo@example.com", "Hello, this is a longer message.");
            assert!(matches!(form.begin_submit(at(0)), SubmitStep::Send(_)));

            let state = form.finish_submit(Ok(SubmitResponse::new(200, "OK")), at(1));

            assert_eq!(state, FormSubmissionState::Error);
            assert_eq!(*form.view().loading.borrow(), vec![true, false]);
        }

        #[test]
        fn test_second_submit_while_in_flight_is_busy() {
            let mut form = controller();
            fill(&mut form, "Jo", "jo@example.com", "Hello, this is a longer message.");

            assert!(matches!(form.begin_submit(at(0)), SubmitStep::Send(_)));
            assert_eq!(form.state(), FormSubmissionState::Submitting);
            assert_eq!(form.begin_submit(at(0)), SubmitStep::Busy);
            assert_eq!(*form.view().loading.borrow(), vec![true]);
        }

        #[test]
        fn test_resubmit_after_error() {
            let mut form = controller();
            fill(&mut form, "Jo", "jo@example.com", "Hello, this is a longer message.");
            form.begin_submit(at(0));
            form.finish_submit(Err(SubmitError::Transport("offline".into())), at(1));
            assert_eq!(form.state(), FormSubmissionState::Error);

            let mut submitter = MockFormSubmitter::new();
            submitter
                .expect_submit()
                .times(1)
                .returning(|_| Ok(SubmitResponse::new(200, r#"{"ok":true}"#)));
            let state = tokio_test::block_on(form.handle_submit(&submitter, &|| at(2)));

            assert_eq!(state, FormSubmissionState::Success);
        }

        #[test]
        fn test_get_method_is_honoured() {
            let markup = FormMarkup {
                method: Some("get".to_string()),
                ..contact_markup()
            };
            let mut form =
                FormController::from_markup(markup, RecordingView::default(), &config()).unwrap();
            fill(&mut form, "Jo", "jo@example.com", "Hello, this is a longer message.");

            let SubmitStep::Send(request) = form.begin_submit(at(0)) else {
                panic!("expected a request");
            };
            assert_eq!(request.method, SubmitMethod::Get);
            assert_eq!(request.payload.len(), 4);
        }
    }

    mod status_expiry {
        use super::*;
        use pretty_assertions::assert_eq;

        fn delivered() -> FormController<RecordingView> {
            let mut form = controller();
            fill(&mut form, "Jo", "jo@example.com", "Hello, this is a longer message.");
            form.begin_submit(at(0));
            form.finish_submit(Ok(SubmitResponse::new(200, "{}")), at(1));
            form
        }

        #[test]
        fn test_success_clears_after_delay() {
            let mut form = delivered();
            assert_eq!(form.status_deadline(), Some(at(11)));

            assert!(!form.tick(at(10)));
            assert!(form.status().is_some());

            assert!(form.tick(at(11)));
            assert!(form.status().is_none());
            assert_eq!(form.state(), FormSubmissionState::Idle);
            assert_eq!(form.view().status_clears.get(), 1);
            assert!(form.view().status.borrow().is_none());
        }

        #[test]
        fn test_error_status_stays() {
            let mut form = controller();
            fill(&mut form, "Jo", "jo@example.com", "Hello, this is a longer message.");
            form.begin_submit(at(0));
            form.finish_submit(Err(SubmitError::Transport("offline".into())), at(1));

            assert!(!form.tick(at(3_600)));
            assert_eq!(form.state(), FormSubmissionState::Error);
            assert_eq!(form.status_deadline(), None);
        }

        #[test]
        fn test_stale_deadline_does_not_clear_newer_status() {
            let mut form = delivered();
            // User submits an empty form before the success message expires
            form.begin_submit(at(5));
            assert_eq!(form.status().unwrap().text, "Please correct the errors below.");

            assert!(!form.tick(at(11)));
            assert!(form.status().is_some());
        }
    }
}
