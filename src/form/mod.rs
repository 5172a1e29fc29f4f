//! Contact form: validation, status reporting and submission

mod controller;
mod field;
mod status;
mod submit;
mod validation;
mod view;

pub use controller::{FormController, FormSubmissionState, SubmitStep};
pub use field::{FieldKind, FieldMarkup, FieldRole, FormField, FormMarkup};
pub use status::{MailtoFallback, Severity, StatusMessage};
pub use submit::{
    FormPayload, FormSubmitter, HttpFormSubmitter, SubmissionRequest, SubmitError, SubmitMethod,
    SubmitResponse,
};
pub use validation::{is_email, validate, ValidationError, ValidationRules};
pub use view::{FieldValidationView, FormLocator, FormView};
