//! Rendering capabilities the form controller drives
//!
//! Fields are addressed by their index in [`super::FormController::fields`],
//! which mirrors document order.

use super::field::FormMarkup;
use super::status::StatusMessage;

/// Inline, per-field error display
pub trait FieldValidationView {
    /// Show `message` next to the field, replacing any error already shown.
    /// Implementations announce it to screen readers.
    fn show_error(&self, index: usize, message: &str);

    /// Remove the field's inline error, if any
    fn clear_error(&self, index: usize);
}

/// Form-wide display: status region, submit control, reset
pub trait FormView: FieldValidationView {
    fn show_status(&self, status: &StatusMessage);
    fn clear_status(&self);
    /// Disable the submit control and show a spinner, or undo both
    fn set_loading(&self, loading: bool);
    /// Restore every input to its markup default
    fn reset_form(&self);
}

/// Finds the form in the page
pub trait FormLocator {
    fn locate_form(&self, form_id: &str) -> Option<FormMarkup>;
}

impl<F> FormLocator for F
where
    F: Fn(&str) -> Option<FormMarkup>,
{
    fn locate_form(&self, form_id: &str) -> Option<FormMarkup> {
        self(form_id)
    }
}
