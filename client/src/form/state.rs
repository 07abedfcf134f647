//! Ephemeral state of one auth-form instance.
//!
//! DESIGN
//! ======
//! Submission is split into `begin_submit` (validate, raise `pending`, hand
//! out a snapshot of the values) and `finish_submit` (drop `pending`, apply
//! the result). Both run synchronously against the state; only the action
//! between them is async. A second `begin_submit` while `pending` is set is
//! refused, which is what keeps submissions from overlapping.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use super::fields::{FieldName, FormRecord};
use super::result::{AuthActionResult, GENERIC_SUBMIT_ERROR};
use super::schema::{FieldErrors, Schema};

/// Route navigated to after a successful submission.
pub const HOME_ROUTE: &str = "/";

/// Outcome of trying to start a submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitStart<T> {
    /// Validation passed; run the action with these values.
    Ready(T),
    /// Validation failed; per-field messages are now set on the state.
    Invalid,
    /// A submission is already in flight.
    Busy,
}

/// What the caller must do once a submission has been applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    /// Success: values were reset, navigate to the given route.
    Navigate(&'static str),
    /// Failure: the error message is set, values are untouched.
    Failed,
}

/// Values, errors and the busy flag of one form.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState<T> {
    defaults: T,
    values: T,
    field_errors: FieldErrors,
    error: Option<String>,
    pending: bool,
}

impl<T: FormRecord> FormState<T> {
    #[must_use]
    pub fn new(defaults: T) -> Self {
        Self {
            values: defaults.clone(),
            defaults,
            field_errors: FieldErrors::new(),
            error: None,
            pending: false,
        }
    }

    #[must_use]
    pub fn values(&self) -> &T {
        &self.values
    }

    /// Current value of `field`; empty for fields the record does not carry.
    #[must_use]
    pub fn value(&self, field: FieldName) -> &str {
        self.values.get(field).unwrap_or_default()
    }

    /// Update a field from user input and clear its stale validation message.
    pub fn set_value(&mut self, field: FieldName, value: String) {
        if self.values.set(field, value) {
            self.field_errors.remove(&field);
        }
    }

    #[must_use]
    pub fn field_error(&self, field: FieldName) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }

    /// Submission error shown next to the submit control.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn pending(&self) -> bool {
        self.pending
    }

    /// Validate and, if valid, mark the form pending.
    ///
    /// The previous submission error is only cleared once a new submission
    /// actually starts; invalid input leaves it on screen.
    pub fn begin_submit(&mut self, schema: &Schema<T>) -> SubmitStart<T> {
        if self.pending {
            return SubmitStart::Busy;
        }
        match schema.validate(&self.values) {
            Ok(()) => {
                self.error = None;
                self.field_errors.clear();
                self.pending = true;
                SubmitStart::Ready(self.values.clone())
            }
            Err(errors) => {
                self.field_errors = errors;
                SubmitStart::Invalid
            }
        }
    }

    /// Apply the action's outcome and clear `pending`.
    ///
    /// `Err` means the action itself failed, e.g. the request never reached
    /// the auth service. It is logged and shown as the generic error.
    pub fn finish_submit<E: std::fmt::Display>(&mut self, outcome: Result<AuthActionResult, E>) -> Completion {
        self.pending = false;
        match outcome {
            Ok(AuthActionResult::Success) => {
                self.values = self.defaults.clone();
                self.field_errors.clear();
                self.error = None;
                Completion::Navigate(HOME_ROUTE)
            }
            Ok(AuthActionResult::Error(message)) => {
                self.error = Some(message);
                Completion::Failed
            }
            Err(e) => {
                log::error!("auth form submission failed: {e}");
                self.error = Some(GENERIC_SUBMIT_ERROR.to_owned());
                Completion::Failed
            }
        }
    }
}
