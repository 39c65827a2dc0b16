//! Form submission controller.
//!
//! A controller owns one record being edited, the validation errors on
//! display and the submission state:
//!
//! ```text
//! Idle -> Submitting -> Succeeded | FailedGeneral | FailedValidation
//! ```
//!
//! Any finished state can go back to `Submitting` on the next submit. A
//! `FailedValidation` form returns to `Idle` once edits have cleared every
//! error on display.
//!
//! `Submitting` is only held while the save is in flight. `submit` borrows
//! the controller mutably across the request, so callers always see one of
//! the settled states once it returns.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::client::SalonApi;
use crate::error::{FormError, SaveError};
use crate::models::appointment::Appointment;
use crate::models::customer::Customer;
use crate::models::FormRecord;
use crate::services::validation::{any_errors, FieldValidators, ValidationErrors};

/// Banner shown when a save fails for any reason other than field errors
pub const SAVE_ERROR_MESSAGE: &str = "An error occurred during save.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    FailedGeneral,
    FailedValidation(ValidationErrors),
}

impl SubmissionState {
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "IDLE",
            SubmissionState::Submitting => "SUBMITTING",
            SubmissionState::Succeeded => "SUCCESSFUL",
            SubmissionState::FailedGeneral => "FAILED",
            SubmissionState::FailedValidation(_) => "VALIDATION_FAILED",
        }
    }
}

/// A submit gesture whose default navigation can be suppressed
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Saves a record and returns the server's copy
#[async_trait]
pub trait Persist<R>: Send + Sync {
    async fn persist(&self, record: &R) -> Result<R, SaveError>;
}

#[async_trait]
impl<T> Persist<Customer> for T
where
    T: SalonApi + ?Sized,
{
    async fn persist(&self, record: &Customer) -> Result<Customer, SaveError> {
        self.add_customer(record).await
    }
}

#[async_trait]
impl<T> Persist<Appointment> for T
where
    T: SalonApi + ?Sized,
{
    async fn persist(&self, record: &Appointment) -> Result<Appointment, SaveError> {
        self.add_appointment(record).await
    }
}

pub struct FormController<R, P>
where
    R: FormRecord,
    P: Persist<R> + ?Sized,
{
    record: R,
    validators: FieldValidators,
    errors: ValidationErrors,
    state: SubmissionState,
    store: Arc<P>,
}

pub type CustomerForm = FormController<Customer, dyn SalonApi>;
pub type AppointmentForm = FormController<Appointment, dyn SalonApi>;

impl<R, P> FormController<R, P>
where
    R: FormRecord,
    P: Persist<R> + ?Sized,
{
    pub fn new(original: R, validators: FieldValidators, store: Arc<P>) -> Self {
        Self {
            record: original,
            validators,
            errors: ValidationErrors::new(),
            state: SubmissionState::Idle,
            store,
        }
    }

    pub fn record(&self) -> &R {
        &self.record
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn validation_errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn has_general_error(&self) -> bool {
        self.state == SubmissionState::FailedGeneral
    }

    /// Applies a keystroke-level edit. Only a field already showing an
    /// error is re-validated.
    pub fn change(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        self.record = self.record.clone().with_field(field, value)?;
        if self.errors.has_error(field) {
            self.validate_field(field, value);
        }
        Ok(())
    }

    /// Commits a field: validates its current value
    pub fn blur(&mut self, field: &str) -> Result<(), FormError> {
        let value = self
            .record
            .field(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;
        self.validate_field(field, &value);
        Ok(())
    }

    fn validate_field(&mut self, field: &str, value: &str) {
        let result = self.validators.validate_field(field, value);
        self.errors.set(field, result);

        if matches!(self.state, SubmissionState::FailedValidation(_)) && self.errors.is_empty() {
            self.state = SubmissionState::Idle;
        }
    }

    /// Suppresses the event's default action, whatever the outcome, then
    /// submits.
    pub async fn handle_submit<F>(&mut self, event: &mut SubmitEvent, on_save: F) -> &SubmissionState
    where
        F: FnOnce(&R) + Send,
    {
        event.prevent_default();
        self.submit(on_save).await
    }

    /// Validates every field and, if all pass, saves the record.
    ///
    /// `on_save` receives the server's copy and only runs on success.
    pub async fn submit<F>(&mut self, on_save: F) -> &SubmissionState
    where
        F: FnOnce(&R) + Send,
    {
        let client_errors = self.validators.validate_many(&self.record);
        if any_errors(&client_errors) {
            info!(
                "Submission blocked by {} client-side validation error(s)",
                client_errors.len()
            );
            self.errors = client_errors.clone();
            self.state = SubmissionState::FailedValidation(client_errors);
            return &self.state;
        }
        self.errors = client_errors;

        self.state = SubmissionState::Submitting;
        info!("Submitting record");

        let store = Arc::clone(&self.store);
        let result = store.persist(&self.record).await;
        match result {
            Ok(saved) => {
                info!("Record saved");
                self.record = saved;
                self.state = SubmissionState::Succeeded;
                on_save(&self.record);
            }
            Err(SaveError::Validation(server_errors)) => {
                warn!(
                    "Server reported {} validation error(s)",
                    server_errors.len()
                );
                self.errors.merge(server_errors);
                self.state = SubmissionState::FailedValidation(self.errors.clone());
            }
            Err(err) => {
                error!("Failed to save record: {}", err);
                self.state = SubmissionState::FailedGeneral;
            }
        }

        &self.state
    }
}

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;
