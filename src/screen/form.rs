use crate::error::SubmissionError;
use crate::gateway::FormSubmissionGateway;
use crate::models::{ContactMessage, SubmittableRecord, Testimonial, Validation};

/// Transient form contents that become a record on submit.
pub trait FormDraft: Default + Clone + Into<SubmittableRecord> {
    const SUCCESS_MESSAGE: &'static str;
}

impl FormDraft for ContactMessage {
    const SUCCESS_MESSAGE: &'static str = "Thanks for reaching out! I'll get back to you soon.";
}

impl FormDraft for Testimonial {
    const SUCCESS_MESSAGE: &'static str = "Thank you for your testimonial!";
}

#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    Success(String),
    Error(String),
}

/// Form state plus the in-flight guard that keeps one click to one insert.
#[derive(Debug, Default)]
pub struct FormController<D: FormDraft> {
    draft: D,
    in_flight: bool,
    field_errors: Validation,
    feedback: Option<Feedback>,
}

impl<D: FormDraft> FormController<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    /// Whether the submit control must be disabled.
    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors.error_for(field)
    }

    pub fn field_errors(&self) -> &Validation {
        &self.field_errors
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Returns the record to send, or `None` when a submission is already in
    /// flight or the draft does not validate.
    pub fn begin_submit(&mut self) -> Option<SubmittableRecord> {
        if self.in_flight {
            tracing::debug!("Submit ignored, previous submission still in flight");
            return None;
        }

        let record: SubmittableRecord = self.draft.clone().into();
        let validation = record.validate();
        if !validation.is_valid() {
            self.feedback = Some(Feedback::Error(
                SubmissionError::Invalid(validation.clone()).to_string(),
            ));
            self.field_errors = validation;
            return None;
        }

        self.field_errors = Validation::default();
        self.feedback = None;
        self.in_flight = true;
        Some(record)
    }

    /// Clears the form on success; keeps it for correction on failure.
    pub fn finish_submit(&mut self, outcome: Result<(), SubmissionError>) {
        self.in_flight = false;
        match outcome {
            Ok(()) => {
                self.draft = D::default();
                self.feedback = Some(Feedback::Success(D::SUCCESS_MESSAGE.to_string()));
            }
            Err(e) => {
                if let SubmissionError::Invalid(ref validation) = e {
                    self.field_errors = validation.clone();
                }
                self.feedback = Some(Feedback::Error(e.to_string()));
            }
        }
    }

    /// Returns whether the record was stored.
    pub async fn submit(&mut self, gateway: &FormSubmissionGateway) -> bool {
        let Some(record) = self.begin_submit() else {
            return false;
        };
        let outcome = gateway.submit(&record).await;
        let stored = outcome.is_ok();
        self.finish_submit(outcome);
        stored
    }
}
