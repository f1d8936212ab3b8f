//! Submission lifecycle of the quote and contact forms.
//!
//! `Idle -> Submitting -> Success | Failure`. Success reverts to `Idle` five
//! seconds after it was entered; Failure keeps the user's input so the form can
//! be sent again as is.

use chrono::{DateTime, Duration, Utc};
use tracing::{error, info};

use crate::dto::submission_dto::{ContactRequest, QuoteRequest};
use crate::model::submission::{ServiceType, Submission};
use crate::service::submission_service::SubmissionService;
use crate::util::error::ServiceError;

pub const SUCCESS_BANNER_SECS: i64 = 5;
pub const FAILURE_ALERT: &str = "Erreur lors de l'envoi. Veuillez réessayer.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormVariant {
    Quote,
    Contact,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Success { until: DateTime<Utc> },
    Failure { alert: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LeadFormFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub service_type: ServiceType,
    pub message: String,
}

/// Payload handed to the service once a submit has started.
#[derive(Debug, Clone)]
pub enum PendingSubmission {
    Quote(QuoteRequest),
    Contact(ContactRequest),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("a submission is already in progress")]
    AlreadySubmitting,
    #[error("no submission is in progress")]
    NotSubmitting,
}

#[derive(Debug, Clone)]
pub struct LeadForm {
    variant: FormVariant,
    pub fields: LeadFormFields,
    status: FormStatus,
}

impl LeadForm {
    pub fn quote() -> Self {
        Self::new(FormVariant::Quote)
    }

    pub fn contact() -> Self {
        Self::new(FormVariant::Contact)
    }

    fn new(variant: FormVariant) -> Self {
        LeadForm {
            variant,
            fields: LeadFormFields::default(),
            status: FormStatus::Idle,
        }
    }

    pub fn variant(&self) -> FormVariant {
        self.variant
    }

    /// Current status, with an elapsed success banner already folded back to `Idle`.
    pub fn status_at(&self, now: DateTime<Utc>) -> FormStatus {
        match &self.status {
            FormStatus::Success { until } if now >= *until => FormStatus::Idle,
            other => other.clone(),
        }
    }

    pub fn status(&self) -> FormStatus {
        self.status_at(Utc::now())
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.status != FormStatus::Submitting
    }

    /// Closes the failure alert.
    pub fn dismiss_alert(&mut self) {
        if matches!(self.status, FormStatus::Failure { .. }) {
            self.status = FormStatus::Idle;
        }
    }

    /// Moves to `Submitting` and snapshots the fields into a request.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, FormError> {
        if self.status == FormStatus::Submitting {
            return Err(FormError::AlreadySubmitting);
        }
        self.status = FormStatus::Submitting;
        let f = &self.fields;
        let phone = Some(f.phone.clone()).filter(|p| !p.trim().is_empty());
        Ok(match self.variant {
            FormVariant::Quote => PendingSubmission::Quote(QuoteRequest {
                first_name: f.first_name.clone(),
                last_name: f.last_name.clone(),
                email: f.email.clone(),
                phone,
                service_type: f.service_type,
            }),
            FormVariant::Contact => PendingSubmission::Contact(ContactRequest {
                first_name: f.first_name.clone(),
                last_name: f.last_name.clone(),
                email: f.email.clone(),
                phone,
                message: Some(f.message.clone()).filter(|m| !m.trim().is_empty()),
            }),
        })
    }

    /// Applies the outcome of the create call started by `begin_submit`.
    pub fn complete_submit(
        &mut self,
        outcome: &Result<Submission, ServiceError>,
        now: DateTime<Utc>,
    ) -> Result<(), FormError> {
        if self.status != FormStatus::Submitting {
            return Err(FormError::NotSubmitting);
        }
        match outcome {
            Ok(created) => {
                info!(id = %created.id, "Form submission accepted");
                self.fields = LeadFormFields::default();
                self.status = FormStatus::Success {
                    until: now + Duration::seconds(SUCCESS_BANNER_SECS),
                };
            }
            Err(e) => {
                error!("Error submitting form: {}", e);
                self.status = FormStatus::Failure {
                    alert: FAILURE_ALERT.to_string(),
                    error: e.to_string(),
                };
            }
        }
        Ok(())
    }

    /// Runs a full submit against the service.
    pub async fn submit(&mut self, service: &dyn SubmissionService) -> Result<Submission, ServiceError> {
        let pending = self
            .begin_submit()
            .map_err(|e| ServiceError::InvalidInput(e.to_string()))?;
        let outcome = match pending {
            PendingSubmission::Quote(req) => service.submit_quote(req).await,
            PendingSubmission::Contact(req) => service.submit_contact(req).await,
        };
        self.complete_submit(&outcome, Utc::now())
            .map_err(|e| ServiceError::InternalError(e.to_string()))?;
        outcome
    }
}
