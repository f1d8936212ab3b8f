use crate::model::submission::{NewSubmission, ServiceType, SubmissionStats, SubmissionType, CONTACT_SERVICE_TYPE};
use serde::{Deserialize, Serialize};

use validator::{Validate, ValidationError};

// --- Validated DTOs for request validation ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuoteRequest {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub last_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[serde(default)]
    pub service_type: ServiceType,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub last_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[validate(length(max = 5000))]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdminLoginRequest {
    #[validate(length(min = 1, max = 256))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSessionResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClearAllQuery {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponseDto {
    #[serde(flatten)]
    pub stats: SubmissionStats,
}

/// Names are stored trimmed, so whitespace alone counts as empty.
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// A phone number, when present, is 7 to 20 characters of digits and the usual separators.
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let trimmed = phone.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    let digits = trimmed.chars().filter(|c| c.is_ascii_digit()).count();
    let allowed = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '+' | '(' | ')' | '.'));
    if !allowed || digits < 7 || trimmed.len() > 20 {
        return Err(ValidationError::new("phone"));
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl From<QuoteRequest> for NewSubmission {
    fn from(req: QuoteRequest) -> Self {
        NewSubmission {
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            email: req.email.trim().to_string(),
            phone: non_empty(req.phone),
            service_type: req.service_type.as_str().to_string(),
            message: None,
            submission_type: SubmissionType::Quote,
        }
    }
}

impl From<ContactRequest> for NewSubmission {
    fn from(req: ContactRequest) -> Self {
        NewSubmission {
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            email: req.email.trim().to_string(),
            phone: non_empty(req.phone),
            service_type: CONTACT_SERVICE_TYPE.to_string(),
            message: non_empty(req.message),
            submission_type: SubmissionType::Contact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote() -> QuoteRequest {
        QuoteRequest {
            first_name: "Marie".to_string(),
            last_name: "Tremblay".to_string(),
            email: "m@x.com".to_string(),
            phone: Some("5145551234".to_string()),
            service_type: ServiceType::Habitation,
        }
    }

    #[test]
    fn test_quote_maps_to_new_submission() {
        let new: NewSubmission = quote().into();
        assert_eq!(new.first_name, "Marie");
        assert_eq!(new.last_name, "Tremblay");
        assert_eq!(new.email, "m@x.com");
        assert_eq!(new.phone.as_deref(), Some("5145551234"));
        assert_eq!(new.service_type, "Habitation");
        assert_eq!(new.submission_type, SubmissionType::Quote);
        assert_eq!(new.message, None);
    }

    #[test]
    fn test_quote_service_type_defaults_to_automobile() {
        let req: QuoteRequest = serde_json::from_str(
            r#"{"first_name":"A","last_name":"B","email":"a@b.com","phone":null}"#,
        )
        .unwrap();
        assert_eq!(req.service_type, ServiceType::Automobile);
    }

    #[test]
    fn test_quote_rejects_unknown_service_type() {
        let res: Result<QuoteRequest, _> = serde_json::from_str(
            r#"{"first_name":"A","last_name":"B","email":"a@b.com","service_type":"Moto"}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_contact_uses_fixed_service_type() {
        let req = ContactRequest {
            first_name: "Jean".to_string(),
            last_name: "Roy".to_string(),
            email: "j@roy.ca".to_string(),
            phone: Some("".to_string()),
            message: Some("Bonjour, pouvez-vous me rappeler?".to_string()),
        };
        let new: NewSubmission = req.into();
        assert_eq!(new.service_type, CONTACT_SERVICE_TYPE);
        assert_eq!(new.submission_type, SubmissionType::Contact);
        assert_eq!(new.phone, None);
        assert!(new.message.is_some());
    }

    #[test]
    fn test_validation_rejects_bad_email() {
        let mut req = quote();
        req.email = "not-an-email".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_name() {
        let mut req = quote();
        req.first_name = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_blank_name() {
        let mut req = quote();
        req.last_name = " \t ".to_string();
        assert!(req.validate().is_err());
        assert!(validate_not_blank("  Marie ").is_ok());
    }

    #[test]
    fn test_phone_validation() {
        assert!(validate_phone("514-555-1234").is_ok());
        assert!(validate_phone("+1 (514) 555.1234").is_ok());
        assert!(validate_phone("").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("call me maybe").is_err());
    }
}
