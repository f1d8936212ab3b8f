use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub enum HandlerErrorKind {
    Validation,
    Internal,
    Unauthorized,
    BadRequest,
    BadGateway,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::Validation => "Validation",
            HandlerErrorKind::Internal => "Internal",
            HandlerErrorKind::Unauthorized => "Unauthorized",
            HandlerErrorKind::BadRequest => "BadRequest",
            HandlerErrorKind::BadGateway => "BadGateway",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Serialize)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
    pub details: Option<String>,
}

impl HandlerError {
    pub fn bad_request<T: Into<String>>(message: T) -> Self {
        HandlerError {
            error: HandlerErrorKind::BadRequest,
            message: message.into(),
            details: None,
        }
    }

    pub fn validation(errors: validator::ValidationErrors) -> Self {
        HandlerError {
            error: HandlerErrorKind::Validation,
            message: "Validation error".to_string(),
            details: Some(errors.to_string()),
        }
    }
}

// Extractor failures get the same JSON body as every other error
impl From<JsonRejection> for HandlerError {
    fn from(rejection: JsonRejection) -> Self {
        HandlerError {
            error: HandlerErrorKind::Validation,
            message: "Invalid request body".to_string(),
            details: Some(rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for HandlerError {
    fn from(rejection: QueryRejection) -> Self {
        HandlerError {
            error: HandlerErrorKind::BadRequest,
            message: "Invalid query string".to_string(),
            details: Some(rejection.body_text()),
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = match self.error {
            HandlerErrorKind::Validation | HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            HandlerErrorKind::BadGateway => StatusCode::BAD_GATEWAY,
        };
        let body = axum::Json(self);
        (status, body).into_response()
    }
}

impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        let error = match &err {
            ServiceError::InvalidInput(_) => HandlerErrorKind::BadRequest,
            ServiceError::Unauthorized(_) => HandlerErrorKind::Unauthorized,
            ServiceError::StoreError(_) => HandlerErrorKind::BadGateway,
            ServiceError::InternalError(_) => HandlerErrorKind::Internal,
        };
        HandlerError {
            error,
            message: err.message().to_string(),
            details: None,
        }
    }
}


#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    InvalidInput(String),
    InternalError(String),
    Unauthorized(String),
    /// Any failure reported by the submission store.
    StoreError(String),
}

impl ServiceError {
    pub fn message(&self) -> &str {
        match self {
            ServiceError::InvalidInput(msg)
            | ServiceError::InternalError(msg)
            | ServiceError::Unauthorized(msg)
            | ServiceError::StoreError(msg) => msg,
        }
    }

    /// Prefixes the message with a human-readable context, keeping the kind.
    pub fn with_context(self, context: &str) -> Self {
        let wrap = |msg: String| format!("{}: {}", context, msg);
        match self {
            ServiceError::InvalidInput(msg) => ServiceError::InvalidInput(wrap(msg)),
            ServiceError::InternalError(msg) => ServiceError::InternalError(wrap(msg)),
            ServiceError::Unauthorized(msg) => ServiceError::Unauthorized(wrap(msg)),
            ServiceError::StoreError(msg) => ServiceError::StoreError(wrap(msg)),
        }
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::InvalidInput(msg) => write!(f, "Invalid Input: {}", msg),
            ServiceError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
            ServiceError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ServiceError::StoreError(msg) => write!(f, "{}", msg),
        }
    }
}
impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

// Every store-side failure, including constraint violations and a missing
// table, surfaces as StoreError with the store's own message.
impl From<crate::repository::repository_error::RepositoryError> for ServiceError {
    fn from(err: crate::repository::repository_error::RepositoryError) -> Self {
        ServiceError::StoreError(err.message())
    }
}
