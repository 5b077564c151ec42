/// HTTP error mapping
///
/// Handlers return `Result<T, ApiError>`; the `IntoResponse` impl turns every
/// variant into a status code plus a JSON `{error, message}` envelope, so
/// clients see one error shape across the whole API.
///
/// Eligibility denials split across two variants: a missing enrollment or
/// ticket is `NotFound`, everything about the ticket itself (unpaid, remote,
/// no hotel) is `PaymentRequired` with the reason as message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use summit_shared::auth::jwt::JwtError;
use summit_shared::auth::middleware::AuthError;
use summit_shared::auth::password::PasswordError;
use summit_shared::eligibility::EligibilityError;

/// Shorthand for handler return types
pub type ApiResult<T> = Result<T, ApiError>;

/// Everything a handler can fail with
#[derive(Debug)]
pub enum ApiError {
    /// 400, malformed request
    BadRequest(String),

    /// 401, missing or rejected credentials
    Unauthorized(String),

    /// 402, the ticket does not grant hotel access
    PaymentRequired(String),

    /// 404, the resource (or the user's enrollment/ticket) does not exist
    NotFound(String),

    /// 409, uniqueness violated (duplicate email)
    Conflict(String),

    /// 422, request body failed validation
    ValidationError(Vec<ValidationErrorDetail>),

    /// 500, details logged but not sent to the client
    InternalError(String),
}

/// One failed field in a 422 response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    pub field: String,
    pub message: String,
}

/// The JSON envelope every error response carries
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable code, e.g. "payment_required"
    pub error: String,

    /// Human-readable message
    pub message: String,

    /// Per-field details, present on validation errors only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::PaymentRequired(msg) => write!(f, "Payment required: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::PaymentRequired(msg) => {
                (StatusCode::PAYMENT_REQUIRED, "payment_required", msg, None)
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                // Surface unique-constraint violations as conflicts instead
                // of opaque 500s
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::Conflict("Email already exists".to_string());
                    }
                    return ApiError::Conflict(format!("Constraint violation: {}", constraint));
                }

                ApiError::InternalError(format!("Database error: {}", db_err))
            }
            other => ApiError::InternalError(format!("Database error: {}", other)),
        }
    }
}

impl From<EligibilityError> for ApiError {
    fn from(err: EligibilityError) -> Self {
        match err {
            EligibilityError::EnrollmentNotFound | EligibilityError::TicketNotFound => {
                ApiError::NotFound(err.to_string())
            }
            EligibilityError::TicketNotPaid
            | EligibilityError::RemoteTicket
            | EligibilityError::HotelNotIncluded => ApiError::PaymentRequired(err.to_string()),
            EligibilityError::Database(e) => ApiError::from(e),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => {
                ApiError::Unauthorized("Missing credentials".to_string())
            }
            AuthError::InvalidFormat(msg) => ApiError::BadRequest(msg),
            AuthError::InvalidToken(msg) => ApiError::Unauthorized(msg),
            AuthError::SessionNotFound => ApiError::Unauthorized("Session not found".to_string()),
            AuthError::DatabaseError(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => ApiError::Unauthorized("Token expired".to_string()),
            JwtError::InvalidIssuer { .. } => {
                ApiError::Unauthorized("Invalid token issuer".to_string())
            }
            other => ApiError::Unauthorized(other.to_string()),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}
