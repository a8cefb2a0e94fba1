//! JSON response envelope and HTTP mapping for application errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

use crate::utils::errors::{ClubPortalError, ErrorSeverity, IdentityError};

#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: ApiErrorBody,
}

pub fn success<T>(data: T, message: impl Into<String>) -> Response
where
    T: Serialize,
{
    with_status(StatusCode::OK, data, message)
}

pub fn created<T>(data: T, message: impl Into<String>) -> Response
where
    T: Serialize,
{
    with_status(StatusCode::CREATED, data, message)
}

pub fn empty_success(message: impl Into<String>) -> Response {
    let body: ApiResponse<()> = ApiResponse {
        success: true,
        data: None,
        message: Some(message.into()),
    };
    (StatusCode::OK, Json(body)).into_response()
}

fn with_status<T>(status: StatusCode, data: T, message: impl Into<String>) -> Response
where
    T: Serialize,
{
    let body = ApiResponse {
        success: true,
        data: Some(data),
        message: Some(message.into()),
    };
    (status, Json(body)).into_response()
}

pub fn error(
    code: &str,
    message: impl Into<String>,
    details: Option<Value>,
    status: StatusCode,
) -> Response {
    let body = ApiErrorResponse {
        success: false,
        error: ApiErrorBody {
            code: code.to_string(),
            message: message.into(),
            details,
        },
    };

    (status, Json(body)).into_response()
}

impl ClubPortalError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ClubPortalError::Validation(_)
            | ClubPortalError::Identity(IdentityError::Rejected(_)) => StatusCode::BAD_REQUEST,
            ClubPortalError::Authentication(_)
            | ClubPortalError::Identity(IdentityError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            ClubPortalError::AccessDenied(_) => StatusCode::FORBIDDEN,
            ClubPortalError::EventNotFound { .. }
            | ClubPortalError::RegistrationNotFound { .. }
            | ClubPortalError::CertificateNotFound { .. } => StatusCode::NOT_FOUND,
            ClubPortalError::SubmissionInFlight => StatusCode::CONFLICT,
            ClubPortalError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            ClubPortalError::Identity(_) | ClubPortalError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ClubPortalError::Validation(_) => "VALIDATION_ERROR",
            ClubPortalError::Identity(IdentityError::Rejected(_)) => "IDENTITY_REJECTED",
            ClubPortalError::Authentication(_)
            | ClubPortalError::Identity(IdentityError::InvalidCredentials) => "AUTH_ERROR",
            ClubPortalError::AccessDenied(_) => "ACCESS_DENIED",
            ClubPortalError::EventNotFound { .. }
            | ClubPortalError::RegistrationNotFound { .. }
            | ClubPortalError::CertificateNotFound { .. } => "NOT_FOUND",
            ClubPortalError::SubmissionInFlight => "SUBMISSION_IN_FLIGHT",
            ClubPortalError::RateLimitExceeded => "RATE_LIMITED",
            ClubPortalError::Identity(_) | ClubPortalError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            _ => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Message safe to show to the caller; internal failures stay generic
    fn public_message(&self) -> String {
        match self {
            ClubPortalError::Validation(_) => "Please fill in all the required fields.".to_string(),
            ClubPortalError::Authentication(msg)
            | ClubPortalError::AccessDenied(msg)
            | ClubPortalError::Identity(IdentityError::Rejected(msg)) => msg.clone(),
            ClubPortalError::Identity(IdentityError::InvalidCredentials) => {
                "Invalid credentials or not authorized.".to_string()
            }
            ClubPortalError::EventNotFound { .. }
            | ClubPortalError::RegistrationNotFound { .. }
            | ClubPortalError::CertificateNotFound { .. }
            | ClubPortalError::SubmissionInFlight
            | ClubPortalError::RateLimitExceeded => self.to_string(),
            ClubPortalError::Identity(_) | ClubPortalError::ServiceUnavailable(_) => {
                "The service is temporarily unavailable. Please try again later.".to_string()
            }
            _ => "The operation failed. Please try again.".to_string(),
        }
    }

    fn log(&self) {
        match self.severity() {
            ErrorSeverity::Info | ErrorSeverity::Warning => {
                warn!(error = %self, severity = %self.severity(), recoverable = self.is_recoverable(), "Request rejected");
            }
            ErrorSeverity::Error | ErrorSeverity::Critical => {
                error!(error = ?self, severity = %self.severity(), recoverable = self.is_recoverable(), "Request failed");
            }
        }
    }
}

impl IntoResponse for ClubPortalError {
    fn into_response(self) -> Response {
        self.log();

        let details = match &self {
            ClubPortalError::Validation(fields) => serde_json::to_value(fields).ok(),
            _ => None,
        };

        error(self.code(), self.public_message(), details, self.status_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ClubPortalError::field("usn", "USN is required").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ClubPortalError::AccessDenied("no".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ClubPortalError::SubmissionInFlight.status_code(), StatusCode::CONFLICT);
        assert_eq!(ClubPortalError::RateLimitExceeded.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            ClubPortalError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unreachable_backends_are_unavailable() {
        let errors = [
            ClubPortalError::ServiceUnavailable("store offline".into()),
            ClubPortalError::Identity(IdentityError::Timeout),
            ClubPortalError::Identity(IdentityError::RequestFailed("connection refused".into())),
        ];
        for err in errors {
            assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(err.code(), "SERVICE_UNAVAILABLE");
            assert_eq!(
                err.public_message(),
                "The service is temporarily unavailable. Please try again later."
            );
        }

        // rejections and bad credentials stay client errors
        assert_eq!(
            ClubPortalError::Identity(IdentityError::InvalidCredentials).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ClubPortalError::Identity(IdentityError::Rejected("taken".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_errors_are_not_exposed() {
        let err = ClubPortalError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(err.public_message(), "The operation failed. Please try again.");
        assert_eq!(err.code(), "INTERNAL_SERVER_ERROR");
    }
}
