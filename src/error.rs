use crate::models::ErrorResponse;
use crate::services::store::StoreError;
use actix_web::{error, http::StatusCode, HttpResponse};
use thiserror::Error;

/// HTTP-facing error taxonomy.
///
/// Validation problems surface immediately as 4xx; store connectivity
/// problems are 503 and only reach the caller when the request record
/// itself could not be persisted. Notification problems never appear here.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("unknown blood type: {0}")]
    UnknownBloodType(String),

    #[error("email or phone already registered")]
    DuplicateContact,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("the database is busy, please try again in a moment")]
    StoreBusy,

    #[error("the database is unavailable")]
    StoreUnavailable,

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_failed",
            ApiError::UnknownBloodType(_) => "unknown_blood_type",
            ApiError::DuplicateContact => "duplicate_contact",
            ApiError::NotFound(_) => "not_found",
            ApiError::StoreBusy => "store_busy",
            ApiError::StoreUnavailable => "store_unavailable",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateContact => ApiError::DuplicateContact,
            StoreError::NotFound(what) => ApiError::NotFound(what),
            StoreError::Busy(_) => ApiError::StoreBusy,
            StoreError::Unavailable(_) => ApiError::StoreUnavailable,
            StoreError::Backend(msg) => ApiError::Internal(msg),
        }
    }
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::UnknownBloodType(_) => StatusCode::BAD_REQUEST,
            ApiError::DuplicateContact => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::StoreBusy | ApiError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

/// Handle malformed JSON bodies with a structured error response.
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::Validation(format!("invalid JSON: {err}")).into()
}

/// Handle malformed query strings with a structured error response.
pub fn handle_query_payload_error(
    err: error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    ApiError::Validation(format!("invalid query: {err}")).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::error::ResponseError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::UnknownBloodType("C+".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::DuplicateContact.status_code(), StatusCode::CONFLICT);
        assert_eq!(ApiError::StoreBusy.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            ApiError::NotFound("request 9".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_store_error_mapping() {
        assert!(matches!(
            ApiError::from(StoreError::DuplicateContact),
            ApiError::DuplicateContact
        ));
        assert!(matches!(
            ApiError::from(StoreError::Busy("locked".into())),
            ApiError::StoreBusy
        ));
        assert!(matches!(
            ApiError::from(StoreError::Unavailable("down".into())),
            ApiError::StoreUnavailable
        ));
    }
}
