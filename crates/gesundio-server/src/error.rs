use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use gesundio_core::error::BackendError;
use gesundio_forms::error::{FormError, SubmitError};
use gesundio_forms::schema::ValidationErrors;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// The request body could not be read as JSON; keeps axum's status.
    Rejected(StatusCode, String),
    /// Submission failed validation; carries the per-field messages.
    Unprocessable(ValidationErrors),
    /// The persistence backend failed or returned nothing usable.
    BadGateway(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct ValidationBody {
    errors: ValidationErrors,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Rejected(status, msg) => (status, msg),
            ApiError::Unprocessable(errors) => {
                return (StatusCode::UNPROCESSABLE_ENTITY, Json(ValidationBody { errors }))
                    .into_response();
            }
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Decoding a request body is the only place a `FormError` reaches a handler
/// through `?`; everything else maps it explicitly.
impl From<FormError> for ApiError {
    fn from(e: FormError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(status = %rejection.status(), "request body rejected");
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<BackendError> for ApiError {
    fn from(e: BackendError) -> Self {
        tracing::error!(error = %e, "backend call failed");
        ApiError::BadGateway("persistence backend unavailable".to_string())
    }
}

impl From<SubmitError> for ApiError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::Shape(inner) => ApiError::Internal(inner.to_string()),
            other => ApiError::BadGateway(other.user_message().to_string()),
        }
    }
}
