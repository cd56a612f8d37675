use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lakehouse_services::auth::AuthError;
use lakehouse_services::availability::Conflict;
use lakehouse_services::dao::base::DaoError;
use lakehouse_services::error::ServiceError;
use serde::Serialize;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    Internal(String),
    Validation(String),
    /// Carries the conflicting ranges so the caller can render *why* the
    /// dates were rejected, not just that they were.
    DatesUnavailable(Vec<Conflict>),
    InvalidTransition(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    conflicts: Option<Vec<Conflict>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, conflicts) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg, None)
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg, None)
            }
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation", msg, None)
            }
            ApiError::DatesUnavailable(conflicts) => (
                StatusCode::CONFLICT,
                "dates_unavailable",
                "Selected dates are not available".to_string(),
                Some(conflicts),
            ),
            ApiError::InvalidTransition(msg) => {
                (StatusCode::CONFLICT, "invalid_transition", msg, None)
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            conflicts,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => ApiError::Validation(msg),
            ServiceError::DatesUnavailable(conflicts) => ApiError::DatesUnavailable(conflicts),
            err @ ServiceError::InvalidTransition { .. } => {
                ApiError::InvalidTransition(err.to_string())
            }
            ServiceError::PermissionDenied(msg) => ApiError::Forbidden(msg),
            ServiceError::NotFound => ApiError::NotFound("Resource not found".to_string()),
            err @ ServiceError::DuplicatePendingInvite => ApiError::Conflict(err.to_string()),
            err @ ServiceError::InvalidOrExpired => ApiError::NotFound(err.to_string()),
            err @ ServiceError::AlreadyAccepted => ApiError::Conflict(err.to_string()),
            ServiceError::Auth(err) => err.into(),
            ServiceError::Dao(err) => match err {
                DaoError::DuplicateKey(msg) => ApiError::Conflict(msg),
                other => ApiError::Internal(other.to_string()),
            },
        }
    }
}

impl From<DaoError> for ApiError {
    fn from(err: DaoError) -> Self {
        match err {
            DaoError::NotFound => ApiError::NotFound("Resource not found".to_string()),
            DaoError::DuplicateKey(msg) => ApiError::Conflict(msg),
            DaoError::Mongo(e) => ApiError::Internal(e.to_string()),
            DaoError::BsonSer(e) => ApiError::Internal(e.to_string()),
            DaoError::BsonDe(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            AuthError::TokenExpired => ApiError::Unauthorized("Token expired".to_string()),
            AuthError::InvalidToken(msg) => ApiError::Unauthorized(msg),
            AuthError::HashError(msg) => ApiError::Internal(msg),
        }
    }
}
