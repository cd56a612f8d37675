use lakehouse_db::models::BookingStatus;
use thiserror::Error;

use crate::auth::AuthError;
use crate::availability::Conflict;
use crate::dao::base::DaoError;

/// Operation failures, split so callers can tell "your input was invalid"
/// from "the system state prevents this" from "you lack permission". All
/// checks run before any write; a failed operation leaves no partial state.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("Selected dates are not available")]
    DatesUnavailable(Vec<Conflict>),
    #[error("cannot {attempted} a booking that is {from}")]
    InvalidTransition {
        from: BookingStatus,
        attempted: &'static str,
    },
    #[error("{0}")]
    PermissionDenied(String),
    #[error("Resource not found")]
    NotFound,
    #[error("An invitation has already been sent to this email address")]
    DuplicatePendingInvite,
    #[error("Invalid or expired invitation")]
    InvalidOrExpired,
    #[error("This invitation has already been accepted")]
    AlreadyAccepted,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Dao(DaoError),
}

impl From<DaoError> for ServiceError {
    fn from(err: DaoError) -> Self {
        match err {
            DaoError::NotFound => ServiceError::NotFound,
            other => ServiceError::Dao(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
