use thiserror::Error;
use uuid::Uuid;

use shared_models::error::AppError;
use shared_models::ids::DoctorId;

#[derive(Error, Debug)]
pub enum MessagingError {
    #[error("Conversation not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Conversation already closed: {0}")]
    SessionClosed(Uuid),

    #[error("Doctor not found: {0}")]
    DoctorNotFound(DoctorId),
}

impl From<MessagingError> for AppError {
    fn from(err: MessagingError) -> Self {
        match err {
            MessagingError::DoctorNotFound(_) => AppError::doctor_not_found(),
            MessagingError::SessionNotFound(_) | MessagingError::SessionClosed(_) => {
                AppError::NotFound("Conversation not found".to_string())
            }
        }
    }
}
