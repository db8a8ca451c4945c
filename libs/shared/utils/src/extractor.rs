use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use tracing::debug;

use shared_models::error::AppError;
use shared_models::ids::DoctorId;

/// Extracts the `{doctor_id}` route segment. A segment that is not a plain
/// unsigned integer is reported as "Doctor not found", the same outcome as
/// an id missing from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoctorIdPath(pub DoctorId);

impl<S> FromRequestParts<S> for DoctorIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::doctor_not_found())?;

        match DoctorId::from_route(&segment) {
            Some(id) => Ok(DoctorIdPath(id)),
            None => {
                debug!("Rejecting malformed doctor id segment: {:?}", segment);
                Err(AppError::doctor_not_found())
            }
        }
    }
}
