use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::warn;

use shared_models::error::AppError;
use shared_utils::extractor::DoctorIdPath;

use crate::models::{AppointmentRequest, BookingContext};
use crate::router::BookingState;

#[axum::debug_handler]
pub async fn get_booking_context(
    State(state): State<Arc<BookingState>>,
    DoctorIdPath(doctor_id): DoctorIdPath,
) -> Result<Json<Value>, AppError> {
    let doctor = state.catalog.require(doctor_id)?;

    let context = BookingContext {
        doctor_id: doctor.id,
        doctor_name: &doctor.name,
        specialization: &doctor.specialization,
        price: doctor.price,
        time_slots: &doctor.time_slots,
        bookable: doctor.is_bookable(),
    };

    Ok(Json(json!(context)))
}

#[axum::debug_handler]
pub async fn submit_appointment(
    State(state): State<Arc<BookingState>>,
    DoctorIdPath(doctor_id): DoctorIdPath,
    Json(request): Json<AppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let doctor = state.catalog.require(doctor_id)?;

    let confirmation = state.service.submit(doctor, &request).await.map_err(|e| {
        warn!("Rejected booking for doctor {}: {}", doctor_id, e);
        AppError::from(e)
    })?;

    Ok((StatusCode::CREATED, Json(json!(confirmation))))
}
