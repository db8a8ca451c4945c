// libs/appointment-cell/src/models.rs
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;
use shared_models::ids::DoctorId;

/// Raw booking form as submitted. Nothing here is trusted until it has
/// passed validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentRequest {
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// `YYYY-MM-DDTHH:MM`, optionally with seconds.
    #[serde(default)]
    pub date_time: Option<String>,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedAppointment {
    pub patient_name: String,
    pub email: String,
    pub phone: String,
    pub date_time: NaiveDateTime,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingField {
    PatientName,
    Email,
    Phone,
    DateTime,
}

impl BookingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingField::PatientName => "patient_name",
            BookingField::Email => "email",
            BookingField::Phone => "phone",
            BookingField::DateTime => "date_time",
        }
    }
}

impl fmt::Display for BookingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
}

/// Locally generated acknowledgement. Not a durable booking.
#[derive(Debug, Clone, Serialize)]
pub struct BookingConfirmation {
    pub appointment_id: String,
    pub status: BookingStatus,
    pub doctor_id: DoctorId,
    pub doctor_name: String,
    pub patient_name: String,
    pub email: String,
    pub phone: String,
    pub date_time: NaiveDateTime,
    pub reason: Option<String>,
    pub confirmed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingContext<'a> {
    pub doctor_id: DoctorId,
    pub doctor_name: &'a str,
    pub specialization: &'a str,
    pub price: u32,
    pub time_slots: &'a doctor_cell::TimeSlots,
    pub bookable: bool,
}

#[derive(Debug, Error, PartialEq)]
pub enum BookingError {
    #[error("{message}")]
    Validation {
        field: BookingField,
        message: &'static str,
    },

    #[error("Doctor not found: {0}")]
    DoctorNotFound(DoctorId),
}

impl BookingError {
    pub fn validation(field: BookingField, message: &'static str) -> Self {
        BookingError::Validation { field, message }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Validation { field, message } => AppError::ValidationError {
                field: field.to_string(),
                message: message.to_string(),
            },
            BookingError::DoctorNotFound(_) => AppError::doctor_not_found(),
        }
    }
}
