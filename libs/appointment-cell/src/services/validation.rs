use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::models::{AppointmentRequest, BookingError, BookingField, ValidatedAppointment};

pub const NAME_REQUIRED: &str = "Please enter your full name";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const PHONE_REQUIRED: &str = "Please enter your phone number";
pub const DATE_TIME_REQUIRED: &str = "Please select a date and time";
pub const DATE_TIME_INVALID: &str = "Please select a valid date and time";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Checks fields in form order and reports only the first failure.
pub fn validate_appointment(request: &AppointmentRequest) -> Result<ValidatedAppointment, BookingError> {
    let patient_name = request.patient_name.trim();
    if patient_name.is_empty() {
        return Err(BookingError::validation(BookingField::PatientName, NAME_REQUIRED));
    }

    if request.email.trim().is_empty() || !EMAIL_PATTERN.is_match(&request.email) {
        return Err(BookingError::validation(BookingField::Email, EMAIL_INVALID));
    }

    let phone = request.phone.trim();
    if phone.is_empty() {
        return Err(BookingError::validation(BookingField::Phone, PHONE_REQUIRED));
    }

    let raw_date_time = request
        .date_time
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(BookingError::validation(BookingField::DateTime, DATE_TIME_REQUIRED))?;
    let date_time = parse_date_time(raw_date_time)
        .ok_or(BookingError::validation(BookingField::DateTime, DATE_TIME_INVALID))?;

    let reason = Some(request.reason.trim())
        .filter(|reason| !reason.is_empty())
        .map(str::to_string);

    Ok(ValidatedAppointment {
        patient_name: patient_name.to_string(),
        email: request.email.clone(),
        phone: phone.to_string(),
        date_time,
        reason,
    })
}

fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}
