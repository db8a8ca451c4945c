use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, instrument};

use doctor_cell::DoctorRecord;
use shared_config::AppConfig;

use crate::models::{AppointmentRequest, BookingConfirmation, BookingError, BookingStatus};
use crate::services::validation::validate_appointment;

/// Accepts booking forms and hands back a locally generated confirmation
/// after a fixed simulated latency. Nothing is persisted.
pub struct BookingService {
    latency: Duration,
    last_issued: AtomicU64,
}

impl BookingService {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            last_issued: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.booking_latency())
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Validation failures return immediately, without waiting out the
    /// latency and without consuming an id.
    #[instrument(skip(self, doctor, request), fields(doctor_id = %doctor.id))]
    pub async fn submit(
        &self,
        doctor: &DoctorRecord,
        request: &AppointmentRequest,
    ) -> Result<BookingConfirmation, BookingError> {
        let validated = validate_appointment(request)?;
        debug!("Booking request validated, waiting {:?}", self.latency);

        tokio::time::sleep(self.latency).await;

        let appointment_id = self.next_appointment_id();
        info!("Issued appointment {} for doctor {}", appointment_id, doctor.id);

        Ok(BookingConfirmation {
            appointment_id,
            status: BookingStatus::Confirmed,
            doctor_id: doctor.id,
            doctor_name: doctor.name.clone(),
            patient_name: validated.patient_name,
            email: validated.email,
            phone: validated.phone,
            date_time: validated.date_time,
            reason: validated.reason,
            confirmed_at: Utc::now(),
        })
    }

    /// `APT-<epoch millis>`, bumped forward when two submissions land in
    /// the same millisecond so ids stay unique within the process.
    fn next_appointment_id(&self) -> String {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let previous = self
            .last_issued
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        format!("APT-{}", now.max(previous + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_strictly_increasing() {
        let service = BookingService::new(Duration::ZERO);
        let ids: Vec<u64> = (0..50)
            .map(|_| service.next_appointment_id())
            .map(|id| id.trim_start_matches("APT-").parse().unwrap())
            .collect();

        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
