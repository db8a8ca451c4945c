use std::sync::Arc;

use axum::{routing::get, Router};

use doctor_cell::Catalog;

use crate::handlers;
use crate::services::BookingService;

pub struct BookingState {
    pub catalog: Arc<Catalog>,
    pub service: BookingService,
}

pub fn appointment_routes(state: Arc<BookingState>) -> Router {
    Router::new()
        .route(
            "/{doctor_id}",
            get(handlers::get_booking_context).post(handlers::submit_appointment),
        )
        .with_state(state)
}
