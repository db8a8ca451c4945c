use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::DirectoryState;

pub fn doctor_routes(state: Arc<DirectoryState>) -> Router {
    Router::new()
        .route("/", get(handlers::search_doctors))
        .route("/specializations", get(handlers::list_specializations))
        .route("/{doctor_id}", get(handlers::get_doctor))
        .with_state(state)
}
