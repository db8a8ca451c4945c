use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use doctor_cell::Catalog;

use crate::handlers;
use crate::services::FavoritesStore;

pub struct FavoritesState {
    pub store: Arc<FavoritesStore>,
    pub catalog: Arc<Catalog>,
}

pub fn favorites_routes(state: Arc<FavoritesState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_favorites))
        .route("/{doctor_id}", get(handlers::get_favorite_status))
        .route("/{doctor_id}/toggle", post(handlers::toggle_favorite))
        .with_state(state)
}
