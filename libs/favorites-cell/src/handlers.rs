use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::error::AppError;
use shared_utils::extractor::DoctorIdPath;

use crate::router::FavoritesState;

/// Favorited ids plus the catalog entries they resolve to. Ids with no
/// catalog entry are listed but not resolved.
pub async fn list_favorites(
    State(state): State<Arc<FavoritesState>>,
) -> Json<Value> {
    let ids = state.store.list();
    let doctors: Vec<_> = ids
        .iter()
        .filter_map(|id| state.catalog.get(*id))
        .collect();

    if doctors.len() < ids.len() {
        debug!("Skipping {} stale favorite ids", ids.len() - doctors.len());
    }

    Json(json!({
        "favorites": ids,
        "doctors": doctors,
        "total": doctors.len()
    }))
}

pub async fn get_favorite_status(
    State(state): State<Arc<FavoritesState>>,
    DoctorIdPath(doctor_id): DoctorIdPath,
) -> Json<Value> {
    Json(json!({
        "doctor_id": doctor_id,
        "is_favorite": state.store.is_favorite(doctor_id)
    }))
}

pub async fn toggle_favorite(
    State(state): State<Arc<FavoritesState>>,
    DoctorIdPath(doctor_id): DoctorIdPath,
) -> Result<Json<Value>, AppError> {
    let is_favorite = state.store.toggle(doctor_id)?;

    Ok(Json(json!({
        "doctor_id": doctor_id,
        "is_favorite": is_favorite
    })))
}
