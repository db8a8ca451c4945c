use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use shared_models::error::AppError;
use shared_utils::extractor::DoctorIdPath;

use crate::models::{
    AdvancedFilters, AvailabilityStatus, DirectoryError, DoctorProfile, FilterCriteria,
    SpecializationFilter,
};
use crate::state::DirectoryState;

#[derive(Debug, Default, Deserialize)]
pub struct DirectorySearchQuery {
    pub search: Option<String>,
    pub specialization: Option<String>,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub min_rating: Option<f32>,
    pub min_experience: Option<u32>,
    /// Comma separated, e.g. `available,booked`.
    pub status: Option<String>,
    pub favorites_only: Option<bool>,
}

impl DirectorySearchQuery {
    pub fn into_criteria(self) -> Result<FilterCriteria, DirectoryError> {
        let defaults = AdvancedFilters::default();
        let price_range = (
            self.min_price.unwrap_or(defaults.price_range.0),
            self.max_price.unwrap_or(defaults.price_range.1),
        );
        if price_range.0 > price_range.1 {
            return Err(DirectoryError::InvalidFilter(
                "min_price cannot exceed max_price".to_string(),
            ));
        }

        let availability_status = match self.status.as_deref() {
            Some(raw) => raw
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(str::parse::<AvailabilityStatus>)
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        let advanced = AdvancedFilters {
            price_range,
            min_rating: self.min_rating.unwrap_or(defaults.min_rating),
            min_experience: self.min_experience.unwrap_or(defaults.min_experience),
            availability_status,
            favorites_only: self.favorites_only.unwrap_or(false),
        };

        Ok(FilterCriteria::new(
            self.search.unwrap_or_default(),
            SpecializationFilter::from_param(self.specialization.as_deref()),
        )
        .with_advanced(advanced))
    }
}

#[axum::debug_handler]
pub async fn search_doctors(
    State(state): State<Arc<DirectoryState>>,
    query: Result<Query<DirectorySearchQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let criteria = query.into_criteria()?;
    let outcome = state.filter.search(&criteria, state.favorites.as_ref());

    Ok(Json(json!({
        "doctors": outcome.doctors(),
        "total": outcome.len(),
        "no_results": outcome.is_empty(),
        "active_filters": criteria.advanced.has_active_filters()
    })))
}

#[axum::debug_handler]
pub async fn list_specializations(
    State(state): State<Arc<DirectoryState>>,
) -> Json<Value> {
    Json(json!({
        "specializations": state.catalog.specializations()
    }))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<DirectoryState>>,
    DoctorIdPath(doctor_id): DoctorIdPath,
) -> Result<Json<Value>, AppError> {
    let doctor = state.catalog.require(doctor_id)?;
    debug!("Serving profile for doctor {}", doctor_id);

    let profile = DoctorProfile {
        doctor,
        is_favorite: state.favorites.is_favorite(doctor_id),
        bookable: doctor.is_bookable(),
    };

    Ok(Json(json!(profile)))
}
