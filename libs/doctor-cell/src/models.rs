use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;
use shared_models::ids::DoctorId;

pub const DEFAULT_PRICE_RANGE: (u32, u32) = (50, 250);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Available,
    Booked,
    Unavailable,
}

impl AvailabilityStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "Available Today",
            AvailabilityStatus::Booked => "Fully Booked",
            AvailabilityStatus::Unavailable => "On Leave",
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AvailabilityStatus::Available => "available",
            AvailabilityStatus::Booked => "booked",
            AvailabilityStatus::Unavailable => "unavailable",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for AvailabilityStatus {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(AvailabilityStatus::Available),
            "booked" => Ok(AvailabilityStatus::Booked),
            "unavailable" => Ok(AvailabilityStatus::Unavailable),
            other => Err(DirectoryError::InvalidFilter(format!(
                "Unknown availability status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSlots {
    #[serde(default)]
    pub today: Vec<String>,
    #[serde(default)]
    pub tomorrow: Vec<String>,
    #[serde(default, alias = "dayAfter")]
    pub day_after: Vec<String>,
}

impl TimeSlots {
    pub fn total(&self) -> usize {
        self.today.len() + self.tomorrow.len() + self.day_after.len()
    }
}

/// Catalog entry. Loaded once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorRecord {
    pub id: DoctorId,
    pub name: String,
    pub specialization: String,
    pub rating: f32,
    pub years_experience: u32,
    pub status: AvailabilityStatus,
    pub availability: String,
    pub location: String,
    /// Consultation price in whole dollars.
    pub price: u32,
    #[serde(default)]
    pub next_slot: Option<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub procedures: Vec<String>,
    #[serde(default)]
    pub insurance: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub time_slots: TimeSlots,
}

impl DoctorRecord {
    /// `needle` must already be lower-cased.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.specialization.to_lowercase().contains(needle)
            || self.location.to_lowercase().contains(needle)
    }

    pub fn is_bookable(&self) -> bool {
        self.status != AvailabilityStatus::Unavailable
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecializationFilter {
    #[default]
    All,
    Only(String),
}

impl SpecializationFilter {
    /// `None`, blank and `"all"` select every specialization.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            None | Some("") | Some("all") => SpecializationFilter::All,
            Some(spec) => SpecializationFilter::Only(spec.to_string()),
        }
    }

    pub fn accepts(&self, specialization: &str) -> bool {
        match self {
            SpecializationFilter::All => true,
            SpecializationFilter::Only(selected) => selected == specialization,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedFilters {
    pub price_range: (u32, u32),
    pub min_rating: f32,
    pub min_experience: u32,
    pub availability_status: Vec<AvailabilityStatus>,
    pub favorites_only: bool,
}

impl Default for AdvancedFilters {
    fn default() -> Self {
        Self {
            price_range: DEFAULT_PRICE_RANGE,
            min_rating: 0.0,
            min_experience: 0,
            availability_status: Vec::new(),
            favorites_only: false,
        }
    }
}

impl AdvancedFilters {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn has_active_filters(&self) -> bool {
        self.min_rating > 0.0
            || self.min_experience > 0
            || !self.availability_status.is_empty()
            || self.favorites_only
            || self.price_range.0 > DEFAULT_PRICE_RANGE.0
            || self.price_range.1 < DEFAULT_PRICE_RANGE.1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search: String,
    pub specialization: SpecializationFilter,
    pub advanced: AdvancedFilters,
}

impl FilterCriteria {
    pub fn new(search: impl Into<String>, specialization: SpecializationFilter) -> Self {
        Self {
            search: search.into(),
            specialization,
            advanced: AdvancedFilters::default(),
        }
    }

    pub fn with_advanced(mut self, advanced: AdvancedFilters) -> Self {
        self.advanced = advanced;
        self
    }
}

/// Result of a directory search. An empty match set is a normal outcome,
/// reported as `NoResults` rather than as an error.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    Results(Vec<&'a DoctorRecord>),
    NoResults,
}

impl<'a> SearchOutcome<'a> {
    pub fn from_matches(matches: Vec<&'a DoctorRecord>) -> Self {
        if matches.is_empty() {
            SearchOutcome::NoResults
        } else {
            SearchOutcome::Results(matches)
        }
    }

    pub fn doctors(&self) -> &[&'a DoctorRecord] {
        match self {
            SearchOutcome::Results(doctors) => doctors,
            SearchOutcome::NoResults => &[],
        }
    }

    pub fn ids(&self) -> Vec<DoctorId> {
        self.doctors().iter().map(|d| d.id).collect()
    }

    pub fn len(&self) -> usize {
        self.doctors().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SearchOutcome::NoResults)
    }
}

#[derive(Debug, Serialize)]
pub struct DoctorProfile<'a> {
    #[serde(flatten)]
    pub doctor: &'a DoctorRecord,
    pub is_favorite: bool,
    pub bookable: bool,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Doctor not found: {0}")]
    NotFound(DoctorId),

    #[error("Duplicate doctor id in catalog: {0}")]
    DuplicateId(DoctorId),

    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
}

impl From<DirectoryError> for AppError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound(_) => AppError::doctor_not_found(),
            DirectoryError::InvalidFilter(msg) => AppError::BadRequest(msg),
            other => AppError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specialization_param() {
        assert_eq!(SpecializationFilter::from_param(None), SpecializationFilter::All);
        assert_eq!(SpecializationFilter::from_param(Some("all")), SpecializationFilter::All);
        assert_eq!(SpecializationFilter::from_param(Some("  ")), SpecializationFilter::All);
        assert_eq!(
            SpecializationFilter::from_param(Some("Dentist")),
            SpecializationFilter::Only("Dentist".to_string())
        );
    }

    #[test]
    fn test_specialization_match_is_exact() {
        let filter = SpecializationFilter::Only("Cardiologist".to_string());
        assert!(filter.accepts("Cardiologist"));
        assert!(!filter.accepts("cardiologist"));
        assert!(!filter.accepts("Cardio"));
    }

    #[test]
    fn test_cleared_filters_are_inactive() {
        let mut filters = AdvancedFilters {
            price_range: (60, 200),
            min_rating: 4.5,
            min_experience: 10,
            availability_status: vec![AvailabilityStatus::Booked],
            favorites_only: true,
        };
        assert!(filters.has_active_filters());

        filters.clear();
        assert_eq!(filters, AdvancedFilters::default());
        assert_eq!(filters.price_range, (50, 250));
        assert!(!filters.has_active_filters());
    }

    #[test]
    fn test_widened_price_range_is_not_active() {
        let filters = AdvancedFilters {
            price_range: (0, 500),
            ..AdvancedFilters::default()
        };
        assert!(!filters.has_active_filters());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Booked".parse::<AvailabilityStatus>().unwrap(), AvailabilityStatus::Booked);
        assert!("busy".parse::<AvailabilityStatus>().is_err());
        assert_eq!(AvailabilityStatus::Unavailable.label(), "On Leave");
    }
}
