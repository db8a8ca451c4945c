use std::sync::Arc;

use tracing::debug;

use shared_models::favorites::FavoriteLookup;

use crate::models::{AdvancedFilters, DoctorRecord, FilterCriteria, SearchOutcome};
use crate::services::catalog::Catalog;

pub struct DirectoryFilter {
    catalog: Arc<Catalog>,
}

impl DirectoryFilter {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Ordered subsequence of the catalog satisfying every predicate in
    /// `criteria`. Catalog order is preserved; nothing is re-sorted.
    pub fn search<'a>(
        &'a self,
        criteria: &FilterCriteria,
        favorites: &dyn FavoriteLookup,
    ) -> SearchOutcome<'a> {
        let needle = criteria.search.to_lowercase();

        let matches: Vec<&DoctorRecord> = self
            .catalog
            .doctors()
            .iter()
            .filter(|doctor| doctor.matches_search(&needle))
            .filter(|doctor| criteria.specialization.accepts(&doctor.specialization))
            .filter(|doctor| passes_advanced(doctor, &criteria.advanced, favorites))
            .collect();

        debug!(
            "Directory search {:?} / {:?} matched {} of {}",
            criteria.search,
            criteria.specialization,
            matches.len(),
            self.catalog.len()
        );

        SearchOutcome::from_matches(matches)
    }
}

fn passes_advanced(
    doctor: &DoctorRecord,
    filters: &AdvancedFilters,
    favorites: &dyn FavoriteLookup,
) -> bool {
    let (min_price, max_price) = filters.price_range;

    (min_price..=max_price).contains(&doctor.price)
        && doctor.rating >= filters.min_rating
        && doctor.years_experience >= filters.min_experience
        && (filters.availability_status.is_empty()
            || filters.availability_status.contains(&doctor.status))
        && (!filters.favorites_only || favorites.is_favorite(doctor.id))
}
