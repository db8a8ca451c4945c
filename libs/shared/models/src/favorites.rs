use std::collections::{BTreeSet, HashSet};

use crate::ids::DoctorId;

/// Read side of the favorites set, handed to consumers that only need
/// membership tests (the directory filter, profile views).
pub trait FavoriteLookup: Send + Sync {
    fn is_favorite(&self, id: DoctorId) -> bool;
}

impl FavoriteLookup for HashSet<DoctorId> {
    fn is_favorite(&self, id: DoctorId) -> bool {
        self.contains(&id)
    }
}

impl FavoriteLookup for BTreeSet<DoctorId> {
    fn is_favorite(&self, id: DoctorId) -> bool {
        self.contains(&id)
    }
}

/// Lookup for callers without a favorites store.
pub struct NoFavorites;

impl FavoriteLookup for NoFavorites {
    fn is_favorite(&self, _id: DoctorId) -> bool {
        false
    }
}
