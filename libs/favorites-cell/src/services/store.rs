use std::collections::BTreeSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, instrument, warn};

use shared_models::favorites::FavoriteLookup;
use shared_models::ids::DoctorId;

use crate::error::FavoritesError;
use crate::services::storage::FavoritesStorage;

/// Process-wide set of favorited doctor ids.
///
/// Build one per process, wrap it in an `Arc` and hand the same instance to
/// every consumer. Each mutation writes the complete set back to storage
/// before returning.
pub struct FavoritesStore {
    storage: Arc<dyn FavoritesStorage>,
    favorites: RwLock<BTreeSet<DoctorId>>,
}

impl FavoritesStore {
    /// Never fails: a missing, unreadable or malformed stored value yields
    /// an empty set.
    pub fn open(storage: Arc<dyn FavoritesStorage>) -> Self {
        let favorites = match storage.load() {
            Ok(Some(raw)) => parse_favorites(&raw).unwrap_or_else(|| {
                warn!("Stored favorites are not a list of ids, starting empty");
                BTreeSet::new()
            }),
            Ok(None) => {
                debug!("No stored favorites, starting empty");
                BTreeSet::new()
            }
            Err(e) => {
                warn!("Failed to read stored favorites ({}), starting empty", e);
                BTreeSet::new()
            }
        };

        info!("Favorites store opened with {} entries", favorites.len());

        Self {
            storage,
            favorites: RwLock::new(favorites),
        }
    }

    /// Adds `id` if absent, removes it if present. Returns the new
    /// membership.
    #[instrument(skip(self))]
    pub fn toggle(&self, id: DoctorId) -> Result<bool, FavoritesError> {
        let mut favorites = self.write();
        let now_favorite = if favorites.remove(&id) {
            false
        } else {
            favorites.insert(id);
            true
        };

        if let Err(e) = self.persist(&favorites) {
            // Undo so memory keeps matching what is stored.
            if now_favorite {
                favorites.remove(&id);
            } else {
                favorites.insert(id);
            }
            return Err(e);
        }

        info!("Doctor {} favorite: {}", id, now_favorite);
        Ok(now_favorite)
    }

    /// Returns whether the set changed.
    pub fn add(&self, id: DoctorId) -> Result<bool, FavoritesError> {
        let mut favorites = self.write();
        if !favorites.insert(id) {
            return Ok(false);
        }
        if let Err(e) = self.persist(&favorites) {
            favorites.remove(&id);
            return Err(e);
        }
        Ok(true)
    }

    /// Returns whether the set changed.
    pub fn remove(&self, id: DoctorId) -> Result<bool, FavoritesError> {
        let mut favorites = self.write();
        if !favorites.remove(&id) {
            return Ok(false);
        }
        if let Err(e) = self.persist(&favorites) {
            favorites.insert(id);
            return Err(e);
        }
        Ok(true)
    }

    pub fn is_favorite(&self, id: DoctorId) -> bool {
        self.read().contains(&id)
    }

    /// Ascending ids, stale entries included.
    pub fn list(&self) -> Vec<DoctorId> {
        self.read().iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn persist(&self, favorites: &BTreeSet<DoctorId>) -> Result<(), FavoritesError> {
        let ids: Vec<DoctorId> = favorites.iter().copied().collect();
        let raw = serde_json::to_string(&ids)?;
        self.storage.save(&raw)
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeSet<DoctorId>> {
        self.favorites.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeSet<DoctorId>> {
        self.favorites.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl FavoriteLookup for FavoritesStore {
    fn is_favorite(&self, id: DoctorId) -> bool {
        FavoritesStore::is_favorite(self, id)
    }
}

fn parse_favorites(raw: &str) -> Option<BTreeSet<DoctorId>> {
    serde_json::from_str::<Vec<DoctorId>>(raw)
        .ok()
        .map(|ids| ids.into_iter().collect())
}
