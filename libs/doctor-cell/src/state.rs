use std::sync::Arc;

use shared_models::favorites::FavoriteLookup;

use crate::services::{Catalog, DirectoryFilter};

/// Everything the directory routes need, injected once at startup.
pub struct DirectoryState {
    pub catalog: Arc<Catalog>,
    pub filter: DirectoryFilter,
    pub favorites: Arc<dyn FavoriteLookup>,
}

impl DirectoryState {
    pub fn new(catalog: Arc<Catalog>, favorites: Arc<dyn FavoriteLookup>) -> Self {
        Self {
            filter: DirectoryFilter::new(catalog.clone()),
            catalog,
            favorites,
        }
    }
}
