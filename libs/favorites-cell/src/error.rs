use thiserror::Error;

use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum FavoritesError {
    #[error("Favorites storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Favorites serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<FavoritesError> for AppError {
    fn from(err: FavoritesError) -> Self {
        AppError::Storage(err.to_string())
    }
}
