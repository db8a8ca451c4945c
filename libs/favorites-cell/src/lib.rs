pub mod error;
pub mod handlers;
pub mod router;
pub mod services;

pub use error::FavoritesError;
pub use router::{favorites_routes, FavoritesState};
pub use services::*;
