pub mod error;
pub mod ids;
pub mod favorites;

pub use error::AppError;
pub use favorites::FavoriteLookup;
pub use ids::DoctorId;
