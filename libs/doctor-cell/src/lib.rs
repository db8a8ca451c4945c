pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod state;

pub use models::*;
pub use router::doctor_routes;
pub use services::*;
pub use state::DirectoryState;
