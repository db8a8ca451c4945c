pub mod storage;
pub mod store;

pub use storage::{FavoritesStorage, FileStorage, MemoryStorage};
pub use store::FavoritesStore;
