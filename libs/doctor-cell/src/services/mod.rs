pub mod catalog;
pub mod filter;

pub use catalog::Catalog;
pub use filter::DirectoryFilter;
