// Library exports for TastyNest
// The presentation layer drives everything through `CatalogStore`

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod persistence;

pub use catalog::CatalogStore;
pub use error::{CatalogError, CatalogResult, DuplicateReason, StoreError};
