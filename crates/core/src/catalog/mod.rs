//! Catalog module - paginated campaign listing and its refresh cycle.

mod catalog_model;
mod catalog_synchronizer;


pub use catalog_model::{
    CardSync, CatalogFailure, CatalogOutcome, CatalogPage, CatalogState, RefreshTrigger,
};
pub use catalog_synchronizer::CatalogSynchronizer;
