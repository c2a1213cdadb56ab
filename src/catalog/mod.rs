//! Catalog Module
//! Mission: Product collection storage and its HTTP surface

pub mod api;
pub mod models;
pub mod store;

pub use models::{Product, ProductDraft};
pub use store::{CatalogError, CatalogStore};
