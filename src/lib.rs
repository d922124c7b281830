//! Catalog of example document-database queries (CRUD, advanced queries, aggregation
//! pipelines and index commands), grouped by category.
//!
//! The built-in catalog is embedded text parsed on first use; see [`catalog`] for the
//! source format and [`cli`] for the command runner used by the `querycat` binary.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod errors;
pub mod export;
pub mod logger;

pub use catalog::{Catalog, Category, Example, filter_by_category, load};
pub use errors::CatalogError;
