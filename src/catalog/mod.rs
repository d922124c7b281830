// Submodules for separation of concerns
mod core;
mod parse;
mod types;

pub use self::core::{BUILTIN_SOURCE, Catalog, filter_by_category, load};
pub use parse::parse_catalog;
pub use types::{Category, Example};
