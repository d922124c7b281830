use crate::errors::CatalogError;
use std::path::Path;
use std::sync::LazyLock;

use super::parse::parse_catalog;
use super::types::{Category, Example};

/// Source text of the built-in catalog, embedded at compile time.
pub const BUILTIN_SOURCE: &str = include_str!("queries.js");

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| match Catalog::parse(BUILTIN_SOURCE) {
    Ok(c) => {
        log::debug!("builtin catalog loaded: {} examples", c.len());
        c
    }
    Err(e) => {
        log::error!("builtin catalog failed to parse: {e}");
        Catalog::default()
    }
});

/// An ordered, immutable sequence of query examples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    examples: Vec<Example>,
}

impl Catalog {
    /// The catalog shipped with the crate. Parsed once per process.
    #[must_use]
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Parses catalog source text.
    ///
    /// # Errors
    /// See [`parse_catalog`].
    pub fn parse(src: &str) -> Result<Self, CatalogError> {
        Ok(Self { examples: parse_catalog(src)? })
    }

    /// Loads a catalog file written in the same format as the built-in one.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read, or any parse error.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let p = path.as_ref();
        log::info!("loading catalog from {}", p.display());
        let src = std::fs::read_to_string(p)
            .map_err(|e| CatalogError::Io(format!("{}: {e}", p.display())))?;
        Self::parse(&src)
    }

    #[must_use]
    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Returns the example with the given 1-based id.
    ///
    /// # Errors
    /// Returns `NoSuchExample` when `id` is 0 or past the end.
    pub fn get(&self, id: usize) -> Result<&Example, CatalogError> {
        id.checked_sub(1)
            .and_then(|i| self.examples.get(i))
            .ok_or(CatalogError::NoSuchExample { id, total: self.examples.len() })
    }

    /// Examples of one category, in catalog order.
    #[must_use]
    pub fn filter_by_category(&self, category: Category) -> Vec<&Example> {
        self.examples.iter().filter(|e| e.category == category).collect()
    }

    /// Case-insensitive substring search over descriptions and query text.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Example> {
        let needle = term.trim().to_lowercase();
        self.examples.iter().filter(|e| e.matches(&needle)).collect()
    }

    /// Number of examples per category, every category included.
    #[must_use]
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .iter()
            .map(|c| (*c, self.examples.iter().filter(|e| e.category == *c).count()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Example;
    type IntoIter = std::slice::Iter<'a, Example>;

    fn into_iter(self) -> Self::IntoIter {
        self.examples.iter()
    }
}

/// Returns the built-in examples in source order.
#[must_use]
pub fn load() -> Vec<Example> {
    Catalog::builtin().examples().to_vec()
}

/// Returns the examples of `category` from `examples`, preserving their order.
#[must_use]
pub fn filter_by_category(examples: &[Example], category: Category) -> Vec<Example> {
    examples.iter().filter(|e| e.category == category).cloned().collect()
}
