use crate::errors::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of query an example demonstrates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Crud,
    AdvancedQuery,
    Aggregation,
    Indexing,
}

impl Category {
    /// All categories in catalog order.
    pub const ALL: [Category; 4] =
        [Category::Crud, Category::AdvancedQuery, Category::Aggregation, Category::Indexing];

    /// Stable lowercase name used on the command line and in exports.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Category::Crud => "crud",
            Category::AdvancedQuery => "advanced-query",
            Category::Aggregation => "aggregation",
            Category::Indexing => "indexing",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Category::Crud => "CRUD",
            Category::AdvancedQuery => "Advanced queries",
            Category::Aggregation => "Aggregation pipelines",
            Category::Indexing => "Indexing",
        }
    }

    /// Maps a section banner heading (e.g. `BASIC CRUD`) to its category by keyword.
    #[must_use]
    pub fn from_heading(heading: &str) -> Option<Category> {
        let h = heading.to_ascii_uppercase();
        if h.contains("CRUD") {
            Some(Category::Crud)
        } else if h.contains("ADVANCED") {
            Some(Category::AdvancedQuery)
        } else if h.contains("AGGREGAT") {
            Some(Category::Aggregation)
        } else if h.contains("INDEX") {
            Some(Category::Indexing)
        } else {
            None
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "crud" => Ok(Category::Crud),
            "advancedquery" | "advancedqueries" | "advanced" => Ok(Category::AdvancedQuery),
            "aggregation" | "aggregationpipelines" | "aggregations" | "aggregate" => {
                Ok(Category::Aggregation)
            }
            "indexing" | "index" | "indexes" => Ok(Category::Indexing),
            _ => Err(CatalogError::UnknownCategory(s.to_string())),
        }
    }
}

/// A single catalog entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// 1-based position in the catalog.
    pub id: usize,
    pub category: Category,
    pub description: String,
    pub query: String,
    /// Source line the statement starts on.
    pub line: usize,
}

impl Example {
    /// Collection named by a `db.<collection>.<op>(` statement, if any.
    #[must_use]
    pub fn collection(&self) -> Option<&str> {
        self.invocation_head().map(|(c, _)| c)
    }

    /// Operation named by a `db.<collection>.<op>(` statement, if any.
    #[must_use]
    pub fn operation(&self) -> Option<&str> {
        self.invocation_head().map(|(_, op)| op)
    }

    fn invocation_head(&self) -> Option<(&str, &str)> {
        let rest = self.query.trim_start().strip_prefix("db.")?;
        let (collection, rest) = rest.split_once('.')?;
        let end = rest.find('(')?;
        let op = rest[..end].trim();
        if collection.is_empty() || op.is_empty() {
            return None;
        }
        Some((collection, op))
    }

    pub(crate) fn matches(&self, needle_lower: &str) -> bool {
        self.description.to_lowercase().contains(needle_lower)
            || self.query.to_lowercase().contains(needle_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parsing_accepts_aliases() {
        assert_eq!("CRUD".parse::<Category>().unwrap(), Category::Crud);
        assert_eq!("advanced-query".parse::<Category>().unwrap(), Category::AdvancedQuery);
        assert_eq!("AdvancedQuery".parse::<Category>().unwrap(), Category::AdvancedQuery);
        assert_eq!("advanced_queries".parse::<Category>().unwrap(), Category::AdvancedQuery);
        assert_eq!("Aggregation".parse::<Category>().unwrap(), Category::Aggregation);
        assert_eq!("indexes".parse::<Category>().unwrap(), Category::Indexing);
        assert!(matches!("sharding".parse::<Category>(), Err(CatalogError::UnknownCategory(s)) if s == "sharding"));
    }

    #[test]
    fn slug_round_trips_through_from_str() {
        for c in Category::ALL {
            assert_eq!(c.slug().parse::<Category>().unwrap(), c);
        }
    }

    #[test]
    fn heading_keywords() {
        assert_eq!(Category::from_heading("BASIC CRUD"), Some(Category::Crud));
        assert_eq!(Category::from_heading("Aggregation Pipelines"), Some(Category::Aggregation));
        assert_eq!(Category::from_heading("INDEXING"), Some(Category::Indexing));
        assert_eq!(Category::from_heading("MISC"), None);
    }

    #[test]
    fn invocation_head() {
        let ex = Example {
            id: 1,
            category: Category::Indexing,
            description: "x".into(),
            query: "db.books.createIndex({ title: 1 })".into(),
            line: 1,
        };
        assert_eq!(ex.collection(), Some("books"));
        assert_eq!(ex.operation(), Some("createIndex"));
        let other = Example { query: "show dbs".into(), ..ex };
        assert_eq!(other.operation(), None);
    }

    #[test]
    fn serializes_with_slugs() {
        let ex = Example {
            id: 2,
            category: Category::AdvancedQuery,
            description: "d".into(),
            query: "q".into(),
            line: 3,
        };
        let v = serde_json::to_value(&ex).unwrap();
        assert_eq!(v["category"], "advanced-query");
        assert_eq!(serde_json::to_value(Category::Crud).unwrap(), "crud");
    }
}
