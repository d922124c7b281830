use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unknown section at line {line}: {heading}")]
    UnknownSection { line: usize, heading: String },

    #[error("Catalog contains no examples")]
    Empty,

    #[error("Unknown category: {0} (expected one of: crud, advanced-query, aggregation, indexing)")]
    UnknownCategory(String),

    #[error("Example not found: {id} (catalog has {total} examples)")]
    NoSuchExample { id: usize, total: usize },

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::Io(e.to_string())
    }
}
