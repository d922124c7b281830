use crate::catalog::Category;
use crate::errors::CatalogError;
use crate::export::ExportFormat;

use super::runner::OutputMode;

pub fn parse_format_input(s: &Option<String>) -> Option<String> {
    s.as_ref().map(|x| x.to_lowercase())
}

pub fn parse_export_format(s: &Option<String>) -> ExportFormat {
    match parse_format_input(s).as_deref() {
        Some("csv") => ExportFormat::Csv,
        _ => ExportFormat::Ndjson,
    }
}

pub fn parse_output_mode(s: Option<&str>) -> OutputMode {
    match s.map(str::to_ascii_lowercase).as_deref() {
        Some("json") => OutputMode::Json,
        Some("plain") => OutputMode::Plain,
        _ => OutputMode::Human,
    }
}

/// `None` means every category.
///
/// # Errors
/// Returns `UnknownCategory` for names that match no category.
pub fn parse_category(s: &Option<String>) -> Result<Option<Category>, CatalogError> {
    s.as_deref().map(str::parse::<Category>).transpose()
}
