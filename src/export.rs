use crate::catalog::{Catalog, Category, Example};
use crate::errors::CatalogError;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Ndjson,
    Csv,
}

#[derive(Debug, Clone)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub write_headers: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { delimiter: b',', write_headers: true }
    }
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub csv: CsvOptions,
    pub temp_suffix: String,
    /// Only export this category.
    pub category: Option<Category>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Ndjson,
            csv: CsvOptions::default(),
            temp_suffix: ".tmp".to_string(),
            category: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: u64,
}

const CSV_HEADERS: [&str; 5] = ["id", "category", "description", "query", "line"];

/// Writes the catalog to `path`, replacing it only once the new content is complete.
///
/// The content goes to `{path}{temp_suffix}` first and is renamed over `path`. The
/// temp file is removed on any failure and an existing `path` is left untouched.
///
/// # Errors
/// Returns `Io` on filesystem failures and `Json`/`Csv` on encoding failures.
pub fn export_file(
    catalog: &Catalog,
    path: impl AsRef<Path>,
    opts: &ExportOptions,
) -> Result<ExportReport, CatalogError> {
    let p = path.as_ref();
    log::info!("export: path={}, format={:?}", p.display(), opts.format);
    let tmp = tmp_path(p, &opts.temp_suffix);
    let file = File::create(&tmp)?;
    let report = match export_to_writer(catalog, BufWriter::new(file), opts) {
        Ok(r) => r,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
    };
    // rename replaces an existing target in one step
    if let Err(e) = fs::rename(&tmp, p) {
        log::warn!("export: rename to {} failed: {e}", p.display());
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(report)
}

fn tmp_path(path: &Path, suffix: &str) -> PathBuf {
    let mut p = PathBuf::from(path);
    let file = p
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "export".to_string());
    p.set_file_name(format!("{}{}", file, suffix));
    p
}

fn selected<'a>(catalog: &'a Catalog, opts: &ExportOptions) -> Vec<&'a Example> {
    match opts.category {
        Some(c) => catalog.filter_by_category(c),
        None => catalog.examples().iter().collect(),
    }
}

/// Writes the selected examples to `writer` and flushes it.
///
/// # Errors
/// Returns `Io` on write failures and `Json`/`Csv` on encoding failures.
pub fn export_to_writer<W: Write>(
    catalog: &Catalog,
    mut writer: W,
    opts: &ExportOptions,
) -> Result<ExportReport, CatalogError> {
    let mut report = ExportReport::default();
    let examples = selected(catalog, opts);
    match opts.format {
        ExportFormat::Ndjson => {
            log::debug!("export ndjson start");
            for ex in examples {
                let s = serde_json::to_string(ex)?;
                writeln!(writer, "{}", s)?;
                report.written += 1;
            }
        }
        ExportFormat::Csv => {
            let mut wtr =
                csv::WriterBuilder::new().delimiter(opts.csv.delimiter).from_writer(&mut writer);
            if opts.csv.write_headers {
                wtr.write_record(CSV_HEADERS)?;
            }
            for ex in examples {
                let id = ex.id.to_string();
                let line = ex.line.to_string();
                wtr.write_record([
                    id.as_str(),
                    ex.category.slug(),
                    ex.description.as_str(),
                    ex.query.as_str(),
                    line.as_str(),
                ])?;
                report.written += 1;
            }
            wtr.flush()?;
        }
    }
    writer.flush()?;
    Ok(report)
}
