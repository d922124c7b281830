use crate::catalog::{Catalog, Category, Example};
use crate::export::{ExportOptions, export_file};
use crate::logger::AUDIT_TARGET;
use std::io::Write;

use super::command::Command;
use super::util::{parse_category, parse_export_format};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputMode {
    Human,
    Plain,
    Json,
}

/// Runs a command with human-readable output on stdout.
pub fn run(catalog: &Catalog, cmd: Command) -> Result<(), Box<dyn std::error::Error>> {
    run_with_format(catalog, cmd, OutputMode::Human)
}

pub fn run_with_format(
    catalog: &Catalog,
    cmd: Command,
    mode: OutputMode,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_to(catalog, cmd, mode, &mut out)
}

fn write_examples<W: Write>(
    out: &mut W,
    examples: &[&Example],
    mode: OutputMode,
) -> Result<(), Box<dyn std::error::Error>> {
    match mode {
        OutputMode::Json => {
            let json = serde_json::to_string(examples)?;
            writeln!(out, "{json}")?;
        }
        OutputMode::Plain => {
            for ex in examples {
                writeln!(out, "{}\t{}\t{}", ex.id, ex.category.slug(), ex.description)?;
            }
        }
        OutputMode::Human => {
            for ex in examples {
                writeln!(out, "{:>3}  {:<15} {}", ex.id, ex.category.slug(), ex.description)?;
            }
        }
    }
    Ok(())
}

fn counts_json(counts: &[(Category, usize)]) -> serde_json::Map<String, serde_json::Value> {
    counts.iter().map(|(c, n)| (c.slug().to_string(), serde_json::json!(n))).collect()
}

/// Runs a command, writing its output to `out`.
///
/// # Errors
/// Unknown categories, out-of-range ids, unreadable or malformed catalog files and
/// export failures are returned to the caller; nothing is printed for them.
pub fn run_to<W: Write>(
    catalog: &Catalog,
    cmd: Command,
    mode: OutputMode,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    log::info!(target: AUDIT_TARGET, "command={}", cmd.name());
    match cmd {
        Command::List { category } => {
            let examples: Vec<&Example> = match parse_category(&category)? {
                Some(c) => catalog.filter_by_category(c),
                None => catalog.examples().iter().collect(),
            };
            write_examples(out, &examples, mode)
        }
        Command::Show { id } => {
            let ex = catalog.get(id)?;
            match mode {
                OutputMode::Json => {
                    let json = serde_json::to_string_pretty(ex)?;
                    writeln!(out, "{json}")?;
                }
                OutputMode::Plain => writeln!(out, "{}", ex.query)?,
                OutputMode::Human => {
                    writeln!(out, "#{} [{}] {}", ex.id, ex.category.label(), ex.description)?;
                    writeln!(out)?;
                    writeln!(out, "{}", ex.query)?;
                }
            }
            Ok(())
        }
        Command::Categories => {
            let counts = catalog.category_counts();
            match mode {
                OutputMode::Json => {
                    let list: Vec<serde_json::Value> = counts
                        .iter()
                        .map(|(c, n)| serde_json::json!({"category": c.slug(), "label": c.label(), "count": n}))
                        .collect();
                    writeln!(out, "{}", serde_json::to_string(&list)?)?;
                }
                OutputMode::Plain => {
                    for (c, n) in counts {
                        writeln!(out, "{}\t{}", c.slug(), n)?;
                    }
                }
                OutputMode::Human => {
                    for (c, n) in counts {
                        writeln!(out, "{:<22} {:<15} {}", c.label(), c.slug(), n)?;
                    }
                }
            }
            Ok(())
        }
        Command::Search { term } => {
            let hits = catalog.search(&term);
            log::debug!("search term={term:?} hits={}", hits.len());
            if hits.is_empty() && mode == OutputMode::Human {
                writeln!(out, "no matches for '{term}'")?;
                return Ok(());
            }
            write_examples(out, &hits, mode)
        }
        Command::Export { file, format, category } => {
            let opts = ExportOptions {
                format: parse_export_format(&format),
                category: parse_category(&category)?,
                ..Default::default()
            };
            let report = export_file(catalog, &file, &opts)?;
            match mode {
                OutputMode::Json => {
                    let json = serde_json::json!({"action":"exported","written": report.written,"path": file.display().to_string()});
                    writeln!(out, "{json}")?;
                }
                OutputMode::Plain => writeln!(out, "{}", report.written)?,
                OutputMode::Human => {
                    writeln!(out, "exported {} examples to {}", report.written, file.display())?;
                }
            }
            Ok(())
        }
        Command::Validate { file } => {
            let checked = Catalog::from_path(&file)?;
            let counts = checked.category_counts();
            match mode {
                OutputMode::Json => {
                    let json = serde_json::json!({"valid": true, "examples": checked.len(), "categories": counts_json(&counts)});
                    writeln!(out, "{json}")?;
                }
                OutputMode::Plain => writeln!(out, "{}", checked.len())?,
                OutputMode::Human => {
                    let breakdown: Vec<String> =
                        counts.iter().map(|(c, n)| format!("{n} {}", c.slug())).collect();
                    writeln!(out, "ok: {} examples ({})", checked.len(), breakdown.join(", "))?;
                }
            }
            Ok(())
        }
    }
}
