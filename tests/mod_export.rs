use querycat::catalog::{Catalog, Category, Example};
use querycat::export::{ExportFormat, ExportOptions, export_file, export_to_writer};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_export_ndjson_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.jsonl");
    let opts = ExportOptions { format: ExportFormat::Ndjson, ..Default::default() };
    let rep = export_file(Catalog::builtin(), &out, &opts).unwrap();
    assert_eq!(rep.written, 17);
    let s = fs::read_to_string(&out).unwrap();
    let parsed: Vec<Example> = s.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(parsed.as_slice(), Catalog::builtin().examples());
    assert!(!dir.path().join("out.jsonl.tmp").exists());
}

#[test]
fn test_export_csv_without_headers() {
    let opts = ExportOptions {
        format: ExportFormat::Csv,
        category: Some(Category::Indexing),
        csv: querycat::export::CsvOptions { delimiter: b';', write_headers: false },
        ..Default::default()
    };
    let mut buf = Vec::new();
    let rep = export_to_writer(Catalog::builtin(), &mut buf, &opts).unwrap();
    assert_eq!(rep.written, 3);
    let s = String::from_utf8(buf).unwrap();
    assert_eq!(s.lines().count(), 3);
    assert!(s.starts_with("15;indexing;Index on title;"));
}

#[test]
fn test_export_overwrite_replaces_content() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.jsonl");
    fs::write(&out, "stale\n").unwrap();
    let opts = ExportOptions { category: Some(Category::Aggregation), ..Default::default() };
    let rep = export_file(Catalog::builtin(), &out, &opts).unwrap();
    assert_eq!(rep.written, 3);
    let s = fs::read_to_string(&out).unwrap();
    assert!(!s.contains("stale"));
    assert_eq!(s.lines().count(), 3);
}

#[test]
fn test_export_into_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("missing").join("out.jsonl");
    let res = export_file(Catalog::builtin(), &out, &ExportOptions::default());
    assert!(matches!(res, Err(querycat::errors::CatalogError::Io(_))));
}

#[test]
fn test_export_failed_rename_cleans_up_and_keeps_target() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();
    fs::write(out.join("keep.txt"), "kept").unwrap();

    let res = export_file(Catalog::builtin(), &out, &ExportOptions::default());
    assert!(matches!(res, Err(querycat::errors::CatalogError::Io(_))));
    assert!(!dir.path().join("out.tmp").exists());
    assert_eq!(fs::read_to_string(out.join("keep.txt")).unwrap(), "kept");
}
