use querycat::catalog::Catalog;
use querycat::cli::{Command, OutputMode, run_to};
use querycat::errors::CatalogError;
use std::fs;
use tempfile::tempdir;

fn capture(cmd: Command, mode: OutputMode) -> Result<String, Box<dyn std::error::Error>> {
    let mut buf: Vec<u8> = Vec::new();
    run_to(Catalog::builtin(), cmd, mode, &mut buf)?;
    Ok(String::from_utf8(buf).unwrap())
}

#[test]
fn test_cli_list_all_plain() {
    let s = capture(Command::List { category: None }, OutputMode::Plain).unwrap();
    let lines: Vec<&str> = s.lines().collect();
    assert_eq!(lines.len(), 17);
    assert_eq!(lines[0], "1\tcrud\tFind all books in a specific genre");
    assert!(lines[16].starts_with("17\tindexing\t"));
}

#[test]
fn test_cli_list_category_json() {
    let s = capture(Command::List { category: Some("Indexing".into()) }, OutputMode::Json).unwrap();
    let v: serde_json::Value = serde_json::from_str(&s).unwrap();
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), 3);
    let ids: Vec<u64> = arr.iter().map(|e| e["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![15, 16, 17]);
    assert!(arr.iter().all(|e| e["category"] == "indexing"));
}

#[test]
fn test_cli_unknown_category_is_an_error() {
    let err = capture(Command::List { category: Some("sharding".into()) }, OutputMode::Human).unwrap_err();
    let err = err.downcast::<CatalogError>().unwrap();
    assert!(matches!(*err, CatalogError::UnknownCategory(ref s) if s == "sharding"));
    assert!(err.to_string().contains("sharding"));
}

#[test]
fn test_cli_show_modes() {
    let human = capture(Command::Show { id: 16 }, OutputMode::Human).unwrap();
    assert!(human.starts_with("#16 [Indexing] Compound index on author + published_year"));
    assert!(human.contains("db.books.createIndex({ author: 1, published_year: -1 })"));

    let plain = capture(Command::Show { id: 1 }, OutputMode::Plain).unwrap();
    assert_eq!(plain, "db.books.find({ genre: \"Programming\" })\n");

    let json = capture(Command::Show { id: 12 }, OutputMode::Json).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["category"], "aggregation");
    assert_eq!(v["description"], "Average price of books by genre");
}

#[test]
fn test_cli_show_out_of_range() {
    let err = capture(Command::Show { id: 99 }, OutputMode::Human).unwrap_err();
    assert!(err.to_string().contains("99"));
}

#[test]
fn test_cli_categories() {
    let plain = capture(Command::Categories, OutputMode::Plain).unwrap();
    assert_eq!(plain, "crud\t5\nadvanced-query\t6\naggregation\t3\nindexing\t3\n");
    let json = capture(Command::Categories, OutputMode::Json).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v[1]["label"], "Advanced queries");
    assert_eq!(v[1]["count"], 6);
}

#[test]
fn test_cli_search() {
    let s = capture(Command::Search { term: "explain".into() }, OutputMode::Plain).unwrap();
    assert_eq!(s.lines().count(), 1);
    assert!(s.starts_with("17\t"));
    let none = capture(Command::Search { term: "mapReduce".into() }, OutputMode::Human).unwrap();
    assert_eq!(none, "no matches for 'mapReduce'\n");
    let none_json = capture(Command::Search { term: "mapReduce".into() }, OutputMode::Json).unwrap();
    assert_eq!(none_json.trim(), "[]");
}

#[test]
fn test_cli_export_csv() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("crud.csv");
    let msg = capture(
        Command::Export { file: out.clone(), format: Some("csv".into()), category: Some("crud".into()) },
        OutputMode::Plain,
    )
    .unwrap();
    assert_eq!(msg.trim(), "5");
    let s = fs::read_to_string(&out).unwrap();
    assert!(s.starts_with("id,category,description,query,line"));
    assert!(s.contains("updateOne"));
    assert!(!s.contains("aggregate"));
}

#[test]
fn test_cli_validate() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.js");
    fs::write(&good, "// --- CRUD ---\n// one\ndb.a.find()\n// two\ndb.a.deleteMany({})\n").unwrap();
    let s = capture(Command::Validate { file: good }, OutputMode::Human).unwrap();
    assert_eq!(s, "ok: 2 examples (2 crud, 0 advanced-query, 0 aggregation, 0 indexing)\n");

    let bad = dir.path().join("bad.js");
    fs::write(&bad, "// --- CRUD ---\n// open\ndb.a.find({\n").unwrap();
    let err = capture(Command::Validate { file: bad }, OutputMode::Human).unwrap_err();
    assert!(err.to_string().contains("line 3"));
}
