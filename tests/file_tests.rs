use dmap::cli::{execute, Command, Outcome};
use dmap::file::loader::{load_file, load_from_reader};
use dmap::{path, Dmap, Format};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper function to create a temporary file path with the given name
fn temp_file_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

fn run(command: Command, dmap: &Dmap) -> (Outcome, String) {
    let mut out = Vec::new();
    let outcome = execute(&command, dmap, &mut out).expect("command failed");
    (outcome, String::from_utf8(out).unwrap())
}

#[test]
fn test_load_json_file() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "doc.json");
    fs::write(&path, r#"{"root": {"contents": ["c1", "c2"]}}"#).unwrap();

    let dmap = load_file(&path, None).unwrap();
    assert_eq!(dmap.get_str(path!["root", "contents", 0]).unwrap(), "c1");
}

#[test]
fn test_load_yaml_file_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "doc.yaml");
    fs::write(&path, "root:\n  title: from yaml\n").unwrap();

    let dmap = load_file(&path, None).unwrap();
    assert_eq!(dmap.get_str(path!["root", "title"]).unwrap(), "from yaml");
}

#[test]
fn test_explicit_format_overrides_extension() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "doc.json");
    fs::write(&path, "key: value\n").unwrap();

    assert!(load_file(&path, None).is_err());
    let dmap = load_file(&path, Some(Format::Yaml)).unwrap();
    assert_eq!(dmap.get_str(path!["key"]).unwrap(), "value");
}

#[test]
fn test_load_gzipped_json_file() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "doc.json.gz");

    let file = fs::File::create(&path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder
        .write_all(br#"{"name": "Alice", "age": 30}"#)
        .unwrap();
    encoder.finish().unwrap();

    let dmap = load_file(&path, None).unwrap();
    assert_eq!(dmap.get_object(path![]).unwrap().len(), 2);
    assert_eq!(dmap.get_i64(path!["age"]).unwrap(), 30);
}

#[test]
fn test_invalid_file_reports_format() {
    let dir = TempDir::new().unwrap();
    let path = temp_file_path(&dir, "bad.json");
    fs::write(&path, "{ not json").unwrap();

    let err = load_file(&path, None).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse"));
}

#[test]
fn test_cli_get_prints_value() {
    let dmap = load_from_reader(&br#"{"root": {"title": "t", "contents": [1, "two", null]}}"#[..], None).unwrap();

    let (outcome, output) = run(Command::Get { path: "$.root.contents".to_string() }, &dmap);
    assert_eq!(outcome, Outcome::Success);
    assert_eq!(output, "[1, \"two\", null]\n");

    let (_, output) = run(Command::Get { path: "root.title".to_string() }, &dmap);
    assert_eq!(output, "\"t\"\n");
}

#[test]
fn test_cli_get_missing_path_fails() {
    let dmap = Dmap::from_json_slice(br#"{"a": [1]}"#).unwrap();
    let mut out = Vec::new();
    let err = execute(&Command::Get { path: "a[3]".to_string() }, &dmap, &mut out).unwrap_err();
    assert_eq!(err.to_string(), "index 3 out of range at path $.a[3]");
    assert!(out.is_empty());
}

#[test]
fn test_cli_type_and_keys() {
    let dmap = Dmap::from_yaml_slice(b"obj: {b: 1, a: 2}\nlist: [x, y]\ncodes: {200: ok, 404: nope}\n").unwrap();

    let (_, output) = run(Command::Type { path: "obj".to_string() }, &dmap);
    assert_eq!(output, "object\n");
    let (_, output) = run(Command::Type { path: "codes".to_string() }, &dmap);
    assert_eq!(output, "map\n");

    let (_, output) = run(Command::Keys { path: "obj".to_string() }, &dmap);
    assert_eq!(output, "b\na\n");
    let (_, output) = run(Command::Keys { path: "list".to_string() }, &dmap);
    assert_eq!(output, "0\n1\n");
    let (_, output) = run(Command::Keys { path: "codes".to_string() }, &dmap);
    assert_eq!(output, "200\n404\n");
}

#[test]
fn test_cli_invalid_path_text() {
    let dmap = Dmap::from_json_slice(b"{}").unwrap();
    let mut out = Vec::new();
    let err = execute(&Command::Exists { path: "$.[".to_string() }, &dmap, &mut out).unwrap_err();
    assert!(err.to_string().contains("invalid path"));
}
