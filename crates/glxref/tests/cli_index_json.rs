use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn glxref_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_glxref"))
}

fn run_cli(args: &[String], root: &Path) -> Output {
    let mut cmd = Command::new(glxref_bin());
    cmd.arg("--root").arg(root);
    cmd.args(args);
    cmd.env("RUST_LOG", "error");
    cmd.env_remove("GLXREF_CONFIG");
    cmd.env_remove("GLXREF_LOG_FILE");
    cmd.output().expect("failed to execute glxref CLI")
}

fn parse_json_output(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json_start = stdout.find(|c| c == '{' || c == '[').unwrap_or_else(|| {
        panic!(
            "no JSON payload found in output\nstdout:\n{}\nstderr:\n{}",
            stdout,
            String::from_utf8_lossy(&output.stderr)
        )
    });
    let json_text = &stdout[json_start..];
    let mut deserializer = serde_json::Deserializer::from_str(json_text);
    serde_json::Value::deserialize(&mut deserializer).unwrap_or_else(|err| {
        panic!(
            "failed to parse JSON output: {}\nstdout:\n{}\nstderr:\n{}",
            err,
            stdout,
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

fn run_cli_json<T: DeserializeOwned>(args: &[String], root: &Path) -> T {
    let output = run_cli(args, root);
    assert!(
        output.status.success(),
        "command failed: {}\nstdout:\n{}\nstderr:\n{}",
        args.join(" "),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    let value = parse_json_output(&output);
    serde_json::from_value(value).unwrap_or_else(|err| {
        panic!(
            "failed to deserialize JSON output: {}\nstdout:\n{}\nstderr:\n{}",
            err,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

fn run_cli_json_error(args: &[String], root: &Path) -> serde_json::Value {
    let output = run_cli(args, root);
    assert!(
        !output.status.success(),
        "command unexpectedly succeeded: {}\nstdout:\n{}\nstderr:\n{}",
        args.join(" "),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    parse_json_output(&output)
}

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const HEADER: &str = "\
#ifndef GL_H
#define GL_H
/* Drawing */
void glBegin(GLenum mode);
void glEnd(void);
/* Color */
void glColor(int c);
void glColor3f(float r, float g, float b);
/* Fog */
void glFogf(GLenum pname, float param);
#endif
";

/// Lay out the default tree: tinygl/include/GL/gl.h + tinygl/src/*.c
fn fixture() -> TempDir {
    let dir = TempDir::new().expect("create temp root");
    let include = dir.path().join("tinygl/include/GL");
    let src = dir.path().join("tinygl/src");
    fs::create_dir_all(&include).unwrap();
    fs::create_dir_all(&src).unwrap();
    fs::write(include.join("gl.h"), HEADER).unwrap();
    fs::write(
        src.join("vertex.c"),
        "void glBegin(GLenum mode) { }\nvoid glEnd(void) { }\n",
    )
    .unwrap();
    fs::write(src.join("api.c"), "void api(void) { glColor3f(1,0,0); glBegin(0); }\n").unwrap();
    fs::write(src.join("notes.txt"), "glFogf\n").unwrap();
    dir
}

#[derive(Debug, Deserialize)]
struct IndexSummary {
    output: PathBuf,
    symbols: usize,
    categories: usize,
    corpus_files: usize,
    files_scanned: usize,
    files_skipped: Vec<PathBuf>,
    unreferenced: usize,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Entry {
    category: String,
    files: Vec<String>,
}

#[test]
fn test_index_writes_default_output() {
    let root = fixture();

    let summary: IndexSummary = run_cli_json(&args(&["index", "--json"]), root.path());
    assert_eq!(summary.symbols, 5);
    assert_eq!(summary.categories, 3);
    assert_eq!(summary.corpus_files, 2);
    assert_eq!(summary.files_scanned, 2);
    assert!(summary.files_skipped.is_empty());
    assert_eq!(summary.unreferenced, 2);
    assert!(summary.output.ends_with("function_map.json"));

    let written = fs::read_to_string(root.path().join("function_map.json")).unwrap();
    // Keys must appear in header declaration order in the written text.
    let positions: Vec<usize> = ["glBegin", "glEnd", "glColor\"", "glColor3f", "glFogf"]
        .iter()
        .map(|key| {
            written
                .find(&format!("\"{}", key))
                .unwrap_or_else(|| panic!("{} missing from index", key))
        })
        .collect();
    assert!(
        positions.windows(2).all(|pair| pair[0] < pair[1]),
        "keys out of declaration order:\n{}",
        written
    );

    let index: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&written).unwrap();
    assert_eq!(index.len(), 5);

    let entry = |name: &str| -> Entry { serde_json::from_value(index[name].clone()).unwrap() };
    assert_eq!(
        entry("glBegin"),
        Entry {
            category: "Drawing".to_string(),
            files: vec!["api.c".to_string(), "vertex.c".to_string()],
        }
    );
    assert_eq!(entry("glColor").files, Vec::<String>::new());
    assert_eq!(entry("glColor3f").files, vec!["api.c".to_string()]);
    assert_eq!(entry("glFogf").category, "Fog");
    assert!(entry("glFogf").files.is_empty());
}

#[test]
fn test_index_is_idempotent() {
    let root = fixture();
    let index_args = args(&["index", "--json", "--output", "out/map.json"]);

    let _: IndexSummary = run_cli_json(&index_args, root.path());
    let first = fs::read(root.path().join("out/map.json")).unwrap();
    let _: IndexSummary = run_cli_json(&index_args, root.path());
    let second = fs::read(root.path().join("out/map.json")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_index_flags_override_config_file() {
    let root = fixture();
    fs::write(
        root.path().join("glxref.toml"),
        "corpus_pattern = \"nothing/*.c\"\ndefault_category = \"Core\"\n",
    )
    .unwrap();

    // Config file alone: empty corpus, no error.
    let summary: IndexSummary = run_cli_json(&args(&["index", "--json"]), root.path());
    assert_eq!(summary.corpus_files, 0);
    assert_eq!(summary.unreferenced, 5);

    // Flag wins over the file.
    let summary: IndexSummary = run_cli_json(
        &args(&["index", "--json", "--corpus", "tinygl/src/*.c"]),
        root.path(),
    );
    assert_eq!(summary.corpus_files, 2);
}

#[test]
fn test_missing_header_reports_json_error_and_writes_nothing() {
    let root = fixture();
    let error = run_cli_json_error(
        &args(&["index", "--json", "--header", "missing/gl.h"]),
        root.path(),
    );
    let message = error["error"]["message"].as_str().unwrap();
    assert!(message.contains("missing/gl.h"), "message: {}", message);
    assert!(!root.path().join("function_map.json").exists());
}

#[test]
fn test_missing_header_plain_error_on_stderr() {
    let root = fixture();
    let output = run_cli(&args(&["index", "--header", "missing/gl.h"]), root.path());
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: Input not found"), "stderr: {}", stderr);
    assert!(stderr.contains("TRY:"));
}

#[test]
fn test_invalid_prefix_is_rejected() {
    let root = fixture();
    let error = run_cli_json_error(&args(&["index", "--json", "--prefix", "g-l"]), root.path());
    let message = error["error"]["message"].as_str().unwrap();
    assert!(message.contains("g-l"));
}

#[derive(Debug, Deserialize)]
struct CoverageReport {
    symbols: usize,
    referenced: usize,
    categories: Vec<CategoryCoverage>,
}

#[derive(Debug, Deserialize)]
struct CategoryCoverage {
    category: String,
    symbols: usize,
    referenced: usize,
    unreferenced: Vec<String>,
}

#[test]
fn test_coverage_reports_unreferenced_symbols() {
    let root = fixture();
    let report: CoverageReport = run_cli_json(&args(&["coverage", "--json"]), root.path());
    assert_eq!(report.symbols, 5);
    assert_eq!(report.referenced, 3);
    let names: Vec<&str> = report.categories.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["Drawing", "Color", "Fog"]);
    assert_eq!(report.categories[1].unreferenced, vec!["glColor".to_string()]);
    assert_eq!(report.categories[2].unreferenced, vec!["glFogf".to_string()]);

    // Coverage never writes the index.
    assert!(!root.path().join("function_map.json").exists());
}

#[test]
fn test_coverage_from_existing_index_and_category_filter() {
    let root = fixture();
    let _: IndexSummary = run_cli_json(
        &args(&["index", "--json", "--output", "out/map.json"]),
        root.path(),
    );
    // Without the corpus, only the saved index can supply references.
    fs::remove_dir_all(root.path().join("tinygl/src")).unwrap();

    // Relative to --root, not the working directory.
    let report: CoverageReport = run_cli_json(
        &args(&[
            "coverage",
            "--json",
            "--from-index",
            "out/map.json",
            "--category",
            "Drawing",
        ]),
        root.path(),
    );
    assert_eq!(report.categories.len(), 1);
    assert_eq!(report.categories[0].symbols, 2);
    assert_eq!(report.categories[0].referenced, 2);

    let error = run_cli_json_error(
        &args(&["coverage", "--json", "--category", "Nope"]),
        root.path(),
    );
    assert!(error["error"]["message"].as_str().unwrap().contains("Nope"));
}

#[test]
fn test_config_json_shows_defaults() {
    let root = TempDir::new().unwrap();
    let config: serde_json::Value = run_cli_json(&args(&["config", "--json"]), root.path());
    assert_eq!(config["source"], serde_json::Value::Null);
    assert_eq!(config["header_path"], "tinygl/include/GL/gl.h");
    assert_eq!(config["corpus_pattern"], "tinygl/src/*.c");
    assert_eq!(config["symbol_prefix"], "gl");
    assert_eq!(config["default_category"], "Misc");
    assert_eq!(config["on_unreadable"], "abort");
}
