mod common;

use common::{arg, run_folio};
use folio::error::ExitCode;

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn init_writes_seed_and_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data/content.json");

    let output = run_folio(&["init", "--content", arg(&path)]);
    assert!(output.status.success(), "{}", stderr(&output));
    let written: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert!(written["projects"].is_array());

    std::fs::write(&path, b"{}").unwrap();
    let output = run_folio(&["init", "--content", arg(&path)]);
    assert_eq!(output.status.code(), Some(ExitCode::USAGE_ERROR));
    assert!(stderr(&output).contains("--force"));
    assert_eq!(std::fs::read(&path).unwrap(), b"{}");

    let output = run_folio(&["init", "--content", arg(&path), "--force"]);
    assert!(output.status.success());
    assert_ne!(std::fs::read(&path).unwrap(), b"{}");
}

#[test]
fn validate_reports_sections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("content.json");
    assert!(run_folio(&["init", "--content", arg(&path)]).status.success());

    let output = run_folio(&["validate", "--content", arg(&path)]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("projects"));
    assert!(text.contains("no problems found"));
}

#[test]
fn validate_json_output_flags_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("content.json");
    std::fs::write(
        &path,
        br#"{"projects":[
            {"id":1,"title":"A","des":""},
            {"id":1,"title":"B","des":""}
        ]}"#,
    )
    .unwrap();

    let output = run_folio(&["validate", "--content", arg(&path), "--format", "json"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["warnings"][0], "projects: duplicate id 1");
    assert_eq!(report["sections"].as_array().unwrap().len(), 10);
}

#[test]
fn validate_malformed_document_fails_with_store_code() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("content.json");
    std::fs::write(&path, b"[1, 2").unwrap();

    let output = run_folio(&["validate", "--content", arg(&path)]);
    assert_eq!(output.status.code(), Some(ExitCode::STORE_ERROR));
    assert!(stderr(&output).contains("malformed content document"));
}

#[test]
fn show_prints_one_section() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("content.json");
    assert!(run_folio(&["init", "--content", arg(&path)]).status.success());

    let output = run_folio(&["show", "techstack", "--content", arg(&path)]);
    assert!(output.status.success(), "{}", stderr(&output));
    let section: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(section["categories"].is_array());
}

#[test]
fn show_unknown_section_suggests() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("content.json");
    let output = run_folio(&["show", "projcts", "--content", arg(&path)]);
    assert_eq!(output.status.code(), Some(ExitCode::USAGE_ERROR));
    assert!(stderr(&output).contains("did you mean 'projects'"));
}

#[test]
fn version_json() {
    let output = run_folio(&["version", "--format", "json"]);
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["name"], "folio");
    assert_eq!(parsed["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn serve_rejects_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("folio.yaml");
    std::fs::write(&config, "session:\n  ttl: \"soon\"\n").unwrap();

    let output = run_folio(&["serve", "--config", arg(&config)]);
    assert_eq!(output.status.code(), Some(ExitCode::CONFIG_ERROR));
    assert!(stderr(&output).contains("session.ttl"));
}

#[test]
fn serve_rejects_unknown_config_key() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("folio.yaml");
    std::fs::write(&config, "server:\n  port: 80\n").unwrap();

    let output = run_folio(&["serve", "--config", arg(&config)]);
    assert_eq!(output.status.code(), Some(ExitCode::CONFIG_ERROR));
}
