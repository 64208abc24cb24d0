use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::tempdir;
use vfx_director::VocabularyCatalog;

fn run_vfxd(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vfxd"))
        .args(args)
        .env_remove("VFXD_CATALOG")
        .output()
        .expect("vfxd command should run")
}

fn run_vfxd_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_vfxd"))
        .args(args)
        .env_remove("VFXD_CATALOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("vfxd should spawn");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin.as_bytes())
        .expect("stdin should accept prompt");
    child.wait_with_output().expect("vfxd should finish")
}

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).expect("file should write");
}

#[test]
fn plan_json_is_stable_across_runs() {
    let first = run_vfxd(&["plan", "--sample", "2", "--format", "json"]);
    assert!(first.status.success(), "plan --format json should succeed");
    let second = run_vfxd(&["plan", "--sample", "2", "--format", "json"]);
    assert_eq!(first.stdout, second.stdout, "json output should be stable");

    let parsed: Value = serde_json::from_slice(&first.stdout).expect("json should parse");
    assert_eq!(parsed["ok"], Value::Bool(true));
    assert_eq!(parsed["fingerprint"].as_str().map(str::len), Some(64));
    let stages = parsed["plan"]["stages"].as_array().expect("stages array");
    assert_eq!(stages.len(), 5);
    assert!(parsed["plan"]["metadata"]["fxPalette"]
        .as_str()
        .expect("fxPalette string")
        .starts_with("Sandstorm"));
}

#[test]
fn plan_reads_prompt_from_stdin() {
    let output = run_vfxd_with_stdin(&["plan", "--format", "json"], "temple at dawn\n");
    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("json should parse");
    assert!(parsed["plan"]["metadata"]["location"]
        .as_str()
        .expect("location")
        .starts_with("Ancient temple"));
}

#[test]
fn empty_stdin_still_produces_a_plan() {
    let output = run_vfxd_with_stdin(&["plan"], "");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("RENDER SPECS"));
    assert!(stdout.contains("FINAL EXPORTS"));
}

#[test]
fn invalid_sample_index_reports_coded_json_error() {
    let output = run_vfxd(&["plan", "--sample", "9", "--format", "json"]);
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    let envelope: Value = serde_json::from_str(stderr.trim()).expect("stderr should be json");
    assert_eq!(envelope["ok"], Value::Bool(false));
    assert_eq!(envelope["error"]["code"], "INVALID_SAMPLE_INDEX");
    assert_eq!(envelope["error"]["details"]["provided"], 9);
}

#[test]
fn explain_json_names_the_cue_per_field() {
    let output = run_vfxd(&["explain", "handheld chase at midnight", "--json"]);
    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("json should parse");
    let fields = parsed["fields"].as_array().expect("fields array");
    let camera = fields
        .iter()
        .find(|row| row["field"] == "cameraStyle")
        .expect("cameraStyle row");
    assert_eq!(camera["cue"], "handheld");
    let location = fields
        .iter()
        .find(|row| row["field"] == "location")
        .expect("location row");
    assert!(location.get("cue").is_none(), "fallback rows carry no cue");
    assert_eq!(parsed["complexity"], "elevated");
}

#[test]
fn dumped_catalog_passes_check_and_custom_catalog_is_used() {
    let dir = tempdir().expect("tempdir should create");
    let dump = run_vfxd(&["catalog", "dump"]);
    assert!(dump.status.success());

    let yaml = String::from_utf8(dump.stdout).expect("dump should be utf-8");
    let builtin_path = dir.path().join("builtin.yaml");
    write_file(&builtin_path, &yaml);
    let check = run_vfxd(&["catalog", "check", builtin_path.to_str().expect("utf-8 path")]);
    assert!(
        check.status.success(),
        "builtin dump should validate: {}",
        String::from_utf8_lossy(&check.stderr)
    );

    let mut custom = VocabularyCatalog::builtin();
    custom.location.fallback.label = "Soundstage Seven".to_owned();
    let custom_path = dir.path().join("custom.yaml");
    write_file(&custom_path, &custom.to_yaml().expect("catalog should serialize"));

    let output = Command::new(env!("CARGO_BIN_EXE_vfxd"))
        .args(["plan", "nowhere special", "--format", "json"])
        .env("VFXD_CATALOG", &custom_path)
        .output()
        .expect("vfxd should run");
    assert!(output.status.success());
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("json should parse");
    assert_eq!(parsed["plan"]["metadata"]["location"], "Soundstage Seven");
}

#[test]
fn broken_catalog_is_rejected_with_exit_code_two() {
    let dir = tempdir().expect("tempdir should create");
    let path = dir.path().join("broken.yaml");
    write_file(&path, "version: 1\nlocation:\n  rules: []\n");

    let output = run_vfxd(&["catalog", "check", path.to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("INVALID_CATALOG"), "{stderr}");
}

#[test]
fn samples_lists_three_prompts() {
    let output = run_vfxd(&["samples"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[0] Monsoon-drenched Mumbai alley at midnight…"));
    assert!(stdout.contains("[2] Desert battlefield at dusk…"));
}

#[test]
fn yaml_output_uses_camel_case_fields() {
    let output = run_vfxd(&["plan", "--sample", "0", "--format", "yaml"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("timeOfDay:"));
    assert!(stdout.contains("fileNaming:"));
}
