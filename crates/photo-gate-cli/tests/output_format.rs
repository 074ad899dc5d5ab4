//! Output format validation tests.
//!
//! Tests JSON/JSONL output format correctness and required field presence.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::path::Path;

use assert_cmd::Command;
use photo_gate_test_support::SyntheticImageBuilder;
use serde_json::Value;

/// Binary isolated from the user's and any project config.
fn photo_gate(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("photo-gate").unwrap();
    cmd.current_dir(workdir)
        .env("XDG_CONFIG_HOME", workdir.join("xdg"))
        .env("HOME", workdir);
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    String::from_utf8(output.stdout).unwrap()
}

fn jsonl(stdout: &str) -> Vec<Value> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

// === JSONL Format Tests ===

#[test]
fn test_jsonl_one_object_per_image() {
    let temp_dir = tempfile::tempdir().unwrap();
    SyntheticImageBuilder::checkerboard(64, 64).save_png(temp_dir.path());
    SyntheticImageBuilder::mid_gray(32, 32).save_png(temp_dir.path());
    SyntheticImageBuilder::overexposed(16, 16).save_png(temp_dir.path());

    let stdout = stdout_of(
        photo_gate(temp_dir.path())
            .arg("--format")
            .arg("jsonl")
            .arg(temp_dir.path()),
    );
    let records = jsonl(&stdout);

    assert_eq!(records.len(), 3);
    assert!(records.iter().all(Value::is_object));
}

#[test]
fn test_jsonl_is_default_format() {
    let temp_dir = tempfile::tempdir().unwrap();
    let image = SyntheticImageBuilder::checkerboard(64, 64).save_png(temp_dir.path());

    let stdout = stdout_of(photo_gate(temp_dir.path()).arg(&image));

    assert_eq!(stdout.lines().count(), 1);
    assert!(serde_json::from_str::<Value>(stdout.trim()).unwrap().is_object());
}

#[test]
fn test_records_follow_sorted_path_order() {
    let temp_dir = tempfile::tempdir().unwrap();
    SyntheticImageBuilder::underexposed(8, 8).save_png(temp_dir.path());
    SyntheticImageBuilder::checkerboard(64, 64).save_png(temp_dir.path());

    let stdout = stdout_of(photo_gate(temp_dir.path()).arg(temp_dir.path()));
    let paths: Vec<String> = jsonl(&stdout)
        .iter()
        .map(|r| r["path"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(paths.len(), 2);
    assert!(paths[0].ends_with("checkerboard.png"));
    assert!(paths[1].ends_with("underexposed.png"));
}

// === JSON Array Format Tests ===

#[test]
fn test_json_format_is_array() {
    let temp_dir = tempfile::tempdir().unwrap();
    SyntheticImageBuilder::checkerboard(64, 64).save_png(temp_dir.path());
    SyntheticImageBuilder::mid_gray(32, 32).save_png(temp_dir.path());

    let stdout = stdout_of(
        photo_gate(temp_dir.path())
            .arg("--format")
            .arg("json")
            .arg(temp_dir.path()),
    );
    let value: Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(value.as_array().map(Vec::len), Some(2));
}

#[test]
fn test_json_empty_input_is_empty_array() {
    let temp_dir = tempfile::tempdir().unwrap();

    let stdout = stdout_of(
        photo_gate(temp_dir.path())
            .arg("--format")
            .arg("json")
            .arg(temp_dir.path()),
    );

    assert_eq!(stdout.trim(), "[]");
}

#[test]
fn test_pretty_json_is_indented() {
    let temp_dir = tempfile::tempdir().unwrap();
    let image = SyntheticImageBuilder::checkerboard(64, 64).save_png(temp_dir.path());

    let compact = stdout_of(
        photo_gate(temp_dir.path())
            .arg("--format")
            .arg("json")
            .arg(&image),
    );
    let pretty = stdout_of(
        photo_gate(temp_dir.path())
            .arg("--format")
            .arg("json")
            .arg("--pretty")
            .arg(&image),
    );

    assert_eq!(compact.lines().count(), 1);
    assert!(pretty.lines().count() > 1);
    assert!(serde_json::from_str::<Value>(&pretty).unwrap().is_array());
}

// === Required Fields ===

#[test]
fn test_record_fields() {
    let temp_dir = tempfile::tempdir().unwrap();
    let image = SyntheticImageBuilder::checkerboard(64, 48).save_png(temp_dir.path());

    let stdout = stdout_of(photo_gate(temp_dir.path()).arg(&image));
    let record = &jsonl(&stdout)[0];

    assert!(record["path"].as_str().unwrap().ends_with("checkerboard.png"));
    assert!(record["timestamp"].as_str().unwrap().ends_with('Z'));
    assert_eq!(record["dimensions"]["width"], 64);
    assert_eq!(record["dimensions"]["height"], 48);
    for field in [
        "qualityScore",
        "brightnessLevel",
        "contrastScore",
        "sharpnessRating",
    ] {
        let value = record[field].as_u64().unwrap();
        assert!(value <= 100, "{field} = {value}");
    }
    assert_eq!(record["status"], "pass");
    assert!(record["feedback"].is_string());
    assert!(record["recommendations"].is_array());
    assert!(record.get("error").is_none());
    assert!(record.get("exif").is_none());
}

#[test]
fn test_failing_record_lists_recommendations() {
    let temp_dir = tempfile::tempdir().unwrap();
    let image = SyntheticImageBuilder::underexposed(32, 32).save_png(temp_dir.path());

    let stdout = stdout_of(photo_gate(temp_dir.path()).arg(&image));
    let record = &jsonl(&stdout)[0];

    assert_eq!(record["qualityScore"], 0);
    assert_eq!(record["status"], "fail");
    assert_eq!(record["feedback"], "Poor, retake recommended");
    assert_eq!(
        record["recommendations"],
        serde_json::json!([
            "increase lighting",
            "improve contrast",
            "hold steady / improve focus"
        ])
    );
}

#[test]
fn test_exif_flag_without_metadata_omits_field() {
    let temp_dir = tempfile::tempdir().unwrap();
    let image = SyntheticImageBuilder::checkerboard(64, 64).save_png(temp_dir.path());

    let stdout = stdout_of(photo_gate(temp_dir.path()).arg("--exif").arg(&image));
    let record = &jsonl(&stdout)[0];

    assert!(record.get("exif").is_none());
    assert_eq!(record["qualityScore"], 85);
}
