/// Smoke tests to verify the binary runs without panicking
use std::process::Command;

const LAUNCHES: &str = "tests/fixtures/launches.json";
const LAUNCHPADS: &str = "tests/fixtures/launchpads.json";

#[test]
fn binary_shows_help() {
    let output = Command::new("cargo")
        .args(["run", "--", "--help"])
        .output()
        .expect("Failed to execute cargo run");

    assert!(
        output.status.success(),
        "Binary failed to run --help: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("launchmap"),
        "Help output should mention launchmap"
    );
}

#[test]
fn binary_shows_version() {
    let output = Command::new("cargo")
        .args(["run", "--", "--version"])
        .output()
        .expect("Failed to execute cargo run");

    assert!(
        output.status.success(),
        "Binary failed to run --version: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn invalid_subcommand_fails_gracefully() {
    let output = Command::new("cargo")
        .args(["run", "--", "nonexistent-command"])
        .output()
        .expect("Failed to execute cargo run");

    // Should fail with error, not panic
    assert!(
        !output.status.success(),
        "Invalid subcommand should return error status"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("panicked at"),
        "Invalid subcommand should not cause panic"
    );
}

#[test]
fn map_writes_svg_with_markers() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let out = dir.path().join("map.svg");

    let output = Command::new("cargo")
        .args(["run", "--", "map", "--launches", LAUNCHES, "--launchpads", LAUNCHPADS, "--svg"])
        .arg(&out)
        .output()
        .expect("Failed to execute cargo run");

    assert!(
        output.status.success(),
        "map --svg failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let svg = std::fs::read_to_string(&out).expect("SVG file should exist");
    assert!(svg.starts_with("<svg"));
    // Six of the seven fixture pads have usable coordinates
    assert_eq!(svg.matches(r#"class="marker""#).count(), 6);
    assert!(svg.contains(r#"class="base-shape""#));
}

#[test]
fn map_prints_without_a_terminal() {
    let output = Command::new("cargo")
        .args(["run", "--", "map", "--print", "--cols", "80", "--rows", "24"])
        .args(["--launches", LAUNCHES, "--launchpads", LAUNCHPADS])
        .output()
        .expect("Failed to execute cargo run");

    assert!(
        output.status.success(),
        "map --print failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 24);
    assert!(stdout.chars().any(|c| ('\u{2801}'..='\u{28FF}').contains(&c)));
}

#[test]
fn launches_lists_names_from_file() {
    let output = Command::new("cargo")
        .args(["run", "--", "launches", "--from", LAUNCHES])
        .output()
        .expect("Failed to execute cargo run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2006-03-24  FalconSat (failure)"));
    assert!(stdout.contains("Crew-5"));
    assert_eq!(stdout.lines().count(), 8);
}

#[test]
fn missing_data_file_reports_error() {
    let output = Command::new("cargo")
        .args(["run", "--", "launches", "--from", "tests/fixtures/does-not-exist.json"])
        .output()
        .expect("Failed to execute cargo run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does-not-exist.json"));
    assert!(!stderr.contains("panicked at"));
}
