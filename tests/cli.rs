//! End-to-end checks of the weather-insights binary.

use std::path::Path;
use std::process::{Command, Output};

fn run_cli(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_weather-insights"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("WEATHER_INSIGHTS_INPUT")
        .output()
        .expect("failed to launch weather-insights")
}

#[test]
fn test_missing_input_prints_one_error_line() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli(dir.path(), &["-q", "--input", "nope.csv"]);

    // Failures are reported, not signalled through the exit status.
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr).unwrap();
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines.len(), 1, "stderr was: {}", stderr);
    assert!(lines[0].starts_with("Error: "));
    assert!(lines[0].contains("nope.csv"));
}

#[test]
fn test_failure_is_not_logged_twice_at_info_level() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli(dir.path(), &["--input", "nope.csv"]);

    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stderr.lines().filter(|l| l.starts_with("Error: ")).count(), 1);
    assert!(!stderr.contains("ERROR"), "stderr was: {}", stderr);
}

#[test]
fn test_prints_json_insights() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("data.csv"),
        "city,date,temperature_fahrenheit\n\
         Austin,2024-01-01,70\n\
         Austin,2024-01-02,100\n\
         Dallas,2024-01-01,90\n",
    )
    .unwrap();

    let output = run_cli(dir.path(), &["-q"]);
    assert!(output.status.success());
    assert!(output.stderr.is_empty());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["average_temperature"], 86.7);
    assert_eq!(json["highest_temperature_by_date"]["2024-01-01"], "Dallas");
    assert_eq!(json["cities_with_high_fluctuation"], serde_json::json!([]));
}

#[test]
fn test_invalid_arguments_exit_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli(dir.path(), &["--verbose", "--quiet"]);
    assert!(!output.status.success());
}
