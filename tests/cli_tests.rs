//! Command-line tests for the calib-match binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

const REPORT: &str = "\
SAMPLE IA-01
All Participants   60  10.0  1.0  7.0-13.0  0.2
Peer Group
Analyzer A         20  10.0  0.5  8.0-12.0  0.1
Analyzer B         15  11.0  0.5  9.0-13.0  0.1

SAMPLE IA-02
Peer Group
Analyzer A         20  20.0  0.5  18.0-22.0 0.1
Analyzer B         15  19.0  0.5  17.0-21.0 0.1
";

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file.flush().unwrap();
    file
}

fn calib_match() -> Command {
    Command::cargo_bin("calib-match").unwrap()
}

#[test]
fn test_identify_prints_three_criteria() {
    let report = write_temp(REPORT);
    let samples = write_temp("9.0\n25.0\n");

    calib_match()
        .arg("identify")
        .arg(report.path())
        .arg(samples.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Instrument with lowest Euclidean distance: none",
        ))
        .stdout(predicate::str::contains(
            "Instrument with most sample values within reference range: Analyzer A with 1 within range",
        ))
        .stdout(predicate::str::contains(
            "Instrument with most sample values within 30% of the mean: Analyzer A with 2 within 30%",
        ));
}

#[test]
fn test_identify_json() {
    let report = write_temp(REPORT);
    let samples = write_temp("11.0\n19.0\n");

    let output = calib_match()
        .args(["identify", "--format", "json", "--percent", "5"])
        .arg(report.path())
        .arg(samples.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["euclidean"]["error"].is_string());
    assert_eq!(json["within_bounds"]["best"]["instrument"], "Analyzer A");
    assert_eq!(json["within_percent"]["percent"], 5.0);
    assert_eq!(
        json["within_percent"]["result"]["best"]["instrument"],
        "Analyzer B"
    );
    assert_eq!(json["within_percent"]["result"]["best"]["score"], 2);
}

#[test]
fn test_identify_rejects_negative_percent() {
    let report = write_temp(REPORT);
    let samples = write_temp("9.0\n");

    calib_match()
        .args(["identify", "--percent=-5"])
        .arg(report.path())
        .arg(samples.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("percent"));
}

#[test]
fn test_identify_bad_sample_file() {
    let report = write_temp(REPORT);
    let samples = write_temp("9.0\nten\n");

    calib_match()
        .arg("identify")
        .arg(report.path())
        .arg(samples.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_identify_reports_parse_issues_on_stderr() {
    let report = write_temp(&format!("Analyzer Q 1 1.0 0.1 0.5-1.5 0.1\n{REPORT}"));
    let samples = write_temp("9.0\n25.0\n");

    calib_match()
        .arg("identify")
        .arg(report.path())
        .arg(samples.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("line 1"));
}

#[test]
fn test_inspect_tsv() {
    let report = write_temp(REPORT);

    calib_match()
        .args(["inspect", "--format", "tsv", "--instrument", "Analyzer B"])
        .arg(report.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Analyzer B\t1\tPeer Group\t15\t11\t0.5\t9\t13\t0.1",
        ))
        .stdout(predicate::str::contains("Analyzer A").not());
}

#[test]
fn test_inspect_unknown_instrument() {
    let report = write_temp(REPORT);

    calib_match()
        .args(["inspect", "--instrument", "Nope"])
        .arg(report.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_inspect_complete_is_empty_for_partial_report() {
    let report = write_temp(REPORT);

    calib_match()
        .args(["inspect", "--complete", "--format", "json"])
        .arg(report.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"complete_instruments\": []"));
}
