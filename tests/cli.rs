use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

const EXPORT: &str = "\
Query,Page,Clicks,Impressions,CTR,Position
rust,/learn,10,100,10%,2
rust,/book,5,50,10%,4
cargo,/cargo,20,200,10%,1
";

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("gscr").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("gscr"));
}

#[test]
fn text_report_to_stdout() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("export.csv");
    fs::write(&input, EXPORT).unwrap();

    let mut cmd = Command::cargo_bin("gscr").unwrap();
    cmd.arg("report").arg(&input);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Total Clicks"))
        .stdout(predicate::str::contains("35"))
        .stdout(predicate::str::contains("Top Queries by Clicks"))
        .stdout(predicate::str::contains("Top Pages by Position"));
}

#[test]
fn json_report_and_csv_export() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("export.csv");
    let out = dir.path().join("report.json");
    let export = dir.path().join("ranked.csv");
    fs::write(&input, EXPORT).unwrap();

    let mut cmd = Command::cargo_bin("gscr").unwrap();
    cmd.arg("report")
        .arg(&input)
        .args(["--format", "json", "--top", "1"])
        .arg("--out")
        .arg(&out)
        .arg("--export-csv")
        .arg(&export);
    cmd.assert().success();

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v["overall"]["total_impressions"], 350);
    let sections = v["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 8);
    assert_eq!(sections[0]["entries"][0]["label"], "cargo");
    assert_eq!(sections[0]["entries"].as_array().unwrap().len(), 1);

    let csv_txt = fs::read_to_string(&export).unwrap();
    assert!(csv_txt.starts_with("dimension,metric,rank,label,value"));
    assert_eq!(csv_txt.lines().count(), 1 + 8);
}

#[test]
fn missing_column_fails_with_message() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.csv");
    fs::write(&input, "query,clicks,ctr,position\na,1,1%,1\n").unwrap();

    let mut cmd = Command::cargo_bin("gscr").unwrap();
    cmd.arg("report").arg(&input);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("missing required column `impressions`"));
}

#[test]
fn sample_output_is_a_valid_export() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("sample.csv");
    let sample = Command::cargo_bin("gscr")
        .unwrap()
        .arg("sample")
        .output()
        .unwrap();
    assert!(sample.status.success());
    fs::write(&input, &sample.stdout).unwrap();

    let mut cmd = Command::cargo_bin("gscr").unwrap();
    cmd.arg("report").arg(&input).arg("--show-input");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("rust tutorial"))
        .stderr(predicate::str::contains("query,page,clicks"));
}
