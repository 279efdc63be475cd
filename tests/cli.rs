//! Integration tests for the cyd binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;


// Three days from the daily UCI file: a Saturday, a Sunday and a Monday.
// Totals: casual 582, registered 2,553, overall 3,135.
const SAMPLE: &str = "\
instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt
1,2011-01-01,1,0,1,0,6,0,2,0.344167,0.363625,0.805833,0.160446,331,654,985
2,2011-01-02,1,0,1,0,0,0,2,0.363478,0.353739,0.696087,0.248539,131,670,801
3,2011-01-03,1,0,1,0,1,1,1,0.196364,0.189405,0.437273,0.248309,120,1229,1349
";


fn write_sample(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("day.csv");
    fs::write(&path, SAMPLE).unwrap();
    path
}


fn cyd() -> Command {
    Command::cargo_bin("cyd").unwrap()
}


#[test]
fn test_no_args_prints_help() {
    cyd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}


#[test]
fn test_summary_reports_totals() {
    let dir = TempDir::new().unwrap();
    let data = write_sample(&dir);

    cyd()
        .arg("summary")
        .arg("--data")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Bike Rental Summary"))
        .stdout(predicate::str::contains("3,135"))
        .stdout(predicate::str::contains("BY SEASON"));
}


#[test]
fn test_summary_json_shape() {
    let dir = TempDir::new().unwrap();
    let data = write_sample(&dir);

    let output = cyd()
        .arg("summary")
        .arg("--json")
        .arg("--data")
        .arg(&data)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["range"]["start"], "2011-01-01");
    assert_eq!(report["range"]["end"], "2011-01-03");
    assert_eq!(report["totals"]["casual"], 582);
    assert_eq!(report["totals"]["registered"], 2553);
    assert_eq!(report["totals"]["total"], 3135);

    for key in ["daily", "by_weekday", "by_season", "by_month", "by_year"] {
        assert!(report[key].is_array(), "missing array {key}");
    }
    assert_eq!(report["daily"].as_array().unwrap().len(), 3);
    assert_eq!(report["by_season"][0]["label"], "Spring");
    assert_eq!(report["by_year"][0]["label"], "2011");
}


#[test]
fn test_summary_single_day_range_is_inclusive() {
    let dir = TempDir::new().unwrap();
    let data = write_sample(&dir);

    let output = cyd()
        .arg("summary")
        .arg("--json")
        .arg("--start")
        .arg("2011-01-02")
        .arg("--end")
        .arg("2011-01-02")
        .arg("--data")
        .arg(&data)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["totals"]["total"], 801);
    assert_eq!(report["by_weekday"][0]["label"], "Sunday");
}


#[test]
fn test_summary_inverted_range_is_empty_not_error() {
    let dir = TempDir::new().unwrap();
    let data = write_sample(&dir);

    cyd()
        .arg("summary")
        .arg("--start")
        .arg("2011-01-03")
        .arg("--end")
        .arg("2011-01-01")
        .arg("--data")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("(no rentals in range)"));
}


#[test]
fn test_data_path_from_environment() {
    let dir = TempDir::new().unwrap();
    let data = write_sample(&dir);

    cyd()
        .env("CYCLEDASH_DATA", &data)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("3,135"));
}


#[test]
fn test_missing_dataset_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.csv");

    cyd()
        .arg("summary")
        .arg("--data")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}


#[test]
fn test_malformed_dataset_fails_with_cause() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(
        &path,
        "dteday,season,yr,mnth,weekday,casual,registered,cnt\n\
         2011-01-01,1,0,1,6,331,654,985\n\
         2011-01-02,9,0,1,0,131,670,801\n",
    )
    .unwrap();

    cyd()
        .arg("summary")
        .arg("--data")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown season code 9"));
}


#[test]
fn test_export_season_svg() {
    let dir = TempDir::new().unwrap();
    let data = write_sample(&dir);
    let out = dir.path().join("season.svg");

    cyd()
        .arg("export")
        .arg("--by")
        .arg("season")
        .arg("--svg")
        .arg("--output")
        .arg(&out)
        .arg("--data")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported to"));

    let svg = fs::read_to_string(&out).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Rentals by Season"));
    assert!(svg.contains("Spring"));
}


#[test]
fn test_export_defaults_to_daily_png() {
    let dir = TempDir::new().unwrap();
    let data = write_sample(&dir);
    let out = dir.path().join("daily.png");

    cyd()
        .arg("export")
        .arg("--output")
        .arg(&out)
        .arg("--data")
        .arg(&data)
        .assert()
        .success();

    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}


#[test]
fn test_export_empty_range_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let data = write_sample(&dir);
    let out = dir.path().join("empty.svg");

    cyd()
        .arg("export")
        .arg("--by")
        .arg("daily")
        .arg("--svg")
        .arg("--start")
        .arg("2012-05-01")
        .arg("--end")
        .arg("2012-05-02")
        .arg("--output")
        .arg(&out)
        .arg("--data")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to export"));

    assert!(!out.exists());
}


#[test]
fn test_export_unknown_chart_fails() {
    let dir = TempDir::new().unwrap();
    let data = write_sample(&dir);

    cyd()
        .arg("export")
        .arg("--by")
        .arg("hourly")
        .arg("--data")
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown chart"));
}
