use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{classic_workbook, rowwise_workbook, sch, temp_out, write_config, write_fixture};

#[test]
fn test_print_writes_calendar_to_stdout() {
    let cfg = write_config("cli_print", "");
    let xlsx = write_fixture("cli_print", &classic_workbook());

    sch()
        .args(["--config", &cfg, "--xlsx", &xlsx, "print"])
        .assert()
        .success()
        .stdout(contains("BEGIN:VCALENDAR"))
        .stdout(contains("PRODID:-//schedics//"))
        .stdout(contains("SUMMARY:Математика"))
        .stdout(contains("TZID=Europe/Moscow"))
        .stdout(contains("END:VCALENDAR"));
}

#[test]
fn test_build_writes_file() {
    let cfg = write_config("cli_build", "");
    let xlsx = write_fixture("cli_build", &classic_workbook());
    let out = temp_out("cli_build_out", "ics");

    sch()
        .args(["--config", &cfg, "--xlsx", &xlsx, "build", "--output", &out])
        .assert()
        .success()
        .stderr(contains("3 events"));

    let ics = fs::read_to_string(&out).unwrap();
    assert!(ics.contains("BEGIN:VEVENT"));
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 3);
}

#[test]
fn test_build_refuses_overwrite_without_force() {
    let cfg = write_config("cli_build_force", "");
    let xlsx = write_fixture("cli_build_force", &classic_workbook());
    let out = temp_out("cli_build_force_out", "ics");
    fs::write(&out, "old").unwrap();

    sch()
        .args(["--config", &cfg, "--xlsx", &xlsx, "build", "--output", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("not overwritten"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "old");

    sch()
        .args([
            "--config", &cfg, "--xlsx", &xlsx, "build", "--output", &out, "--force",
        ])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("BEGIN:VCALENDAR"));
}

#[test]
fn test_events_json_list() {
    let cfg = write_config("cli_events", "");
    let xlsx = write_fixture("cli_events", &rowwise_workbook());

    let output = sch()
        .args(["--config", &cfg, "--xlsx", &xlsx, "events"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let events: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let list = events.as_array().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[1]["summary"], "Физика");
    assert_eq!(list[1]["end"], "2025-09-01T15:30:00+03:00");
    assert_eq!(list[2]["special"], true);
    assert_eq!(list[2]["color"], "#d32f2f");
}

#[test]
fn test_events_table() {
    let cfg = write_config("cli_events_table", "");
    let xlsx = write_fixture("cli_events_table", &classic_workbook());

    sch()
        .args(["--config", &cfg, "--xlsx", &xlsx, "events", "--table"])
        .assert()
        .success()
        .stdout(contains("2025-09-03"))
        .stdout(contains("C5"))
        .stdout(contains("3 events"));
}

#[test]
fn test_inspect_cell() {
    let cfg = write_config("cli_inspect", "");
    let xlsx = write_fixture("cli_inspect", &classic_workbook());

    sch()
        .args(["--config", &cfg, "--xlsx", &xlsx, "inspect", "C5"])
        .assert()
        .success()
        .stdout(contains("classic"))
        .stdout(contains("09:00-10:30"))
        .stdout(contains("2025-09-03"))
        .stdout(contains("среда"));

    sch()
        .args(["--config", &cfg, "--xlsx", &xlsx, "inspect", "B6"])
        .assert()
        .success()
        .stdout(contains("B5:B6"));
}

#[test]
fn test_inspect_rejects_bad_reference() {
    let cfg = write_config("cli_inspect_bad", "");
    let xlsx = write_fixture("cli_inspect_bad", &classic_workbook());

    sch()
        .args(["--config", &cfg, "--xlsx", &xlsx, "inspect", "5B"])
        .assert()
        .failure()
        .stderr(contains("Invalid cell reference"));
}

#[test]
fn test_config_check_and_print() {
    let cfg = write_config("cli_config", "timezone: \"Asia/Yekaterinburg\"\n");

    sch()
        .args(["--config", &cfg, "config", "--check"])
        .assert()
        .success()
        .stderr(contains("is valid").and(contains("Asia/Yekaterinburg")));

    sch()
        .args(["--config", &cfg, "config", "--print"])
        .assert()
        .success()
        .stdout(contains("max_header_rows: 8"))
        .stdout(contains("default_duration_minutes: 90"));
}

#[test]
fn test_invalid_config_fails() {
    let cfg = write_config("cli_bad_tz", "timezone: \"Mars/Olympus\"\n");
    sch()
        .args(["--config", &cfg, "config", "--check"])
        .assert()
        .failure()
        .stderr(contains("Error:").and(contains("Mars/Olympus")));

    let missing = temp_out("cli_missing_config", "yml");
    sch()
        .args(["--config", &missing, "print"])
        .assert()
        .failure()
        .stderr(contains("Failed to load configuration"));
}

#[test]
fn test_missing_workbook_fails() {
    let cfg = write_config("cli_missing_xlsx", "");
    let xlsx = temp_out("cli_missing_xlsx", "xlsx");
    sch()
        .args(["--config", &cfg, "--xlsx", &xlsx, "print"])
        .assert()
        .failure()
        .stderr(contains("Retrieval error"));
}
