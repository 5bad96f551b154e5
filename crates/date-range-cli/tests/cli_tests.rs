//! Integration tests for the `daterange` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the parse and
//! expand subcommands through the actual binary, with `--now` pinned so the
//! output does not depend on the machine's clock.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn daterange() -> Command {
    Command::cargo_bin("daterange").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// parse
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn parse_prints_compact_text() {
    daterange()
        .args(["--now", "2009-09-01", "parse", "jan 1 2009 8am-5pm"])
        .assert()
        .success()
        .stdout("Jan  1 2009 8am-5pm\n");
}

#[test]
fn parse_accepts_trailing_year() {
    daterange()
        .args(["parse", "jan 1 8am-5pm 2009", "--now", "2009-09-01"])
        .assert()
        .success()
        .stdout("Jan  1 2009 8am-5pm\n");
}

#[test]
fn parse_omits_year_near_now() {
    daterange()
        .args(["--now", "2009-08-01T10:00", "parse", "aug 25 - sept 3"])
        .assert()
        .success()
        .stdout("Aug 25 - Sep  3\n");
}

#[test]
fn parse_json_reports_recurrence() {
    let output = daterange()
        .args(["--now", "2009-07-01", "--json", "parse", "thursdays"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["recurrence"], "weekly");
    assert_eq!(value["start"], "2009-07-02T00:00:00");
    assert_eq!(value["end"], "2009-07-03T00:00:00");
    assert_eq!(value["text"], "Jul  2");
}

#[test]
fn parse_rejects_gibberish() {
    daterange()
        .args(["--now", "2009-09-01", "parse", "dsafasdfas"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dsafasdfas"));
}

#[test]
fn parse_rejects_inverted_range() {
    daterange()
        .args(["--now", "2009-09-01", "parse", "dec 12 2009 - jan 1 2009"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Inverted"));
}

// ─────────────────────────────────────────────────────────────────────────────
// expand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn expand_lists_weekly_occurrences() {
    daterange()
        .args([
            "--now",
            "2009-07-01",
            "expand",
            "thursdays",
            "--within",
            "7/1/09 - 7/31/09",
        ])
        .assert()
        .success()
        .stdout("Jul  2, Jul  9, Jul 16, Jul 23, Jul 30\n");
}

#[test]
fn expand_json_is_an_array_of_one_off_ranges() {
    let output = daterange()
        .args([
            "--now",
            "2009-09-01T12:00:00",
            "--json",
            "expand",
            "evenings",
            "--within",
            "9/1/2009 - 9/3/2009",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["start"], "2009-09-01T17:00:00");
    assert_eq!(items[2]["end"], "2009-09-03T20:00:00");
    assert!(items.iter().all(|item| item["recurrence"] == "none"));
}

#[test]
fn expand_one_off_outside_window_prints_empty_line() {
    daterange()
        .args([
            "--now",
            "2009-09-01",
            "expand",
            "jan 1 2009",
            "--within",
            "9/1/2009 - 9/30/2009",
        ])
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn expand_requires_within() {
    daterange()
        .args(["expand", "thursdays"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--within"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Argument handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn no_subcommand_is_an_error() {
    daterange()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn invalid_now_is_rejected() {
    daterange()
        .args(["--now", "next tuesday", "parse", "jan 1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--now"));
}

#[test]
fn verbose_logs_go_to_stderr() {
    daterange()
        .env_remove("RUST_LOG")
        .args(["-v", "--now", "2009-09-01", "parse", "jan 1 2009"])
        .assert()
        .success()
        .stdout("Jan  1 2009\n")
        .stderr(predicate::str::contains("normalized range text"));
}
