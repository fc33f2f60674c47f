//! Integration tests for the `regie` CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TAVERN: &str = r#"{
    "name": "Tavern",
    "world": {
        "variables": [{"id": 0, "label": "gold", "kind": "integer", "value": 3}]
    },
    "stage": {"speech_duration": 1.0},
    "lists": [
        {"name": "intro", "autosave_after": true, "actions": [
            {"action": "speech", "speaker": "Innkeeper", "text": "Welcome!"},
            {"action": "wait", "seconds": 0.5},
            {"action": "start_conversation", "conversation": 0}
        ]},
        {"name": "buy ale", "kind": "dialogue_option", "actions": [
            {"action": "set_variable", "variable": 0, "value": -1, "cumulative": true}
        ]},
        {"name": "leave", "kind": "dialogue_option", "actions": [
            {"action": "speech", "speaker": "Innkeeper", "text": "Farewell.", "background": true}
        ]}
    ],
    "conversations": [
        {"name": "bar", "options": [
            {"label": "Ale, please", "list": 1, "return_to_conversation": true},
            {"label": "Goodbye", "list": 2}
        ]}
    ],
    "input": [
        {"at": 0.0, "command": "interact", "list": 0},
        {"at": 3.0, "command": "choose", "slot": 0},
        {"at": 4.0, "command": "choose", "slot": 1}
    ]
}"#;

const BROKEN: &str = r#"{
    "name": "Broken",
    "lists": [
        {"name": "caller", "actions": [
            {"action": "send_message", "target": {"list": 5}, "message": "interact"},
            {"action": "wait", "seconds": 1.0, "end": {"skip": 7}}
        ]},
        {"name": "empty", "actions": []}
    ],
    "input": [{"at": 0.0, "command": "interact", "list": 9}]
}"#;

/// Write a scenario into a fresh temp directory.
fn scenario(json: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scenario.json");
    fs::write(&path, json).unwrap();
    (dir, path)
}

fn regie() -> Command {
    Command::cargo_bin("regie").unwrap()
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

#[test]
fn run_plays_the_scenario() {
    let (_dir, path) = scenario(TAVERN);
    regie()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("'Tavern'")
                .and(predicate::str::contains("list#0 'intro' started"))
                .and(predicate::str::contains("conversation#0 'bar' offers 2 options"))
                .and(predicate::str::contains("host: choose slot 0"))
                .and(predicate::str::contains("chose 'Ale, please'"))
                .and(predicate::str::contains("chose 'Goodbye'"))
                .and(predicate::str::contains("final state normal"))
                .and(predicate::str::contains("gold")),
        );
}

#[test]
fn run_hides_action_steps_unless_verbose() {
    let (_dir, path) = scenario(TAVERN);
    regie()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("action 0 (speech)").not());

    regie()
        .args(["run", path.to_str().unwrap(), "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list#0 action 0 (speech)"));
}

#[test]
fn run_caps_the_event_log() {
    let (_dir, path) = scenario(TAVERN);
    regie()
        .args(["run", path.to_str().unwrap(), "--max-events", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 events logged"));
}

#[test]
fn run_with_short_duration_reports_unplayed_input() {
    let (_dir, path) = scenario(TAVERN);
    regie()
        .args(["run", path.to_str().unwrap(), "--seconds", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 inputs scheduled after the end of the run"));
}

#[test]
fn run_fails_on_bad_input() {
    let (_dir, path) = scenario(BROKEN);
    regie()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("action list not found: list#9"));
}

#[test]
fn run_rejects_non_positive_dt() {
    let (_dir, path) = scenario(TAVERN);
    regie()
        .args(["run", path.to_str().unwrap(), "--dt", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--dt must be positive"));
}

#[test]
fn run_fails_on_missing_file() {
    regie()
        .args(["run", "/nonexistent/scenario.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn run_fails_on_invalid_json() {
    let (_dir, path) = scenario("{ not json");
    regie()
        .args(["run", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid scenario"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_valid_scenario() {
    let (_dir, path) = scenario(TAVERN);
    regie()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("All checks passed for 'Tavern'")
                .and(predicate::str::contains("3 lists, 1 conversation, 0 warnings")),
        );
}

#[test]
fn check_reports_broken_references() {
    let (_dir, path) = scenario(BROKEN);
    regie()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("sends to unknown list#5")
                .and(predicate::str::contains("skips to 7"))
                .and(predicate::str::contains("has no actions"))
                .and(predicate::str::contains("refers to unknown list#9"))
                .and(predicate::str::contains("2 errors, 2 warnings"))
                .and(predicate::str::contains("check failed")),
        );
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_lists_scripts_and_options() {
    let (_dir, path) = scenario(TAVERN);
    regie()
        .args(["show", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("'intro'")
                .and(predicate::str::contains("autosaves"))
                .and(predicate::str::contains("Welcome!"))
                .and(predicate::str::contains("var#0 += -1"))
                .and(predicate::str::contains("'bar'"))
                .and(predicate::str::contains("Ale, please")),
        );
}

#[test]
fn show_empty_scenario() {
    let (_dir, path) = scenario(r#"{"name": "Nothing"}"#);
    regie()
        .args(["show", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("(no lists)"));
}
