use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn callbreak() -> Command {
    Command::cargo_bin("callbreak").expect("binary built")
}

#[test]
fn plays_two_rounds_from_flags_and_prints_json() {
    let script = "\
guesses 5 4
lock
obtained 6 10
submit
guesses 3 6
lock
obtained 2 6
submit
standings
quit
";
    let output = callbreak()
        .args(["--player", "A", "--player", "B", "--json"])
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Leader: A is leading with 5.5 pts"))
        .stdout(predicate::str::contains("Leader: A is leading with 2.5 pts"))
        .stdout(predicate::str::contains("*1. A 2.5 pts"))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).expect("utf8 stdout");
    let json_start = stdout.find("{\n").expect("json block printed");
    let snapshot: serde_json::Value =
        serde_json::from_str(&stdout[json_start..]).expect("snapshot is json");
    assert_eq!(snapshot["rounds_played"], 2);
    assert_eq!(snapshot["totals"][1], 2.0);
}

#[test]
fn roster_from_config_file_starts_the_game() {
    let dir = tempdir().expect("temp dir");
    let config = dir.path().join("callbreak.yaml");
    fs::write(
        &config,
        "players: [\"Asha\", \"Bikash\"]\nnotice_seconds: 4\n",
    )
    .expect("config written");

    callbreak()
        .arg("--config")
        .arg(&config)
        .write_stdin("status\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Game started with Asha, Bikash"))
        .stdout(predicate::str::contains("Round 1 (Guessing)"));
}

#[test]
fn validate_only_rejects_zero_notice() {
    callbreak()
        .args(["--notice-seconds", "0", "--validate-only"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("notice_seconds"));
}

#[test]
fn structured_logging_writes_json_lines() {
    let dir = tempdir().expect("temp dir");
    let log = dir.path().join("logs").join("session.jsonl");
    let config = dir.path().join("callbreak.yaml");
    fs::write(
        &config,
        format!(
            "players: [\"A\"]\nlogging:\n  enable_structured: true\n  tracing_level: info\n  file: \"{}\"\n",
            log.display()
        ),
    )
    .expect("config written");

    callbreak()
        .arg("--config")
        .arg(&config)
        .env_remove("RUST_LOG")
        .write_stdin("guesses 2\nlock\nobtained 3\nsubmit\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Leader: A is leading with 2.5 pts"));

    let logged = fs::read_to_string(&log).expect("log file written");
    assert!(logged.contains("round submitted"));
    assert!(logged.contains("round result appended"));
}
