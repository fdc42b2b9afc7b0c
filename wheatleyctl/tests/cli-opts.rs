use assert_cmd::Command;

const BIN: &str = "wheatleyctl";

#[test]
fn test_empty_args() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.assert().failure();
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-h").assert().success();
}

#[test]
fn test_version_opt() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-V").assert().failure();
}

#[test]
fn test_version_keyword() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("version").assert().success();
}

#[test]
fn test_bad_keyword() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("bouh").assert().failure();
}

#[test]
fn test_completion() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.args(["completion", "bash"]).assert().success();
}

#[test]
fn test_flights_no_position() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("flights").assert().failure();
}

#[test]
fn test_flights_no_credentials() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.env_remove("flight_id")
        .env_remove("flight_secret")
        .args(["flights", "--lat", "50.8", "--lon", "4.4"])
        .assert()
        .failure();
}

#[test]
fn test_habit_add_list() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("wheatley.db");
    let db = db.to_str().unwrap();

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.args(["-d", db, "habit", "add", "alice", "read", "--reminder", "21:00"])
        .assert()
        .success();

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    let out = cmd.args(["-d", db, "habit", "list", "alice"]).output().unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("read"));
    assert!(stdout.contains("21:00"));
}

#[test]
fn test_habit_empty() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("habit").assert().failure();
}
