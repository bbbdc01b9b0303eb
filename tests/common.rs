#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const EMAIL: &str = "officer@sorsu.edu.ph";
pub const PASSWORD: &str = "Secret123";

pub fn rti() -> Command {
    cargo_bin_cmd!("rattendance")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rattendance.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Run a command against `db_path` and expect success.
pub fn ok(db_path: &str, args: &[&str]) {
    rti().arg("--db").arg(db_path).args(args).assert().success();
}

/// Initialize the DB and sign up an officer.
pub fn init_signed_in(db_path: &str) {
    rti()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    ok(
        db_path,
        &[
            "auth", "signup", "--name", "Ana Officer", "--email", EMAIL, "--password", PASSWORD,
        ],
    );
}

/// Signed-in DB with three members and one event (id 1, 2025-09-02).
pub fn init_db_with_data(db_path: &str) {
    init_signed_in(db_path);

    for (sid, name, program, block) in [
        ("25-0001", "Juan dela Cruz", "BSCS", "1"),
        ("25-0002", "Maria Santos", "BSIT", "2"),
        ("24-0003", "Pedro Reyes", "BSCS", "2"),
    ] {
        ok(
            db_path,
            &[
                "member",
                "add",
                "--school-id",
                sid,
                "--name",
                name,
                "--program",
                program,
                "--block",
                block,
                "--year",
                "1",
            ],
        );
    }

    ok(
        db_path,
        &[
            "event",
            "add",
            "--name",
            "General Assembly",
            "--date",
            "2025-09-02",
            "--description",
            "First assembly of the semester",
        ],
    );
}

/// Record a morning time-in for each code at event 1.
pub fn scan_morning(db_path: &str, codes: &[&str]) {
    let mut args = vec!["scan", "--event", "1", "--session", "morning"];
    args.extend_from_slice(codes);
    ok(db_path, &args);
}
