use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_data, rti, scan_morning, setup_test_db};

#[test]
fn test_scan_times_in_and_ignores_duplicates() {
    let db_path = setup_test_db("scan_basic");
    init_db_with_data(&db_path);

    rti()
        .args([
            "--db", &db_path, "scan", "--event", "1", "--session", "morning", "25-0001", "25-0001",
        ])
        .assert()
        .success()
        .stdout(contains("JUAN DELA CRUZ - TIMED IN"))
        .stdout(contains("BSCS 1"))
        .stdout(contains("duplicate scan ignored"))
        .stdout(contains("1 timed in · 0 timed out · 1 ignored"));
}

#[test]
fn test_scan_unknown_member() {
    let db_path = setup_test_db("scan_unknown");
    init_db_with_data(&db_path);

    rti()
        .args(["--db", &db_path, "scan", "--event", "1", "99-9999"])
        .assert()
        .success()
        .stderr(contains("Member not found: 99-9999"))
        .stdout(contains("1 not found"));
}

#[test]
fn test_scan_from_stdin_until_q() {
    let db_path = setup_test_db("scan_stdin");
    init_db_with_data(&db_path);

    rti()
        .args(["--db", &db_path, "scan", "--event", "1", "--session", "afternoon"])
        .write_stdin("25-0002\n\n24-0003\nq\n25-0001\n")
        .assert()
        .success()
        .stdout(contains("MARIA SANTOS - TIMED IN").and(contains("PEDRO REYES - TIMED IN")))
        .stdout(contains("JUAN DELA CRUZ").not())
        .stdout(contains("2 timed in"));
}

#[test]
fn test_sessions_are_independent() {
    let db_path = setup_test_db("scan_sessions");
    init_db_with_data(&db_path);
    scan_morning(&db_path, &["25-0001"]);

    rti()
        .args([
            "--db", &db_path, "scan", "--event", "1", "--session", "afternoon", "25-0001",
        ])
        .assert()
        .success()
        .stdout(contains("TIMED IN"));

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let sessions: Vec<String> = conn
        .prepare("SELECT session FROM attendance ORDER BY session")
        .unwrap()
        .query_map([], |r| r.get(0))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(sessions, vec!["afternoon", "morning"]);
}

#[test]
fn test_scan_unknown_event() {
    let db_path = setup_test_db("scan_no_event");
    init_db_with_data(&db_path);

    rti()
        .args(["--db", &db_path, "scan", "--event", "42", "25-0001"])
        .assert()
        .failure()
        .stderr(contains("Event not found: 42"));
}
