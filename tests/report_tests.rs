use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db_with_data, ok, rti, scan_morning, setup_test_db};

#[test]
fn test_report_defaults_to_latest_event() {
    let db_path = setup_test_db("report_latest");
    init_db_with_data(&db_path);
    scan_morning(&db_path, &["25-0001", "25-0002", "24-0003"]);
    ok(&db_path, &["event", "add", "--name", "Older Meeting", "--date", "2025-08-01"]);

    rti()
        .args(["--db", &db_path, "report"])
        .assert()
        .success()
        .stdout(contains("General Assembly - 2025-09-02"))
        .stdout(contains("3 total attendees"))
        .stdout(contains("By program:").and(contains("(67%)")))
        .stdout(contains("Block 2"));
}

#[test]
fn test_report_empty_event() {
    let db_path = setup_test_db("report_empty");
    init_db_with_data(&db_path);

    rti()
        .args(["--db", &db_path, "report", "--event", "1"])
        .assert()
        .success()
        .stdout(contains("0 total attendees"))
        .stdout(contains("No attendance records for this event yet."));
}

#[test]
fn test_report_session_filter() {
    let db_path = setup_test_db("report_session");
    init_db_with_data(&db_path);
    scan_morning(&db_path, &["25-0001"]);

    rti()
        .args(["--db", &db_path, "report", "--session", "afternoon"])
        .assert()
        .success()
        .stdout(contains("(afternoon session)"))
        .stdout(contains("0 total attendees"));
}

#[test]
fn test_dashboard_counts() {
    let db_path = setup_test_db("dashboard");
    init_db_with_data(&db_path);

    rti()
        .args(["--db", &db_path, "dashboard"])
        .assert()
        .success()
        .stdout(contains("Welcome back, Ana Officer"))
        .stdout(contains("Total members").and(contains("3")))
        .stdout(contains("Total events"));
}

#[test]
fn test_log_records_mutations() {
    let db_path = setup_test_db("log_print");
    init_db_with_data(&db_path);
    scan_morning(&db_path, &["25-0001"]);

    rti()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("member_add"))
        .stdout(contains("event_add"))
        .stdout(contains("time_in"));
}

#[test]
fn test_db_maintenance_messages() {
    let db_path = setup_test_db("db_maintenance");
    init_db_with_data(&db_path);

    rti()
        .args(["--db", &db_path, "db", "--migrate", "--check"])
        .assert()
        .success()
        .stdout(contains("Schema is up to date (2 migrations)."))
        .stdout(contains("Database check passed"));
}
