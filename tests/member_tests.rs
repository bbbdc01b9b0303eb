use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_data, init_signed_in, ok, rti, setup_test_db, temp_out};

#[test]
fn test_member_list_and_filters() {
    let db_path = setup_test_db("member_list");
    init_db_with_data(&db_path);

    rti()
        .args(["--db", &db_path, "member", "list"])
        .assert()
        .success()
        .stdout(contains("Juan dela Cruz").and(contains("Maria Santos")))
        .stdout(contains("of 3 members"));

    rti()
        .args(["--db", &db_path, "member", "list", "--program", "bscs", "--block", "2"])
        .assert()
        .success()
        .stdout(contains("Pedro Reyes").and(contains("Juan dela Cruz").not()));

    rti()
        .args(["--db", &db_path, "member", "list", "--name", "nobody"])
        .assert()
        .success()
        .stdout(contains("No members found matching your search criteria."));
}

#[test]
fn test_member_add_validation_and_duplicates() {
    let db_path = setup_test_db("member_add_invalid");
    init_db_with_data(&db_path);

    rti()
        .args([
            "--db", &db_path, "member", "add", "--school-id", "25-0001", "--name", "Someone Else",
            "--program", "BSIS", "--block", "1", "--year", "1",
        ])
        .assert()
        .failure()
        .stderr(contains("A member with this school ID already exists"));

    rti()
        .args([
            "--db", &db_path, "member", "add", "--school-id", " ", "--name", "X", "--program",
            "BSED", "--block", "9", "--year", "1",
        ])
        .assert()
        .failure()
        .stderr(contains("School ID is required"))
        .stderr(contains("Please select a valid program"))
        .stderr(contains("Please select a block"));
}

#[test]
fn test_member_edit_and_delete() {
    let db_path = setup_test_db("member_edit_del");
    init_db_with_data(&db_path);

    ok(&db_path, &["member", "edit", "1", "--name", "Juan Miguel dela Cruz"]);

    rti()
        .args(["--db", &db_path, "member", "list", "--school-id", "25-0001"])
        .assert()
        .success()
        .stdout(contains("Juan Miguel dela Cruz"));

    ok(&db_path, &["member", "del", "1", "--yes"]);

    rti()
        .args(["--db", &db_path, "member", "list"])
        .assert()
        .success()
        .stdout(contains("Juan Miguel").not());

    rti()
        .args(["--db", &db_path, "member", "edit", "1", "--block", "3"])
        .assert()
        .failure()
        .stderr(contains("Member not found"));
}

#[test]
fn test_member_pagination_clamps_page() {
    let db_path = setup_test_db("member_pages");
    init_signed_in(&db_path);

    let tsv = temp_out("member_pages_import", "tsv");
    let lines: Vec<String> = (1..=23)
        .map(|i| format!("25-{:04}\tMember Number {:02}\tBSIT", i, i))
        .collect();
    fs::write(&tsv, lines.join("\n")).unwrap();
    ok(&db_path, &["member", "import", &tsv]);

    rti()
        .args(["--db", &db_path, "member", "list", "--page", "99"])
        .assert()
        .success()
        .stdout(contains("Showing 21-23 of 23 members"))
        .stdout(contains("[3]"));

    fs::remove_file(&tsv).ok();
}

#[test]
fn test_member_import_reports_skipped_lines() {
    let db_path = setup_test_db("member_import");
    init_db_with_data(&db_path);

    let tsv = temp_out("member_import", "tsv");
    fs::write(
        &tsv,
        "25-0001\tJuan dela Cruz\tBSCS\n25-0100\tLuz Garcia\tBSIS\n25-0101\tL\tBSIS\n",
    )
    .unwrap();

    rti()
        .args(["--db", &db_path, "member", "import", &tsv])
        .assert()
        .success()
        .stdout(contains("Imported 1 member(s)"))
        .stdout(contains("1 duplicate school ID(s) skipped"))
        .stderr(contains("Line 3: Name must be at least 2 characters"));

    fs::remove_file(&tsv).ok();
}

#[test]
fn test_recalc_years() {
    let db_path = setup_test_db("member_recalc");
    init_db_with_data(&db_path);

    rti()
        .args(["--db", &db_path, "member", "recalc-years"])
        .assert()
        .success()
        .stdout(contains("Year levels recalculated for 3 member(s)"));
}
