use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_data, ok, rti, scan_morning, setup_test_db, temp_out};

#[test]
fn test_export_event_csv() {
    let db_path = setup_test_db("export_csv");
    let out = temp_out("export_csv", "csv");
    init_db_with_data(&db_path);
    scan_morning(&db_path, &["25-0001", "25-0002"]);

    ok(&db_path, &["export", "--format", "csv", "--file", &out, "--event", "1"]);

    let content = fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next().unwrap(),
        "event,event_date,school_id,name,program,block,session,time_in,time_out,duration"
    );
    assert_eq!(content.lines().count(), 3);
    assert!(content.contains("General Assembly,2025-09-02,25-0001,Juan dela Cruz,BSCS,1,morning"));
}

#[test]
fn test_export_range_json() {
    let db_path = setup_test_db("export_json");
    let out = temp_out("export_json", "json");
    init_db_with_data(&db_path);
    scan_morning(&db_path, &["24-0003"]);

    ok(&db_path, &["export", "--format", "json", "--file", &out, "--range", "2025-09"]);

    let data: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let arr = data.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["school_id"], "24-0003");
    assert_eq!(arr[0]["time_out"], "");
}

#[test]
fn test_export_pdf_and_xlsx() {
    let db_path = setup_test_db("export_binary");
    init_db_with_data(&db_path);
    scan_morning(&db_path, &["25-0001", "25-0002", "24-0003"]);

    let pdf = temp_out("export_binary", "pdf");
    ok(&db_path, &["export", "--format", "pdf", "--file", &pdf]);
    assert!(fs::read(&pdf).unwrap().starts_with(b"%PDF"));

    let xlsx = temp_out("export_binary", "xlsx");
    ok(&db_path, &["export", "--format", "xlsx", "--file", &xlsx]);
    // xlsx is a zip container
    assert!(fs::read(&xlsx).unwrap().starts_with(b"PK"));
}

#[test]
fn test_export_empty_selection_writes_nothing() {
    let db_path = setup_test_db("export_empty");
    let out = temp_out("export_empty", "csv");
    init_db_with_data(&db_path);

    rti()
        .args(["--db", &db_path, "export", "--file", &out, "--range", "2024"])
        .assert()
        .success()
        .stdout(contains("No attendance records found"));
    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative");
    init_db_with_data(&db_path);

    rti()
        .args(["--db", &db_path, "export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_backup_compressed() {
    let db_path = setup_test_db("backup_zip");
    init_db_with_data(&db_path);
    let target = temp_out("backup_zip", "sqlite");
    let zipped = target.replace(".sqlite", ".zip");
    fs::remove_file(&zipped).ok();

    ok(&db_path, &["backup", "--file", &target, "--compress", "--force"]);
    assert!(std::path::Path::new(&zipped).exists());
    assert!(!std::path::Path::new(&target).exists());
}
