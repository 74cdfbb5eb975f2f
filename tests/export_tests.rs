mod common;
use common::{init_two_lots, manager, setup_test_db, temp_out, viewer};
use predicates::str::contains;
use std::fs;

#[test]
fn export_downtimes_csv_in_range() {
    let db = setup_test_db("export_csv_range");
    init_two_lots(&db);
    let out = temp_out("export_csv_range", "csv");

    manager(&db)
        .args(["export", "--format", "csv", "--file", &out, "--range", "2025-06-04"])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("id,machine,start_time,end_time,duration_minutes"));
    assert!(content.contains("Press,2025-06-04 13:00:00,2025-06-04 13:10:00,10"));
    assert_eq!(content.lines().count(), 5);
}

#[test]
fn export_outside_range_writes_only_header() {
    let db = setup_test_db("export_csv_empty");
    init_two_lots(&db);
    let out = temp_out("export_csv_empty", "csv");

    manager(&db)
        .args(["export", "--format", "csv", "--file", &out, "--range", "2024"])
        .assert()
        .success()
        .stdout(contains("No records"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn export_json_keeps_post_numbers() {
    let db = setup_test_db("export_json");
    init_two_lots(&db);
    let out = temp_out("export_json", "json");

    manager(&db)
        .args(["export", "--format", "json", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(rows.as_array().map(|a| a.len()), Some(4));
    assert!(content.contains("\"post_number\": \"2\""));
    assert!(content.contains("\"lot_marker\": true"));
}

#[test]
fn export_periods_with_efficiency() {
    let db = setup_test_db("export_periods");
    init_two_lots(&db);
    let out = temp_out("export_periods", "csv");

    manager(&db)
        .args([
            "--at",
            "2025-06-05 10:00",
            "export",
            "--periods",
            "--format",
            "csv",
            "--file",
            &out,
            "--range",
            "2025-06-04",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.starts_with("post_number,start_time,end_time"));
    assert!(content.contains("1,2025-06-04 07:00:00,2025-06-04 12:00:00,300,0,15,100,false"));
    assert!(content.contains("2,2025-06-04 12:00:00,2025-06-04 23:20:00,680,10,0,99,false"));
}

#[test]
fn export_pdf_and_xlsx_files() {
    let db = setup_test_db("export_binary");
    init_two_lots(&db);

    let pdf = temp_out("export_binary", "pdf");
    manager(&db)
        .args(["export", "--format", "pdf", "--file", &pdf, "--range", "2025-06"])
        .assert()
        .success();
    let bytes = fs::read(&pdf).expect("read pdf");
    assert!(bytes.starts_with(b"%PDF"));

    let xlsx = temp_out("export_binary", "xlsx");
    manager(&db)
        .args(["export", "--format", "xlsx", "--file", &xlsx])
        .assert()
        .success();
    let bytes = fs::read(&xlsx).expect("read xlsx");
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn existing_file_needs_force() {
    let db = setup_test_db("export_force");
    init_two_lots(&db);
    let out = temp_out("export_force", "csv");
    fs::write(&out, "old").expect("seed file");

    manager(&db)
        .args(["export", "--format", "csv", "--file", &out])
        .assert()
        .failure()
        .stderr(contains("already exists"));

    manager(&db)
        .args(["export", "--format", "csv", "--file", &out, "--force"])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("Press"));
}

#[test]
fn relative_paths_are_rejected() {
    let db = setup_test_db("export_relative");
    init_two_lots(&db);

    manager(&db)
        .args(["export", "--format", "csv", "--file", "out.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn viewers_cannot_export() {
    let db = setup_test_db("export_viewer_denied");
    init_two_lots(&db);
    let out = temp_out("export_viewer_denied", "csv");

    viewer(&db)
        .args(["--at", "2025-06-04 23:59", "export", "--format", "csv", "--file", &out])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    assert!(!std::path::Path::new(&out).exists());
}
