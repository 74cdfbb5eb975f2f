mod common;
use common::{init_floor, operator, rdt, setup_test_db, temp_out};
use predicates::str::contains;
use std::fs;
use std::path::Path;

#[test]
fn init_seeds_admin_and_marker() {
    let db = setup_test_db("maint_init");

    rdt()
        .args(["--db", &db, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"))
        .stdout(contains("Omposting/Korigering"));

    common::admin(&db)
        .args(["machine", "list"])
        .assert()
        .success()
        .stdout(contains("lot marker"));
}

#[test]
fn log_records_timer_actions() {
    let db = setup_test_db("maint_log");
    init_floor(&db);

    operator(&db)
        .args(["--at", "2025-06-04 08:00", "start", "Press"])
        .assert()
        .success();

    rdt()
        .args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("start"))
        .stdout(contains("started at 2025-06-04 08:00 by anna"));
}

#[test]
fn db_check_and_info() {
    let db = setup_test_db("maint_db");
    init_floor(&db);

    rdt()
        .args(["--db", &db, "db", "--check", "--info"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"))
        .stdout(contains("Machines"));
}

#[test]
fn compressed_backup_is_a_zip() {
    let db = setup_test_db("maint_backup");
    init_floor(&db);

    let target = temp_out("maint_backup", "sqlite");
    let zip = temp_out("maint_backup", "zip");

    rdt()
        .args(["--db", &db, "backup", "--file", &target, "--compress"])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    assert!(Path::new(&zip).exists());
    assert!(!Path::new(&target).exists());
    assert!(fs::read(&zip).expect("read zip").starts_with(b"PK"));

    rdt()
        .args(["--db", &db, "backup", "--file", &target, "--compress"])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}
