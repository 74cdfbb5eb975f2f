mod common;
use common::{init_floor, manager, operator, record, setup_test_db};
use predicates::str::contains;

#[test]
fn manager_corrects_duration_and_comment() {
    let db = setup_test_db("edit_duration");
    init_floor(&db);
    record(&db, "Press", "2025-06-04 08:00", "2025-06-04 08:05", "jam", None);

    manager(&db)
        .args(["edit", "1", "--duration", "30", "--comment", "hydraulic leak"])
        .assert()
        .success()
        .stdout(contains("2025-06-04 08:30"))
        .stdout(contains("30 min"));

    manager(&db)
        .args(["--at", "2025-06-04 12:00", "list"])
        .assert()
        .success()
        .stdout(contains("hydraulic leak"))
        .stdout(contains("00h 30m"));
}

#[test]
fn operators_cannot_edit_or_delete() {
    let db = setup_test_db("edit_operator_denied");
    init_floor(&db);
    record(&db, "Press", "2025-06-04 08:00", "2025-06-04 08:05", "jam", None);

    operator(&db)
        .args(["edit", "1", "--comment", "x"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    operator(&db)
        .args(["del", "1"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));
}

#[test]
fn edit_needs_something_to_change() {
    let db = setup_test_db("edit_nothing");
    init_floor(&db);
    record(&db, "Press", "2025-06-04 08:00", "2025-06-04 08:05", "jam", None);

    manager(&db)
        .args(["edit", "1"])
        .assert()
        .failure()
        .stderr(contains("Nothing to do"));
}

#[test]
fn running_downtime_has_no_duration_to_edit() {
    let db = setup_test_db("edit_running");
    init_floor(&db);

    operator(&db)
        .args(["--at", "2025-06-04 08:00", "start", "Saw"])
        .assert()
        .success();

    manager(&db)
        .args(["edit", "1", "--duration", "10"])
        .assert()
        .failure()
        .stderr(contains("Invalid duration"));
}

#[test]
fn manager_deletes_a_downtime() {
    let db = setup_test_db("del_downtime");
    init_floor(&db);
    record(&db, "Press", "2025-06-04 08:00", "2025-06-04 08:05", "jam", None);

    manager(&db)
        .args(["del", "1"])
        .assert()
        .success()
        .stdout(contains("deleted"));

    manager(&db)
        .args(["del", "1"])
        .assert()
        .failure()
        .stderr(contains("Downtime #1 not found"));

    manager(&db)
        .args(["--at", "2025-06-04 12:00", "list"])
        .assert()
        .success()
        .stdout(contains("No downtimes found"));
}
