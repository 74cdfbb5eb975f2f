mod common;
use common::{MARKER, init_floor, operator, setup_test_db, viewer};
use predicates::str::contains;

#[test]
fn start_and_stop_records_floor_minutes() {
    let db = setup_test_db("timer_start_stop");
    init_floor(&db);

    operator(&db)
        .args(["--at", "2025-06-04 09:00", "start", "press"])
        .assert()
        .success()
        .stdout(contains("started on 'Press' at 09:00"));

    operator(&db)
        .args(["--at", "2025-06-04 09:20:59", "stop", "Press", "--comment", "jam"])
        .assert()
        .success()
        .stdout(contains("stopped: 20 min"));

    operator(&db)
        .args(["--at", "2025-06-04 10:00", "list"])
        .assert()
        .success()
        .stdout(contains("Press"))
        .stdout(contains("jam"))
        .stdout(contains("00h 20m"));
}

#[test]
fn second_start_on_busy_machine_fails() {
    let db = setup_test_db("timer_busy");
    init_floor(&db);

    operator(&db)
        .args(["--at", "2025-06-04 09:00", "start", "Saw"])
        .assert()
        .success();

    operator(&db)
        .args(["--at", "2025-06-04 09:05", "start", "Saw"])
        .assert()
        .failure()
        .stderr(contains("already has an active downtime"));

    operator(&db)
        .args(["--at", "2025-06-04 09:06", "list", "--active"])
        .assert()
        .success()
        .stdout(contains("running"));
}

#[test]
fn stop_requires_a_comment() {
    let db = setup_test_db("timer_comment");
    init_floor(&db);

    operator(&db)
        .args(["--at", "2025-06-04 09:00", "start", "Press"])
        .assert()
        .success();

    operator(&db)
        .args(["--at", "2025-06-04 09:10", "stop", "Press", "--comment", "  "])
        .assert()
        .failure()
        .stderr(contains("A comment is required"));
}

#[test]
fn marker_stop_requires_a_post_number() {
    let db = setup_test_db("timer_marker_post");
    init_floor(&db);

    operator(&db)
        .args(["--at", "2025-06-04 07:00", "start", MARKER])
        .assert()
        .success();

    operator(&db)
        .args(["--at", "2025-06-04 07:02", "stop", MARKER, "--comment", "lot change"])
        .assert()
        .failure()
        .stderr(contains("A post number is required"));

    operator(&db)
        .args(["--at", "2025-06-04 07:02", "stop", MARKER, "--comment", "lot change", "--post", "17"])
        .assert()
        .success()
        .stdout(contains("post 17"));
}

#[test]
fn stop_without_running_timer_fails() {
    let db = setup_test_db("timer_not_running");
    init_floor(&db);

    operator(&db)
        .args(["--at", "2025-06-04 09:10", "stop", "Press", "--comment", "jam"])
        .assert()
        .failure()
        .stderr(contains("No active downtime"));
}

#[test]
fn unknown_machine_is_rejected() {
    let db = setup_test_db("timer_unknown_machine");
    init_floor(&db);

    operator(&db)
        .args(["--at", "2025-06-04 09:00", "start", "Lathe"])
        .assert()
        .failure()
        .stderr(contains("Unknown machine"));
}

#[test]
fn viewer_cannot_record() {
    let db = setup_test_db("timer_viewer");
    init_floor(&db);

    viewer(&db)
        .args(["--at", "2025-06-04 09:00", "start", "Press"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));
}
