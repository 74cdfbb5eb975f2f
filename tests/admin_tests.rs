mod common;
use common::{MARKER, admin, as_user, init_floor, operator, rdt, record, setup_test_db};
use predicates::str::contains;

#[test]
fn wrong_password_is_rejected() {
    let db = setup_test_db("admin_wrong_password");
    init_floor(&db);

    as_user(&db, "anna", "nope")
        .args(["list"])
        .assert()
        .failure()
        .stderr(contains("Authentication failed for user 'anna'"));
}

#[test]
fn credentials_are_required() {
    let db = setup_test_db("admin_no_credentials");
    init_floor(&db);

    rdt()
        .args(["--db", &db, "list"])
        .assert()
        .failure()
        .stderr(contains("Missing credentials"));
}

#[test]
fn only_admins_manage_machines() {
    let db = setup_test_db("admin_machine_permissions");
    init_floor(&db);

    operator(&db)
        .args(["machine", "add", "Lathe"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));

    admin(&db)
        .args(["machine", "add", "Lathe"])
        .assert()
        .success();

    admin(&db)
        .args(["machine", "rename", "Lathe", "CNC Lathe"])
        .assert()
        .success();

    operator(&db)
        .args(["machine", "list"])
        .assert()
        .success()
        .stdout(contains("CNC Lathe"))
        .stdout(contains("lot marker"));

    admin(&db)
        .args(["machine", "del", "CNC Lathe"])
        .assert()
        .success();
}

#[test]
fn machines_with_history_or_marker_role_stay() {
    let db = setup_test_db("admin_machine_protected");
    init_floor(&db);
    record(&db, "Press", "2025-06-04 08:00", "2025-06-04 08:05", "jam", None);

    admin(&db)
        .args(["machine", "del", "Press"])
        .assert()
        .failure()
        .stderr(contains("recorded downtimes"));

    admin(&db)
        .args(["machine", "del", MARKER])
        .assert()
        .failure()
        .stderr(contains("cannot be removed"));

    admin(&db)
        .args(["machine", "rename", "Saw", MARKER])
        .assert()
        .failure()
        .stderr(contains("is reserved"));
}

#[test]
fn users_change_their_own_password() {
    let db = setup_test_db("admin_passwd");
    init_floor(&db);

    operator(&db)
        .args(["user", "passwd", "--new-password", "s3cret"])
        .assert()
        .success();

    operator(&db).args(["list"]).assert().failure();
    as_user(&db, "anna", "s3cret").args(["list"]).assert().success();

    as_user(&db, "anna", "s3cret")
        .args(["user", "passwd", "mike", "--new-password", "x"])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));
}

#[test]
fn last_admin_is_protected() {
    let db = setup_test_db("admin_last_admin");
    init_floor(&db);

    admin(&db)
        .args(["user", "role", "admin", "manager"])
        .assert()
        .failure()
        .stderr(contains("last administrator"));

    admin(&db)
        .args(["user", "del", "admin"])
        .assert()
        .failure()
        .stderr(contains("your own account"));

    admin(&db)
        .args(["user", "role", "mike", "admin"])
        .assert()
        .success();

    admin(&db)
        .args(["user", "list"])
        .assert()
        .success()
        .stdout(contains("mike"))
        .stdout(contains("viewer"));
}
