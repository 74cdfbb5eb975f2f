#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const MARKER: &str = "Omposting/Korigering";

pub fn rdt() -> Command {
    cargo_bin_cmd!("rdowntime")
}

/// Unique test DB path inside the system temp dir; any previous file is removed.
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rdowntime.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Temporary output file path inside the temp dir, removed if present.
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Command logged in as `user`, on `db`.
pub fn as_user(db: &str, user: &str, password: &str) -> Command {
    let mut cmd = rdt();
    cmd.args(["--db", db, "--user", user, "--password", password]);
    cmd
}

pub fn admin(db: &str) -> Command {
    as_user(db, "admin", "admin")
}

pub fn operator(db: &str) -> Command {
    as_user(db, "anna", "op-pw")
}

pub fn manager(db: &str) -> Command {
    as_user(db, "mike", "mgr-pw")
}

pub fn viewer(db: &str) -> Command {
    as_user(db, "vera", "view-pw")
}

/// Schema, one user per role and the Press, Saw and Pause machines.
pub fn init_floor(db: &str) {
    rdt().args(["--db", db, "--test", "init"]).assert().success();

    for (id, pw, role) in [
        ("anna", "op-pw", "operator"),
        ("mike", "mgr-pw", "manager"),
        ("vera", "view-pw", "viewer"),
    ] {
        admin(db)
            .args(["user", "add", id, "--new-password", pw, "--role", role])
            .assert()
            .success();
    }

    for m in ["Press", "Saw", "Pause"] {
        admin(db).args(["machine", "add", m]).assert().success();
    }
}

/// Start and stop a downtime as the operator.
pub fn record(db: &str, machine: &str, start: &str, end: &str, comment: &str, post: Option<&str>) {
    operator(db)
        .args(["--at", start, "start", machine])
        .assert()
        .success();

    let mut stop = operator(db);
    stop.args(["--at", end, "stop", machine, "--comment", comment]);
    if let Some(p) = post {
        stop.args(["--post", p]);
    }
    stop.assert().success();
}

/// Two lots on Wednesday 2025-06-04: post 1 from 07:00, post 2 from 12:00.
pub fn init_two_lots(db: &str) {
    init_floor(db);
    record(db, MARKER, "2025-06-04 07:00", "2025-06-04 07:01", "lot change", Some("1"));
    record(db, "Pause", "2025-06-04 08:00", "2025-06-04 08:15", "coffee", None);
    record(db, MARKER, "2025-06-04 12:00", "2025-06-04 12:01", "lot change", Some("2"));
    record(db, "Press", "2025-06-04 13:00", "2025-06-04 13:10", "jam", None);
}
