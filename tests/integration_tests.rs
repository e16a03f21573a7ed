use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db, sample_workshop, setup_test_db, task, yoga};
use yoga_admin::db::migrate::{registered_stores, run_pending_migrations};
use yoga_admin::db::store::RecordStore;
use yoga_admin::errors::AppError;
use yoga_admin::models::{Task, Workshop};

fn add_task(db_path: &str, name: &str) {
    yoga()
        .args(["--db", db_path, "--test", "task", "add", name])
        .assert()
        .success();
}

fn stdout_of(args: &[&str]) -> String {
    let out = yoga().args(args).output().expect("run");
    assert!(out.status.success(), "command {:?} failed", args);
    String::from_utf8_lossy(&out.stdout).to_string()
}

#[test]
fn test_init_creates_stores() {
    let db_path = setup_test_db("cli_init");
    init_db(&db_path);

    yoga()
        .args(["--db", &db_path, "--test", "db", "--info"])
        .assert()
        .success()
        .stdout(contains("tasks"))
        .stdout(contains("workshops"));
}

#[test]
fn test_task_list_is_most_recent_first() {
    let db_path = setup_test_db("cli_task_order");
    init_db(&db_path);
    add_task(&db_path, "Buy milk");
    add_task(&db_path, "Call mom");

    let out = stdout_of(&["--db", &db_path, "--test", "task", "list"]);
    let call = out.find("Call mom").expect("Call mom listed");
    let buy = out.find("Buy milk").expect("Buy milk listed");
    assert!(call < buy, "unexpected order:\n{}", out);
}

#[test]
fn test_task_add_with_description() {
    let db_path = setup_test_db("cli_task_desc");
    init_db(&db_path);

    yoga()
        .args([
            "--db",
            &db_path,
            "--test",
            "task",
            "add",
            "Buy mat",
            "--description",
            "cork, 4mm",
        ])
        .assert()
        .success()
        .stdout(contains("Buy mat"))
        .stdout(contains("cork, 4mm"));
}

#[test]
fn test_task_add_empty_name_fails() {
    let db_path = setup_test_db("cli_task_empty");
    init_db(&db_path);

    yoga()
        .args(["--db", &db_path, "--test", "task", "add", "   "])
        .assert()
        .failure()
        .stdout(contains("Please enter a task"));

    let out = stdout_of(&["--db", &db_path, "--test", "task", "list", "--json"]);
    let list: serde_json::Value = serde_json::from_str(&out).expect("json");
    assert_eq!(list.as_array().expect("array").len(), 0);
}

#[test]
fn test_task_delete_by_position() {
    let db_path = setup_test_db("cli_task_del");
    init_db(&db_path);
    add_task(&db_path, "Buy milk");
    add_task(&db_path, "Call mom");

    yoga()
        .args(["--db", &db_path, "--test", "task", "del", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("Deleted Buy milk"));

    // out of range now
    yoga()
        .args(["--db", &db_path, "--test", "task", "del", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("No task at position 1"));

    yoga()
        .args(["--db", &db_path, "--test", "task", "list"])
        .assert()
        .success()
        .stdout(contains("Call mom").and(contains("Buy milk").not()));
}

#[test]
fn test_task_delete_asks_for_confirmation() {
    let db_path = setup_test_db("cli_task_confirm");
    init_db(&db_path);
    add_task(&db_path, "Keep me");

    yoga()
        .args(["--db", &db_path, "--test", "task", "del", "0"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Are you sure"))
        .stdout(contains("Nothing deleted"));

    yoga()
        .args(["--db", &db_path, "--test", "task", "list"])
        .assert()
        .success()
        .stdout(contains("Keep me"));

    yoga()
        .args(["--db", &db_path, "--test", "task", "del", "0"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("Deleted Keep me"));
}

#[test]
fn test_task_list_json() {
    let db_path = setup_test_db("cli_task_json");
    init_db(&db_path);
    add_task(&db_path, "Buy milk");
    add_task(&db_path, "Call mom");

    let out = stdout_of(&["--db", &db_path, "--test", "task", "list", "--json"]);
    let list: serde_json::Value = serde_json::from_str(&out).expect("json");
    let list = list.as_array().expect("array");

    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["name"], "Call mom");
    assert_eq!(list[1]["name"], "Buy milk");
    assert!(list[0]["id"].as_i64().expect("id") > list[1]["id"].as_i64().expect("id"));
}

#[test]
fn test_workshop_add_list_delete() {
    let db_path = setup_test_db("cli_workshop");
    init_db(&db_path);

    yoga()
        .args([
            "--db",
            &db_path,
            "--test",
            "workshop",
            "add",
            "--name",
            "Evening flow",
            "--date",
            "2026-11-03",
            "--start",
            "18:30",
            "--end",
            "20:00",
            "--capacity",
            "12",
            "--price",
            "19.90",
            "--type",
            "vinyasa",
        ])
        .assert()
        .success()
        .stdout(contains("Evening flow"))
        .stdout(contains("19.9"));

    let out = stdout_of(&["--db", &db_path, "--test", "workshop", "list", "--json"]);
    let list: serde_json::Value = serde_json::from_str(&out).expect("json");
    assert_eq!(list[0]["type"], "vinyasa");
    assert_eq!(list[0]["price"], "19.9");
    assert_eq!(list[0]["capacity"], 12);

    yoga()
        .args(["--db", &db_path, "--test", "workshop", "del", "0", "--yes"])
        .assert()
        .success()
        .stdout(contains("Deleted Evening flow"));
}

#[test]
fn test_workshop_negative_price_fails() {
    let db_path = setup_test_db("cli_workshop_price");
    init_db(&db_path);

    yoga()
        .args([
            "--db",
            &db_path,
            "--test",
            "workshop",
            "add",
            "--name",
            "Paid to attend",
            "--date",
            "2026-11-03",
            "--start",
            "18:30",
            "--end",
            "20:00",
            "--capacity",
            "5",
            "--price=-5",
            "--type",
            "yin",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid price"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("cli_log");
    init_db(&db_path);
    add_task(&db_path, "Buy milk");

    yoga()
        .args(["--db", &db_path, "--test", "task", "del", "0", "--yes"])
        .assert()
        .success();

    yoga()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("add (tasks)"))
        .stdout(contains("del (tasks)"));
}

#[test]
fn test_db_check_and_migrate() {
    let db_path = setup_test_db("cli_db_check");
    init_db(&db_path);

    yoga()
        .args(["--db", &db_path, "--test", "db", "--check", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"))
        .stdout(contains("All stores are up to date"));
}

#[test]
fn test_db_migrate_upgrades_old_stores() {
    let db_path = setup_test_db("cli_db_migrate");

    let mut tasks = RecordStore::<Task>::init_for(&db_path, "tasks", 1).expect("tasks v1");
    tasks.try_insert(&task("Sun salutation")).expect("insert");
    tasks.close().expect("close");
    let mut workshops =
        RecordStore::<Workshop>::init_for(&db_path, "workshops", 1).expect("workshops v1");
    workshops
        .try_insert(&sample_workshop("Evening flow"))
        .expect("insert");
    workshops.close().expect("close");

    yoga()
        .args(["--db", &db_path, "--test", "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("tasks: v1 → v2"))
        .stdout(contains("workshops: v1 → v2"));

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let indexes: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master
             WHERE type = 'index' AND name IN ('idx_tasks_name', 'idx_workshops_name')",
            [],
            |row| row.get(0),
        )
        .expect("query");
    assert_eq!(indexes, 2);

    let versions: Vec<u32> = registered_stores(&conn)
        .expect("stores")
        .into_iter()
        .map(|s| s.schema_version)
        .collect();
    assert_eq!(versions, vec![2, 2]);
    drop(conn);

    let out = stdout_of(&["--db", &db_path, "--test", "task", "list"]);
    assert!(out.contains("Sun salutation"), "rows lost:\n{}", out);
    let out = stdout_of(&["--db", &db_path, "--test", "workshop", "list"]);
    assert!(out.contains("Evening flow"), "rows lost:\n{}", out);

    // a second run has nothing left to do
    yoga()
        .args(["--db", &db_path, "--test", "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("All stores are up to date"));
}

#[test]
fn test_db_migrate_unknown_store_kind_fails() {
    let db_path = setup_test_db("cli_db_migrate_unknown");
    init_db(&db_path);

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    conn.execute(
        "INSERT INTO stores (name, kind, schema_version, updated_at)
         VALUES ('notes', 'note', 1, '2026-01-01T00:00:00+00:00')",
        [],
    )
    .expect("register");
    drop(conn);

    yoga()
        .args(["--db", &db_path, "--test", "db", "--migrate"])
        .assert()
        .failure()
        .stderr(contains("Database migration error"))
        .stderr(contains("unknown kind 'note'"));

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    let err = run_pending_migrations(&conn).unwrap_err();
    assert!(matches!(err, AppError::Migration(_)), "got {err}");
}

#[test]
fn test_task_list_shows_load_failure_once() {
    let db_path = setup_test_db("cli_list_broken");
    init_db(&db_path);

    let conn = rusqlite::Connection::open(&db_path).expect("open db");
    conn.execute_batch("DROP TABLE tasks;").expect("drop tasks");
    drop(conn);

    let out = yoga()
        .args(["--db", &db_path, "--test", "task", "list"])
        .output()
        .expect("run");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(stderr.matches("no such table").count(), 1, "{}", stderr);
}

#[test]
fn test_unreachable_database_is_reported() {
    yoga()
        .args([
            "--db",
            "/nonexistent-dir-yoga/x/db.sqlite",
            "--test",
            "task",
            "list",
        ])
        .assert()
        .failure()
        .stderr(contains("Storage unavailable"));
}
