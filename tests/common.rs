#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;
use yoga_admin::core::ScreenPresenter;
use yoga_admin::db::store::{LATEST_SCHEMA_VERSION, RecordStore};
use yoga_admin::errors::AppError;
use yoga_admin::models::{NewTask, NewWorkshop, Record, Task};

pub fn yoga() -> Command {
    cargo_bin_cmd!("yoga-admin")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_yoga-admin.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize the DB through the CLI (test mode: config file untouched)
pub fn init_db(db_path: &str) {
    yoga()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn open_tasks(db_path: &str) -> RecordStore<Task> {
    RecordStore::init_for(db_path, "tasks", LATEST_SCHEMA_VERSION).expect("open tasks store")
}

pub fn task(name: &str) -> NewTask {
    NewTask::new(name, "")
}

pub fn names<R: Record>(records: &[R]) -> Vec<String> {
    records.iter().map(|r| r.name().to_string()).collect()
}

pub fn sample_workshop(name: &str) -> NewWorkshop {
    NewWorkshop {
        name: name.to_string(),
        description: "Bring your own mat".to_string(),
        date: "2026-11-03".to_string(),
        start_time: "18:30".to_string(),
        end_time: "20:00".to_string(),
        capacity: 12,
        price: "19.90".parse().expect("price"),
        kind: "hatha".to_string(),
    }
}

/// Presenter that records every call and answers prompts with `answer`.
pub struct RecordingPresenter {
    pub answer: bool,
    pub refreshes: Vec<Vec<String>>,
    pub prompts: Vec<String>,
    pub notes: Vec<String>,
    pub rejected: Vec<String>,
    pub blocking: Vec<String>,
}

impl RecordingPresenter {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            refreshes: Vec::new(),
            prompts: Vec::new(),
            notes: Vec::new(),
            rejected: Vec::new(),
            blocking: Vec::new(),
        }
    }

    pub fn last_refresh(&self) -> Option<&Vec<String>> {
        self.refreshes.last()
    }
}

impl<R: Record> ScreenPresenter<R> for RecordingPresenter {
    fn refresh(&mut self, records: &[R]) {
        self.refreshes
            .push(records.iter().map(|r| r.label()).collect());
    }

    fn confirm_delete(&mut self, record: &R) -> bool {
        self.prompts.push(record.label());
        self.answer
    }

    fn notify(&mut self, message: &str) {
        self.notes.push(message.to_string());
    }

    fn validation_failed(&mut self, error: &AppError) {
        self.rejected.push(error.to_string());
    }

    fn fatal(&mut self, error: &AppError) {
        self.blocking.push(error.to_string());
    }
}

/// Drop the audit table behind the back of open stores, so that every
/// later audit write fails.
pub fn break_audit_log(db_path: &str) {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.execute_batch("DROP TABLE log;").expect("drop log");
}
