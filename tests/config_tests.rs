use yoga_admin::config::Config;
use yoga_admin::db::store::LATEST_SCHEMA_VERSION;
use yoga_admin::errors::AppError;

#[test]
fn test_missing_fields_fall_back_to_defaults() {
    let cfg = Config::parse("database: /tmp/studio.sqlite\n").expect("parse");

    assert_eq!(cfg.database, "/tmp/studio.sqlite");
    assert_eq!(cfg.tasks_store, "tasks");
    assert_eq!(cfg.workshops_store, "workshops");
    assert_eq!(cfg.schema_version, LATEST_SCHEMA_VERSION);
    assert!(cfg.confirm_delete);
    assert_eq!(cfg.separator_char, '-');
}

#[test]
fn test_full_config_round_trip() {
    let yaml = "database: /tmp/studio.sqlite\n\
                tasks_store: todo\n\
                workshops_store: classes\n\
                schema_version: 1\n\
                confirm_delete: false\n\
                separator_char: '='\n";
    let cfg = Config::parse(yaml).expect("parse");

    assert_eq!(cfg.tasks_store, "todo");
    assert_eq!(cfg.workshops_store, "classes");
    assert_eq!(cfg.schema_version, 1);
    assert!(!cfg.confirm_delete);
    assert_eq!(cfg.separator_char, '=');

    let again = Config::parse(&cfg.to_yaml().expect("yaml")).expect("parse again");
    assert_eq!(again.tasks_store, "todo");
    assert_eq!(again.separator_char, '=');
}

#[test]
fn test_tilde_in_database_is_expanded() {
    let cfg = Config::parse("database: ~/studio.sqlite\n").expect("parse");
    assert!(!cfg.database.starts_with('~'));
    assert!(cfg.database.ends_with("studio.sqlite"));
}

#[test]
fn test_malformed_config_is_an_error() {
    let err = Config::parse("database: [unclosed\n").unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn test_missing_file_gives_defaults() {
    let path = std::env::temp_dir().join("yoga-admin-no-such-config.conf");
    std::fs::remove_file(&path).ok();

    let cfg = Config::load_from(&path).expect("defaults");
    assert!(cfg.database.ends_with("yoga-admin.sqlite"));
}
