//! File logging end-to-end tests
//!
//! Drive a logger the way an application does and read the file back.

use std::fs;

use openlog_core::{read_records, Level, LogError, Logger, LoggerConfig, Value};
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

fn file_config(temp: &TempDir) -> LoggerConfig {
    LoggerConfig::new()
        .echo(false)
        .width(80)
        .write_to_file(true)
        .base_dir(temp.path())
}

// ============================================================================
// Round Trip
// ============================================================================

#[test]
fn test_basic_levels_roundtrip() {
    let temp = TempDir::new().unwrap();
    let mut logger = Logger::new(file_config(&temp)).unwrap();

    logger.log("This is an info message").unwrap();
    logger.error("Something went wrong").unwrap();
    logger.warn("This is a warning").unwrap();
    logger.init("System initialized").unwrap();

    let records = read_records(logger.log_file_path().unwrap()).unwrap();
    let parsed: Vec<_> = records.iter().map(|r| (r.level, r.text.as_str())).collect();
    assert_eq!(
        parsed,
        vec![
            (Level::Info, "This is an info message"),
            (Level::Error, "Something went wrong"),
            (Level::Warn, "This is a warning"),
            (Level::Init, "System initialized"),
        ]
    );
}

#[test]
fn test_prefixed_logger_roundtrip() {
    let temp = TempDir::new().unwrap();
    let mut logger = Logger::new(file_config(&temp).prefix("APP")).unwrap();

    logger.log("This is an info message with prefix").unwrap();
    logger.error("Something went wrong with prefix").unwrap();

    let records = read_records(logger.log_file_path().unwrap()).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.prefix.as_deref() == Some("APP")));
    assert_eq!(records[1].level, Level::Error);
    assert_eq!(records[1].text, "Something went wrong with prefix");
}

#[test]
fn test_vertical_value_spans_records_with_one_timestamp() {
    let temp = TempDir::new().unwrap();
    let mut logger = Logger::new(file_config(&temp)).unwrap();

    logger.warn(Value::seq(1..=15)).unwrap();

    let records = read_records(logger.log_file_path().unwrap()).unwrap();
    assert_eq!(records.len(), 17);
    assert!(records.iter().all(|r| r.level == Level::Warn));
    assert!(records.iter().all(|r| r.ts == records[0].ts));
    assert_eq!(records[0].text, "[");
    assert_eq!(records[1].text, "  1,");
    assert_eq!(records[16].text, "]");
}

#[test]
fn test_batch_messages_are_separate_records() {
    let temp = TempDir::new().unwrap();
    let mut logger = Logger::new(file_config(&temp)).unwrap();

    logger.add_message("download started");
    logger.add_message("download finished");
    logger.flush_batch(Level::Init).unwrap();
    logger.log(serde_json::json!(["alpha", "beta"])).unwrap();

    let records = read_records(logger.log_file_path().unwrap()).unwrap();
    let parsed: Vec<_> = records.iter().map(|r| (r.level, r.text.as_str())).collect();
    assert_eq!(
        parsed,
        vec![
            (Level::Init, "download started"),
            (Level::Init, "download finished"),
            (Level::Info, "alpha"),
            (Level::Info, "beta"),
        ]
    );
}

#[test]
fn test_json_object_rendered_like_mapping() {
    let temp = TempDir::new().unwrap();
    let mut logger = Logger::new(file_config(&temp)).unwrap();

    logger.log(serde_json::json!({"a": 1, "b": 2})).unwrap();

    let records = read_records(logger.log_file_path().unwrap()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].text, "{a: 1, b: 2}");
}

// ============================================================================
// File Placement
// ============================================================================

#[test]
fn test_fixed_file_is_reused_and_truncated() {
    let temp = TempDir::new().unwrap();

    {
        let mut first = Logger::new(file_config(&temp)).unwrap();
        first.log("from the first run").unwrap();
    }
    let mut second = Logger::new(file_config(&temp)).unwrap();
    second.log("from the second run").unwrap();

    let path = temp.path().join("log.txt");
    assert_eq!(second.log_file_path().unwrap(), path.as_path());

    let content = fs::read_to_string(&path).unwrap();
    assert!(!content.contains("from the first run"));
    assert!(content.contains("from the second run"));
}

#[test]
fn test_in_dir_creates_logs_directory() {
    let temp = TempDir::new().unwrap();
    let logger = Logger::new(file_config(&temp).in_dir(true)).unwrap();

    assert!(temp.path().join("logs").is_dir());
    assert_eq!(
        logger.log_file_path().unwrap(),
        temp.path().join("logs").join("log.txt").as_path()
    );
}

#[test]
fn test_session_files_do_not_collide() {
    let temp = TempDir::new().unwrap();
    let a = Logger::new(file_config(&temp).session(true)).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let b = Logger::new(file_config(&temp).session(true)).unwrap();

    assert_ne!(a.log_file_path(), b.log_file_path());
}

#[test]
fn test_unwritable_location_fails_construction() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("logs"), "a file, not a directory").unwrap();

    let err = Logger::new(file_config(&temp).in_dir(true)).unwrap_err();
    assert!(matches!(err, LogError::SinkOpen { .. }));
}
