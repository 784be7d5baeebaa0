//! Tests for settings loading.

use std::io::Write;
use std::time::Duration;
use tactoe::Settings;

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "reply_delay_ms = 100\nreset_delay_ms = 200\nsettle_delay_ms = 0\nseed = 42\nlog_file = \"game.log\""
    )
    .unwrap();

    let settings = Settings::load(Some(file.path())).unwrap();
    let timing = settings.timing();
    assert_eq!(timing.reply_delay, Duration::from_millis(100));
    assert_eq!(timing.reset_delay, Duration::from_millis(200));
    assert_eq!(timing.settle_delay, Duration::ZERO);
    assert_eq!(*settings.seed(), Some(42));
    assert_eq!(settings.log_file().to_str(), Some("game.log"));
    assert_eq!(settings.celebration(), Duration::from_millis(1500));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Settings::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "reply_delay_ms = \"soon\"").unwrap();

    let err = Settings::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
    assert!(err.to_string().starts_with("Config error:"));
}
