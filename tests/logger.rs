//! Integration tests for logger behavior.

use virtual_counselor::logger::{set_level, set_level_from_str, Level};
use virtual_counselor::{debug, error, info, verbose, warn};

#[test]
fn level_parse_accepts_valid() {
    for name in ["error", "warn", "info", "debug", "WARN"] {
        assert!(set_level_from_str(name), "{name} should parse");
    }
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration {}", 42);
    verbose!("verbose integration");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_writes_messages() {
    use virtual_counselor::logger::init_file_logging;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("vc.log");
    assert!(init_file_logging(&path));

    error!("written to file");
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("written to file"));
}
