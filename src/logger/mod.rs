//! Feature-gated logger used by the engine and the `vcounsel` CLI.
//!
//! - `log-info` enables `info!` output.
//! - `log-debug` enables `debug!` output and a runtime debug switch.
//! - `verbose` enables `verbose!`, an untagged printer for CLI detail.
//! - `file-logging` redirects tagged messages to a file once initialized.
//!
//! `error!` and `warn!` are always active and go to stderr.

use std::fmt::{self, Arguments};
use std::str::FromStr;
#[cfg(feature = "log-debug")]
use std::sync::atomic::AtomicBool;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::LazyLock;

#[cfg(feature = "file-logging")]
use std::{
    fs::{File, OpenOptions},
    io::Write,
    sync::Mutex,
};

/// Logging levels, ordered from most to least severe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Error-level messages (always enabled).
    Error = 1,
    /// Warning-level messages (always enabled).
    Warn = 2,
    /// Info-level messages (requires `log-info` feature).
    Info = 3,
    /// Debug-level messages (requires `log-debug` feature and runtime enablement).
    Debug = 4,
}

impl Level {
    /// Lowercase name as stored in the config file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    const fn tag(self) -> &'static str {
        match self {
            Self::Error => "[ERROR]",
            Self::Warn => "[WARN]",
            Self::Info => "[INFO]",
            Self::Debug => "[DEBUG]",
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Error,
            2 => Self::Warn,
            3 => Self::Info,
            _ => Self::Debug,
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" | "err" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(format!("Unknown log level: '{s}'")),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const fn default_level() -> u8 {
    if cfg!(feature = "log-debug") {
        Level::Debug as u8
    } else if cfg!(feature = "log-info") {
        Level::Info as u8
    } else {
        Level::Warn as u8
    }
}

static LOG_LEVEL: LazyLock<AtomicU8> = LazyLock::new(|| AtomicU8::new(default_level()));
#[cfg(feature = "log-debug")]
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);
#[cfg(feature = "verbose")]
static VERBOSE_ENABLED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);
#[cfg(feature = "file-logging")]
static LOG_FILE: LazyLock<Mutex<Option<File>>> = LazyLock::new(|| Mutex::new(None));

/// Set the global log level.
pub fn set_level(level: Level) {
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Current global log level.
#[must_use]
pub fn level() -> Level {
    Level::from_u8(LOG_LEVEL.load(Ordering::SeqCst))
}

/// Parse a level name (case-insensitive) and apply it. Returns `true` on success.
#[must_use]
pub fn set_level_from_str(level: &str) -> bool {
    level.parse::<Level>().map(set_level).is_ok()
}

#[cfg(feature = "log-debug")]
/// Enable debug logging at runtime.
pub fn enable_debug() {
    DEBUG_ENABLED.store(true, Ordering::SeqCst);
}
#[cfg(not(feature = "log-debug"))]
/// Enable debug logging at runtime (no-op without `log-debug`).
pub fn enable_debug() {}

#[cfg(feature = "log-debug")]
/// Disable debug logging at runtime.
pub fn disable_debug() {
    DEBUG_ENABLED.store(false, Ordering::SeqCst);
}
#[cfg(not(feature = "log-debug"))]
/// Disable debug logging at runtime (no-op without `log-debug`).
pub fn disable_debug() {}

#[cfg(feature = "log-debug")]
/// Returns whether debug logging is enabled.
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::SeqCst)
}
#[cfg(not(feature = "log-debug"))]
/// Always false without `log-debug`.
pub const fn is_debug_enabled() -> bool {
    false
}

#[cfg(feature = "verbose")]
/// Enable verbose output at runtime.
pub fn enable_verbose() {
    VERBOSE_ENABLED.store(true, Ordering::SeqCst);
}
#[cfg(not(feature = "verbose"))]
/// Enable verbose output at runtime (no-op without `verbose`).
pub fn enable_verbose() {}

#[cfg(feature = "verbose")]
/// Returns whether verbose output is enabled.
pub fn is_verbose_enabled() -> bool {
    VERBOSE_ENABLED.load(Ordering::SeqCst)
}
#[cfg(not(feature = "verbose"))]
/// Always false without `verbose`.
pub const fn is_verbose_enabled() -> bool {
    false
}

#[cfg(feature = "file-logging")]
/// Append tagged log lines to `path` from now on. Returns `true` on success.
#[must_use]
pub fn init_file_logging(path: &std::path::Path) -> bool {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && std::fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .is_ok_and(|file| {
            LOG_FILE.lock().is_ok_and(|mut slot| {
                *slot = Some(file);
                true
            })
        })
}

#[cfg(not(feature = "file-logging"))]
/// File logging is unavailable without `file-logging`; always returns `false`.
#[must_use]
pub fn init_file_logging(_path: &std::path::Path) -> bool {
    false
}

/// Write to the log file if one is open. Returns `true` when the line was consumed.
#[cfg(feature = "file-logging")]
fn write_to_file(line: &str) -> bool {
    let Ok(mut slot) = LOG_FILE.lock() else {
        return false;
    };
    slot.as_mut().is_some_and(|file| {
        let _ = writeln!(file, "{line}");
        let _ = file.flush();
        true
    })
}

#[cfg(not(feature = "file-logging"))]
const fn write_to_file(_line: &str) -> bool {
    false
}

fn should_log(level: Level) -> bool {
    let compiled_in = match level {
        Level::Info => cfg!(feature = "log-info"),
        Level::Debug => cfg!(feature = "log-debug") && is_debug_enabled(),
        Level::Error | Level::Warn => true,
    };
    compiled_in && (level as u8) <= LOG_LEVEL.load(Ordering::SeqCst)
}

/// Internal dispatcher used by the exported macros.
pub fn log_impl(level: Level, args: Arguments) {
    if !should_log(level) {
        return;
    }
    let line = format!("{} {args}", level.tag());
    if write_to_file(&line) {
        return;
    }
    match level {
        Level::Error | Level::Warn => eprintln!("{line}"),
        Level::Info | Level::Debug => println!("{line}"),
    }
}

#[macro_export]
/// Logs an error-level message (always enabled).
macro_rules! error { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Error, format_args!($($arg)*)) }; }
#[macro_export]
/// Logs a warning-level message (always enabled).
macro_rules! warn  { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Warn,  format_args!($($arg)*)) }; }
#[macro_export]
/// Logs an info-level message (requires `log-info` feature).
macro_rules! info  { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Info,  format_args!($($arg)*)) }; }
#[macro_export]
/// Logs a debug-level message (requires `log-debug` feature and runtime enablement).
macro_rules! debug { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Debug, format_args!($($arg)*)) }; }
#[macro_export]
/// Prints an untagged line when verbose output is enabled. Never written to the log file.
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::logger::is_verbose_enabled() { println!($($arg)*); }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_round_trips_through_str() {
        for level in [Level::Error, Level::Warn, Level::Info, Level::Debug] {
            assert_eq!(level.as_str().parse::<Level>(), Ok(level));
        }
        assert_eq!("WARNING".parse::<Level>(), Ok(Level::Warn));
        assert_eq!(" err ".parse::<Level>(), Ok(Level::Error));
        assert!("trace".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_ordering_follows_severity() {
        assert!(Level::Error < Level::Warn);
        assert!(Level::Info < Level::Debug);
    }

    #[test]
    fn test_error_always_passes_gate() {
        set_level(Level::Error);
        assert!(should_log(Level::Error));
        assert!(!should_log(Level::Warn));
        set_level(Level::Warn);
    }
}
