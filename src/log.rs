//! Leveled file logging for taskrank.
//!
//! Log levels:
//! - ERROR: Failures that abort a command
//! - WARN: Recoverable data problems (unresolved dependency references)
//! - INFO: Command-level events (analysis started, finished)
//! - DEBUG: Pipeline stage traces (graph size, cycle counts, metrics)
//! - TRACE: Per-task scoring detail
//!
//! Nothing is written until [`init_with_debug`] has run, so library users and
//! tests get silent logging by default.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;

static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();
static MAX_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        })
    }
}

/// Start logging to `~/.taskrank/taskrank.log`.
///
/// `debug`, or `TASKRANK_DEBUG=1`, lowers the threshold from INFO to DEBUG.
pub fn init_with_debug(debug: bool) {
    let from_env = std::env::var("TASKRANK_DEBUG")
        .is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));

    let level = if debug || from_env {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    MAX_LEVEL.store(level as u8, Ordering::SeqCst);

    if let Some(dir) = dirs::home_dir().map(|h| h.join(".taskrank")) {
        if std::fs::create_dir_all(&dir).is_ok() {
            LOG_PATH.set(dir.join("taskrank.log")).ok();
        }
    }
}

/// Whether a message at `level` passes the current threshold.
pub fn enabled(level: LogLevel) -> bool {
    level as u8 <= MAX_LEVEL.load(Ordering::Relaxed)
}

fn format_line(level: LogLevel, msg: &str) -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    format!("[{}] [{:<5}] {}", timestamp, level, msg)
}

/// Append one line to the log file. Dropped before init or below threshold.
pub fn log_at(level: LogLevel, msg: &str) {
    if !enabled(level) {
        return;
    }
    let Some(path) = LOG_PATH.get() else {
        return;
    };
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = writeln!(file, "{}", format_line(level, msg));
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __tlog_at {
    ($level:expr, $($arg:tt)*) => {
        if $crate::log::enabled($level) {
            $crate::log::log_at($level, &format!($($arg)*))
        }
    };
}

/// Log at INFO.
#[macro_export]
macro_rules! tlog {
    ($($arg:tt)*) => { $crate::__tlog_at!($crate::log::LogLevel::Info, $($arg)*) };
}

#[macro_export]
macro_rules! tlog_error {
    ($($arg:tt)*) => { $crate::__tlog_at!($crate::log::LogLevel::Error, $($arg)*) };
}

#[macro_export]
macro_rules! tlog_warn {
    ($($arg:tt)*) => { $crate::__tlog_at!($crate::log::LogLevel::Warn, $($arg)*) };
}

/// Log at DEBUG; formatting is skipped unless debug mode is on.
#[macro_export]
macro_rules! tlog_debug {
    ($($arg:tt)*) => { $crate::__tlog_at!($crate::log::LogLevel::Debug, $($arg)*) };
}

#[macro_export]
macro_rules! tlog_trace {
    ($($arg:tt)*) => { $crate::__tlog_at!($crate::log::LogLevel::Trace, $($arg)*) };
}
