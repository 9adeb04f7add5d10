//! Record vocabulary: severity levels, structured extra values, test status

use colored::{ColoredString, Colorize};
use serde::Serialize;
use std::fmt;

/// Severity of a log record.
///
/// Fixed four-level enumeration; there is no filtering, every level is
/// always emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    /// Whether records at this level go to the console's error stream.
    pub fn is_error_stream(&self) -> bool {
        matches!(self, Level::Warn | Level::Error)
    }

    /// Apply this level's console color to a formatted line.
    pub fn paint(&self, line: &str) -> ColoredString {
        match self {
            Level::Debug => line.cyan(),
            Level::Info => line.green(),
            Level::Warn => line.yellow(),
            Level::Error => line.red(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured extra value attached to a record.
///
/// Rendered as a JSON array appended to the message, e.g.
/// `[INFO] cart updated ["sauce-labs-backpack",2,true]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LogValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<&str> for LogValue {
    fn from(v: &str) -> Self {
        LogValue::Text(v.to_string())
    }
}

impl From<String> for LogValue {
    fn from(v: String) -> Self {
        LogValue::Text(v)
    }
}

impl From<i64> for LogValue {
    fn from(v: i64) -> Self {
        LogValue::Int(v)
    }
}

impl From<f64> for LogValue {
    fn from(v: f64) -> Self {
        LogValue::Float(v)
    }
}

impl From<bool> for LogValue {
    fn from(v: bool) -> Self {
        LogValue::Bool(v)
    }
}

/// Outcome of a test, used by [`crate::RunLogger::test_end`] banners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestStatus {
    Passed,
    Failed,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Passed => "PASSED",
            TestStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
