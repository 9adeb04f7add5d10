//! The run logger: one log file per run, mirrored to the console

use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{LoggerError, LoggerResult};
use crate::record::{Level, LogValue, TestStatus};

/// Width of the `=` banner framing a test's log output.
const BANNER_WIDTH: usize = 80;

/// Conventional log directory, relative to the working directory.
const DEFAULT_LOG_DIR: &str = "logs";

/// Output sinks, serialized behind one lock so records land in the file in
/// exact call order.
struct Sinks {
    file: Box<dyn Write + Send>,
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
}

/// Leveled test-run logger.
///
/// Constructed once per run and passed by reference to every component
/// that narrates. The log file is opened in append mode at construction
/// and the handle is held, buffered, for the logger's lifetime; each
/// record is flushed as it is written.
///
/// Emission never fails the caller. Construction is the only fallible
/// operation: if the log directory cannot be created or the file cannot
/// be opened there is no fallback, and the error propagates.
pub struct RunLogger {
    path: PathBuf,
    sinks: Mutex<Sinks>,
}

impl RunLogger {
    /// Create a logger writing under `logs/` in the current working
    /// directory.
    pub fn create_in_cwd() -> LoggerResult<Self> {
        Self::create(DEFAULT_LOG_DIR)
    }

    /// Create a logger writing a fresh run file under `dir`.
    ///
    /// The directory is created if absent; an existing directory is
    /// reused as-is, including when another process creates it
    /// concurrently. The file name embeds the construction timestamp
    /// (filesystem-safe ISO-8601) and the process id, so two workers
    /// started in the same millisecond get distinct files.
    pub fn create(dir: impl AsRef<Path>) -> LoggerResult<Self> {
        Self::with_console(dir.as_ref(), Box::new(std::io::stdout()), Box::new(std::io::stderr()))
    }

    /// Like [`RunLogger::create`], but with caller-supplied console
    /// streams. Tests use this to capture stdout/stderr separately.
    pub fn with_console(
        dir: &Path,
        out: Box<dyn Write + Send>,
        err: Box<dyn Write + Send>,
    ) -> LoggerResult<Self> {
        std::fs::create_dir_all(dir).map_err(|source| LoggerError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let stamp = Utc::now()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
            .replace([':', '.'], "-");
        let path = dir.join(format!("test-{}-{}.log", stamp, std::process::id()));

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LoggerError::OpenLogFile {
                path: path.clone(),
                source,
            })?;

        Ok(Self::with_sinks(path, Box::new(BufWriter::new(file)), out, err))
    }

    /// Fully sink-injected constructor. No filesystem work happens here;
    /// `path` is only reported back from [`RunLogger::path`].
    pub fn with_sinks(
        path: PathBuf,
        file: Box<dyn Write + Send>,
        out: Box<dyn Write + Send>,
        err: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            path,
            sinks: Mutex::new(Sinks { file, out, err }),
        }
    }

    /// Path of this run's log file, fixed at construction.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message, &[]);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message, &[]);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, message, &[]);
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, message, &[]);
    }

    pub fn debug_with(&self, message: &str, args: &[LogValue]) {
        self.log(Level::Debug, message, args);
    }

    pub fn info_with(&self, message: &str, args: &[LogValue]) {
        self.log(Level::Info, message, args);
    }

    pub fn warn_with(&self, message: &str, args: &[LogValue]) {
        self.log(Level::Warn, message, args);
    }

    pub fn error_with(&self, message: &str, args: &[LogValue]) {
        self.log(Level::Error, message, args);
    }

    /// Narrate one numbered phase of a scenario: `STEP <n>: <description>`.
    pub fn step(&self, step_number: u32, description: &str) {
        self.info(&format!("STEP {}: {}", step_number, description));
    }

    /// Open a test's banner: separator, `TEST STARTED: <name>`, separator.
    pub fn test_start(&self, test_name: &str) {
        let banner = "=".repeat(BANNER_WIDTH);
        self.info(&banner);
        self.info(&format!("TEST STARTED: {}", test_name));
        self.info(&banner);
    }

    /// Close a test's banner with its outcome.
    pub fn test_end(&self, test_name: &str, status: TestStatus) {
        let banner = "=".repeat(BANNER_WIDTH);
        self.info(&banner);
        self.info(&format!("TEST {}: {}", status, test_name));
        self.info(&banner);
    }

    /// Format and emit one record to the console and the file.
    ///
    /// The console write goes first, so a record still surfaces when the
    /// file append fails. An append failure is reported on the error
    /// stream and swallowed; the run never aborts because of logging.
    fn log(&self, level: Level, message: &str, args: &[LogValue]) {
        let line = format_line(level, message, args);

        let mut guard = self.sinks.lock();
        let Sinks { file, out, err } = &mut *guard;

        {
            let console: &mut dyn Write = if level.is_error_stream() {
                err.as_mut()
            } else {
                out.as_mut()
            };
            let _ = writeln!(console, "{}", level.paint(&line));
            let _ = console.flush();
        }

        if let Err(e) = writeln!(file, "{}", line).and_then(|()| file.flush()) {
            let _ = writeln!(err, "Failed to write to log file: {}", e);
        }
    }
}

/// Build the uncolored record line:
/// `[<ISO-8601>] [<LEVEL>] <message>[ <JSON args>]`
fn format_line(level: Level, message: &str, args: &[LogValue]) -> String {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let mut line = format!("[{}] [{}] {}", timestamp, level, message);
    if !args.is_empty() {
        if let Ok(json) = serde_json::to_string(args) {
            line.push(' ');
            line.push_str(&json);
        }
    }
    line
}
