//! Behavioral tests for the run logger: file layout, line format,
//! ordering, console routing, and failure handling.

use regex::Regex;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use shopcheck_logger::{LogValue, LoggerError, RunLogger, TestStatus};

/// A cloneable in-memory sink so a test can keep reading what the logger
/// wrote after handing the writer over.
#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A sink that refuses every write, simulating a full disk.
struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
    }
}

fn quiet_logger(dir: &std::path::Path) -> (RunLogger, SharedBuf, SharedBuf) {
    let out = SharedBuf::default();
    let err = SharedBuf::default();
    let logger = RunLogger::with_console(dir, Box::new(out.clone()), Box::new(err.clone()))
        .expect("logger construction");
    (logger, out, err)
}

fn log_lines(logger: &RunLogger) -> Vec<String> {
    let text = std::fs::read_to_string(logger.path()).expect("read log file");
    text.lines().map(str::to_string).collect()
}

#[test]
fn creates_directory_and_run_file() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("logs");
    let (logger, _out, _err) = quiet_logger(&dir);

    assert!(dir.is_dir());
    let name = logger.path().file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("test-"), "unexpected file name: {}", name);
    assert!(name.ends_with(".log"));
    assert!(
        name.contains(&std::process::id().to_string()),
        "file name should carry the process id: {}",
        name
    );
    // Timestamp segment must not contain characters unsafe for file names.
    assert!(!name.contains(':'));
}

#[test]
fn directory_creation_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("logs");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("earlier-run.log"), "kept\n").unwrap();

    let (logger, _out, _err) = quiet_logger(&dir);
    logger.info("fresh run");

    // Existing files in the directory are untouched.
    assert_eq!(std::fs::read_to_string(dir.join("earlier-run.log")).unwrap(), "kept\n");
}

#[test]
fn construction_fails_when_directory_is_a_file() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("logs");
    std::fs::write(&blocker, "not a directory").unwrap();

    let result = RunLogger::create(&blocker);
    assert!(matches!(result, Err(LoggerError::CreateDir { .. })));
}

#[test]
fn records_keep_call_order_with_trailing_newlines() {
    let tmp = tempfile::tempdir().unwrap();
    let (logger, _out, _err) = quiet_logger(tmp.path());

    logger.info("A");
    logger.info("B");
    logger.warn("C");

    let text = std::fs::read_to_string(logger.path()).unwrap();
    assert!(text.ends_with('\n'));

    let lines = log_lines(&logger);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("] [INFO] A"));
    assert!(lines[1].ends_with("] [INFO] B"));
    assert!(lines[2].ends_with("] [WARN] C"));
}

#[test]
fn line_format_carries_parseable_timestamp() {
    let tmp = tempfile::tempdir().unwrap();
    let (logger, _out, _err) = quiet_logger(tmp.path());

    logger.error("request failed");

    let lines = log_lines(&logger);
    let pattern = Regex::new(r"^\[(?P<ts>[^\]]+)\] \[ERROR\] request failed$").unwrap();
    let caps = pattern.captures(&lines[0]).expect("line should match format");
    chrono::DateTime::parse_from_rfc3339(&caps["ts"]).expect("timestamp should be ISO-8601");
}

#[test]
fn extra_args_render_as_json_suffix() {
    let tmp = tempfile::tempdir().unwrap();
    let (logger, _out, _err) = quiet_logger(tmp.path());

    logger.info_with(
        "Cart updated",
        &[LogValue::from("sauce-labs-backpack"), LogValue::from(2_i64), LogValue::from(true)],
    );

    let lines = log_lines(&logger);
    assert!(lines[0].ends_with(r#"Cart updated ["sauce-labs-backpack",2,true]"#));
}

#[test]
fn severity_routes_to_the_right_console_stream() {
    let tmp = tempfile::tempdir().unwrap();
    let (logger, out, err) = quiet_logger(tmp.path());

    logger.debug("d-record");
    logger.info("i-record");
    logger.warn("w-record");
    logger.error("e-record");

    let out_text = out.contents();
    let err_text = err.contents();

    assert!(out_text.contains("d-record"));
    assert!(out_text.contains("i-record"));
    assert!(!out_text.contains("w-record"));
    assert!(!out_text.contains("e-record"));

    assert!(err_text.contains("w-record"));
    assert!(err_text.contains("e-record"));
    assert!(!err_text.contains("d-record"));
    assert!(!err_text.contains("i-record"));
}

#[test]
fn step_formats_the_message_segment() {
    let tmp = tempfile::tempdir().unwrap();
    let (logger, _out, _err) = quiet_logger(tmp.path());

    logger.step(2, "Click button");

    let lines = log_lines(&logger);
    assert!(lines[0].ends_with("] [INFO] STEP 2: Click button"));
}

#[test]
fn test_banners_frame_with_separators() {
    let tmp = tempfile::tempdir().unwrap();
    let (logger, _out, _err) = quiet_logger(tmp.path());

    logger.test_start("X");
    logger.test_end("X", TestStatus::Passed);

    let lines = log_lines(&logger);
    assert_eq!(lines.len(), 6);

    let separator = "=".repeat(80);
    assert!(lines[0].ends_with(&separator));
    assert!(lines[1].ends_with("] [INFO] TEST STARTED: X"));
    assert!(lines[2].ends_with(&separator));
    assert!(lines[3].ends_with(&separator));
    assert!(lines[4].ends_with("] [INFO] TEST PASSED: X"));
    assert!(lines[5].ends_with(&separator));
}

#[test]
fn failed_status_appears_in_the_closing_banner() {
    let tmp = tempfile::tempdir().unwrap();
    let (logger, _out, _err) = quiet_logger(tmp.path());

    logger.test_end("TC004: Login with invalid username", TestStatus::Failed);

    let lines = log_lines(&logger);
    assert!(lines[1].ends_with("] [INFO] TEST FAILED: TC004: Login with invalid username"));
}

#[test]
fn file_write_failure_is_swallowed_and_reported() {
    let out = SharedBuf::default();
    let err = SharedBuf::default();
    let logger = RunLogger::with_sinks(
        PathBuf::from("unwritable.log"),
        Box::new(FailingWriter),
        Box::new(out.clone()),
        Box::new(err.clone()),
    );

    // Must return normally despite the file sink rejecting the append.
    logger.error("msg");
    logger.info("still alive");

    let err_text = err.contents();
    assert!(err_text.contains("msg"), "record should still reach the console");
    assert!(err_text.contains("Failed to write to log file"));
    assert!(out.contents().contains("still alive"));
}
