//! Error types for the E2E suite

use thiserror::Error;

/// Result type alias using [`SuiteError`]
pub type SuiteResult<T> = std::result::Result<T, SuiteError>;

#[derive(Error, Debug)]
pub enum SuiteError {
    #[error("Playwright not found. Install with: npm i playwright && npx playwright install")]
    PlaywrightNotFound,

    #[error("Browser script failed: {0}")]
    Script(String),

    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),

    #[error("API check failed: {0}")]
    ApiCheck(String),

    #[error("Logger error: {0}")]
    Logger(#[from] shopcheck_logger::LoggerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
