//! Suite runner: executes scenarios and API checks, narrates through the
//! run logger, and writes the machine-readable report.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use shopcheck_logger::{RunLogger, TestStatus};

use crate::api::{ApiCase, ApiClient};
use crate::browser::{BrowserConfig, ScriptRunner, StepResult};
use crate::error::SuiteResult;
use crate::scenario::Scenario;

/// Result of running a single scenario or API case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub success: bool,
    pub duration_ms: u64,
    pub steps: Vec<StepResult>,
    pub error: Option<String>,
}

/// Result of a whole run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<ScenarioResult>,
}

impl SuiteReport {
    pub fn from_results(results: Vec<ScenarioResult>, duration_ms: u64) -> Self {
        let passed = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            duration_ms,
            results,
        }
    }

    /// Fold another report into this one (browser and API runs share one file)
    pub fn merge(mut self, other: SuiteReport) -> Self {
        self.total += other.total;
        self.passed += other.passed;
        self.failed += other.failed;
        self.duration_ms += other.duration_ms;
        self.results.extend(other.results);
        self
    }
}

/// Orchestrates a run over browser scenarios and API checks
pub struct SuiteRunner {
    browser_config: BrowserConfig,
    output_dir: PathBuf,
    logger: Arc<RunLogger>,
}

impl SuiteRunner {
    pub fn new(browser_config: BrowserConfig, output_dir: PathBuf, logger: Arc<RunLogger>) -> Self {
        Self {
            browser_config,
            output_dir,
            logger,
        }
    }

    /// Run browser scenarios in order, one result each.
    ///
    /// A scenario failure (or a script-level error) marks that scenario
    /// failed and the run continues with the next one.
    pub async fn run_scenarios(&self, scenarios: &[Scenario]) -> SuiteResult<SuiteReport> {
        let script_runner = ScriptRunner::new(self.browser_config.clone())?;
        let start = Instant::now();

        self.logger
            .info(&format!("Running {} browser scenario(s)", scenarios.len()));

        let mut results = Vec::new();
        for scenario in scenarios {
            let result = self.run_scenario(&script_runner, scenario).await;
            results.push(result);
        }

        let report = SuiteReport::from_results(results, start.elapsed().as_millis() as u64);
        self.log_summary(&report);
        Ok(report)
    }

    async fn run_scenario(&self, script_runner: &ScriptRunner, scenario: &Scenario) -> ScenarioResult {
        debug!("Running scenario: {}", scenario.name);
        self.logger.test_start(&scenario.name);
        if !scenario.description.is_empty() {
            self.logger.debug(&scenario.description);
        }

        let start = Instant::now();
        let (steps, error) = match script_runner.run(scenario).await {
            Ok(steps) => {
                for (i, step) in steps.iter().enumerate() {
                    self.logger.step((i + 1) as u32, &step.step);
                    if let Some(reason) = &step.error {
                        self.logger.error(&format!("Step failed: {}", reason));
                    }
                }
                let error = steps
                    .iter()
                    .find(|s| !s.success)
                    .map(|s| s.error.clone().unwrap_or_else(|| "step failed".to_string()));
                (steps, error)
            }
            Err(e) => {
                self.logger.error(&format!("Scenario aborted: {}", e));
                (Vec::new(), Some(e.to_string()))
            }
        };

        let success = error.is_none();
        let status = if success { TestStatus::Passed } else { TestStatus::Failed };
        self.logger.test_end(&scenario.name, status);

        ScenarioResult {
            name: scenario.name.clone(),
            success,
            duration_ms: start.elapsed().as_millis() as u64,
            steps,
            error,
        }
    }

    /// Run the API checks in order, narrating like the browser scenarios
    pub async fn run_api_cases(&self, client: &ApiClient, cases: &[ApiCase]) -> SuiteReport {
        let start = Instant::now();

        self.logger
            .info(&format!("Running {} API check(s)", cases.len()));

        let mut results = Vec::new();
        for case in cases {
            let name = case.name();
            debug!("Running API case: {}", name);
            self.logger.test_start(&name);

            let case_start = Instant::now();
            let error = match case.execute(client, &self.logger).await {
                Ok(()) => None,
                Err(e) => {
                    self.logger.error(&format!("API check failed: {}", e));
                    Some(e.to_string())
                }
            };

            let success = error.is_none();
            let status = if success { TestStatus::Passed } else { TestStatus::Failed };
            self.logger.test_end(&name, status);

            results.push(ScenarioResult {
                name,
                success,
                duration_ms: case_start.elapsed().as_millis() as u64,
                steps: Vec::new(),
                error,
            });
        }

        let report = SuiteReport::from_results(results, start.elapsed().as_millis() as u64);
        self.log_summary(&report);
        report
    }

    fn log_summary(&self, report: &SuiteReport) {
        let line = format!(
            "Results: {} passed, {} failed ({} ms)",
            report.passed, report.failed, report.duration_ms
        );
        if report.failed > 0 {
            self.logger.warn(&line);
        } else {
            self.logger.info(&line);
        }
    }

    /// Write the report to `<output_dir>/test-results.json`
    pub fn write_report(&self, report: &SuiteReport) -> SuiteResult<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&path, json)?;

        info!("Report written to: {}", path.display());
        Ok(path)
    }
}
