//! Playwright browser automation
//!
//! Scenarios are rendered to a Playwright JavaScript program, written to a
//! temp file, and executed with `node`. All steps of a scenario run in one
//! browser session, so page state (a login, a navigation) carries across
//! steps. The generated script prints one JSON verdict line per step; the
//! runner parses those back into [`StepResult`]s.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{SuiteError, SuiteResult};
use crate::scenario::Scenario;
use crate::step::TestStep;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BrowserKind {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl BrowserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserKind::Chromium => "chromium",
            BrowserKind::Firefox => "firefox",
            BrowserKind::Webkit => "webkit",
        }
    }
}

/// Configuration for browser script execution
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Base URL prefixed to every relative navigation
    pub base_url: String,

    /// Directory where screenshot steps write their files
    pub screenshot_dir: PathBuf,

    /// Browser engine
    pub browser: BrowserKind,

    /// Headless mode
    pub headless: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.saucedemo.com".to_string(),
            screenshot_dir: PathBuf::from("test-results/screenshots"),
            browser: BrowserKind::Chromium,
            headless: true,
        }
    }
}

/// Result of executing one step inside the generated script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub step: String,
    pub success: bool,
    pub duration_ms: u64,
    #[serde(default)]
    pub error: Option<String>,
}

/// Renders and executes scenario scripts
pub struct ScriptRunner {
    config: BrowserConfig,
}

impl ScriptRunner {
    pub fn new(config: BrowserConfig) -> SuiteResult<Self> {
        Self::check_playwright_installed()?;
        std::fs::create_dir_all(&config.screenshot_dir)?;
        Ok(Self { config })
    }

    /// Probe for a usable Playwright installation
    fn check_playwright_installed() -> SuiteResult<()> {
        let status = std::process::Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) if status.success() => Ok(()),
            _ => Err(SuiteError::PlaywrightNotFound),
        }
    }

    /// Execute a scenario, returning one result per executed step.
    ///
    /// The script stops at the first failing step; steps after it do not
    /// appear in the results.
    pub async fn run(&self, scenario: &Scenario) -> SuiteResult<Vec<StepResult>> {
        let script = self.build_script(scenario);

        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("scenario.js");
        std::fs::write(&script_path, &script)?;

        debug!("Running scenario script: {}", script_path.display());

        let output = Command::new("node").arg(&script_path).output().await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let results = parse_step_results(&stdout);

        let has_step_failure = results.iter().any(|r| !r.success);
        if !output.status.success() && !has_step_failure {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("Scenario script died outside a step: {}", stderr.trim());
            return Err(SuiteError::Script(format!(
                "script for '{}' failed before reporting a step: {}",
                scenario.name,
                stderr.trim()
            )));
        }

        Ok(results)
    }

    /// Render the full Playwright program for a scenario
    pub fn build_script(&self, scenario: &Scenario) -> String {
        let mut script = String::new();

        let _ = write!(
            script,
            r#"const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();
  const baseUrl = '{base_url}';

  async function runStep(name, fn) {{
    const start = Date.now();
    try {{
      await fn();
      console.log(JSON.stringify({{ step: name, success: true, duration_ms: Date.now() - start }}));
    }} catch (error) {{
      console.log(JSON.stringify({{ step: name, success: false, duration_ms: Date.now() - start, error: error.message }}));
      throw error;
    }}
  }}

  try {{
"#,
            browser = self.config.browser.as_str(),
            headless = self.config.headless,
            width = scenario.viewport.width,
            height = scenario.viewport.height,
            base_url = js_escape(&self.config.base_url),
        );

        for (i, step) in scenario.steps.iter().enumerate() {
            let name = step.display_name();
            let _ = write!(
                script,
                "\n    // Step {}: {}\n    await runStep('{}', async () => {{\n{}\n    }});\n",
                i + 1,
                name,
                js_escape(&name),
                self.step_to_js(step),
            );
        }

        script.push_str(
            r#"
    console.log(JSON.stringify({ success: true }));
  } catch (error) {
    console.error(JSON.stringify({ success: false, error: error.message }));
    process.exitCode = 1;
  } finally {
    await browser.close();
  }
})();
"#,
        );

        script
    }

    /// Convert a step to the statements inside its runStep closure
    fn step_to_js(&self, step: &TestStep) -> String {
        match step {
            TestStep::Navigate { url, wait_for_selector } => {
                let mut js = format!("      await page.goto(baseUrl + '{}');", js_escape(url));
                if let Some(selector) = wait_for_selector {
                    let _ = write!(js, "\n      await page.waitForSelector('{}');", js_escape(selector));
                }
                js
            }
            TestStep::Fill { selector, value, clear_first } => {
                let selector = js_escape(selector);
                let value = js_escape(value);
                if *clear_first {
                    format!(
                        "      await page.fill('{selector}', '');\n      await page.fill('{selector}', '{value}');"
                    )
                } else {
                    format!("      await page.fill('{selector}', '{value}');")
                }
            }
            TestStep::Click { selector, timeout_ms } => {
                let timeout = timeout_ms.unwrap_or(5000);
                format!(
                    "      await page.click('{}', {{ timeout: {} }});",
                    js_escape(selector),
                    timeout
                )
            }
            TestStep::Press { selector, key } => match selector {
                Some(selector) => format!(
                    "      await page.locator('{}').press('{}');",
                    js_escape(selector),
                    js_escape(key)
                ),
                None => format!("      await page.keyboard.press('{}');", js_escape(key)),
            },
            TestStep::Wait { selector, timeout_ms, state } => format!(
                "      await page.waitForSelector('{}', {{ state: '{}', timeout: {} }});",
                js_escape(selector),
                state.as_str(),
                timeout_ms
            ),
            TestStep::Sleep { ms } => format!("      await page.waitForTimeout({});", ms),
            TestStep::Assert { selector, visible, text, text_contains, value, count } => {
                let selector_js = js_escape(selector);
                let mut checks = Vec::new();

                if let Some(expected_visible) = visible {
                    if *expected_visible {
                        checks.push(format!(
                            "      if (!(await page.locator('{selector_js}').isVisible())) throw new Error('expected {selector_js} to be visible');"
                        ));
                    } else {
                        checks.push(format!(
                            "      if (await page.locator('{selector_js}').isVisible()) throw new Error('expected {selector_js} to be hidden');"
                        ));
                    }
                }

                if let Some(expected) = text {
                    let expected = js_escape(expected);
                    checks.push(format!(
                        "      const text = ((await page.locator('{selector_js}').textContent()) || '').trim();\n      if (text !== '{expected}') throw new Error('expected {selector_js} text \"' + text + '\" to equal \"{expected}\"');"
                    ));
                }

                if let Some(expected) = text_contains {
                    let expected = js_escape(expected);
                    checks.push(format!(
                        "      const snippet = (await page.locator('{selector_js}').textContent()) || '';\n      if (!snippet.includes('{expected}')) throw new Error('expected {selector_js} text \"' + snippet + '\" to contain \"{expected}\"');"
                    ));
                }

                if let Some(expected) = value {
                    let expected = js_escape(expected);
                    checks.push(format!(
                        "      const value = await page.locator('{selector_js}').inputValue();\n      if (value !== '{expected}') throw new Error('expected {selector_js} value \"' + value + '\" to equal \"{expected}\"');"
                    ));
                }

                if let Some(expected) = count {
                    checks.push(format!(
                        "      const count = await page.locator('{selector_js}').count();\n      if (count !== {expected}) throw new Error('expected {expected} matches for {selector_js}, found ' + count);"
                    ));
                }

                checks.join("\n")
            }
            TestStep::AssertUrl { contains } => {
                let contains = js_escape(contains);
                format!(
                    "      if (!page.url().includes('{contains}')) throw new Error('expected URL \"' + page.url() + '\" to contain \"{contains}\"');"
                )
            }
            TestStep::AssertTitle { contains } => {
                let contains = js_escape(contains);
                format!(
                    "      const title = await page.title();\n      if (!title.includes('{contains}')) throw new Error('expected title \"' + title + '\" to contain \"{contains}\"');"
                )
            }
            TestStep::Screenshot { name, full_page } => {
                let path = self.config.screenshot_dir.join(format!("{}.png", name));
                format!(
                    "      await page.screenshot({{ path: '{}', fullPage: {} }});",
                    js_escape(&path.to_string_lossy()),
                    full_page
                )
            }
        }
    }
}

/// Escape a string for embedding in a single-quoted JS literal
fn js_escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

/// Pull step verdict lines out of interleaved script output
fn parse_step_results(stdout: &str) -> Vec<StepResult> {
    let verdict = Regex::new(r"^\{.*\}$").unwrap();

    stdout
        .lines()
        .map(str::trim)
        .filter(|line| verdict.is_match(line))
        .filter_map(|line| serde_json::from_str::<StepResult>(line).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::ScenarioBuilder;

    fn runner() -> ScriptRunner {
        // Bypass the environment probe for rendering tests.
        ScriptRunner { config: BrowserConfig::default() }
    }

    fn login_scenario() -> Scenario {
        let mut builder = ScenarioBuilder::new("render-check");
        builder.push(TestStep::Navigate {
            url: "/".into(),
            wait_for_selector: Some(".login_container".into()),
        });
        builder.push(TestStep::Fill {
            selector: "#user-name".into(),
            value: "standard_user".into(),
            clear_first: false,
        });
        builder.push(TestStep::Click { selector: "#login-button".into(), timeout_ms: None });
        builder.push(TestStep::AssertUrl { contains: "/inventory.html".into() });
        builder.build()
    }

    #[test]
    fn script_opens_one_session_for_all_steps() {
        let script = runner().build_script(&login_scenario());

        assert_eq!(script.matches("newPage()").count(), 1);
        assert!(script.contains("const baseUrl = 'https://www.saucedemo.com';"));
        assert!(script.contains("viewport: { width: 1280, height: 720 }"));
        assert!(script.contains("await page.goto(baseUrl + '/');"));
        assert!(script.contains("await page.fill('#user-name', 'standard_user');"));
        assert!(script.contains("// Step 3: click:#login-button"));
        assert!(script.contains("page.url().includes('/inventory.html')"));
    }

    #[test]
    fn sql_injection_payload_is_escaped() {
        let mut builder = ScenarioBuilder::new("escaping");
        builder.push(TestStep::Fill {
            selector: "#user-name".into(),
            value: "' OR '1'='1".into(),
            clear_first: false,
        });
        let script = runner().build_script(&builder.build());

        assert!(script.contains(r"\' OR \'1\'=\'1"));
    }

    #[test]
    fn parses_step_verdict_lines_and_skips_noise() {
        let stdout = r#"
some page console.log noise
{"step":"navigate:/","success":true,"duration_ms":812}
{"step":"fill:#user-name","success":false,"duration_ms":40,"error":"timeout"}
{"success":false,"error":"timeout"}
not json either
"#;
        let results = parse_step_results(stdout);
        assert_eq!(results.len(), 2);
        assert!(results[0].success);
        assert_eq!(results[1].step, "fill:#user-name");
        assert_eq!(results[1].error.as_deref(), Some("timeout"));
    }

    #[test]
    fn assert_step_renders_explicit_checks() {
        let mut builder = ScenarioBuilder::new("asserts");
        builder.push(TestStep::Assert {
            selector: "[data-test=\"error\"]".into(),
            visible: Some(true),
            text: None,
            text_contains: Some("Epic sadface".into()),
            value: None,
            count: None,
        });
        let script = runner().build_script(&builder.build());

        assert!(script.contains("isVisible()"));
        assert!(script.contains("includes('Epic sadface')"));
    }
}
