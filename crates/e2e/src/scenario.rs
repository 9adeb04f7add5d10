//! Scenario definition and loading
//!
//! Built-in scenarios are assembled in Rust by the page objects; extra
//! scenarios can be declared in YAML files and loaded from a directory.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{SuiteError, SuiteResult};
use crate::step::TestStep;

/// A complete scenario: name, metadata, and the steps to execute in order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique name for this scenario
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Tags for filtering
    #[serde(default)]
    pub tags: Vec<String>,

    /// Browser viewport
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,

    /// Steps to execute in order
    pub steps: Vec<TestStep>,
}

fn default_viewport() -> Viewport {
    Viewport { width: 1280, height: 720 }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Scenario {
    /// Parse a scenario from a YAML string
    pub fn from_yaml(yaml: &str) -> SuiteResult<Self> {
        serde_yaml::from_str(yaml).map_err(SuiteError::from)
    }

    /// Parse a scenario from a YAML file
    pub fn from_file(path: &Path) -> SuiteResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load all scenarios from a directory (recursively, `.yaml`/`.yml`)
    pub fn load_all(dir: &Path) -> SuiteResult<Vec<Self>> {
        let mut scenarios = Vec::new();

        for entry in walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
        {
            debug!("Loading scenario file: {}", entry.path().display());
            let scenario = Self::from_file(entry.path())?;
            scenarios.push(scenario);
        }

        Ok(scenarios)
    }

    /// Whether this scenario carries a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Incremental scenario assembly, used by the page-object layer.
///
/// A page object method appends the steps for one high-level action; the
/// builder keeps them in the order the calls were made.
#[derive(Debug, Default)]
pub struct ScenarioBuilder {
    name: String,
    description: String,
    tags: Vec<String>,
    viewport: Option<Viewport>,
    steps: Vec<TestStep>,
}

impl ScenarioBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = Some(Viewport { width, height });
        self
    }

    pub fn push(&mut self, step: TestStep) -> &mut Self {
        self.steps.push(step);
        self
    }

    pub fn extend(&mut self, steps: impl IntoIterator<Item = TestStep>) -> &mut Self {
        self.steps.extend(steps);
        self
    }

    pub fn build(self) -> Scenario {
        Scenario {
            name: self.name,
            description: self.description,
            tags: self.tags,
            viewport: self.viewport.unwrap_or_else(default_viewport),
            steps: self.steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_scenario() {
        let yaml = r#"
name: login-smoke
description: Fill the login form and submit
tags:
  - auth
  - smoke
steps:
  - action: navigate
    url: /
    wait_for_selector: '.login_container'
  - action: fill
    selector: '#user-name'
    value: standard_user
  - action: fill
    selector: '#password'
    value: secret_sauce
  - action: click
    selector: '#login-button'
  - action: assert_url
    contains: /inventory.html
"#;
        let scenario = Scenario::from_yaml(yaml).unwrap();
        assert_eq!(scenario.name, "login-smoke");
        assert_eq!(scenario.steps.len(), 5);
        assert!(scenario.has_tag("smoke"));
        assert_eq!(scenario.viewport.width, 1280);
    }

    #[test]
    fn viewport_override_parses() {
        let yaml = r#"
name: wide-login
viewport:
  width: 1920
  height: 1080
steps:
  - action: navigate
    url: /
"#;
        let scenario = Scenario::from_yaml(yaml).unwrap();
        assert_eq!(scenario.viewport.width, 1920);
        assert_eq!(scenario.viewport.height, 1080);
    }

    #[test]
    fn builder_keeps_step_order() {
        let mut builder = ScenarioBuilder::new("ordering").tag("unit");
        builder.push(TestStep::Navigate { url: "/".into(), wait_for_selector: None });
        builder.push(TestStep::Click { selector: "#login-button".into(), timeout_ms: None });

        let scenario = builder.build();
        assert_eq!(scenario.steps.len(), 2);
        assert_eq!(scenario.steps[0].display_name(), "navigate:/");
        assert_eq!(scenario.steps[1].display_name(), "click:#login-button");
    }

    #[test]
    fn load_all_reads_yaml_files() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("one.yaml"),
            "name: one\nsteps:\n  - action: navigate\n    url: /\n",
        )
        .unwrap();
        std::fs::write(tmp.path().join("ignored.txt"), "not a scenario").unwrap();

        let scenarios = Scenario::load_all(tmp.path()).unwrap();
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].name, "one");
    }
}
