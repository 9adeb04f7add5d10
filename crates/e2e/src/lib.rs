//! Shopcheck E2E Suite
//!
//! A Rust-controlled E2E suite that:
//! - Drives the Swag Labs demo storefront through Playwright via its
//!   Node CLI, one browser session per scenario
//! - Exercises the public restful-api.dev objects API over HTTP
//! - Narrates every run through the [`shopcheck_logger::RunLogger`],
//!   producing a per-run log file alongside the console output
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      SuiteRunner                            │
//! │    ├── run_scenarios(&[Scenario]) -> SuiteReport            │
//! │    ├── run_api_cases(&ApiClient, &[ApiCase]) -> SuiteReport │
//! │    └── write_report(report) -> test-results.json            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Scenario (built by page objects, or parsed from YAML)      │
//! │    └── steps: [TestStep]                                    │
//! │          ├── navigate { url }                               │
//! │          ├── fill { selector, value }                       │
//! │          ├── click { selector }                             │
//! │          ├── wait { selector, state, timeout_ms }           │
//! │          ├── assert { selector, visible?, text?, count? }   │
//! │          ├── assert_url / assert_title { contains }         │
//! │          └── screenshot { name }                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ScriptRunner: Scenario -> Playwright JS -> node -> results │
//! │  ApiClient: typed reqwest calls against /objects            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod browser;
pub mod data;
pub mod error;
pub mod pages;
pub mod runner;
pub mod scenario;
pub mod step;
pub mod suites;

pub use api::{ApiCase, ApiClient};
pub use browser::{BrowserConfig, BrowserKind, ScriptRunner};
pub use error::{SuiteError, SuiteResult};
pub use runner::{SuiteReport, SuiteRunner};
pub use scenario::{Scenario, ScenarioBuilder};
pub use step::TestStep;
