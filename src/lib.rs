//! # browser-e2e
//!
//! End-to-end test harness driving the external `agent-browser` automation
//! CLI through a sequence of declarative test cases, collecting pass/fail
//! outcomes, and producing a human-readable report with a CI-gatable exit
//! code.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  TestRunner │────▶│    Cases    │────▶│   Browser   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       │
//!        ▼                                       ▼
//! ┌─────────────┐                         ┌─────────────┐
//! │  Reporter   │                         │   Gateway   │
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! - `gateway`: spawns `agent-browser` commands with a timeout
//! - `browser`: fluent facade mapping intent onto command templates
//! - `assertions`: checks raising typed failures on violation
//! - `cases`: the `TestCase` trait and the built-in registry
//! - `runner`: sequential execution with per-case isolation
//! - `reporter`: terminal and JSON reporting, exit-code contract
//!
//! Cases run strictly sequentially: session state is cleared before every
//! body, no single failure aborts the suite, and the browser is closed
//! exactly once after the last selected case.

pub use crate::browser::{Browser, WaitCondition};
pub use crate::cases::{TestCase, all_cases};
pub use crate::config::Config;
pub use crate::error::{AssertionFailure, CaseError, CommandError, EngineError};
pub use crate::gateway::BrowserGateway;
pub use crate::reporter::{
    JsonFailure, JsonReport, LogLevel, TerminalReporter, Verbosity, format_duration, log_line,
};
pub use crate::runner::{FailedCase, ProgressCallback, ProgressEvent, RunResults, TestRunner};

pub mod assertions;
pub mod browser;
pub mod cases;
pub mod config;
pub mod error;
pub mod gateway;
pub mod reporter;
pub mod runner;

/// Library version, matching the crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
