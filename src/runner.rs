//! Test execution engine.
//!
//! [`TestRunner`] drives the selected cases strictly sequentially. For each
//! case it clears browser session state, executes the body, and records the
//! outcome; a failing case gets one best-effort diagnostic screenshot and the
//! suite always proceeds to the next case. After the last selected case the
//! browser is closed exactly once, regardless of outcomes — including when
//! the filter selects nothing.
//!
//! # Example
//!
//! ```no_run
//! use browser_e2e::{Browser, Config, TestRunner, all_cases};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::default();
//!     let browser = Browser::new(&config);
//!     let runner = TestRunner::new(browser, all_cases());
//!     let results = runner.run(&config).await.unwrap();
//!     println!("Passed: {}", results.passed_count());
//! }
//! ```

use crate::browser::Browser;
use crate::cases::TestCase;
use crate::config::Config;
use crate::error::EngineError;
use std::time::{Duration, Instant};

/// A failed case: its name and the failure message, captured verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedCase {
    pub name: String,
    pub error: String,
}

/// Aggregated outcomes of a run.
///
/// Append-only during the run, with the engine as sole writer; the reporter
/// reads it once afterwards. Every selected case lands in exactly one of the
/// three lists.
#[derive(Debug, Clone, Default)]
pub struct RunResults {
    /// Names of cases that completed without raising.
    pub passed: Vec<String>,

    /// Cases that raised, with their failure messages.
    pub failed: Vec<FailedCase>,

    /// Skipped cases. Present in the model but currently never populated:
    /// filtering removes cases before scheduling, so filtered-out cases
    /// vanish from the tally entirely.
    pub skipped: Vec<String>,

    /// Wall-clock duration of the whole run.
    pub duration: Duration,
}

impl RunResults {
    /// Number of passed cases.
    pub fn passed_count(&self) -> usize {
        self.passed.len()
    }

    /// Number of failed cases.
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Total number of recorded cases.
    pub fn total_count(&self) -> usize {
        self.passed.len() + self.failed.len() + self.skipped.len()
    }

    /// True when no case failed.
    pub fn all_passed(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Progress callback for run updates.
pub type ProgressCallback = Box<dyn Fn(ProgressEvent) + Send + Sync>;

/// Events emitted as the run advances.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// The run has started with the post-filter case count. `filtered` is
    /// true when a name filter narrowed the selection.
    RunStarted { selected: usize, filtered: bool },

    /// A case is about to execute.
    CaseStarted { name: String },

    /// A case completed without raising.
    CasePassed { name: String },

    /// A case raised; `error` is the verbatim failure message.
    CaseFailed { name: String, error: String },
}

/// Runs test cases sequentially with per-case session isolation.
pub struct TestRunner {
    browser: Browser,
    cases: Vec<Box<dyn TestCase>>,
    on_progress: Option<ProgressCallback>,
}

impl TestRunner {
    /// Creates a runner over the given facade and case registry.
    pub fn new(browser: Browser, cases: Vec<Box<dyn TestCase>>) -> Self {
        Self {
            browser,
            cases,
            on_progress: None,
        }
    }

    /// Sets a callback for progress updates.
    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    /// Number of registered cases, before filtering.
    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    /// Returns the cases selected by the filter, in registration order.
    ///
    /// Selection is a pure case-insensitive substring match on the case name;
    /// without a filter every case is selected.
    pub fn selected(&self, filter: Option<&str>) -> Vec<&dyn TestCase> {
        self.cases
            .iter()
            .filter(|case| match filter {
                Some(pattern) => case
                    .name()
                    .to_lowercase()
                    .contains(&pattern.to_lowercase()),
                None => true,
            })
            .map(|case| case.as_ref())
            .collect()
    }

    /// Runs all selected cases and returns the aggregated results.
    ///
    /// The screenshot directory is created (with parents, idempotently)
    /// before the first case; a creation failure aborts the whole run.
    pub async fn run(&self, config: &Config) -> Result<RunResults, EngineError> {
        let start = Instant::now();

        std::fs::create_dir_all(&config.screenshot_dir).map_err(|source| {
            EngineError::ScreenshotDir {
                path: config.screenshot_dir.clone(),
                source,
            }
        })?;

        let selected = self.selected(config.filter.as_deref());
        self.emit(ProgressEvent::RunStarted {
            selected: selected.len(),
            filtered: config.filter.is_some(),
        });

        let mut results = RunResults::default();

        for case in selected {
            let name = case.name().to_string();
            self.emit(ProgressEvent::CaseStarted { name: name.clone() });

            // Isolation: every case starts from clean cookie/storage state.
            self.browser.clear_session().await;

            match case.run(&self.browser).await {
                Ok(()) => {
                    results.passed.push(name.clone());
                    self.emit(ProgressEvent::CasePassed { name });
                }
                Err(err) => {
                    let error = err.to_string();
                    results.failed.push(FailedCase {
                        name: name.clone(),
                        error: error.clone(),
                    });
                    self.emit(ProgressEvent::CaseFailed {
                        name: name.clone(),
                        error,
                    });
                    self.capture_failure_screenshot(&name).await;
                }
            }
        }

        // One final close, even when zero cases were selected.
        self.browser.close().await;

        results.duration = start.elapsed();
        Ok(results)
    }

    /// Attempts one diagnostic screenshot for a failed case. A failure here
    /// is discarded so it can never mask the original test failure.
    async fn capture_failure_screenshot(&self, case_name: &str) {
        let filename = format!(
            "{}_{}.png",
            sanitize_artifact_name(case_name),
            chrono::Utc::now().timestamp_millis()
        );
        self.browser.screenshot(&filename).await.ok();
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(callback) = &self.on_progress {
            callback(event);
        }
    }
}

/// Maps a case name onto a filesystem-safe artifact seed: every
/// non-alphanumeric character becomes an underscore.
fn sanitize_artifact_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
