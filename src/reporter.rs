//! Result reporting.
//!
//! Two surfaces: colored terminal output (live `[PASS]`/`[FAIL]` lines via a
//! progress callback, plus the end-of-run summary) and an optional JSON
//! report for machine consumption. The reporter also owns the exit-code
//! contract: zero iff no case failed.

use crate::runner::{ProgressCallback, ProgressEvent, RunResults};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

/// Output verbosity for the terminal surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Only the final summary.
    Quiet,
    /// Live per-case lines plus the summary.
    #[default]
    Normal,
}

/// Renders run progress and the final summary to the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalReporter {
    verbosity: Verbosity,
}

impl TerminalReporter {
    /// Creates a reporter with the given verbosity.
    pub fn with_verbosity(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Prints the run banner.
    pub fn print_header(&self, base_url: &str, headed: bool) {
        if self.verbosity == Verbosity::Quiet {
            return;
        }
        println!("{}", "━".repeat(40).dimmed());
        println!("{}", "E2E Test Runner".bold());
        println!("Base URL: {base_url}");
        println!("Headed: {headed}");
        println!("{}", "━".repeat(40).dimmed());
    }

    /// Prints duration, counts, and the failure table.
    pub fn print_summary(&self, results: &RunResults) {
        println!("\n{}", "━".repeat(40).dimmed());
        println!("{}", "Results".bold());
        println!("{}", "━".repeat(40).dimmed());
        println!("Duration: {}s", format_duration(results.duration));
        println!("Passed: {}", results.passed_count());
        println!("Failed: {}", results.failed_count());

        if !results.failed.is_empty() {
            println!("\n{}", "Failed tests:".red().bold());
            for failure in &results.failed {
                println!("  - {}: {}", failure.name, failure.error);
            }
        }
    }

    /// Process exit status for these results: `0` iff no case failed.
    pub fn exit_code(&self, results: &RunResults) -> i32 {
        i32::from(!results.all_passed())
    }

    /// Returns a progress callback printing live per-case lines.
    pub fn progress_printer(&self) -> ProgressCallback {
        let verbosity = self.verbosity;
        Box::new(move |event| {
            if verbosity == Verbosity::Quiet {
                return;
            }
            match event {
                ProgressEvent::RunStarted { selected, filtered } => {
                    if filtered {
                        log_line(LogLevel::Info, &format!("Filtered to {selected} tests"));
                    }
                }
                ProgressEvent::CaseStarted { name } => {
                    log_line(LogLevel::Info, &format!("Running: {name}"));
                }
                ProgressEvent::CasePassed { name } => {
                    log_line(LogLevel::Pass, &name);
                }
                ProgressEvent::CaseFailed { name, error } => {
                    log_line(LogLevel::Fail, &format!("{name}: {error}"));
                }
            }
        })
    }
}

/// Log levels of the terminal surface.
#[derive(Debug, Clone, Copy)]
pub enum LogLevel {
    Info,
    Pass,
    Fail,
    Warn,
}

/// Prints one colored, level-tagged line.
pub fn log_line(level: LogLevel, message: &str) {
    let tag = match level {
        LogLevel::Info => "[INFO]".cyan(),
        LogLevel::Pass => "[PASS]".green(),
        LogLevel::Fail => "[FAIL]".red(),
        LogLevel::Warn => "[WARN]".yellow(),
    };
    println!("{tag} {message}");
}

/// Formats a duration as seconds with two decimals.
pub fn format_duration(duration: Duration) -> String {
    format!("{:.2}", duration.as_secs_f64())
}

/// Machine-readable run report.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub duration_secs: String,
    pub passed: Vec<String>,
    pub failed: Vec<JsonFailure>,
    pub skipped: Vec<String>,
}

/// One failed case in the JSON report.
#[derive(Debug, Serialize)]
pub struct JsonFailure {
    pub name: String,
    pub error: String,
}

impl JsonReport {
    /// Builds a report from run results.
    pub fn from_results(results: &RunResults) -> Self {
        Self {
            duration_secs: format_duration(results.duration),
            passed: results.passed.clone(),
            failed: results
                .failed
                .iter()
                .map(|f| JsonFailure {
                    name: f.name.clone(),
                    error: f.error.clone(),
                })
                .collect(),
            skipped: results.skipped.clone(),
        }
    }

    /// Writes the report as pretty-printed JSON.
    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::FailedCase;

    fn sample_results() -> RunResults {
        RunResults {
            passed: vec!["homepage loads".to_string()],
            failed: vec![FailedCase {
                name: "navigation".to_string(),
                error: "Expected URL to contain \"about\", got \"/\"".to_string(),
            }],
            skipped: vec![],
            duration: Duration::from_millis(1234),
        }
    }

    #[test]
    fn exit_code_zero_iff_no_failures() {
        let reporter = TerminalReporter::default();
        let mut results = sample_results();
        assert_eq!(reporter.exit_code(&results), 1);

        results.failed.clear();
        assert_eq!(reporter.exit_code(&results), 0);

        // Zero selected cases is still a success.
        let empty = RunResults::default();
        assert_eq!(reporter.exit_code(&empty), 0);
    }

    #[test]
    fn duration_has_two_decimal_places() {
        assert_eq!(format_duration(Duration::from_millis(1234)), "1.23");
        assert_eq!(format_duration(Duration::from_secs(0)), "0.00");
        assert_eq!(format_duration(Duration::from_millis(10_500)), "10.50");
    }

    #[test]
    fn json_report_mirrors_results() {
        let report = JsonReport::from_results(&sample_results());
        assert_eq!(report.duration_secs, "1.23");
        assert_eq!(report.passed, vec!["homepage loads"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].name, "navigation");
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn json_report_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        JsonReport::from_results(&sample_results()).write(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["passed"][0], "homepage loads");
        assert_eq!(
            value["failed"][0]["error"],
            "Expected URL to contain \"about\", got \"/\""
        );
    }
}
