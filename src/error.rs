//! Error types for the harness.
//!
//! Three failure layers exist, each with a distinct consumer:
//!
//! - [`CommandError`]: the external `agent-browser` invocation failed.
//!   Propagates out of facade operations unless the call site is explicitly
//!   best-effort (`close`, `clear_session`, diagnostic screenshots).
//! - [`AssertionFailure`]: an expectation inside a test case was violated.
//!   Always propagates up to the runner, which records it.
//! - [`EngineError`]: the run loop itself failed before or outside any case.
//!   Terminates the whole run with exit status one.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single external automation command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The process could not be spawned at all (binary missing, permissions).
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran but exited non-zero.
    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The process did not complete within the invocation timeout.
    #[error("`{command}` timed out after {timeout:?}")]
    TimedOut { command: String, timeout: Duration },
}

/// A violated expectation inside a test case body.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AssertionFailure {
    /// Human-readable actual-vs-expected description.
    pub message: String,
}

impl AssertionFailure {
    /// Creates a failure with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Any error a test case body can surface to the runner.
///
/// The runner records `error.to_string()` verbatim as the case's failure
/// message, so both variants render without an added prefix.
#[derive(Debug, Error)]
pub enum CaseError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Assertion(#[from] AssertionFailure),
}

/// Failure of the run loop itself, outside any test case.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The screenshot directory could not be created before the run.
    #[error("failed to create screenshot directory {path}: {source}")]
    ScreenshotDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assertion_failure_displays_message_verbatim() {
        let err = AssertionFailure::new("Expected URL to contain \"about\", got \"/\"");
        assert_eq!(
            err.to_string(),
            "Expected URL to contain \"about\", got \"/\""
        );
    }

    #[test]
    fn case_error_is_transparent_over_assertion() {
        let err: CaseError = AssertionFailure::new("boom").into();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn timed_out_mentions_command_and_timeout() {
        let err = CommandError::TimedOut {
            command: "agent-browser url".to_string(),
            timeout: Duration::from_secs(30),
        };
        let msg = err.to_string();
        assert!(msg.contains("agent-browser url"));
        assert!(msg.contains("timed out"));
    }
}
