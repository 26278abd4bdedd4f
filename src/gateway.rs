//! Command gateway for the external `agent-browser` capability.
//!
//! Every automation action ultimately becomes one process spawn through this
//! module: a single invocation attempt, bounded by a timeout, returning the
//! trimmed textual output. There are no retries and no concurrent
//! invocations; callers await each command to completion.
//!
//! Error suppression is never implicit here. Best-effort operations (`close`,
//! session clearing, diagnostic screenshots) discard the `Err` variant at
//! their own call sites, keeping the suppression visible.
//!
//! # Example
//!
//! ```no_run
//! use browser_e2e::gateway::BrowserGateway;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let gateway = BrowserGateway::new(Duration::from_secs(30));
//!     let url = gateway.invoke(&["url"]).await.unwrap();
//!     println!("current url: {url}");
//! }
//! ```

use crate::error::CommandError;
use std::time::Duration;
use tokio::process::Command;

/// The automation CLI this harness drives.
pub const BROWSER_COMMAND: &str = "agent-browser";

/// Issues external automation commands and maps their raw outcomes.
#[derive(Debug, Clone)]
pub struct BrowserGateway {
    program: String,
    timeout: Duration,
}

impl BrowserGateway {
    /// Creates a gateway invoking `agent-browser` with the given per-command
    /// timeout.
    pub fn new(timeout: Duration) -> Self {
        Self {
            program: BROWSER_COMMAND.to_string(),
            timeout,
        }
    }

    /// Overrides the program to invoke.
    ///
    /// Tests use this to substitute benign binaries (`echo`, `false`) so
    /// command templates and failure paths can be exercised without
    /// `agent-browser` installed.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Returns the configured per-command timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs one automation command with the default timeout and returns its
    /// trimmed stdout.
    pub async fn invoke(&self, args: &[&str]) -> Result<String, CommandError> {
        self.invoke_with_timeout(args, self.timeout).await
    }

    /// Runs one automation command with an explicit timeout.
    ///
    /// Exactly one process is spawned per call. On timeout the child is
    /// killed (`kill_on_drop`) and a [`CommandError::TimedOut`] is returned.
    pub async fn invoke_with_timeout(
        &self,
        args: &[&str],
        timeout: Duration,
    ) -> Result<String, CommandError> {
        let rendered = self.render(args);
        tracing::debug!(command = %rendered, "invoking automation command");

        let output = Command::new(&self.program)
            .args(args)
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(timeout, output).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(CommandError::Spawn {
                    command: rendered,
                    source,
                });
            }
            Err(_) => {
                return Err(CommandError::TimedOut {
                    command: rendered,
                    timeout,
                });
            }
        };

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(CommandError::Failed {
                command: rendered,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    /// Renders the full command line for logs and error messages.
    fn render(&self, args: &[&str]) -> String {
        let mut rendered = self.program.clone();
        for arg in args {
            rendered.push(' ');
            rendered.push_str(arg);
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(program: &str) -> BrowserGateway {
        BrowserGateway::new(Duration::from_secs(5)).with_program(program)
    }

    #[tokio::test]
    async fn invoke_returns_trimmed_stdout() {
        let out = gateway("echo").invoke(&["open", "http://x/"]).await.unwrap();
        assert_eq!(out, "open http://x/");
    }

    #[tokio::test]
    async fn invoke_nonzero_exit_is_failed() {
        let err = gateway("false").invoke(&["click", "#a"]).await.unwrap_err();
        match err {
            CommandError::Failed { command, .. } => {
                assert_eq!(command, "false click #a");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invoke_missing_binary_is_spawn_error() {
        let err = gateway("definitely-not-a-real-binary-xyz")
            .invoke(&["url"])
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }

    #[tokio::test]
    async fn invoke_times_out() {
        let err = gateway("sleep")
            .invoke_with_timeout(&["5"], Duration::from_millis(50))
            .await
            .unwrap_err();
        match err {
            CommandError::TimedOut { timeout, .. } => {
                assert_eq!(timeout, Duration::from_millis(50));
            }
            other => panic!("expected TimedOut, got {other:?}"),
        }
    }

    #[test]
    fn render_joins_program_and_args() {
        let gateway = gateway("agent-browser");
        assert_eq!(
            gateway.render(&["fill", "#email", "a@b.c"]),
            "agent-browser fill #email a@b.c"
        );
    }
}
