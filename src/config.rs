//! Run configuration.
//!
//! Built exactly once from the CLI and environment at process start, then
//! passed by reference into the browser facade and the runner. There is no
//! ambient global state; everything downstream reads from this struct.

use std::path::PathBuf;
use std::time::Duration;

/// Default base URL when neither `--url` nor `BASE_URL` is given.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default per-invocation timeout for automation commands.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default directory for screenshots (diagnostic and explicit).
pub const DEFAULT_SCREENSHOT_DIR: &str = "./e2e-screenshots";

/// Immutable configuration for a test run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL that scheme-less `open()` targets are concatenated onto.
    pub base_url: String,

    /// Show the browser window (`--headed` appended to every command).
    pub headed: bool,

    /// Parallel execution was requested. Accepted and stored but never
    /// consulted by the scheduler; execution is sequential regardless.
    pub parallel: bool,

    /// Case-insensitive substring filter on case names.
    pub filter: Option<String>,

    /// Timeout applied to each single automation command.
    pub timeout: Duration,

    /// Directory screenshots are written into.
    pub screenshot_dir: PathBuf,
}

impl Config {
    /// Creates a configuration with defaults for everything but the base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            headed: false,
            parallel: false,
            filter: None,
            timeout: DEFAULT_TIMEOUT,
            screenshot_dir: PathBuf::from(DEFAULT_SCREENSHOT_DIR),
        }
    }

    /// Sets headed mode.
    pub fn headed(mut self, headed: bool) -> Self {
        self.headed = headed;
        self
    }

    /// Sets the filter pattern.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Sets the per-command timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the screenshot directory.
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_source_runner() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(!config.headed);
        assert!(!config.parallel);
        assert!(config.filter.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.screenshot_dir, PathBuf::from("./e2e-screenshots"));
    }

    #[test]
    fn builder_methods_set_fields() {
        let config = Config::new("http://example.com")
            .headed(true)
            .with_filter("login")
            .with_timeout(Duration::from_secs(5))
            .with_screenshot_dir("/tmp/shots");

        assert_eq!(config.base_url, "http://example.com");
        assert!(config.headed);
        assert_eq!(config.filter.as_deref(), Some("login"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.screenshot_dir, PathBuf::from("/tmp/shots"));
    }
}
