//! Browser automation facade.
//!
//! [`Browser`] translates semantic test intent (open this page, fill that
//! field) into `agent-browser` command invocations through the gateway. Each
//! operation maps 1:1 onto a fixed argv template; headed mode appends
//! `--headed` to every command.
//!
//! Operations marked best-effort (`close`, `clear_session`) discard command
//! failures at their call sites — teardown must never block reporting.

use crate::config::Config;
use crate::error::CommandError;
use crate::gateway::BrowserGateway;
use std::path::PathBuf;

/// A wait condition for [`Browser::wait`].
///
/// The source runner dispatched on string prefixes (`"text:…"`, `"url:…"`);
/// here the variants are explicit and the prefix forms are kept as a
/// conversion so call sites stay terse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitCondition {
    /// Fixed delay in milliseconds.
    Duration(u64),
    /// Wait until the given text appears on the page.
    TextAppears(String),
    /// Wait until the current URL matches the given pattern.
    UrlMatches(String),
    /// Raw condition expression passed through to the automation CLI.
    Raw(String),
}

impl WaitCondition {
    /// Renders the condition as `wait` subcommand arguments.
    pub fn to_args(&self) -> Vec<String> {
        match self {
            WaitCondition::Duration(ms) => vec!["wait".into(), ms.to_string()],
            WaitCondition::TextAppears(text) => {
                vec!["wait".into(), "text".into(), text.clone()]
            }
            WaitCondition::UrlMatches(pattern) => {
                vec!["wait".into(), "url".into(), pattern.clone()]
            }
            WaitCondition::Raw(expr) => vec!["wait".into(), expr.clone()],
        }
    }
}

impl From<u64> for WaitCondition {
    fn from(ms: u64) -> Self {
        WaitCondition::Duration(ms)
    }
}

impl From<&str> for WaitCondition {
    fn from(condition: &str) -> Self {
        if let Some(text) = condition.strip_prefix("text:") {
            WaitCondition::TextAppears(text.to_string())
        } else if let Some(pattern) = condition.strip_prefix("url:") {
            WaitCondition::UrlMatches(pattern.to_string())
        } else {
            WaitCondition::Raw(condition.to_string())
        }
    }
}

/// Fluent automation API over the command gateway.
#[derive(Debug, Clone)]
pub struct Browser {
    gateway: BrowserGateway,
    base_url: String,
    headed: bool,
    screenshot_dir: PathBuf,
}

impl Browser {
    /// Creates a facade for the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            gateway: BrowserGateway::new(config.timeout),
            base_url: config.base_url.clone(),
            headed: config.headed,
            screenshot_dir: config.screenshot_dir.clone(),
        }
    }

    /// Replaces the gateway, e.g. one with an overridden program for tests.
    pub fn with_gateway(mut self, gateway: BrowserGateway) -> Self {
        self.gateway = gateway;
        self
    }

    /// Navigates to a URL. Scheme-less targets are concatenated onto the
    /// configured base URL (plain concatenation, no join normalization).
    pub async fn open(&self, url: &str) -> Result<(), CommandError> {
        let target = self.resolve_url(url);
        self.run(vec!["open".into(), target]).await?;
        Ok(())
    }

    /// Clicks the element matching the selector.
    pub async fn click(&self, selector: &str) -> Result<(), CommandError> {
        self.run(vec!["click".into(), selector.into()]).await?;
        Ok(())
    }

    /// Fills the element matching the selector with the given text.
    pub async fn fill(&self, selector: &str, text: &str) -> Result<(), CommandError> {
        self.run(vec!["fill".into(), selector.into(), text.into()])
            .await?;
        Ok(())
    }

    /// Reads the text content of the element matching the selector.
    pub async fn text(&self, selector: &str) -> Result<String, CommandError> {
        self.run(vec!["text".into(), selector.into()]).await
    }

    /// Reads the input value of the element matching the selector.
    pub async fn value(&self, selector: &str) -> Result<String, CommandError> {
        self.run(vec!["value".into(), selector.into()]).await
    }

    /// Captures a textual representation of the visible page for assertion
    /// inspection, with the default snapshot options.
    pub async fn snapshot(&self) -> Result<String, CommandError> {
        self.snapshot_with("-i").await
    }

    /// Captures a snapshot with explicit options.
    pub async fn snapshot_with(&self, options: &str) -> Result<String, CommandError> {
        self.run(vec!["snapshot".into(), options.into()]).await
    }

    /// Waits for the given condition.
    pub async fn wait(&self, condition: impl Into<WaitCondition>) -> Result<(), CommandError> {
        self.run(condition.into().to_args()).await?;
        Ok(())
    }

    /// Returns the current page URL.
    pub async fn url(&self) -> Result<String, CommandError> {
        self.run(vec!["url".into()]).await
    }

    /// Returns the current page title.
    pub async fn title(&self) -> Result<String, CommandError> {
        self.run(vec!["title".into()]).await
    }

    /// Captures a screenshot into the screenshot directory and returns the
    /// resolved path. Does not create the directory; the runner establishes
    /// that precondition once before any case executes.
    pub async fn screenshot(&self, filename: &str) -> Result<PathBuf, CommandError> {
        let path = self.screenshot_dir.join(filename);
        self.run(vec![
            "screenshot".into(),
            path.to_string_lossy().into_owned(),
        ])
        .await?;
        Ok(path)
    }

    /// Resizes the browser viewport.
    pub async fn set_viewport(&self, width: u32, height: u32) -> Result<(), CommandError> {
        self.run(vec![
            "set".into(),
            "viewport".into(),
            width.to_string(),
            height.to_string(),
        ])
        .await?;
        Ok(())
    }

    /// Checks whether the element matching the selector is visible.
    ///
    /// Never fails: an invalid selector, a missing element, or any gateway
    /// error all report `false`.
    pub async fn is_visible(&self, selector: &str) -> bool {
        matches!(
            self.run(vec!["isvisible".into(), selector.into()]).await,
            Ok(result) if result == "true"
        )
    }

    /// Closes the browser. Best-effort: a close failure must never block
    /// reporting, so the error is discarded.
    pub async fn close(&self) {
        self.run(vec!["close".into()]).await.ok();
    }

    /// Clears cookies and local storage, each independently best-effort so a
    /// failure in one never prevents the other from being attempted.
    pub async fn clear_session(&self) {
        self.run(vec!["cookies".into(), "clear".into()]).await.ok();
        self.run(vec!["local".into(), "clear".into()]).await.ok();
    }

    /// Resolves a navigation target against the base URL.
    fn resolve_url(&self, url: &str) -> String {
        if url.starts_with("http") {
            url.to_string()
        } else {
            format!("{}{}", self.base_url, url)
        }
    }

    /// Issues one gateway invocation, appending the headed flag when
    /// configured.
    async fn run(&self, mut args: Vec<String>) -> Result<String, CommandError> {
        if self.headed {
            args.push("--headed".into());
        }
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        self.gateway.invoke(&arg_refs).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// A browser whose gateway echoes the rendered command back, making the
    /// argv template for each operation observable.
    fn echo_browser() -> Browser {
        let config = Config::default();
        Browser::new(&config)
            .with_gateway(BrowserGateway::new(Duration::from_secs(5)).with_program("echo"))
    }

    /// A browser whose gateway always fails.
    fn failing_browser() -> Browser {
        let config = Config::default();
        Browser::new(&config)
            .with_gateway(BrowserGateway::new(Duration::from_secs(5)).with_program("false"))
    }

    #[test]
    fn resolve_url_concatenates_relative_paths() {
        let browser = echo_browser();
        assert_eq!(browser.resolve_url("/login"), "http://localhost:3000/login");
        assert_eq!(
            browser.resolve_url("https://example.com/x"),
            "https://example.com/x"
        );
    }

    #[test]
    fn wait_condition_from_number_is_duration() {
        assert_eq!(WaitCondition::from(1500), WaitCondition::Duration(1500));
        assert_eq!(
            WaitCondition::Duration(1500).to_args(),
            vec!["wait", "1500"]
        );
    }

    #[test]
    fn wait_condition_parses_text_prefix() {
        let condition = WaitCondition::from("text:Welcome");
        assert_eq!(condition, WaitCondition::TextAppears("Welcome".into()));
        assert_eq!(condition.to_args(), vec!["wait", "text", "Welcome"]);
    }

    #[test]
    fn wait_condition_parses_url_prefix() {
        let condition = WaitCondition::from("url:**/about");
        assert_eq!(condition, WaitCondition::UrlMatches("**/about".into()));
        assert_eq!(condition.to_args(), vec!["wait", "url", "**/about"]);
    }

    #[test]
    fn wait_condition_falls_back_to_raw() {
        let condition = WaitCondition::from("load");
        assert_eq!(condition, WaitCondition::Raw("load".into()));
        assert_eq!(condition.to_args(), vec!["wait", "load"]);
    }

    #[tokio::test]
    async fn commands_render_expected_templates() {
        let browser = echo_browser();
        assert_eq!(browser.url().await.unwrap(), "url");
        assert_eq!(browser.title().await.unwrap(), "title");
        assert_eq!(browser.text("#msg").await.unwrap(), "text #msg");
        assert_eq!(browser.value("#email").await.unwrap(), "value #email");
        assert_eq!(browser.snapshot().await.unwrap(), "snapshot -i");
    }

    #[tokio::test]
    async fn headed_flag_is_appended_to_every_command() {
        let config = Config::default().headed(true);
        let browser = Browser::new(&config)
            .with_gateway(BrowserGateway::new(Duration::from_secs(5)).with_program("echo"));
        assert_eq!(browser.url().await.unwrap(), "url --headed");
        assert_eq!(browser.snapshot().await.unwrap(), "snapshot -i --headed");
    }

    #[tokio::test]
    async fn screenshot_joins_directory_and_returns_path() {
        let browser = echo_browser();
        let path = browser.screenshot("failure.png").await.unwrap();
        assert_eq!(path, PathBuf::from("./e2e-screenshots/failure.png"));
    }

    #[tokio::test]
    async fn is_visible_true_only_on_literal_true() {
        // echo returns the command itself, never "true"
        assert!(!echo_browser().is_visible("#btn").await);
    }

    #[tokio::test]
    async fn is_visible_false_on_gateway_failure() {
        assert!(!failing_browser().is_visible("#btn").await);
    }

    #[tokio::test]
    async fn close_and_clear_session_suppress_failures() {
        let browser = failing_browser();
        // Must not panic or surface errors.
        browser.clear_session().await;
        browser.close().await;
    }
}
