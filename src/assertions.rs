//! Assertion helpers for test case bodies.
//!
//! Each helper is a pure check that either passes (`Ok(())`) or surfaces an
//! [`AssertionFailure`] with an actual-vs-expected message, which the `?`
//! operator propagates straight up to the runner.
//!
//! The page-state assertions (`url_contains`, `text_visible`,
//! `element_visible`) re-query live state through the facade themselves
//! rather than requiring the caller to pass it in, keeping case bodies terse.

use crate::browser::Browser;
use crate::error::{AssertionFailure, CaseError};

/// Asserts two values are equal. A caller-supplied message overrides the
/// default actual-vs-expected rendering.
pub fn equal<T>(actual: T, expected: T, message: Option<&str>) -> Result<(), AssertionFailure>
where
    T: PartialEq + std::fmt::Display,
{
    if actual == expected {
        Ok(())
    } else {
        Err(AssertionFailure::new(message.map_or_else(
            || format!("Expected \"{expected}\", got \"{actual}\""),
            String::from,
        )))
    }
}

/// Asserts that `haystack` contains `needle`.
pub fn contains(
    haystack: &str,
    needle: &str,
    message: Option<&str>,
) -> Result<(), AssertionFailure> {
    if haystack.contains(needle) {
        Ok(())
    } else {
        Err(AssertionFailure::new(message.map_or_else(
            || format!("Expected \"{haystack}\" to contain \"{needle}\""),
            String::from,
        )))
    }
}

/// Asserts the current page URL contains the given substring.
pub async fn url_contains(browser: &Browser, substring: &str) -> Result<(), CaseError> {
    let url = browser.url().await?;
    if url.contains(substring) {
        Ok(())
    } else {
        Err(AssertionFailure::new(format!(
            "Expected URL to contain \"{substring}\", got \"{url}\""
        ))
        .into())
    }
}

/// Asserts the given text appears in a fresh page snapshot.
pub async fn text_visible(browser: &Browser, text: &str) -> Result<(), CaseError> {
    let snapshot = browser.snapshot().await?;
    if snapshot.contains(text) {
        Ok(())
    } else {
        Err(AssertionFailure::new(format!("Expected text \"{text}\" to be visible")).into())
    }
}

/// Asserts the element matching the selector is visible.
///
/// Builds on [`Browser::is_visible`], which never fails; an underlying
/// gateway error therefore surfaces here as a visibility failure.
pub async fn element_visible(browser: &Browser, selector: &str) -> Result<(), CaseError> {
    if browser.is_visible(selector).await {
        Ok(())
    } else {
        Err(AssertionFailure::new(format!(
            "Expected element \"{selector}\" to be visible"
        ))
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::gateway::BrowserGateway;
    use std::time::Duration;

    fn browser(program: &str) -> Browser {
        Browser::new(&Config::default())
            .with_gateway(BrowserGateway::new(Duration::from_secs(5)).with_program(program))
    }

    #[test]
    fn equal_passes_on_match() {
        assert!(equal("a", "a", None).is_ok());
        assert!(equal(3, 3, None).is_ok());
    }

    #[test]
    fn equal_default_message() {
        let err = equal("actual", "expected", None).unwrap_err();
        assert_eq!(err.to_string(), "Expected \"expected\", got \"actual\"");
    }

    #[test]
    fn equal_custom_message_overrides_default() {
        let err = equal("a", "b", Some("Email should be filled")).unwrap_err();
        assert_eq!(err.to_string(), "Email should be filled");
    }

    #[test]
    fn contains_passes_on_substring() {
        assert!(contains("hello world", "world", None).is_ok());
        // Every string contains the empty string.
        assert!(contains("anything", "", None).is_ok());
    }

    #[test]
    fn contains_default_message() {
        let err = contains("abc", "xyz", None).unwrap_err();
        assert_eq!(err.to_string(), "Expected \"abc\" to contain \"xyz\"");
    }

    #[tokio::test]
    async fn url_contains_passes_against_live_url() {
        // echo renders `url` as the command itself
        assert!(url_contains(&browser("echo"), "url").await.is_ok());
    }

    #[tokio::test]
    async fn url_contains_failure_message() {
        let err = url_contains(&browser("echo"), "about").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected URL to contain \"about\", got \"url\""
        );
    }

    #[tokio::test]
    async fn url_contains_propagates_gateway_failure() {
        let err = url_contains(&browser("false"), "about").await.unwrap_err();
        assert!(matches!(err, CaseError::Command(_)));
    }

    #[tokio::test]
    async fn text_visible_checks_snapshot() {
        assert!(text_visible(&browser("echo"), "snapshot").await.is_ok());
        let err = text_visible(&browser("echo"), "missing").await.unwrap_err();
        assert_eq!(err.to_string(), "Expected text \"missing\" to be visible");
    }

    #[tokio::test]
    async fn element_visible_failure_message() {
        let err = element_visible(&browser("false"), "#submit")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Expected element \"#submit\" to be visible"
        );
    }
}
