//! # browser-e2e
//!
//! CLI entry point for the E2E test harness.
//!
//! ## Usage
//!
//! ```bash
//! # Run the whole suite against the default base URL
//! browser-e2e
//!
//! # Run against a deployed target, with a visible browser window
//! browser-e2e --url https://staging.example.com --headed
//!
//! # Run only cases whose name contains "login"
//! browser-e2e --filter login
//!
//! # List cases without running them
//! browser-e2e --list
//! ```

use anyhow::Context;
use browser_e2e::reporter::{LogLevel, log_line};
use browser_e2e::{
    Browser, Config, JsonReport, TerminalReporter, TestRunner, Verbosity, all_cases,
};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;

/// E2E test harness for agent-browser targets.
///
/// Drives the suite of declarative test cases against a running application
/// and exits non-zero when any case fails.
#[derive(Parser, Debug)]
#[command(name = "browser-e2e")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL that relative test targets resolve against
    #[arg(long, env = "BASE_URL", default_value = browser_e2e::config::DEFAULT_BASE_URL)]
    url: String,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Request parallel execution (currently inert; execution is sequential)
    #[arg(long)]
    parallel: bool,

    /// Run only cases whose name contains this substring (case-insensitive)
    #[arg(long)]
    filter: Option<String>,

    /// Per-command timeout in milliseconds
    #[arg(long, env = "E2E_TIMEOUT_MS", default_value_t = 30_000)]
    timeout_ms: u64,

    /// Directory for screenshots
    #[arg(long, default_value = browser_e2e::config::DEFAULT_SCREENSHOT_DIR)]
    screenshot_dir: PathBuf,

    /// Write a JSON report to this path after the run
    #[arg(long)]
    report: Option<PathBuf>,

    /// List available cases without running them
    #[arg(long)]
    list: bool,

    /// Only show the final summary
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn to_config(&self) -> Config {
        let mut config = Config::new(self.url.clone())
            .headed(self.headed)
            .with_timeout(Duration::from_millis(self.timeout_ms))
            .with_screenshot_dir(self.screenshot_dir.clone());
        config.parallel = self.parallel;
        if let Some(filter) = &self.filter {
            config = config.with_filter(filter.clone());
        }
        config
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if cli.list {
        list_cases();
        return;
    }

    let rt = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");
    let code = match rt.block_on(run(&cli)) {
        Ok(code) => code,
        Err(err) => {
            // The run loop itself failed, distinct from any case failure.
            log_line(LogLevel::Fail, &format!("Runner error: {err:#}"));
            1
        }
    };
    std::process::exit(code);
}

fn list_cases() {
    let cases = all_cases();
    println!("{}\n", "Available cases:".bold());
    for case in &cases {
        println!("  {}", case.name().cyan());
    }
    println!(
        "\n  {}",
        format!(
            "Total: {} case{}",
            cases.len(),
            if cases.len() == 1 { "" } else { "s" }
        )
        .dimmed()
    );
}

async fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config = cli.to_config();
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        Verbosity::Normal
    };

    let reporter = TerminalReporter::with_verbosity(verbosity);
    reporter.print_header(&config.base_url, config.headed);

    if config.parallel {
        log_line(
            LogLevel::Warn,
            "parallel execution is not implemented; running sequentially",
        );
    }

    let browser = Browser::new(&config);
    let runner =
        TestRunner::new(browser, all_cases()).on_progress(reporter.progress_printer());

    let results = runner
        .run(&config)
        .await
        .context("test run aborted before completion")?;

    if let Some(path) = &cli.report {
        if let Err(err) = JsonReport::from_results(&results).write(path) {
            log_line(
                LogLevel::Warn,
                &format!("failed to write report {}: {err}", path.display()),
            );
        } else if verbosity != Verbosity::Quiet {
            println!("{}", format!("Report written: {}", path.display()).dimmed());
        }
    }

    reporter.print_summary(&results);
    Ok(reporter.exit_code(&results))
}
