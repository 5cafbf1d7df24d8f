//! # claude-step-cli
//!
//! Binary entry point for claude-step.
//!
//! This crate provides:
//! - CLI argument parsing using `clap`, with GitHub Actions `INPUT_*` fallbacks
//! - Logging initialization
//! - The single top-level error boundary and the process exit code

use std::backtrace::BacktraceStatus;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use claude_step_adapters::{GithubReporter, driver_for};
use claude_step_core::{
    DEFAULT_EXECUTABLE, DEFAULT_EXECUTION_FILE, DEFAULT_FIXTURE_DELAY, DEFAULT_PROMPT_DIR,
    DEFAULT_TRANSCRIPT_FILE, DriverKind, Pipeline, PromptInput, RunRequest, StepConfig,
};
use claude_step_proto::{
    Conclusion, InvocationOptions, OUTPUT_CONCLUSION, Outcome, Reporter, StepError,
};
use tracing::{debug, info};

/// Run the Claude CLI as a CI step and report its outcome
#[derive(Parser, Debug)]
#[command(name = "claude-step", version, about)]
struct Cli {
    // ─────────────────────────────────────────────────────────────────────────
    // Step inputs
    // ─────────────────────────────────────────────────────────────────────────
    /// Inline prompt text (mutually exclusive with --prompt-file)
    #[arg(long, env = "INPUT_PROMPT", hide_env_values = true)]
    prompt: Option<String>,

    /// Prompt file path (mutually exclusive with --prompt)
    #[arg(long, env = "INPUT_PROMPT_FILE")]
    prompt_file: Option<String>,

    /// Tools Claude may use, passed through as --allowedTools
    #[arg(long, env = "INPUT_ALLOWED_TOOLS")]
    allowed_tools: Option<String>,

    /// Tools Claude may not use, passed through as --disallowedTools
    #[arg(long, env = "INPUT_DISALLOWED_TOOLS")]
    disallowed_tools: Option<String>,

    /// Maximum conversation turns, passed through as --max-turns
    #[arg(long, env = "INPUT_MAX_TURNS")]
    max_turns: Option<String>,

    /// MCP configuration, passed through as --mcp-config
    #[arg(long, env = "INPUT_MCP_CONFIG")]
    mcp_config: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Step configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// Process driver: spawn the Claude CLI, or replay a recorded stream
    #[arg(long, value_enum, env = "CLAUDE_STEP_DRIVER", default_value_t = DriverArg::Cli)]
    driver: DriverArg,

    /// Claude CLI command; whitespace separates leading arguments
    #[arg(long, env = "CLAUDE_STEP_EXECUTABLE", default_value = DEFAULT_EXECUTABLE)]
    executable: String,

    /// Where the pretty-printed execution log is written
    #[arg(long, env = "CLAUDE_STEP_EXECUTION_FILE", default_value = DEFAULT_EXECUTION_FILE)]
    execution_file: PathBuf,

    /// Where the raw newline-delimited transcript is written
    #[arg(long, env = "CLAUDE_STEP_TRANSCRIPT_FILE", default_value = DEFAULT_TRANSCRIPT_FILE)]
    transcript_file: PathBuf,

    /// Directory an inline prompt is written into
    #[arg(long, env = "CLAUDE_STEP_PROMPT_DIR", default_value = DEFAULT_PROMPT_DIR)]
    prompt_dir: PathBuf,

    /// Pause between replayed records in fixture mode, in milliseconds
    #[arg(long, env = "CLAUDE_STEP_FIXTURE_DELAY_MS", default_value_t = DEFAULT_FIXTURE_DELAY.as_millis() as u64)]
    fixture_delay_ms: u64,

    /// Verbose logging (also enabled by RUNNER_DEBUG=1)
    #[arg(short, long)]
    verbose: bool,
}

/// Driver options for the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DriverArg {
    /// Spawn the Claude CLI
    Cli,
    /// Replay the canonical recorded stream
    Fixture,
}

impl From<DriverArg> for DriverKind {
    fn from(arg: DriverArg) -> Self {
        match arg {
            DriverArg::Cli => DriverKind::Cli,
            DriverArg::Fixture => DriverKind::Fixture,
        }
    }
}

impl Cli {
    fn step_config(&self) -> StepConfig {
        StepConfig {
            driver: self.driver.into(),
            executable: self.executable.clone(),
            transcript_path: self.transcript_file.clone(),
            execution_file: self.execution_file.clone(),
            prompt_dir: self.prompt_dir.clone(),
            fixture_delay: Duration::from_millis(self.fixture_delay_ms),
        }
    }

    fn run_request(&self) -> RunRequest {
        RunRequest {
            prompt: PromptInput {
                prompt: non_empty(self.prompt.as_ref()),
                prompt_file: non_empty(self.prompt_file.as_ref()).map(PathBuf::from),
            },
            options: InvocationOptions {
                allowed_tools: non_empty(self.allowed_tools.as_ref()),
                disallowed_tools: non_empty(self.disallowed_tools.as_ref()),
                max_turns: non_empty(self.max_turns.as_ref()),
                mcp_config: non_empty(self.mcp_config.as_ref()),
            },
        }
    }
}

/// Unset action inputs arrive as empty strings.
fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => std::process::exit(config_failure(&GithubReporter::from_env(), err)),
    };

    let runner_debug = std::env::var("RUNNER_DEBUG")
        .map(|v| v == "1")
        .unwrap_or(false);
    init_logging(cli.verbose || runner_debug);

    let reporter = GithubReporter::from_env();
    let code = match run(&cli, &reporter, |name: &str| std::env::var(name).ok()).await {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            report_fatal(&reporter, &err);
            1
        }
    };

    std::process::exit(code);
}

/// Logs go to stderr; stdout carries workflow commands and the streamed records.
fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Invalid configuration fails the step like any other fatal error.
///
/// `--help` and `--version` print and exit without touching step outputs.
fn config_failure(reporter: &dyn Reporter, err: clap::Error) -> i32 {
    if !err.use_stderr() {
        err.exit();
    }
    // Clap's own rendering lists the accepted values.
    let _ = err.print();
    report_fatal(
        reporter,
        &anyhow::Error::new(err).context("invalid claude-step configuration"),
    );
    1
}

async fn run<F>(cli: &Cli, reporter: &dyn Reporter, env: F) -> Result<Outcome>
where
    F: Fn(&str) -> Option<String> + Send + Sync + 'static,
{
    let config = cli.step_config();
    let driver = driver_for(&config);

    info!(
        driver = %config.driver,
        execution_file = %config.execution_file.display(),
        "Starting claude-step"
    );

    let outcome = Pipeline::new(&config, driver.as_ref(), reporter)
        .with_env(env)
        .run(&cli.run_request())
        .await
        .context("claude-step did not reach an outcome")?;

    info!(
        conclusion = %outcome.conclusion(),
        exit_code = outcome.exit_code(),
        "claude-step finished"
    );
    Ok(outcome)
}

/// Reports an error that escaped the pipeline and marks the step failed.
fn report_fatal(reporter: &dyn Reporter, err: &anyhow::Error) {
    debug!(error = ?err, "Run aborted");

    let kind = match err.downcast_ref::<StepError>() {
        Some(step) => step.kind(),
        None if err.downcast_ref::<clap::Error>().is_some() => "ConfigError",
        None => "UnexpectedError",
    };

    reporter.error("Error caught at the top level of claude-step:");
    reporter.error(&format!("Error type: {kind}"));
    reporter.error(&format!("Error message: {err}"));
    for cause in err.chain().skip(1) {
        reporter.error(&format!("Caused by: {cause}"));
    }
    let backtrace = err.backtrace();
    if backtrace.status() == BacktraceStatus::Captured {
        reporter.error(&format!("Error stack: {backtrace}"));
    }

    reporter.set_failed(&format!("Action failed with error: {err:#}"));
    reporter.set_output(OUTPUT_CONCLUSION, Conclusion::Failure.as_str());
}
