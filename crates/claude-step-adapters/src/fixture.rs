//! Deterministic stand-in for the Claude CLI.

use std::time::Duration;

use async_trait::async_trait;
use claude_step_core::DEFAULT_FIXTURE_DELAY;
use claude_step_proto::{
    DriverOutput, ExitStatus, PreparedInvocation, ProcessDriver, Reporter, Transcript,
};

use crate::announce::{announce, echo_line};

/// Records replayed by default: status, info, response, status, metrics.
pub const CANONICAL_RECORDS: [&str; 5] = [
    r#"{"type":"status","message":"Starting Claude Code execution..."}"#,
    r#"{"type":"info","message":"Processing prompt..."}"#,
    r#"{"type":"response","content":"Hello! This is a mock response from Claude. I've analyzed your request and here is my simulated output. In a real scenario, I would process your prompt and provide actual assistance."}"#,
    r#"{"type":"status","message":"Execution completed successfully."}"#,
    r#"{"type":"metrics","tokens_used":150,"execution_time_ms":2000}"#,
];

/// Replays a fixed record sequence with a pause between records.
///
/// Nothing is spawned and the prompt is never read, only stat'ed.
#[derive(Debug, Clone)]
pub struct FixtureDriver {
    records: Vec<String>,
    delay: Duration,
    exit_status: ExitStatus,
}

impl FixtureDriver {
    /// The canonical five-record stream, exiting 0.
    pub fn new() -> Self {
        Self {
            records: CANONICAL_RECORDS.iter().map(|r| (*r).to_string()).collect(),
            delay: DEFAULT_FIXTURE_DELAY,
            exit_status: ExitStatus::SUCCESS,
        }
    }

    /// Replaces the replayed records. Lines are not validated.
    pub fn with_records<I, S>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.records = records.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_exit_status(mut self, exit_status: ExitStatus) -> Self {
        self.exit_status = exit_status;
        self
    }
}

impl Default for FixtureDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessDriver for FixtureDriver {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn run(&self, invocation: &PreparedInvocation, reporter: &dyn Reporter) -> DriverOutput {
        announce(invocation, reporter).await;
        reporter.info("Fixture mode: replaying a recorded Claude stream instead of executing the CLI.");

        let mut transcript = Transcript::new();
        for record in &self.records {
            echo_line(record, reporter);
            transcript.push(record.as_str());

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        DriverOutput::new(transcript, self.exit_status)
    }
}
