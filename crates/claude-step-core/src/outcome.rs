//! Derives and publishes the outcome of a run.

use claude_step_proto::{
    DriverOutput, OUTPUT_CONCLUSION, OUTPUT_EXECUTION_FILE, Outcome, Reporter,
};
use tracing::debug;

use crate::aggregator::StreamAggregator;

/// Turns an exit status and transcript into the step outputs.
pub struct OutcomeReporter<'a> {
    aggregator: &'a StreamAggregator,
    reporter: &'a dyn Reporter,
}

impl<'a> OutcomeReporter<'a> {
    pub fn new(aggregator: &'a StreamAggregator, reporter: &'a dyn Reporter) -> Self {
        Self {
            aggregator,
            reporter,
        }
    }

    /// Persists the execution log and publishes `conclusion` and `execution_file`.
    ///
    /// A persistence failure never changes the conclusion. On success it is
    /// reported as a warning; on a failed run it is only traced.
    pub async fn report(&self, output: &DriverOutput) -> Outcome {
        let outcome = if output.exit_status.success() {
            let execution_file = match self.aggregator.persist(&output.transcript).await {
                Ok(path) => {
                    self.reporter
                        .info(&format!("Log saved to {}", path.display()));
                    Some(path)
                }
                Err(err) => {
                    self.reporter.warn(&format!(
                        "Failed to process output for execution metrics: {err}"
                    ));
                    None
                }
            };
            Outcome::success(execution_file)
        } else {
            let execution_file = if output.transcript.is_empty() {
                None
            } else {
                match self.aggregator.persist(&output.transcript).await {
                    Ok(path) => Some(path),
                    Err(err) => {
                        debug!(error = %err, "Execution log not written for failed run");
                        None
                    }
                }
            };
            Outcome::failure(output.exit_status, execution_file)
        };

        self.publish(&outcome);
        outcome
    }

    fn publish(&self, outcome: &Outcome) {
        self.reporter
            .set_output(OUTPUT_CONCLUSION, outcome.conclusion().as_str());
        if let Some(path) = outcome.execution_file() {
            self.reporter
                .set_output(OUTPUT_EXECUTION_FILE, &path.to_string_lossy());
        }
    }
}
