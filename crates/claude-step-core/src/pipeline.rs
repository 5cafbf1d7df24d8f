//! Sequences the stages of one run.

use claude_step_proto::{InvocationOptions, Outcome, ProcessDriver, Reporter, StepResult};
use tracing::info;

use crate::aggregator::StreamAggregator;
use crate::args::build_invocation;
use crate::config::StepConfig;
use crate::env::validate_environment;
use crate::outcome::OutcomeReporter;
use crate::prompt::{PromptInput, prepare_prompt};

type EnvLookup = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Step inputs for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunRequest {
    pub prompt: PromptInput,
    pub options: InvocationOptions,
}

/// Runs validate → prepare prompt → build args → drive → aggregate → report.
///
/// Precondition and prompt errors are returned as `Err` before anything is
/// executed. Once the driver has run, the result is always an [`Outcome`].
pub struct Pipeline<'a> {
    config: &'a StepConfig,
    driver: &'a dyn ProcessDriver,
    reporter: &'a dyn Reporter,
    env: Box<EnvLookup>,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline that reads credentials from the process environment.
    pub fn new(
        config: &'a StepConfig,
        driver: &'a dyn ProcessDriver,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            config,
            driver,
            reporter,
            env: Box::new(|name: &str| std::env::var(name).ok()),
        }
    }

    /// Replaces the environment lookup used for credential validation.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Box::new(lookup);
        self
    }

    pub async fn run(&self, request: &RunRequest) -> StepResult<Outcome> {
        validate_environment(&*self.env)?;
        self.reporter.info("Environment validation completed.");

        let prompt = prepare_prompt(&request.prompt, &self.config.prompt_dir).await?;
        self.reporter
            .info(&format!("Prompt prepared: {}", prompt.path.display()));

        let invocation = build_invocation(prompt.path, &request.options);

        info!(driver = self.driver.name(), "Starting execution");
        let output = self.driver.run(&invocation, self.reporter).await;
        info!(
            driver = self.driver.name(),
            exit_status = output.exit_status.code(),
            records = output.transcript.len(),
            "Execution finished"
        );

        let aggregator = StreamAggregator::from_config(self.config);
        let outcome = OutcomeReporter::new(&aggregator, self.reporter)
            .report(&output)
            .await;

        self.reporter
            .info(&format!("Run finished with conclusion: {}", outcome.conclusion()));
        Ok(outcome)
    }
}
