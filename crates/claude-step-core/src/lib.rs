//! # claude-step-core
//!
//! Execution and output-aggregation pipeline for claude-step.
//!
//! This crate provides:
//! - The argument builder for Claude CLI invocations
//! - Environment validation and prompt preparation
//! - The stream aggregator that persists the execution log
//! - The outcome reporter that publishes `conclusion` and `execution_file`
//! - [`Pipeline`], which sequences the stages of one run

mod aggregator;
mod args;
mod config;
mod env;
mod outcome;
mod pipeline;
mod prompt;

#[cfg(test)]
mod test_support;

pub use aggregator::{StreamAggregator, render_execution_log};
pub use args::{BASE_ARGS, build_invocation};
pub use config::{
    DEFAULT_EXECUTABLE, DEFAULT_EXECUTION_FILE, DEFAULT_FIXTURE_DELAY, DEFAULT_PROMPT_DIR,
    DEFAULT_TRANSCRIPT_FILE, DriverKind, StepConfig,
};
pub use env::validate_environment;
pub use outcome::OutcomeReporter;
pub use pipeline::{Pipeline, RunRequest};
pub use prompt::{PROMPT_FILE_NAME, PromptConfig, PromptInput, PromptKind, prepare_prompt};
