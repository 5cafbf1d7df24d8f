//! # claude-step-adapters
//!
//! Concrete implementations of the claude-step seams.
//!
//! This crate provides:
//! - [`CliDriver`], which spawns the Claude CLI and streams its stdout
//! - [`FixtureDriver`], which replays a canonical stream without spawning anything
//! - [`GithubReporter`], which speaks the GitHub Actions workflow-command protocol
//!
//! [`driver_for`] picks the driver named by the step configuration.

mod announce;
mod cli_driver;
mod fixture;
mod github;

#[cfg(test)]
mod test_support;

pub use cli_driver::CliDriver;
pub use fixture::{CANONICAL_RECORDS, FixtureDriver};
pub use github::{GITHUB_OUTPUT_ENV, GithubReporter};

use claude_step_core::{DriverKind, StepConfig};
use claude_step_proto::ProcessDriver;

/// Builds the process driver selected by `config.driver`.
pub fn driver_for(config: &StepConfig) -> Box<dyn ProcessDriver> {
    match config.driver {
        DriverKind::Cli => Box::new(CliDriver::from_command_line(&config.executable)),
        DriverKind::Fixture => Box::new(FixtureDriver::new().with_delay(config.fixture_delay)),
    }
}
