//! # claude-step-proto
//!
//! Shared types and traits for claude-step.
//!
//! This crate defines:
//! - [`InvocationOptions`] and [`PreparedInvocation`] describing one Claude CLI call
//! - [`StreamEvent`] and [`Transcript`] for the newline-delimited JSON output
//! - [`Conclusion`], [`ExitStatus`] and [`Outcome`] for the result of a run
//! - The [`Reporter`] and [`ProcessDriver`] seams injected into the pipeline
//! - Error types shared across crates

mod driver;
mod error;
mod event;
mod invocation;
mod outcome;
mod reporter;

pub use driver::{DriverOutput, ProcessDriver};
pub use error::{EnvError, PersistError, PromptError, StepError, StepResult};
pub use event::{StreamEvent, Transcript};
pub use invocation::{InvocationOptions, PreparedInvocation};
pub use outcome::{Conclusion, ExitStatus, Outcome};
pub use reporter::{OUTPUT_CONCLUSION, OUTPUT_EXECUTION_FILE, Reporter};
