//! Error types for claude-step.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Missing or conflicting provider credentials.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("Cannot use both Bedrock and Vertex AI simultaneously. Please set only one provider.")]
    ConflictingProviders,

    #[error("Environment variable validation failed:\n{}", .0.join("\n"))]
    Missing(Vec<String>),
}

/// The prompt could not be resolved to a usable file.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Both 'prompt' and 'prompt_file' were provided. Please specify only one.")]
    BothProvided,

    #[error("Neither 'prompt' nor 'prompt_file' was provided. At least one is required.")]
    NeitherProvided,

    #[error("Prompt file '{}' does not exist.", .0.display())]
    FileNotFound(PathBuf),

    #[error("Prompt file '{}' is empty.", .0.display())]
    Empty(PathBuf),

    #[error("Failed to access prompt file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The execution artifact could not be written. Always non-fatal.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("transcript line {line} is not a single JSON record: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that end a run before an outcome can be derived.
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Precondition(#[from] EnvError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl StepError {
    /// Classification used in the top-level error report.
    pub fn kind(&self) -> &'static str {
        match self {
            StepError::Precondition(_) => "PreconditionError",
            StepError::Prompt(_) => "PromptError",
            StepError::Internal(_) => "InternalError",
        }
    }
}

/// Result type alias for pipeline operations.
pub type StepResult<T> = Result<T, StepError>;
