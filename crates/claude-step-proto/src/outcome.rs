//! Conclusion, exit status, and the final outcome of a run.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Numeric exit status of one execution. Zero means success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExitStatus(i32);

impl ExitStatus {
    pub const SUCCESS: Self = Self(0);
    /// Used when the process could not be started or was killed without a code.
    pub const FAILURE: Self = Self(1);

    pub fn new(code: i32) -> Self {
        Self(code)
    }

    pub fn code(self) -> i32 {
        self.0
    }

    pub fn success(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Binary classification reported to the calling job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conclusion {
    Success,
    Failure,
}

impl Conclusion {
    pub fn from_exit_status(status: ExitStatus) -> Self {
        if status.success() {
            Conclusion::Success
        } else {
            Conclusion::Failure
        }
    }

    /// The value written to the `conclusion` output.
    pub fn as_str(self) -> &'static str {
        match self {
            Conclusion::Success => "success",
            Conclusion::Failure => "failure",
        }
    }
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of one run. Built once, after the execution artifact was attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    conclusion: Conclusion,
    execution_file: Option<PathBuf>,
    exit_status: ExitStatus,
}

impl Outcome {
    pub fn success(execution_file: Option<PathBuf>) -> Self {
        Self {
            conclusion: Conclusion::Success,
            execution_file,
            exit_status: ExitStatus::SUCCESS,
        }
    }

    /// A failed run. A zero status is coerced to [`ExitStatus::FAILURE`] so a
    /// failure never exits cleanly.
    pub fn failure(exit_status: ExitStatus, execution_file: Option<PathBuf>) -> Self {
        let exit_status = if exit_status.success() {
            ExitStatus::FAILURE
        } else {
            exit_status
        };
        Self {
            conclusion: Conclusion::Failure,
            execution_file,
            exit_status,
        }
    }

    pub fn conclusion(&self) -> Conclusion {
        self.conclusion
    }

    pub fn execution_file(&self) -> Option<&Path> {
        self.execution_file.as_deref()
    }

    pub fn exit_status(&self) -> ExitStatus {
        self.exit_status
    }

    /// Process exit code for the step.
    pub fn exit_code(&self) -> i32 {
        self.exit_status.code()
    }
}
