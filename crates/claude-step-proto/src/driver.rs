//! Process driver capability.

use async_trait::async_trait;

use crate::event::Transcript;
use crate::invocation::PreparedInvocation;
use crate::outcome::ExitStatus;
use crate::reporter::Reporter;

/// Transcript and exit status of one execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverOutput {
    pub transcript: Transcript,
    pub exit_status: ExitStatus,
}

impl DriverOutput {
    pub fn new(transcript: Transcript, exit_status: ExitStatus) -> Self {
        Self {
            transcript,
            exit_status,
        }
    }
}

/// Owns exactly one execution of the Claude CLI, or a stand-in for it.
///
/// Expected failures (the process cannot start, exits non-zero) are reported
/// through the returned [`ExitStatus`], never as an error. Each record must be
/// echoed through the reporter as soon as it is available.
#[async_trait]
pub trait ProcessDriver: Send + Sync {
    /// Short name for log lines.
    fn name(&self) -> &'static str;

    async fn run(&self, invocation: &PreparedInvocation, reporter: &dyn Reporter) -> DriverOutput;
}
