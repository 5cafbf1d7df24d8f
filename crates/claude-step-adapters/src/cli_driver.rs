//! Drives a real Claude CLI subprocess.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use claude_step_core::DEFAULT_EXECUTABLE;
use claude_step_proto::{
    DriverOutput, ExitStatus, PreparedInvocation, ProcessDriver, Reporter, Transcript,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::announce::{announce, echo_line};

/// Spawns the Claude CLI once, feeds it the prompt on stdin, and streams stdout.
///
/// Stderr is inherited so the CLI's own diagnostics reach the job log.
#[derive(Debug, Clone)]
pub struct CliDriver {
    program: PathBuf,
    prefix_args: Vec<String>,
}

impl CliDriver {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            prefix_args: Vec::new(),
        }
    }

    /// Splits `command` on whitespace into a program and leading arguments.
    ///
    /// A blank command falls back to `claude`.
    pub fn from_command_line(command: &str) -> Self {
        let mut parts = command.split_whitespace();
        match parts.next() {
            Some(program) => Self::new(program).with_prefix_args(parts),
            None => Self::new(DEFAULT_EXECUTABLE),
        }
    }

    /// Arguments placed before the prepared invocation arguments.
    pub fn with_prefix_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefix_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn prefix_args(&self) -> &[String] {
        &self.prefix_args
    }
}

#[async_trait]
impl ProcessDriver for CliDriver {
    fn name(&self) -> &'static str {
        "cli"
    }

    async fn run(&self, invocation: &PreparedInvocation, reporter: &dyn Reporter) -> DriverOutput {
        announce(invocation, reporter).await;

        // An unreadable prompt still runs the CLI; its exit status decides the outcome.
        let prompt = match tokio::fs::read(invocation.prompt_path()).await {
            Ok(bytes) => bytes,
            Err(err) => {
                reporter.warn(&format!(
                    "Failed to read prompt file {}: {err}",
                    invocation.prompt_path().display()
                ));
                Vec::new()
            }
        };

        let mut command = Command::new(&self.program);
        command
            .args(&self.prefix_args)
            .args(invocation.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(err) => {
                reporter.error(&format!(
                    "Failed to start {}: {err}",
                    self.program.display()
                ));
                return DriverOutput::new(Transcript::new(), ExitStatus::FAILURE);
            }
        };
        debug!(pid = ?child.id(), program = %self.program.display(), "Claude process started");

        // Written concurrently with reading stdout so a large prompt cannot
        // deadlock against a full stdout pipe.
        let stdin_task = child.stdin.take().map(|mut stdin| {
            tokio::spawn(async move {
                stdin.write_all(&prompt).await?;
                stdin.shutdown().await
            })
        });

        let mut transcript = Transcript::new();
        if let Some(stdout) = child.stdout.take() {
            let mut lines = BufReader::new(stdout).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        echo_line(&line, reporter);
                        transcript.push(line);
                    }
                    Ok(None) => break,
                    Err(err) => {
                        warn!(error = %err, "Failed to read Claude output; keeping partial transcript");
                        break;
                    }
                }
            }
        }

        if let Some(task) = stdin_task {
            match task.await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => warn!(error = %err, "Failed to write prompt to Claude stdin"),
                Err(err) => warn!(error = %err, "Prompt writer task failed"),
            }
        }

        let exit_status = match child.wait().await {
            Ok(status) => to_exit_status(status),
            Err(err) => {
                reporter.error(&format!("Failed to wait for Claude process: {err}"));
                ExitStatus::FAILURE
            }
        };
        reporter.info(&format!("Claude process exited with code {exit_status}"));

        DriverOutput::new(transcript, exit_status)
    }
}

/// Maps a process status to an exit code. A signal `n` maps to `128 + n`.
fn to_exit_status(status: std::process::ExitStatus) -> ExitStatus {
    if let Some(code) = status.code() {
        return ExitStatus::new(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return ExitStatus::new(128 + signal);
        }
    }

    ExitStatus::FAILURE
}
