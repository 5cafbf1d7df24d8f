//! Step configuration.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Well-known path of the pretty-printed execution log.
pub const DEFAULT_EXECUTION_FILE: &str = "/tmp/claude-execution-output.json";

/// Scratch file holding the raw newline-delimited transcript.
pub const DEFAULT_TRANSCRIPT_FILE: &str = "output.txt";

/// Directory an inline prompt is written into.
pub const DEFAULT_PROMPT_DIR: &str = "/tmp/claude-action";

pub const DEFAULT_EXECUTABLE: &str = "claude";

/// Pause between fixture records, to model streaming pace.
pub const DEFAULT_FIXTURE_DELAY: Duration = Duration::from_millis(100);

/// Which process driver executes the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverKind {
    /// Spawn the Claude CLI.
    #[default]
    Cli,
    /// Replay a canonical stream without spawning anything.
    Fixture,
}

impl DriverKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DriverKind::Cli => "cli",
            DriverKind::Fixture => "fixture",
        }
    }
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime configuration for one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepConfig {
    pub driver: DriverKind,
    /// Program used by the CLI driver. Whitespace separates a program from
    /// leading arguments, e.g. `npx @anthropic-ai/claude-code`.
    pub executable: String,
    pub transcript_path: PathBuf,
    pub execution_file: PathBuf,
    pub prompt_dir: PathBuf,
    pub fixture_delay: Duration,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            driver: DriverKind::default(),
            executable: DEFAULT_EXECUTABLE.to_string(),
            transcript_path: PathBuf::from(DEFAULT_TRANSCRIPT_FILE),
            execution_file: PathBuf::from(DEFAULT_EXECUTION_FILE),
            prompt_dir: PathBuf::from(DEFAULT_PROMPT_DIR),
            fixture_delay: DEFAULT_FIXTURE_DELAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = StepConfig::default();
        assert_eq!(config.driver, DriverKind::Cli);
        assert_eq!(config.executable, "claude");
        assert_eq!(config.execution_file, PathBuf::from("/tmp/claude-execution-output.json"));
        assert_eq!(config.transcript_path, PathBuf::from("output.txt"));
    }

    #[test]
    fn test_driver_kind_display() {
        assert_eq!(DriverKind::Cli.to_string(), "cli");
        assert_eq!(DriverKind::Fixture.to_string(), "fixture");
    }
}
