//! Persists the raw transcript and the pretty-printed execution log.

use std::path::{Path, PathBuf};

use claude_step_proto::{PersistError, StreamEvent, Transcript};
use serde_json::Value;
use tracing::debug;

use crate::config::StepConfig;

/// Writes the two execution artifacts for a finished run.
#[derive(Debug, Clone)]
pub struct StreamAggregator {
    transcript_path: PathBuf,
    execution_file: PathBuf,
}

impl StreamAggregator {
    pub fn new(transcript_path: impl Into<PathBuf>, execution_file: impl Into<PathBuf>) -> Self {
        Self {
            transcript_path: transcript_path.into(),
            execution_file: execution_file.into(),
        }
    }

    pub fn from_config(config: &StepConfig) -> Self {
        Self::new(&config.transcript_path, &config.execution_file)
    }

    pub fn transcript_path(&self) -> &Path {
        &self.transcript_path
    }

    pub fn execution_file(&self) -> &Path {
        &self.execution_file
    }

    /// Writes the raw transcript verbatim, then the JSON array rendering.
    ///
    /// Returns the execution file path on success. The raw transcript is
    /// written even when the array rendering fails.
    pub async fn persist(&self, transcript: &Transcript) -> Result<PathBuf, PersistError> {
        let raw = transcript.to_ndjson();
        write_file(&self.transcript_path, &raw).await?;

        let rendered = render_execution_log(transcript)?;
        write_file(&self.execution_file, &rendered).await?;

        debug!(
            records = transcript.len(),
            path = %self.execution_file.display(),
            "Execution log written"
        );
        Ok(self.execution_file.clone())
    }
}

/// Parses each transcript line as one record and pretty-prints them as an array.
///
/// A record never spans lines: the first line that is not exactly one JSON
/// value fails the whole rendering. Blank lines carry no record. An empty
/// transcript yields `[]`; the output ends with a newline.
pub fn render_execution_log(transcript: &Transcript) -> Result<String, PersistError> {
    let records = transcript
        .lines()
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            StreamEvent::parse(line)
                .map(|event| event.as_value().clone())
                .map_err(|source| PersistError::Malformed {
                    line: index + 1,
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(format!("{:#}\n", Value::Array(records)))
}

async fn write_file(path: &Path, contents: &str) -> Result<(), PersistError> {
    let write_err = |source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }
    tokio::fs::write(path, contents).await.map_err(write_err)
}
