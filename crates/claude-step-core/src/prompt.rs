//! Resolves the prompt input to a single prompt file.

use std::io;
use std::path::{Path, PathBuf};

use claude_step_proto::PromptError;
use tracing::debug;

/// File name an inline prompt is written to inside the prompt directory.
pub const PROMPT_FILE_NAME: &str = "prompt.txt";

/// Prompt as supplied by the step inputs. Empty values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptInput {
    pub prompt: Option<String>,
    pub prompt_file: Option<PathBuf>,
}

impl PromptInput {
    pub fn inline(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            prompt_file: None,
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            prompt: None,
            prompt_file: Some(path.into()),
        }
    }
}

/// Where the prompt came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Inline,
    File,
}

/// The resolved prompt file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptConfig {
    pub path: PathBuf,
    pub kind: PromptKind,
}

/// Resolves `input` to a readable, non-empty prompt file.
///
/// An inline prompt is written to `prompt_dir/prompt.txt`; a prompt file is
/// used in place.
pub async fn prepare_prompt(
    input: &PromptInput,
    prompt_dir: &Path,
) -> Result<PromptConfig, PromptError> {
    let prompt = input.prompt.as_deref().filter(|p| !p.is_empty());
    let prompt_file = input
        .prompt_file
        .as_deref()
        .filter(|p| !p.as_os_str().is_empty());

    let config = match (prompt, prompt_file) {
        (Some(_), Some(_)) => return Err(PromptError::BothProvided),
        (None, None) => return Err(PromptError::NeitherProvided),
        (None, Some(path)) => PromptConfig {
            path: path.to_path_buf(),
            kind: PromptKind::File,
        },
        (Some(text), None) => {
            let path = prompt_dir.join(PROMPT_FILE_NAME);
            let io_err = |source: io::Error| PromptError::Io {
                path: path.clone(),
                source,
            };
            tokio::fs::create_dir_all(prompt_dir).await.map_err(io_err)?;
            tokio::fs::write(&path, text).await.map_err(io_err)?;
            PromptConfig {
                path,
                kind: PromptKind::Inline,
            }
        }
    };

    let metadata = tokio::fs::metadata(&config.path)
        .await
        .map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => PromptError::FileNotFound(config.path.clone()),
            _ => PromptError::Io {
                path: config.path.clone(),
                source,
            },
        })?;

    if metadata.len() == 0 {
        return Err(PromptError::Empty(config.path));
    }

    debug!(path = %config.path.display(), bytes = metadata.len(), kind = ?config.kind, "Prompt resolved");
    Ok(config)
}
