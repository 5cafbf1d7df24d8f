//! Invocation options and the prepared argument list.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Optional flags forwarded to the Claude CLI.
///
/// Values are opaque and passed through unmodified. A missing or empty value
/// means the corresponding flag is omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationOptions {
    pub allowed_tools: Option<String>,
    pub disallowed_tools: Option<String>,
    pub max_turns: Option<String>,
    pub mcp_config: Option<String>,
}

impl InvocationOptions {
    /// Creates an options record with every flag omitted.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allowed_tools(mut self, value: impl Into<String>) -> Self {
        self.allowed_tools = Some(value.into());
        self
    }

    pub fn with_disallowed_tools(mut self, value: impl Into<String>) -> Self {
        self.disallowed_tools = Some(value.into());
        self
    }

    pub fn with_max_turns(mut self, value: impl Into<String>) -> Self {
        self.max_turns = Some(value.into());
        self
    }

    pub fn with_mcp_config(mut self, value: impl Into<String>) -> Self {
        self.mcp_config = Some(value.into());
        self
    }
}

/// The argument tokens and prompt location for exactly one execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedInvocation {
    args: Vec<String>,
    prompt_path: PathBuf,
}

impl PreparedInvocation {
    pub fn new(args: Vec<String>, prompt_path: impl Into<PathBuf>) -> Self {
        Self {
            args,
            prompt_path: prompt_path.into(),
        }
    }

    /// The ordered argument tokens, excluding the program itself.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn prompt_path(&self) -> &Path {
        &self.prompt_path
    }

    /// Space-joined arguments, for log lines.
    pub fn command_line(&self) -> String {
        self.args.join(" ")
    }
}
