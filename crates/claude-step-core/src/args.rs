//! Argument builder for Claude CLI invocations.

use std::path::PathBuf;

use claude_step_proto::{InvocationOptions, PreparedInvocation};

/// Leading tokens: non-interactive print mode, verbose diagnostics, streamed JSON output.
pub const BASE_ARGS: [&str; 4] = ["-p", "--verbose", "--output-format", "stream-json"];

/// Builds the argument list for one run.
///
/// Optional flags are appended in a fixed order (allowed tools, disallowed
/// tools, max turns, MCP config) and only when their value is non-empty.
/// Values are passed through unvalidated.
pub fn build_invocation(
    prompt_path: impl Into<PathBuf>,
    options: &InvocationOptions,
) -> PreparedInvocation {
    let mut args: Vec<String> = BASE_ARGS.iter().map(|arg| (*arg).to_string()).collect();

    let flags = [
        ("--allowedTools", &options.allowed_tools),
        ("--disallowedTools", &options.disallowed_tools),
        ("--max-turns", &options.max_turns),
        ("--mcp-config", &options.mcp_config),
    ];

    for (flag, value) in flags {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            args.push(flag.to_string());
            args.push(value.to_string());
        }
    }

    PreparedInvocation::new(args, prompt_path)
}
