//! Console lines shared by every driver.

use claude_step_proto::{PreparedInvocation, Reporter, StreamEvent};
use tracing::debug;

/// Reports the prompt size, prompt path, and arguments before execution.
///
/// A prompt file that cannot be stat'ed is reported as `unknown` size.
pub(crate) async fn announce(invocation: &PreparedInvocation, reporter: &dyn Reporter) {
    let prompt_path = invocation.prompt_path();
    let size = match tokio::fs::metadata(prompt_path).await {
        Ok(metadata) => metadata.len().to_string(),
        Err(err) => {
            debug!(path = %prompt_path.display(), error = %err, "Prompt file size unavailable");
            "unknown".to_string()
        }
    };

    reporter.info(&format!("Prompt file size: {size} bytes"));
    reporter.info(&format!(
        "Running Claude with prompt from file: {}",
        prompt_path.display()
    ));
    reporter.info(&format!("Claude args: {}", invocation.command_line()));
}

/// Echoes one transcript line, pretty-printed when it is JSON.
pub(crate) fn echo_line(line: &str, reporter: &dyn Reporter) {
    match StreamEvent::parse(line) {
        Ok(event) => reporter.info(&event.to_pretty()),
        Err(_) => reporter.info(line),
    }
}
