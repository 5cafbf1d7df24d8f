//! Narrow status-reporting interface to the CI platform.

/// Name of the output carrying `success` or `failure`.
pub const OUTPUT_CONCLUSION: &str = "conclusion";

/// Name of the output carrying the execution log path.
pub const OUTPUT_EXECUTION_FILE: &str = "execution_file";

/// Sink for console lines, annotations, and named step outputs.
///
/// Implementations must not fail: reporting problems are logged by the
/// implementation and otherwise ignored, so a run is never aborted because
/// the CI platform could not be told about it.
pub trait Reporter: Send + Sync {
    /// Plain console line.
    fn info(&self, message: &str);

    /// Non-fatal warning annotation.
    fn warn(&self, message: &str);

    /// Error annotation.
    fn error(&self, message: &str);

    /// Sets a named step output.
    fn set_output(&self, name: &str, value: &str);

    /// Marks the step as failed with a message.
    fn set_failed(&self, message: &str);
}
