//! Stream events and the raw transcript they are read from.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One decoded record from the Claude CLI's `stream-json` output.
///
/// Records are not interpreted beyond their `type` tag; the payload is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamEvent(Value);

impl StreamEvent {
    /// Parses a single transcript line.
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line).map(Self)
    }

    /// The `type` discriminator, when the record is an object carrying one.
    pub fn event_type(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Two-space indented rendering used for the console echo.
    pub fn to_pretty(&self) -> String {
        format!("{:#}", self.0)
    }
}

impl From<Value> for StreamEvent {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Ordered raw lines captured from one execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line. Trailing line terminators are stripped.
    pub fn push(&mut self, line: impl Into<String>) {
        let mut line = line.into();
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Newline-delimited rendering, each line terminated by `\n`.
    pub fn to_ndjson(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

impl<S: Into<String>> FromIterator<S> for Transcript {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut transcript = Self::new();
        for line in iter {
            transcript.push(line);
        }
        transcript
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_is_read_from_object() {
        let event = StreamEvent::parse(r#"{"type":"status","message":"ok"}"#).unwrap();
        assert_eq!(event.event_type(), Some("status"));
    }

    #[test]
    fn test_event_type_missing_for_non_objects() {
        let event = StreamEvent::parse("[1,2]").unwrap();
        assert_eq!(event.event_type(), None);
    }

    #[test]
    fn test_parse_rejects_malformed_line() {
        assert!(StreamEvent::parse(r#"{"type":"status""#).is_err());
    }

    #[test]
    fn test_pretty_uses_two_space_indent() {
        let event = StreamEvent::parse(r#"{"type":"info"}"#).unwrap();
        assert_eq!(event.to_pretty(), "{\n  \"type\": \"info\"\n}");
    }

    #[test]
    fn test_transcript_strips_line_endings() {
        let mut transcript = Transcript::new();
        transcript.push("{\"a\":1}\r\n");
        transcript.push("{\"b\":2}");

        assert_eq!(transcript.lines(), ["{\"a\":1}", "{\"b\":2}"]);
        assert_eq!(transcript.to_ndjson(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn test_empty_transcript_renders_empty() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.to_ndjson(), "");
    }
}
