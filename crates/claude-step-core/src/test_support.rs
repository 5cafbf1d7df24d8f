//! In-memory reporter for unit tests.

use std::sync::Mutex;

use claude_step_proto::Reporter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Info(String),
    Warn(String),
    Error(String),
    Output(String, String),
    Failed(String),
}

#[derive(Debug, Default)]
pub struct RecordingReporter {
    entries: Mutex<Vec<Entry>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                Entry::Info(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                Entry::Warn(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    /// Last value set for `name`.
    pub fn output(&self, name: &str) -> Option<String> {
        self.entries().into_iter().rev().find_map(|e| match e {
            Entry::Output(n, v) if n == name => Some(v),
            _ => None,
        })
    }

    fn push(&self, entry: Entry) {
        self.entries.lock().unwrap().push(entry);
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.push(Entry::Info(message.to_string()));
    }

    fn warn(&self, message: &str) {
        self.push(Entry::Warn(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Entry::Error(message.to_string()));
    }

    fn set_output(&self, name: &str, value: &str) {
        self.push(Entry::Output(name.to_string(), value.to_string()));
    }

    fn set_failed(&self, message: &str) {
        self.push(Entry::Failed(message.to_string()));
    }
}
