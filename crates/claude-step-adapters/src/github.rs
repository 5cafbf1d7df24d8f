//! GitHub Actions implementation of [`Reporter`].
//!
//! Annotations are written as workflow commands (`::warning::`, `::error::`)
//! and step outputs are appended to the file named by `$GITHUB_OUTPUT`.

use std::fs::OpenOptions;
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use claude_step_proto::Reporter;
use tracing::warn;
use uuid::Uuid;

/// Environment variable naming the step output file.
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Reporter that speaks the GitHub Actions workflow-command protocol.
///
/// Reporting never fails: write errors are logged and dropped.
pub struct GithubReporter<W = Stdout> {
    out: Mutex<W>,
    output_file: Option<PathBuf>,
}

impl GithubReporter<Stdout> {
    /// Writes to stdout and appends outputs to `$GITHUB_OUTPUT` when it is set.
    pub fn from_env() -> Self {
        let output_file = std::env::var_os(GITHUB_OUTPUT_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self::new(io::stdout(), output_file)
    }
}

impl<W: Write + Send> GithubReporter<W> {
    /// Without an output file, outputs fall back to the legacy `::set-output` command.
    pub fn new(out: W, output_file: Option<PathBuf>) -> Self {
        Self {
            out: Mutex::new(out),
            output_file,
        }
    }

    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, line: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            warn!(error = %err, "Failed to write to console");
        }
    }

    fn command(&self, name: &str, message: &str) {
        self.emit(&format!("::{name}::{}", escape_data(message)));
    }
}

impl<W: Write + Send> Reporter for GithubReporter<W> {
    fn info(&self, message: &str) {
        self.emit(message);
    }

    fn warn(&self, message: &str) {
        self.command("warning", message);
    }

    fn error(&self, message: &str) {
        self.command("error", message);
    }

    fn set_output(&self, name: &str, value: &str) {
        match &self.output_file {
            Some(path) => {
                if let Err(err) = append_output(path, name, value) {
                    warn!(
                        name,
                        path = %path.display(),
                        error = %err,
                        "Failed to write step output"
                    );
                }
            }
            None => self.emit(&format!(
                "::set-output name={}::{}",
                escape_property(name),
                escape_data(value)
            )),
        }
    }

    fn set_failed(&self, message: &str) {
        self.command("error", message);
    }
}

/// Appends `name<<DELIM\nvalue\nDELIM\n` to the output file.
fn append_output(path: &Path, name: &str, value: &str) -> io::Result<()> {
    let delimiter = unique_delimiter();
    if name.contains(&delimiter) || value.contains(&delimiter) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("output '{name}' contains the delimiter '{delimiter}'"),
        ));
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    write!(file, "{name}<<{delimiter}\n{value}\n{delimiter}\n")?;
    file.flush()
}

fn unique_delimiter() -> String {
    format!("ghadelimiter_{}", Uuid::new_v4())
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}
