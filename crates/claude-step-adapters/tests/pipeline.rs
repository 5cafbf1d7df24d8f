//! End-to-end runs of the pipeline with the fixture driver and GitHub reporter.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use claude_step_adapters::{CANONICAL_RECORDS, FixtureDriver, GithubReporter};
use claude_step_core::{Pipeline, PromptInput, RunRequest, StepConfig};
use claude_step_proto::{Conclusion, ExitStatus, InvocationOptions, StepError};
use serde_json::Value;
use tempfile::TempDir;

struct Harness {
    dir: TempDir,
    config: StepConfig,
    reporter: GithubReporter<Vec<u8>>,
}

impl Harness {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = StepConfig {
            transcript_path: dir.path().join("output.txt"),
            execution_file: dir.path().join("claude-execution-output.json"),
            prompt_dir: dir.path().join("claude-action"),
            fixture_delay: Duration::ZERO,
            ..StepConfig::default()
        };
        let reporter = GithubReporter::new(Vec::new(), Some(dir.path().join("github_output")));
        Self {
            dir,
            config,
            reporter,
        }
    }

    fn output_file(&self) -> PathBuf {
        self.dir.path().join("github_output")
    }

    /// Step outputs as written to `$GITHUB_OUTPUT`.
    fn outputs(&self) -> HashMap<String, String> {
        let contents = std::fs::read_to_string(self.output_file()).unwrap_or_default();
        let mut outputs = HashMap::new();
        let mut lines = contents.lines();
        while let Some(header) = lines.next() {
            let (name, delimiter) = header.split_once("<<").unwrap();
            let value: Vec<&str> = lines.by_ref().take_while(|l| *l != delimiter).collect();
            outputs.insert(name.to_string(), value.join("\n"));
        }
        outputs
    }

    fn console(self) -> String {
        String::from_utf8(self.reporter.into_inner()).unwrap()
    }
}

fn api_key(name: &str) -> Option<String> {
    (name == "ANTHROPIC_API_KEY").then(|| "sk-ant-test".to_string())
}

fn read_log(path: &Path) -> Vec<Value> {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn canonical_stream_succeeds_with_five_records() {
    let harness = Harness::new();
    let driver = FixtureDriver::new().with_delay(Duration::ZERO);

    let outcome = Pipeline::new(&harness.config, &driver, &harness.reporter)
        .with_env(api_key)
        .run(&RunRequest {
            prompt: PromptInput::inline("Summarize the diff"),
            options: InvocationOptions::new().with_allowed_tools("Read"),
        })
        .await
        .unwrap();

    assert_eq!(outcome.conclusion(), Conclusion::Success);
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(outcome.execution_file(), Some(harness.config.execution_file.as_path()));

    let outputs = harness.outputs();
    assert_eq!(outputs["conclusion"], "success");
    assert_eq!(
        outputs["execution_file"],
        harness.config.execution_file.to_string_lossy()
    );

    let log = read_log(&harness.config.execution_file);
    let types: Vec<&str> = log.iter().map(|r| r["type"].as_str().unwrap()).collect();
    assert_eq!(types, ["status", "info", "response", "status", "metrics"]);
    assert_eq!(log[4]["tokens_used"], 150);

    let raw = std::fs::read_to_string(&harness.config.transcript_path).unwrap();
    assert_eq!(raw, CANONICAL_RECORDS.map(|r| format!("{r}\n")).concat());

    let console = harness.console();
    assert!(console.contains("Prompt file size: 18 bytes"));
    assert!(console.contains("Claude args: -p --verbose --output-format stream-json --allowedTools Read"));
    assert!(console.contains("Log saved to"));
}

#[tokio::test]
async fn execution_log_matches_transcript_lines() {
    let harness = Harness::new();
    let records = [
        r#"{"type":"system","subtype":"init","tools":["Read","Edit"]}"#,
        r#"{"type":"assistant","message":{"content":[{"type":"text","text":"Done."}]}}"#,
        r#"{"type":"result","cost_usd":0.01,"is_error":false}"#,
    ];
    let driver = FixtureDriver::new()
        .with_records(records)
        .with_delay(Duration::ZERO);

    Pipeline::new(&harness.config, &driver, &harness.reporter)
        .with_env(api_key)
        .run(&RunRequest {
            prompt: PromptInput::inline("go"),
            ..RunRequest::default()
        })
        .await
        .unwrap();

    let log = read_log(&harness.config.execution_file);
    let expected: Vec<Value> = records
        .iter()
        .map(|r| serde_json::from_str(r).unwrap())
        .collect();
    assert_eq!(log, expected);
}

#[tokio::test]
async fn empty_failed_run_omits_execution_file() {
    let harness = Harness::new();
    let driver = FixtureDriver::new()
        .with_records(Vec::<String>::new())
        .with_exit_status(ExitStatus::new(2))
        .with_delay(Duration::ZERO);

    let outcome = Pipeline::new(&harness.config, &driver, &harness.reporter)
        .with_env(api_key)
        .run(&RunRequest {
            prompt: PromptInput::inline("go"),
            ..RunRequest::default()
        })
        .await
        .unwrap();

    assert_eq!(outcome.conclusion(), Conclusion::Failure);
    assert_eq!(outcome.exit_code(), 2);
    assert!(outcome.execution_file().is_none());

    let outputs = harness.outputs();
    assert_eq!(outputs["conclusion"], "failure");
    assert!(!outputs.contains_key("execution_file"));
    assert!(!harness.config.execution_file.exists());
}

#[tokio::test]
async fn malformed_record_keeps_success_and_warns() {
    let harness = Harness::new();
    let driver = FixtureDriver::new()
        .with_records([
            r#"{"type":"status","message":"Starting"}"#,
            r#"{"type":"response","content":"truncated"#,
            r#"{"type":"metrics","tokens_used":1}"#,
        ])
        .with_delay(Duration::ZERO);

    let outcome = Pipeline::new(&harness.config, &driver, &harness.reporter)
        .with_env(api_key)
        .run(&RunRequest {
            prompt: PromptInput::inline("go"),
            ..RunRequest::default()
        })
        .await
        .unwrap();

    assert_eq!(outcome.conclusion(), Conclusion::Success);
    assert_eq!(outcome.exit_code(), 0);
    assert!(outcome.execution_file().is_none());

    let outputs = harness.outputs();
    assert_eq!(outputs["conclusion"], "success");
    assert!(!outputs.contains_key("execution_file"));

    let console = harness.console();
    assert!(console.contains("::warning::Failed to process output for execution metrics"));
}

#[tokio::test]
async fn prompt_file_input_is_used_in_place() {
    let harness = Harness::new();
    let prompt_path = harness.dir.path().join("task.md");
    std::fs::write(&prompt_path, "Triage the failing job").unwrap();
    let driver = FixtureDriver::new().with_delay(Duration::ZERO);

    let outcome = Pipeline::new(&harness.config, &driver, &harness.reporter)
        .with_env(api_key)
        .run(&RunRequest {
            prompt: PromptInput::file(&prompt_path),
            ..RunRequest::default()
        })
        .await
        .unwrap();

    assert_eq!(outcome.conclusion(), Conclusion::Success);
    assert!(!harness.config.prompt_dir.exists());
    let console = harness.console();
    assert!(console.contains(&format!(
        "Running Claude with prompt from file: {}",
        prompt_path.display()
    )));
}

#[tokio::test]
async fn missing_credentials_fail_before_any_output() {
    let harness = Harness::new();
    let driver = FixtureDriver::new().with_delay(Duration::ZERO);

    let err = Pipeline::new(&harness.config, &driver, &harness.reporter)
        .with_env(|_| None)
        .run(&RunRequest {
            prompt: PromptInput::inline("go"),
            ..RunRequest::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, StepError::Precondition(_)));
    assert!(harness.outputs().is_empty());
    assert!(!harness.config.transcript_path.exists());
}
