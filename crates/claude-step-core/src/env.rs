//! Provider credential checks run before anything is executed.

use claude_step_proto::EnvError;

const ANTHROPIC_VARS: &[&str] = &["ANTHROPIC_API_KEY"];
const BEDROCK_VARS: &[&str] = &["AWS_REGION", "AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY"];
const VERTEX_VARS: &[&str] = &["ANTHROPIC_VERTEX_PROJECT_ID", "CLOUD_ML_REGION"];

/// Checks that the credentials for the selected provider are present.
///
/// `lookup` resolves an environment variable; an empty value counts as unset.
/// Every missing variable is reported in a single error.
pub fn validate_environment<F>(lookup: F) -> Result<(), EnvError>
where
    F: Fn(&str) -> Option<String>,
{
    let is_set = |name: &str| lookup(name).is_some_and(|v| !v.is_empty());
    let flag = |name: &str| lookup(name).as_deref() == Some("1");

    let use_bedrock = flag("CLAUDE_CODE_USE_BEDROCK");
    let use_vertex = flag("CLAUDE_CODE_USE_VERTEX");

    if use_bedrock && use_vertex {
        return Err(EnvError::ConflictingProviders);
    }

    let (required, provider) = if use_bedrock {
        (BEDROCK_VARS, "using AWS Bedrock")
    } else if use_vertex {
        (VERTEX_VARS, "using Google Vertex AI")
    } else {
        (ANTHROPIC_VARS, "using direct Anthropic API")
    };

    let missing: Vec<String> = required
        .iter()
        .copied()
        .filter(|name| !is_set(*name))
        .map(|name| format!("  - {name} is required when {provider}."))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(EnvError::Missing(missing))
    }
}
