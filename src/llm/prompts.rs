//! Prompt constants, on-disk prompt templates and tagged-output parsing.

use std::path::Path;

/// Placeholder substituted with the raw alert text in template files.
pub const ALERT_DETAILS_PLACEHOLDER: &str = "{{ALERT_DETAILS}}";

pub const SYSTEM_PROMPT_BASE: &str = "You are AlertPilot, an experienced site reliability \
    engineer. You analyze production alerts and provide accurate, actionable triage \
    guidance based on evidence.";

pub const CLASSIFICATION_PROMPT: &str = "Classify the alert into one category. \
    First explain your reasoning, then answer in this XML format:

<reasoning>
Brief explanation of the classification, naming the decisive keywords.
</reasoning>

<category>
One of: dependency_error, database_error, network_error, resource_error, other
</category>

<confidence>
A value between 0 and 1.
</confidence>";

pub const TRIAGE_PROMPT: &str = "Analyze the alert and provide:
1. Most likely root causes, ordered by probability
2. Impact assessment (severity, affected systems, blast radius)
3. Immediate mitigation steps
4. Long-term prevention measures

Be specific and reference the evidence in the alert text.";

/// Substitute the alert details into a prompt template string.
pub fn render_template(template: &str, alert_details: &str) -> String {
    template.replace(ALERT_DETAILS_PLACEHOLDER, alert_details)
}

/// Load a prompt template from disk and substitute the alert details.
pub fn load_template(path: &Path, alert_details: &str) -> std::io::Result<String> {
    let template = std::fs::read_to_string(path)?;
    Ok(render_template(&template, alert_details))
}

/// Extract the content of the first `<tag>…</tag>` pair from LLM output.
/// Returns None when the tags are absent or malformed.
pub fn extract_xml<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);

    let start = text.find(&open)? + open.len();
    let end = text[start..].find(&close)? + start;
    Some(text[start..end].trim())
}
