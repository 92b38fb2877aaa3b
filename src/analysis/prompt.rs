//! The instruction template and reply contract exchanged with the
//! analysis capability.
//!
//! The template is a versioned constant with named placeholders rendered
//! in a fixed order; a placeholder addition or reorder is caught by the
//! validation below rather than silently shifting meaning. The reply is
//! expected to be a JSON object with a single `content` field holding a
//! markdown string without surrounding code fences.

use crate::models::InvestigationVerdict;
use serde_json::Value;
use tracing::warn;

/// Placeholders of [`INSTRUCTION_TEMPLATE_V1`], in render order.
const PLACEHOLDERS: [&str; 4] = ["{query}", "{evidence}", "{analysis}", "{other}"];

/// Version 1 of the analysis instruction.
pub const INSTRUCTION_TEMPLATE_V1: &str = "\
Hey, use your existing dataset and analyze the result I'm providing. Determine if the content is related to a scam, fraud, or phishing.

Return a single JSON object with one property: `content`.
The value of `content` should be a Markdown-formatted string (bold, lists, headers, etc.).
Do not include code blocks or wrap the response in triple backticks.
Return only the JSON object, without any explanation or surrounding text.

If uncertain based on the dataset and provided analysis, do not make unreliable guesses: advise cautiously and list red flags to watch for.

Query: {query}
Analysis: {evidence}
Analysis 2: {analysis}
Other content: {other}
";

/// Checks that the template carries each placeholder exactly once, in
/// the documented order. Called once at startup.
pub fn validate_template() -> Result<(), String> {
    let mut last_position = 0;

    for placeholder in PLACEHOLDERS {
        if INSTRUCTION_TEMPLATE_V1.matches(placeholder).count() != 1 {
            return Err(format!(
                "instruction template must contain {} exactly once",
                placeholder
            ));
        }

        let position = INSTRUCTION_TEMPLATE_V1
            .find(placeholder)
            .unwrap_or_default();
        if position < last_position {
            return Err(format!(
                "instruction template placeholder {} is out of order",
                placeholder
            ));
        }
        last_position = position;
    }

    Ok(())
}

/// Renders the instruction from the four evidence values.
///
/// Every value is null-coalesced to an empty string by the callers; this
/// function substitutes them verbatim.
pub fn render_instruction(query: &str, evidence: &str, analysis: &str, other: &str) -> String {
    INSTRUCTION_TEMPLATE_V1
        .replacen("{query}", query, 1)
        .replacen("{evidence}", evidence, 1)
        .replacen("{analysis}", analysis, 1)
        .replacen("{other}", other, 1)
}

/// Parses the analysis reply into a verdict.
///
/// A well-formed reply is `{"content": "<markdown>"}`. Anything else is a
/// parse failure: the verdict degrades to empty text with the raw reply
/// retained for diagnostics, and the investigation still completes.
pub fn parse_verdict(reply: &str) -> InvestigationVerdict {
    let content = serde_json::from_str::<Value>(reply)
        .ok()
        .and_then(|root| root.get("content")?.as_str().map(String::from));

    match content {
        Some(result_text) => InvestigationVerdict {
            result_text,
            raw_response: None,
        },
        None => {
            warn!("Failed to parse analysis reply; returning empty verdict");
            InvestigationVerdict {
                result_text: String::new(),
                raw_response: Some(reply.to_string()),
            }
        }
    }
}
