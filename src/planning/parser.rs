//! Planner reply parsing.
//!
//! Replies are supposed to be a bare JSON object but often arrive wrapped in
//! prose or code fences. [`parse_plan`] tries the whole reply first, then the
//! object span located by [`extract_object_span`], and otherwise fails with
//! the raw text attached. It never invents a plan.

use serde::Serialize;
use serde_json::Value;

use crate::error::PlanParseError;
use crate::tools::ToolArgs;

/// The planner's decision: which agent should run which tool, with what arguments.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Plan {
    pub agent_name: Option<String>,
    pub tool: String,
    pub args: ToolArgs,
}

pub fn parse_plan(raw: &str) -> Result<Plan, PlanParseError> {
    let fail = |reason: String| PlanParseError {
        reason,
        raw: raw.to_string(),
    };

    let value = match serde_json::from_str::<Value>(raw.trim()) {
        Ok(value) => value,
        Err(strict_err) => {
            let span = extract_object_span(raw)
                .ok_or_else(|| fail(format!("no JSON object found ({strict_err})")))?;
            tracing::debug!(span_len = span.len(), "Recovering plan from embedded object");
            serde_json::from_str::<Value>(span)
                .map_err(|e| fail(format!("embedded object is not valid JSON: {e}")))?
        }
    };

    plan_from_value(value).map_err(fail)
}

fn plan_from_value(value: Value) -> Result<Plan, String> {
    let Value::Object(mut object) = value else {
        return Err("top-level value is not an object".to_string());
    };

    let tool = match object.remove("tool") {
        Some(Value::String(tool)) => tool,
        Some(_) => return Err("'tool' is not a string".to_string()),
        None => return Err("missing 'tool'".to_string()),
    };

    let agent_name = match object.remove("agent_name") {
        Some(Value::String(name)) => Some(name),
        None | Some(Value::Null) => None,
        Some(_) => return Err("'agent_name' is not a string".to_string()),
    };

    let args = match object.remove("args") {
        Some(Value::Object(args)) => args,
        None | Some(Value::Null) => ToolArgs::new(),
        Some(_) => return Err("'args' is not an object".to_string()),
    };

    Ok(Plan {
        agent_name,
        tool,
        args,
    })
}

/// Locate the first balanced `{...}` span in `text`.
///
/// Braces inside JSON string literals are ignored. If the first `{` is never
/// closed, falls back to the span ending at the last `}` so that a truncated
/// inner object does not hide an otherwise complete outer one.
pub fn extract_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
