//! Inbound envelope parsing.
//!
//! Two shapes are accepted, discriminated by `type`:
//! `{"type": "behavior", "behavior": .., "target"?, "duration"?, "context"?}` and
//! `{"type": "command", "plan": {"sequence": [..]}}`. A missing `type` means `behavior` (or
//! `command` when only a `plan` is present). Text wrapped in a markdown code fence is unwrapped.

use mate_exec::{ExecutionPlan, ExecutorConfig, RawPlan};
use serde::{Deserialize, Serialize};

use crate::command::DEFAULT_DURATION;
use crate::{BehaviorCommand, BehaviorVerb, CommandError, Context};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    Behavior(BehaviorCommand),
    #[serde(rename = "command")]
    Plan(ExecutionPlan),
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: Option<String>,
    id: Option<String>,
    behavior: Option<String>,
    target: Option<String>,
    duration: Option<f64>,
    #[serde(default)]
    context: Context,
    plan: Option<RawPlan>,
}

pub fn parse_message(raw: &str, exec: &ExecutorConfig) -> Result<InboundMessage, CommandError> {
    let trimmed = raw.trim();
    let envelope: Envelope = match serde_json::from_str(trimmed) {
        Ok(envelope) => envelope,
        Err(err) => match extract_json_from_codeblock(trimmed) {
            Some(inner) => serde_json::from_str(inner)?,
            None => return Err(err.into()),
        },
    };

    let kind = match envelope.kind.as_deref() {
        Some(kind) => kind.to_ascii_lowercase(),
        None if envelope.behavior.is_none() && envelope.plan.is_some() => "command".to_string(),
        None => "behavior".to_string(),
    };

    match kind.as_str() {
        "behavior" => {
            let verb = envelope
                .behavior
                .ok_or(CommandError::MissingField("behavior"))?;
            let mut command = BehaviorCommand::new(BehaviorVerb::parse(&verb))
                .with_duration(envelope.duration.map_or(DEFAULT_DURATION, |d| d as f32));
            if let Some(id) = envelope.id {
                command = command.with_id(id);
            }
            command.target = envelope.target.filter(|t| !t.trim().is_empty());
            command.context = envelope.context;
            Ok(InboundMessage::Behavior(command))
        }
        "command" => {
            let plan = envelope.plan.ok_or(CommandError::MissingField("plan"))?;
            Ok(InboundMessage::Plan(ExecutionPlan::from_raw(
                envelope.id,
                &plan,
                exec,
            )?))
        }
        other => Err(CommandError::UnknownType(other.to_string())),
    }
}

/// Body of a ```` ```json ```` (or bare ```` ``` ````) fenced block.
fn extract_json_from_codeblock(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = text.get(open + 3..)?;
    let body_start = after_fence.find('\n').map_or(0, |nl| nl + 1);
    let body = after_fence.get(body_start..)?;
    let end = body.find("```")?;
    body.get(..end).map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_fenced_json() {
        let text = "Sure!\n```json\n{\"behavior\": \"hold\"}\n```\n";
        assert_eq!(extract_json_from_codeblock(text), Some("{\"behavior\": \"hold\"}"));
        let bare = "```\n{}\n```";
        assert_eq!(extract_json_from_codeblock(bare), Some("{}"));
        assert_eq!(extract_json_from_codeblock("no fence"), None);
    }
}
