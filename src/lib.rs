use serde::Deserialize;
use std::collections::HashMap;

/// Common types and utilities for Claude Code confidence hooks

/// Safely truncate a UTF-8 string to a maximum number of characters
pub fn truncate_utf8_safe(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

/// Confidence extraction and heuristic estimation
pub mod confidence;

/// Configuration file loading with TTL caching
pub mod config;

/// Scoring weights and operational boundaries
pub mod constants;

/// File-backed diagnostic logging
pub mod debug;

/// Decision shapes and the gating engine
pub mod decision;

/// Risk classification for responses and tool activity
pub mod risk;

/// Transcript reading and content flattening
pub mod transcript;

// Re-export commonly used types for convenience
pub use confidence::{ConfidenceEstimate, ConfidenceSource, ScoringPreset};
pub use config::{CacheStats, ConfigCache, Configuration};
pub use decision::{DefaultAction, HookDecision, HookEvent, HookSpecificOutput, PromptGate};
pub use risk::RiskLevel;
pub use transcript::{last_assistant_text, MessageContent};

/// Claude Code hook input - the single JSON object each hook reads from
/// stdin. Every field is optional; hook points populate different subsets.
#[derive(Debug, Default, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub tool_input: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
    #[serde(default)]
    pub response: Option<ResponsePayload>,
    #[serde(default)]
    pub notification: Option<NotificationPayload>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub transcript_path: Option<String>, // Path to conversation JSON file
    #[serde(default)]
    pub cwd: Option<String>, // Current working directory
    #[serde(default)]
    pub hook_event_name: Option<String>,
}

impl HookInput {
    /// Parse the stdin payload. Malformed JSON yields an empty input so the
    /// hook fails open instead of erroring.
    pub fn from_json(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(input) => input,
            Err(err) => {
                tracing::debug!(error = %err, "hook input not parseable, using empty input");
                Self::default()
            }
        }
    }

    /// Every tool name visible to this hook: the batched `tool_calls` plus
    /// the single `tool_name` some hook points send instead.
    pub fn invoked_tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tool_calls
            .iter()
            .map(|call| call.function.name.clone())
            .filter(|name| !name.is_empty())
            .collect();
        if let Some(name) = self.tool_name.as_deref() {
            if !name.is_empty() {
                names.push(name.to_string());
            }
        }
        names
    }

    /// Flattened response text, when this hook point carries one.
    pub fn response_text(&self) -> Option<String> {
        let content = self.response.as_ref()?.content.as_ref()?;
        if content.is_empty() {
            return None;
        }
        Some(content.flatten())
    }

    /// Flattened notification text, when this hook point carries one.
    pub fn notification_text(&self) -> Option<String> {
        let content = self.notification.as_ref()?.content.as_ref()?;
        if content.is_empty() {
            return None;
        }
        Some(content.flatten())
    }
}

/// One entry of the `tool_calls` array: `{"function": {"name": ...}}`.
#[derive(Debug, Default, Deserialize)]
pub struct ToolCall {
    #[serde(default)]
    pub function: ToolFunction,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToolFunction {
    #[serde(default)]
    pub name: String,
}

/// Assistant response payload carried by PostToolUse input.
#[derive(Debug, Default, Deserialize)]
pub struct ResponsePayload {
    #[serde(default)]
    pub content: Option<MessageContent>,
}

/// Notification payload carried by Notification input.
#[derive(Debug, Default, Deserialize)]
pub struct NotificationPayload {
    #[serde(default)]
    pub content: Option<MessageContent>,
}
