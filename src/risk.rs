//! Risk classification for assistant responses and tool activity.

use std::fmt;

use crate::constants::TOOL_CALL_VOLUME_THRESHOLD;

/// Risk tier of the work described by a response, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    None,   // No actionable signal at all
    Low,    // Read-only tool usage or suggestion-style language
    Medium, // State changes that are recoverable
    High,   // Data loss or system-level changes
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::None => "none",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Prose vocabularies, matched as lowercase substrings. Trailing spaces on the
// shell fragments keep "rm" and "mv" from firing inside ordinary words.
const HIGH_RISK_TEXT: &[&str] = &[
    "delete",
    "remove",
    "rm ",
    "unlink",
    "drop",
    "truncate",
    "format",
    "wipe",
    "destroy",
    "kill",
    "terminate",
    "sudo",
    "chmod",
    "chown",
    "mv ",
    "move",
];

const MEDIUM_RISK_TEXT: &[&str] = &[
    "edit", "modify", "change", "update", "replace", "install", "config", "settings", "deploy",
];

// Several entries here are shadowed by the higher tiers; they only decide
// between low and none.
const SUGGESTION_TEXT: &[&str] = &[
    "suggest",
    "recommend",
    "should",
    "could",
    "would",
    "consider",
    "improve",
    "fix",
    "change",
    "update",
    "modify",
    "implement",
    "propose",
    "add",
    "remove",
    "replace",
    "refactor",
    "optimize",
];

// Tool-name vocabularies, matched as lowercase substrings of invocation names.
const HIGH_RISK_TOOLS: &[&str] = &[
    "edit",
    "write",
    "multiedit",
    "delete",
    "bash",
    "remove",
    "move",
    "notebookedit",
    "rm ",
    "mv ",
    "cp -f",
];

const MEDIUM_RISK_TOOLS: &[&str] = &["webfetch", "task", "commit", "push", "git "];

const LOW_RISK_TOOLS: &[&str] = &["read", "grep", "glob", "ls", "notebookread"];

fn text_matches(text: &str, vocabulary: &[&str]) -> bool {
    vocabulary.iter().any(|keyword| text.contains(keyword))
}

fn tool_matches(tools: &[String], vocabulary: &[&str]) -> bool {
    tools
        .iter()
        .any(|name| vocabulary.iter().any(|keyword| name.contains(keyword)))
}

/// Classify the risk of a response given its text and the tool invocations
/// made in the same turn.
///
/// Tiers are evaluated in descending severity and the first match wins, so
/// text carrying both "delete" and "update" lands on high. Matching is
/// substring-based and deliberately over-flags: a false high is a nuisance,
/// a false none is a missed destructive action.
pub fn classify(text: &str, tool_names: &[String]) -> RiskLevel {
    let text = text.to_lowercase();
    let tools: Vec<String> = tool_names.iter().map(|name| name.to_lowercase()).collect();

    if text_matches(&text, HIGH_RISK_TEXT) || tool_matches(&tools, HIGH_RISK_TOOLS) {
        return RiskLevel::High;
    }

    if text_matches(&text, MEDIUM_RISK_TEXT)
        || tool_matches(&tools, MEDIUM_RISK_TOOLS)
        || tools.len() > TOOL_CALL_VOLUME_THRESHOLD
    {
        return RiskLevel::Medium;
    }

    // Any tool invocation at all floors the level at low.
    if text_matches(&text, SUGGESTION_TEXT)
        || tool_matches(&tools, LOW_RISK_TOOLS)
        || !tools.is_empty()
    {
        return RiskLevel::Low;
    }

    RiskLevel::None
}
