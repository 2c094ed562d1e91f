//! Decision shapes and the gating engine.
//!
//! Decisions serialize to the exact JSON the host expects on stdout; the
//! engine maps a confidence judgment plus a risk level onto at most one
//! decision per hook run.

use serde::Serialize;

use crate::confidence::ConfidenceEstimate;
use crate::config::Configuration;
use crate::constants::ESTIMATE_PROMPT_BUFFER;
use crate::risk::RiskLevel;

/// Hook point this process was invoked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    UserPromptSubmit,
    PostToolUse,
    Stop,
    Notification,
}

impl HookEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserPromptSubmit => "UserPromptSubmit",
            Self::PostToolUse => "PostToolUse",
            Self::Stop => "Stop",
            Self::Notification => "Notification",
        }
    }

    /// Gate configuration for hooks that may ask the user whether to
    /// continue. Annotation-only hooks return no gate.
    pub fn prompt_gate(&self) -> Option<PromptGate> {
        match self {
            Self::UserPromptSubmit => Some(PromptGate {
                buffer: 0,
                default_action: DefaultAction::Block,
            }),
            Self::Notification => Some(PromptGate {
                buffer: ESTIMATE_PROMPT_BUFFER,
                default_action: DefaultAction::Continue,
            }),
            Self::PostToolUse | Self::Stop => None,
        }
    }
}

/// What happens when the user does not answer an interactive prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultAction {
    Block,
    Continue,
}

/// Interactive-prompt gate. The buffer widens the acceptable band for
/// heuristic scores; explicit statements are held to the full threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptGate {
    pub buffer: u8,
    pub default_action: DefaultAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookSpecificOutput {
    #[serde(rename = "hookEventName")]
    pub hook_event_name: String,
    #[serde(rename = "additionalContext")]
    pub additional_context: String,
}

/// One decision per hook run, serialized verbatim to stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum HookDecision {
    Block {
        reason: String,
    },
    Allow {
        #[serde(rename = "hookSpecificOutput")]
        hook_specific_output: HookSpecificOutput,
    },
    PromptUser {
        message: String,
        allow_continue: bool,
        default_action: DefaultAction,
    },
    Approve {
        append_message: String,
    },
}

impl HookDecision {
    /// Only a block halts the host action.
    pub fn exit_code(&self) -> i32 {
        match self {
            HookDecision::Block { .. } => 1,
            _ => 0,
        }
    }
}

pub const MANDATORY_CONFIDENCE_REASON: &str = "🎯 **MANDATORY CONFIDENCE REQUIRED**\n\nThis operation involves high-risk changes (file edits, system commands, deletions).\n\n**Please add explicit confidence to your response:**\n`Confidence: X% - [your reasoning]`\n\n**Then submit your response again.**";

pub const MEDIUM_RISK_REQUEST: &str = "\n\n⚠️ 🎯 **CONFIDENCE ASSESSMENT REQUESTED**\n\nThis operation has medium risk. Please evaluate your confidence:\n**Confidence: X% - [your reasoning]**";

pub const LOW_RISK_REQUEST: &str = "\n\n💭 **Optional:** Consider adding confidence assessment:\n**Confidence: X% - [your reasoning]**";

pub fn prompt_message(percent: u16, threshold: u8) -> String {
    format!(
        "⚠️ 🎯 Claude's confidence is {percent}% (below your {threshold}% threshold). Continue anyway?"
    )
}

pub fn explicit_meets_display(percent: u16, threshold: u8) -> String {
    format!("✅ 🎯 Confidence: {percent}% (meets {threshold}% threshold)")
}

/// User-facing confidence line: score, the signals behind it when verbose,
/// and a risk annotation for medium and high.
pub fn format_confidence_display(
    estimate: &ConfidenceEstimate,
    verbose: bool,
    risk: RiskLevel,
) -> String {
    let mut message = format!("🎯 Confidence: {}% 🎯", estimate.percent);

    if verbose && !estimate.reasons.is_empty() {
        let bullets: Vec<String> = estimate
            .reasons
            .iter()
            .map(|reason| format!("• {reason}"))
            .collect();
        message.push_str(&format!("\nBased on:  {}", bullets.join(" ")));
    }

    if risk >= RiskLevel::Medium {
        message.push_str(&format!(" (Risk: {risk})"));
    }

    message
}

fn allow_with_context(event: HookEvent, context: &str) -> HookDecision {
    HookDecision::Allow {
        hook_specific_output: HookSpecificOutput {
            hook_event_name: event.as_str().to_string(),
            additional_context: context.to_string(),
        },
    }
}

/// Map a confidence judgment and risk level onto a decision. `None` is a
/// silent allow.
///
/// Order matters: a high-risk score below the threshold blocks no matter
/// where the score came from; the prompt gate runs next; after that an
/// explicit statement is never re-annotated, so running the engine twice
/// over the same message is a no-op both times.
pub fn decide(
    event: HookEvent,
    risk: RiskLevel,
    estimate: &ConfidenceEstimate,
    config: &Configuration,
) -> Option<HookDecision> {
    let threshold = u16::from(config.min_confidence);

    if risk == RiskLevel::High && estimate.percent < threshold {
        return Some(HookDecision::Block {
            reason: MANDATORY_CONFIDENCE_REASON.to_string(),
        });
    }

    if let Some(gate) = event.prompt_gate() {
        let effective = if estimate.is_explicit() {
            threshold
        } else {
            threshold.saturating_sub(u16::from(gate.buffer))
        };
        if estimate.percent < effective {
            return Some(HookDecision::PromptUser {
                message: prompt_message(estimate.percent, config.min_confidence),
                allow_continue: true,
                default_action: gate.default_action,
            });
        }
    }

    if estimate.is_explicit() {
        return None;
    }

    match risk {
        RiskLevel::High => Some(allow_with_context(event, MANDATORY_CONFIDENCE_REASON)),
        RiskLevel::Medium => Some(allow_with_context(event, MEDIUM_RISK_REQUEST)),
        RiskLevel::Low => Some(allow_with_context(event, LOW_RISK_REQUEST)),
        RiskLevel::None => None,
    }
}
