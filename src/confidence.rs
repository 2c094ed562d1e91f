//! Confidence extraction and estimation for assistant responses.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::*;

// Compile once; never panic if a pattern fails to build.
static EXPLICIT_PATTERNS: Lazy<Vec<Result<Regex, regex::Error>>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)confidence:\s*(\d{1,3})%"),
        Regex::new(r"(?i)confidence\s*[:-]\s*(\d{1,3})%"),
        Regex::new(r"(?i)(\d{1,3})%\s*confident"),
    ]
});

static TRIVIAL_PATTERNS: Lazy<Vec<Result<Regex, regex::Error>>> = Lazy::new(|| {
    vec![
        Regex::new(r"^(yes|no)\.?$"),
        Regex::new(r"^(ok|okay)\.?$"),
        Regex::new(r"^(thanks?|thank you)\.?$"),
        Regex::new(r"^[^a-zA-Z]*$"),
    ]
});

static NUMBERED_LIST_RE: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"(?m)^\d+\."));

const STRONG_SUCCESS_PHRASES: &[&str] = &[
    "successfully completed",
    "working correctly",
    "fixed the issue",
    "problem solved",
];

const SUCCESS_WORDS: &[&str] = &[
    "successfully",
    "completed",
    "fixed",
    "working",
    "done",
    "resolved",
];

const PRECISION_WORDS: &[&str] = &["exactly", "precisely", "specifically", "correct", "accurate"];

const STRONG_UNCERTAINTY_PHRASES: &[&str] = &[
    "not sure",
    "unclear",
    "uncertain",
    "i think",
    "i believe",
    "i assume",
];

const HEDGING_PHRASES: &[&str] = &[
    "might",
    "maybe",
    "possibly",
    "probably",
    "likely",
    "should work",
    "seems",
    "appears",
    "could be",
    "might be",
    "try this",
    "attempt to",
];

const ERROR_WORDS: &[&str] = &["error", "issue", "problem", "failed", "broken"];

const SOLUTION_WORDS: &[&str] = &["fix", "solve", "resolve", "correct"];

// Tool tokens are matched case-sensitively in prose (they are proper names
// there) and case-insensitively against invocation identifiers.
const SAFE_TOOL_TOKENS: &[&str] = &["Read", "LS", "Grep", "Glob"];
const MEDIUM_TOOL_TOKENS: &[&str] = &["Bash", "WebFetch"];
const RISKY_TOOL_TOKENS: &[&str] = &["Edit", "Write", "MultiEdit"];

/// Where a confidence percentage came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceSource {
    Explicit,
    Estimated,
}

/// A confidence judgment with the signals that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfidenceEstimate {
    /// Percentage; explicit statements are reported unclamped.
    pub percent: u16,
    pub source: ConfidenceSource,
    pub reasons: Vec<String>,
}

impl ConfidenceEstimate {
    pub fn is_explicit(&self) -> bool {
        self.source == ConfidenceSource::Explicit
    }
}

/// Base score and clamp bounds for heuristic estimation. The legacy presets
/// preserve the calibration of earlier deployments for users tuned to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringPreset {
    Canonical,
    PromptLegacy,
    DisplayLegacy,
    PosttoolLegacy,
}

impl ScoringPreset {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "canonical" => Some(Self::Canonical),
            "prompt-legacy" => Some(Self::PromptLegacy),
            "display-legacy" => Some(Self::DisplayLegacy),
            "posttool-legacy" => Some(Self::PosttoolLegacy),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Canonical => "canonical",
            Self::PromptLegacy => "prompt-legacy",
            Self::DisplayLegacy => "display-legacy",
            Self::PosttoolLegacy => "posttool-legacy",
        }
    }

    fn base(&self) -> i32 {
        match self {
            Self::Canonical | Self::DisplayLegacy => 50,
            Self::PromptLegacy => 35,
            Self::PosttoolLegacy => 60,
        }
    }

    fn bounds(&self) -> (i32, i32) {
        match self {
            Self::Canonical | Self::PromptLegacy => (15, 85),
            Self::DisplayLegacy => (10, 95),
            Self::PosttoolLegacy => (30, 85),
        }
    }
}

/// Extract an explicit confidence statement. The integer is returned as
/// written, without clamping; a claimed 150% is the caller's problem.
pub fn explicit_confidence(text: &str) -> Option<u16> {
    for pattern in EXPLICIT_PATTERNS.iter() {
        let Ok(re) = pattern.as_ref() else { continue };
        let Some(caps) = re.captures(text) else {
            continue;
        };
        if let Some(pct) = caps.get(1).and_then(|m| m.as_str().parse::<u16>().ok()) {
            return Some(pct);
        }
    }
    None
}

/// True when the response carries nothing worth scoring: bare
/// acknowledgements, punctuation-only text, or anything under the minimum
/// meaningful length.
pub fn is_trivial_response(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_MEANINGFUL_RESPONSE_CHARS {
        return true;
    }
    let lowered = trimmed.to_lowercase();
    TRIVIAL_PATTERNS.iter().any(|pattern| {
        pattern
            .as_ref()
            .map(|re| re.is_match(&lowered))
            .unwrap_or(false)
    })
}

fn count_present(text: &str, vocabulary: &[&str]) -> usize {
    vocabulary
        .iter()
        .filter(|entry| text.contains(*entry))
        .count()
}

fn invocation_matches(name_lower: &str, tokens: &[&str]) -> bool {
    tokens
        .iter()
        .any(|token| name_lower.contains(&token.to_ascii_lowercase()))
}

// Prose mentions and actual invocations both count; an invocation lands in
// its most severe tier only.
fn tool_signal_counts(text: &str, tool_names: &[String]) -> (usize, usize, usize) {
    let mut safe = count_present(text, SAFE_TOOL_TOKENS);
    let mut medium = count_present(text, MEDIUM_TOOL_TOKENS);
    let mut risky = count_present(text, RISKY_TOOL_TOKENS);

    for name in tool_names {
        let name = name.to_lowercase();
        if invocation_matches(&name, RISKY_TOOL_TOKENS) {
            risky += 1;
        } else if invocation_matches(&name, MEDIUM_TOOL_TOKENS) {
            medium += 1;
        } else if invocation_matches(&name, SAFE_TOOL_TOKENS) {
            safe += 1;
        }
    }

    (safe, medium, risky)
}

/// Heuristic confidence estimation from response characteristics.
///
/// Starts at the preset's base score, applies each signal independently, and
/// clamps to the preset's bounds. Every triggered signal appends a reason so
/// callers can show the user what moved the needle.
pub fn estimate(text: &str, tool_names: &[String], preset: ScoringPreset) -> ConfidenceEstimate {
    let (floor, ceiling) = preset.bounds();
    let mut score = preset.base();
    let mut reasons = Vec::new();

    if text.trim().is_empty() {
        return ConfidenceEstimate {
            percent: score.clamp(floor, ceiling) as u16,
            source: ConfidenceSource::Estimated,
            reasons,
        };
    }

    let text_lower = text.to_lowercase();

    if STRONG_SUCCESS_PHRASES
        .iter()
        .any(|phrase| text_lower.contains(phrase))
    {
        score += STRONG_SUCCESS_BONUS;
        reasons.push("Strong success indicators".to_string());
    }

    let success_count = count_present(&text_lower, SUCCESS_WORDS);
    if success_count > 0 {
        score += (success_count as i32 * SUCCESS_WORD_WEIGHT).min(SUCCESS_WORD_CAP);
        reasons.push("Expressing completion or success".to_string());
    }

    if count_present(&text_lower, PRECISION_WORDS) > 0 {
        score += PRECISION_BONUS;
        reasons.push("Precise, specific language".to_string());
    }

    let (safe_tools, medium_tools, risky_tools) = tool_signal_counts(text, tool_names);
    if safe_tools > 0 {
        score += (safe_tools as i32 * SAFE_TOOL_WEIGHT).min(SAFE_TOOL_CAP);
        reasons.push("Read-only tool usage".to_string());
    }
    if medium_tools > 0 {
        score += (medium_tools as i32 * MEDIUM_TOOL_WEIGHT).min(MEDIUM_TOOL_CAP);
        reasons.push("Shell or web tool usage".to_string());
    }
    if risky_tools > 0 {
        score += (risky_tools as i32 * RISKY_TOOL_WEIGHT).min(RISKY_TOOL_CAP);
        reasons.push("Taking concrete action with file edits".to_string());
    }

    let uncertainty_count = count_present(&text_lower, STRONG_UNCERTAINTY_PHRASES);
    if uncertainty_count > 0 {
        score -= uncertainty_count as i32 * STRONG_UNCERTAINTY_PENALTY;
        reasons.push("Strong uncertainty language".to_string());
    }

    let hedging_count = count_present(&text_lower, HEDGING_PHRASES);
    if hedging_count > 0 {
        score -= hedging_count as i32 * HEDGING_PENALTY;
        reasons.push("Hedging language".to_string());
    }

    let question_count = text.matches('?').count();
    if question_count > 0 {
        score -= (question_count as i32 * QUESTION_MARK_PENALTY).min(QUESTION_MARK_CAP);
        reasons.push("Open questions in the response".to_string());
    }

    let error_count = count_present(&text_lower, ERROR_WORDS);
    let solution_count = count_present(&text_lower, SOLUTION_WORDS);
    if error_count > solution_count {
        score -= (error_count - solution_count) as i32 * UNRESOLVED_ERROR_PENALTY;
        reasons.push("Discussing problems or failures".to_string());
    }

    let char_count = text.chars().count();
    if char_count < VERY_SHORT_RESPONSE_CHARS {
        score -= VERY_SHORT_RESPONSE_PENALTY;
        reasons.push("Very brief response may lack detail".to_string());
    } else if char_count < SHORT_RESPONSE_CHARS {
        score -= SHORT_RESPONSE_PENALTY;
        reasons.push("Brief response".to_string());
    } else if char_count > DETAILED_RESPONSE_CHARS {
        score += DETAILED_RESPONSE_BONUS;
        reasons.push("Providing comprehensive explanation".to_string());
    }

    let code_blocks = text.matches("```").count();
    if code_blocks > 0 {
        score += (code_blocks as i32 * CODE_BLOCK_WEIGHT).min(CODE_BLOCK_CAP);
        reasons.push("Includes code examples".to_string());
    }

    if NUMBERED_LIST_RE
        .as_ref()
        .map(|re| re.is_match(text))
        .unwrap_or(false)
    {
        score += NUMBERED_LIST_BONUS;
        reasons.push("Structured step-by-step response".to_string());
    }

    ConfidenceEstimate {
        percent: score.clamp(floor, ceiling) as u16,
        source: ConfidenceSource::Estimated,
        reasons,
    }
}

/// An explicit statement packaged as a full estimate, when present.
pub fn explicit_estimate(text: &str) -> Option<ConfidenceEstimate> {
    explicit_confidence(text).map(|percent| ConfidenceEstimate {
        percent,
        source: ConfidenceSource::Explicit,
        reasons: vec!["Explicit confidence statement found".to_string()],
    })
}

/// Full evaluation pipeline: an explicit statement always wins and is never
/// trivial-gated, trivial responses yield nothing, everything else is
/// estimated.
pub fn evaluate(
    text: &str,
    tool_names: &[String],
    preset: ScoringPreset,
) -> Option<ConfidenceEstimate> {
    if let Some(explicit) = explicit_estimate(text) {
        return Some(explicit);
    }

    if is_trivial_response(text) {
        return None;
    }

    Some(estimate(text, tool_names, preset))
}
