/// Centralized scoring and gating constants
/// These values define the signal weights, caps, and boundaries used by the
/// confidence estimator and the decision engine
// Heuristic signal weights and caps
pub const STRONG_SUCCESS_BONUS: i32 = 20;
pub const SUCCESS_WORD_WEIGHT: i32 = 8;
pub const SUCCESS_WORD_CAP: i32 = 15;
pub const PRECISION_BONUS: i32 = 8;
pub const SAFE_TOOL_WEIGHT: i32 = 5;
pub const SAFE_TOOL_CAP: i32 = 10;
pub const MEDIUM_TOOL_WEIGHT: i32 = 8;
pub const MEDIUM_TOOL_CAP: i32 = 15;
pub const RISKY_TOOL_WEIGHT: i32 = 6;
pub const RISKY_TOOL_CAP: i32 = 12;
pub const STRONG_UNCERTAINTY_PENALTY: i32 = 12;
pub const HEDGING_PENALTY: i32 = 6;
pub const QUESTION_MARK_PENALTY: i32 = 4;
pub const QUESTION_MARK_CAP: i32 = 12;
pub const UNRESOLVED_ERROR_PENALTY: i32 = 8;
pub const CODE_BLOCK_WEIGHT: i32 = 6;
pub const CODE_BLOCK_CAP: i32 = 15;
pub const NUMBERED_LIST_BONUS: i32 = 5;

// Response length boundaries
pub const VERY_SHORT_RESPONSE_CHARS: usize = 30;
pub const VERY_SHORT_RESPONSE_PENALTY: i32 = 15;
pub const SHORT_RESPONSE_CHARS: usize = 100;
pub const SHORT_RESPONSE_PENALTY: i32 = 8;
pub const DETAILED_RESPONSE_CHARS: usize = 1000;
pub const DETAILED_RESPONSE_BONUS: i32 = 8;

// Triviality gate
pub const MIN_MEANINGFUL_RESPONSE_CHARS: usize = 20;
pub const MIN_NOTIFICATION_CONTENT_CHARS: usize = 10;

// Risk classification
pub const TOOL_CALL_VOLUME_THRESHOLD: usize = 3;

// Decision gating
pub const ESTIMATE_PROMPT_BUFFER: u8 = 10;

// Configuration provider
pub const DEFAULT_MIN_CONFIDENCE: u8 = 50;
pub const DEFAULT_VERBOSE: bool = true;
pub const CONFIG_CACHE_TTL_SECS: u64 = 30;
pub const HIGH_CONFIDENCE_THRESHOLD: u8 = 80;
