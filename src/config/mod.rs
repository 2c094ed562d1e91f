use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::confidence::ScoringPreset;
use crate::constants::{
    CONFIG_CACHE_TTL_SECS, DEFAULT_MIN_CONFIDENCE, DEFAULT_VERBOSE, HIGH_CONFIDENCE_THRESHOLD,
};

/// Environment override for the configuration file location.
pub const CONFIG_FILE_ENV: &str = "CONFIDENCE_CONFIG_FILE";

const CONFIG_FILE_NAME: &str = "confidence-config.json";
const CLAUDE_DIR: &str = ".claude";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub min_confidence: u8,
    pub verbose: bool,
    pub preset: ScoringPreset,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            verbose: DEFAULT_VERBOSE,
            preset: ScoringPreset::Canonical,
        }
    }
}

/// Parse a configuration document, substituting defaults for missing or
/// invalid fields. Unknown keys are ignored; a document that is not valid
/// JSON yields the full default configuration.
pub fn parse_configuration(text: &str) -> Configuration {
    let mut cfg = Configuration::default();

    let Ok(json) = serde_json::from_str::<Value>(text) else {
        return cfg;
    };

    if let Some(pct) = json.get("minConfidence").and_then(Value::as_u64) {
        cfg.min_confidence = pct.min(100) as u8;
    }
    if let Some(verbose) = json.get("verbose").and_then(Value::as_bool) {
        cfg.verbose = verbose;
    }
    if let Some(name) = json.get("estimatorPreset").and_then(Value::as_str) {
        if let Some(preset) = ScoringPreset::from_name(name) {
            cfg.preset = preset;
        }
    }

    cfg
}

// Resolution order: env override, then a project-local .claude directory,
// then the user-level one.
fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    let local = Path::new(CLAUDE_DIR).join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    let home = std::env::var_os("HOME")?;
    Some(Path::new(&home).join(CLAUDE_DIR).join(CONFIG_FILE_NAME))
}

/// Snapshot of the cache state for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct CacheStats {
    pub cached: bool,
    pub valid: bool,
    pub age: Option<Duration>,
    pub ttl: Duration,
}

#[derive(Debug)]
struct CacheEntry {
    value: Configuration,
    loaded_at: Instant,
}

/// TTL cache over the configuration file.
///
/// Owned by the hook execution context and passed explicitly rather than held
/// in module-level state. The cache timestamp is refreshed on failed loads
/// too, so a persistently broken source is re-read at most once per TTL
/// window.
#[derive(Debug)]
pub struct ConfigCache {
    path: Option<PathBuf>,
    ttl: Duration,
    cached: Option<CacheEntry>,
}

impl ConfigCache {
    /// Cache over the resolved well-known configuration location.
    pub fn from_env() -> Self {
        Self::new(resolve_config_path())
    }

    /// Cache over an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self::new(Some(path.into()))
    }

    fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            ttl: Duration::from_secs(CONFIG_CACHE_TTL_SECS),
            cached: None,
        }
    }

    pub fn get(&mut self) -> Configuration {
        self.get_at(Instant::now())
    }

    /// TTL check against an explicit instant so tests can drive the clock.
    pub fn get_at(&mut self, now: Instant) -> Configuration {
        if let Some(entry) = &self.cached {
            if now.duration_since(entry.loaded_at) < self.ttl {
                return entry.value.clone();
            }
        }

        let value = self.load();
        self.cached = Some(CacheEntry {
            value: value.clone(),
            loaded_at: now,
        });
        value
    }

    fn load(&self) -> Configuration {
        let Some(path) = &self.path else {
            return Configuration::default();
        };
        match std::fs::read_to_string(path) {
            Ok(text) => parse_configuration(&text),
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "config unreadable, using defaults");
                Configuration::default()
            }
        }
    }

    /// Drop the cached value; the next read bypasses the TTL.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn stats(&self) -> CacheStats {
        self.stats_at(Instant::now())
    }

    pub fn stats_at(&self, now: Instant) -> CacheStats {
        let age = self
            .cached
            .as_ref()
            .map(|entry| now.duration_since(entry.loaded_at));
        CacheStats {
            cached: self.cached.is_some(),
            valid: age.map_or(false, |age| age < self.ttl),
            age,
            ttl: self.ttl,
        }
    }

    pub fn min_confidence(&mut self) -> u8 {
        self.get().min_confidence
    }

    pub fn verbose(&mut self) -> bool {
        self.get().verbose
    }

    /// A threshold above 80 means the user demands explicit statements.
    pub fn is_high_confidence_required(&mut self) -> bool {
        self.min_confidence() > HIGH_CONFIDENCE_THRESHOLD
    }
}
