//! Diagnostic logging, kept strictly off stdout.
//!
//! stdout carries the hook protocol, so every diagnostic event is appended to
//! a log file under `~/.claude`. Initialization failures are swallowed: hooks
//! must keep working when the log cannot.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "confidence-hooks-debug.log";

fn log_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".claude").join(LOG_FILE_NAME))
}

/// Install the file-backed subscriber. Safe to call more than once; later
/// calls are no-ops.
pub fn init() {
    let Some(path) = log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
