use anyhow::{Context, Result};
use std::io::{self, Read};

use rust_confidence_hooks::*;

// Notification: surface a confidence check on notification content. Always
// exits 0; the strongest outcome here is an interactive prompt.
fn main() {
    debug::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "notification hook failed, allowing");
            0
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;

    let input = HookInput::from_json(&buffer);

    let Some(text) = input.notification_text() else {
        tracing::debug!("no notification content, nothing to evaluate");
        return Ok(0);
    };
    if text.trim().chars().count() < constants::MIN_NOTIFICATION_CONTENT_CHARS {
        tracing::debug!("notification too short to evaluate");
        return Ok(0);
    }

    let tool_names = input.invoked_tool_names();

    let mut cache = ConfigCache::from_env();
    let config = cache.get();

    let estimate = confidence::explicit_estimate(&text)
        .unwrap_or_else(|| confidence::estimate(&text, &tool_names, config.preset));
    tracing::debug!(
        percent = estimate.percent,
        explicit = estimate.is_explicit(),
        "notification evaluated"
    );

    if let Some(decision) = decision::decide(
        HookEvent::Notification,
        RiskLevel::None,
        &estimate,
        &config,
    ) {
        println!("{}", serde_json::to_string(&decision)?);
    }
    Ok(0)
}
