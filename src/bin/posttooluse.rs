use anyhow::{Context, Result};
use std::io::{self, Read};

use rust_confidence_hooks::*;

// PostToolUse: score the assistant's response right after a tool ran and
// gate high-risk operations on stated confidence.
fn main() {
    debug::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "posttooluse hook failed, allowing");
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

    let text = input.response_text().unwrap_or_default();
    let tool_names = input.invoked_tool_names();

    if text.trim().is_empty() && tool_names.is_empty() {
        tracing::debug!("no response content and no tool activity, nothing to evaluate");
        return Ok(0);
    }

    let mut cache = ConfigCache::from_env();
    let config = cache.get();

    // The named tool is the operation under review; prose only stands in
    // when the hook did not say which tool ran.
    let risk_text = match input.tool_name.as_deref() {
        Some(name) if !name.is_empty() => format!("Used tool: {name}"),
        _ => text.clone(),
    };
    let risk = risk::classify(&risk_text, &tool_names);

    let estimate = confidence::explicit_estimate(&text)
        .unwrap_or_else(|| confidence::estimate(&text, &tool_names, config.preset));
    tracing::debug!(
        percent = estimate.percent,
        explicit = estimate.is_explicit(),
        risk = %risk,
        tool = input.tool_name.as_deref().unwrap_or(""),
        "post-tool evaluation"
    );

    match decision::decide(HookEvent::PostToolUse, risk, &estimate, &config) {
        Some(decision) => {
            println!("{}", serde_json::to_string(&decision)?);
            Ok(decision.exit_code())
        }
        None => Ok(0),
    }
}
