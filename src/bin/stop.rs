use anyhow::{Context, Result};
use std::io::{self, Read};
use std::path::Path;

use rust_confidence_hooks::*;

// Stop: annotate the final assistant response with a confidence display.
// This hook never blocks and never prompts; it only appends.
fn main() {
    debug::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "stop hook failed, allowing");
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

    let Some(transcript_path) = input.transcript_path.as_deref() else {
        tracing::debug!("no transcript path, nothing to annotate");
        return Ok(0);
    };

    let Some(text) = last_assistant_text(Path::new(transcript_path)) else {
        tracing::debug!("no assistant response found, nothing to annotate");
        return Ok(0);
    };

    // Responses that already state confidence keep their own wording.
    if confidence::explicit_confidence(&text).is_some() {
        tracing::debug!("response already states confidence, skipping annotation");
        return Ok(0);
    }
    if confidence::is_trivial_response(&text) {
        tracing::debug!("trivial response, skipping annotation");
        return Ok(0);
    }

    let mut cache = ConfigCache::from_env();
    let config = cache.get();

    let estimate = confidence::estimate(&text, &[], config.preset);
    let risk = risk::classify(&text, &[]);
    tracing::debug!(percent = estimate.percent, risk = %risk, "annotating final response");

    let decision = HookDecision::Approve {
        append_message: decision::format_confidence_display(&estimate, config.verbose, risk),
    };
    println!("{}", serde_json::to_string(&decision)?);
    Ok(0)
}
