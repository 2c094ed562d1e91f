use anyhow::{Context, Result};
use std::io::{self, Read};
use std::path::Path;

use rust_confidence_hooks::*;

// UserPromptSubmit: validate the confidence of the previous assistant
// response before the next prompt goes through. Plaintext on stdout becomes
// context; a JSON decision gates the prompt.
fn main() {
    debug::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "userpromptsubmit hook failed, allowing prompt");
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
        tracing::debug!("no transcript path, allowing prompt");
        return Ok(0);
    };

    let Some(text) = last_assistant_text(Path::new(transcript_path)) else {
        tracing::debug!("no assistant response to evaluate, allowing prompt");
        return Ok(0);
    };
    tracing::debug!(
        preview = %truncate_utf8_safe(&text, 120),
        "evaluating last assistant response"
    );

    let mut cache = ConfigCache::from_env();
    let config = cache.get();

    let Some(estimate) = confidence::evaluate(&text, &[], config.preset) else {
        tracing::debug!("trivial response, nothing to evaluate");
        return Ok(0);
    };
    tracing::debug!(
        percent = estimate.percent,
        explicit = estimate.is_explicit(),
        "confidence evaluated"
    );

    match decision::decide(
        HookEvent::UserPromptSubmit,
        RiskLevel::None,
        &estimate,
        &config,
    ) {
        Some(decision) => {
            println!("{}", serde_json::to_string(&decision)?);
            Ok(decision.exit_code())
        }
        None => {
            // Threshold met: show the user what passed and why.
            if estimate.is_explicit() {
                println!(
                    "{}",
                    decision::explicit_meets_display(estimate.percent, config.min_confidence)
                );
            } else {
                println!(
                    "{}",
                    decision::format_confidence_display(&estimate, config.verbose, RiskLevel::None)
                );
            }
            Ok(0)
        }
    }
}
