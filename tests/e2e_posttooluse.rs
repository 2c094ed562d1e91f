use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn run_hook(dir: &Path, input: &serde_json::Value) -> Output {
    let bin = env!("CARGO_BIN_EXE_posttooluse");
    let mut child = Command::new(bin)
        .current_dir(dir)
        .env("HOME", dir)
        .env_remove("CONFIDENCE_CONFIG_FILE")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(input.to_string().as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn response(text: &str) -> serde_json::Value {
    serde_json::json!({"content": [{"type": "text", "text": text}]})
}

#[test]
fn e2e_posttooluse_blocks_edit_without_stated_confidence() {
    let temp = tempfile::tempdir().unwrap();
    let input = serde_json::json!({
        "tool_name": "Edit",
        "response": response("Updated the function to use the new API."),
        "hook_event_name": "PostToolUse"
    });
    let out = run_hook(temp.path(), &input);
    assert_eq!(out.status.code(), Some(1));
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["decision"], "block");
    let reason = v["reason"].as_str().unwrap();
    assert!(reason.contains("MANDATORY CONFIDENCE REQUIRED"), "reason: {reason}");
}

#[test]
fn e2e_posttooluse_allows_explicit_confident_edit() {
    let temp = tempfile::tempdir().unwrap();
    let input = serde_json::json!({
        "tool_name": "Edit",
        "response": response("Confidence: 85% - change verified by the test suite."),
        "hook_event_name": "PostToolUse"
    });
    let out = run_hook(temp.path(), &input);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn e2e_posttooluse_blocks_explicit_confidence_below_threshold() {
    let temp = tempfile::tempdir().unwrap();
    let input = serde_json::json!({
        "tool_name": "Write",
        "response": response("Confidence: 30% - untested guess."),
        "hook_event_name": "PostToolUse"
    });
    let out = run_hook(temp.path(), &input);
    assert_eq!(out.status.code(), Some(1));
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["decision"], "block");
}

#[test]
fn e2e_posttooluse_requests_confidence_for_medium_risk() {
    let temp = tempfile::tempdir().unwrap();
    let input = serde_json::json!({
        "tool_name": "WebFetch",
        "response": response(
            "Fetched the changelog and summarized the relevant entries for the upgrade plan."
        ),
        "hook_event_name": "PostToolUse"
    });
    let out = run_hook(temp.path(), &input);
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["decision"], "allow");
    assert_eq!(v["hookSpecificOutput"]["hookEventName"], "PostToolUse");
    let ctx = v["hookSpecificOutput"]["additionalContext"].as_str().unwrap();
    assert!(ctx.contains("CONFIDENCE ASSESSMENT REQUESTED"), "context: {ctx}");
}

#[test]
fn e2e_posttooluse_read_only_tool_gets_optional_request() {
    let temp = tempfile::tempdir().unwrap();
    let input = serde_json::json!({
        "tool_name": "Read",
        "response": response("The config file sets retries to 3."),
        "hook_event_name": "PostToolUse"
    });
    let out = run_hook(temp.path(), &input);
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["decision"], "allow");
    let ctx = v["hookSpecificOutput"]["additionalContext"].as_str().unwrap();
    assert!(ctx.contains("Optional:"), "context: {ctx}");
}

#[test]
fn e2e_posttooluse_call_volume_elevates_risk() {
    let temp = tempfile::tempdir().unwrap();
    let input = serde_json::json!({
        "tool_calls": [
            {"function": {"name": "Read"}},
            {"function": {"name": "Grep"}},
            {"function": {"name": "Glob"}},
            {"function": {"name": "LS"}}
        ],
        "response": response("Collected the relevant sources for review."),
        "hook_event_name": "PostToolUse"
    });
    let out = run_hook(temp.path(), &input);
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["decision"], "allow");
    let ctx = v["hookSpecificOutput"]["additionalContext"].as_str().unwrap();
    assert!(ctx.contains("CONFIDENCE ASSESSMENT REQUESTED"), "context: {ctx}");
}

#[test]
fn e2e_posttooluse_silent_without_content_or_tools() {
    let temp = tempfile::tempdir().unwrap();
    let out = run_hook(temp.path(), &serde_json::json!({}));
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn e2e_posttooluse_malformed_stdin_fails_open() {
    let temp = tempfile::tempdir().unwrap();
    let bin = env!("CARGO_BIN_EXE_posttooluse");
    let mut child = Command::new(bin)
        .current_dir(temp.path())
        .env("HOME", temp.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(b"{broken json")
        .unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}
