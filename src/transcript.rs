use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// One transcript record. Only `type == "assistant"` entries matter.
#[derive(Debug, Deserialize)]
struct TranscriptLine {
    #[serde(rename = "type")]
    type_: Option<String>,
    message: Option<TranscriptMessage>,
}

#[derive(Debug, Deserialize)]
struct TranscriptMessage {
    role: Option<String>,
    content: Option<MessageContent>,
}

/// Assistant message content: a plain string, an ordered list of blocks, or
/// any other JSON value (stringified on flattening).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
    Other(Value),
}

/// One element of list-form content. Only `type == "text"` blocks and bare
/// strings contribute text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ContentBlock {
    Bare(String),
    Typed {
        #[serde(rename = "type")]
        type_: String,
        #[serde(default)]
        text: String,
    },
    Other(Value),
}

impl MessageContent {
    /// Nothing inside worth selecting: the reverse scan keeps going.
    pub fn is_empty(&self) -> bool {
        match self {
            MessageContent::Text(text) => text.is_empty(),
            MessageContent::Blocks(blocks) => blocks.is_empty(),
            MessageContent::Other(value) => value.is_null(),
        }
    }

    /// Flatten to plain text: text blocks joined with newlines, strings
    /// as-is, anything else stringified directly.
    pub fn flatten(&self) -> String {
        match self {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Blocks(blocks) => {
                let parts: Vec<&str> = blocks
                    .iter()
                    .filter_map(|block| match block {
                        ContentBlock::Bare(text) => Some(text.as_str()),
                        ContentBlock::Typed { type_, text } if type_ == "text" => {
                            Some(text.as_str())
                        }
                        _ => None,
                    })
                    .collect();
                parts.join("\n")
            }
            MessageContent::Other(value) => value.to_string(),
        }
    }
}

/// Extract the flattened text of the most recent assistant message.
///
/// Scans the transcript backwards, parsing each line as an independent JSON
/// record and skipping malformed lines silently. The first entry with
/// `type == "assistant"`, `message.role == "assistant"` and non-empty content
/// is selected and scanning stops. Returns `None` when the file is
/// unreadable, no such entry exists, or the selected entry flattens to an
/// empty string; a read failure is "nothing to evaluate", never an error.
pub fn last_assistant_text(transcript_path: &Path) -> Option<String> {
    let raw = match std::fs::read_to_string(transcript_path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::debug!(path = %transcript_path.display(), error = %err, "transcript unreadable");
            return None;
        }
    };

    for line in raw.lines().rev() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let entry: TranscriptLine = match serde_json::from_str(line) {
            Ok(entry) => entry,
            Err(_) => continue,
        };
        if entry.type_.as_deref() != Some("assistant") {
            continue;
        }
        let Some(message) = entry.message else {
            continue;
        };
        if message.role.as_deref() != Some("assistant") {
            continue;
        }
        let Some(content) = message.content else {
            continue;
        };
        if content.is_empty() {
            continue;
        }
        let text = content.flatten();
        return if text.is_empty() { None } else { Some(text) };
    }

    tracing::debug!(path = %transcript_path.display(), "no assistant entry found");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_transcript(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn picks_last_assistant_string_content() {
        let file = write_transcript(&[
            r#"{"type":"assistant","message":{"role":"assistant","content":"first"}}"#,
            r#"{"type":"user","message":{"role":"user","content":"question"}}"#,
            r#"{"type":"assistant","message":{"role":"assistant","content":"second"}}"#,
        ]);
        assert_eq!(
            last_assistant_text(file.path()),
            Some("second".to_string())
        );
    }

    #[test]
    fn joins_text_blocks_and_skips_tool_use() {
        let file = write_transcript(&[
            r#"{"type":"assistant","message":{"role":"assistant","content":[{"type":"text","text":"part one"},{"type":"tool_use","name":"Bash","input":{"command":"ls"}},{"type":"text","text":"part two"},"bare string"]}}"#,
        ]);
        assert_eq!(
            last_assistant_text(file.path()),
            Some("part one\npart two\nbare string".to_string())
        );
    }

    #[test]
    fn skips_malformed_lines() {
        let file = write_transcript(&[
            r#"{"type":"assistant","message":{"role":"assistant","content":"kept"}}"#,
            "not json at all {{{",
            r#"{"truncated": "#,
        ]);
        assert_eq!(last_assistant_text(file.path()), Some("kept".to_string()));
    }

    #[test]
    fn no_assistant_entry_is_none() {
        let file = write_transcript(&[
            r#"{"type":"user","message":{"role":"user","content":"hello"}}"#,
            r#"{"type":"system","message":{"role":"system","content":"boot"}}"#,
        ]);
        assert_eq!(last_assistant_text(file.path()), None);
    }

    #[test]
    fn missing_file_is_none() {
        assert_eq!(
            last_assistant_text(Path::new("/nonexistent/transcript.jsonl")),
            None
        );
    }

    #[test]
    fn empty_content_keeps_scanning_to_older_entry() {
        let file = write_transcript(&[
            r#"{"type":"assistant","message":{"role":"assistant","content":"older answer"}}"#,
            r#"{"type":"assistant","message":{"role":"assistant","content":""}}"#,
            r#"{"type":"assistant","message":{"role":"assistant","content":[]}}"#,
        ]);
        assert_eq!(
            last_assistant_text(file.path()),
            Some("older answer".to_string())
        );
    }

    #[test]
    fn tool_use_only_content_stops_scan_with_none() {
        let file = write_transcript(&[
            r#"{"type":"assistant","message":{"role":"assistant","content":"should not be reached"}}"#,
            r#"{"type":"assistant","message":{"role":"assistant","content":[{"type":"tool_use","name":"Edit","input":{}}]}}"#,
        ]);
        assert_eq!(last_assistant_text(file.path()), None);
    }

    #[test]
    fn unexpected_content_shape_is_stringified() {
        let file = write_transcript(&[
            r#"{"type":"assistant","message":{"role":"assistant","content":42}}"#,
        ]);
        assert_eq!(last_assistant_text(file.path()), Some("42".to_string()));
    }

    #[test]
    fn wrong_role_is_ignored() {
        let file = write_transcript(&[
            r#"{"type":"assistant","message":{"role":"assistant","content":"real"}}"#,
            r#"{"type":"assistant","message":{"role":"user","content":"impostor"}}"#,
        ]);
        assert_eq!(last_assistant_text(file.path()), Some("real".to_string()));
    }
}
