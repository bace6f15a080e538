//! Provider response envelopes
//!
//! Callers may hand the pipeline either the generated text or the raw
//! provider payload that wraps it. This module recognizes the common
//! payload shapes and returns the generated text inside them.

use super::scanner::unescape;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Return the generated text carried by a provider payload, or `None` when
/// `text` is not an envelope (for example a bare layout document).
///
/// Recognized shapes:
/// - OpenAI chat completions: `choices[0].message.content` / `choices[0].text`
/// - Ollama: `message.content` (chat) or `response` (generate)
/// - OpenAI responses: `output_text` or `output[].content[].text`
/// - Anthropic messages: `content[].text`
///
/// Payloads that are not valid JSON fall back to a loose scan for the first
/// `"content"` or `"output_text"` string value.
pub fn unwrap_envelope(text: &str) -> Option<String> {
    let trimmed = text.trim();
    let content = match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => content_from_value(&value),
        Err(_) if trimmed.starts_with('{') => loose_content(trimmed),
        Err(_) => None,
    }?;

    if content.trim().is_empty() {
        return None;
    }
    tracing::debug!("Unwrapped provider envelope ({} bytes of content)", content.len());
    Some(content)
}

fn content_from_value(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    if object.contains_key("objects") || object.contains_key("gameType") {
        return None;
    }

    let direct = [
        "/choices/0/message/content",
        "/choices/0/text",
        "/message/content",
        "/output_text",
        "/response",
    ];
    if let Some(content) = direct
        .iter()
        .filter_map(|pointer| value.pointer(pointer))
        .find_map(text_of)
    {
        return Some(content);
    }

    if let Some(items) = object.get("output").and_then(Value::as_array) {
        let joined = join_text_parts(items.iter().filter_map(|item| item.get("content")));
        if joined.is_some() {
            return joined;
        }
    }

    object
        .get("content")
        .filter(|content| content.is_array())
        .and_then(|content| join_text_parts(std::iter::once(content)))
}

/// Concatenate the `text` fields of content-part arrays
fn join_text_parts<'a>(parts: impl Iterator<Item = &'a Value>) -> Option<String> {
    let texts: Vec<&str> = parts
        .filter_map(Value::as_array)
        .flatten()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    (!texts.is_empty()).then(|| texts.concat())
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) => Some(value.to_string()),
        _ => None,
    }
}

fn loose_content(text: &str) -> Option<String> {
    static ANCHOR: OnceLock<Option<Regex>> = OnceLock::new();
    let anchor = ANCHOR
        .get_or_init(|| Regex::new(r#""(?:content|output_text)"\s*:\s*""#).ok())
        .as_ref()?;

    let start = anchor.find(text)?.end();
    let mut escaped = false;
    let mut end = text.len();
    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            end = start + offset;
            break;
        }
    }

    Some(unescape(&text[start..end]))
}
