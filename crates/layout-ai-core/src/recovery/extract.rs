//! Balanced extraction of a layout document from surrounding noise

use super::scanner::balanced_object_spans;
use serde_json::Value;

/// Top-level keys that mark an object as a layout document
const LAYOUT_MARKERS: [&str; 2] = ["objects", "gameType"];

/// Find the first brace-balanced object in `text` that parses as JSON and
/// carries an `objects` or `gameType` key. Later candidates are ignored.
pub fn extract_first_layout_like(text: &str) -> Option<&str> {
    balanced_object_spans(text)
        .map(|(start, end)| &text[start..end])
        .find(|candidate| looks_like_layout(candidate))
}

/// First brace-balanced object in `text`, whatever it contains
pub fn first_balanced_object(text: &str) -> Option<&str> {
    balanced_object_spans(text)
        .next()
        .map(|(start, end)| &text[start..end])
}

fn looks_like_layout(candidate: &str) -> bool {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => LAYOUT_MARKERS.iter().any(|key| map.contains_key(*key)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_leading_noise() {
        let text = r#"Here is your level: {"gameType":"td","objects":[]} Enjoy!"#;
        assert_eq!(
            extract_first_layout_like(text),
            Some(r#"{"gameType":"td","objects":[]}"#)
        );
    }

    #[test]
    fn test_skips_non_layout_objects() {
        let text = r#"{"note":"draft"} {"objects":[{"id":"A","position":{"x":0,"y":0,"z":0}}]}"#;
        let found = extract_first_layout_like(text).unwrap();
        assert!(found.starts_with(r#"{"objects""#));
    }

    #[test]
    fn test_first_match_wins() {
        let text = r#"{"gameType":"first","objects":[]}{"gameType":"second","objects":[]}"#;
        assert_eq!(
            extract_first_layout_like(text),
            Some(r#"{"gameType":"first","objects":[]}"#)
        );
    }

    #[test]
    fn test_braces_inside_strings_ignored() {
        let text = r#"{"gameType":"t}d","theme":"{","objects":[]}"#;
        assert_eq!(extract_first_layout_like(text), Some(text));
    }

    #[test]
    fn test_unparseable_candidate_rejected() {
        let text = r#"{"gameType":"td" "objects":[]}"#;
        assert_eq!(extract_first_layout_like(text), None);
    }

    #[test]
    fn test_not_found_when_truncated() {
        let text = r#"{"objects":[{"id":"A","position":{"x":1,"y":0,"z":2}}"#;
        assert_eq!(extract_first_layout_like(text), None);
    }

    #[test]
    fn test_first_balanced_object() {
        assert_eq!(first_balanced_object(r#"x {"a":{"b":1}} y"#), Some(r#"{"a":{"b":1}}"#));
        assert_eq!(first_balanced_object("no braces"), None);
    }
}
