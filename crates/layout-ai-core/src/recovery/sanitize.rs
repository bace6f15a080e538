//! Text cleanup applied to raw model output before parsing

use super::extract::{extract_first_layout_like, first_balanced_object};
use super::scanner::{unescape, Lexeme, Scanner, Token};

const FENCE: &str = "```";

/// Clean up raw model output. Each step is a no-op when its precondition
/// does not hold:
///
/// 1. strip a surrounding code fence (first line and trailing fence)
/// 2. unwrap a document encoded as one JSON string literal
/// 3. insert missing commas between `}` and `{`
/// 4. drop trailing commas before `}` or `]`
///
/// Comma fixes only touch characters outside string literals.
pub fn sanitize(raw: &str) -> String {
    let text = strip_code_fence(raw.trim());
    let text = unwrap_quoted_document(text.trim());
    fix_commas(text.trim()).trim().to_string()
}

/// Remove a surrounding code fence, keeping its interior verbatim
pub fn strip_code_fence(text: &str) -> &str {
    if text.len() < 2 * FENCE.len() || !text.starts_with(FENCE) || !text.ends_with(FENCE) {
        return text;
    }

    let end = text.len() - FENCE.len();
    let start = match text.find('\n') {
        Some(newline) => newline + 1,
        None => FENCE.len(),
    };

    if start > end {
        return text;
    }
    &text[start..end]
}

/// Unescape a text that is entirely one JSON string literal, then narrow
/// the result to the document inside it.
pub fn unwrap_quoted_document(text: &str) -> String {
    if !is_single_string_literal(text) {
        return text.to_string();
    }

    let unescaped = unescape(&text[1..text.len() - 1]);
    extract_first_layout_like(&unescaped)
        .or_else(|| first_balanced_object(&unescaped))
        .map(str::to_string)
        .unwrap_or(unescaped)
}

fn is_single_string_literal(text: &str) -> bool {
    if text.len() < 2 || !text.starts_with('"') || !text.ends_with('"') {
        return false;
    }

    Scanner::new(text)
        .find(|l| l.token == Token::StringEnd)
        .is_some_and(|l| l.offset == text.len() - 1)
}

enum CommaEdit {
    InsertAfter(usize),
    Remove(usize),
}

/// Insert commas between adjacent objects and remove trailing commas
pub fn fix_commas(text: &str) -> String {
    let mut edits = Vec::new();
    let mut previous: Option<Lexeme> = None;

    for lexeme in Scanner::new(text) {
        if lexeme.token == Token::Whitespace {
            continue;
        }

        if let Some(prev) = previous {
            match (prev.token, lexeme.token) {
                (Token::CloseBrace, Token::OpenBrace) => {
                    edits.push(CommaEdit::InsertAfter(prev.offset))
                }
                (Token::Comma, Token::CloseBrace | Token::CloseBracket) => {
                    edits.push(CommaEdit::Remove(prev.offset))
                }
                _ => {}
            }
        }

        previous = Some(lexeme);
    }

    if edits.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + edits.len());
    let mut cursor = 0;
    for edit in edits {
        match edit {
            CommaEdit::InsertAfter(offset) => {
                out.push_str(&text[cursor..=offset]);
                out.push(',');
                cursor = offset + 1;
            }
            CommaEdit::Remove(offset) => {
                out.push_str(&text[cursor..offset]);
                cursor = offset + 1;
            }
        }
    }
    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence() {
        let raw = "```json\n{\"objects\":[]}\n```";
        assert_eq!(sanitize(raw), "{\"objects\":[]}");
    }

    #[test]
    fn test_fence_without_language() {
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}\n");
    }

    #[test]
    fn test_unterminated_fence_untouched() {
        let raw = "```json\n{\"objects\":[]}";
        assert_eq!(strip_code_fence(raw), raw);
    }

    #[test]
    fn test_quoted_document_unwrapped() {
        let raw = r#""{\"gameType\":\"td\",\"objects\":[]} trailing noise""#;
        assert_eq!(sanitize(raw), r#"{"gameType":"td","objects":[]}"#);
    }

    #[test]
    fn test_two_string_literals_not_unwrapped() {
        let raw = r#""a", "b""#;
        assert_eq!(unwrap_quoted_document(raw), raw);
    }

    #[test]
    fn test_missing_and_trailing_commas() {
        let clean = fix_commas(r#"{"a":1,}{"b":2}"#);
        assert!(clean.contains("},{"));
        assert!(!clean.contains(",}"));
        assert_eq!(clean, r#"{"a":1},{"b":2}"#);
    }

    #[test]
    fn test_commas_across_whitespace() {
        let clean = fix_commas("[{\"a\":1}\n  {\"b\":2} ,\n]");
        assert_eq!(clean, "[{\"a\":1},\n  {\"b\":2} \n]");
    }

    #[test]
    fn test_commas_inside_strings_untouched() {
        let text = r#"{"note":"}{ and ,}","objects":[]}"#;
        assert_eq!(fix_commas(text), text);
    }

    #[test]
    fn test_well_formed_document_round_trips() {
        let doc = r#"{"schemaVersion":"1.0.0","gameType":"td","objects":[{"id":"A","position":{"x":1,"y":0,"z":2}}]}"#;
        let cleaned = sanitize(&format!("  {doc}\n"));
        assert_eq!(cleaned, doc);
        assert_eq!(extract_first_layout_like(&cleaned), Some(doc));
    }
}
