//! Best-effort closing of documents cut off mid-generation

use super::scanner::open_containers;

/// Close every array and object left open at the end of `text`.
///
/// The scan starts at the first `{`; leading text before it is not part of
/// the result. Missing `]` are appended first, then missing `}`. A string
/// literal left open is closed before that. Nothing inside the document is
/// removed, so interior syntax errors survive for the parsers to reject.
/// Text without any `{` is returned unchanged.
pub fn repair_truncated(text: &str) -> String {
    let Some(start) = text.find('{') else {
        return text.to_string();
    };

    let document = &text[start..];
    let open = open_containers(document);

    let mut repaired = String::with_capacity(document.len() + open.braces + open.brackets + 1);
    repaired.push_str(document);
    if open.in_string {
        repaired.push('"');
    }
    repaired.extend(std::iter::repeat(']').take(open.brackets));
    repaired.extend(std::iter::repeat('}').take(open.braces));

    if repaired.len() != document.len() {
        tracing::debug!(
            "Appended {} closing brackets and {} closing braces to truncated document",
            open.brackets,
            open.braces
        );
    }

    repaired
}
