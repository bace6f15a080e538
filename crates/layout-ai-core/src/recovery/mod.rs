//! Tolerant layout recovery
//!
//! Turns raw model output into a [`LayoutData`]:
//!
//! ```text
//! raw -> envelope unwrap -> sanitize -> balanced extraction
//!                                        | (not found)
//!                                        v
//!                                  truncation repair -> extraction
//!     -> strict parse -> (failure or zero objects) -> tolerant parse
//! ```
//!
//! Sanitizing, extraction and truncation repair never fail; they degrade to
//! the best text available. The strict parser fails fast and hands over to
//! the tolerant parser, and only an empty tolerant result is surfaced as an
//! error.

pub mod envelope;
pub mod extract;
pub mod sanitize;
pub mod scanner;
pub mod strict;
pub mod tolerant;
pub mod truncation;

pub use envelope::unwrap_envelope;
pub use extract::{extract_first_layout_like, first_balanced_object};
pub use sanitize::sanitize;
pub use strict::parse_strict;
pub use tolerant::parse_tolerant;
pub use truncation::repair_truncated;

use crate::error::Result;
use layout_ai_config::types::LayoutData;
use serde::Serialize;

/// Which stage of the pipeline produced the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryPath {
    /// A balanced document was found and parsed
    Strict,
    /// The document had to be closed by truncation repair first
    StrictAfterTruncationRepair,
    /// Objects were pulled out of the text by pattern matching
    Tolerant,
}

/// A recovered layout and how it was obtained
#[derive(Debug, Clone, PartialEq)]
pub struct Recovered {
    pub layout: LayoutData,
    pub path: RecoveryPath,
}

/// Run the full recovery pipeline on raw model output
pub fn recover_layout(raw: &str) -> Result<Recovered> {
    let unwrapped = unwrap_envelope(raw);
    let text = sanitize(unwrapped.as_deref().unwrap_or(raw));

    let (candidate, path) = match extract_first_layout_like(&text) {
        Some(document) => (document.to_string(), RecoveryPath::Strict),
        None => {
            tracing::debug!("No layout document found, attempting truncation repair");
            let repaired = repair_truncated(&text);
            let document = extract_first_layout_like(&repaired)
                .map(str::to_string)
                .unwrap_or(repaired);
            (document, RecoveryPath::StrictAfterTruncationRepair)
        }
    };

    let strict_error = match parse_strict(&candidate) {
        Ok(layout) => return Ok(Recovered { layout, path }),
        Err(err) => {
            tracing::debug!("Strict parse failed ({}), falling back to tolerant parser", err);
            err
        }
    };

    let layout = parse_tolerant(&text);
    if layout.objects.is_empty() {
        tracing::warn!("Layout recovery produced no objects");
        return Err(strict_error);
    }

    Ok(Recovered {
        layout,
        path: RecoveryPath::Tolerant,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    #[test]
    fn test_recover_fenced_document() {
        let raw = "```json\n{\"gameType\":\"td\",\"objects\":[{\"id\":\"A\",\"position\":{\"x\":1,\"y\":0,\"z\":2}}]}\n```";
        let recovered = recover_layout(raw).unwrap();
        assert_eq!(recovered.path, RecoveryPath::Strict);
        assert_eq!(recovered.layout.game_type, "td");
        assert_eq!(recovered.layout.objects.len(), 1);
    }

    #[test]
    fn test_recover_truncated_document() {
        let raw = r#"Sure! {"gameType":"td","objects":[{"id":"A","position":{"x":1,"y":0,"z":2}}"#;
        let recovered = recover_layout(raw).unwrap();
        assert_eq!(recovered.path, RecoveryPath::StrictAfterTruncationRepair);
        assert_eq!(recovered.layout.objects[0].id, "A");
    }

    #[test]
    fn test_recover_falls_back_to_tolerant() {
        let raw = r#"{"gameType":"td","objects":[{"id":"A","position":{"x":1,"y":0,"z":2}} {"id":"B" "position":{"x":3,"y":0,"z":4}}]}"#;
        let recovered = recover_layout(raw).unwrap();
        assert_eq!(recovered.path, RecoveryPath::Tolerant);
        assert_eq!(recovered.layout.objects.len(), 2);
        assert_eq!(recovered.layout.objects[1].id, "B");
    }

    #[test]
    fn test_empty_document_is_empty_result() {
        let err = recover_layout(r#"{"gameType":"td","objects":[]}"#).unwrap_err();
        assert_eq!(err, ParseError::EmptyResult);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let err = recover_layout("I cannot help with that.").unwrap_err();
        assert!(matches!(err, ParseError::Malformed(_)));
    }

    #[test]
    fn test_envelope_and_bare_document_agree() {
        let doc = r#"{"gameType":"td","theme":"desert","objects":[{"id":"A","position":{"x":1,"y":0,"z":2}}]}"#;
        let envelope = format!(
            r#"{{"choices":[{{"message":{{"content":{}}}}}]}}"#,
            serde_json::to_string(&format!("```json\n{doc}\n```")).unwrap()
        );

        let bare = recover_layout(doc).unwrap();
        let wrapped = recover_layout(&envelope).unwrap();
        assert_eq!(bare.layout, wrapped.layout);
    }
}
