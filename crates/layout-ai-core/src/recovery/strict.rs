//! Structural parsing of well-formed layout documents

use crate::error::{ParseError, Result};
use layout_ai_config::types::LayoutData;

/// Deserialize a layout document.
///
/// Fails with [`ParseError::Malformed`] on syntax errors or a missing
/// `objects` array, and with [`ParseError::EmptyResult`] when the document
/// is valid but has no objects.
pub fn parse_strict(text: &str) -> Result<LayoutData> {
    let layout: LayoutData = serde_json::from_str(text)?;
    if layout.objects.is_empty() {
        return Err(ParseError::EmptyResult);
    }
    Ok(layout)
}
