//! Error types for layout recovery

/// Why a piece of model output could not be turned into a usable layout
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The text could not be read as a layout document, even after recovery
    #[error("Malformed layout document: {0}")]
    Malformed(String),

    /// The document parsed but contained no objects
    #[error("Layout document contains no objects")]
    EmptyResult,
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::Malformed(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
