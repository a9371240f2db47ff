use thiserror::Error;

/// Failures of the extraction step that the caller reports differently.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Marker not found: {marker:?}")]
    MarkerNotFound { marker: String },

    #[error("JSON start not found after offset {from}")]
    NoObjectStart { from: usize },

    #[error("JSON end not found or malformed (object opened at offset {start})")]
    Incomplete { start: usize },
}

impl ExtractError {
    /// Stable snake_case tag for machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::MarkerNotFound { .. } => "marker_not_found",
            ExtractError::NoObjectStart { .. } => "no_object_start",
            ExtractError::Incomplete { .. } => "incomplete",
        }
    }

    /// Text offset to start a raw excerpt from, when there is one.
    pub fn excerpt_from(&self) -> Option<usize> {
        match self {
            ExtractError::MarkerNotFound { .. } => None,
            ExtractError::NoObjectStart { from } => Some(*from),
            ExtractError::Incomplete { start } => Some(*start),
        }
    }
}
