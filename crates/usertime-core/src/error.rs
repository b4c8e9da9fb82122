use std::path::PathBuf;

/// Errors produced by the display updater and its host capabilities.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The display target identifier does not resolve to an element.
    #[error("no element with id {id:?} in the page")]
    Lookup { id: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse {file}: {message}")]
    Parse { file: PathBuf, message: String },

    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Returns `true` for a failed display target lookup.
    pub fn is_lookup(&self) -> bool {
        matches!(self, CoreError::Lookup { .. })
    }
}
