use thiserror::Error;

/// Errors surfaced by the editing engine's fallible edges (configuration, geometry input).
///
/// Stale slot indices are not represented here: they mean the edit state is corrupt and
/// the engine panics instead of returning an error.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// Result type for fallible editor operations
pub type EditorResult<T> = Result<T, EditorError>;
