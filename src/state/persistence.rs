use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::EditState;
use crate::element::EditorElement;
use crate::error::EditorError;

/// Errors that can occur while exchanging elements with storage
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize elements: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid element data: {0}")]
    InvalidState(String),
}

impl From<EditorError> for PersistenceError {
    fn from(err: EditorError) -> Self {
        PersistenceError::InvalidState(err.to_string())
    }
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Serialized form of an annotation document
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ElementsDocument {
    version: String,
    elements: Vec<EditorElement>,
}

/// Serialize the elements of `state` to JSON
pub fn export_elements(state: &EditState) -> PersistenceResult<String> {
    let document = ElementsDocument {
        version: env!("CARGO_PKG_VERSION").to_string(),
        elements: state.elements().to_vec(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Parse elements from JSON, correcting degenerate boxes and rejecting broken polygons
pub fn import_elements(json: &str) -> PersistenceResult<Vec<EditorElement>> {
    let document: ElementsDocument = serde_json::from_str(json)?;
    if document.version != env!("CARGO_PKG_VERSION") {
        log::warn!(
            "Elements version {} differs from current version {}",
            document.version,
            env!("CARGO_PKG_VERSION")
        );
    }
    document
        .elements
        .into_iter()
        .map(|element| element.validated().map_err(PersistenceError::from))
        .collect()
}
