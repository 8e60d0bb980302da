pub mod context;
mod edit_state;
pub mod persistence;

pub use context::EditorContext;
pub use edit_state::EditState;
pub use persistence::{PersistenceError, PersistenceResult, export_elements, import_elements};
