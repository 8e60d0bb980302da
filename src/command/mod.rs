pub mod edits;
pub mod history;

pub use history::UndoHistory;

use crate::state::EditState;

/// One undoable step: a description and the state it produces.
///
/// The state before the step is implicit: it is the previous entry in the history.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    description: String,
    new_state: EditState,
    merge_disabled: bool,
    skip_undo: bool,
}

impl Command {
    pub fn new(description: impl Into<String>, new_state: EditState) -> Self {
        Self {
            description: description.into(),
            new_state,
            merge_disabled: false,
            skip_undo: false,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn new_state(&self) -> &EditState {
        &self.new_state
    }

    pub fn into_state(self) -> EditState {
        self.new_state
    }

    /// Never fold this command into the previous history entry
    pub fn is_merge_disabled(&self) -> bool {
        self.merge_disabled
    }

    /// Apply the state without recording a history entry
    pub fn is_skip_undo(&self) -> bool {
        self.skip_undo
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_state(mut self, new_state: EditState) -> Self {
        self.new_state = new_state;
        self
    }

    pub fn with_merge_disabled(mut self, merge_disabled: bool) -> Self {
        self.merge_disabled = merge_disabled;
        self
    }

    pub fn with_skip_undo(mut self, skip_undo: bool) -> Self {
        self.skip_undo = skip_undo;
        self
    }

    pub(crate) fn set_state(&mut self, new_state: EditState) {
        self.new_state = new_state;
    }
}

/// `"Move Item"` for a single element, `"Move 3 Items"` otherwise
pub fn item_description(verb: &str, count: usize) -> String {
    if count <= 1 {
        format!("{verb} Item")
    } else {
        format!("{verb} {count} Items")
    }
}
