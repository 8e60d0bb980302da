use super::Command;
use crate::state::EditState;

/// Description of the entry every history starts from
pub const INITIAL_DESCRIPTION: &str = "Initial State";

/// Manages the history of executed commands for undo/redo functionality.
///
/// Entries are addressed by a cursor that always points one past the current state, so
/// `entries[cursor - 1]` holds the state on screen. The first entry is the state the
/// document was opened with and is never undone past.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    entries: Vec<Command>,
    cursor: usize,
    limit: usize,
}

impl UndoHistory {
    /// Start a history at `initial`, keeping at most `limit` entries
    pub fn new(initial: EditState, limit: usize) -> Self {
        Self {
            entries: vec![Command::new(INITIAL_DESCRIPTION, initial)],
            cursor: 1,
            limit: limit.max(2),
        }
    }

    /// Drop every entry and start again from `initial`
    pub fn reset(&mut self, initial: EditState) {
        log::debug!("Resetting undo history");
        self.entries.clear();
        self.entries.push(Command::new(INITIAL_DESCRIPTION, initial));
        self.cursor = 1;
    }

    /// Record a performed command.
    ///
    /// Redo entries are dropped. A command with the same description and selected slots as
    /// the previous entry replaces that entry's state instead of adding a new one.
    pub fn record(&mut self, command: Command) {
        if command.is_skip_undo() {
            return;
        }

        self.entries.truncate(self.cursor);

        if self.try_merge(&command) {
            log::debug!("Merged '{}' into previous history entry", command.description());
            return;
        }

        log::debug!("Recording '{}'", command.description());
        self.entries.push(command);
        self.cursor += 1;

        if self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
            self.cursor -= excess;
            log::debug!("Trimmed {} oldest history entries", excess);
        }
    }

    fn try_merge(&mut self, command: &Command) -> bool {
        if self.cursor == 0 || command.is_merge_disabled() {
            return false;
        }
        let prev = &mut self.entries[self.cursor - 1];
        if prev.description() != command.description()
            || prev.new_state().selected() != command.new_state().selected()
        {
            return false;
        }
        prev.set_state(command.new_state().clone());
        true
    }

    /// The entry an undo would revert, if there is one
    pub fn get_undo(&self) -> Option<&Command> {
        if self.cursor < 2 {
            return None;
        }
        self.entries.get(self.cursor - 1)
    }

    /// The entry a redo would reapply, if there is one
    pub fn get_redo(&self) -> Option<&Command> {
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.get_undo().is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.get_redo().is_some()
    }

    /// Menu label for undo, e.g. `"Undo Move Item"`
    pub fn undo_label(&self) -> Option<String> {
        self.get_undo().map(|c| format!("Undo {}", c.description()))
    }

    /// Menu label for redo, e.g. `"Redo Move Item"`
    pub fn redo_label(&self) -> Option<String> {
        self.get_redo().map(|c| format!("Redo {}", c.description()))
    }

    /// Step back one entry, returning the state to restore
    pub fn perform_undo(&mut self) -> Option<EditState> {
        self.get_undo()?;
        let state = self.entries[self.cursor - 2].new_state().clone();
        self.cursor -= 1;
        Some(state)
    }

    /// Step forward one entry, returning the state to restore
    pub fn perform_redo(&mut self) -> Option<EditState> {
        let state = self.get_redo()?.new_state().clone();
        self.cursor += 1;
        Some(state)
    }

    /// Remove the most recently recorded entry.
    ///
    /// Only allowed when that entry is the current one (no redo entries pending) and is not
    /// the initial entry.
    pub fn discard_last(&mut self) -> Option<Command> {
        if self.cursor < 2 || self.cursor != self.entries.len() {
            return None;
        }
        self.cursor -= 1;
        let discarded = self.entries.pop();
        if let Some(command) = &discarded {
            log::debug!("Discarded '{}' from history", command.description());
        }
        discarded
    }

    /// The state of the entry under the cursor
    pub fn current_state(&self) -> &EditState {
        self.entries[self.cursor - 1].new_state()
    }

    pub fn entries(&self) -> &[Command] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
