use super::Operation;
use crate::state::EditorContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Undo,
    Redo,
}

/// Steps through the undo history
#[derive(Debug)]
pub struct HistoryOperation {
    direction: HistoryDirection,
}

impl HistoryOperation {
    pub fn undo() -> Self {
        Self {
            direction: HistoryDirection::Undo,
        }
    }

    pub fn redo() -> Self {
        Self {
            direction: HistoryDirection::Redo,
        }
    }

    pub fn direction(&self) -> HistoryDirection {
        self.direction
    }
}

impl Operation for HistoryOperation {
    fn name(&self) -> &'static str {
        match self.direction {
            HistoryDirection::Undo => "Undo",
            HistoryDirection::Redo => "Redo",
        }
    }

    fn should_be_enabled(&mut self, ctx: &EditorContext) -> bool {
        match self.direction {
            HistoryDirection::Undo => ctx.history().can_undo(),
            HistoryDirection::Redo => ctx.history().can_redo(),
        }
    }

    fn label_text(&self, ctx: &EditorContext) -> Option<String> {
        match self.direction {
            HistoryDirection::Undo => ctx.history().undo_label(),
            HistoryDirection::Redo => ctx.history().redo_label(),
        }
    }

    fn start(&mut self, ctx: &mut EditorContext) {
        let moved = match self.direction {
            HistoryDirection::Undo => ctx.undo(),
            HistoryDirection::Redo => ctx.redo(),
        };
        if !moved {
            log::debug!("Nothing to {}", self.name().to_lowercase());
        }
    }
}
