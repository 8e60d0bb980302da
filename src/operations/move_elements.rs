use egui::{CursorIcon, Pos2};

use super::{Operation, PointerHandler, Transition};
use crate::command::{Command, item_description};
use crate::input::{EventKind, PointerEvent};
use crate::state::{EditState, EditorContext};

/// Drags the selected elements with the pointer.
#[derive(Debug)]
pub struct MoveOperation {
    down: Pos2,
    initial: Option<EditState>,
    command: Option<Command>,
    moved: bool,
}

impl MoveOperation {
    pub fn new(down: Pos2) -> Self {
        Self {
            down,
            initial: None,
            command: None,
            moved: false,
        }
    }

    // Positions are always derived from the state at the start of the drag.
    fn move_to(&mut self, pointer: Pos2, ctx: &mut EditorContext) {
        let (Some(initial), Some(command)) = (&self.initial, self.command.take()) else {
            return;
        };
        let state = initial.with_selected_translated(pointer - self.down);
        let command = command.with_state(state);
        ctx.perform(command.clone());
        self.command = Some(command);
        self.moved = true;
    }
}

impl Operation for MoveOperation {
    fn name(&self) -> &'static str {
        "Move"
    }

    fn start(&mut self, ctx: &mut EditorContext) {
        let count = ctx.state().selected().len();
        self.initial = Some(ctx.state().clone());
        self.command = Some(ctx.build_command(item_description("Move", count)));
    }

    fn cursor_icon(&self) -> CursorIcon {
        CursorIcon::Grabbing
    }

    fn pointer_handler(&mut self) -> Option<&mut dyn PointerHandler> {
        Some(self)
    }
}

impl PointerHandler for MoveOperation {
    fn handle_event(&mut self, event: &PointerEvent, ctx: &mut EditorContext) -> Transition {
        let Some(pointer) = event.location else {
            return match event.kind {
                EventKind::Stop => Transition::Finish,
                _ => Transition::Continue,
            };
        };
        match event.kind {
            EventKind::Drag => {
                self.move_to(pointer, ctx);
                Transition::Continue
            }
            EventKind::Up => {
                // A release without travel leaves no history entry.
                if self.moved || pointer != self.down {
                    self.move_to(pointer, ctx);
                }
                Transition::Finish
            }
            _ => Transition::Continue,
        }
    }
}
