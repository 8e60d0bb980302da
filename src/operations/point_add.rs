use egui::{CursorIcon, Pos2};

use super::{Operation, PointerHandler, Transition};
use crate::command::Command;
use crate::element::EditorElement;
use crate::input::{EventKind, PointerEvent};
use crate::state::{EditState, EditorContext};

const DESCRIPTION: &str = "Add Point";

/// Places a point on press and lets it be dragged into position before release.
#[derive(Debug, Default)]
pub struct PointAddOperation {
    base: Option<EditState>,
}

impl PointAddOperation {
    pub fn new() -> Self {
        Self::default()
    }

    fn place(&self, location: Pos2, ctx: &mut EditorContext) {
        let Some(base) = &self.base else {
            return;
        };
        let (state, _) = base.with_added_selected(EditorElement::point(location));
        ctx.perform(Command::new(DESCRIPTION, state));
    }
}

impl Operation for PointAddOperation {
    fn name(&self) -> &'static str {
        DESCRIPTION
    }

    fn cursor_icon(&self) -> CursorIcon {
        CursorIcon::Crosshair
    }

    fn pointer_handler(&mut self) -> Option<&mut dyn PointerHandler> {
        Some(self)
    }
}

impl PointerHandler for PointAddOperation {
    fn handle_event(&mut self, event: &PointerEvent, ctx: &mut EditorContext) -> Transition {
        match (event.kind, event.location) {
            (EventKind::Down, Some(location)) if !event.is_right() => {
                self.base = Some(ctx.state().clone());
                self.place(location, ctx);
                Transition::Continue
            }
            (EventKind::Drag, Some(location)) => {
                self.place(location, ctx);
                Transition::Continue
            }
            (EventKind::Up, _) if self.base.is_some() => Transition::Finish,
            (EventKind::Down, _) | (EventKind::Stop, _) => Transition::Finish,
            _ => Transition::Continue,
        }
    }
}
