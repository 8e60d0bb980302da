use egui::{CursorIcon, Pos2, Rect, Shape};

use super::{Operation, PointerHandler, Transition, overlay};
use crate::command::edits;
use crate::input::{EventKind, PointerEvent};
use crate::selection::slots_within;
use crate::state::EditorContext;

/// Selects the elements lying entirely inside a dragged box.
#[derive(Debug)]
pub struct BoxSelectOperation {
    down: Pos2,
    current: Option<Pos2>,
    add_to_selection: bool,
}

impl BoxSelectOperation {
    /// `add_to_selection` keeps the existing selection and adds to it
    pub fn new(down: Pos2, add_to_selection: bool) -> Self {
        Self {
            down,
            current: None,
            add_to_selection,
        }
    }

    /// The box spanned so far; empty at the down location until the first drag
    pub fn area(&self) -> Rect {
        Rect::from_two_pos(self.down, self.current.unwrap_or(self.down))
    }

    fn finish(&self, ctx: &mut EditorContext) {
        let mut slots = slots_within(ctx.state(), self.area());
        if self.add_to_selection {
            slots = slots.union(ctx.state().selected());
        }
        if let Some(command) = edits::set_selection(ctx.state(), slots) {
            ctx.perform(command);
        }
    }
}

impl Operation for BoxSelectOperation {
    fn name(&self) -> &'static str {
        "Select With Box"
    }

    fn cursor_icon(&self) -> CursorIcon {
        CursorIcon::Crosshair
    }

    fn pointer_handler(&mut self) -> Option<&mut dyn PointerHandler> {
        Some(self)
    }

    fn paint(&self, ctx: &EditorContext) -> Vec<Shape> {
        match self.current {
            Some(_) => vec![overlay::selection_frame(ctx, self.area())],
            None => Vec::new(),
        }
    }
}

impl PointerHandler for BoxSelectOperation {
    fn handle_event(&mut self, event: &PointerEvent, ctx: &mut EditorContext) -> Transition {
        match (event.kind, event.location) {
            (EventKind::Drag, Some(pointer)) => {
                self.current = Some(pointer);
                Transition::Continue
            }
            (EventKind::Up, location) => {
                if location.is_some() {
                    self.current = location;
                }
                self.finish(ctx);
                Transition::Finish
            }
            (EventKind::Stop, _) => Transition::Finish,
            _ => Transition::Continue,
        }
    }
}
