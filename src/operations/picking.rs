use egui::Pos2;
use log::debug;

use super::{
    BoxSelectOperation, MoveOperation, Operation, OperationType, PointerHandler, Transition,
};
use crate::command::edits;
use crate::element::Element;
use crate::input::{EventKind, PointerEvent};
use crate::selection::PickSet;
use crate::slot_set::SlotSet;
use crate::state::EditorContext;

/// A press that started while the picking operation was active
#[derive(Debug, Clone)]
struct Gesture {
    down: Pos2,
    shift: bool,
    pick_set: PickSet,
    dragging: bool,
}

/// The default operation: click to select, drag to move, edit or box-select.
#[derive(Debug, Default)]
pub struct PickingOperation {
    gesture: Option<Gesture>,
}

impl PickingOperation {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pick set of the press in progress
    pub fn pick_set(&self) -> Option<&PickSet> {
        self.gesture.as_ref().map(|g| &g.pick_set)
    }

    fn click(gesture: &Gesture, ctx: &mut EditorContext) {
        let current = ctx.state().selected();
        let selection = if gesture.shift {
            gesture.pick_set.toggle_front_most(current)
        } else {
            gesture.pick_set.cycle_selection(current)
        };
        select(ctx, selection);
    }

    fn start_drag(gesture: &Gesture, ctx: &mut EditorContext) -> Transition {
        if gesture.shift {
            return Transition::delegate(BoxSelectOperation::new(gesture.down, true));
        }

        let padding = ctx.padding();
        let selected = ctx.state().selected().clone();

        // A single selected element may be grabbed by one of its handles.
        if let (1, Some(slot)) = (selected.len(), selected.first()) {
            let element = ctx.state().element(slot);
            if let Some(handle) = element.edit_handle_at(gesture.down, padding) {
                debug!("Editing slot {} via {:?}", slot, handle);
                return Transition::delegate(OperationType::for_edit_handle(
                    slot,
                    handle,
                    gesture.down,
                ));
            }
        }

        if !gesture.pick_set.selected().is_empty() {
            return Transition::delegate(MoveOperation::new(gesture.down));
        }

        if let Some(front) = gesture.pick_set.front_most() {
            // Grabbing a handle edits the element without selecting it first; the edit
            // selects it.
            let element = ctx.state().element(front);
            if let Some(handle) = element.edit_handle_at(gesture.down, padding) {
                debug!("Editing unselected slot {} via {:?}", front, handle);
                return Transition::delegate(OperationType::for_edit_handle(
                    front,
                    handle,
                    gesture.down,
                ));
            }
            select(ctx, SlotSet::single(front));
            return Transition::delegate(MoveOperation::new(gesture.down));
        }

        Transition::delegate(BoxSelectOperation::new(gesture.down, false))
    }
}

fn select(ctx: &mut EditorContext, selection: SlotSet) {
    if let Some(command) = edits::set_selection(ctx.state(), selection) {
        ctx.perform(command);
    }
}

impl Operation for PickingOperation {
    fn name(&self) -> &'static str {
        "Select"
    }

    // A press that began under another operation is ignored.
    fn start(&mut self, _ctx: &mut EditorContext) {
        self.gesture = None;
    }

    fn stop(&mut self, _ctx: &mut EditorContext) {
        self.gesture = None;
    }

    fn pointer_handler(&mut self) -> Option<&mut dyn PointerHandler> {
        Some(self)
    }
}

impl PointerHandler for PickingOperation {
    fn handle_event(&mut self, event: &PointerEvent, ctx: &mut EditorContext) -> Transition {
        if event.kind == EventKind::Down {
            let Some(down) = event.location else {
                return Transition::Continue;
            };
            self.gesture = Some(Gesture {
                down,
                shift: event.is_shift(),
                pick_set: PickSet::at(ctx.state(), down, ctx.padding()),
                dragging: false,
            });
            return Transition::Continue;
        }

        let Some(gesture) = self.gesture.as_mut() else {
            return Transition::Continue;
        };

        match event.kind {
            EventKind::Drag if !gesture.dragging => {
                gesture.dragging = true;
                let gesture = gesture.clone();
                Self::start_drag(&gesture, ctx)
            }
            EventKind::Up => {
                if let Some(gesture) = self.gesture.take() {
                    if !gesture.dragging {
                        Self::click(&gesture, ctx);
                    }
                }
                Transition::Continue
            }
            EventKind::Stop => {
                self.gesture = None;
                Transition::Continue
            }
            _ => Transition::Continue,
        }
    }
}
