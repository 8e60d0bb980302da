use egui::{CursorIcon, Pos2, Rect, Vec2};

use super::{Operation, PointerHandler, Transition};
use crate::command::Command;
use crate::element::{BoxHandle, Element};
use crate::geometry::box_corner;
use crate::input::{EventKind, PointerEvent};
use crate::state::{EditState, EditorContext};

const DESCRIPTION: &str = "Adjust Box";

/// Resizes a box or mask by one of its eight handles.
///
/// The handle keeps its initial offset from the pointer, and the corner opposite the handle
/// stays fixed. Edge handles only move along their axis.
#[derive(Debug)]
pub struct BoxResizeOperation {
    slot: usize,
    handle: BoxHandle,
    down: Pos2,
    pointer_offset: Vec2,
    initial_bounds: Rect,
    initial: Option<EditState>,
}

impl BoxResizeOperation {
    pub fn new(slot: usize, handle: BoxHandle, down: Pos2) -> Self {
        Self {
            slot,
            handle,
            down,
            pointer_offset: Vec2::ZERO,
            initial_bounds: Rect::NOTHING,
            initial: None,
        }
    }

    pub fn handle(&self) -> BoxHandle {
        self.handle
    }

    /// The box produced by dragging the handle so that the pointer sits at `pointer`
    pub fn resized_bounds(&self, pointer: Pos2) -> Rect {
        let target = pointer + self.pointer_offset;
        let mut moving = box_corner(self.initial_bounds, self.handle.corner_index());
        if self.handle.moves_x() {
            moving.x = target.x;
        }
        if self.handle.moves_y() {
            moving.y = target.y;
        }
        let fixed = box_corner(self.initial_bounds, self.handle.fixed_corner_index());
        Rect::from_two_pos(moving, fixed)
    }

    fn update(&self, pointer: Pos2, ctx: &mut EditorContext) {
        let Some(initial) = &self.initial else {
            return;
        };
        let element = initial.element(self.slot).with_bounds(self.resized_bounds(pointer));
        let state = initial.replace_and_select(self.slot, element);
        if &state == ctx.state() {
            return;
        }
        ctx.perform(Command::new(DESCRIPTION, state));
    }
}

impl Operation for BoxResizeOperation {
    fn name(&self) -> &'static str {
        DESCRIPTION
    }

    fn start(&mut self, ctx: &mut EditorContext) {
        let element = ctx.state().element(self.slot);
        if !element.is_rect_like() {
            log::warn!("Slot {} is a {}, not a box", self.slot, element.element_type());
            return;
        }
        self.initial_bounds = element.bounds();
        self.pointer_offset = box_corner(self.initial_bounds, self.handle.corner_index()) - self.down;
        self.initial = Some(ctx.state().clone());
    }

    fn cursor_icon(&self) -> CursorIcon {
        self.handle.cursor_icon()
    }

    fn pointer_handler(&mut self) -> Option<&mut dyn PointerHandler> {
        Some(self)
    }
}

impl PointerHandler for BoxResizeOperation {
    fn handle_event(&mut self, event: &PointerEvent, ctx: &mut EditorContext) -> Transition {
        if self.initial.is_none() {
            return Transition::Finish;
        }
        match (event.kind, event.location) {
            (EventKind::Drag, Some(pointer)) => {
                self.update(pointer, ctx);
                Transition::Continue
            }
            (EventKind::Up, Some(pointer)) => {
                self.update(pointer, ctx);
                Transition::Finish
            }
            (EventKind::Stop, _) => Transition::Finish,
            _ => Transition::Continue,
        }
    }
}
