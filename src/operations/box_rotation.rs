use egui::{CursorIcon, Pos2, Shape, Vec2};

use super::{Operation, PointerHandler, Transition, overlay};
use crate::command::Command;
use crate::element::{EditorElement, Element};
use crate::geometry::{half_diagonal, hit_testing::normalize_angle};
use crate::input::{EventKind, PointerEvent};
use crate::state::{EditState, EditorContext};

const DESCRIPTION: &str = "Adjust Box Rotation";

/// Spins a rotated box around its centre by dragging its rotation ring.
#[derive(Debug)]
pub struct BoxRotationOperation {
    slot: usize,
    down: Pos2,
    origin: Pos2,
    radius: f32,
    start_angle: f32,
    start_rotation: i32,
    grab_offset: Vec2,
    initial: Option<EditState>,
}

impl BoxRotationOperation {
    pub fn new(slot: usize, down: Pos2) -> Self {
        Self {
            slot,
            down,
            origin: down,
            radius: 0.0,
            start_angle: 0.0,
            start_rotation: 0,
            grab_offset: Vec2::ZERO,
            initial: None,
        }
    }

    /// Rotation in whole degrees for a pointer at `pointer`, clamped to `limit` either way
    pub fn rotation_for(&self, pointer: Pos2, limit_degrees: f32) -> i32 {
        let angle = (pointer + self.grab_offset - self.origin).angle();
        let delta = normalize_angle(angle - self.start_angle);
        let degrees = (self.start_rotation as f32 + delta.to_degrees())
            .clamp(-limit_degrees, limit_degrees);
        degrees.round() as i32
    }

    fn update(&self, pointer: Pos2, ctx: &mut EditorContext) {
        let Some(initial) = &self.initial else {
            return;
        };
        let rotation = self.rotation_for(pointer, ctx.config().rotation_limit_degrees);
        let element = initial.element(self.slot);
        let element = element.with_properties(element.properties().with_rotation(Some(rotation)));
        let state = initial.replace_and_select(self.slot, element);
        if &state != ctx.state() {
            ctx.perform(Command::new(DESCRIPTION, state));
        }
    }
}

impl Operation for BoxRotationOperation {
    fn name(&self) -> &'static str {
        DESCRIPTION
    }

    fn start(&mut self, ctx: &mut EditorContext) {
        let element = ctx.state().element(self.slot);
        let EditorElement::Rect(rect) = element else {
            log::warn!("Slot {} is a {}, it can't be rotated", self.slot, element.element_type());
            return;
        };
        let bounds = rect.bounds();
        self.origin = bounds.center();
        self.radius = half_diagonal(bounds);
        self.start_angle = (self.down - self.origin).angle();
        self.start_rotation = rect.properties().rotation.unwrap_or(0);
        // Keep the pointer anchored to where it grabbed the ring.
        let on_ring = self.origin + Vec2::angled(self.start_angle) * self.radius;
        self.grab_offset = on_ring - self.down;
        self.initial = Some(ctx.state().clone());
    }

    fn cursor_icon(&self) -> CursorIcon {
        CursorIcon::Alias
    }

    fn pointer_handler(&mut self) -> Option<&mut dyn PointerHandler> {
        Some(self)
    }

    fn paint(&self, ctx: &EditorContext) -> Vec<Shape> {
        if self.initial.is_none() {
            return Vec::new();
        }
        vec![overlay::rotation_ring(ctx, self.origin, self.radius)]
    }
}

impl PointerHandler for BoxRotationOperation {
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
