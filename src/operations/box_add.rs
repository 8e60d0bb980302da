use egui::{CursorIcon, Pos2, Rect, Shape, Vec2};

use super::{Operation, PointerHandler, Transition, overlay};
use crate::command::Command;
use crate::element::{EditorElement, Element};
use crate::input::{EventKind, PointerEvent};
use crate::state::{EditState, EditorContext};

/// Which element the box add operation creates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxKind {
    Box,
    Mask,
}

impl BoxKind {
    fn description(self) -> &'static str {
        match self {
            BoxKind::Box => "Add Box",
            BoxKind::Mask => "Add Mask",
        }
    }

    fn element(self, bounds: Rect) -> EditorElement {
        match self {
            BoxKind::Box => EditorElement::rect(bounds),
            BoxKind::Mask => EditorElement::mask(bounds),
        }
    }
}

#[derive(Debug, Clone)]
enum Phase {
    /// Waiting for the click that places the box centre
    Origin,
    /// Growing the box around `center`
    Corner {
        center: Pos2,
        pointer_offset: Vec2,
        base: EditState,
    },
}

/// Adds a box in two clicks: the first places a template box centred on the pointer, moving
/// the pointer then grows it symmetrically, and the second click completes it.
#[derive(Debug)]
pub struct BoxAddOperation {
    kind: BoxKind,
    phase: Phase,
    template: Option<Vec2>,
    pointer: Option<Pos2>,
}

impl BoxAddOperation {
    pub fn new(kind: BoxKind) -> Self {
        Self {
            kind,
            phase: Phase::Origin,
            template: None,
            pointer: None,
        }
    }

    /// Start from a box of `size` instead of the configured default
    pub fn with_template(mut self, size: Vec2) -> Self {
        self.template = Some(size);
        self
    }

    fn template_size(&self, ctx: &EditorContext) -> Vec2 {
        self.template
            .unwrap_or_else(|| Vec2::splat(ctx.config().default_box_size))
    }

    fn place_origin(&mut self, pointer: Pos2, ctx: &mut EditorContext) {
        let rect = Rect::from_center_size(pointer, self.template_size(ctx));
        let base = ctx.state().clone();
        let (state, _) = base.with_added_selected(self.kind.element(rect));
        ctx.perform(Command::new(self.kind.description(), state));
        self.phase = Phase::Corner {
            center: pointer,
            pointer_offset: rect.max - pointer,
            base,
        };
    }

    fn grow(&mut self, pointer: Pos2, ctx: &mut EditorContext) {
        let Phase::Corner {
            center,
            pointer_offset,
            base,
        } = &self.phase
        else {
            return;
        };
        let extremal = pointer + *pointer_offset;
        let half = (extremal - *center).abs();
        let rect = Rect::from_center_size(*center, half * 2.0);
        let (state, _) = base.with_added_selected(self.kind.element(rect));
        if &state != ctx.state() {
            ctx.perform(Command::new(self.kind.description(), state));
        }
    }

    /// Size of the box being grown, if the centre has been placed
    pub fn current_size(&self, ctx: &EditorContext) -> Option<Vec2> {
        match self.phase {
            Phase::Corner { .. } => ctx.state().elements().last().map(|e| e.bounds().size()),
            Phase::Origin => None,
        }
    }
}

impl Operation for BoxAddOperation {
    fn name(&self) -> &'static str {
        self.kind.description()
    }

    fn start(&mut self, _ctx: &mut EditorContext) {
        self.phase = Phase::Origin;
    }

    fn cursor_icon(&self) -> CursorIcon {
        CursorIcon::Crosshair
    }

    fn pointer_handler(&mut self) -> Option<&mut dyn PointerHandler> {
        Some(self)
    }

    fn paint(&self, ctx: &EditorContext) -> Vec<Shape> {
        match (&self.phase, self.pointer) {
            (Phase::Origin, Some(pointer)) => {
                let guide = Rect::from_center_size(pointer, self.template_size(ctx));
                vec![overlay::guide_box(ctx, guide)]
            }
            _ => Vec::new(),
        }
    }
}

impl PointerHandler for BoxAddOperation {
    fn handle_event(&mut self, event: &PointerEvent, ctx: &mut EditorContext) -> Transition {
        if event.kind == EventKind::Stop {
            return Transition::Finish;
        }
        let Some(pointer) = event.location else {
            return Transition::Continue;
        };
        self.pointer = Some(pointer);

        let placing = matches!(self.phase, Phase::Origin);
        match (placing, event.kind) {
            (_, EventKind::Down) if event.is_right() => Transition::Finish,
            (true, EventKind::Up) => {
                self.place_origin(pointer, ctx);
                Transition::Continue
            }
            (false, EventKind::Move | EventKind::Drag) => {
                self.grow(pointer, ctx);
                Transition::Continue
            }
            (false, EventKind::Up) => {
                self.grow(pointer, ctx);
                Transition::Finish
            }
            _ => Transition::Continue,
        }
    }
}
