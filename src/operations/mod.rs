//! Interaction operations.
//!
//! Exactly one operation is active at a time (see [`crate::dispatcher`]). Interactive
//! operations expose a [`PointerHandler`]; one-shot operations only implement the
//! enablement and lifecycle parts of [`Operation`] and are replaced by the default operation
//! as soon as they have started.

use egui::{CursorIcon, Pos2, Shape};

use crate::element::EditHandle;
use crate::input::PointerEvent;
use crate::state::EditorContext;

pub mod box_add;
pub mod box_resize;
pub mod box_rotation;
pub mod box_select;
pub mod command_ops;
pub mod history_ops;
pub mod move_elements;
pub mod overlay;
pub mod picking;
pub mod point_add;
pub mod polygon_edit;

pub use box_add::{BoxAddOperation, BoxKind};
pub use box_resize::BoxResizeOperation;
pub use box_rotation::BoxRotationOperation;
pub use box_select::BoxSelectOperation;
pub use command_ops::{CommandKind, CommandOperation};
pub use history_ops::{HistoryDirection, HistoryOperation};
pub use move_elements::MoveOperation;
pub use picking::PickingOperation;
pub use point_add::PointAddOperation;
pub use polygon_edit::{PolygonEditOperation, PolygonPhase};

/// What the dispatcher should do after a pointer event was handled
#[derive(Debug)]
pub enum Transition {
    /// Keep the current operation
    Continue,
    /// Stop the current operation and make this one active
    Delegate(Box<OperationType>),
    /// Stop the current operation and return to the default one
    Finish,
}

impl Transition {
    pub fn delegate(operation: impl Into<OperationType>) -> Self {
        Transition::Delegate(Box::new(operation.into()))
    }
}

/// Enablement and lifecycle shared by every operation
pub trait Operation {
    /// Return the name of the operation
    fn name(&self) -> &'static str;

    /// Whether the operation can run against the current state
    fn should_be_enabled(&mut self, _ctx: &EditorContext) -> bool {
        true
    }

    /// Menu label replacing the default one, e.g. "Undo Move Item"
    fn label_text(&self, _ctx: &EditorContext) -> Option<String> {
        None
    }

    /// Called when the operation becomes active
    fn start(&mut self, _ctx: &mut EditorContext) {}

    /// Called when the operation is replaced; must leave the state consistent
    fn stop(&mut self, _ctx: &mut EditorContext) {}

    fn cursor_icon(&self) -> CursorIcon {
        CursorIcon::Default
    }

    /// The pointer handler of interactive operations
    fn pointer_handler(&mut self) -> Option<&mut dyn PointerHandler> {
        None
    }

    /// Overlay shapes in world coordinates, drawn above the elements
    fn paint(&self, _ctx: &EditorContext) -> Vec<Shape> {
        Vec::new()
    }
}

/// Pointer handling for interactive operations
pub trait PointerHandler {
    fn handle_event(&mut self, event: &PointerEvent, ctx: &mut EditorContext) -> Transition;
}

/// Enumeration of all operations
#[derive(Debug)]
pub enum OperationType {
    Picking(PickingOperation),
    Move(MoveOperation),
    BoxResize(BoxResizeOperation),
    BoxRotation(BoxRotationOperation),
    PolygonEdit(PolygonEditOperation),
    BoxSelect(BoxSelectOperation),
    PointAdd(PointAddOperation),
    BoxAdd(BoxAddOperation),
    Command(CommandOperation),
    History(HistoryOperation),
}

impl OperationType {
    /// The operation that edits the part of the element at `slot` under `handle`
    pub fn for_edit_handle(slot: usize, handle: EditHandle, down: Pos2) -> Self {
        match handle {
            EditHandle::Resize(handle) => BoxResizeOperation::new(slot, handle, down).into(),
            EditHandle::Rotate => BoxRotationOperation::new(slot, down).into(),
            EditHandle::Vertex(vertex) => PolygonEditOperation::edit_vertex(slot, vertex, down).into(),
        }
    }

    pub fn is_interactive(&mut self) -> bool {
        self.pointer_handler().is_some()
    }
}

impl Default for OperationType {
    fn default() -> Self {
        Self::Picking(PickingOperation::default())
    }
}

macro_rules! for_each_operation {
    ($self:expr, $op:ident => $body:expr) => {
        match $self {
            OperationType::Picking($op) => $body,
            OperationType::Move($op) => $body,
            OperationType::BoxResize($op) => $body,
            OperationType::BoxRotation($op) => $body,
            OperationType::PolygonEdit($op) => $body,
            OperationType::BoxSelect($op) => $body,
            OperationType::PointAdd($op) => $body,
            OperationType::BoxAdd($op) => $body,
            OperationType::Command($op) => $body,
            OperationType::History($op) => $body,
        }
    };
}

macro_rules! impl_from_operation {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for OperationType {
                fn from(op: $ty) -> Self {
                    OperationType::$variant(op)
                }
            }
        )*
    };
}

impl_from_operation!(
    Picking(PickingOperation),
    Move(MoveOperation),
    BoxResize(BoxResizeOperation),
    BoxRotation(BoxRotationOperation),
    PolygonEdit(PolygonEditOperation),
    BoxSelect(BoxSelectOperation),
    PointAdd(PointAddOperation),
    BoxAdd(BoxAddOperation),
    Command(CommandOperation),
    History(HistoryOperation),
);

impl Operation for OperationType {
    fn name(&self) -> &'static str {
        for_each_operation!(self, op => op.name())
    }

    fn should_be_enabled(&mut self, ctx: &EditorContext) -> bool {
        for_each_operation!(self, op => op.should_be_enabled(ctx))
    }

    fn label_text(&self, ctx: &EditorContext) -> Option<String> {
        for_each_operation!(self, op => op.label_text(ctx))
    }

    fn start(&mut self, ctx: &mut EditorContext) {
        for_each_operation!(self, op => op.start(ctx))
    }

    fn stop(&mut self, ctx: &mut EditorContext) {
        for_each_operation!(self, op => op.stop(ctx))
    }

    fn cursor_icon(&self) -> CursorIcon {
        for_each_operation!(self, op => op.cursor_icon())
    }

    fn pointer_handler(&mut self) -> Option<&mut dyn PointerHandler> {
        for_each_operation!(self, op => op.pointer_handler())
    }

    fn paint(&self, ctx: &EditorContext) -> Vec<Shape> {
        for_each_operation!(self, op => op.paint(ctx))
    }
}
