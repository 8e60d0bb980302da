use egui::{CursorIcon, Shape};
use log::debug;

use crate::input::PointerEvent;
use crate::operations::{Operation, OperationType, Transition};
use crate::state::EditorContext;

/// Notified after every dispatched event, and with a no-op event after [`EventDispatcher::perform`]
pub type EventListener = Box<dyn FnMut(&PointerEvent, &EditorContext)>;

/// Routes pointer events to the one active operation and switches operations.
///
/// When no operation is requested the default one (picking, unless configured otherwise)
/// is active. One-shot operations run their `start` and are immediately replaced by the
/// default.
pub struct EventDispatcher {
    default_operation: fn() -> OperationType,
    current: OperationType,
    listener: Option<EventListener>,
}

impl EventDispatcher {
    /// A dispatcher with picking as the default operation, already started
    pub fn new(ctx: &mut EditorContext) -> Self {
        Self::with_default(OperationType::default, ctx)
    }

    /// A dispatcher falling back to operations built by `default_operation`
    pub fn with_default(default_operation: fn() -> OperationType, ctx: &mut EditorContext) -> Self {
        let mut dispatcher = Self {
            default_operation,
            current: default_operation(),
            listener: None,
        };
        dispatcher.current.start(ctx);
        dispatcher
    }

    /// Replace the listener; only one is supported
    pub fn set_listener(&mut self, listener: impl FnMut(&PointerEvent, &EditorContext) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// The active operation
    pub fn operation(&self) -> &OperationType {
        &self.current
    }

    pub fn operation_name(&self) -> &'static str {
        self.current.name()
    }

    /// Stop the active operation and start `operation`, or the default one if `None`
    pub fn set_operation(&mut self, operation: Option<OperationType>, ctx: &mut EditorContext) {
        let mut next = operation.unwrap_or_else(self.default_operation);

        if self.current.is_interactive() {
            self.current.stop(ctx);
        }

        debug!("Switching operation from {} to {}", self.current.name(), next.name());
        let interactive = next.is_interactive();
        next.start(ctx);
        self.current = next;

        if !interactive {
            let mut fallback = (self.default_operation)();
            debug!("{} finished, returning to {}", self.current.name(), fallback.name());
            fallback.start(ctx);
            self.current = fallback;
        }
    }

    /// Return to the default operation
    pub fn clear_operation(&mut self, ctx: &mut EditorContext) {
        self.set_operation(None, ctx);
    }

    /// Forward `event` to the active operation, then notify the listener
    pub fn dispatch(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        let transition = match self.current.pointer_handler() {
            Some(handler) => handler.handle_event(event, ctx),
            None => Transition::Continue,
        };

        match transition {
            Transition::Continue => {}
            Transition::Delegate(next) => self.set_operation(Some(*next), ctx),
            Transition::Finish => self.clear_operation(ctx),
        }

        self.notify(event, ctx);
    }

    /// Make `operation` active if it is enabled.
    ///
    /// Returns whether it was enabled.
    pub fn perform(&mut self, operation: impl Into<OperationType>, ctx: &mut EditorContext) -> bool {
        let mut operation = operation.into();
        if !operation.should_be_enabled(ctx) {
            debug!("{} is not enabled", operation.name());
            return false;
        }
        self.set_operation(Some(operation), ctx);
        self.notify(&PointerEvent::none(), ctx);
        true
    }

    fn notify(&mut self, event: &PointerEvent, ctx: &EditorContext) {
        if let Some(listener) = self.listener.as_mut() {
            listener(event, ctx);
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        self.current.cursor_icon()
    }

    /// Overlay of the active operation
    pub fn paint(&self, ctx: &EditorContext) -> Vec<Shape> {
        self.current.paint(ctx)
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("current", &self.current)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}
