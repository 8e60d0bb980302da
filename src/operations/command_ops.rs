use super::Operation;
use crate::command::{Command, edits};
use crate::slot_set::SlotSet;
use crate::state::{EditState, EditorContext};

/// The one-shot edits that can be run as an operation
#[derive(Debug, Clone, PartialEq)]
pub enum CommandKind {
    Cut,
    Copy,
    Paste,
    SelectAll,
    SelectNone,
    SetSelection(SlotSet),
    SetCategory(Option<i32>),
    ToggleRotation,
    NonMaxSuppression,
}

impl CommandKind {
    fn name(&self) -> &'static str {
        match self {
            CommandKind::Cut => "Cut",
            CommandKind::Copy => "Copy",
            CommandKind::Paste => "Paste",
            CommandKind::SelectAll => "Select All",
            CommandKind::SelectNone => "Select None",
            CommandKind::SetSelection(_) => "Select",
            CommandKind::SetCategory(_) => "Set Category",
            CommandKind::ToggleRotation => "Toggle Rotation",
            CommandKind::NonMaxSuppression => "Non-Max Suppression",
        }
    }

    fn construct(&self, ctx: &EditorContext) -> Option<Command> {
        let state = ctx.state();
        match self {
            CommandKind::Cut => edits::cut(state),
            CommandKind::Copy => edits::copy(state),
            CommandKind::Paste => edits::paste(state, ctx.config().paste_step),
            CommandKind::SelectAll => edits::select_all(state),
            CommandKind::SelectNone => edits::select_none(state),
            CommandKind::SetSelection(slots) => edits::set_selection(state, slots.clone()),
            CommandKind::SetCategory(category) => edits::set_category(state, *category),
            CommandKind::ToggleRotation => edits::toggle_rotation(state),
            CommandKind::NonMaxSuppression => {
                edits::non_max_suppression(state, ctx.config().nms_max_iou)
            }
        }
    }
}

/// Runs a single edit: enabled when the edit would change something, performs it on start.
///
/// The constructed command is cached against the state it was built from, so asking for
/// enablement repeatedly between edits is cheap.
#[derive(Debug)]
pub struct CommandOperation {
    kind: CommandKind,
    cache: Option<(EditState, Option<Command>)>,
}

impl CommandOperation {
    pub fn new(kind: CommandKind) -> Self {
        Self { kind, cache: None }
    }

    pub fn kind(&self) -> &CommandKind {
        &self.kind
    }

    /// The command this operation would perform now, or `None` if it is disabled
    pub fn construct_command(&mut self, ctx: &EditorContext) -> Option<&Command> {
        let stale = match &self.cache {
            Some((state, _)) => state != ctx.state(),
            None => true,
        };
        if stale {
            let command = self.kind.construct(ctx);
            self.cache = Some((ctx.state().clone(), command));
        }
        self.cache.as_ref().and_then(|(_, command)| command.as_ref())
    }
}

impl Operation for CommandOperation {
    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn should_be_enabled(&mut self, ctx: &EditorContext) -> bool {
        self.construct_command(ctx).is_some()
    }

    fn start(&mut self, ctx: &mut EditorContext) {
        let Some(command) = self.construct_command(ctx).cloned() else {
            log::debug!("{} is disabled", self.kind.name());
            return;
        };
        self.cache = None;
        ctx.perform(command);
    }
}
