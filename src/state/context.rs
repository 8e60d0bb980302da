//! The context every operation works against.
//!
//! `EditorContext` owns the current [`EditState`], its [`UndoHistory`], the configuration and
//! the view zoom. Operations receive it explicitly on every call, so the engine runs without
//! a live UI. All state changes go through [`EditorContext::perform`], which records the
//! command and then applies its state.
use crate::command::{Command, UndoHistory};
use crate::config::EditorConfig;
use super::EditState;

/// The main context for the annotation editor.
#[derive(Debug, Clone)]
pub struct EditorContext {
    state: EditState,
    history: UndoHistory,
    config: EditorConfig,
    zoom: f32,
}

impl EditorContext {
    pub fn new(state: EditState, config: EditorConfig) -> Self {
        Self {
            history: UndoHistory::new(state.clone(), config.undo_limit),
            state,
            config,
            zoom: 1.0,
        }
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the view zoom; non-positive values are ignored
    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom > 0.0 && zoom.is_finite() {
            self.zoom = zoom;
        } else {
            log::warn!("Ignoring invalid zoom {}", zoom);
        }
    }

    /// Hit tolerance in world units; constant on screen at any zoom
    pub fn padding(&self) -> f32 {
        self.config.pick_padding_pixels / self.zoom
    }

    /// Start a command from the current state
    pub fn build_command(&self, description: impl Into<String>) -> Command {
        Command::new(description, self.state.clone())
    }

    /// Record `command` in the history and make its state current
    pub fn perform(&mut self, command: Command) {
        self.history.record(command.clone());
        self.state = command.into_state();
    }

    /// Drop the most recent history entry and return to the state before it.
    ///
    /// Returns false if there was nothing to discard.
    pub fn discard_last(&mut self) -> bool {
        if self.history.discard_last().is_none() {
            return false;
        }
        self.state = self.history.current_state().clone();
        true
    }

    /// Drop the most recent history entry and make `restored` current.
    ///
    /// The history entry before the discarded one may hold an older selection, since
    /// selection changes are not recorded; `restored` is the state the discarded edit
    /// started from.
    pub fn discard_last_to(&mut self, restored: EditState) -> bool {
        if self.history.discard_last().is_none() {
            return false;
        }
        self.state = restored;
        true
    }

    pub fn undo(&mut self) -> bool {
        match self.history.perform_undo() {
            Some(state) => {
                self.state = state;
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.perform_redo() {
            Some(state) => {
                self.state = state;
                true
            }
            None => false,
        }
    }

    /// Replace the document, starting a fresh history
    pub fn load_state(&mut self, state: EditState) {
        log::info!("Loading edit state with {} elements", state.element_count());
        self.history.reset(state.clone());
        self.state = state;
    }
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new(EditState::default(), EditorConfig::default())
    }
}
