use egui::Vec2;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::element::{EditorElement, Element};
use crate::slot_set::SlotSet;

/// The document being edited: elements, selection, clipboard and paste offset.
///
/// An `EditState` is an immutable value. Every change produces a new state through one of
/// the `with_*` constructors; element vectors are shared between states, so history
/// snapshots never alias live data.
///
/// Slot indices are only meaningful within one state. Any access with a slot outside the
/// element list panics, since it means a stale selection has corrupted the state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditState {
    elements: Arc<Vec<EditorElement>>,
    #[serde(default)]
    selected: SlotSet,
    #[serde(default)]
    clipboard: Arc<Vec<EditorElement>>,
    #[serde(default)]
    duplication_offset: Vec2,
}

impl EditState {
    pub fn new(elements: Vec<EditorElement>) -> Self {
        Self {
            elements: Arc::new(elements),
            ..Self::default()
        }
    }

    pub fn elements(&self) -> &[EditorElement] {
        &self.elements
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// The element at `slot`.
    ///
    /// # Panics
    /// If `slot` is out of range.
    pub fn element(&self, slot: usize) -> &EditorElement {
        self.check_slot(slot);
        &self.elements[slot]
    }

    pub fn selected(&self) -> &SlotSet {
        &self.selected
    }

    pub fn clipboard(&self) -> &[EditorElement] {
        &self.clipboard
    }

    pub fn duplication_offset(&self) -> Vec2 {
        self.duplication_offset
    }

    /// Copies of the elements at `slots`, in slot order
    pub fn subset(&self, slots: &SlotSet) -> Vec<EditorElement> {
        slots.iter().map(|slot| self.element(slot).clone()).collect()
    }

    pub fn selected_elements(&self) -> Vec<EditorElement> {
        self.subset(&self.selected)
    }

    /// Replace the element list, keeping the selection.
    ///
    /// # Panics
    /// If the current selection does not fit the new list.
    pub fn with_elements(&self, elements: Vec<EditorElement>) -> Self {
        let state = Self {
            elements: Arc::new(elements),
            ..self.clone()
        };
        state.check_slots(&state.selected);
        state
    }

    /// # Panics
    /// If `selected` refers to a slot past the end of the element list.
    pub fn with_selected(&self, selected: SlotSet) -> Self {
        self.check_slots(&selected);
        Self {
            selected,
            ..self.clone()
        }
    }

    pub fn with_clipboard(&self, clipboard: Vec<EditorElement>) -> Self {
        Self {
            clipboard: Arc::new(clipboard),
            ..self.clone()
        }
    }

    pub fn with_duplication_offset(&self, offset: Vec2) -> Self {
        Self {
            duplication_offset: offset,
            ..self.clone()
        }
    }

    /// Swap the element at `slot`, keeping the selection
    pub fn with_replaced(&self, slot: usize, element: EditorElement) -> Self {
        self.check_slot(slot);
        let mut elements = self.elements.as_ref().clone();
        elements[slot] = element;
        Self {
            elements: Arc::new(elements),
            ..self.clone()
        }
    }

    /// Swap the element at `slot` and make it the only selected one
    pub fn replace_and_select(&self, slot: usize, element: EditorElement) -> Self {
        self.with_replaced(slot, element)
            .with_selected(SlotSet::single(slot))
    }

    /// Append an element, returning the new state and the element's slot
    pub fn with_added(&self, element: EditorElement) -> (Self, usize) {
        let mut elements = self.elements.as_ref().clone();
        let slot = elements.len();
        elements.push(element);
        let state = Self {
            elements: Arc::new(elements),
            ..self.clone()
        };
        (state, slot)
    }

    /// Append an element and make it the only selected one
    pub fn with_added_selected(&self, element: EditorElement) -> (Self, usize) {
        let (state, slot) = self.with_added(element);
        (state.with_selected(SlotSet::single(slot)), slot)
    }

    /// Remove the element at `slot`; selected slots after it shift down by one
    pub fn with_removed(&self, slot: usize) -> Self {
        self.check_slot(slot);
        let mut elements = self.elements.as_ref().clone();
        elements.remove(slot);
        let selected = self
            .selected
            .iter()
            .filter(|&s| s != slot)
            .map(|s| if s > slot { s - 1 } else { s })
            .collect();
        Self {
            elements: Arc::new(elements),
            selected,
            ..self.clone()
        }
    }

    /// Apply `f` to every selected element
    pub fn map_selected(&self, mut f: impl FnMut(&EditorElement) -> EditorElement) -> Self {
        let mut elements = self.elements.as_ref().clone();
        for slot in self.selected.iter() {
            elements[slot] = f(&elements[slot]);
        }
        Self {
            elements: Arc::new(elements),
            ..self.clone()
        }
    }

    /// Move every selected element by `delta`
    pub fn with_selected_translated(&self, delta: Vec2) -> Self {
        self.map_selected(|element| element.translated(delta))
    }

    fn check_slot(&self, slot: usize) {
        if slot >= self.elements.len() {
            panic!(
                "slot {} out of range for {} elements; the edit state is corrupt",
                slot,
                self.elements.len()
            );
        }
    }

    fn check_slots(&self, slots: &SlotSet) {
        if let Some(last) = slots.last() {
            self.check_slot(last);
        }
    }
}
