//! Hit testing of pointer locations against the elements of an edit state.

use egui::{Pos2, Rect};

use crate::element::Element;
use crate::slot_set::SlotSet;
use crate::state::EditState;

/// The elements under a pointer location, computed once per pointer-down.
///
/// Slots are kept in ascending order, which is back to front: later slots are drawn on top,
/// so the last slot is the front-most candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickSet {
    slots: SlotSet,
    selected: SlotSet,
}

impl PickSet {
    /// Every slot whose element contains `point` within `padding` world units
    pub fn at(state: &EditState, point: Pos2, padding: f32) -> Self {
        let slots = SlotSet::from_sorted(
            state
                .elements()
                .iter()
                .enumerate()
                .filter(|(_, element)| element.contains(padding, point))
                .map(|(slot, _)| slot)
                .collect(),
        );
        let selected = slots.intersection(state.selected());
        Self { slots, selected }
    }

    /// Candidate slots, back to front
    pub fn slots(&self) -> &SlotSet {
        &self.slots
    }

    /// Candidates that were selected when the pick set was built
    pub fn selected(&self) -> &SlotSet {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn front_to_back(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.as_slice().iter().rev().copied()
    }

    pub fn front_most(&self) -> Option<usize> {
        self.slots.last()
    }

    /// The single slot a plain click should select.
    ///
    /// Scanning front to back, picks the first candidate after the last selected one; if
    /// the last selected candidate is the back-most (or there is none), wraps to the
    /// front-most. An empty pick set clears the selection.
    pub fn cycle_selection(&self, selected: &SlotSet) -> SlotSet {
        let mut next = None;
        for slot in self.front_to_back() {
            if selected.contains(slot) {
                next = None;
            } else if next.is_none() {
                next = Some(slot);
            }
        }
        next.or_else(|| self.front_most())
            .map(SlotSet::single)
            .unwrap_or_default()
    }

    /// `selected` with the front-most candidate's membership flipped
    pub fn toggle_front_most(&self, selected: &SlotSet) -> SlotSet {
        match self.front_most() {
            Some(slot) => {
                let single = SlotSet::single(slot);
                if selected.contains(slot) {
                    selected.minus(&single)
                } else {
                    selected.union(&single)
                }
            }
            None => selected.clone(),
        }
    }
}

/// Slots whose bounds lie entirely inside `area`
pub fn slots_within(state: &EditState, area: Rect) -> SlotSet {
    SlotSet::from_sorted(
        state
            .elements()
            .iter()
            .enumerate()
            .filter(|(_, element)| area.contains_rect(element.bounds()))
            .map(|(slot, _)| slot)
            .collect(),
    )
}
