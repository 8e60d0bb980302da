//! Commands that derive a new state from the current one in a single step.
//!
//! Each function returns `None` when the command would not change anything, which is also
//! what disables the matching menu entry.

use egui::Vec2;
use std::cmp::Ordering;

use super::{Command, item_description};
use crate::element::{EditorElement, Element, RectElement};
use crate::geometry::intersection_over_union;
use crate::slot_set::SlotSet;
use crate::state::EditState;

/// Move the selection to the clipboard
pub fn cut(state: &EditState) -> Option<Command> {
    let selected = state.selected();
    if selected.is_empty() {
        return None;
    }
    let clipboard = state.selected_elements();
    let kept = state.subset(&selected.complement(state.element_count()));
    let new_state = state
        .with_clipboard(clipboard)
        .with_selected(SlotSet::new())
        .with_elements(kept);
    Some(Command::new(item_description("Cut", selected.len()), new_state))
}

/// Copy the selection to the clipboard, leaving the elements and selection alone
pub fn copy(state: &EditState) -> Option<Command> {
    let selected = state.selected();
    if selected.is_empty() {
        return None;
    }
    let new_state = state.with_clipboard(state.selected_elements());
    Some(Command::new(item_description("Copy", selected.len()), new_state))
}

/// Append the clipboard, shifted one more `step` diagonally than the previous paste
pub fn paste(state: &EditState, step: f32) -> Option<Command> {
    let clipboard = state.clipboard();
    if clipboard.is_empty() {
        return None;
    }
    let offset = state.duplication_offset() + Vec2::splat(step);
    let mut elements = state.elements().to_vec();
    let first_new = elements.len();
    elements.extend(clipboard.iter().map(|element| element.translated(offset)));
    let pasted = SlotSet::from_sorted((first_new..elements.len()).collect());

    let new_state = state
        .with_elements(elements)
        .with_selected(pasted)
        .with_duplication_offset(offset);
    Some(Command::new(item_description("Paste", clipboard.len()), new_state))
}

/// Change the selection without an undo entry
pub fn set_selection(state: &EditState, slots: SlotSet) -> Option<Command> {
    if state.selected() == &slots {
        return None;
    }
    let description = item_description("Select", slots.len());
    Some(
        Command::new(description, state.with_selected(slots))
            .with_skip_undo(true),
    )
}

pub fn select_all(state: &EditState) -> Option<Command> {
    set_selection(state, SlotSet::all(state.element_count()))
        .map(|c| c.with_description("Select All"))
}

pub fn select_none(state: &EditState) -> Option<Command> {
    set_selection(state, SlotSet::new()).map(|c| c.with_description("Select None"))
}

/// Give every selected element `category`
pub fn set_category(state: &EditState, category: Option<i32>) -> Option<Command> {
    let changed = state
        .selected()
        .iter()
        .any(|slot| state.element(slot).properties().category != category);
    if !changed {
        return None;
    }
    let new_state = state.map_selected(|element| {
        element.with_properties(element.properties().with_category(category))
    });
    Some(Command::new("Set Category", new_state))
}

/// Add a zero rotation to selected boxes that have none, and drop it from those that do
pub fn toggle_rotation(state: &EditState) -> Option<Command> {
    let any_box = state
        .selected()
        .iter()
        .any(|slot| matches!(state.element(slot), EditorElement::Rect(_)));
    if !any_box {
        return None;
    }
    let new_state = state.map_selected(|element| match element {
        EditorElement::Rect(_) => {
            let properties = element.properties();
            let rotation = match properties.rotation {
                Some(_) => None,
                None => Some(0),
            };
            element.with_properties(properties.with_rotation(rotation))
        }
        other => other.clone(),
    });
    Some(Command::new("Toggle Rotation", new_state))
}

/// Greedy non-max suppression over a state made entirely of boxes.
///
/// Boxes are visited by descending confidence and kept only if they overlap every kept box
/// by less than `max_iou`. Survivors end up ordered left to right and the selection is
/// cleared.
pub fn non_max_suppression(state: &EditState, max_iou: f32) -> Option<Command> {
    let elements = state.elements();
    if elements.len() < 2 {
        return None;
    }
    let boxes: Vec<&RectElement> = elements
        .iter()
        .map(|element| match element {
            EditorElement::Rect(r) => Some(r),
            _ => None,
        })
        .collect::<Option<_>>()?;

    let mut sorted = boxes;
    sorted.sort_by(|a, b| compare_confidence(a, b));

    let mut kept: Vec<&RectElement> = Vec::new();
    for candidate in sorted {
        let overlaps = kept
            .iter()
            .any(|k| intersection_over_union(k.bounds(), candidate.bounds()) >= max_iou);
        if !overlaps {
            kept.push(candidate);
        }
    }
    kept.sort_by(|a, b| compare_left_to_right(a, b));

    let result: Vec<EditorElement> = kept.into_iter().cloned().map(EditorElement::Rect).collect();
    if result.as_slice() == elements && state.selected().is_empty() {
        return None;
    }
    log::debug!("Non-max suppression kept {} of {} boxes", result.len(), elements.len());
    let new_state = state.with_selected(SlotSet::new()).with_elements(result);
    Some(Command::new("Non-Max Suppression", new_state))
}

fn compare_confidence(a: &RectElement, b: &RectElement) -> Ordering {
    let confidence = |r: &RectElement| r.properties().confidence.unwrap_or(0);
    confidence(b)
        .cmp(&confidence(a))
        .then_with(|| compare_left_to_right(a, b))
}

fn compare_left_to_right(a: &RectElement, b: &RectElement) -> Ordering {
    let (ra, rb) = (a.bounds(), b.bounds());
    let (ca, cb) = (ra.center(), rb.center());
    ca.x.total_cmp(&cb.x)
        .then_with(|| ca.y.total_cmp(&cb.y))
        .then_with(|| ra.width().total_cmp(&rb.width()))
        .then_with(|| ra.height().total_cmp(&rb.height()))
        .then_with(|| {
            let category = |r: &RectElement| r.properties().category.unwrap_or(0);
            category(a).cmp(&category(b))
        })
}
