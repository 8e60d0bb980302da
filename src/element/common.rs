use egui::Rect;
use serde::{Deserialize, Serialize};

// Common constants for all element types
pub const MIN_ELEMENT_SIZE: f32 = 1.0;
/// Boxes are grown by this fraction of the pick padding before their handles are tested
pub const HANDLE_INSET_FACTOR: f32 = 0.75;
/// The rotation ring sits this many paddings outside a box's circumscribed circle
pub const ROTATION_RING_GAP: f32 = 2.0;

/// Optional per-element attributes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementProperties {
    pub category: Option<i32>,
    /// Rotation in whole degrees
    pub rotation: Option<i32>,
    /// Detector confidence, used to rank boxes for non-max suppression
    pub confidence: Option<i32>,
}

impl ElementProperties {
    pub fn with_category(self, category: Option<i32>) -> Self {
        Self { category, ..self }
    }

    pub fn with_rotation(self, rotation: Option<i32>) -> Self {
        Self { rotation, ..self }
    }

    pub fn with_confidence(self, confidence: Option<i32>) -> Self {
        Self { confidence, ..self }
    }
}

/// Grow a rectangle to the minimum element size, keeping its min corner.
///
/// Also reorders swapped corners so width and height are never negative.
pub(crate) fn ensure_valid_rect(rect: Rect) -> Rect {
    let rect = Rect::from_two_pos(rect.min, rect.max);
    let width = rect.width().max(MIN_ELEMENT_SIZE);
    let height = rect.height().max(MIN_ELEMENT_SIZE);
    Rect::from_min_size(rect.min, egui::vec2(width, height))
}

/// Validates that a rectangle is finite and has minimum dimensions
pub(crate) fn validate_rect(rect: &Rect) -> Result<(), String> {
    if !rect.is_finite() {
        return Err(format!("Rectangle is not finite: {:?}", rect));
    }
    if rect.width() < MIN_ELEMENT_SIZE || rect.height() < MIN_ELEMENT_SIZE {
        Err(format!(
            "Element dimensions too small (min: {}). Width: {}, Height: {}",
            MIN_ELEMENT_SIZE,
            rect.width(),
            rect.height()
        ))
    } else {
        Ok(())
    }
}
