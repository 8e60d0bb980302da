use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::common::{HANDLE_INSET_FACTOR, ROTATION_RING_GAP, ensure_valid_rect};
use super::handles::{BoxHandle, EditHandle};
use super::{Element, ElementProperties};
use crate::geometry::{box_corner, distance_to_line_segment, half_diagonal};

/// An axis-aligned box; shared by the box and mask element variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectElement {
    pub(crate) bounds: Rect,
    #[serde(default)]
    pub(crate) properties: ElementProperties,
}

impl RectElement {
    /// Degenerate bounds are grown to the minimum element size
    pub fn new(bounds: Rect, properties: ElementProperties) -> Self {
        Self {
            bounds: ensure_valid_rect(bounds),
            properties,
        }
    }

    pub fn with_bounds(&self, bounds: Rect) -> Self {
        Self::new(bounds, self.properties)
    }

    /// Radius of the ring a rotated box can be spun by
    pub fn rotation_ring_radius(&self, padding: f32) -> f32 {
        half_diagonal(self.bounds) + ROTATION_RING_GAP * padding
    }

    /// Corner and edge handles, tested on the bounds grown slightly so they sit just outside
    pub fn resize_handle_at(&self, point: Pos2, padding: f32) -> Option<BoxHandle> {
        let r = self.bounds.expand(padding * HANDLE_INSET_FACTOR);
        for corner in 0..4 {
            if box_corner(r, corner).distance(point) < padding {
                return Some(BoxHandle::from_index(corner));
            }
        }
        for edge in 0..4 {
            let d = distance_to_line_segment(point, box_corner(r, edge), box_corner(r, edge + 1));
            if d < padding {
                return Some(BoxHandle::from_index(edge + 4));
            }
        }
        None
    }

    /// Whether `point` lies on the rotation ring; only boxes carrying a rotation have one
    pub fn is_on_rotation_ring(&self, point: Pos2, padding: f32) -> bool {
        if self.properties.rotation.is_none() {
            return false;
        }
        let radius = self.rotation_ring_radius(padding);
        (point.distance(self.bounds.center()) - radius).abs() < padding
    }
}

impl Element for RectElement {
    fn element_type(&self) -> &'static str {
        "box"
    }

    fn properties(&self) -> &ElementProperties {
        &self.properties
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn contains(&self, padding: f32, point: Pos2) -> bool {
        self.bounds.expand(padding).contains(point)
    }

    fn translated(&self, delta: Vec2) -> Self {
        self.with_bounds(self.bounds.translate(delta))
    }

    fn edit_handle_at(&self, point: Pos2, padding: f32) -> Option<EditHandle> {
        if let Some(handle) = self.resize_handle_at(point, padding) {
            return Some(EditHandle::Resize(handle));
        }
        self.is_on_rotation_ring(point, padding)
            .then_some(EditHandle::Rotate)
    }
}
