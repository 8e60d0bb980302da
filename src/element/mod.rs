use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

mod common;
pub mod handles;
mod point;
mod polygon;
mod rect;

pub use common::{ElementProperties, HANDLE_INSET_FACTOR, MIN_ELEMENT_SIZE, ROTATION_RING_GAP};
use common::validate_rect;
pub use handles::{BoxHandle, EditHandle};
pub use point::PointElement;
pub use polygon::PolygonElement;
pub use rect::RectElement;

use crate::error::{EditorError, EditorResult};
use crate::geometry::Polygon;

/// Behaviour shared by every element variant
pub trait Element {
    /// Get the element type as a string
    fn element_type(&self) -> &'static str;

    fn properties(&self) -> &ElementProperties;

    /// Get the bounding rectangle for this element
    fn bounds(&self) -> Rect;

    /// Test if the element contains `point`, with `padding` world units of tolerance
    fn contains(&self, padding: f32, point: Pos2) -> bool;

    /// A copy of the element moved by `delta`
    fn translated(&self, delta: Vec2) -> Self
    where
        Self: Sized;

    /// The directly editable part of the element under `point`, if any
    fn edit_handle_at(&self, _point: Pos2, _padding: f32) -> Option<EditHandle> {
        None
    }
}

/// Enumeration of all annotation kinds.
///
/// Masks are boxes with their own tag: they share the box geometry and hit tests but are
/// never rotated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EditorElement {
    Point(PointElement),
    Rect(RectElement),
    Polygon(PolygonElement),
    Mask(RectElement),
}

impl EditorElement {
    pub fn point(location: Pos2) -> Self {
        Self::Point(PointElement::new(location, ElementProperties::default()))
    }

    pub fn rect(bounds: Rect) -> Self {
        Self::Rect(RectElement::new(bounds, ElementProperties::default()))
    }

    pub fn mask(bounds: Rect) -> Self {
        Self::Mask(RectElement::new(bounds, ElementProperties::default()))
    }

    pub fn polygon(polygon: Polygon) -> Self {
        Self::Polygon(PolygonElement::new(polygon, ElementProperties::default()))
    }

    /// Boxes and masks
    pub fn is_rect_like(&self) -> bool {
        matches!(self, Self::Rect(_) | Self::Mask(_))
    }

    pub fn as_rect(&self) -> Option<&RectElement> {
        match self {
            Self::Rect(r) | Self::Mask(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&PolygonElement> {
        match self {
            Self::Polygon(p) => Some(p),
            _ => None,
        }
    }

    /// Same variant and properties with new box bounds; other variants are returned unchanged
    pub fn with_bounds(&self, bounds: Rect) -> Self {
        match self {
            Self::Rect(r) => Self::Rect(r.with_bounds(bounds)),
            Self::Mask(r) => Self::Mask(r.with_bounds(bounds)),
            other => other.clone(),
        }
    }

    pub fn with_properties(&self, properties: ElementProperties) -> Self {
        match self {
            Self::Point(p) => Self::Point(PointElement::new(p.location, properties)),
            Self::Rect(r) => Self::Rect(RectElement::new(r.bounds, properties)),
            Self::Polygon(p) => Self::Polygon(PolygonElement::new(p.polygon.clone(), properties)),
            Self::Mask(r) => Self::Mask(RectElement::new(r.bounds, properties)),
        }
    }

    /// Check the geometry invariants, correcting degenerate boxes.
    ///
    /// Fails for polygons that are not well defined and for non-finite coordinates.
    pub fn validated(self) -> EditorResult<Self> {
        match self {
            Self::Point(p) => {
                if p.location.is_finite() {
                    Ok(Self::Point(p))
                } else {
                    Err(EditorError::InvalidGeometry(format!(
                        "Point location is not finite: {:?}",
                        p.location
                    )))
                }
            }
            Self::Rect(r) => Self::validated_rect(r).map(Self::Rect),
            Self::Mask(r) => Self::validated_rect(r).map(Self::Mask),
            Self::Polygon(p) => {
                if !p.polygon.is_well_defined() {
                    return Err(EditorError::InvalidGeometry(format!(
                        "Polygon with {} vertices (open: {}) is not well defined",
                        p.polygon.vertex_count(),
                        p.polygon.is_open()
                    )));
                }
                if p.polygon.vertices().iter().any(|v| !v.is_finite()) {
                    return Err(EditorError::InvalidGeometry(
                        "Polygon has a non-finite vertex".to_owned(),
                    ));
                }
                Ok(Self::Polygon(p))
            }
        }
    }

    fn validated_rect(r: RectElement) -> EditorResult<RectElement> {
        if validate_rect(&r.bounds).is_ok() {
            return Ok(r);
        }
        let corrected = RectElement::new(r.bounds, r.properties);
        validate_rect(&corrected.bounds).map_err(EditorError::InvalidGeometry)?;
        log::warn!("Corrected degenerate box {:?} to {:?}", r.bounds, corrected.bounds);
        Ok(corrected)
    }
}

impl Element for EditorElement {
    fn element_type(&self) -> &'static str {
        match self {
            Self::Point(p) => p.element_type(),
            Self::Rect(r) => r.element_type(),
            Self::Polygon(p) => p.element_type(),
            Self::Mask(_) => "mask",
        }
    }

    fn properties(&self) -> &ElementProperties {
        match self {
            Self::Point(p) => p.properties(),
            Self::Rect(r) | Self::Mask(r) => r.properties(),
            Self::Polygon(p) => p.properties(),
        }
    }

    fn bounds(&self) -> Rect {
        match self {
            Self::Point(p) => p.bounds(),
            Self::Rect(r) | Self::Mask(r) => r.bounds(),
            Self::Polygon(p) => p.bounds(),
        }
    }

    fn contains(&self, padding: f32, point: Pos2) -> bool {
        match self {
            Self::Point(p) => p.contains(padding, point),
            Self::Rect(r) | Self::Mask(r) => r.contains(padding, point),
            Self::Polygon(p) => p.contains(padding, point),
        }
    }

    fn translated(&self, delta: Vec2) -> Self {
        match self {
            Self::Point(p) => Self::Point(p.translated(delta)),
            Self::Rect(r) => Self::Rect(r.translated(delta)),
            Self::Polygon(p) => Self::Polygon(p.translated(delta)),
            Self::Mask(r) => Self::Mask(r.translated(delta)),
        }
    }

    fn edit_handle_at(&self, point: Pos2, padding: f32) -> Option<EditHandle> {
        match self {
            Self::Point(p) => p.edit_handle_at(point, padding),
            Self::Rect(r) => r.edit_handle_at(point, padding),
            Self::Polygon(p) => p.edit_handle_at(point, padding),
            // Masks stay axis-aligned, so only their resize handles count.
            Self::Mask(r) => r.resize_handle_at(point, padding).map(EditHandle::Resize),
        }
    }
}
