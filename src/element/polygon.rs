use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::handles::EditHandle;
use super::{Element, ElementProperties};
use crate::geometry::Polygon;

/// A polygon or open polyline annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonElement {
    pub(crate) polygon: Polygon,
    #[serde(default)]
    pub(crate) properties: ElementProperties,
}

impl PolygonElement {
    pub fn new(polygon: Polygon, properties: ElementProperties) -> Self {
        Self { polygon, properties }
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn with_polygon(&self, polygon: Polygon) -> Self {
        Self::new(polygon, self.properties)
    }
}

impl Element for PolygonElement {
    fn element_type(&self) -> &'static str {
        "polygon"
    }

    fn properties(&self) -> &ElementProperties {
        &self.properties
    }

    fn bounds(&self) -> Rect {
        self.polygon.bounds()
    }

    fn contains(&self, padding: f32, point: Pos2) -> bool {
        !self.polygon.is_empty() && self.bounds().expand(padding).contains(point)
    }

    fn translated(&self, delta: Vec2) -> Self {
        self.with_polygon(self.polygon.translated(delta))
    }

    // The nearest vertex within the padding.
    fn edit_handle_at(&self, point: Pos2, padding: f32) -> Option<EditHandle> {
        self.polygon
            .closest_vertex(point)
            .filter(|(_, distance)| *distance < padding)
            .map(|(index, _)| EditHandle::Vertex(index))
    }
}
