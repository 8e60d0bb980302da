use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::{Element, ElementProperties};

/// A single marked location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointElement {
    pub(crate) location: Pos2,
    #[serde(default)]
    pub(crate) properties: ElementProperties,
}

impl PointElement {
    pub fn new(location: Pos2, properties: ElementProperties) -> Self {
        Self { location, properties }
    }

    pub fn location(&self) -> Pos2 {
        self.location
    }

    pub fn with_location(&self, location: Pos2) -> Self {
        Self::new(location, self.properties)
    }
}

impl Element for PointElement {
    fn element_type(&self) -> &'static str {
        "point"
    }

    fn properties(&self) -> &ElementProperties {
        &self.properties
    }

    fn bounds(&self) -> Rect {
        Rect::from_min_max(self.location, self.location)
    }

    // Open square window around the point.
    fn contains(&self, padding: f32, point: Pos2) -> bool {
        let d = point - self.location;
        d.x.abs() < padding && d.y.abs() < padding
    }

    fn translated(&self, delta: Vec2) -> Self {
        self.with_location(self.location + delta)
    }
}
