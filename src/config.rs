use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::EditorResult;

/// Tunables for the editing engine.
///
/// Distances are in world units unless the name says pixels. Missing fields in a
/// JSON document fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of undo history entries
    pub undo_limit: usize,
    /// Hit tolerance in screen pixels; divided by the zoom to get world units
    pub pick_padding_pixels: f32,
    /// Polyline merge fails if B has no vertex this close to a target point
    pub merge_max_target_distance: f32,
    /// Polyline merge fails if the mean squared distance of the joined arc exceeds this
    pub merge_max_mean_sq_distance: f32,
    /// Curve drawing only samples a new vertex after this much pointer travel
    pub curve_min_sample_distance: f32,
    /// A finished curve whose endpoints are closer than this is closed
    pub curve_close_distance: f32,
    /// Vertex decimation tolerance applied to a finished curve
    pub curve_simplify_tolerance: f32,
    /// Diagonal step added to the duplication offset on every paste
    pub paste_step: f32,
    /// Box rotation is clamped to +/- this many degrees
    pub rotation_limit_degrees: f32,
    /// Non-max suppression drops boxes overlapping a kept box by at least this IoU
    pub nms_max_iou: f32,
    /// Size of the first box placed by the box add operation
    pub default_box_size: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            undo_limit: 50,
            pick_padding_pixels: 8.0,
            merge_max_target_distance: 80.0,
            merge_max_mean_sq_distance: 300.0 * 300.0,
            curve_min_sample_distance: 2.5,
            curve_close_distance: 10.0,
            curve_simplify_tolerance: 0.5,
            paste_step: 8.0,
            rotation_limit_degrees: 85.0,
            nms_max_iou: 0.4,
            default_box_size: 50.0,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from a JSON document
    pub fn from_json_str(json: &str) -> EditorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> EditorResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        log::info!("Loading editor configuration from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // A zero limit would make every recorded command fall off the history.
    fn sanitized(mut self) -> Self {
        if self.undo_limit < 2 {
            log::warn!("undo_limit {} too small, using 2", self.undo_limit);
            self.undo_limit = 2;
        }
        if self.pick_padding_pixels <= 0.0 {
            log::warn!("pick_padding_pixels must be positive, using default");
            self.pick_padding_pixels = Self::default().pick_padding_pixels;
        }
        self
    }
}
