//! Fuses an open polyline being drawn with an existing polygon into one closed polygon.
//!
//! Targets are extrapolated past each open end of A by reflecting the adjacent edge. B's
//! vertices nearest those targets become the join points `bi` and `bj`; the arc of B between
//! them is where A is expected to run, so its fit is scored by the mean squared distance of
//! those B vertices to A. The merged ring is all of A followed by the rest of B.

use egui::Pos2;
use std::fmt;

use super::polygon::Polygon;
use crate::config::EditorConfig;

/// Score given to every failed merge
pub const SCORE_POOR: f32 = 1_000_000.0;

pub const REASON_TOO_FAR_FROM_TARGETS: &str = "B is too far from target vertices of A";
pub const REASON_TOO_FAR_ON_AVERAGE: &str = "A is on average too far from B";
pub const REASON_DEGENERATE: &str = "A needs at least two vertices and B at least one";

/// How far the targets are extrapolated, as a multiple of the end edge
const TARGET_EXTENSION: f32 = 1.0;

/// Thresholds for accepting a merge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeParams {
    pub max_target_distance: f32,
    pub max_mean_sq_distance: f32,
}

impl Default for MergeParams {
    fn default() -> Self {
        Self::from(&EditorConfig::default())
    }
}

impl From<&EditorConfig> for MergeParams {
    fn from(config: &EditorConfig) -> Self {
        Self {
            max_target_distance: config.merge_max_target_distance,
            max_mean_sq_distance: config.merge_max_mean_sq_distance,
        }
    }
}

/// Outcome of scoring one orientation of B against A. Lower scores are better.
#[derive(Clone, PartialEq)]
pub struct PolylineMerge {
    score: f32,
    failure_reason: Option<&'static str>,
    merged: Option<Polygon>,
    join: Option<(usize, usize)>,
}

impl PolylineMerge {
    /// Score merging open polyline `a` with `b`, treating `b` as a ring
    pub fn compute(a: &Polygon, b: &Polygon, params: &MergeParams) -> Self {
        let na = a.vertex_count();
        let nb = b.vertex_count();
        if na < 2 || nb < 1 {
            return Self::failed(REASON_DEGENERATE, None);
        }

        let a_first = a.vertex(0);
        let a_last = a.vertex(na - 1);
        let start_target = a_first + (a_first - a.vertex(1)) * TARGET_EXTENSION;
        let end_target = a_last + (a_last - a.vertex_mod(na as isize - 2)) * TARGET_EXTENSION;

        let (Some((bi, di)), Some((bj, dj))) =
            (b.closest_vertex(start_target), b.closest_vertex(end_target))
        else {
            return Self::failed(REASON_DEGENERATE, None);
        };
        let join = Some((bi, bj));
        if di > params.max_target_distance || dj > params.max_target_distance {
            return Self::failed(REASON_TOO_FAR_FROM_TARGETS, join);
        }

        // Walk B forward from bi to bj inclusive, wrapping around the ring.
        let mut sum = 0.0;
        let mut samples = 0;
        let mut i = bi;
        loop {
            let d = a.boundary_distance_from(b.vertex(i));
            sum += d * d;
            samples += 1;
            if i == bj {
                break;
            }
            i = (i + 1) % nb;
        }
        let mean_sq = sum / samples as f32;
        if mean_sq > params.max_mean_sq_distance {
            return Self::failed(REASON_TOO_FAR_ON_AVERAGE, join);
        }

        let mut vertices: Vec<Pos2> = a.vertices().to_vec();
        let mut k = (bj + 1) % nb;
        while k != bi {
            vertices.push(b.vertex(k));
            k = (k + 1) % nb;
        }

        Self {
            score: mean_sq,
            failure_reason: None,
            merged: Some(Polygon::closed(vertices)),
            join,
        }
    }

    fn failed(reason: &'static str, join: Option<(usize, usize)>) -> Self {
        Self {
            score: SCORE_POOR,
            failure_reason: Some(reason),
            merged: None,
            join,
        }
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    /// Why the merge was rejected, or `None` on success
    pub fn failure_reason(&self) -> Option<&'static str> {
        self.failure_reason
    }

    pub fn is_success(&self) -> bool {
        self.failure_reason.is_none()
    }

    pub fn merged_result(&self) -> Option<&Polygon> {
        self.merged.as_ref()
    }

    pub fn into_merged(self) -> Option<Polygon> {
        self.merged
    }

    /// Indices of B's vertices nearest the start and end targets
    pub fn join_vertices(&self) -> Option<(usize, usize)> {
        self.join
    }
}

impl fmt::Debug for PolylineMerge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolylineMerge")
            .field("score", &self.score)
            .field("failure_reason", &self.failure_reason)
            .field("join", &self.join)
            .field("merged_vertices", &self.merged.as_ref().map(Polygon::vertex_count))
            .finish()
    }
}

/// Try `b` in both orientations and keep the lower scoring result
pub fn merge_polylines(a: &Polygon, b: &Polygon, params: &MergeParams) -> PolylineMerge {
    let ring = b.with_open(false);
    let forward = PolylineMerge::compute(a, &ring, params);
    let backward = PolylineMerge::compute(a, &ring.reversed(), params);
    let best = if backward.score() < forward.score() { backward } else { forward };
    log::debug!("Polyline merge: {:?}", best);
    best
}
