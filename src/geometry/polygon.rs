use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::hit_testing::{calculate_bounds, distance_to_line_segment};

/// An ordered vertex list that is either an open polyline or a closed ring.
///
/// Values are immutable; every edit returns a new polygon.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Pos2>,
    open: bool,
}

impl Polygon {
    pub fn new(vertices: Vec<Pos2>, open: bool) -> Self {
        Self { vertices, open }
    }

    pub fn open(vertices: Vec<Pos2>) -> Self {
        Self::new(vertices, true)
    }

    pub fn closed(vertices: Vec<Pos2>) -> Self {
        Self::new(vertices, false)
    }

    pub fn vertices(&self) -> &[Pos2] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn vertex(&self, index: usize) -> Pos2 {
        self.vertices[index]
    }

    /// Vertex at `index` taken modulo the vertex count; negative indices count from the end
    pub fn vertex_mod(&self, index: isize) -> Pos2 {
        let n = self.vertices.len() as isize;
        self.vertices[index.rem_euclid(n) as usize]
    }

    pub fn first_vertex(&self) -> Option<Pos2> {
        self.vertices.first().copied()
    }

    pub fn last_vertex(&self) -> Option<Pos2> {
        self.vertices.last().copied()
    }

    /// At least one vertex, and at least three if closed
    pub fn is_well_defined(&self) -> bool {
        let n = self.vertices.len();
        n >= 1 && (self.open || n >= 3)
    }

    /// Distance between the first and last vertex; infinite if empty
    pub fn endpoint_gap(&self) -> f32 {
        match (self.first_vertex(), self.last_vertex()) {
            (Some(a), Some(b)) => a.distance(b),
            _ => f32::INFINITY,
        }
    }

    pub fn bounds(&self) -> Rect {
        calculate_bounds(&self.vertices)
    }

    pub fn with_open(&self, open: bool) -> Self {
        Self::new(self.vertices.clone(), open)
    }

    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self::new(vertices, self.open)
    }

    pub fn with_vertex(&self, index: usize, point: Pos2) -> Self {
        let mut vertices = self.vertices.clone();
        vertices[index] = point;
        Self::new(vertices, self.open)
    }

    /// Insert `point` before `index`; an index past the end appends
    pub fn with_inserted(&self, index: usize, point: Pos2) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.insert(index.min(vertices.len()), point);
        Self::new(vertices, self.open)
    }

    pub fn with_appended(&self, point: Pos2) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.push(point);
        Self::new(vertices, self.open)
    }

    pub fn without_vertex(&self, index: usize) -> Self {
        let mut vertices = self.vertices.clone();
        if index < vertices.len() {
            vertices.remove(index);
        }
        Self::new(vertices, self.open)
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.vertices.iter().map(|v| *v + delta).collect(), self.open)
    }

    /// Boundary segments; a closed polygon includes the edge from the last vertex back to the first
    pub fn edges(&self) -> impl Iterator<Item = (Pos2, Pos2)> + '_ {
        let n = self.vertices.len();
        let count = if self.open || n < 2 { n.saturating_sub(1) } else { n };
        (0..count).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Shortest distance from `point` to the polygon's boundary
    pub fn boundary_distance_from(&self, point: Pos2) -> f32 {
        match self.vertices.len() {
            0 => f32::INFINITY,
            1 => self.vertices[0].distance(point),
            _ => self
                .edges()
                .map(|(a, b)| distance_to_line_segment(point, a, b))
                .fold(f32::INFINITY, f32::min),
        }
    }

    /// Index of the vertex closest to `point`, with its distance
    pub fn closest_vertex(&self, point: Pos2) -> Option<(usize, f32)> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (i, v.distance(point)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Drop vertices that lie within `tolerance` of the simplified outline (Ramer-Douglas-Peucker).
    ///
    /// A closed ring is split at the vertex farthest from its first vertex so both halves keep
    /// their anchors. The result never falls below the minimum vertex count for its kind.
    pub fn simplify(&self, tolerance: f32) -> Self {
        let n = self.vertices.len();
        if n < 3 {
            return self.clone();
        }

        let simplified = if self.open {
            decimate(&self.vertices, tolerance)
        } else {
            let first = self.vertices[0];
            let split = (1..n)
                .max_by(|&a, &b| {
                    first
                        .distance_sq(self.vertices[a])
                        .total_cmp(&first.distance_sq(self.vertices[b]))
                })
                .unwrap_or(n / 2);
            let mut head = decimate(&self.vertices[..=split], tolerance);
            let mut tail_chain = self.vertices[split..].to_vec();
            tail_chain.push(first);
            let tail = decimate(&tail_chain, tolerance);
            // Both chains repeat the split vertex, and the tail ends at the first vertex.
            head.extend_from_slice(&tail[1..tail.len() - 1]);
            head
        };

        let minimum = if self.open { 2 } else { 3 };
        if simplified.len() < minimum {
            return self.clone();
        }
        Self::new(simplified, self.open)
    }
}

fn decimate(points: &[Pos2], tolerance: f32) -> Vec<Pos2> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    let mut stack = vec![(0, points.len() - 1)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let (mut farthest, mut max_dist) = (start, 0.0);
        for i in start + 1..end {
            let d = distance_to_line_segment(points[i], points[start], points[end]);
            if d > max_dist {
                farthest = i;
                max_dist = d;
            }
        }
        if max_dist > tolerance {
            keep[farthest] = true;
            stack.push((start, farthest));
            stack.push((farthest, end));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_simplify_drops_collinear_vertices() {
        let line = Polygon::open(vec![
            pos2(0.0, 0.0),
            pos2(1.0, 0.1),
            pos2(2.0, 0.0),
            pos2(3.0, -0.1),
            pos2(4.0, 0.0),
        ]);
        let simple = line.simplify(0.5);
        assert_eq!(simple.vertices(), &[pos2(0.0, 0.0), pos2(4.0, 0.0)]);
        assert!(simple.is_open());
    }

    #[test]
    fn test_simplify_closed_keeps_corners() {
        let square = Polygon::closed(vec![
            pos2(0.0, 0.0),
            pos2(5.0, 0.0),
            pos2(10.0, 0.0),
            pos2(10.0, 10.0),
            pos2(0.0, 10.0),
        ]);
        let simple = square.simplify(0.5);
        assert_eq!(simple.vertex_count(), 4);
        assert!(!simple.is_open());
        assert!(simple.vertices().contains(&pos2(10.0, 0.0)));
    }

    #[test]
    fn test_well_defined() {
        assert!(!Polygon::open(vec![]).is_well_defined());
        assert!(Polygon::open(vec![pos2(1.0, 1.0)]).is_well_defined());
        assert!(!Polygon::closed(vec![pos2(0.0, 0.0), pos2(1.0, 0.0)]).is_well_defined());
    }

    #[test]
    fn test_open_boundary_skips_closing_edge() {
        let u = Polygon::open(vec![pos2(0.0, 0.0), pos2(0.0, 10.0), pos2(10.0, 10.0)]);
        // Nearest to the (absent) closing edge midpoint is a vertex distance away.
        let d = u.boundary_distance_from(pos2(5.0, 5.0));
        assert!((d - 5.0).abs() < 0.001);
        let d = u.with_open(false).boundary_distance_from(pos2(5.0, 5.0));
        assert!(d.abs() < 0.001);
    }
}
