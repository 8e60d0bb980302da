use egui::{Pos2, Rect};

/// Distance from `point` to the closest point of the segment `line_start`..`line_end`
pub fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// Corner `index & 3` of a box, clockwise from the top-left
pub fn box_corner(rect: Rect, index: usize) -> Pos2 {
    match index & 3 {
        0 => rect.left_top(),
        1 => rect.right_top(),
        2 => rect.right_bottom(),
        _ => rect.left_bottom(),
    }
}

/// Half the length of a box's diagonal
pub fn half_diagonal(rect: Rect) -> f32 {
    rect.size().length() / 2.0
}

/// Calculate the bounding box for a set of points
pub fn calculate_bounds(points: &[Pos2]) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(Pos2::new(min_x, min_y), Pos2::new(max_x, max_y))
}

/// Intersection area over union area of two boxes; zero when they don't overlap
pub fn intersection_over_union(a: Rect, b: Rect) -> f32 {
    if !a.intersects(b) {
        return 0.0;
    }
    let overlap = a.intersect(b).area();
    let union = a.area() + b.area() - overlap;
    if union <= 0.0 { 0.0 } else { overlap / union }
}

/// Wrap an angle in radians into `(-PI, PI]`
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_segment_distance_clamps_to_endpoints() {
        let d = distance_to_line_segment(pos2(-3.0, 4.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert!((d - 5.0).abs() < 0.001);
        let d = distance_to_line_segment(pos2(5.0, 2.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert!((d - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_iou_of_half_overlap() {
        let a = Rect::from_min_max(pos2(0.0, 0.0), pos2(10.0, 10.0));
        let b = Rect::from_min_max(pos2(5.0, 0.0), pos2(15.0, 10.0));
        assert!((intersection_over_union(a, b) - 50.0 / 150.0).abs() < 0.001);
        let far = Rect::from_min_max(pos2(50.0, 50.0), pos2(60.0, 60.0));
        assert_eq!(intersection_over_union(a, far), 0.0);
    }

    #[test]
    fn test_corner_order_is_clockwise() {
        let r = Rect::from_min_max(pos2(0.0, 0.0), pos2(4.0, 2.0));
        assert_eq!(box_corner(r, 0), pos2(0.0, 0.0));
        assert_eq!(box_corner(r, 1), pos2(4.0, 0.0));
        assert_eq!(box_corner(r, 2), pos2(4.0, 2.0));
        assert_eq!(box_corner(r, 3), pos2(0.0, 2.0));
        assert_eq!(box_corner(r, 7), pos2(0.0, 2.0));
    }
}
