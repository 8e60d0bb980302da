use egui::{Color32, Pos2, Rect, Shape, Stroke};

use crate::state::EditorContext;

const HIGHLIGHT_COLOR: Color32 = Color32::from_rgb(30, 120, 255);
const GUIDE_COLOR: Color32 = Color32::from_rgba_premultiplied(200, 200, 200, 160);

// Overlay lines keep a constant on-screen width.
fn stroke(ctx: &EditorContext, pixels: f32, color: Color32) -> Stroke {
    Stroke::new(pixels / ctx.zoom(), color)
}

/// Frame drawn around a drag-selection box
pub fn selection_frame(ctx: &EditorContext, rect: Rect) -> Shape {
    Shape::rect_stroke(rect, 0.0, stroke(ctx, 1.5, HIGHLIGHT_COLOR))
}

/// Outline of a box that will be placed on the next click
pub fn guide_box(ctx: &EditorContext, rect: Rect) -> Shape {
    Shape::rect_stroke(rect, 0.0, stroke(ctx, 1.0, GUIDE_COLOR))
}

/// A vertex that would be inserted at `at`, joined to its future neighbours
pub fn ghost_vertex(ctx: &EditorContext, at: Pos2, neighbours: &[Pos2]) -> Vec<Shape> {
    let line = stroke(ctx, 1.0, GUIDE_COLOR);
    let mut shapes: Vec<Shape> = neighbours
        .iter()
        .map(|n| Shape::line_segment([*n, at], line))
        .collect();
    shapes.push(Shape::circle_stroke(at, ctx.padding() * 0.5, stroke(ctx, 1.5, HIGHLIGHT_COLOR)));
    shapes
}

/// The ring a rotated box is spun by
pub fn rotation_ring(ctx: &EditorContext, center: Pos2, radius: f32) -> Shape {
    Shape::circle_stroke(center, radius, stroke(ctx, 1.0, HIGHLIGHT_COLOR))
}
