pub mod hit_testing;
pub mod merge;
pub mod polygon;

pub use hit_testing::{
    box_corner, calculate_bounds, distance_to_line_segment, half_diagonal, intersection_over_union,
};
pub use merge::{MergeParams, PolylineMerge, merge_polylines};
pub use polygon::Polygon;
