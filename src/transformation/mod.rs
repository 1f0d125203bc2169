//! Convex hull and polygon measures for 2-D point sets.

pub use self::convex_hull2::{convex_hull2 as convex_hull, convex_hull2_idx as convex_hull_idx};
pub use self::polygon::polygon_area_and_centroid;

mod convex_hull2;
mod polygon;
