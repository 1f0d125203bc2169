use crate::math::Real;
use na::Point2;

/// Computes the convex hull of a 2-D point set.
///
/// The hull is returned as a counter-clockwise polyline, without repeating
/// the first point at the end. Collinear and duplicate points are dropped,
/// so degenerate inputs (fewer than three points, or all points on one
/// line) yield fewer than three hull points.
pub fn convex_hull2(points: &[Point2<Real>]) -> Vec<Point2<Real>> {
    convex_hull2_idx(points)
        .into_iter()
        .map(|i| points[i])
        .collect()
}

/// Computes the indices of the convex hull vertices of a 2-D point set, counter-clockwise.
pub fn convex_hull2_idx(points: &[Point2<Real>]) -> Vec<usize> {
    if points.len() < 3 {
        return (0..points.len()).collect();
    }

    let mut ids: Vec<usize> = (0..points.len()).collect();
    ids.sort_by(|&a, &b| {
        (points[a].x, points[a].y)
            .partial_cmp(&(points[b].x, points[b].y))
            .unwrap_or(core::cmp::Ordering::Equal)
    });

    let cross =
        |o: usize, a: usize, b: usize| (points[a] - points[o]).perp(&(points[b] - points[o]));
    let mut hull: Vec<usize> = Vec::with_capacity(points.len() + 1);

    // Lower chain.
    for &i in &ids {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], i) <= 0.0 {
            let _ = hull.pop();
        }
        hull.push(i);
    }

    // Upper chain.
    let lower_len = hull.len() + 1;
    for &i in ids.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], i) <= 0.0
        {
            let _ = hull.pop();
        }
        hull.push(i);
    }

    // The last point closes the loop on the first one.
    let _ = hull.pop();
    hull
}
