use crate::math::Real;
use na::Point2;

// Polygons with a signed area below this threshold are considered degenerate.
const MIN_POLYGON_AREA: Real = 1.0e-12;

/// Computes the area and centroid of a simple polygon with the signed-area formula.
///
/// The polygon is assumed to be closed, i.e., first and last point of the
/// polygon are implicitly assumed to be connected by an edge. The returned
/// area is non-negative regardless of the polygon orientation.
///
/// Returns `None` if the polygon has fewer than three vertices or if its
/// area vanishes (all vertices collinear), since the centroid is undefined
/// in that case.
pub fn polygon_area_and_centroid(poly: &[Point2<Real>]) -> Option<(Real, Point2<Real>)> {
    if poly.len() < 3 {
        return None;
    }

    let mut doubled_area = 0.0;
    let mut acc = na::Vector2::zeros();

    for i1 in 0..poly.len() {
        let i2 = (i1 + 1) % poly.len();
        let a = &poly[i1];
        let b = &poly[i2];
        let w = a.coords.perp(&b.coords);

        doubled_area += w;
        acc += (a.coords + b.coords) * w;
    }

    let area = doubled_area / 2.0;

    if area.abs() < MIN_POLYGON_AREA {
        return None;
    }

    let centroid = Point2::from(acc / (6.0 * area));
    Some((area.abs(), centroid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_square() {
        let poly = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]].map(Point2::from);
        let (area, centroid) = polygon_area_and_centroid(&poly).unwrap();

        assert_relative_eq!(area, 1.0);
        assert_relative_eq!(centroid, Point2::new(0.5, 0.5));
    }

    #[test]
    fn area_is_orientation_independent() {
        let ccw = [[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [0.0, 1.0]].map(Point2::from);
        let cw: Vec<_> = ccw.iter().rev().copied().collect();

        let (area_ccw, c_ccw) = polygon_area_and_centroid(&ccw).unwrap();
        let (area_cw, c_cw) = polygon_area_and_centroid(&cw).unwrap();

        assert_relative_eq!(area_ccw, 2.0);
        assert_relative_eq!(area_ccw, area_cw);
        assert_relative_eq!(c_ccw, c_cw);
    }

    #[test]
    fn triangle_centroid() {
        let poly = [[0.0, 0.0], [3.0, 0.0], [0.0, 3.0]].map(Point2::from);
        let (area, centroid) = polygon_area_and_centroid(&poly).unwrap();

        assert_relative_eq!(area, 4.5);
        assert_relative_eq!(centroid, Point2::new(1.0, 1.0));
    }

    #[test]
    fn degenerate_polygons_are_rejected() {
        let segment = [[0.0, 0.0], [1.0, 1.0]].map(Point2::from);
        assert!(polygon_area_and_centroid(&segment).is_none());

        let collinear = [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]].map(Point2::from);
        assert!(polygon_area_and_centroid(&collinear).is_none());
    }
}
