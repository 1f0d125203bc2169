use crate::math::{Point, Real, UnitVector, Vector};
use crate::query::PlaneSearchError;
use crate::transformation;
use crate::utils::PlaneFrame;
use crate::volume::SegmentationVolume;
use na::Point2;

/// Absolute tolerance on the plane-local z coordinate of projected section
/// points. Exceeding it means the plane frame was built incorrectly.
pub const PLANE_PROJECTION_TOL: Real = 1.0e-10;

/// The mutable state shared by consecutive objective evaluations.
///
/// Each evaluation re-centers the pivot at the centroid of the cross-section
/// it just measured, so the search only has to explore the plane normal
/// while the pivot implicitly tracks the evolving cross-section. The pivot's
/// z coordinate is pinned: every update keeps the previous height, so the
/// pivot never drifts along the plane normal and the final pivot still lies
/// at the reference height the search started from.
#[derive(Clone, Debug)]
pub struct SearchState {
    pivot: Point<Real>,
    areas: Vec<Real>,
}

impl SearchState {
    /// Creates the search state with the given starting pivot.
    pub fn new(pivot: Point<Real>) -> Self {
        SearchState {
            pivot,
            areas: Vec::new(),
        }
    }

    /// The pivot the next objective evaluation will cut through.
    pub fn pivot(&self) -> Point<Real> {
        self.pivot
    }

    /// The cross-section areas measured so far, in evaluation order.
    pub fn areas(&self) -> &[Real] {
        &self.areas
    }

    /// Consumes the state, returning the recorded cross-section areas.
    pub fn into_areas(self) -> Vec<Real> {
        self.areas
    }
}

/// Measures the segmented cross-section area of the plane with the given
/// normal through the current search pivot.
///
/// This is the scalar objective driven by the simplex search. The candidate
/// `normal` does not need to be unit length; it is validated, normalized,
/// and the cross-section is rasterized, projected into the plane frame,
/// hulled and measured. As a side effect the pivot of `state` moves to the
/// measured cross-section centroid (keeping its previous z) and the area is
/// appended to the diagnostics trace.
///
/// # Errors
///
/// Fails with [`PlaneSearchError::DegenerateNormal`] on a zero normal,
/// [`PlaneSearchError::VerticalPlaneUnsupported`] on a normal with zero z
/// component, [`PlaneSearchError::DegeneratePolygon`] if the cross-section
/// is empty or collapses below three hull points, and
/// [`PlaneSearchError::RotationConsistencyViolation`] if projected points
/// leave the plane beyond [`PLANE_PROJECTION_TOL`].
pub fn section_area(
    volume: &SegmentationVolume,
    state: &mut SearchState,
    normal: &Vector<Real>,
    sampling_step: Real,
) -> Result<Real, PlaneSearchError> {
    if normal.norm_squared() == 0.0 {
        return Err(PlaneSearchError::DegenerateNormal);
    }
    if normal.z == 0.0 {
        return Err(PlaneSearchError::VerticalPlaneUnsupported);
    }

    let unit = UnitVector::new_normalize(*normal);
    let pivot = state.pivot;
    let frame =
        PlaneFrame::try_new(&unit, &pivot).ok_or(PlaneSearchError::DegenerateNormal)?;
    let section = volume.plane_section(&frame, sampling_step);

    // Re-express the segmented samples in plane-local coordinates. Their
    // local z must vanish; anything else means the frame is inconsistent.
    let mut locals: Vec<Point2<Real>> = Vec::with_capacity(section.occupied_count());
    let mut worst_deviation: Real = 0.0;

    for pt in section.occupied_points() {
        let local = frame.to_local(pt);
        worst_deviation = worst_deviation.max(local.z.abs());
        locals.push(local.xy());
    }

    if worst_deviation > PLANE_PROJECTION_TOL {
        return Err(PlaneSearchError::RotationConsistencyViolation(
            worst_deviation,
        ));
    }

    let hull = transformation::convex_hull(&locals);

    if hull.len() < 3 {
        return Err(PlaneSearchError::DegeneratePolygon(hull.len()));
    }

    let (area, centroid) = transformation::polygon_area_and_centroid(&hull)
        .ok_or(PlaneSearchError::DegeneratePolygon(hull.len()))?;

    // Lift the centroid back to world coordinates and pin the pivot height.
    let lifted = frame.from_local(&Point::new(centroid.x, centroid.y, 0.0));
    state.pivot = Point::new(lifted.x, lifted.y, pivot.z);
    state.areas.push(area);

    Ok(area)
}
