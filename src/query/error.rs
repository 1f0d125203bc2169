use crate::math::Real;

/// Errors that can occur during the minimal cross-section plane search.
///
/// Each variant reflects a structurally invalid geometric configuration the
/// optimizer cannot meaningfully continue past, so all of them abort the
/// whole search; there is no local recovery path.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum PlaneSearchError {
    /// The volume does not contain any segmented voxel.
    #[error("the volume does not contain any segmented voxel")]
    EmptySegmentation,

    /// A candidate plane normal has a zero z component.
    ///
    /// The plane-frame construction solves the plane equation for z, which
    /// is undefined for vertical planes. This is a hard modeling limitation
    /// of the search, not an incidental restriction.
    #[error("vertical cutting planes are not supported")]
    VerticalPlaneUnsupported,

    /// A candidate plane normal has zero length.
    #[error("the candidate plane normal is the zero vector")]
    DegenerateNormal,

    /// A plane cross-section was empty or collapsed to fewer than three
    /// hull points, so its area and centroid are undefined.
    #[error("degenerate cross-section polygon ({0} hull points)")]
    DegeneratePolygon(usize),

    /// Projected section points left the cutting plane beyond tolerance.
    ///
    /// This indicates a defect in the plane-frame construction and must not
    /// be caught and ignored.
    #[error("section points leave the cutting plane (worst deviation: {0})")]
    RotationConsistencyViolation(Real),

    /// The evaluation budget was exhausted before the simplex search
    /// converged.
    #[error("plane search did not converge within {0} objective evaluations")]
    OptimizationNotConverged(usize),
}
