use crate::math::{Matrix, Point, Real, UnitVector, Vector, DEFAULT_EPSILON};

/// An orthonormal coordinate frame attached to a cutting plane.
///
/// The basis matrix stores two in-plane directions as its first two columns
/// and the plane normal as its third column. Re-expressing a point in this
/// frame with [`PlaneFrame::to_local`] therefore yields a third coordinate
/// equal to the point's signed distance to the plane; for points lying on
/// the plane it vanishes up to floating-point error.
#[derive(Clone, Debug)]
pub struct PlaneFrame {
    pivot: Point<Real>,
    basis: Matrix<Real>,
}

impl PlaneFrame {
    /// Builds the frame of the plane with the given unit `normal` passing through `pivot`.
    ///
    /// The first in-plane direction is derived analytically from the plane
    /// equation solved for z at the XY reference point `(1, 0)`, which is
    /// well defined precisely because the normal's z component is nonzero.
    ///
    /// Returns `None` if the normal's z component vanishes (vertical planes
    /// are not supported) or is not finite.
    pub fn try_new(normal: &UnitVector<Real>, pivot: &Point<Real>) -> Option<Self> {
        let v = normal.into_inner();

        if v.z == 0.0 || !v.z.is_finite() {
            return None;
        }

        // If the pivot projects onto the reference point itself, the derived
        // direction degenerates; the reference (0, 1) cannot degenerate too.
        let v2 = Self::in_plane_direction(&v, pivot, 1.0, 0.0)
            .or_else(|| Self::in_plane_direction(&v, pivot, 0.0, 1.0))?;
        // Re-normalized to suppress floating-point drift in the cross product.
        let v3 = UnitVector::try_new(v.cross(&v2), DEFAULT_EPSILON)?;
        let basis = Matrix::from_columns(&[v2.into_inner(), v3.into_inner(), v]);

        Some(PlaneFrame {
            pivot: *pivot,
            basis,
        })
    }

    // Direction from `pivot` to the point of the plane above the XY reference
    // `(x, y)`, obtained from the plane equation solved for z.
    fn in_plane_direction(
        v: &Vector<Real>,
        m: &Point<Real>,
        x: Real,
        y: Real,
    ) -> Option<UnitVector<Real>> {
        let z = m.z + (v.x / v.z) * (m.x - x) + (v.y / v.z) * (m.y - y);
        UnitVector::try_new(Vector::new(x - m.x, y - m.y, z - m.z), DEFAULT_EPSILON)
    }

    /// The point the plane pivots about.
    pub fn pivot(&self) -> &Point<Real> {
        &self.pivot
    }

    /// The orthonormal basis matrix, with the plane normal as third column.
    pub fn basis(&self) -> &Matrix<Real> {
        &self.basis
    }

    /// The plane normal.
    pub fn normal(&self) -> UnitVector<Real> {
        UnitVector::new_unchecked(self.basis.column(2).into_owned())
    }

    /// Re-expresses a world-space point in plane-local coordinates.
    pub fn to_local(&self, pt: &Point<Real>) -> Point<Real> {
        Point::from(self.basis.tr_mul(&(pt - self.pivot)))
    }

    /// Maps a plane-local point back to world coordinates.
    pub fn from_local(&self, pt: &Point<Real>) -> Point<Real> {
        self.pivot + self.basis * pt.coords
    }
}
