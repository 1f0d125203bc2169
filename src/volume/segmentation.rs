use crate::math::{Point, Real, Vector};
use crate::num::FromPrimitive;

/// Errors that can occur when constructing a [`SegmentationVolume`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeError {
    /// The voxel buffer length does not match the grid dimensions.
    #[error("expected {expected} voxels for the given dimensions, got {got}")]
    MismatchedVoxelCount {
        /// The voxel count implied by the grid dimensions.
        expected: usize,
        /// The length of the provided voxel buffer.
        got: usize,
    },
    /// One of the per-axis spacings is zero, negative, or not finite.
    #[error("voxel spacings must be strictly positive")]
    NonPositiveSpacing,
}

/// Axis metadata mapping voxel indices to world coordinates.
///
/// `origin` is the world position of the center of voxel `(0, 0, 0)` and
/// `spacing` the world distance between two neighbor voxel centers along
/// each axis. The grid is axis-aligned; rotated acquisition frames must be
/// resampled by the caller.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VolumeAxes {
    /// World position of the center of voxel `(0, 0, 0)`.
    pub origin: Point<Real>,
    /// World distance between neighbor voxel centers, per axis.
    pub spacing: Vector<Real>,
}

impl VolumeAxes {
    /// Creates axis metadata from an origin and per-axis spacings.
    pub fn new(origin: Point<Real>, spacing: Vector<Real>) -> Self {
        VolumeAxes { origin, spacing }
    }

    /// The world coordinates of the center of voxel `(i, j, k)`.
    pub fn world_point(&self, i: usize, j: usize, k: usize) -> Point<Real> {
        let index = Vector::new(i as Real, j as Real, k as Real);
        self.origin + self.spacing.component_mul(&index)
    }

    /// The index of the voxel whose center is nearest to `pt`, if it lies inside the grid.
    pub fn nearest_voxel(&self, pt: &Point<Real>, dims: [usize; 3]) -> Option<[usize; 3]> {
        let continuous = (pt - self.origin).component_div(&self.spacing);
        let mut index = [0; 3];

        for axis in 0..3 {
            let rounded = continuous[axis].round();

            if rounded < 0.0 || rounded > dims[axis] as Real - 1.0 {
                return None;
            }

            index[axis] = rounded as usize;
        }

        Some(index)
    }
}

/// A dense binary 3-D segmentation volume with axis metadata.
///
/// Voxels are stored x-fastest. The volume is read-only for the plane
/// search; mutation is only exposed for building synthetic volumes.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SegmentationVolume {
    dims: [usize; 3],
    axes: VolumeAxes,
    data: Vec<bool>,
}

impl SegmentationVolume {
    /// Creates a volume from a raw voxel buffer.
    pub fn try_new(
        dims: [usize; 3],
        axes: VolumeAxes,
        data: Vec<bool>,
    ) -> Result<Self, VolumeError> {
        let expected = dims[0] * dims[1] * dims[2];

        if data.len() != expected {
            return Err(VolumeError::MismatchedVoxelCount {
                expected,
                got: data.len(),
            });
        }
        if !axes.spacing.iter().all(|s| s.is_finite() && *s > 0.0) {
            return Err(VolumeError::NonPositiveSpacing);
        }

        Ok(SegmentationVolume { dims, axes, data })
    }

    /// Creates a volume by evaluating `f` at every voxel index.
    pub fn from_fn(
        dims: [usize; 3],
        axes: VolumeAxes,
        mut f: impl FnMut(usize, usize, usize) -> bool,
    ) -> Result<Self, VolumeError> {
        let mut data = Vec::with_capacity(dims[0] * dims[1] * dims[2]);

        for k in 0..dims[2] {
            for j in 0..dims[1] {
                for i in 0..dims[0] {
                    data.push(f(i, j, k));
                }
            }
        }

        Self::try_new(dims, axes, data)
    }

    /// The grid dimensions.
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// The axis metadata of this volume.
    pub fn axes(&self) -> &VolumeAxes {
        &self.axes
    }

    fn linear_index(&self, i: usize, j: usize, k: usize) -> usize {
        assert!(i < self.dims[0] && j < self.dims[1] && k < self.dims[2]);
        i + self.dims[0] * (j + self.dims[1] * k)
    }

    /// The occupancy of voxel `(i, j, k)`.
    pub fn voxel(&self, i: usize, j: usize, k: usize) -> bool {
        self.data[self.linear_index(i, j, k)]
    }

    /// Sets the occupancy of voxel `(i, j, k)`.
    pub fn set_voxel(&mut self, i: usize, j: usize, k: usize, occupied: bool) {
        let index = self.linear_index(i, j, k);
        self.data[index] = occupied;
    }

    /// The world coordinates of the center of voxel `(i, j, k)`.
    pub fn world_point(&self, i: usize, j: usize, k: usize) -> Point<Real> {
        self.axes.world_point(i, j, k)
    }

    /// Tests whether the voxel nearest to the given world point is occupied.
    ///
    /// Points outside of the grid are reported as unoccupied.
    pub fn contains_world(&self, pt: &Point<Real>) -> bool {
        match self.axes.nearest_voxel(pt, self.dims) {
            Some([i, j, k]) => self.voxel(i, j, k),
            None => false,
        }
    }

    /// The number of occupied voxels.
    pub fn occupied_count(&self) -> usize {
        self.data.iter().filter(|occupied| **occupied).count()
    }

    /// The world coordinates of all occupied voxel centers.
    pub fn occupied_world_points(&self) -> impl Iterator<Item = Point<Real>> + '_ {
        let [nx, ny, _] = self.dims;

        self.data
            .iter()
            .enumerate()
            .filter(|(_, occupied)| **occupied)
            .map(move |(l, _)| {
                let i = l % nx;
                let j = (l / nx) % ny;
                let k = l / (nx * ny);
                self.world_point(i, j, k)
            })
    }

    /// The world extent of the voxel center grid, as `(mins, maxs)`.
    pub fn world_extents(&self) -> (Point<Real>, Point<Real>) {
        let last = Vector::new(
            self.dims[0].saturating_sub(1) as Real,
            self.dims[1].saturating_sub(1) as Real,
            self.dims[2].saturating_sub(1) as Real,
        );
        (
            self.axes.origin,
            self.axes.origin + self.axes.spacing.component_mul(&last),
        )
    }

    /// The world z-range spanned by the occupied voxels, or `None` if the segmentation is empty.
    pub fn occupied_z_extent(&self) -> Option<(Real, Real)> {
        self.occupied_world_points().fold(None, |extent, pt| {
            let (zmin, zmax) = extent.unwrap_or((pt.z, pt.z));
            Some((zmin.min(pt.z), zmax.max(pt.z)))
        })
    }

    /// The centroid of the occupied voxel centers, or `None` if the segmentation is empty.
    pub fn occupied_centroid(&self) -> Option<Point<Real>> {
        let mut acc = Vector::zeros();
        let mut count = 0usize;

        for pt in self.occupied_world_points() {
            acc += pt.coords;
            count += 1;
        }

        if count == 0 {
            None
        } else {
            Some(Point::from(acc / Real::from_usize(count).unwrap()))
        }
    }
}
