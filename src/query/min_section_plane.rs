use crate::math::{Point, Real, UnitVector, Vector};
use crate::query::section_area::{section_area, SearchState};
use crate::query::simplex_search::{self, SimplexParams};
use crate::query::PlaneSearchError;
use crate::volume::SegmentationVolume;

/// Parameters of the minimal cross-section plane search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SectionPlaneParams {
    /// The world height the search pivot is pinned to.
    ///
    /// When `None`, the height defaults to two thirds of the way from the
    /// bottom to the top of the segmented z-extent:
    /// `z_max - (z_max - z_min) / 3`.
    pub reference_height: Option<Real>,
    /// The plane normal the simplex search starts from.
    ///
    /// The default is tilted roughly 60° away from the vertical axis: far
    /// from the unsupported vertical-plane singularity, and far enough from
    /// the horizontal plane to give the simplex room to explore. This is an
    /// empirically tuned default, not a load-bearing constant.
    pub seed_normal: Vector<Real>,
    /// The in-plane distance between two cross-section samples.
    ///
    /// Defaults to the smallest voxel spacing of the volume.
    pub sampling_step: Option<Real>,
    /// The simplex search tolerances and budget.
    pub simplex: SimplexParams,
}

impl Default for SectionPlaneParams {
    fn default() -> Self {
        SectionPlaneParams {
            reference_height: None,
            seed_normal: Vector::new(1.0, 0.0, 0.6),
            sampling_step: None,
            simplex: SimplexParams::default(),
        }
    }
}

/// The result of the minimal cross-section plane search.
#[derive(Clone, Debug)]
pub struct MinSectionPlane {
    /// The unit normal of the minimal-area cutting plane.
    pub normal: UnitVector<Real>,
    /// The pivot of the minimal-area cutting plane.
    ///
    /// This is the cross-section centroid the last objective evaluation
    /// settled on; its z coordinate still equals the reference height the
    /// search started from.
    pub pivot: Point<Real>,
    /// The minimal cross-section area.
    pub area: Real,
    /// The cross-section area measured by every objective evaluation, in
    /// evaluation order (including the initial horizontal seed section).
    pub areas: Vec<Real>,
    /// The number of objective evaluations spent by the simplex search.
    pub evals: usize,
}

/// Searches the cutting plane minimizing the segmented cross-section area.
///
/// The search seeds its pivot on the horizontal cross-section at the
/// reference height, then drives a Nelder-Mead simplex search over the
/// plane normal. Every objective evaluation re-centers the pivot at the
/// cross-section centroid it measured, so the pivot tracks the segmented
/// structure while only the normal is optimized.
///
/// Any geometric failure during an evaluation (vertical or degenerate
/// normal, degenerate cross-section, inconsistent plane frame) aborts the
/// whole search, as does exhausting the evaluation budget.
///
/// # Example
///
/// ```
/// use sectio::math::{Point, Vector};
/// use sectio::query::{find_min_section_plane, SectionPlaneParams};
/// use sectio::volume::{SegmentationVolume, VolumeAxes};
///
/// // A ball of radius 8 voxels centered in a 25^3 grid.
/// let axes = VolumeAxes::new(Point::origin(), Vector::new(1.0, 1.0, 1.0));
/// let volume = SegmentationVolume::from_fn([25, 25, 25], axes, |i, j, k| {
///     let d = Point::new(i as f64, j as f64, k as f64) - Point::new(12.0, 12.0, 12.0);
///     d.norm() <= 8.0
/// })
/// .unwrap();
///
/// let plane = find_min_section_plane(&volume, &SectionPlaneParams::default()).unwrap();
/// assert!(plane.area > 0.0);
/// assert!(plane.normal.z != 0.0);
/// ```
pub fn find_min_section_plane(
    volume: &SegmentationVolume,
    params: &SectionPlaneParams,
) -> Result<MinSectionPlane, PlaneSearchError> {
    let (z_min, z_max) = volume
        .occupied_z_extent()
        .ok_or(PlaneSearchError::EmptySegmentation)?;
    let centroid = volume
        .occupied_centroid()
        .ok_or(PlaneSearchError::EmptySegmentation)?;
    let z0 = params
        .reference_height
        .unwrap_or(z_max - (z_max - z_min) / 3.0);
    let step = params
        .sampling_step
        .unwrap_or_else(|| volume.axes().spacing.min());

    // Seed the pivot on the horizontal cross-section at the reference
    // height: one objective evaluation at the vertical normal performs the
    // rasterize/hull/centroid/re-center sequence, and the z pinning keeps
    // the pivot at z0.
    let mut state = SearchState::new(Point::new(centroid.x, centroid.y, z0));
    let _seed_area = section_area(volume, &mut state, &Vector::z(), step)?;
    log::debug!(
        "seeded section plane search at pivot {:?} (z0 = {})",
        state.pivot(),
        z0
    );

    let minimum = simplex_search::minimize(&params.seed_normal, &params.simplex, |normal| {
        section_area(volume, &mut state, normal, step)
    })?;

    Ok(MinSectionPlane {
        normal: UnitVector::new_normalize(minimum.x),
        pivot: state.pivot(),
        area: minimum.value,
        areas: state.into_areas(),
        evals: minimum.evals,
    })
}
