use crate::math::{Point, Real};
use crate::utils::PlaneFrame;
use crate::volume::SegmentationVolume;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The sampled cross-section of a segmentation volume along a cutting plane.
///
/// The section is a square 2-D grid of sample cells lying exactly on the
/// plane. Each cell carries its world coordinates and whether the nearest
/// volume voxel is occupied.
pub struct PlaneSection {
    side: usize,
    mask: Vec<bool>,
    points: Vec<Point<Real>>,
}

impl PlaneSection {
    /// The number of sample cells along each side of the section grid.
    pub fn side(&self) -> usize {
        self.side
    }

    /// The occupancy of the sample cell `(i, j)`.
    pub fn cell(&self, i: usize, j: usize) -> bool {
        assert!(i < self.side && j < self.side);
        self.mask[i + self.side * j]
    }

    /// The world coordinates of the sample cell `(i, j)`.
    pub fn point(&self, i: usize, j: usize) -> &Point<Real> {
        assert!(i < self.side && j < self.side);
        &self.points[i + self.side * j]
    }

    /// The number of occupied sample cells.
    pub fn occupied_count(&self) -> usize {
        self.mask.iter().filter(|occupied| **occupied).count()
    }

    /// The world coordinates of all occupied sample cells.
    pub fn occupied_points(&self) -> impl Iterator<Item = &Point<Real>> + '_ {
        self.mask
            .iter()
            .zip(self.points.iter())
            .filter(|(occupied, _)| **occupied)
            .map(|(_, pt)| pt)
    }
}

impl SegmentationVolume {
    /// Rasterizes the cross-section of this volume along the given plane.
    ///
    /// The plane is sampled on a regular in-plane grid with the given
    /// `step`, extending one volume diagonal on each side of the plane
    /// pivot so that the section covers the whole grid for any pivot lying
    /// inside of it. Occupancy is looked up at the nearest voxel center.
    pub fn plane_section(&self, frame: &PlaneFrame, step: Real) -> PlaneSection {
        let (mins, maxs) = self.world_extents();
        let half_extent = na::distance(&mins, &maxs);
        let side = (2.0 * half_extent / step).ceil() as usize + 1;

        #[cfg(not(feature = "parallel"))]
        let cells: Vec<(bool, Point<Real>)> = (0..side)
            .flat_map(|j| self.section_row(frame, j, side, half_extent, step))
            .collect();
        #[cfg(feature = "parallel")]
        let cells: Vec<(bool, Point<Real>)> = (0..side)
            .into_par_iter()
            .flat_map_iter(|j| self.section_row(frame, j, side, half_extent, step))
            .collect();

        let (mask, points) = cells.into_iter().unzip();

        PlaneSection { side, mask, points }
    }

    // Samples one row of the section grid.
    fn section_row(
        &self,
        frame: &PlaneFrame,
        j: usize,
        side: usize,
        half_extent: Real,
        step: Real,
    ) -> Vec<(bool, Point<Real>)> {
        let w = -half_extent + j as Real * step;

        (0..side)
            .map(|i| {
                let u = -half_extent + i as Real * step;
                let pt = frame.from_local(&Point::new(u, w, 0.0));
                (self.contains_world(&pt), pt)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{UnitVector, Vector};
    use crate::volume::VolumeAxes;

    fn ball_volume() -> SegmentationVolume {
        let axes = VolumeAxes::new(Point::origin(), Vector::new(1.0, 1.0, 1.0));
        SegmentationVolume::from_fn([21, 21, 21], axes, |i, j, k| {
            let d = Point::new(i as Real, j as Real, k as Real) - Point::new(10.0, 10.0, 10.0);
            d.norm() <= 6.0
        })
        .unwrap()
    }

    #[test]
    fn horizontal_section_lies_on_the_plane() {
        let volume = ball_volume();
        let normal = UnitVector::new_normalize(Vector::z());
        let frame = PlaneFrame::try_new(&normal, &Point::new(10.0, 10.0, 10.0)).unwrap();
        let section = volume.plane_section(&frame, 1.0);

        assert!(section.occupied_count() > 0);

        for pt in section.occupied_points() {
            assert_relative_eq!(pt.z, 10.0, epsilon = 1.0e-9);
            // Occupied samples stay close to the segmented ball.
            let d = pt - Point::new(10.0, 10.0, 10.0);
            assert!(d.norm() <= 6.0 + 1.0);
        }
    }

    #[test]
    fn section_misses_the_segmentation() {
        let volume = ball_volume();
        let normal = UnitVector::new_normalize(Vector::z());
        let frame = PlaneFrame::try_new(&normal, &Point::new(10.0, 10.0, 19.0)).unwrap();
        let section = volume.plane_section(&frame, 1.0);

        assert_eq!(section.occupied_count(), 0);
    }
}
