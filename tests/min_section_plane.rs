use approx::assert_relative_eq;
use sectio::math::{Point, Real, Vector};
use sectio::query::{find_min_section_plane, PlaneSearchError, SectionPlaneParams};
use sectio::volume::{SegmentationVolume, VolumeAxes};

fn unit_axes() -> VolumeAxes {
    VolumeAxes::new(Point::origin(), Vector::new(1.0, 1.0, 1.0))
}

#[test]
fn empty_segmentation_is_rejected() {
    let volume = SegmentationVolume::from_fn([8, 8, 8], unit_axes(), |_, _, _| false).unwrap();
    let result = find_min_section_plane(&volume, &SectionPlaneParams::default());

    assert_eq!(result.unwrap_err(), PlaneSearchError::EmptySegmentation);
}

#[test]
fn sphere_sections_are_rotation_invariant() {
    // A ball of radius 16 centered in a 48^3 grid. Every plane through the
    // center cuts a disk of area pi * r^2, so the objective landscape is
    // nearly flat and the search must terminate without oscillating.
    let center = Point::new(24.0, 24.0, 24.0);
    let radius = 16.0;
    let volume = SegmentationVolume::from_fn([48, 48, 48], unit_axes(), |i, j, k| {
        (Point::new(i as Real, j as Real, k as Real) - center).norm() <= radius
    })
    .unwrap();

    let params = SectionPlaneParams {
        reference_height: Some(center.z),
        ..SectionPlaneParams::default()
    };
    let plane = find_min_section_plane(&volume, &params).unwrap();

    let expected = core::f64::consts::PI * radius * radius;
    assert!(plane.area >= 0.85 * expected && plane.area <= 1.12 * expected);

    // The pivot stays pinned at the reference height and re-centered on the
    // ball axis.
    assert_relative_eq!(plane.pivot.z, center.z);
    assert_relative_eq!(plane.pivot.x, center.x, epsilon = 1.5);
    assert_relative_eq!(plane.pivot.y, center.y, epsilon = 1.5);

    // Flat landscape: the whole evaluation trace stays close to pi * r^2.
    let min = plane.areas.iter().cloned().fold(Real::MAX, Real::min);
    let max = plane.areas.iter().cloned().fold(0.0, Real::max);
    let mean = plane.areas.iter().sum::<Real>() / plane.areas.len() as Real;
    assert!(max - min <= 0.3 * mean);

    // One seed evaluation plus one per budgeted objective evaluation.
    assert_eq!(plane.areas.len(), plane.evals + 1);
}

#[test]
fn tilted_disk_converges_to_the_edge_on_cut() {
    // A thin disk (radius 18, half-thickness 1.5) centered in a 64^3 grid,
    // lying in a plane tilted away from the horizontal. The minimal cut is
    // edge-on: a near-zero sliver whose plane contains the disk axis.
    let center = Point::new(32.0, 32.0, 32.0);
    let disk_axis = Vector::new(0.4, 0.0, 1.0).normalize();
    let radius = 18.0;
    let half_thickness = 1.5;

    let volume = SegmentationVolume::from_fn([64, 64, 64], unit_axes(), |i, j, k| {
        let d = Point::new(i as Real, j as Real, k as Real) - center;
        let along = d.dot(&disk_axis);
        let radial = (d - disk_axis * along).norm();
        along.abs() <= half_thickness && radial <= radius
    })
    .unwrap();

    let params = SectionPlaneParams {
        reference_height: Some(center.z),
        ..SectionPlaneParams::default()
    };
    let plane = find_min_section_plane(&volume, &params).unwrap();

    // The face-on cut would measure the full disk; the edge-on cut is an
    // order of magnitude smaller.
    let face_area = core::f64::consts::PI * radius * radius;
    assert!(plane.area > 0.0);
    assert!(plane.area < 0.4 * face_area);

    // An edge-on cutting plane contains the disk axis, so its normal is
    // orthogonal to it (up to sign).
    assert!(plane.normal.dot(&disk_axis).abs() < 0.5);
    assert_relative_eq!(plane.pivot.z, center.z);
}

#[test]
fn reference_height_defaults_to_the_upper_third() {
    // An axis-aligned box: every horizontal cut has the same area, so the
    // search pivot must sit at z_max - (z_max - z_min) / 3.
    let volume = SegmentationVolume::from_fn([32, 32, 32], unit_axes(), |i, j, k| {
        (8..24).contains(&i) && (8..24).contains(&j) && (4..28).contains(&k)
    })
    .unwrap();

    let plane = find_min_section_plane(&volume, &SectionPlaneParams::default()).unwrap();

    // Occupied z spans [4, 27], so z0 = 27 - 23 / 3.
    assert_relative_eq!(plane.pivot.z, 27.0 - 23.0 / 3.0);
}
