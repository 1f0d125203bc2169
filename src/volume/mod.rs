//! Binary segmentation volumes and their plane cross-sections.

pub use self::plane_section::PlaneSection;
pub use self::segmentation::{SegmentationVolume, VolumeAxes, VolumeError};

mod plane_section;
mod segmentation;
