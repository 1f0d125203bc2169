/*!
sectio
========

**sectio** locates, inside a binary 3-D segmentation volume, the cutting
plane of minimal cross-sectional area — a proxy for the plane most
orthogonal to the segmented structure. It was written to find anatomically
meaningful reference planes (e.g. the short-axis plane of a heart
ventricle) without manual plane selection.

The search runs a derivative-free simplex minimization over the plane
normal while a shared search state re-centers the plane pivot at the
evolving cross-section centroid after every evaluation. The entry point is
[`query::find_min_section_plane`].

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::manual_range_contains)]

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod math;
pub mod query;
pub mod transformation;
pub mod utils;
pub mod volume;
