//! Various geometrical operators.

pub use self::plane_frame::PlaneFrame;

mod plane_frame;
