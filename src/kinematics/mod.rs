//! Implements discrete regions and fields with gradient extraction
//!
//! A [Region] holds the precomputed integration data of a homogeneous mesh
//! (shape function values, reference gradients, and volume weights). A
//! [Field] attaches nodal values and a [Kinematics] variant to a region and
//! extracts gradient and deformation gradient grids from them.

mod field;
mod region;
pub use crate::kinematics::field::*;
pub use crate::kinematics::region::*;
