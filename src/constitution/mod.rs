//! Implements kinematic maps and isochoric material models
//!
//! The kinematic maps ([AreaChange], [VolumeChange]) expose the derivatives
//! of the volume ratio J = det(F) with respect to the deformation gradient.
//! Isochoric material models implement [IsochoricTrait] and are selected at
//! runtime through [Isochoric] and [ParamIsochoric].

mod area_change;
mod isochoric;
mod neo_hooke;
mod statevars;
mod volume_change;
pub use crate::constitution::area_change::*;
pub use crate::constitution::isochoric::*;
pub use crate::constitution::neo_hooke::*;
pub use crate::constitution::statevars::*;
pub use crate::constitution::volume_change::*;
