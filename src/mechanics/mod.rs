//! Implements the nearly-incompressible solid body
//!
//! [SolidBodyNearlyIncompressible] assembles the residual vector and the
//! tangent matrix of a hyperelastic solid with the mean-dilatation technique:
//! the per-cell pressure and mean volume ratio are condensed out of the
//! three-field variational formulation, leaving displacement equations only.

mod solid_body;
mod state;
pub use crate::mechanics::solid_body::*;
pub use crate::mechanics::state::*;

/// Tells whether an error may be resolved by retrying with a smaller increment
///
/// Evaluation failures (e.g., a non-invertible deformation gradient or a
/// non-finite material output) depend on the trial displacements and are
/// recoverable; configuration errors are not.
pub fn is_recoverable(err: crate::StrError) -> bool {
    err == "non-invertible tensor found in field" || err == "material model produced a non-finite value"
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
