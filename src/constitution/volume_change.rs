use super::AreaChange;
use crate::tensor::{det, Tensor2Field, Tensor4Field};
use crate::StrError;
use russell_lab::Matrix;

/// Implements the volume-change map J = det(F) and its derivatives
pub struct VolumeChange {}

impl VolumeChange {
    /// Computes J = det(F) over the grid
    pub fn function(ff: &Tensor2Field) -> Result<Matrix, StrError> {
        det(ff)
    }

    /// Computes dJ/dF = cof(F) over the grid
    pub fn gradient(ff: &Tensor2Field) -> Result<Tensor2Field, StrError> {
        AreaChange::function(ff)
    }

    /// Computes d²J/dF² over the grid
    pub fn hessian(ff: &Tensor2Field) -> Result<Tensor4Field, StrError> {
        AreaChange::gradient(ff)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
