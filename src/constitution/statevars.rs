use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds internal material variables at every (gauss, cell) pair
///
/// The buffer is opaque to the assembly core; only the material model
/// interprets the per-point slices. Models without internal variables use
/// `nvar = 0`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StateVars {
    /// Holds the number of internal variables per integration point
    pub nvar: usize,

    /// Holds the number of integration points per cell
    pub ngauss: usize,

    /// Holds the number of cells
    pub ncell: usize,

    /// Holds the data in cell-major order
    data: Vec<f64>,
}

impl StateVars {
    /// Allocates a new (zeroed) instance
    pub fn new(nvar: usize, ngauss: usize, ncell: usize) -> Result<Self, StrError> {
        if ngauss < 1 || ncell < 1 {
            return Err("grid must have at least one integration point and one cell");
        }
        Ok(StateVars {
            nvar,
            ngauss,
            ncell,
            data: vec![0.0; nvar * ngauss * ncell],
        })
    }

    /// Returns the variables of one integration point
    #[inline]
    pub fn at(&self, p: usize, c: usize) -> &[f64] {
        let start = (c * self.ngauss + p) * self.nvar;
        &self.data[start..start + self.nvar]
    }

    /// Returns the mutable variables of one integration point
    #[inline]
    pub fn at_mut(&mut self, p: usize, c: usize) -> &mut [f64] {
        let start = (c * self.ngauss + p) * self.nvar;
        &mut self.data[start..start + self.nvar]
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
