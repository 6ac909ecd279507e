use super::Tensor2Field;
use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds one fourth-order tensor per (integration point, cell) of a grid
///
/// The component layout mirrors [Tensor2Field]: cell-major over the grid with
/// row-major components within one entry,
///
/// ```text
/// value(i,j,k,l,p,c) = data[(c·ngauss + p)·dim⁴ + ((i·dim + j)·dim + k)·dim + l]
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tensor4Field {
    /// Tensor dimension (2 or 3)
    dim: usize,

    /// Number of integration points per cell
    ngauss: usize,

    /// Number of cells
    ncell: usize,

    /// Components (dim⁴ · ngauss · ncell)
    data: Vec<f64>,
}

impl Tensor4Field {
    /// Allocates a new zeroed instance
    pub fn new(dim: usize, ngauss: usize, ncell: usize) -> Result<Self, StrError> {
        if dim != 2 && dim != 3 {
            return Err("tensor dimension must be 2 or 3");
        }
        if ngauss < 1 || ncell < 1 {
            return Err("grid must have at least one integration point and one cell");
        }
        let nnz = dim * dim * dim * dim * ngauss * ncell;
        Ok(Tensor4Field {
            dim,
            ngauss,
            ncell,
            data: vec![0.0; nnz],
        })
    }

    /// Returns the (dim, ngauss, ncell) dimensions
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.dim, self.ngauss, self.ncell)
    }

    /// Returns the (i,j,k,l) component at the integration point p of cell c
    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize, l: usize, p: usize, c: usize) -> f64 {
        let d = self.dim;
        self.data[(c * self.ngauss + p) * d * d * d * d + ((i * d + j) * d + k) * d + l]
    }

    /// Sets the (i,j,k,l) component at the integration point p of cell c
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, k: usize, l: usize, p: usize, c: usize, value: f64) {
        let d = self.dim;
        self.data[(c * self.ngauss + p) * d * d * d * d + ((i * d + j) * d + k) * d + l] = value;
    }

    /// Adds alpha times a value to the (i,j,k,l) component at (p,c)
    #[inline]
    pub fn add(&mut self, i: usize, j: usize, k: usize, l: usize, p: usize, c: usize, alpha: f64, value: f64) {
        let d = self.dim;
        self.data[(c * self.ngauss + p) * d * d * d * d + ((i * d + j) * d + k) * d + l] += alpha * value;
    }

    /// Fills all components with zeros
    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|x| *x = 0.0);
    }

    /// Tells whether all components are finite or not
    pub fn all_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }

    /// Returns an error if `other` does not share this grid (and tensor dimension)
    pub fn check_same_grid(&self, other: &Tensor4Field) -> Result<(), StrError> {
        if self.dim != other.dim {
            return Err("tensor fields have different dimensions");
        }
        if self.ngauss != other.ngauss || self.ncell != other.ncell {
            return Err("tensor fields have different grid shapes");
        }
        Ok(())
    }

    /// Returns an error if a rank-2 field does not share this grid (and tensor dimension)
    pub fn check_same_grid_t2(&self, other: &Tensor2Field) -> Result<(), StrError> {
        let (dim, ngauss, ncell) = other.dims();
        if self.dim != dim {
            return Err("tensor fields have different dimensions");
        }
        if self.ngauss != ngauss || self.ncell != ncell {
            return Err("tensor fields have different grid shapes");
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
