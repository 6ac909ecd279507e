use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds one second-order tensor per (integration point, cell) of a grid
///
/// The tensor dimension must be 2 or 3. The data is stored cell-major so that
/// the components of all integration points of one cell are contiguous; the
/// component layout within one grid entry is row-major, i.e.,
///
/// ```text
/// value(i,j,p,c) = data[((c·ngauss + p)·dim + i)·dim + j]
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tensor2Field {
    /// Tensor dimension (2 or 3)
    dim: usize,

    /// Number of integration points per cell
    ngauss: usize,

    /// Number of cells
    ncell: usize,

    /// Components (dim² · ngauss · ncell)
    data: Vec<f64>,
}

impl Tensor2Field {
    /// Allocates a new zeroed instance
    pub fn new(dim: usize, ngauss: usize, ncell: usize) -> Result<Self, StrError> {
        if dim != 2 && dim != 3 {
            return Err("tensor dimension must be 2 or 3");
        }
        if ngauss < 1 || ncell < 1 {
            return Err("grid must have at least one integration point and one cell");
        }
        Ok(Tensor2Field {
            dim,
            ngauss,
            ncell,
            data: vec![0.0; dim * dim * ngauss * ncell],
        })
    }

    /// Allocates a field holding the identity tensor at every grid entry
    pub fn identity(dim: usize, ngauss: usize, ncell: usize) -> Result<Self, StrError> {
        let mut field = Tensor2Field::new(dim, ngauss, ncell)?;
        for c in 0..ncell {
            for p in 0..ngauss {
                for i in 0..dim {
                    field.set(i, i, p, c, 1.0);
                }
            }
        }
        Ok(field)
    }

    /// Returns the (dim, ngauss, ncell) dimensions
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.dim, self.ngauss, self.ncell)
    }

    /// Returns the (i,j) component at the integration point p of cell c
    #[inline]
    pub fn get(&self, i: usize, j: usize, p: usize, c: usize) -> f64 {
        self.data[((c * self.ngauss + p) * self.dim + i) * self.dim + j]
    }

    /// Sets the (i,j) component at the integration point p of cell c
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, p: usize, c: usize, value: f64) {
        self.data[((c * self.ngauss + p) * self.dim + i) * self.dim + j] = value;
    }

    /// Adds alpha times a value to the (i,j) component at (p,c)
    #[inline]
    pub fn add(&mut self, i: usize, j: usize, p: usize, c: usize, alpha: f64, value: f64) {
        self.data[((c * self.ngauss + p) * self.dim + i) * self.dim + j] += alpha * value;
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
    pub fn check_same_grid(&self, other: &Tensor2Field) -> Result<(), StrError> {
        if self.dim != other.dim {
            return Err("tensor fields have different dimensions");
        }
        if self.ngauss != other.ngauss || self.ncell != other.ncell {
            return Err("tensor fields have different grid shapes");
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
