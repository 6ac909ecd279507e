//! Implements elementwise tensor algebra on grids of second and fourth-order tensors
//!
//! A "field" stores one small tensor (dimension 2 or 3) per integration point
//! of every cell; all operations broadcast over the (ngauss, ncell) grid.
//! Scalar-valued results are returned as a [russell_lab::Matrix] with dims
//! (ngauss, ncell).

mod operations;
mod tensor2_field;
mod tensor4_field;
pub use crate::tensor::operations::*;
pub use crate::tensor::tensor2_field::*;
pub use crate::tensor::tensor4_field::*;
