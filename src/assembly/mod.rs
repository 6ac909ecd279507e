//! Implements the weak-form integration and global assembly
//!
//! Linear and bilinear forms contract gradient/tensor grids with the shape
//! function gradients into per-cell local arrays; the assembly functions
//! scatter-add local arrays into the global vector and sparse matrix.

mod equations;
mod integral_form;
pub use crate::assembly::equations::*;
pub use crate::assembly::integral_form::*;
