//! hypsim - Finite element assembly core for nearly-incompressible hyperelastic solids
//!
//! This crate implements the assembly side of a total-Lagrangian finite element
//! formulation for nearly-incompressible hyperelastic solids. It evaluates
//! constitutive stress/stiffness tensors at the integration (Gauss) points,
//! integrates them against shape-function gradients to obtain element-local
//! residual vectors and tangent matrices, and scatters the results into global
//! sparse structures. Pressure and mean volume ratio are treated with the
//! mean-dilatation technique: they are condensed out of the three-field
//! (displacement, pressure, volume ratio) system, leaving a rank-one correction
//! to the displacement-only tangent matrix.
//!
//! The mesh, shape functions, and quadrature rules come from
//! [gemlab](https://github.com/cpmech/gemlab); dense and sparse linear algebra
//! come from the [russell](https://github.com/cpmech/russell) crates. The outer
//! Newton-Raphson/load-stepping driver and the linear solver are external to
//! this crate: the interface is `extract`/`vector`/`matrix` plus stress
//! post-processing on [mechanics::SolidBodyNearlyIncompressible].

/// Defines the error output as a static string
pub type StrError = &'static str;

pub mod assembly;
pub mod constitution;
pub mod kinematics;
pub mod mechanics;
pub mod tensor;
