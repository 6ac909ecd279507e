use super::{NeoHooke, StateVars};
use crate::tensor::{Tensor2Field, Tensor4Field};
use crate::StrError;
use serde::{Deserialize, Serialize};

/// Holds the parameters of an isochoric material model
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub enum ParamIsochoric {
    /// Nearly-incompressible neo-Hookean model with shear modulus μ
    NeoHooke { mu: f64 },
}

/// Defines the isochoric part of a hyperelastic material model
///
/// The model evaluates the first Piola-Kirchhoff stress and the material
/// tangent from the deformation gradient grid, updating its internal
/// variables in place.
pub trait IsochoricTrait: Send {
    /// Returns the number of internal variables per integration point
    fn n_statevars(&self) -> usize;

    /// Computes the isochoric first Piola-Kirchhoff stress grid
    fn gradient(&self, pp: &mut Tensor2Field, ff: &Tensor2Field, zeta: &mut StateVars) -> Result<(), StrError>;

    /// Computes the isochoric material tangent grid
    fn hessian(&self, aa: &mut Tensor4Field, ff: &Tensor2Field, zeta: &mut StateVars) -> Result<(), StrError>;
}

/// Implements an isochoric model, wrapping the actual implementation
pub struct Isochoric {
    /// Connects to the actual implementation
    pub actual: Box<dyn IsochoricTrait>,
}

impl Isochoric {
    /// Allocates a new instance from the model parameters
    pub fn new(param: &ParamIsochoric) -> Result<Self, StrError> {
        let actual: Box<dyn IsochoricTrait> = match param {
            ParamIsochoric::NeoHooke { mu } => Box::new(NeoHooke::new(*mu)?),
        };
        Ok(Isochoric { actual })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
