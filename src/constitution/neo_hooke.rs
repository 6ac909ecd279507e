use super::{IsochoricTrait, StateVars};
use crate::tensor::{cdya_ik, cdya_il, ddot, det, dya, inv, transpose, Tensor2Field, Tensor4Field};
use crate::StrError;

/// Implements the isochoric part of the nearly-incompressible neo-Hookean model
///
/// The isochoric first Piola-Kirchhoff stress is
///
/// ```text
/// P̂ = μ J^(-2/3) (F − (F:F)/3 · F⁻ᵀ)
/// ```
///
/// and the associated material tangent is
///
/// ```text
/// Â = μ J^(-2/3) [ I ⊗ik I − 2/3 F ⊗ F⁻ᵀ − 2/3 F⁻ᵀ ⊗ F
///                  + 2/9 (F:F) F⁻ᵀ ⊗ F⁻ᵀ + 1/3 (F:F) F⁻ᵀ ⊗̲ F⁻ᵀ ]
/// ```
///
/// The volumetric response is handled separately by the mean-dilatation
/// condensation; this model carries no internal variables.
pub struct NeoHooke {
    /// Shear modulus μ
    mu: f64,
}

impl NeoHooke {
    /// Allocates a new instance
    pub fn new(mu: f64) -> Result<Self, StrError> {
        if mu <= 0.0 {
            return Err("shear modulus must be positive");
        }
        Ok(NeoHooke { mu })
    }
}

impl IsochoricTrait for NeoHooke {
    fn n_statevars(&self) -> usize {
        0
    }

    fn gradient(&self, pp: &mut Tensor2Field, ff: &Tensor2Field, _zeta: &mut StateVars) -> Result<(), StrError> {
        pp.check_same_grid(ff)?;
        let ift = transpose(&inv(ff)?)?;
        let jj = det(ff)?;
        let ss = ddot(ff, ff)?;
        let (dim, ngauss, ncell) = ff.dims();
        for c in 0..ncell {
            for p in 0..ngauss {
                let scale = self.mu * f64::powf(jj.get(p, c), -2.0 / 3.0);
                let s3 = ss.get(p, c) / 3.0;
                for i in 0..dim {
                    for j in 0..dim {
                        let val = scale * (ff.get(i, j, p, c) - s3 * ift.get(i, j, p, c));
                        pp.set(i, j, p, c, val);
                    }
                }
            }
        }
        Ok(())
    }

    fn hessian(&self, aa: &mut Tensor4Field, ff: &Tensor2Field, _zeta: &mut StateVars) -> Result<(), StrError> {
        aa.check_same_grid_t2(ff)?;
        let ift = transpose(&inv(ff)?)?;
        let jj = det(ff)?;
        let ss = ddot(ff, ff)?;
        let (dim, ngauss, ncell) = ff.dims();
        let eye = Tensor2Field::identity(dim, ngauss, ncell)?;
        let t1 = cdya_ik(&eye, &eye)?;
        let t2 = dya(ff, &ift)?;
        let t3 = dya(&ift, ff)?;
        let t4 = dya(&ift, &ift)?;
        let t5 = cdya_il(&ift, &ift)?;
        for c in 0..ncell {
            for p in 0..ngauss {
                let scale = self.mu * f64::powf(jj.get(p, c), -2.0 / 3.0);
                let s = ss.get(p, c);
                for i in 0..dim {
                    for j in 0..dim {
                        for k in 0..dim {
                            for l in 0..dim {
                                let val = t1.get(i, j, k, l, p, c)
                                    - 2.0 / 3.0 * t2.get(i, j, k, l, p, c)
                                    - 2.0 / 3.0 * t3.get(i, j, k, l, p, c)
                                    + 2.0 / 9.0 * s * t4.get(i, j, k, l, p, c)
                                    + 1.0 / 3.0 * s * t5.get(i, j, k, l, p, c);
                                aa.set(i, j, k, l, p, c, scale * val);
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
