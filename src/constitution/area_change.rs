use crate::tensor::{cdya_il, cof, det, dya, inv, transpose, Tensor2Field, Tensor4Field};
use crate::StrError;

/// Implements the area-change map (derivatives of J = det(F))
///
/// The first derivative is the cofactor,
///
/// ```text
/// dJ/dF = J·F⁻ᵀ = cof(F)
/// ```
///
/// and the second derivative is
///
/// ```text
/// d²J/dF² = J (F⁻ᵀ ⊗ F⁻ᵀ − F⁻ᵀ ⊗̲ F⁻ᵀ)
/// ```
///
/// Both are valid for tensor dimension 2 and 3.
pub struct AreaChange {}

impl AreaChange {
    /// Computes dJ/dF = cof(F) over the grid
    ///
    /// The cofactor form is used directly, so this map stays well-defined
    /// for singular entries.
    pub fn function(ff: &Tensor2Field) -> Result<Tensor2Field, StrError> {
        cof(ff)
    }

    /// Computes d²J/dF² over the grid
    pub fn gradient(ff: &Tensor2Field) -> Result<Tensor4Field, StrError> {
        let ift = transpose(&inv(ff)?)?;
        let jj = det(ff)?;
        let mut aa = dya(&ift, &ift)?;
        let bb = cdya_il(&ift, &ift)?;
        let (dim, ngauss, ncell) = ff.dims();
        for c in 0..ncell {
            for p in 0..ngauss {
                let j = jj.get(p, c);
                for i in 0..dim {
                    for jdx in 0..dim {
                        for k in 0..dim {
                            for l in 0..dim {
                                let val = j * (aa.get(i, jdx, k, l, p, c) - bb.get(i, jdx, k, l, p, c));
                                aa.set(i, jdx, k, l, p, c, val);
                            }
                        }
                    }
                }
            }
        }
        Ok(aa)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
