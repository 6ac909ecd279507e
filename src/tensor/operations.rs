use super::{Tensor2Field, Tensor4Field};
use crate::StrError;
use russell_lab::Matrix;

/// Minimum absolute determinant to compute the inverse of a grid entry
pub const MIN_DET: f64 = 1e-13;

/// Performs the single contraction of two rank-2 fields (matrix product per grid entry)
///
/// ```text
/// c_ij = a_ik b_kj
/// ```
pub fn dot(a: &Tensor2Field, b: &Tensor2Field) -> Result<Tensor2Field, StrError> {
    a.check_same_grid(b)?;
    let (dim, ngauss, ncell) = a.dims();
    let mut cc = Tensor2Field::new(dim, ngauss, ncell)?;
    for c in 0..ncell {
        for p in 0..ngauss {
            for i in 0..dim {
                for j in 0..dim {
                    let mut sum = 0.0;
                    for k in 0..dim {
                        sum += a.get(i, k, p, c) * b.get(k, j, p, c);
                    }
                    cc.set(i, j, p, c, sum);
                }
            }
        }
    }
    Ok(cc)
}

/// Performs the double contraction of two rank-2 fields, yielding a scalar grid
///
/// ```text
/// s = a_ij b_ij
/// ```
pub fn ddot(a: &Tensor2Field, b: &Tensor2Field) -> Result<Matrix, StrError> {
    a.check_same_grid(b)?;
    let (dim, ngauss, ncell) = a.dims();
    let mut ss = Matrix::new(ngauss, ncell);
    for c in 0..ncell {
        for p in 0..ngauss {
            let mut sum = 0.0;
            for i in 0..dim {
                for j in 0..dim {
                    sum += a.get(i, j, p, c) * b.get(i, j, p, c);
                }
            }
            ss.set(p, c, sum);
        }
    }
    Ok(ss)
}

/// Performs the double contraction of a rank-4 field with a rank-2 field
///
/// ```text
/// c_ij = a_ijkl b_kl
/// ```
pub fn ddot42(a: &Tensor4Field, b: &Tensor2Field) -> Result<Tensor2Field, StrError> {
    a.check_same_grid_t2(b)?;
    let (dim, ngauss, ncell) = a.dims();
    let mut cc = Tensor2Field::new(dim, ngauss, ncell)?;
    for c in 0..ncell {
        for p in 0..ngauss {
            for i in 0..dim {
                for j in 0..dim {
                    let mut sum = 0.0;
                    for k in 0..dim {
                        for l in 0..dim {
                            sum += a.get(i, j, k, l, p, c) * b.get(k, l, p, c);
                        }
                    }
                    cc.set(i, j, p, c, sum);
                }
            }
        }
    }
    Ok(cc)
}

/// Performs the double contraction of two rank-4 fields, yielding a rank-4 field
///
/// ```text
/// c_ijmn = a_ijkl b_klmn
/// ```
pub fn ddot44(a: &Tensor4Field, b: &Tensor4Field) -> Result<Tensor4Field, StrError> {
    a.check_same_grid(b)?;
    let (dim, ngauss, ncell) = a.dims();
    let mut cc = Tensor4Field::new(dim, ngauss, ncell)?;
    for c in 0..ncell {
        for p in 0..ngauss {
            for i in 0..dim {
                for j in 0..dim {
                    for m in 0..dim {
                        for n in 0..dim {
                            let mut sum = 0.0;
                            for k in 0..dim {
                                for l in 0..dim {
                                    sum += a.get(i, j, k, l, p, c) * b.get(k, l, m, n, p, c);
                                }
                            }
                            cc.set(i, j, m, n, p, c, sum);
                        }
                    }
                }
            }
        }
    }
    Ok(cc)
}

/// Performs the dyadic product of two rank-2 fields
///
/// ```text
/// c_ijkl = a_ij b_kl
/// ```
pub fn dya(a: &Tensor2Field, b: &Tensor2Field) -> Result<Tensor4Field, StrError> {
    a.check_same_grid(b)?;
    let (dim, ngauss, ncell) = a.dims();
    let mut cc = Tensor4Field::new(dim, ngauss, ncell)?;
    for c in 0..ncell {
        for p in 0..ngauss {
            for i in 0..dim {
                for j in 0..dim {
                    for k in 0..dim {
                        for l in 0..dim {
                            cc.set(i, j, k, l, p, c, a.get(i, j, p, c) * b.get(k, l, p, c));
                        }
                    }
                }
            }
        }
    }
    Ok(cc)
}

/// Performs the crossed dyadic product with (ik)(jl) index pairing
///
/// ```text
/// c_ijkl = a_ik b_jl
/// ```
pub fn cdya_ik(a: &Tensor2Field, b: &Tensor2Field) -> Result<Tensor4Field, StrError> {
    a.check_same_grid(b)?;
    let (dim, ngauss, ncell) = a.dims();
    let mut cc = Tensor4Field::new(dim, ngauss, ncell)?;
    for c in 0..ncell {
        for p in 0..ngauss {
            for i in 0..dim {
                for j in 0..dim {
                    for k in 0..dim {
                        for l in 0..dim {
                            cc.set(i, j, k, l, p, c, a.get(i, k, p, c) * b.get(j, l, p, c));
                        }
                    }
                }
            }
        }
    }
    Ok(cc)
}

/// Performs the crossed dyadic product with (il)(kj) index pairing
///
/// ```text
/// c_ijkl = a_il b_kj
/// ```
pub fn cdya_il(a: &Tensor2Field, b: &Tensor2Field) -> Result<Tensor4Field, StrError> {
    a.check_same_grid(b)?;
    let (dim, ngauss, ncell) = a.dims();
    let mut cc = Tensor4Field::new(dim, ngauss, ncell)?;
    for c in 0..ncell {
        for p in 0..ngauss {
            for i in 0..dim {
                for j in 0..dim {
                    for k in 0..dim {
                        for l in 0..dim {
                            cc.set(i, j, k, l, p, c, a.get(i, l, p, c) * b.get(k, j, p, c));
                        }
                    }
                }
            }
        }
    }
    Ok(cc)
}

/// Performs the symmetric crossed dyadic product
///
/// ```text
/// c_ijkl = (a_ik b_jl + a_il b_kj) / 2
/// ```
pub fn cdya(a: &Tensor2Field, b: &Tensor2Field) -> Result<Tensor4Field, StrError> {
    a.check_same_grid(b)?;
    let (dim, ngauss, ncell) = a.dims();
    let mut cc = Tensor4Field::new(dim, ngauss, ncell)?;
    for c in 0..ncell {
        for p in 0..ngauss {
            for i in 0..dim {
                for j in 0..dim {
                    for k in 0..dim {
                        for l in 0..dim {
                            let ik_jl = a.get(i, k, p, c) * b.get(j, l, p, c);
                            let il_kj = a.get(i, l, p, c) * b.get(k, j, p, c);
                            cc.set(i, j, k, l, p, c, 0.5 * (ik_jl + il_kj));
                        }
                    }
                }
            }
        }
    }
    Ok(cc)
}

/// Transposes every grid entry of a rank-2 field
pub fn transpose(a: &Tensor2Field) -> Result<Tensor2Field, StrError> {
    let (dim, ngauss, ncell) = a.dims();
    let mut cc = Tensor2Field::new(dim, ngauss, ncell)?;
    for c in 0..ncell {
        for p in 0..ngauss {
            for i in 0..dim {
                for j in 0..dim {
                    cc.set(i, j, p, c, a.get(j, i, p, c));
                }
            }
        }
    }
    Ok(cc)
}

/// Swaps the two index pairs of every grid entry of a rank-4 field
///
/// ```text
/// c_ijkl = a_klij
/// ```
pub fn majortranspose(a: &Tensor4Field) -> Result<Tensor4Field, StrError> {
    let (dim, ngauss, ncell) = a.dims();
    let mut cc = Tensor4Field::new(dim, ngauss, ncell)?;
    for c in 0..ncell {
        for p in 0..ngauss {
            for i in 0..dim {
                for j in 0..dim {
                    for k in 0..dim {
                        for l in 0..dim {
                            cc.set(i, j, k, l, p, c, a.get(k, l, i, j, p, c));
                        }
                    }
                }
            }
        }
    }
    Ok(cc)
}

/// Computes the determinant of every grid entry (closed-form 2×2/3×3)
pub fn det(a: &Tensor2Field) -> Result<Matrix, StrError> {
    let (dim, ngauss, ncell) = a.dims();
    let mut dd = Matrix::new(ngauss, ncell);
    for c in 0..ncell {
        for p in 0..ngauss {
            dd.set(p, c, det_entry(a, dim, p, c));
        }
    }
    Ok(dd)
}

/// Computes the cofactor tensor of every grid entry (closed-form 2×2/3×3)
///
/// The cofactor is the derivative of the determinant, `cof(A) = det(A)·A⁻ᵀ`,
/// and remains well-defined for singular entries.
pub fn cof(a: &Tensor2Field) -> Result<Tensor2Field, StrError> {
    let (dim, ngauss, ncell) = a.dims();
    let mut cc = Tensor2Field::new(dim, ngauss, ncell)?;
    for c in 0..ncell {
        for p in 0..ngauss {
            cof_entry(&mut cc, a, dim, p, c);
        }
    }
    Ok(cc)
}

/// Computes the inverse of every grid entry (closed-form 2×2/3×3)
///
/// Returns a recoverable error if the determinant of any entry is below
/// [MIN_DET] in absolute value (e.g., a non-invertible deformation gradient).
pub fn inv(a: &Tensor2Field) -> Result<Tensor2Field, StrError> {
    let (dim, ngauss, ncell) = a.dims();
    let mut cc = Tensor2Field::new(dim, ngauss, ncell)?;
    for c in 0..ncell {
        for p in 0..ngauss {
            let d = det_entry(a, dim, p, c);
            if f64::abs(d) < MIN_DET {
                return Err("non-invertible tensor found in field");
            }
            cof_entry(&mut cc, a, dim, p, c);
            // invert via the adjugate: A⁻¹ = cof(A)ᵀ / det(A)
            for i in 0..dim {
                let aii = cc.get(i, i, p, c);
                cc.set(i, i, p, c, aii / d);
                for j in (i + 1)..dim {
                    let aij = cc.get(i, j, p, c);
                    let aji = cc.get(j, i, p, c);
                    cc.set(i, j, p, c, aji / d);
                    cc.set(j, i, p, c, aij / d);
                }
            }
        }
    }
    Ok(cc)
}

/// Computes the trace of every grid entry, yielding a scalar grid
pub fn trace(a: &Tensor2Field) -> Result<Matrix, StrError> {
    let (dim, ngauss, ncell) = a.dims();
    let mut tt = Matrix::new(ngauss, ncell);
    for c in 0..ncell {
        for p in 0..ngauss {
            let mut sum = 0.0;
            for i in 0..dim {
                sum += a.get(i, i, p, c);
            }
            tt.set(p, c, sum);
        }
    }
    Ok(tt)
}

/// Computes the deviatoric part of every grid entry
///
/// ```text
/// dev(a) = a - trace(a)/dim · I
/// ```
pub fn dev(a: &Tensor2Field) -> Result<Tensor2Field, StrError> {
    let (dim, ngauss, ncell) = a.dims();
    let mut cc = a.clone();
    for c in 0..ncell {
        for p in 0..ngauss {
            let mut tr = 0.0;
            for i in 0..dim {
                tr += a.get(i, i, p, c);
            }
            let mean = tr / (dim as f64);
            for i in 0..dim {
                cc.add(i, i, p, c, -1.0, mean);
            }
        }
    }
    Ok(cc)
}

/// Computes the symmetric part of every grid entry
pub fn sym(a: &Tensor2Field) -> Result<Tensor2Field, StrError> {
    let (dim, ngauss, ncell) = a.dims();
    let mut cc = Tensor2Field::new(dim, ngauss, ncell)?;
    for c in 0..ncell {
        for p in 0..ngauss {
            for i in 0..dim {
                for j in 0..dim {
                    cc.set(i, j, p, c, 0.5 * (a.get(i, j, p, c) + a.get(j, i, p, c)));
                }
            }
        }
    }
    Ok(cc)
}

/// Returns the identity tensor broadcast to the grid of a given field
pub fn identity(a: &Tensor2Field) -> Result<Tensor2Field, StrError> {
    let (dim, ngauss, ncell) = a.dims();
    Tensor2Field::identity(dim, ngauss, ncell)
}

/// Computes the determinant of one grid entry
fn det_entry(a: &Tensor2Field, dim: usize, p: usize, c: usize) -> f64 {
    if dim == 2 {
        a.get(0, 0, p, c) * a.get(1, 1, p, c) - a.get(0, 1, p, c) * a.get(1, 0, p, c)
    } else {
        a.get(0, 0, p, c) * (a.get(1, 1, p, c) * a.get(2, 2, p, c) - a.get(1, 2, p, c) * a.get(2, 1, p, c))
            - a.get(0, 1, p, c) * (a.get(1, 0, p, c) * a.get(2, 2, p, c) - a.get(1, 2, p, c) * a.get(2, 0, p, c))
            + a.get(0, 2, p, c) * (a.get(1, 0, p, c) * a.get(2, 1, p, c) - a.get(1, 1, p, c) * a.get(2, 0, p, c))
    }
}

/// Computes the cofactor tensor of one grid entry
fn cof_entry(cc: &mut Tensor2Field, a: &Tensor2Field, dim: usize, p: usize, c: usize) {
    if dim == 2 {
        cc.set(0, 0, p, c, a.get(1, 1, p, c));
        cc.set(0, 1, p, c, -a.get(1, 0, p, c));
        cc.set(1, 0, p, c, -a.get(0, 1, p, c));
        cc.set(1, 1, p, c, a.get(0, 0, p, c));
    } else {
        let (a00, a01, a02) = (a.get(0, 0, p, c), a.get(0, 1, p, c), a.get(0, 2, p, c));
        let (a10, a11, a12) = (a.get(1, 0, p, c), a.get(1, 1, p, c), a.get(1, 2, p, c));
        let (a20, a21, a22) = (a.get(2, 0, p, c), a.get(2, 1, p, c), a.get(2, 2, p, c));
        cc.set(0, 0, p, c, a11 * a22 - a12 * a21);
        cc.set(0, 1, p, c, a12 * a20 - a10 * a22);
        cc.set(0, 2, p, c, a10 * a21 - a11 * a20);
        cc.set(1, 0, p, c, a02 * a21 - a01 * a22);
        cc.set(1, 1, p, c, a00 * a22 - a02 * a20);
        cc.set(1, 2, p, c, a01 * a20 - a00 * a21);
        cc.set(2, 0, p, c, a01 * a12 - a02 * a11);
        cc.set(2, 1, p, c, a02 * a10 - a00 * a12);
        cc.set(2, 2, p, c, a00 * a11 - a01 * a10);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
