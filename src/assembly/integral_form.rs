use crate::kinematics::{Field, Kinematics};
use crate::tensor::{Tensor2Field, Tensor4Field};
use crate::StrError;
use rayon::prelude::*;
use russell_lab::{Matrix, Vector};
use russell_sparse::CooMatrix;

/// Integrates a linear weak form into per-cell local vectors
///
/// ```text
/// rᶜ[a·ndim + i] += Σ_p fun_iJ(p,c) · dh_a/dX_J(p,c) · dV(p,c)
/// ```
///
/// For axisymmetric fields the hoop entry of the test gradient,
/// N_a/R at (2,2) of the radial component, is contracted as well.
///
/// The local vectors are accumulated into, not overwritten; the caller
/// zeroes them when a fresh integration is needed.
pub fn integrate_vector(
    out: &mut [Vector],
    field: &Field,
    fun: &Tensor2Field,
    parallel: bool,
) -> Result<(), StrError> {
    let region = field.region;
    if fun.dims() != (field.tdim(), region.ngauss, region.ncell) {
        return Err("integrand grid does not match the field");
    }
    if out.len() != region.ncell {
        return Err("output array must have one local vector per cell");
    }
    let neq = region.nnode * region.ndim;
    if out.iter().any(|rc| rc.dim() != neq) {
        return Err("local vector has the wrong dimension");
    }
    if parallel {
        out.par_iter_mut()
            .enumerate()
            .for_each(|(c, rc)| integrate_vector_cell(rc, field, fun, c));
    } else {
        for (c, rc) in out.iter_mut().enumerate() {
            integrate_vector_cell(rc, field, fun, c);
        }
    }
    Ok(())
}

/// Integrates a bilinear weak form into per-cell local matrices
///
/// ```text
/// kᶜ[a·ndim + i][b·ndim + k] += Σ_p dh_a/dX_J · fun_iJkL(p,c) · dh_b/dX_L · dV(p,c)
/// ```
///
/// For axisymmetric fields the hoop entries couple on both the test and the
/// trial side. Accumulates like [integrate_vector].
pub fn integrate_matrix(
    out: &mut [Matrix],
    field: &Field,
    fun: &Tensor4Field,
    parallel: bool,
) -> Result<(), StrError> {
    let region = field.region;
    if fun.dims() != (field.tdim(), region.ngauss, region.ncell) {
        return Err("integrand grid does not match the field");
    }
    if out.len() != region.ncell {
        return Err("output array must have one local matrix per cell");
    }
    let neq = region.nnode * region.ndim;
    if out.iter().any(|kc| kc.dims() != (neq, neq)) {
        return Err("local matrix has the wrong dimensions");
    }
    if parallel {
        out.par_iter_mut()
            .enumerate()
            .for_each(|(c, kc)| integrate_matrix_cell(kc, field, fun, c));
    } else {
        for (c, kc) in out.iter_mut().enumerate() {
            integrate_matrix_cell(kc, field, fun, c);
        }
    }
    Ok(())
}

/// Integrates the linear form over one cell
fn integrate_vector_cell(rc: &mut Vector, field: &Field, fun: &Tensor2Field, c: usize) {
    let region = field.region;
    let (ndim, nnode) = (region.ndim, region.nnode);
    let axisymmetric = field.kinematics == Kinematics::Axisymmetric;
    for p in 0..region.ngauss {
        let dhdx = region.dhdx(p, c);
        let wd = field.dv().get(p, c);
        for a in 0..nnode {
            for i in 0..ndim {
                let mut sum = 0.0;
                for jj in 0..ndim {
                    sum += fun.get(i, jj, p, c) * dhdx.get(a, jj);
                }
                rc[a * ndim + i] += sum * wd;
            }
            if axisymmetric {
                let hoop = region.interp(p)[a] / region.radius(p, c);
                rc[a * ndim] += fun.get(2, 2, p, c) * hoop * wd;
            }
        }
    }
}

/// Integrates the bilinear form over one cell
fn integrate_matrix_cell(kc: &mut Matrix, field: &Field, fun: &Tensor4Field, c: usize) {
    let region = field.region;
    let (ndim, nnode) = (region.ndim, region.nnode);
    let axisymmetric = field.kinematics == Kinematics::Axisymmetric;
    for p in 0..region.ngauss {
        let dhdx = region.dhdx(p, c);
        let wd = field.dv().get(p, c);
        let (nn, r) = (region.interp(p), region.radius(p, c));
        for a in 0..nnode {
            for i in 0..ndim {
                for b in 0..nnode {
                    for k in 0..ndim {
                        let mut sum = 0.0;
                        for jj in 0..ndim {
                            for ll in 0..ndim {
                                sum += dhdx.get(a, jj) * fun.get(i, jj, k, ll, p, c) * dhdx.get(b, ll);
                            }
                        }
                        if axisymmetric {
                            let hoop_a = nn[a] / r;
                            let hoop_b = nn[b] / r;
                            if i == 0 {
                                for ll in 0..ndim {
                                    sum += hoop_a * fun.get(2, 2, k, ll, p, c) * dhdx.get(b, ll);
                                }
                            }
                            if k == 0 {
                                for jj in 0..ndim {
                                    sum += dhdx.get(a, jj) * fun.get(i, jj, 2, 2, p, c) * hoop_b;
                                }
                            }
                            if i == 0 && k == 0 {
                                sum += hoop_a * fun.get(2, 2, 2, 2, p, c) * hoop_b;
                            }
                        }
                        let (row, col) = (a * ndim + i, b * ndim + k);
                        kc.set(row, col, kc.get(row, col) + sum * wd);
                    }
                }
            }
        }
    }
}

/// Scatter-adds a local vector into the global vector
pub fn assemble_vector(rr: &mut Vector, r_local: &Vector, local_to_global: &[usize]) -> Result<(), StrError> {
    if r_local.dim() != local_to_global.len() {
        return Err("local vector and local-to-global map are incompatible");
    }
    for l in 0..r_local.dim() {
        let g = local_to_global[l];
        if g >= rr.dim() {
            return Err("local-to-global map exceeds the global vector dimension");
        }
        rr[g] += r_local[l];
    }
    Ok(())
}

/// Scatter-adds a local matrix into the global sparse matrix
pub fn assemble_matrix(kk: &mut CooMatrix, k_local: &Matrix, local_to_global: &[usize]) -> Result<(), StrError> {
    let (nrow, ncol) = k_local.dims();
    if nrow != ncol || nrow != local_to_global.len() {
        return Err("local matrix and local-to-global map are incompatible");
    }
    for l in 0..nrow {
        let g = local_to_global[l];
        for ll in 0..ncol {
            let gg = local_to_global[ll];
            kk.put(g, gg, k_local.get(l, ll))?;
        }
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{assemble_matrix, assemble_vector, integrate_matrix, integrate_vector};
    use crate::assembly::{local_to_global, n_equation};
    use crate::kinematics::{Field, Kinematics, Region};
    use crate::tensor::{ddot42, Tensor2Field, Tensor4Field};
    use gemlab::mesh::Samples;
    use russell_lab::{approx_eq, Matrix, Vector};
    use russell_sparse::{CooMatrix, Sym};

    /// A constant, anisotropic rank-4 grid to exercise all index slots
    fn sample_integrand_t4(dim: usize, ngauss: usize, ncell: usize) -> Tensor4Field {
        let mut aa = Tensor4Field::new(dim, ngauss, ncell).unwrap();
        for c in 0..ncell {
            for p in 0..ngauss {
                for i in 0..dim {
                    for j in 0..dim {
                        for k in 0..dim {
                            for l in 0..dim {
                                let val = 1.0
                                    + (i as f64) * 0.3
                                    + (j as f64) * 0.7
                                    + (k as f64) * 0.11
                                    + (l as f64) * 1.3;
                                aa.set(i, j, k, l, p, c, val);
                            }
                        }
                    }
                }
            }
        }
        aa
    }

    #[test]
    fn integrate_vector_captures_wrong_input() {
        let mesh = Samples::one_qua4();
        let region = Region::new(&mesh).unwrap();
        let field = Field::new(&region, Kinematics::Planar).unwrap();
        let fun = Tensor2Field::new(3, region.ngauss, region.ncell).unwrap();
        let mut out = vec![Vector::new(8); 1];
        assert_eq!(
            integrate_vector(&mut out, &field, &fun, false).err(),
            Some("integrand grid does not match the field")
        );
        let fun = Tensor2Field::new(2, region.ngauss, region.ncell).unwrap();
        let mut out = vec![Vector::new(8); 2];
        assert_eq!(
            integrate_vector(&mut out, &field, &fun, false).err(),
            Some("output array must have one local vector per cell")
        );
        let mut out = vec![Vector::new(7); 1];
        assert_eq!(
            integrate_vector(&mut out, &field, &fun, false).err(),
            Some("local vector has the wrong dimension")
        );
    }

    #[test]
    fn constant_integrand_is_self_equilibrated() {
        // the gradients of the shape functions add up to zero, hence the
        // nodal forces of a constant stress must balance per component
        let mesh = Samples::one_hex8();
        let region = Region::new(&mesh).unwrap();
        let field = Field::new(&region, Kinematics::Planar).unwrap();
        let mut fun = Tensor2Field::new(3, region.ngauss, region.ncell).unwrap();
        for c in 0..region.ncell {
            for p in 0..region.ngauss {
                for i in 0..3 {
                    for j in 0..3 {
                        fun.set(i, j, p, c, 1.0 + (i as f64) + 2.0 * (j as f64));
                    }
                }
            }
        }
        let mut out = vec![Vector::new(24); 1];
        integrate_vector(&mut out, &field, &fun, false).unwrap();
        for i in 0..3 {
            let total: f64 = (0..region.nnode).map(|a| out[0][a * 3 + i]).sum();
            approx_eq(total, 0.0, 1e-13);
        }
    }

    #[test]
    fn matrix_and_vector_forms_are_consistent() {
        // with fun2 = ddot42(fun4, grad(u)), the integrated vector must equal
        // the integrated matrix times the local displacement values
        for kinematics in [Kinematics::Planar, Kinematics::PlaneStrain, Kinematics::Axisymmetric] {
            let mesh = Samples::one_qua4();
            let region = Region::new(&mesh).unwrap();
            let mut field = Field::new(&region, kinematics).unwrap();
            for point in &mesh.points {
                field.values[point.id * 2] = 0.03 * point.coords[0] + 0.01 * point.coords[1];
                field.values[point.id * 2 + 1] = -0.02 * point.coords[0] + 0.04 * point.coords[1];
            }
            let tdim = field.tdim();
            let fun4 = sample_integrand_t4(tdim, region.ngauss, region.ncell);
            let fun2 = ddot42(&fun4, &field.grad(false).unwrap()).unwrap();

            let mut rr = vec![Vector::new(8); 1];
            let mut kk = vec![Matrix::new(8, 8); 1];
            integrate_vector(&mut rr, &field, &fun2, false).unwrap();
            integrate_matrix(&mut kk, &field, &fun4, false).unwrap();

            let l2g = local_to_global(&region, 0);
            for row in 0..8 {
                let mut sum = 0.0;
                for col in 0..8 {
                    sum += kk[0].get(row, col) * field.values[l2g[col]];
                }
                approx_eq(rr[0][row], sum, 1e-12);
            }
        }
    }

    #[test]
    fn parallel_and_sequential_integration_agree() {
        let mesh = Samples::two_qua4();
        let region = Region::new(&mesh).unwrap();
        let mut field = Field::new(&region, Kinematics::PlaneStrain).unwrap();
        for point in &mesh.points {
            field.values[point.id * 2] = 0.1 * point.coords[0] * point.coords[1];
            field.values[point.id * 2 + 1] = 0.05 * point.coords[0];
        }
        let fun4 = sample_integrand_t4(3, region.ngauss, region.ncell);
        let fun2 = ddot42(&fun4, &field.deformation_gradient().unwrap()).unwrap();

        let mut r_seq = vec![Vector::new(8); region.ncell];
        let mut r_par = vec![Vector::new(8); region.ncell];
        integrate_vector(&mut r_seq, &field, &fun2, false).unwrap();
        integrate_vector(&mut r_par, &field, &fun2, true).unwrap();
        for c in 0..region.ncell {
            for l in 0..8 {
                assert_eq!(r_seq[c][l], r_par[c][l]);
            }
        }

        let mut k_seq = vec![Matrix::new(8, 8); region.ncell];
        let mut k_par = vec![Matrix::new(8, 8); region.ncell];
        integrate_matrix(&mut k_seq, &field, &fun4, false).unwrap();
        integrate_matrix(&mut k_par, &field, &fun4, true).unwrap();
        for c in 0..region.ncell {
            for row in 0..8 {
                for col in 0..8 {
                    assert_eq!(k_seq[c].get(row, col), k_par[c].get(row, col));
                }
            }
        }
    }

    #[test]
    fn assemble_vector_works_and_captures_errors() {
        let mut rr = Vector::new(4);
        let r_local = Vector::from(&[1.0, 2.0, 3.0]);
        assert_eq!(
            assemble_vector(&mut rr, &r_local, &[0, 1]).err(),
            Some("local vector and local-to-global map are incompatible")
        );
        assert_eq!(
            assemble_vector(&mut rr, &r_local, &[0, 1, 7]).err(),
            Some("local-to-global map exceeds the global vector dimension")
        );
        assemble_vector(&mut rr, &r_local, &[3, 1, 0]).unwrap();
        assemble_vector(&mut rr, &r_local, &[0, 1, 2]).unwrap();
        assert_eq!(rr.as_data(), &[4.0, 4.0, 3.0, 1.0]);
    }

    #[test]
    fn assembly_is_additive_over_shared_points() {
        // two cells sharing an edge: the shared equations receive the
        // contributions of both cells
        let mesh = Samples::two_qua4();
        let region = Region::new(&mesh).unwrap();
        let neq = n_equation(&region);

        let mut k_local = Matrix::new(8, 8);
        for row in 0..8 {
            for col in 0..8 {
                k_local.set(row, col, 1.0);
            }
        }
        let nnz_max = 2 * 8 * 8;
        let mut kk = CooMatrix::new(neq, neq, nnz_max, Sym::No).unwrap();
        for c in 0..region.ncell {
            let l2g = local_to_global(&region, c);
            assemble_matrix(&mut kk, &k_local, &l2g).unwrap();
        }
        let dense = kk.as_dense();
        let shared: Vec<_> = mesh.cells[0]
            .points
            .iter()
            .filter(|p| mesh.cells[1].points.contains(p))
            .collect();
        assert_eq!(shared.len(), 2);
        for point_id in &shared {
            let g = 2 * **point_id;
            assert_eq!(dense.get(g, g), 2.0);
        }
        // a point of cell 0 away from the shared edge keeps a single contribution
        let lone = mesh.cells[0].points.iter().find(|p| !shared.contains(p)).unwrap();
        assert_eq!(dense.get(2 * lone, 2 * lone), 1.0);
    }
}
