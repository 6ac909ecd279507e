use super::StateNearlyIncompressible;
use crate::assembly::{assemble_matrix, assemble_vector, integrate_matrix, integrate_vector, local_to_global};
use crate::constitution::{AreaChange, Isochoric, ParamIsochoric, VolumeChange};
use crate::kinematics::Field;
use crate::tensor::{dot, sym, transpose, Tensor2Field, Tensor4Field};
use crate::StrError;
use russell_lab::{vec_copy, Matrix, Vector};
use russell_sparse::CooMatrix;
use russell_tensor::{Mandel, Tensor2};

/// Implements a nearly-incompressible hyperelastic solid body
///
/// The volumetric response is treated with the mean-dilatation technique:
/// the pressure p and the mean volume ratio J̄ are constant per cell and
/// are condensed out of the three-field variational formulation. The
/// resulting displacement residual and tangent read
///
/// ```text
/// r  = ∫ (P̂ + p·dJ/dF) : ∇δu dV  +  h · (K(v/V − 1) − p)
/// K  = ∫ ∇δu : (Â + p·d²J/dF²) : ∇Δu dV  +  (K/V) h ⊗ h
/// ```
///
/// with the per-cell coupling vector h = ∫ dJ/dF : ∇δu dV, the reference
/// and deformed cell volumes V and v, and the bulk modulus K.
///
/// [SolidBodyNearlyIncompressible::extract] advances the condensed state
/// from trial displacements; [SolidBodyNearlyIncompressible::vector] and
/// [SolidBodyNearlyIncompressible::matrix] assemble the global arrays for
/// an outer Newton driver. One instance is not reentrant.
pub struct SolidBodyNearlyIncompressible<'a> {
    /// Holds the displacement field (nodal values are the current trial displacements)
    pub field: Field<'a>,

    /// Holds the isochoric material model
    model: Isochoric,

    /// Holds the bulk modulus K
    bulk: f64,

    /// Tells whether to integrate the cells in parallel
    parallel: bool,

    /// Holds the condensed state
    state: StateNearlyIncompressible,

    /// Holds the reference volume of each cell
    volume0: Vec<f64>,

    /// Holds the deformed volume of each cell (last extraction)
    volume: Vec<f64>,

    /// Holds the local-to-global map of each cell
    l2g: Vec<Vec<usize>>,

    /// Holds the deformation gradient grid (last extraction)
    ff: Tensor2Field,

    /// Holds the total first Piola-Kirchhoff stress grid (last extraction)
    stress: Tensor2Field,

    /// Holds the coupling vector h of each cell (last extraction)
    hh: Vec<Vector>,

    /// Holds the local residual vectors (workspace)
    rr_local: Vec<Vector>,

    /// Holds the local tangent matrices (workspace)
    kk_local: Vec<Matrix>,

    /// Tells whether an extraction has been performed
    extracted: bool,
}

impl<'a> SolidBodyNearlyIncompressible<'a> {
    /// Allocates a new instance
    ///
    /// # Input
    ///
    /// * `field` -- the displacement field (with its region and kinematics)
    /// * `param` -- the isochoric material model parameters
    /// * `bulk` -- the bulk modulus K of the volumetric response
    /// * `parallel` -- integrate the cells in parallel
    pub fn new(field: Field<'a>, param: &ParamIsochoric, bulk: f64, parallel: bool) -> Result<Self, StrError> {
        if bulk <= 0.0 {
            return Err("bulk modulus must be positive");
        }
        let model = Isochoric::new(param)?;
        let region = field.region;
        let (ngauss, ncell) = (region.ngauss, region.ncell);
        let mut volume0 = vec![0.0; ncell];
        for c in 0..ncell {
            for p in 0..ngauss {
                volume0[c] += field.dv().get(p, c);
            }
            if volume0[c] < 1e-14 {
                return Err("cell has near-zero reference volume");
            }
        }
        let state = StateNearlyIncompressible::new(region, model.actual.n_statevars())?;
        let l2g = (0..ncell).map(|c| local_to_global(region, c)).collect();
        let neq = region.nnode * region.ndim;
        let tdim = field.tdim();
        Ok(SolidBodyNearlyIncompressible {
            field,
            model,
            bulk,
            parallel,
            state,
            volume: volume0.clone(),
            volume0,
            l2g,
            ff: Tensor2Field::identity(tdim, ngauss, ncell)?,
            stress: Tensor2Field::new(tdim, ngauss, ncell)?,
            hh: vec![Vector::new(neq); ncell],
            rr_local: vec![Vector::new(neq); ncell],
            kk_local: vec![Matrix::new(neq, neq); ncell],
            extracted: false,
        })
    }

    /// Returns the condensed state (e.g., to checkpoint it)
    pub fn state(&self) -> &StateNearlyIncompressible {
        &self.state
    }

    /// Replaces the condensed state (e.g., to roll back to a checkpoint)
    ///
    /// Invalidates the last extraction.
    pub fn set_state(&mut self, state: StateNearlyIncompressible) -> Result<(), StrError> {
        let region = self.field.region;
        if state.uu.dim() != region.npoint * region.ndim
            || state.pp.len() != region.ncell
            || state.jj_bar.len() != region.ncell
            || state.statevars.ngauss != region.ngauss
            || state.statevars.ncell != region.ncell
            || state.statevars.nvar != self.model.actual.n_statevars()
        {
            return Err("state does not match the body");
        }
        self.state = state;
        self.extracted = false;
        Ok(())
    }

    /// Returns the reference volume of a cell
    pub fn reference_volume(&self, c: usize) -> f64 {
        self.volume0[c]
    }

    /// Returns the deformed volume of a cell (last extraction)
    pub fn deformed_volume(&self, c: usize) -> Result<f64, StrError> {
        if c >= self.field.region.ncell {
            return Err("cell index is out of range");
        }
        if !self.extracted {
            return Err("deformation has not been extracted yet");
        }
        Ok(self.volume[c])
    }

    /// Extracts the deformation from trial displacements and advances the condensed state
    ///
    /// Evaluates F, the coupling vectors h, and the deformed volumes v at the
    /// trial displacements; then updates the per-cell state with
    ///
    /// ```text
    /// ΔJ̄ = ⟨h, u − u_prev⟩/V + (v/V − J̄)
    /// Δp = K (ΔJ̄ + J̄ − 1) − p
    /// ```
    ///
    /// and commits u_prev ← u. A repeated extraction at the same displacements
    /// therefore closes the linearization: it leaves J̄ = v/V and p = K(J̄ − 1).
    pub fn extract(&mut self, uu: &Vector) -> Result<(), StrError> {
        self.field.set_values(uu)?;
        let region = self.field.region;
        let (ngauss, ncell) = (region.ngauss, region.ncell);

        // deformation gradient and dJ/dF at the trial displacements
        let ff = self.field.deformation_gradient()?;
        let djdf = AreaChange::function(&ff)?;

        // coupling vectors h
        for rc in self.hh.iter_mut() {
            rc.fill(0.0);
        }
        integrate_vector(&mut self.hh, &self.field, &djdf, self.parallel)?;

        // deformed volumes v = ∫ J dV
        let jj = VolumeChange::function(&ff)?;
        for c in 0..ncell {
            self.volume[c] = 0.0;
            for p in 0..ngauss {
                self.volume[c] += jj.get(p, c) * self.field.dv().get(p, c);
            }
        }

        // condensed update of J̄ and p
        for c in 0..ncell {
            let mut h_du = 0.0;
            for (l, g) in self.l2g[c].iter().enumerate() {
                h_du += self.hh[c][l] * (uu[*g] - self.state.uu[*g]);
            }
            let d_jbar = h_du / self.volume0[c] + (self.volume[c] / self.volume0[c] - self.state.jj_bar[c]);
            let d_p = self.bulk * (d_jbar + self.state.jj_bar[c] - 1.0) - self.state.pp[c];
            self.state.jj_bar[c] += d_jbar;
            self.state.pp[c] += d_p;
        }
        vec_copy(&mut self.state.uu, uu)?;

        // total stress P = P̂ + p·dJ/dF with the updated pressure
        self.model
            .actual
            .gradient(&mut self.stress, &ff, &mut self.state.statevars)?;
        if !self.stress.all_finite() {
            return Err("material model produced a non-finite value");
        }
        let tdim = self.field.tdim();
        for c in 0..ncell {
            for p in 0..ngauss {
                for i in 0..tdim {
                    for j in 0..tdim {
                        self.stress.add(i, j, p, c, 1.0, self.state.pp[c] * djdf.get(i, j, p, c));
                    }
                }
            }
        }
        self.ff = ff;
        self.extracted = true;
        Ok(())
    }

    /// Assembles the residual vector at trial displacements (accumulates into `rr`)
    ///
    /// Extracts the deformation first, then integrates the total stress and
    /// adds the condensed constraint residual h·(K(v/V − 1) − p) per cell.
    pub fn vector(&mut self, rr: &mut Vector, uu: &Vector) -> Result<(), StrError> {
        self.extract(uu)?;
        for rc in self.rr_local.iter_mut() {
            rc.fill(0.0);
        }
        integrate_vector(&mut self.rr_local, &self.field, &self.stress, self.parallel)?;
        let ncell = self.field.region.ncell;
        for c in 0..ncell {
            let factor = self.bulk * (self.volume[c] / self.volume0[c] - 1.0) - self.state.pp[c];
            for l in 0..self.rr_local[c].dim() {
                self.rr_local[c][l] += self.hh[c][l] * factor;
            }
            assemble_vector(rr, &self.rr_local[c], &self.l2g[c])?;
        }
        Ok(())
    }

    /// Assembles the tangent matrix of the last extraction (accumulates into `kk`)
    ///
    /// Integrates Â + p·d²J/dF² and adds the rank-one condensation term
    /// (K/V)·h⊗h per cell.
    pub fn matrix(&mut self, kk: &mut CooMatrix) -> Result<(), StrError> {
        if !self.extracted {
            return Err("deformation has not been extracted yet");
        }
        let region = self.field.region;
        let (ngauss, ncell) = (region.ngauss, region.ncell);
        let tdim = self.field.tdim();
        let mut aa = Tensor4Field::new(tdim, ngauss, ncell)?;
        self.model.actual.hessian(&mut aa, &self.ff, &mut self.state.statevars)?;
        if !aa.all_finite() {
            return Err("material model produced a non-finite value");
        }
        let d2jdf2 = AreaChange::gradient(&self.ff)?;
        for c in 0..ncell {
            for p in 0..ngauss {
                for i in 0..tdim {
                    for j in 0..tdim {
                        for k in 0..tdim {
                            for l in 0..tdim {
                                aa.add(i, j, k, l, p, c, 1.0, self.state.pp[c] * d2jdf2.get(i, j, k, l, p, c));
                            }
                        }
                    }
                }
            }
        }
        for kc in self.kk_local.iter_mut() {
            kc.fill(0.0);
        }
        integrate_matrix(&mut self.kk_local, &self.field, &aa, self.parallel)?;
        for c in 0..ncell {
            let coefficient = self.bulk / self.volume0[c];
            let kc = &mut self.kk_local[c];
            let neq = self.hh[c].dim();
            for l in 0..neq {
                for ll in 0..neq {
                    let val = kc.get(l, ll) + coefficient * self.hh[c][l] * self.hh[c][ll];
                    kc.set(l, ll, val);
                }
            }
            assemble_matrix(kk, &self.kk_local[c], &self.l2g[c])?;
        }
        Ok(())
    }

    /// Computes the Kirchhoff stress grid τ = P·Fᵀ of the last extraction
    pub fn kirchhoff_stress(&self) -> Result<Tensor2Field, StrError> {
        if !self.extracted {
            return Err("deformation has not been extracted yet");
        }
        dot(&self.stress, &transpose(&self.ff)?)
    }

    /// Computes the Cauchy stress grid σ = P·Fᵀ/J of the last extraction
    pub fn cauchy_stress(&self) -> Result<Tensor2Field, StrError> {
        let mut sigma = self.kirchhoff_stress()?;
        let jj = VolumeChange::function(&self.ff)?;
        let (tdim, ngauss, ncell) = sigma.dims();
        for c in 0..ncell {
            for p in 0..ngauss {
                let j = jj.get(p, c);
                for i in 0..tdim {
                    for jdx in 0..tdim {
                        sigma.set(i, jdx, p, c, sigma.get(i, jdx, p, c) / j);
                    }
                }
            }
        }
        Ok(sigma)
    }

    /// Returns the Cauchy stress of one integration point as a symmetric tensor
    ///
    /// Fails if `p ≥ ngauss` or `c ≥ ncell`.
    pub fn stress_at(&self, p: usize, c: usize) -> Result<Tensor2, StrError> {
        let region = self.field.region;
        if p >= region.ngauss || c >= region.ncell {
            return Err("integration point index is out of range");
        }
        let sigma = sym(&self.cauchy_stress()?)?;
        let (tdim, _, _) = sigma.dims();
        let mut tt = if tdim == 2 {
            Tensor2::new(Mandel::Symmetric2D)
        } else {
            Tensor2::new(Mandel::Symmetric)
        };
        for i in 0..tdim {
            for j in i..tdim {
                tt.sym_add(i, j, 1.0, sigma.get(i, j, p, c));
            }
        }
        Ok(tt)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
