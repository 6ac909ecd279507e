use super::Region;
use crate::tensor::Tensor2Field;
use crate::StrError;
use russell_lab::math::PI;
use russell_lab::{vec_copy, Matrix, Vector};

/// Specifies how a field on a two-dimensional mesh maps to tensor space
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kinematics {
    /// Direct gradient; tensor dimension equals the space dimension
    Planar,

    /// 2D mesh with gradients padded to 3×3 and zero out-of-plane entry
    PlaneStrain,

    /// 2D mesh with the first coordinate as radius; the out-of-plane
    /// (hoop) gradient entry is uᵣ/R and the volume weight is 2π·R·dA
    Axisymmetric,
}

/// Holds nodal values attached to a region and extracts gradient grids
///
/// The values are stored point-major with the component varying fastest,
/// i.e., the degree-of-freedom of component `i` at point `m` is
/// `m·ndim + i`.
pub struct Field<'a> {
    /// Holds the region with the precomputed integration data
    pub region: &'a Region,

    /// Holds the kinematics variant
    pub kinematics: Kinematics,

    /// Holds the nodal values (npoint · ndim)
    pub values: Vector,

    /// Holds the volume weights, including the 2π·R factor if axisymmetric (ngauss × ncell)
    dv: Matrix,
}

impl<'a> Field<'a> {
    /// Allocates a new instance with zeroed values
    pub fn new(region: &'a Region, kinematics: Kinematics) -> Result<Self, StrError> {
        match kinematics {
            Kinematics::Planar => (),
            Kinematics::PlaneStrain | Kinematics::Axisymmetric => {
                if region.ndim != 2 {
                    return Err("plane-strain and axisymmetric fields require a 2D mesh");
                }
            }
        }
        let dv = match kinematics {
            Kinematics::Axisymmetric => {
                let mut dv = Matrix::new(region.ngauss, region.ncell);
                for c in 0..region.ncell {
                    for p in 0..region.ngauss {
                        dv.set(p, c, 2.0 * PI * region.radius(p, c) * region.dv().get(p, c));
                    }
                }
                dv
            }
            _ => region.dv().clone(),
        };
        Ok(Field {
            region,
            kinematics,
            values: Vector::new(region.npoint * region.ndim),
            dv,
        })
    }

    /// Returns the tensor dimension of the gradient grids
    #[inline]
    pub fn tdim(&self) -> usize {
        match self.kinematics {
            Kinematics::Planar => self.region.ndim,
            Kinematics::PlaneStrain | Kinematics::Axisymmetric => 3,
        }
    }

    /// Returns the volume weights, including the 2π·R factor if axisymmetric
    #[inline]
    pub fn dv(&self) -> &Matrix {
        &self.dv
    }

    /// Copies a global vector into the nodal values
    pub fn set_values(&mut self, uu: &Vector) -> Result<(), StrError> {
        if uu.dim() != self.values.dim() {
            return Err("global vector has the wrong dimension for this field");
        }
        vec_copy(&mut self.values, uu)
    }

    /// Extracts the gradient of the nodal values as a tensor grid
    ///
    /// ```text
    /// (∇u)_iJ = Σ_m u_i^m · dh_m/dX_J
    /// ```
    ///
    /// With `symmetric = true`, returns the symmetric part instead.
    pub fn grad(&self, symmetric: bool) -> Result<Tensor2Field, StrError> {
        let region = self.region;
        let (ndim, nnode) = (region.ndim, region.nnode);
        let tdim = self.tdim();
        let mut gg = Tensor2Field::new(tdim, region.ngauss, region.ncell)?;
        for c in 0..region.ncell {
            let points = region.points(c);
            for p in 0..region.ngauss {
                let dhdx = region.dhdx(p, c);
                for m in 0..nnode {
                    for i in 0..ndim {
                        let um = self.values[points[m] * ndim + i];
                        for jj in 0..ndim {
                            gg.add(i, jj, p, c, 1.0, um * dhdx.get(m, jj));
                        }
                    }
                }
                if self.kinematics == Kinematics::Axisymmetric {
                    let nn = region.interp(p);
                    let r = region.radius(p, c);
                    for m in 0..nnode {
                        gg.add(2, 2, p, c, 1.0, self.values[points[m] * ndim] * nn[m] / r);
                    }
                }
                if symmetric {
                    for i in 0..tdim {
                        for j in (i + 1)..tdim {
                            let sym = 0.5 * (gg.get(i, j, p, c) + gg.get(j, i, p, c));
                            gg.set(i, j, p, c, sym);
                            gg.set(j, i, p, c, sym);
                        }
                    }
                }
            }
        }
        Ok(gg)
    }

    /// Extracts the deformation gradient F = I + ∇u as a tensor grid
    ///
    /// For plane-strain fields F₃₃ = 1; for axisymmetric fields
    /// F₃₃ = 1 + uᵣ/R.
    pub fn deformation_gradient(&self) -> Result<Tensor2Field, StrError> {
        let mut ff = self.grad(false)?;
        let (tdim, ngauss, ncell) = ff.dims();
        for c in 0..ncell {
            for p in 0..ngauss {
                for i in 0..tdim {
                    ff.add(i, i, p, c, 1.0, 1.0);
                }
            }
        }
        Ok(ff)
    }

    /// Interpolates the nodal values at the integration points
    ///
    /// Returns one (ngauss × ncell) matrix per component.
    pub fn interpolate(&self) -> Vec<Matrix> {
        let region = self.region;
        let (ndim, nnode) = (region.ndim, region.nnode);
        let mut res = vec![Matrix::new(region.ngauss, region.ncell); ndim];
        for c in 0..region.ncell {
            let points = region.points(c);
            for p in 0..region.ngauss {
                let nn = region.interp(p);
                for i in 0..ndim {
                    let mut sum = 0.0;
                    for m in 0..nnode {
                        sum += nn[m] * self.values[points[m] * ndim + i];
                    }
                    res[i].set(p, c, sum);
                }
            }
        }
        res
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Field, Kinematics};
    use crate::kinematics::Region;
    use gemlab::mesh::Samples;
    use russell_lab::approx_eq;
    use russell_lab::math::PI;

    #[test]
    fn new_captures_wrong_input() {
        let mesh = Samples::one_hex8();
        let region = Region::new(&mesh).unwrap();
        assert_eq!(
            Field::new(&region, Kinematics::Axisymmetric).err(),
            Some("plane-strain and axisymmetric fields require a 2D mesh")
        );
        let mut field = Field::new(&region, Kinematics::Planar).unwrap();
        let wrong = russell_lab::Vector::new(7);
        assert_eq!(
            field.set_values(&wrong).err(),
            Some("global vector has the wrong dimension for this field")
        );
    }

    #[test]
    fn deformation_gradient_works_for_uniform_stretch() {
        // u = (a·x, b·y, c·z) gives the constant F = diag(1+a, 1+b, 1+c)
        let (a, b, c) = (0.1, -0.05, 0.2);
        let mesh = Samples::one_hex8();
        let region = Region::new(&mesh).unwrap();
        let mut field = Field::new(&region, Kinematics::Planar).unwrap();
        for point in &mesh.points {
            field.values[point.id * 3] = a * point.coords[0];
            field.values[point.id * 3 + 1] = b * point.coords[1];
            field.values[point.id * 3 + 2] = c * point.coords[2];
        }
        let ff = field.deformation_gradient().unwrap();
        for p in 0..region.ngauss {
            approx_eq(ff.get(0, 0, p, 0), 1.0 + a, 1e-14);
            approx_eq(ff.get(1, 1, p, 0), 1.0 + b, 1e-14);
            approx_eq(ff.get(2, 2, p, 0), 1.0 + c, 1e-14);
            for i in 0..3 {
                for j in 0..3 {
                    if i != j {
                        approx_eq(ff.get(i, j, p, 0), 0.0, 1e-14);
                    }
                }
            }
        }
    }

    #[test]
    fn grad_symmetric_works() {
        // u = (γ·y, 0, 0) gives ∇u with a single off-diagonal entry γ
        let gamma = 0.3;
        let mesh = Samples::one_hex8();
        let region = Region::new(&mesh).unwrap();
        let mut field = Field::new(&region, Kinematics::Planar).unwrap();
        for point in &mesh.points {
            field.values[point.id * 3] = gamma * point.coords[1];
        }
        let gg = field.grad(false).unwrap();
        let ee = field.grad(true).unwrap();
        for p in 0..region.ngauss {
            approx_eq(gg.get(0, 1, p, 0), gamma, 1e-14);
            approx_eq(gg.get(1, 0, p, 0), 0.0, 1e-14);
            approx_eq(ee.get(0, 1, p, 0), gamma / 2.0, 1e-14);
            approx_eq(ee.get(1, 0, p, 0), gamma / 2.0, 1e-14);
        }
    }

    #[test]
    fn plane_strain_pads_the_out_of_plane_entry() {
        let mesh = Samples::one_qua4();
        let region = Region::new(&mesh).unwrap();
        let mut field = Field::new(&region, Kinematics::PlaneStrain).unwrap();
        for point in &mesh.points {
            field.values[point.id * 2] = 0.2 * point.coords[0];
        }
        let ff = field.deformation_gradient().unwrap();
        assert_eq!(ff.dims().0, 3);
        for p in 0..region.ngauss {
            approx_eq(ff.get(0, 0, p, 0), 1.2, 1e-14);
            approx_eq(ff.get(2, 2, p, 0), 1.0, 1e-15);
        }
    }

    #[test]
    fn axisymmetric_hoop_entry_and_weights_work() {
        // radial stretch u_r = 0.1·R gives the constant hoop entry u_r/R = 0.1
        // and the in-plane block must match the planar extraction
        let mesh = Samples::one_qua4();
        let region = Region::new(&mesh).unwrap();
        let mut axi = Field::new(&region, Kinematics::Axisymmetric).unwrap();
        let mut pla = Field::new(&region, Kinematics::Planar).unwrap();
        for point in &mesh.points {
            axi.values[point.id * 2] = 0.1 * point.coords[0];
            pla.values[point.id * 2] = 0.1 * point.coords[0];
        }
        let ga = axi.grad(false).unwrap();
        let gp = pla.grad(false).unwrap();
        for p in 0..region.ngauss {
            approx_eq(ga.get(2, 2, p, 0), 0.1, 1e-14);
            for i in 0..2 {
                for j in 0..2 {
                    assert_eq!(ga.get(i, j, p, 0), gp.get(i, j, p, 0));
                }
            }
        }
        // the volume weight carries the 2π·R factor
        for p in 0..region.ngauss {
            let correct = 2.0 * PI * region.radius(p, 0) * region.dv().get(p, 0);
            assert_eq!(axi.dv().get(p, 0), correct);
            assert_eq!(pla.dv().get(p, 0), region.dv().get(p, 0));
        }
    }

    #[test]
    fn interpolate_reproduces_linear_fields() {
        let mesh = Samples::one_hex8();
        let region = Region::new(&mesh).unwrap();
        let mut field = Field::new(&region, Kinematics::Planar).unwrap();
        for point in &mesh.points {
            field.values[point.id * 3] = 1.0 + 2.0 * point.coords[0];
            field.values[point.id * 3 + 1] = point.coords[1] - point.coords[2];
        }
        let vals = field.interpolate();
        assert_eq!(vals.len(), 3);
        // constant + linear fields are reproduced exactly at any point; check
        // consistency with the interpolated coordinates
        for p in 0..region.ngauss {
            let x: f64 = (0..region.nnode)
                .map(|m| region.interp(p)[m] * mesh.points[region.points(0)[m]].coords[0])
                .sum();
            let y: f64 = (0..region.nnode)
                .map(|m| region.interp(p)[m] * mesh.points[region.points(0)[m]].coords[1])
                .sum();
            let z: f64 = (0..region.nnode)
                .map(|m| region.interp(p)[m] * mesh.points[region.points(0)[m]].coords[2])
                .sum();
            approx_eq(vals[0].get(p, 0), 1.0 + 2.0 * x, 1e-14);
            approx_eq(vals[1].get(p, 0), y - z, 1e-14);
            approx_eq(vals[2].get(p, 0), 0.0, 1e-15);
        }
    }
}
