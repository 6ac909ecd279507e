use crate::StrError;
use gemlab::integ::{self, IntegPointData};
use gemlab::mesh::Mesh;
use gemlab::shapes::{GeoKind, Scratchpad};
use russell_lab::{Matrix, Vector};

/// Holds the precomputed integration data of a homogeneous mesh
///
/// At construction, evaluates the shape functions and their gradients with
/// respect to the reference coordinates at every integration point of every
/// cell, along with the integration volume weights dV = w·det(J).
///
/// All cells must share the same geometry kind; the connectivity must be in
/// range; and the Jacobian determinant must be strictly positive everywhere.
pub struct Region {
    /// Holds the space dimension
    pub ndim: usize,

    /// Holds the number of nodes per cell
    pub nnode: usize,

    /// Holds the number of integration points per cell
    pub ngauss: usize,

    /// Holds the number of cells
    pub ncell: usize,

    /// Holds the number of points in the mesh
    pub npoint: usize,

    /// Holds the (uniform) geometry kind of the cells
    pub kind: GeoKind,

    /// Holds the connectivity (points) of each cell
    connectivity: Vec<Vec<usize>>,

    /// Holds the shape function values at each integration point (nnode)
    interp: Vec<Vector>,

    /// Holds the gradients dh/dX at each (gauss, cell) pair (nnode × ndim)
    dhdx: Vec<Matrix>,

    /// Holds the interpolated first coordinate at each (gauss, cell) pair (ngauss × ncell)
    ///
    /// In axisymmetric analyses the first coordinate is the radius.
    radius: Matrix,

    /// Holds the volume weights dV = w·det(J) at each (gauss, cell) pair (ngauss × ncell)
    dv: Matrix,
}

impl Region {
    /// Allocates a new instance from a mesh
    pub fn new(mesh: &Mesh) -> Result<Self, StrError> {
        let ncell = mesh.cells.len();
        if ncell < 1 {
            return Err("mesh must have at least one cell");
        }
        let ndim = mesh.ndim;
        let npoint = mesh.points.len();
        let kind = mesh.cells[0].kind;
        let nnode = kind.nnode();
        for cell in &mesh.cells {
            if cell.kind != kind {
                return Err("all cells must share the same geometry kind");
            }
            if cell.points.len() != nnode {
                return Err("cell connectivity has the wrong number of points");
            }
            for point_id in &cell.points {
                if *point_id >= npoint {
                    return Err("cell connectivity refers to a non-existent point");
                }
            }
        }

        // integration points: rows [ξ0, ξ1, ξ2, w] of the default rule
        let ips: IntegPointData = integ::default_points(kind);
        let ngauss = ips.len();

        // shape function values (geometry-independent)
        let mut pad = Scratchpad::new(ndim, kind)?;
        let mut interp = Vec::with_capacity(ngauss);
        for iota in ips {
            (pad.fn_interp)(&mut pad.interp, iota);
            interp.push(pad.interp.clone());
        }

        // gradients, radii, and volume weights
        let mut connectivity = Vec::with_capacity(ncell);
        let mut dhdx = Vec::with_capacity(ncell * ngauss);
        let mut radius = Matrix::new(ngauss, ncell);
        let mut dv = Matrix::new(ngauss, ncell);
        for (c, cell) in mesh.cells.iter().enumerate() {
            mesh.set_pad(&mut pad, &cell.points);
            for (p, iota) in ips.iter().enumerate() {
                let det_jac = pad.calc_gradient(iota)?;
                if det_jac <= 0.0 {
                    return Err("mesh has a cell with non-positive Jacobian determinant");
                }
                dhdx.push(pad.gradient.clone());
                let mut r = 0.0;
                for m in 0..nnode {
                    r += interp[p][m] * pad.xxt.get(0, m);
                }
                radius.set(p, c, r);
                dv.set(p, c, det_jac * iota[3]);
            }
            connectivity.push(cell.points.clone());
        }
        Ok(Region {
            ndim,
            nnode,
            ngauss,
            ncell,
            npoint,
            kind,
            connectivity,
            interp,
            dhdx,
            radius,
            dv,
        })
    }

    /// Returns the connectivity (points) of a cell
    #[inline]
    pub fn points(&self, c: usize) -> &[usize] {
        &self.connectivity[c]
    }

    /// Returns the shape function values at an integration point
    #[inline]
    pub fn interp(&self, p: usize) -> &Vector {
        &self.interp[p]
    }

    /// Returns the gradients dh/dX at a (gauss, cell) pair (nnode × ndim)
    #[inline]
    pub fn dhdx(&self, p: usize, c: usize) -> &Matrix {
        &self.dhdx[c * self.ngauss + p]
    }

    /// Returns the interpolated first coordinate at a (gauss, cell) pair
    #[inline]
    pub fn radius(&self, p: usize, c: usize) -> f64 {
        self.radius.get(p, c)
    }

    /// Returns the volume weights dV = w·det(J) (ngauss × ncell)
    #[inline]
    pub fn dv(&self) -> &Matrix {
        &self.dv
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
