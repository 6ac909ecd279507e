use crate::constitution::StateVars;
use crate::kinematics::Region;
use crate::StrError;
use russell_lab::Vector;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds the state of a nearly-incompressible solid body
///
/// The pressure and the mean volume ratio are per-cell scalars (constant
/// pressure interpolation); the displacements of the previous extraction are
/// kept to evaluate the incremental condensation equations.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StateNearlyIncompressible {
    /// Holds the displacements of the previous extraction (npoint · ndim)
    pub uu: Vector,

    /// Holds the pressure of each cell
    pub pp: Vec<f64>,

    /// Holds the mean volume ratio of each cell
    pub jj_bar: Vec<f64>,

    /// Holds the internal variables of the material model
    pub statevars: StateVars,
}

impl StateNearlyIncompressible {
    /// Allocates a new instance at the reference configuration
    ///
    /// Displacements and pressures start at zero and the mean volume ratio
    /// starts at one.
    pub fn new(region: &Region, nvar: usize) -> Result<Self, StrError> {
        Ok(StateNearlyIncompressible {
            uu: Vector::new(region.npoint * region.ndim),
            pp: vec![0.0; region.ncell],
            jj_bar: vec![1.0; region.ncell],
            statevars: StateVars::new(nvar, region.ngauss, region.ncell)?,
        })
    }

    /// Reads a JSON file with the state data
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let input = File::open(path).map_err(|_| "cannot open file")?;
        let buffered = BufReader::new(input);
        let state = serde_json::from_reader(buffered).map_err(|_| "cannot parse JSON file")?;
        Ok(state)
    }

    /// Writes a JSON file with the state data
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create file")?;
        serde_json::to_writer(&mut file, &self).map_err(|_| "cannot write file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
