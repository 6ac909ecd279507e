use gemlab::mesh::Samples;
use hypsim::assembly::n_equation;
use hypsim::constitution::ParamIsochoric;
use hypsim::kinematics::{Field, Kinematics, Region};
use hypsim::mechanics::{SolidBodyNearlyIncompressible, StateNearlyIncompressible};
use hypsim::StrError;
use russell_lab::{approx_eq, Vector};
use russell_sparse::{CooMatrix, Sym};

// Nearly-incompressible unit cube under uniform extension
//
// TEST GOAL
//
// This test verifies the mean-dilatation condensation on a single Hex8:
// the per-cell pressure must satisfy p = K(J̄ − 1), the mean volume ratio
// must land on the exact volume ratio v/V, and the mean Cauchy stress must
// equal the condensed pressure.
//
// MESH
//
// One Hex8 spanning the unit cube [0,1]³ (reference volume V = 1)
//
// DISPLACEMENTS
//
// u_x = a·x with a = 0.1, giving F = diag(1+a, 1, 1) and J = 1+a
//
// PARAMETERS
//
// Neo-Hookean isochoric part with μ = 1; bulk modulus K = 5000

#[test]
fn test_nearly_incompressible_cube() -> Result<(), StrError> {
    let bulk = 5000.0;
    let a = 0.1;

    // region and field
    let mesh = Samples::one_hex8();
    let region = Region::new(&mesh)?;
    let field = Field::new(&region, Kinematics::Planar)?;

    // body
    let param = ParamIsochoric::NeoHooke { mu: 1.0 };
    let mut body = SolidBodyNearlyIncompressible::new(field, &param, bulk, false)?;
    approx_eq(body.reference_volume(0), 1.0, 1e-14);

    // extension displacements
    let mut uu = Vector::new(n_equation(&region));
    for point in &mesh.points {
        uu[point.id * 3] = a * point.coords[0];
    }

    // two residual evaluations at the same displacements, as an outer Newton
    // loop would do; the second one closes the condensed linearization
    let neq = n_equation(&region);
    let mut rr = Vector::new(neq);
    body.vector(&mut rr, &uu)?;
    rr.fill(0.0);
    body.vector(&mut rr, &uu)?;

    // condensed state consistency
    approx_eq(body.deformed_volume(0)?, 1.0 + a, 1e-13);
    approx_eq(body.state().jj_bar[0], 1.0 + a, 1e-13);
    approx_eq(body.state().pp[0], bulk * (body.state().jj_bar[0] - 1.0), 1e-9);

    // the mean Cauchy stress equals the condensed pressure because the
    // isochoric Kirchhoff stress is deviatoric
    let sigma = body.cauchy_stress()?;
    for p in 0..region.ngauss {
        let mean = (sigma.get(0, 0, p, 0) + sigma.get(1, 1, p, 0) + sigma.get(2, 2, p, 0)) / 3.0;
        approx_eq(mean, body.state().pp[0], 1e-9);
    }

    // the reported symmetric stress agrees with the grid
    let tt = body.stress_at(0, 0)?;
    approx_eq(tt.get(0, 0), sigma.get(0, 0, 0, 0), 1e-12);
    approx_eq(tt.get(2, 2), sigma.get(2, 2, 0, 0), 1e-12);

    // tangent assembly succeeds and is symmetric
    let mut kk = CooMatrix::new(neq, neq, neq * neq, Sym::No)?;
    body.matrix(&mut kk)?;
    let dense = kk.as_dense();
    for row in 0..neq {
        for col in (row + 1)..neq {
            approx_eq(dense.get(row, col), dense.get(col, row), 1e-6);
        }
    }

    // checkpoint, JSON round trip, and rollback
    let full_path = "/tmp/hypsim/test_nearly_incompressible_cube_state.json";
    body.state().write_json(full_path)?;
    let checkpoint = StateNearlyIncompressible::read_json(full_path)?;
    approx_eq(checkpoint.pp[0], body.state().pp[0], 1e-15);
    approx_eq(checkpoint.jj_bar[0], body.state().jj_bar[0], 1e-15);
    body.set_state(checkpoint)?;
    approx_eq(body.state().jj_bar[0], 1.0 + a, 1e-13);
    Ok(())
}
