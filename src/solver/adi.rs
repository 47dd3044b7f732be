//! Alternating-direction implicit iteration for the Laplace problem.
//!
//! Each iteration solves every interior x line as a tridiagonal system with
//! the cross-direction neighbours taken from the current field, then does the
//! same for every interior y line. Lines are updated in place, one after
//! another, so a line sees the already-updated values of the line before it.

use nalgebra::DVector;
use tracing::trace;

use crate::config::Method;
use crate::domain::grid2d::TemperatureField;
use crate::error::SolverError;
use crate::numerical::residual::ResidualNorm;
use crate::numerical::tdma::TridiagonalSystem;
use crate::solver::{check_field, IterativeScheme};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdiSolver;

impl AdiSolver {
    /// One full ADI iteration: x half-step followed by y half-step.
    pub fn step(&self, field: &mut TemperatureField) -> Result<(), SolverError> {
        check_field(field)?;
        x_half_step(field)?;
        y_half_step(field)?;
        Ok(())
    }
}

impl IterativeScheme for AdiSolver {
    fn method(&self) -> Method {
        Method::Adi
    }

    fn residual_norm(&self) -> ResidualNorm {
        ResidualNorm::LInf
    }

    fn sweep(&self, _previous: &TemperatureField, field: &mut TemperatureField) -> Result<(), SolverError> {
        self.step(field)
    }
}

/// Solves along `i` for every interior column `j`.
fn x_half_step(field: &mut TemperatureField) -> Result<(), SolverError> {
    let (nx, ny) = field.shape();
    let n = nx - 2;
    for j in 1..ny - 1 {
        let mut system = TridiagonalSystem::laplace_line(n);
        system.d = DVector::from_fn(n, |k, _| -(field[(k + 1, j - 1)] + field[(k + 1, j + 1)]));
        // Dirichlet ends of the line
        system.d[0] -= field[(0, j)];
        system.d[n - 1] -= field[(nx - 1, j)];

        let line = system.solve()?;
        for k in 0..n {
            field[(k + 1, j)] = line[k];
        }
        trace!(line = j, "x line solved");
    }
    Ok(())
}

/// Solves along `j` for every interior row `i`.
fn y_half_step(field: &mut TemperatureField) -> Result<(), SolverError> {
    let (nx, ny) = field.shape();
    let n = ny - 2;
    for i in 1..nx - 1 {
        let mut system = TridiagonalSystem::laplace_line(n);
        system.d = DVector::from_fn(n, |k, _| -(field[(i - 1, k + 1)] + field[(i + 1, k + 1)]));
        system.d[0] -= field[(i, 0)];
        system.d[n - 1] -= field[(i, ny - 1)];

        let line = system.solve()?;
        for k in 0..n {
            field[(i, k + 1)] = line[k];
        }
        trace!(line = i, "y line solved");
    }
    Ok(())
}
