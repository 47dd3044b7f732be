//! Four-neighbour point relaxation with mixed snapshot reads.
//!
//! A sweep visits interior nodes row by row (`i` ascending, then `j`
//! ascending) and replaces each with the average of its neighbours. The west
//! and north neighbours are read from the snapshot taken before the sweep,
//! the east and south neighbours from the array being updated.

use tracing::trace;

use crate::config::Method;
use crate::domain::grid2d::TemperatureField;
use crate::error::SolverError;
use crate::numerical::residual::ResidualNorm;
use crate::solver::{check_field, IterativeScheme};

/// Which array a neighbour value is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Field as it stood when the sweep began.
    Previous,
    /// Field being written during the sweep.
    Live,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborRead {
    pub di: isize,
    pub dj: isize,
    pub source: Source,
}

/// Neighbour reads in summation order: west, east, north, south.
pub const READ_RULES: [NeighborRead; 4] = [
    NeighborRead { di: 0, dj: -1, source: Source::Previous },
    NeighborRead { di: 0, dj: 1, source: Source::Live },
    NeighborRead { di: -1, dj: 0, source: Source::Previous },
    NeighborRead { di: 1, dj: 0, source: Source::Live },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelaxationSolver;

impl RelaxationSolver {
    /// One sweep over the interior, in place.
    pub fn step(&self, field: &mut TemperatureField) -> Result<(), SolverError> {
        let previous = field.clone();
        self.relax(&previous, field)
    }

    /// Sweep reading the `Previous` neighbours from `previous`, which must be
    /// the state of `field` before the sweep.
    fn relax(&self, previous: &TemperatureField, field: &mut TemperatureField) -> Result<(), SolverError> {
        check_field(field)?;
        if previous.shape() != field.shape() {
            return Err(SolverError::InvalidParameter(format!(
                "Snapshot is {:?}, field is {:?}",
                previous.shape(), field.shape()
            )));
        }
        let (nx, ny) = field.shape();

        for i in 1..nx - 1 {
            for j in 1..ny - 1 {
                let mut sum = 0.0;
                for rule in READ_RULES.iter() {
                    let ni = (i as isize + rule.di) as usize;
                    let nj = (j as isize + rule.dj) as usize;
                    sum += match rule.source {
                        Source::Previous => previous[(ni, nj)],
                        Source::Live => field[(ni, nj)],
                    };
                }
                field[(i, j)] = sum / 4.0;
            }
            trace!(row = i, "row relaxed");
        }
        Ok(())
    }
}

impl IterativeScheme for RelaxationSolver {
    fn method(&self) -> Method {
        Method::Relaxation
    }

    fn residual_norm(&self) -> ResidualNorm {
        ResidualNorm::L2
    }

    fn sweep(&self, previous: &TemperatureField, field: &mut TemperatureField) -> Result<(), SolverError> {
        self.relax(previous, field)
    }
}
