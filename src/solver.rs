pub mod adi;
pub mod relaxation;

use std::time::Instant;
use tracing::{debug, info, info_span, trace, warn};

use crate::config::{Method, SolverConfig};
use crate::domain::grid2d::{TemperatureField, MIN_NODES};
use crate::error::SolverError;
use crate::numerical::residual::{ConvergenceStatus, ConvergenceTracker, ResidualNorm};

pub use adi::AdiSolver;
pub use relaxation::RelaxationSolver;

/// Progress is logged at debug level every this many iterations.
const PROGRESS_INTERVAL: usize = 500;

/// One iterative scheme for the interior Laplace problem.
///
/// `sweep` advances every interior node by one iteration and must leave the
/// boundary nodes untouched. `previous` is a copy of `field` taken just before
/// the sweep; the driver reuses it for the residual.
pub trait IterativeScheme {
    fn method(&self) -> Method;

    /// Norm used to compare successive estimates.
    fn residual_norm(&self) -> ResidualNorm;

    fn sweep(&self, previous: &TemperatureField, field: &mut TemperatureField) -> Result<(), SolverError>;

    /// Iterates `sweep` until the residual drops to the tolerance or the
    /// iteration cap is hit.
    fn solve(&self, field: TemperatureField, config: &SolverConfig) -> Result<SolveOutcome, SolverError>
    where
        Self: Sized,
    {
        iterate(self, field, config)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverResult {
    pub field: TemperatureField,
    pub iterations: usize,
    pub residual: f64,
    /// Residual after each iteration, oldest first.
    pub residual_history: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    Converged(SolverResult),
    /// Iteration cap reached; carries the last field and residual.
    MaxIterationsExceeded(SolverResult),
}

impl SolveOutcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, SolveOutcome::Converged(_))
    }

    pub fn result(&self) -> &SolverResult {
        match self {
            SolveOutcome::Converged(r) | SolveOutcome::MaxIterationsExceeded(r) => r,
        }
    }

    pub fn into_result(self) -> SolverResult {
        match self {
            SolveOutcome::Converged(r) | SolveOutcome::MaxIterationsExceeded(r) => r,
        }
    }

    /// Turns a capped run into `SolverError::NonConvergence`.
    pub fn into_converged(self) -> Result<SolverResult, SolverError> {
        match self {
            SolveOutcome::Converged(r) => Ok(r),
            SolveOutcome::MaxIterationsExceeded(r) => Err(SolverError::NonConvergence {
                iterations: r.iterations,
                residual: r.residual,
            }),
        }
    }
}

/// Runs the scheme selected by `config.method` on `field`.
pub fn solve(field: TemperatureField, config: &SolverConfig) -> Result<SolveOutcome, SolverError> {
    match config.method {
        Method::Adi => AdiSolver.solve(field, config),
        Method::Relaxation => RelaxationSolver.solve(field, config),
    }
}

pub fn check_field(field: &TemperatureField) -> Result<(), SolverError> {
    let (nx, ny) = field.shape();
    if nx < MIN_NODES || ny < MIN_NODES {
        return Err(SolverError::InvalidGrid(format!(
            "Field is {}x{}, need at least {}x{} for an interior node",
            nx, ny, MIN_NODES, MIN_NODES
        )));
    }
    Ok(())
}

fn iterate<S: IterativeScheme + ?Sized>(
    scheme: &S,
    mut field: TemperatureField,
    config: &SolverConfig,
) -> Result<SolveOutcome, SolverError> {
    config.validate()?;
    check_field(&field)?;

    let (nx, ny) = field.shape();
    let method = scheme.method().name();
    let _span = info_span!("solve", method, nx, ny, tolerance = config.tolerance).entered();
    let start = Instant::now();

    let mut tracker = ConvergenceTracker::new(config.tolerance, config.max_iterations, scheme.residual_norm());
    loop {
        let previous = field.clone();
        scheme.sweep(&previous, &mut field)?;
        let residual = tracker.norm.measure(&field, &previous);
        let status = tracker.record(residual);
        let iterations = tracker.iterations();
        trace!(iteration = iterations, residual, "sweep complete");
        if iterations % PROGRESS_INTERVAL == 0 {
            debug!("Iteration {}: residual={:.3e}", iterations, residual);
        }

        match status {
            ConvergenceStatus::Continue => continue,
            ConvergenceStatus::Converged => {
                info!(
                    "{} converged in {} iterations, residual={:.3e}, elapsed={:.2}ms",
                    method, iterations, residual, start.elapsed().as_secs_f64() * 1e3
                );
                return Ok(SolveOutcome::Converged(SolverResult {
                    field,
                    iterations,
                    residual,
                    residual_history: tracker.into_history(),
                }));
            }
            ConvergenceStatus::Exhausted => {
                warn!(
                    "{} stopped at iteration cap {} with residual={:.3e} (tolerance {:.3e})",
                    method, iterations, residual, config.tolerance
                );
                return Ok(SolveOutcome::MaxIterationsExceeded(SolverResult {
                    field,
                    iterations,
                    residual,
                    residual_history: tracker.into_history(),
                }));
            }
        }
    }
}
