use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::config::{Method, SolverConfig};
use crate::domain::grid2d::TemperatureField;
use crate::error::SolverError;
use crate::solver::{solve, SolveOutcome};

/// Serializable record of one solver run.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SolveSummary {
    pub method: Method,
    pub nx: usize,
    pub ny: usize,
    pub tolerance: f64,
    pub converged: bool,
    pub iterations: usize,
    pub final_residual: f64,
    pub elapsed_ms: f64,
}

impl SolveSummary {
    pub fn from_outcome(config: &SolverConfig, outcome: &SolveOutcome, elapsed_ms: f64) -> Self {
        let result = outcome.result();
        let (nx, ny) = result.field.shape();
        Self {
            method: config.method,
            nx,
            ny,
            tolerance: config.tolerance,
            converged: outcome.is_converged(),
            iterations: result.iterations,
            final_residual: result.residual,
            elapsed_ms,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, SolverError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Solves and times one run, logging the summary.
pub fn solve_with_summary(
    field: TemperatureField,
    config: &SolverConfig,
) -> Result<(SolveOutcome, SolveSummary), SolverError> {
    let start = Instant::now();
    let outcome = solve(field, config)?;
    let summary = SolveSummary::from_outcome(config, &outcome, start.elapsed().as_secs_f64() * 1e3);
    info!(
        "Number of iterations: {}, final residual: {:.3e} ({})",
        summary.iterations, summary.final_residual, summary.method.name()
    );
    Ok((outcome, summary))
}
