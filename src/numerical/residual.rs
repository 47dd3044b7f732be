use serde::{Deserialize, Serialize};
use crate::domain::grid2d::TemperatureField;

/// Norm of the change between two successive field estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidualNorm {
    /// Largest absolute nodal change.
    LInf,
    /// Euclidean norm of the nodal change over the whole array.
    L2,
}

impl ResidualNorm {
    pub fn measure(&self, current: &TemperatureField, previous: &TemperatureField) -> f64 {
        match self {
            ResidualNorm::LInf => max_abs_change(current, previous),
            ResidualNorm::L2 => l2_change(current, previous),
        }
    }
}

pub fn max_abs_change(current: &TemperatureField, previous: &TemperatureField) -> f64 {
    current
        .iter()
        .zip(previous.iter())
        .fold(0.0_f64, |acc, (a, b)| acc.max((a - b).abs()))
}

pub fn l2_change(current: &TemperatureField, previous: &TemperatureField) -> f64 {
    current
        .iter()
        .zip(previous.iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceStatus {
    Continue,
    Converged,
    /// Iteration cap reached with the residual still above tolerance.
    Exhausted,
}

/// Termination policy shared by the iterative schemes.
#[derive(Debug, Clone)]
pub struct ConvergenceTracker {
    pub tolerance: f64,
    pub max_iterations: usize,
    pub norm: ResidualNorm,
    history: Vec<f64>,
}

impl ConvergenceTracker {
    pub fn new(tolerance: f64, max_iterations: usize, norm: ResidualNorm) -> Self {
        Self { tolerance, max_iterations, norm, history: Vec::new() }
    }

    /// Records the residual of one completed iteration.
    pub fn record(&mut self, residual: f64) -> ConvergenceStatus {
        self.history.push(residual);
        if residual <= self.tolerance {
            ConvergenceStatus::Converged
        } else if self.history.len() >= self.max_iterations {
            ConvergenceStatus::Exhausted
        } else {
            ConvergenceStatus::Continue
        }
    }

    pub fn iterations(&self) -> usize {
        self.history.len()
    }

    pub fn last_residual(&self) -> Option<f64> {
        self.history.last().copied()
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn into_history(self) -> Vec<f64> {
        self.history
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dmatrix;
    use approx::assert_relative_eq;

    #[test]
    fn test_norms() {
        let a = dmatrix![1.0, 2.0; 3.0, 4.0];
        let b = dmatrix![1.0, 5.0; 3.0, 0.0];
        assert_relative_eq!(max_abs_change(&a, &b), 4.0);
        assert_relative_eq!(l2_change(&a, &b), 5.0);
        assert_relative_eq!(ResidualNorm::LInf.measure(&a, &a), 0.0);
        assert_relative_eq!(ResidualNorm::L2.measure(&b, &a), 5.0);
    }

    #[test]
    fn test_tracker_converges() {
        let mut tracker = ConvergenceTracker::new(1e-3, 10, ResidualNorm::LInf);
        assert_eq!(tracker.record(1.0), ConvergenceStatus::Continue);
        assert_eq!(tracker.record(1e-2), ConvergenceStatus::Continue);
        assert_eq!(tracker.record(1e-3), ConvergenceStatus::Converged);
        assert_eq!(tracker.iterations(), 3);
        assert_eq!(tracker.last_residual(), Some(1e-3));
        assert_eq!(tracker.history(), &[1.0, 1e-2, 1e-3]);
    }

    #[test]
    fn test_tracker_exhausts() {
        let mut tracker = ConvergenceTracker::new(1e-6, 2, ResidualNorm::L2);
        assert_eq!(tracker.record(1.0), ConvergenceStatus::Continue);
        assert_eq!(tracker.record(0.5), ConvergenceStatus::Exhausted);
        assert_eq!(tracker.into_history(), vec![1.0, 0.5]);
    }

    #[test]
    fn test_convergence_wins_on_last_iteration() {
        let mut tracker = ConvergenceTracker::new(1e-6, 1, ResidualNorm::L2);
        assert_eq!(tracker.record(0.0), ConvergenceStatus::Converged);
    }
}
