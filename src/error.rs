use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("Invalid grid size: {0}")]
    InvalidGridSize(String),

    #[error("Invalid grid spacing: {0}")]
    InvalidSpacing(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundaryError {
    #[error("Boundary profile for {edge} edge has {actual} values, expected {expected}")]
    ProfileLength {
        edge: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid tolerance {0}: must be positive and finite")]
    InvalidTolerance(f64),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Singular tridiagonal system: pivot {pivot:e} at row {row}")]
    SingularSystem { row: usize, pivot: f64 },

    #[error("Did not converge after {iterations} iterations (residual {residual:e})")]
    NonConvergence { iterations: usize, residual: f64 },

    #[error("Direct solver failed: {0}")]
    DirectSolve(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Boundary(#[from] BoundaryError),
}

impl From<serde_json::Error> for SolverError {
    fn from(e: serde_json::Error) -> Self {
        SolverError::Serialization(e.to_string())
    }
}
