//! Steady-state heat conduction on a rectangular plate with fixed edge
//! temperatures, relaxed to convergence by either an ADI line scheme or a
//! four-neighbour point relaxation.

pub mod boundary;
pub mod config;
pub mod direct;
pub mod domain;
pub mod error;
pub mod numerical;
pub mod report;
pub mod solver;

pub use boundary::bc2d::{DirichletBoundary, EdgeValue};
pub use config::{Method, SolverConfig};
pub use domain::grid2d::{CellSize2D, Grid2D, GridDimensions2D, TemperatureField};
pub use error::{BoundaryError, GridError, SolverError};
pub use solver::{solve, AdiSolver, IterativeScheme, RelaxationSolver, SolveOutcome, SolverResult};
