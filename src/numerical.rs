pub mod residual;
pub mod tdma;

pub use residual::{ConvergenceStatus, ConvergenceTracker, ResidualNorm};
pub use tdma::{thomas_solve, TridiagonalSystem};
