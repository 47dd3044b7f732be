use nalgebra::DVector;
use crate::error::SolverError;

/// Pivots smaller than this in magnitude abort the elimination.
pub const PIVOT_EPSILON: f64 = 1e-12;

/// `a[k]·φ[k-1] + b[k]·φ[k] + c[k]·φ[k+1] = d[k]` for `k = 0..n`.
///
/// `a[0]` and `c[n-1]` fall outside the matrix and never contribute.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalSystem {
    pub a: DVector<f64>, // sub-diagonal
    pub b: DVector<f64>, // diagonal
    pub c: DVector<f64>, // super-diagonal
    pub d: DVector<f64>, // right-hand side
}

impl TridiagonalSystem {
    pub fn new(
        a: DVector<f64>,
        b: DVector<f64>,
        c: DVector<f64>,
        d: DVector<f64>,
    ) -> Result<Self, SolverError> {
        let n = b.len();
        if n == 0 {
            return Err(SolverError::InvalidParameter(
                "Tridiagonal system must have at least one row".to_string(),
            ));
        }
        if a.len() != n || c.len() != n || d.len() != n {
            return Err(SolverError::InvalidParameter(format!(
                "Tridiagonal coefficient lengths differ: a={}, b={}, c={}, d={}",
                a.len(), n, c.len(), d.len()
            )));
        }
        Ok(Self { a, b, c, d })
    }

    /// Five-point Laplace line stencil `[1, -4, 1]` of size `n` with a zero
    /// right-hand side; `a[0]` and `c[n-1]` are zeroed.
    pub fn laplace_line(n: usize) -> Self {
        let mut a = DVector::from_element(n, 1.0);
        let b = DVector::from_element(n, -4.0);
        let mut c = DVector::from_element(n, 1.0);
        if n > 0 {
            a[0] = 0.0;
            c[n - 1] = 0.0;
        }
        Self { a, b, c, d: DVector::zeros(n) }
    }

    pub fn len(&self) -> usize {
        self.b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.b.len() == 0
    }

    /// Thomas algorithm: forward elimination then back substitution, no pivoting.
    pub fn solve(&self) -> Result<DVector<f64>, SolverError> {
        let n = self.len();
        if n == 0 {
            return Err(SolverError::InvalidParameter(
                "Tridiagonal system must have at least one row".to_string(),
            ));
        }
        let (a, b, c, d) = (&self.a, &self.b, &self.c, &self.d);

        let mut p = DVector::<f64>::zeros(n);
        let mut q = DVector::<f64>::zeros(n);

        check_pivot(0, b[0])?;
        p[0] = -c[0] / b[0];
        q[0] = d[0] / b[0];

        for k in 1..n {
            let denom = b[k] + a[k] * p[k - 1];
            check_pivot(k, denom)?;
            p[k] = -c[k] / denom;
            q[k] = (d[k] - a[k] * q[k - 1]) / denom;
        }

        let mut phi = DVector::<f64>::zeros(n);
        phi[n - 1] = q[n - 1];
        for k in (0..n - 1).rev() {
            phi[k] = p[k] * phi[k + 1] + q[k];
        }
        Ok(phi)
    }

    /// `A·φ - d`, ignoring the out-of-range `a[0]` and `c[n-1]` terms.
    pub fn residual(&self, phi: &DVector<f64>) -> DVector<f64> {
        let n = self.len();
        DVector::from_fn(n, |k, _| {
            let mut lhs = self.b[k] * phi[k];
            if k > 0 {
                lhs += self.a[k] * phi[k - 1];
            }
            if k + 1 < n {
                lhs += self.c[k] * phi[k + 1];
            }
            lhs - self.d[k]
        })
    }
}

fn check_pivot(row: usize, pivot: f64) -> Result<(), SolverError> {
    if !pivot.is_finite() || pivot.abs() < PIVOT_EPSILON {
        return Err(SolverError::SingularSystem { row, pivot });
    }
    Ok(())
}

/// Free-function form over plain slices.
pub fn thomas_solve(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> Result<Vec<f64>, SolverError> {
    let system = TridiagonalSystem::new(
        DVector::from_column_slice(a),
        DVector::from_column_slice(b),
        DVector::from_column_slice(c),
        DVector::from_column_slice(d),
    )?;
    Ok(system.solve()?.as_slice().to_vec())
}
