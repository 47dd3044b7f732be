//! Direct sparse solve of the interior five-point Laplace system.
//!
//! Used as the exact discrete answer that the iterative schemes converge to.

use rsparse::data::{Sprs, Trpl};
use rsparse::lusol;
use tracing::{debug, warn};

use crate::domain::grid2d::TemperatureField;
use crate::error::SolverError;
use crate::solver::check_field;

/// Column-major index of interior node `(i, j)`.
fn interior_index(i: usize, j: usize, mx: usize) -> usize {
    (i - 1) + (j - 1) * mx
}

/// Builds the `mx*my` square matrix with `-4` on the diagonal and `1` for
/// every interior neighbour; boundary neighbours go to the right-hand side.
fn construct_laplace_matrix_sparse(mx: usize, my: usize) -> Result<Sprs<f64>, SolverError> {
    let n = mx * my;
    let mut collected_triplets: Vec<(usize, usize, f64)> = Vec::with_capacity(5 * n);

    for j in 1..=my {
        for i in 1..=mx {
            let k = interior_index(i, j, mx);
            collected_triplets.push((k, k, -4.0));
            if i > 1 { collected_triplets.push((k, interior_index(i - 1, j, mx), 1.0)); }
            if i < mx { collected_triplets.push((k, interior_index(i + 1, j, mx), 1.0)); }
            if j > 1 { collected_triplets.push((k, interior_index(i, j - 1, mx), 1.0)); }
            if j < my { collected_triplets.push((k, interior_index(i, j + 1, mx), 1.0)); }
        }
    }

    let num_triplets = collected_triplets.len();
    let mut trpl_mat = Trpl::<f64> {
        m: n,
        n,
        p: Vec::with_capacity(num_triplets), // column indices
        i: Vec::with_capacity(num_triplets), // row indices
        x: Vec::with_capacity(num_triplets),
    };
    for (row_idx, col_idx, value) in collected_triplets.iter() {
        trpl_mat.i.push(*row_idx);
        trpl_mat.p.push(*col_idx as isize);
        trpl_mat.x.push(*value);
    }

    let mut sprs_mat = Sprs::<f64>::new();
    sprs_mat.from_trpl(&trpl_mat);

    if sprs_mat.m != n || sprs_mat.n != n {
        return Err(SolverError::DirectSolve(format!(
            "Sparse matrix conversion gave {}x{}, expected {}x{}",
            sprs_mat.m, sprs_mat.n, n, n
        )));
    }
    Ok(sprs_mat)
}

/// Returns a copy of `field` with the interior replaced by the exact solution
/// of the discrete Laplace equation for its boundary values.
pub fn solve_laplace_direct(field: &TemperatureField) -> Result<TemperatureField, SolverError> {
    check_field(field)?;
    let (nx, ny) = field.shape();
    let (mx, my) = (nx - 2, ny - 2);

    let mut f = vec![0.0; mx * my];
    for j in 1..=my {
        for i in 1..=mx {
            let mut rhs = 0.0;
            if i == 1 { rhs -= field[(0, j)]; }
            if i == mx { rhs -= field[(nx - 1, j)]; }
            if j == 1 { rhs -= field[(i, 0)]; }
            if j == my { rhs -= field[(i, ny - 1)]; }
            f[interior_index(i, j, mx)] = rhs;
        }
    }

    if mx * my == 1 {
        // rsparse's ordering step cannot handle a 1x1 matrix: -4u = rhs
        f[0] /= -4.0;
    } else {
        let a_sparse = construct_laplace_matrix_sparse(mx, my)?;
        if let Err(error_code) = lusol(&a_sparse, &mut f, 1, 1e-10) {
            return Err(SolverError::DirectSolve(format!(
                "Sparse LU solver failed with error code: {}",
                error_code
            )));
        }
    }
    if f.iter().any(|v| !v.is_finite()) {
        warn!("Direct Laplace solve produced non-finite values");
        return Err(SolverError::DirectSolve("solution contains NaN or Inf".to_string()));
    }
    debug!("Direct Laplace solve finished for {} unknowns", mx * my);

    let mut solution = field.clone();
    for j in 1..=my {
        for i in 1..=mx {
            solution[(i, j)] = f[interior_index(i, j, mx)];
        }
    }
    Ok(solution)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::bc2d::DirichletBoundary;
    use crate::config::{Method, SolverConfig};
    use crate::domain::grid2d::Grid2D;
    use crate::solver::solve;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn reference_field(nx: usize, ny: usize) -> TemperatureField {
        let grid = Grid2D::uniform(nx, ny, 1.0, 1.0).unwrap();
        DirichletBoundary::reference().initial_field(&grid, 0.0).unwrap()
    }

    #[test]
    fn test_single_interior_node() {
        let grid = Grid2D::uniform(3, 3, 1.0, 1.0).unwrap();
        let field = DirichletBoundary::uniform(10.0, 20.0, 30.0, 40.0).initial_field(&grid, 0.0).unwrap();
        let t = solve_laplace_direct(&field).unwrap();
        assert_relative_eq!(t[(1, 1)], 25.0, epsilon = 1e-10);
    }

    #[test]
    fn test_single_row_and_column_strips() {
        // Grids with a single interior row or column, and the smallest 2x2 interior.
        for (nx, ny) in [(3, 4), (4, 3), (3, 10), (10, 3), (4, 4)] {
            let field = reference_field(nx, ny);
            let t = solve_laplace_direct(&field).unwrap();
            for i in 1..nx - 1 {
                for j in 1..ny - 1 {
                    let avg = (t[(i - 1, j)] + t[(i + 1, j)] + t[(i, j - 1)] + t[(i, j + 1)]) / 4.0;
                    assert_abs_diff_eq!(t[(i, j)], avg, epsilon = 1e-9);
                }
            }
        }
        let t = solve_laplace_direct(&reference_field(3, 4)).unwrap();
        assert_relative_eq!(t[(1, 1)], 100.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(t[(1, 2)], 100.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_uniform_boundary_gives_uniform_interior() {
        let grid = Grid2D::uniform(7, 6, 1.0, 1.0).unwrap();
        let field = DirichletBoundary::uniform(42.0, 42.0, 42.0, 42.0).initial_field(&grid, -1.0).unwrap();
        let t = solve_laplace_direct(&field).unwrap();
        assert_relative_eq!(t, grid.field_filled(42.0), epsilon = 1e-9);
    }

    #[test]
    fn test_satisfies_five_point_stencil() {
        let t = solve_laplace_direct(&reference_field(9, 13)).unwrap();
        for i in 1..8 {
            for j in 1..12 {
                let avg = (t[(i - 1, j)] + t[(i + 1, j)] + t[(i, j - 1)] + t[(i, j + 1)]) / 4.0;
                assert_abs_diff_eq!(t[(i, j)], avg, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_iterative_schemes_match_direct() {
        let field = reference_field(20, 20);
        let exact = solve_laplace_direct(&field).unwrap();
        for method in [Method::Adi, Method::Relaxation] {
            let result = solve(field.clone(), &SolverConfig::with_method(method))
                .unwrap()
                .into_converged()
                .unwrap();
            assert_abs_diff_eq!(result.field, exact, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_rejects_field_without_interior() {
        let field = TemperatureField::zeros(2, 4);
        assert!(matches!(solve_laplace_direct(&field), Err(SolverError::InvalidGrid(_))));
    }
}
