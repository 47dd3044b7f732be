use serde::{Deserialize, Serialize};
use crate::domain::grid2d::{Grid2D, TemperatureField};
use crate::error::BoundaryError;

/// Fixed value(s) held along one edge of the domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeValue {
    Uniform(f64),
    /// One value per node along the edge, corners included.
    Profile(Vec<f64>),
}

impl EdgeValue {
    fn value_at(&self, k: usize) -> f64 {
        match self {
            EdgeValue::Uniform(v) => *v,
            EdgeValue::Profile(values) => values[k],
        }
    }

    fn check_len(&self, edge: &'static str, expected: usize) -> Result<(), BoundaryError> {
        match self {
            EdgeValue::Uniform(_) => Ok(()),
            EdgeValue::Profile(values) if values.len() == expected => Ok(()),
            EdgeValue::Profile(values) => Err(BoundaryError::ProfileLength {
                edge,
                expected,
                actual: values.len(),
            }),
        }
    }
}

/// Dirichlet values on the four edges.
///
/// `left` is column `j = 0`, `right` is column `j = ny-1`, `top` is row `i = 0`
/// and `bottom` is row `i = nx-1`. Edges are written in that order, so the
/// corner nodes end up holding the `top`/`bottom` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirichletBoundary {
    pub left: EdgeValue,
    pub right: EdgeValue,
    pub top: EdgeValue,
    pub bottom: EdgeValue,
}

impl DirichletBoundary {
    pub fn uniform(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left: EdgeValue::Uniform(left),
            right: EdgeValue::Uniform(right),
            top: EdgeValue::Uniform(top),
            bottom: EdgeValue::Uniform(bottom),
        }
    }

    /// Heated top plate: left 0, right 0, top 100, bottom 0.
    pub fn reference() -> Self {
        Self::uniform(0.0, 0.0, 100.0, 0.0)
    }

    pub fn validate(&self, nx: usize, ny: usize) -> Result<(), BoundaryError> {
        self.left.check_len("left", nx)?;
        self.right.check_len("right", nx)?;
        self.top.check_len("top", ny)?;
        self.bottom.check_len("bottom", ny)?;
        Ok(())
    }

    /// Overwrites the edge nodes of `field`, leaving interior nodes untouched.
    pub fn apply(&self, field: &mut TemperatureField) -> Result<(), BoundaryError> {
        let (nx, ny) = field.shape();
        self.validate(nx, ny)?;

        for i in 0..nx { field[(i, 0)] = self.left.value_at(i); }
        for i in 0..nx { field[(i, ny - 1)] = self.right.value_at(i); }
        for j in 0..ny { field[(0, j)] = self.top.value_at(j); }
        for j in 0..ny { field[(nx - 1, j)] = self.bottom.value_at(j); }
        Ok(())
    }

    /// Builds the starting field: edges from `self`, interior set to `seed`.
    pub fn initial_field(&self, grid: &Grid2D, seed: f64) -> Result<TemperatureField, BoundaryError> {
        let mut field = grid.field_filled(seed);
        self.apply(&mut field)?;
        Ok(field)
    }
}

impl Default for DirichletBoundary {
    fn default() -> Self {
        Self::reference()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dmatrix;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_initial_field() {
        let grid = Grid2D::uniform(4, 5, 1.0, 1.0).unwrap();
        let field = DirichletBoundary::reference().initial_field(&grid, 0.0).unwrap();

        let expected = dmatrix![
            100.0, 100.0, 100.0, 100.0, 100.0;
              0.0,   0.0,   0.0,   0.0,   0.0;
              0.0,   0.0,   0.0,   0.0,   0.0;
              0.0,   0.0,   0.0,   0.0,   0.0
        ];
        assert_relative_eq!(field, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_corners_take_last_written_edge() {
        let grid = Grid2D::uniform(3, 3, 1.0, 1.0).unwrap();
        let bc = DirichletBoundary::uniform(1.0, 2.0, 3.0, 4.0);
        let field = bc.initial_field(&grid, -5.0).unwrap();

        let expected = dmatrix![
            3.0,  3.0, 3.0;
            1.0, -5.0, 2.0;
            4.0,  4.0, 4.0
        ];
        assert_relative_eq!(field, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_profile_edges() {
        let grid = Grid2D::uniform(3, 4, 1.0, 1.0).unwrap();
        let bc = DirichletBoundary {
            left: EdgeValue::Profile(vec![9.0, 8.0, 7.0]),
            right: EdgeValue::Uniform(0.5),
            top: EdgeValue::Profile(vec![1.0, 2.0, 3.0, 4.0]),
            bottom: EdgeValue::Uniform(0.0),
        };
        let field = bc.initial_field(&grid, 0.0).unwrap();
        assert_eq!(field[(1, 0)], 8.0);
        assert_eq!(field[(1, 3)], 0.5);
        assert_eq!(field[(0, 2)], 3.0);
        assert_eq!(field[(2, 1)], 0.0);
    }

    #[test]
    fn test_profile_length_mismatch() {
        let grid = Grid2D::uniform(3, 4, 1.0, 1.0).unwrap();
        let bc = DirichletBoundary {
            top: EdgeValue::Profile(vec![1.0, 2.0, 3.0]),
            ..DirichletBoundary::reference()
        };
        let err = bc.initial_field(&grid, 0.0).unwrap_err();
        assert_eq!(err, BoundaryError::ProfileLength { edge: "top", expected: 4, actual: 3 });
    }
}
