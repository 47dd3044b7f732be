use nalgebra::DMatrix;
use crate::error::GridError;

/// Dense temperature field indexed `(i, j)`: axis 0 is the x-direction index,
/// axis 1 the y-direction index.
pub type TemperatureField = DMatrix<f64>;

/// Smallest number of nodes per axis that still leaves one interior line.
pub const MIN_NODES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridDimensions2D(pub usize, pub usize); // nx, ny (nodes, boundaries included)

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize2D(pub f64, pub f64); // dx, dy

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid2D {
    pub dimensions: GridDimensions2D,
    pub cell_size: CellSize2D,
}

impl Grid2D {
    /// Node layout for a 5 x 4 grid. `o` nodes carry fixed boundary values,
    /// `•` nodes are the interior unknowns.
    ///
    ///   j=0   1   2   3
    ///     o - o - o - o    i=0 (top)
    ///     |   |   |   |
    ///     o - • - • - o    i=1
    ///     |   |   |   |
    ///     o - • - • - o    i=2
    ///     |   |   |   |
    ///     o - • - • - o    i=3
    ///     |   |   |   |
    ///     o - o - o - o    i=4 (bottom)
    pub fn new(dimensions: GridDimensions2D, cell_size: CellSize2D) -> Result<Self, GridError> {
        let GridDimensions2D(nx, ny) = dimensions;
        if nx < MIN_NODES || ny < MIN_NODES {
            return Err(GridError::InvalidGridSize(format!(
                "Grid dimensions ({}, {}) must be at least {}x{} to contain an interior node.",
                nx, ny, MIN_NODES, MIN_NODES
            )));
        }
        let CellSize2D(dx, dy) = cell_size;
        if !(dx > 0.0 && dx.is_finite()) || !(dy > 0.0 && dy.is_finite()) {
            return Err(GridError::InvalidSpacing(format!(
                "Cell size ({}, {}) must be positive and finite.",
                dx, dy
            )));
        }
        Ok(Self { dimensions, cell_size })
    }

    /// Uniform grid of `nx` x `ny` nodes spanning an `lx` x `ly` rectangle.
    pub fn uniform(nx: usize, ny: usize, lx: f64, ly: f64) -> Result<Self, GridError> {
        if nx < MIN_NODES || ny < MIN_NODES {
            return Err(GridError::InvalidGridSize(format!(
                "Grid dimensions ({}, {}) must be at least {}x{} to contain an interior node.",
                nx, ny, MIN_NODES, MIN_NODES
            )));
        }
        let dx = lx / (nx - 1) as f64;
        let dy = ly / (ny - 1) as f64;
        Self::new(GridDimensions2D(nx, ny), CellSize2D(dx, dy))
    }

    pub fn nx(&self) -> usize {
        self.dimensions.0
    }

    pub fn ny(&self) -> usize {
        self.dimensions.1
    }

    pub fn interior_count(&self) -> usize {
        (self.nx() - 2) * (self.ny() - 2)
    }

    pub fn x_coords(&self) -> Vec<f64> {
        let dx = self.cell_size.0;
        (0..self.nx()).map(|i| i as f64 * dx).collect()
    }

    pub fn y_coords(&self) -> Vec<f64> {
        let dy = self.cell_size.1;
        (0..self.ny()).map(|j| j as f64 * dy).collect()
    }

    /// Field of the grid's shape with every node set to `value`.
    pub fn field_filled(&self, value: f64) -> TemperatureField {
        TemperatureField::from_element(self.nx(), self.ny(), value)
    }

    pub fn is_boundary(&self, i: usize, j: usize) -> bool {
        i == 0 || j == 0 || i == self.nx() - 1 || j == self.ny() - 1
    }
}
