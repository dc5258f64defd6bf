use crate::{ConfigError, SeedConfig};
use anyhow::{anyhow, Result};
use rand::{Rng, SeedableRng};

/// State of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    /// Display intensity of the cell: 255 for alive cells, 0 for dead ones.
    pub fn intensity(self) -> u8 {
        match self {
            CellState::Alive => 255,
            CellState::Dead => 0,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

/// A rectangular field of cells whose opposite edges are stitched together.
///
/// Cells are addressed as `(row, col)`. Every signed coordinate is valid:
/// `(i, j)` is the same cell as `(i mod height, j mod width)`, so the
/// accessors never fail. The dimensions are fixed when the grid is created.
///
/// # Example
///
/// ```rust
/// use life_census::{CellState, Grid};
///
/// let mut grid = Grid::new(4, 3);
/// grid.set(0, 0, CellState::Alive);
/// assert_eq!(grid.get(3, -4), CellState::Alive);
/// assert_eq!(grid.neighbor_sum(-1, -1), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major cell storage, `height` rows of `width` cells.
    cells: Vec<CellState>,
}

impl Grid {
    /// Creates a `width x height` grid with every cell dead.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero; use [`Grid::from_seed`] for
    /// untrusted input.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![CellState::Dead; width * height],
        }
    }

    /// Builds the initial grid described by a seed configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the seed has a zero dimension or a cell
    /// outside the declared field.
    pub fn from_seed(seed: &SeedConfig) -> Result<Self, ConfigError> {
        seed.validate()?;
        let mut grid = Self::new(seed.width, seed.height);
        for &(row, col) in &seed.alive {
            grid.cells[row * seed.width + col] = CellState::Alive;
        }
        Ok(grid)
    }

    /// Creates a grid where each cell is alive with probability `density`.
    ///
    /// # Arguments
    ///
    /// * `seed` - Optional seed for the random number generator.
    ///   If None, seeds from the OS.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or `density` is not in `[0, 1]`.
    pub fn random(width: usize, height: usize, density: f64, seed: Option<u64>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ConfigError::NonPositiveDimension {
                width: width as i64,
                height: height as i64,
            }
            .into());
        }
        if !(0.0..=1.0).contains(&density) {
            return Err(anyhow!("density {} is not in [0, 1]", density));
        }
        let mut rng = if let Some(x) = seed {
            rand_chacha::ChaCha8Rng::seed_from_u64(x)
        } else {
            rand_chacha::ChaCha8Rng::from_os_rng()
        };
        let cells = (0..width * height)
            .map(|_| CellState::from(rng.random_bool(density)))
            .collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reduces `(i, j)` to `(i mod height, j mod width)`.
    #[inline]
    fn wrap(&self, i: isize, j: isize) -> (isize, isize) {
        (
            i.rem_euclid(self.height as isize),
            j.rem_euclid(self.width as isize),
        )
    }

    #[inline]
    fn index(&self, i: isize, j: isize) -> usize {
        let (row, col) = self.wrap(i, j);
        row as usize * self.width + col as usize
    }

    /// Returns the state of the cell at `(i mod height, j mod width)`.
    #[inline]
    pub fn get(&self, i: isize, j: isize) -> CellState {
        self.cells[self.index(i, j)]
    }

    /// Writes the cell at `(i mod height, j mod width)`.
    #[inline]
    pub fn set(&mut self, i: isize, j: isize, state: CellState) {
        let idx = self.index(i, j);
        self.cells[idx] = state;
    }

    /// Counts alive cells among the 8 toroidal neighbors of `(i, j)`.
    ///
    /// On grids narrower than 3 cells the same cell may be counted more than
    /// once, exactly as the wraparound dictates; the result never exceeds 8.
    pub fn neighbor_sum(&self, i: isize, j: isize) -> u8 {
        // offsets are applied to reduced coordinates so they cannot overflow
        let (i, j) = self.wrap(i, j);
        let mut sum = 0;
        for di in -1..=1 {
            for dj in -1..=1 {
                if (di, dj) != (0, 0) && self.get(i + di, j + dj).is_alive() {
                    sum += 1;
                }
            }
        }
        sum
    }

    /// Writes a glider `.O. / ..O / OOO` with its top-left corner at `(i, j)`,
    /// overwriting the whole 3x3 window.
    pub fn stamp_glider(&mut self, i: isize, j: isize) {
        let (i, j) = self.wrap(i, j);
        const GLIDER: [[bool; 3]; 3] = [
            [false, true, false],
            [false, false, true],
            [true, true, true],
        ];
        for (di, row) in GLIDER.iter().enumerate() {
            for (dj, &alive) in row.iter().enumerate() {
                self.set(i + di as isize, j + dj as isize, alive.into());
            }
        }
    }

    /// Returns a copy translated by `(dy, dx)` with wraparound, so that
    /// `shifted.get(i + dy, j + dx) == self.get(i, j)`.
    pub fn shifted(&self, dy: isize, dx: isize) -> Self {
        let (dy, dx) = self.wrap(dy, dx);
        let mut result = Self::new(self.width, self.height);
        for i in 0..self.height as isize {
            for j in 0..self.width as isize {
                result.set(i + dy, j + dx, self.get(i, j));
            }
        }
        result
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks(self.width)
    }

    /// Row `row` as a slice, `row` must be in `[0, height)`.
    pub(crate) fn row(&self, row: usize) -> &[CellState] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [CellState] {
        &mut self.cells[row * self.width..(row + 1) * self.width]
    }
}
