use crate::{CellState, Grid};

/// Dense B3/S23 engine over a toroidal [`Grid`].
///
/// The engine owns two buffers of the same shape. [`LifeEngine::step`] reads
/// only the current buffer, writes every cell of the other one and then swaps
/// them, so a snapshot obtained through [`LifeEngine::current`] is always a
/// complete generation. Buffers are allocated once, in [`LifeEngine::new`].
///
/// # Example
///
/// ```rust
/// use life_census::{CellState, Grid, LifeEngine};
///
/// let mut grid = Grid::new(5, 5);
/// for j in 1..4 {
///     grid.set(2, j, CellState::Alive);
/// }
/// let mut engine = LifeEngine::new(grid.clone());
/// engine.advance(2);
/// assert_eq!(engine.current(), &grid);
/// assert_eq!(engine.generation(), 2);
/// ```
pub struct LifeEngine {
    curr: Grid,
    next: Grid,
    generation: u64,
}

impl LifeEngine {
    pub fn new(grid: Grid) -> Self {
        let next = Grid::new(grid.width(), grid.height());
        Self {
            curr: grid,
            next,
            generation: 0,
        }
    }

    /// The Life rule for one cell.
    #[inline]
    pub fn rule(state: CellState, neighbors: u8) -> CellState {
        match (state, neighbors) {
            (CellState::Alive, 2 | 3) => CellState::Alive,
            (CellState::Dead, 3) => CellState::Alive,
            _ => CellState::Dead,
        }
    }

    fn update_row(
        row_prev: &[CellState],
        row_curr: &[CellState],
        row_next: &[CellState],
        dst: &mut [CellState],
    ) {
        let w = row_curr.len();
        let alive = |row: &[CellState], x: usize| row[x].is_alive() as u8;

        for x in 0..w {
            let (x1, x2) = ((x + w - 1) % w, (x + 1) % w);
            let sum = alive(row_prev, x1)
                + alive(row_prev, x)
                + alive(row_prev, x2)
                + alive(row_curr, x1)
                + alive(row_curr, x2)
                + alive(row_next, x1)
                + alive(row_next, x)
                + alive(row_next, x2);
            dst[x] = Self::rule(row_curr[x], sum);
        }
    }

    fn update_inner(&mut self) {
        let h = self.curr.height();
        for y in 0..h {
            let (y1, y2) = ((y + h - 1) % h, (y + 1) % h);
            Self::update_row(
                self.curr.row(y1),
                self.curr.row(y),
                self.curr.row(y2),
                self.next.row_mut(y),
            );
        }
        std::mem::swap(&mut self.curr, &mut self.next);
        self.generation += 1;
    }

    /// Advances the field by one generation.
    pub fn step(&mut self) {
        self.update_inner();
    }

    /// Advances the field by `generations` generations.
    pub fn advance(&mut self, generations: u64) {
        for _ in 0..generations {
            self.update_inner();
        }
    }

    /// The current, fully computed generation.
    pub fn current(&self) -> &Grid {
        &self.curr
    }

    /// Number of steps taken since the engine was created.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Approximate heap memory usage of both buffers in bytes.
    pub fn bytes_total(&self) -> usize {
        2 * self.curr.width() * self.curr.height() * size_of::<CellState>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const SEED: u64 = 42;

    fn grid_with(width: usize, height: usize, cells: &[(isize, isize)]) -> Grid {
        let mut grid = Grid::new(width, height);
        for &(i, j) in cells {
            grid.set(i, j, CellState::Alive);
        }
        grid
    }

    /// Applies the rule cell by cell through `Grid::neighbor_sum`.
    fn naive_step(grid: &Grid) -> Grid {
        let mut result = Grid::new(grid.width(), grid.height());
        for i in 0..grid.height() as isize {
            for j in 0..grid.width() as isize {
                let state = LifeEngine::rule(grid.get(i, j), grid.neighbor_sum(i, j));
                result.set(i, j, state);
            }
        }
        result
    }

    #[test]
    fn test_rule_table() {
        for n in 0..=8 {
            let survives = LifeEngine::rule(CellState::Alive, n);
            let born = LifeEngine::rule(CellState::Dead, n);
            assert_eq!(survives.is_alive(), n == 2 || n == 3, "alive with {n}");
            assert_eq!(born.is_alive(), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn test_matches_naive_rule() {
        for (w, h) in [(1, 1), (2, 2), (3, 7), (16, 16), (31, 17)] {
            let grid = Grid::random(w, h, 0.35, Some(SEED)).unwrap();
            let mut expected = grid.clone();
            let mut engine = LifeEngine::new(grid);
            for _ in 0..8 {
                expected = naive_step(&expected);
                engine.step();
                assert_eq!(engine.current(), &expected, "size {w}x{h}");
            }
        }
    }

    #[test]
    fn test_determinism() {
        let grid = Grid::random(40, 30, 0.3, Some(SEED)).unwrap();
        let mut a = LifeEngine::new(grid.clone());
        let mut b = LifeEngine::new(grid);
        a.advance(25);
        b.advance(25);
        assert_eq!(a.current(), b.current());
    }

    #[test]
    fn test_block_is_still_life() {
        let block = grid_with(6, 6, &[(2, 2), (2, 3), (3, 2), (3, 3)]);
        let mut engine = LifeEngine::new(block.clone());
        engine.step();
        assert_eq!(engine.current(), &block);
    }

    #[test]
    fn test_blinker_has_period_two() {
        let blinker = grid_with(7, 7, &[(3, 2), (3, 3), (3, 4)]);
        let mut engine = LifeEngine::new(blinker.clone());
        engine.step();
        assert_eq!(
            engine.current(),
            &grid_with(7, 7, &[(2, 3), (3, 3), (4, 3)])
        );
        engine.step();
        assert_eq!(engine.current(), &blinker);
    }

    #[test]
    fn test_glider_crosses_the_seam() {
        let mut grid = Grid::new(8, 8);
        grid.stamp_glider(0, 0);
        let mut engine = LifeEngine::new(grid.clone());
        // a glider moves by (1, 1) every 4 generations
        engine.advance(32);
        assert_eq!(engine.current(), &grid);
        assert_eq!(engine.current().population(), 5);
    }
}
