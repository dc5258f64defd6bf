use crate::{classify, ClassificationResult, ConfigError, Grid, LifeEngine, Renderer, Reporter, SeedConfig};
use anyhow::Result;

/// Runs the engine for a fixed number of generations and feeds the
/// collaborators.
///
/// Each step classifies the generation the engine currently holds, then
/// advances it. The census of generation `t` is therefore taken from the
/// complete pre-update snapshot and reported as `t`, while the renderer
/// receives the freshly computed generation `t + 1`. A run of `n`
/// generations reports generations `0..n` and renders `1..=n`.
///
/// # Example
///
/// ```rust
/// use life_census::{CensusHistory, Entity, FrameRecorder, SeedConfig, Simulation};
///
/// let seed = SeedConfig {
///     width: 5,
///     height: 5,
///     generations: 1,
///     alive: vec![(1, 1), (1, 2), (2, 1), (2, 2)],
/// };
/// let mut simulation = Simulation::from_seed(&seed).unwrap();
/// let (mut frames, mut history) = (FrameRecorder::default(), CensusHistory::default());
/// simulation.run(&mut frames, &mut history).unwrap();
/// assert_eq!(history.entries[0].1[Entity::Block], 1);
/// ```
pub struct Simulation {
    engine: LifeEngine,
    generations: u64,
}

impl Simulation {
    pub fn new(grid: Grid, generations: u64) -> Self {
        Self {
            engine: LifeEngine::new(grid),
            generations,
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] if the seed does not describe a valid field.
    pub fn from_seed(seed: &SeedConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(Grid::from_seed(seed)?, seed.generations))
    }

    pub fn engine(&self) -> &LifeEngine {
        &self.engine
    }

    /// Total length of the run.
    pub fn generations(&self) -> u64 {
        self.generations
    }

    /// Generations left before [`Simulation::run`] stops.
    pub fn remaining(&self) -> u64 {
        self.generations.saturating_sub(self.engine.generation())
    }

    /// Census of the generation the engine currently holds.
    pub fn census(&self) -> ClassificationResult {
        classify(self.engine.current())
    }

    /// Classifies the current generation, then advances by one.
    ///
    /// Returns the index of the classified generation with its census.
    pub fn step(&mut self) -> (u64, ClassificationResult) {
        let generation = self.engine.generation();
        let result = self.census();
        self.engine.step();
        log::debug!(
            "generation {}: {} entities, population {}",
            generation,
            result.total(),
            self.engine.current().population()
        );
        (generation, result)
    }

    /// Steps until the run length is reached, handing each census to
    /// `reporter` and each new generation to `renderer`.
    ///
    /// A caller may also drive [`Simulation::step`] directly and stop at any
    /// point between generations.
    ///
    /// # Errors
    ///
    /// Stops at the first collaborator error; generations completed so far
    /// are kept.
    pub fn run<R: Renderer, P: Reporter>(&mut self, mut renderer: R, mut reporter: P) -> Result<()> {
        log::info!(
            "running {} generations on a {}x{} torus",
            self.remaining(),
            self.engine.current().width(),
            self.engine.current().height()
        );
        while self.remaining() > 0 {
            let (generation, result) = self.step();
            reporter.report(generation, &result)?;
            renderer.render(self.engine.generation(), self.engine.current())?;
        }
        reporter.finish()?;
        log::info!("finished at generation {}", self.engine.generation());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellState, CensusHistory, Entity, FrameRecorder, NullRenderer};
    use anyhow::anyhow;

    fn blinker() -> Grid {
        let mut grid = Grid::new(7, 7);
        for j in 2..5 {
            grid.set(3, j, CellState::Alive);
        }
        grid
    }

    #[test]
    fn test_run_indexes() {
        let mut simulation = Simulation::new(blinker(), 4);
        let (mut frames, mut history) = (FrameRecorder::default(), CensusHistory::default());
        simulation.run(&mut frames, &mut history).unwrap();

        let reported: Vec<u64> = history.entries.iter().map(|(g, _)| *g).collect();
        let rendered: Vec<u64> = frames.frames.iter().map(|(g, _)| *g).collect();
        assert_eq!(reported, vec![0, 1, 2, 3]);
        assert_eq!(rendered, vec![1, 2, 3, 4]);
        assert_eq!(simulation.remaining(), 0);
        assert_eq!(simulation.engine().generation(), 4);
    }

    #[test]
    fn test_census_is_pre_update() {
        let mut simulation = Simulation::new(blinker(), 2);
        let mut history = CensusHistory::default();
        simulation.run(NullRenderer, &mut history).unwrap();
        // horizontal at even generations, vertical (not in the catalogue) at odd ones
        assert_eq!(history.entries[0].1[Entity::Blinker], 1);
        assert_eq!(history.entries[1].1.total(), 0);
        assert_eq!(simulation.census()[Entity::Blinker], 1);
    }

    #[test]
    fn test_run_is_resumable() {
        let mut simulation = Simulation::new(blinker(), 3);
        simulation.step();
        let mut history = CensusHistory::default();
        simulation.run(NullRenderer, &mut history).unwrap();
        assert_eq!(history.entries.len(), 2);
        assert_eq!(history.entries[0].0, 1);
        simulation.run(NullRenderer, &mut history).unwrap();
        assert_eq!(history.entries.len(), 2);
    }

    #[test]
    fn test_zero_generations() {
        let mut simulation = Simulation::new(blinker(), 0);
        let mut history = CensusHistory::default();
        simulation.run(NullRenderer, &mut history).unwrap();
        assert!(history.entries.is_empty());
        assert_eq!(simulation.engine().current(), &blinker());
    }

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn render(&mut self, generation: u64, _grid: &Grid) -> Result<()> {
            if generation == 2 {
                Err(anyhow!("display closed"))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_collaborator_error_stops_run() {
        let mut simulation = Simulation::new(blinker(), 5);
        let mut history = CensusHistory::default();
        assert!(simulation.run(FailingRenderer, &mut history).is_err());
        assert_eq!(simulation.engine().generation(), 2);
        assert_eq!(history.entries.len(), 2);
    }

    #[test]
    fn test_from_seed_rejects_invalid() {
        let seed = SeedConfig {
            width: 0,
            height: 4,
            generations: 1,
            alive: vec![],
        };
        assert!(matches!(
            Simulation::from_seed(&seed),
            Err(ConfigError::NonPositiveDimension { width: 0, height: 4 })
        ));
    }
}
