use crate::{ClassificationResult, Grid};
use anyhow::Result;

/// Consumer of grid snapshots, called once per generation.
pub trait Renderer {
    /// Displays a fully computed generation.
    ///
    /// # Parameters
    /// * `generation` - 0-based index of `grid`; the seed is generation 0
    ///   and is never passed here, the first call receives generation 1.
    /// * `grid` - Read-only snapshot; the renderer has no way to feed back
    ///   into the simulation.
    ///
    /// # Errors
    ///
    /// Output failures are propagated and stop the run.
    fn render(&mut self, generation: u64, grid: &Grid) -> Result<()>;
}

/// Consumer of per-generation classification results.
pub trait Reporter {
    /// Records the census of one generation.
    ///
    /// # Parameters
    /// * `generation` - 0-based index of the classified grid. Classification
    ///   happens on the snapshot entering a step, so the first call receives
    ///   generation 0 (the seed).
    /// * `result` - Counts for every catalogue entity, not cumulative.
    fn report(&mut self, generation: u64, result: &ClassificationResult) -> Result<()>;

    /// Called once after the last generation.
    ///
    /// The default implementation does nothing.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, generation: u64, grid: &Grid) -> Result<()> {
        (**self).render(generation, grid)
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, generation: u64, result: &ClassificationResult) -> Result<()> {
        (**self).report(generation, result)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}
