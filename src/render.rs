use crate::{CellState, Grid, Renderer};
use anyhow::Result;
use std::io::Write;

/// Writes every generation as text: a `Generation N` line, then one line per
/// row with `O` for alive and `.` for dead cells.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, generation: u64, grid: &Grid) -> Result<()> {
        writeln!(self.out, "Generation {}", generation)?;
        for row in grid.rows() {
            let line = row
                .iter()
                .map(|&c| if c == CellState::Alive { 'O' } else { '.' })
                .collect::<String>();
            writeln!(self.out, "{}", line)?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}

/// Keeps a copy of every rendered generation.
#[derive(Default)]
pub struct FrameRecorder {
    pub frames: Vec<(u64, Grid)>,
}

impl Renderer for FrameRecorder {
    fn render(&mut self, generation: u64, grid: &Grid) -> Result<()> {
        self.frames.push((generation, grid.clone()));
        Ok(())
    }
}

/// Discards every frame.
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _generation: u64, _grid: &Grid) -> Result<()> {
        Ok(())
    }
}
