#![warn(clippy::all)]

mod catalogue;
mod classifier;
mod engine;
mod error;
mod grid;
mod loader;
mod render;
mod report;
mod simulation;
mod traits;

pub use catalogue::{Entity, Offset, PatternTemplate, CATALOGUE};
pub use classifier::{classify, ClassificationResult};
pub use engine::LifeEngine;
pub use error::ConfigError;
pub use grid::{CellState, Grid};
pub use loader::{SeedConfig, SeedFormat};
pub use render::{FrameRecorder, NullRenderer, TextRenderer};
pub use report::{census_rows, percentage, CensusHistory, CensusRow, TableReporter};
pub use simulation::Simulation;
pub use traits::{Renderer, Reporter};

pub const VERSION: &str = "0.1.0";
