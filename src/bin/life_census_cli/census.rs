use crate::util::{print_census, print_population};
use anyhow::Result;
use clap::Args;
use life_census::{Grid, SeedConfig, Simulation};

#[derive(Args, Debug)]
pub(super) struct CensusArgs {
    /// Path to the seed file; supports the plain format and .rle, optionally gzipped
    seed: String,
}

pub(super) fn run_census(args: CensusArgs) -> Result<()> {
    let timer = std::time::Instant::now();
    let seed = SeedConfig::from_file(&args.seed, None)?;
    let grid = Grid::from_seed(&seed)?;
    println!("Field: {}x{}", grid.width(), grid.height());
    print_population(&grid)?;
    print_census(&Simulation::new(grid, 0).census())?;
    println!(
        "Computed census in {:.1} secs",
        timer.elapsed().as_secs_f64()
    );
    Ok(())
}
