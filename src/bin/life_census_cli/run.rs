use crate::util::{local_time, print_population};
use anyhow::{anyhow, Context, Result};
use clap::Args;
use life_census::{
    Grid, NullRenderer, Renderer, SeedConfig, Simulation, TableReporter, TextRenderer, VERSION,
};
use std::fs::File;
use std::io::{BufWriter, Write};

#[derive(Args, Debug)]
pub(super) struct RunArgs {
    /// Path to the seed file; supports the plain format and .rle, optionally gzipped
    seed: Option<String>,

    /// The number of generations to run; overrides the count stored in the seed
    #[arg(short, long)]
    generations: Option<u64>,

    /// Path to the file where the census report will be saved, stdout by default
    #[arg(short, long)]
    report: Option<String>,

    /// Print every generation as text
    #[arg(long)]
    render: bool,

    /// Start from a random NxN field instead of a seed file; needs --generations
    #[arg(long, conflicts_with = "seed", requires = "generations")]
    random: Option<usize>,

    /// Probability of a cell being alive in a random field
    #[arg(long, default_value_t = 0.2)]
    density: f64,

    /// Seed of the random number generator, from the OS by default
    #[arg(long)]
    rng_seed: Option<u64>,

    /// Put a glider with its top-left corner at (1, 1) before running
    #[arg(long)]
    glider: bool,
}

fn load_grid(args: &RunArgs) -> Result<(Grid, u64)> {
    match (&args.seed, args.random) {
        (Some(path), _) => {
            let seed = SeedConfig::from_file(path, args.generations)?;
            Ok((Grid::from_seed(&seed)?, seed.generations))
        }
        (None, Some(n)) => {
            let grid = Grid::random(n, n, args.density, args.rng_seed)?;
            let generations = args
                .generations
                .ok_or_else(|| anyhow!("--random needs --generations"))?;
            Ok((grid, generations))
        }
        (None, None) => Err(anyhow!("Either a seed file or --random must be given")),
    }
}

pub(super) fn run_simulation(args: RunArgs) -> Result<()> {
    let timer = std::time::Instant::now();
    let (mut grid, generations) = load_grid(&args)?;
    if args.glider {
        grid.stamp_glider(1, 1);
    }
    println!(
        "Loaded {}x{} field in {:.1} secs",
        grid.width(),
        grid.height(),
        timer.elapsed().as_secs_f64()
    );
    print_population(&grid)?;

    let out: Box<dyn Write> = match &args.report {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path))?,
        )),
        None => Box::new(std::io::stdout()),
    };
    let reporter = TableReporter::new(out)
        .with_title(format!("life_census {} report, started {}", VERSION, local_time()));
    let mut renderer: Box<dyn Renderer> = if args.render {
        Box::new(TextRenderer::new(std::io::stdout()))
    } else {
        Box::new(NullRenderer)
    };

    let timer = std::time::Instant::now();
    let mut simulation = Simulation::new(grid, generations);
    simulation.run(&mut *renderer, reporter)?;
    println!(
        "Simulated {} generations in {:.1} secs",
        simulation.generations(),
        timer.elapsed().as_secs_f64()
    );
    print_population(simulation.engine().current())?;
    if let Some(path) = &args.report {
        println!("Report saved to {}", path);
    }
    Ok(())
}
