mod census;
mod run;
mod util;

use anyhow::Result;
use census::{run_census, CensusArgs};
use clap::{Parser, Subcommand};
use run::{run_simulation, RunArgs};
use util::init_logger;

#[derive(Parser, Debug)]
#[command(version, about)]
struct CLIParser {
    /// Show more log messages on stderr: -v for progress, -vv for every generation
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Run the simulation and report the census of every generation
    Run(RunArgs),
    /// Print population and census of a seed without running it
    Census(CensusArgs),
}

fn main() -> Result<()> {
    let args = CLIParser::parse();
    init_logger(args.verbose)?;

    match args.action {
        Action::Run(args) => run_simulation(args),
        Action::Census(args) => run_census(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    #[test]
    fn test_verbosity_levels() {
        let args = CLIParser::try_parse_from(["life_census_cli", "census", "a.in"]).unwrap();
        assert_eq!(util::level_filter(args.verbose), LevelFilter::Warn);
        let args = CLIParser::try_parse_from(["life_census_cli", "-v", "census", "a.in"]).unwrap();
        assert_eq!(util::level_filter(args.verbose), LevelFilter::Info);
        let args =
            CLIParser::try_parse_from(["life_census_cli", "census", "a.in", "-vvv"]).unwrap();
        assert_eq!(util::level_filter(args.verbose), LevelFilter::Debug);
    }

    #[test]
    fn test_random_requires_generations() {
        assert!(CLIParser::try_parse_from(["life_census_cli", "run", "--random", "10"]).is_err());
        let args =
            CLIParser::try_parse_from(["life_census_cli", "run", "--random", "10", "-g", "5"])
                .unwrap();
        assert!(matches!(args.action, Action::Run(_)));
        assert!(
            CLIParser::try_parse_from(["life_census_cli", "run", "a.in", "--random", "10", "-g", "5"])
                .is_err()
        );
    }
}
