use anyhow::{anyhow, Result};
use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record};
use life_census::{census_rows, ClassificationResult, Grid};
use num_format::{CustomFormat, Grouping, ToFormattedString};

fn number_format() -> Result<CustomFormat> {
    Ok(CustomFormat::builder()
        .grouping(Grouping::Standard)
        .separator("_")
        .build()?)
}

pub(super) fn print_population(grid: &Grid) -> Result<()> {
    let fmt = number_format()?;
    println!(
        "Population: {} of {} cells",
        grid.population().to_formatted_string(&fmt),
        (grid.width() * grid.height()).to_formatted_string(&fmt)
    );
    Ok(())
}

pub(super) fn print_census(result: &ClassificationResult) -> Result<()> {
    let fmt = number_format()?;
    for row in census_rows(result) {
        println!(
            "{:<24}{:>12}{:>5}%",
            row.name,
            row.count.to_formatted_string(&fmt),
            row.percent
        );
    }
    Ok(())
}

pub(super) fn local_time() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}

/// Writes log records of the library to stderr, so they do not mix with
/// a report printed to stdout.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{} {}] {}", local_time(), record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Maps the number of `-v` flags to a level filter.
pub(super) fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => Level::Warn.to_level_filter(),
        1 => Level::Info.to_level_filter(),
        _ => Level::Debug.to_level_filter(),
    }
}

pub(super) fn init_logger(verbose: u8) -> Result<()> {
    log::set_logger(&LOGGER).map_err(|e| anyhow!("Failed to install logger: {}", e))?;
    log::set_max_level(level_filter(verbose));
    Ok(())
}
