use crate::{ClassificationResult, Reporter};
use anyhow::Result;
use std::io::Write;

/// Share of `count` in `total` as a whole percentage, rounded half up.
///
/// Ties always go up (`percentage(1, 8) == 13`); this is the convention of
/// the report, not round-half-to-even.
///
/// The denominator is `max(1, total)`, so an empty census yields 0 for every
/// entity instead of dividing by zero.
pub fn percentage(count: u64, total: u64) -> u64 {
    let total = total.max(1);
    (count * 200 + total) / (2 * total)
}

/// One line of a census table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CensusRow {
    pub name: &'static str,
    pub count: u64,
    pub percent: u64,
}

/// Rows for every catalogue entity in order, followed by a `Total` row that
/// is always reported as 100%.
pub fn census_rows(result: &ClassificationResult) -> Vec<CensusRow> {
    let total = result.total();
    result
        .iter()
        .map(|(entity, count)| CensusRow {
            name: entity.name(),
            count,
            percent: percentage(count, total),
        })
        .chain(std::iter::once(CensusRow {
            name: "Total",
            count: total,
            percent: 100,
        }))
        .collect()
}

/// Writes a human-readable table per generation.
pub struct TableReporter<W: Write> {
    out: W,
    title: Option<String>,
}

impl<W: Write> TableReporter<W> {
    const NAME_WIDTH: usize = 24;

    pub fn new(out: W) -> Self {
        Self { out, title: None }
    }

    /// Sets a line written once before the first table.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TableReporter<W> {
    fn report(&mut self, generation: u64, result: &ClassificationResult) -> Result<()> {
        if let Some(title) = self.title.take() {
            writeln!(self.out, "{}", title)?;
            writeln!(self.out)?;
        }
        writeln!(self.out, "Generation {}", generation)?;
        writeln!(
            self.out,
            "{:<width$}{:>10}{:>9}",
            "Entity",
            "Count",
            "Percent",
            width = Self::NAME_WIDTH
        )?;
        for row in census_rows(result) {
            writeln!(
                self.out,
                "{:<width$}{:>10}{:>8}%",
                row.name,
                row.count,
                row.percent,
                width = Self::NAME_WIDTH
            )?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps every reported census in memory.
#[derive(Default)]
pub struct CensusHistory {
    pub entries: Vec<(u64, ClassificationResult)>,
}

impl Reporter for CensusHistory {
    fn report(&mut self, generation: u64, result: &ClassificationResult) -> Result<()> {
        self.entries.push((generation, result.clone()));
        Ok(())
    }
}
