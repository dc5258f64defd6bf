use crate::{Entity, Grid, CATALOGUE};

/// Number of occurrences of every catalogue entity in one generation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassificationResult {
    counts: [u64; Entity::COUNT],
}

impl ClassificationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entity: Entity) -> u64 {
        self.counts[entity.index()]
    }

    pub(crate) fn increment(&mut self, entity: Entity) {
        self.counts[entity.index()] += 1;
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Iterates over `(entity, count)` in catalogue order, zero counts included.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, u64)> + '_ {
        Entity::ALL.iter().map(|&e| (e, self.counts[e.index()]))
    }
}

impl std::ops::Index<Entity> for ClassificationResult {
    type Output = u64;

    fn index(&self, entity: Entity) -> &u64 {
        &self.counts[entity.index()]
    }
}

impl FromIterator<(Entity, u64)> for ClassificationResult {
    fn from_iter<I: IntoIterator<Item = (Entity, u64)>>(iter: I) -> Self {
        let mut result = Self::new();
        for (entity, count) in iter {
            result.counts[entity.index()] += count;
        }
        result
    }
}

/// Counts catalogue entities in `grid`.
///
/// Every cell is an anchor, visited in row-major order. For each anchor the
/// templates are tried in catalogue order and only the first match is
/// counted, so an anchor contributes at most one occurrence. Matching does
/// not wrap around the edges (see [`crate::PatternTemplate::matches`]).
pub fn classify(grid: &Grid) -> ClassificationResult {
    let mut result = ClassificationResult::new();
    for i in 0..grid.height() {
        for j in 0..grid.width() {
            if let Some(template) = CATALOGUE.iter().find(|t| t.matches(grid, i, j)) {
                result.increment(template.entity);
            }
        }
    }
    result
}
