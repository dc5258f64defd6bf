//! The fixed set of recognized life-forms.
//!
//! Templates are listed in priority order. Each one is a conjunction of
//! "alive" assertions at offsets `(drow, dcol)` from an anchor cell, which is
//! the top-left corner of the template's bounding box. Cells that are not
//! listed are unconstrained, so a template also matches inside larger
//! structures.
use crate::Grid;

/// Relative position `(drow, dcol)` of an asserted cell.
pub type Offset = (usize, usize);

/// Named entities of the catalogue, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Entity {
    Block,
    Beehive,
    Loaf,
    Boat,
    Tub,
    Blinker,
    Toad,
    Beacon,
    Glider,
    LightweightSpaceship,
}

impl Entity {
    pub const COUNT: usize = 10;

    pub const ALL: [Entity; Self::COUNT] = [
        Entity::Block,
        Entity::Beehive,
        Entity::Loaf,
        Entity::Boat,
        Entity::Tub,
        Entity::Blinker,
        Entity::Toad,
        Entity::Beacon,
        Entity::Glider,
        Entity::LightweightSpaceship,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Entity::Block => "Block",
            Entity::Beehive => "Beehive",
            Entity::Loaf => "Loaf",
            Entity::Boat => "Boat",
            Entity::Tub => "Tub",
            Entity::Blinker => "Blinker",
            Entity::Toad => "Toad",
            Entity::Beacon => "Beacon",
            Entity::Glider => "Glider",
            Entity::LightweightSpaceship => "Lightweight spaceship",
        }
    }

    /// Position of the entity in the catalogue.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn template(self) -> &'static PatternTemplate {
        &CATALOGUE[self.index()]
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A fixed-shape predicate over a window of the grid.
#[derive(Debug)]
pub struct PatternTemplate {
    pub entity: Entity,
    /// `None` for entities that are declared but never matched.
    shape: Option<&'static [Offset]>,
    /// Bounding box `(rows, cols)` of `shape`.
    extent: (usize, usize),
}

impl PatternTemplate {
    const fn new(entity: Entity, shape: &'static [Offset]) -> Self {
        let mut extent = (0, 0);
        let mut k = 0;
        while k < shape.len() {
            let (di, dj) = shape[k];
            if di + 1 > extent.0 {
                extent.0 = di + 1;
            }
            if dj + 1 > extent.1 {
                extent.1 = dj + 1;
            }
            k += 1;
        }
        Self {
            entity,
            shape: Some(shape),
            extent,
        }
    }

    const fn shapeless(entity: Entity) -> Self {
        Self {
            entity,
            shape: None,
            extent: (0, 0),
        }
    }

    pub fn shape(&self) -> Option<&'static [Offset]> {
        self.shape
    }

    /// Bounding box `(rows, cols)` of the asserted cells.
    pub fn extent(&self) -> (usize, usize) {
        self.extent
    }

    /// Tests the template at anchor `(i, j)`.
    ///
    /// Matching does not wrap around: an anchor whose window runs past the
    /// bottom or right edge of the grid never matches.
    pub fn matches(&self, grid: &Grid, i: usize, j: usize) -> bool {
        let Some(shape) = self.shape else {
            return false;
        };
        let (rows, cols) = self.extent;
        if i + rows > grid.height() || j + cols > grid.width() {
            return false;
        }
        shape
            .iter()
            .all(|&(di, dj)| grid.get((i + di) as isize, (j + dj) as isize).is_alive())
    }
}

/// All templates in priority order; `CATALOGUE[e.index()].entity == e`.
pub static CATALOGUE: [PatternTemplate; Entity::COUNT] = [
    PatternTemplate::new(Entity::Block, &[(0, 0), (0, 1), (1, 0), (1, 1)]),
    // vertical
    PatternTemplate::new(
        Entity::Beehive,
        &[(0, 1), (1, 0), (1, 2), (2, 0), (2, 2), (3, 1)],
    ),
    PatternTemplate::new(
        Entity::Loaf,
        &[(0, 1), (1, 0), (1, 2), (2, 0), (2, 3), (3, 1), (3, 2)],
    ),
    // a tub plus its top-left corner, so it must come before Tub
    PatternTemplate::new(Entity::Boat, &[(0, 0), (0, 1), (1, 0), (1, 2), (2, 1)]),
    PatternTemplate::new(Entity::Tub, &[(0, 1), (1, 0), (1, 2), (2, 1)]),
    // horizontal phase only
    PatternTemplate::new(Entity::Blinker, &[(0, 0), (0, 1), (0, 2)]),
    PatternTemplate::new(
        Entity::Toad,
        &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    ),
    PatternTemplate::shapeless(Entity::Beacon),
    PatternTemplate::shapeless(Entity::Glider),
    PatternTemplate::shapeless(Entity::LightweightSpaceship),
];
