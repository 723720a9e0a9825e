//! The single-line board and its placement rule
//!
//! Placement only checks that a tile lands next to an existing one. Gaps
//! that appear later (a tile dragged out of the middle) are left for the
//! scorer to catch, which zeroes any span that is not continuous.

use std::fmt;

/// Number of squares on the board
pub const BOARD_SIZE: usize = 15;

/// Bonus granted by a special square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bonus {
    DoubleWord,
    DoubleLetter,
}

impl Bonus {
    /// Short label drawn on the square
    pub fn label(&self) -> &'static str {
        match self {
            Bonus::DoubleWord => "DW",
            Bonus::DoubleLetter => "DL",
        }
    }
}

/// Special squares by board index
const SPECIAL_SQUARES: [(usize, Bonus); 4] = [
    (2, Bonus::DoubleWord),
    (6, Bonus::DoubleLetter),
    (8, Bonus::DoubleLetter),
    (12, Bonus::DoubleWord),
];

/// The bonus at `index`, if the square is special.
pub fn bonus_at(index: usize) -> Option<Bonus> {
    SPECIAL_SQUARES
        .iter()
        .find(|(i, _)| *i == index)
        .map(|(_, bonus)| *bonus)
}

/// Identity of a dealt tile, unique within a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u64);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile-{}", self.0)
    }
}

/// A lettered tile. Its value is frozen when the tile is dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub letter: char,
    pub value: u32,
}

/// Board state: one optional tile per square.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    slots: [Option<Tile>; BOARD_SIZE],
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// The tile at `index`, if any (out of range reads as empty).
    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Check if the square at `index` holds a tile.
    pub fn is_occupied(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Number of squares holding a tile.
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Check if no square holds a tile.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// First and last occupied index, or `None` on an empty board.
    pub fn span(&self) -> Option<(usize, usize)> {
        let start = self.slots.iter().position(Option::is_some)?;
        let end = self.slots.iter().rposition(Option::is_some)?;
        Some((start, end))
    }

    /// Index of the square holding `id`.
    pub fn find(&self, id: TileId) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.as_ref().is_some_and(|t| t.id == id))
    }

    /// Whether a tile may be dropped at `index`.
    ///
    /// Any square is fine on an empty board. Otherwise the square to the left
    /// or right must be occupied.
    pub fn is_placement_valid(&self, index: usize) -> bool {
        if self.is_empty() {
            return true;
        }

        let left = index > 0 && self.is_occupied(index - 1);
        let right = self.is_occupied(index + 1);
        left || right
    }

    /// Put a tile on a square, returning whatever was there.
    ///
    /// Callers are expected to have checked range and placement.
    pub fn place(&mut self, index: usize, tile: Tile) -> Option<Tile> {
        self.slots[index].replace(tile)
    }

    /// Lift the tile off a square.
    pub fn take(&mut self, index: usize) -> Option<Tile> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Empty every square, returning the indices that held tiles.
    pub fn clear(&mut self) -> Vec<usize> {
        let mut cleared = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.take().is_some() {
                cleared.push(index);
            }
        }
        cleared
    }
}
