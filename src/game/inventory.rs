//! Tile inventory: what is left in the bag
//!
//! Counts start from the catalog's original distribution and only ever go
//! down until the next reset.

use rand::Rng;
use std::collections::BTreeMap;

use super::catalog::Catalog;

/// Remaining tile count per letter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    remaining: BTreeMap<char, u32>,
}

impl Inventory {
    /// A full bag for the given catalog.
    pub fn full(catalog: &Catalog) -> Self {
        let mut inventory = Self::default();
        inventory.reset(catalog);
        inventory
    }

    /// Refill every letter to its original count, replacing all prior state.
    pub fn reset(&mut self, catalog: &Catalog) {
        self.remaining = catalog
            .entries()
            .map(|(letter, entry)| (letter, entry.original_distribution))
            .collect();
    }

    /// Draw up to `n` tiles uniformly at random without replacement.
    ///
    /// Each remaining unit is one candidate, so letters are weighted by their
    /// remaining count. Returns fewer than `n` letters when the bag runs
    /// short, and nothing at all when it is empty.
    pub fn draw<R: Rng>(&mut self, n: usize, rng: &mut R) -> Vec<char> {
        let mut candidates: Vec<char> = self
            .remaining
            .iter()
            .flat_map(|(&letter, &count)| std::iter::repeat_n(letter, count as usize))
            .collect();

        let to_draw = n.min(candidates.len());
        let mut drawn = Vec::with_capacity(to_draw);

        for _ in 0..to_draw {
            let index = rng.random_range(0..candidates.len());
            let letter = candidates.swap_remove(index);
            if let Some(count) = self.remaining.get_mut(&letter) {
                *count -= 1;
            }
            drawn.push(letter);
        }

        drawn
    }

    /// Tiles of `letter` still in the bag.
    pub fn remaining(&self, letter: char) -> u32 {
        self.remaining.get(&letter).copied().unwrap_or(0)
    }

    /// Total tiles still in the bag.
    pub fn total_remaining(&self) -> u32 {
        self.remaining.values().sum()
    }

    /// Check if the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.total_remaining() == 0
    }
}
