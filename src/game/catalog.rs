//! Tile catalog: letter values and the original tile distribution
//!
//! Embeds the standard English distribution at build time. Custom catalogs
//! can be loaded from a JSON file with the same layout:
//!
//! ```json
//! { "A": { "value": 1, "original-distribution": 9, "number-remaining": 9 } }
//! ```
//!
//! `number-remaining` is accepted for compatibility and ignored.

use derive_more::{Display, Error};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::board::BOARD_SIZE;
use super::{BLANK, RACK_CAPACITY};

/// Largest tile value accepted. A full board of such tiles, every one on a
/// double-letter square under two double-word squares, still fits in a `u32`.
pub const MAX_TILE_VALUE: u32 = u32::MAX / (BOARD_SIZE as u32 * 2 * 4);

/// Largest bag a catalog may describe
pub const MAX_TOTAL_TILES: u32 = 10_000;

/// Embedded standard distribution (100 tiles, two blanks)
static STANDARD_DATA: &str = include_str!("../../data/tiles.json");

/// Parsed once on first use
static STANDARD: Lazy<Result<Catalog, CatalogError>> =
    Lazy::new(|| Catalog::from_json(STANDARD_DATA));

/// Reasons a catalog cannot be used. All of them are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CatalogError {
    #[display("could not read tile catalog {path}: {message}")]
    Io { path: String, message: String },
    #[display("malformed tile catalog: {message}")]
    Parse { message: String },
    #[display("invalid catalog letter {key:?} (expected A-Z or '_')")]
    InvalidLetter { key: String },
    #[display("tile catalog has no blank ('_') entry")]
    MissingBlank,
    #[display("tile catalog holds {total} tiles, need at least {needed}")]
    TooFewTiles { total: u32, needed: u32 },
    #[display("tile catalog holds more than {max} tiles")]
    TooManyTiles { max: u32 },
    #[display("value {value} for letter {letter:?} exceeds {max}")]
    ValueTooLarge { letter: char, value: u32, max: u32 },
}

/// One letter's entry in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    /// Points scored by a tile of this letter
    pub value: u32,
    /// How many tiles of this letter a full bag holds
    #[serde(rename = "original-distribution")]
    pub original_distribution: u32,
}

/// Read-only letter → value/count reference data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<char, CatalogEntry>,
}

impl Catalog {
    /// The embedded standard English catalog.
    pub fn standard() -> Result<&'static Catalog, CatalogError> {
        let standard: &'static Result<Catalog, CatalogError> = &STANDARD;
        standard.as_ref().map_err(Clone::clone)
    }

    /// Load a catalog from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&text)
    }

    /// Parse and validate a catalog from JSON text.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let raw: BTreeMap<String, CatalogEntry> =
            serde_json::from_str(text).map_err(|e| CatalogError::Parse {
                message: e.to_string(),
            })?;

        let mut entries = BTreeMap::new();
        for (key, entry) in raw {
            let letter = parse_letter(&key).ok_or(CatalogError::InvalidLetter { key })?;
            if entry.value > MAX_TILE_VALUE {
                return Err(CatalogError::ValueTooLarge {
                    letter,
                    value: entry.value,
                    max: MAX_TILE_VALUE,
                });
            }
            entries.insert(letter, entry);
        }

        if !entries.contains_key(&BLANK) {
            return Err(CatalogError::MissingBlank);
        }

        let total = entries
            .values()
            .try_fold(0u32, |sum, e| sum.checked_add(e.original_distribution))
            .filter(|&total| total <= MAX_TOTAL_TILES)
            .ok_or(CatalogError::TooManyTiles {
                max: MAX_TOTAL_TILES,
            })?;
        if (total as usize) < RACK_CAPACITY {
            return Err(CatalogError::TooFewTiles {
                total,
                needed: RACK_CAPACITY as u32,
            });
        }

        Ok(Self { entries })
    }

    /// Point value of a letter, if the catalog knows it.
    pub fn value(&self, letter: char) -> Option<u32> {
        self.entries.get(&letter).map(|e| e.value)
    }

    /// Full entry for a letter.
    pub fn entry(&self, letter: char) -> Option<&CatalogEntry> {
        self.entries.get(&letter)
    }

    /// All entries in letter order (blank sorts first).
    pub fn entries(&self) -> impl Iterator<Item = (char, &CatalogEntry)> {
        self.entries.iter().map(|(c, e)| (*c, e))
    }

    /// Number of tiles in a full bag. Bounded by [`MAX_TOTAL_TILES`].
    pub fn total_tiles(&self) -> u32 {
        self.entries.values().map(|e| e.original_distribution).sum()
    }
}

fn parse_letter(key: &str) -> Option<char> {
    let mut chars = key.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    (c.is_ascii_uppercase() || c == BLANK).then_some(c)
}
