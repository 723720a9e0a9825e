#![allow(dead_code)]
//! Game logic: tile catalog, bag, board, scoring and the session

pub mod board;
pub mod catalog;
pub mod inventory;
pub mod scoring;
pub mod session;

pub use board::{bonus_at, Bonus, Tile, TileId, BOARD_SIZE};
pub use catalog::Catalog;
pub use session::{DropOutcome, Game, GameEvent, SubmitOutcome};

/// Letter used for the blank wildcard tile
pub const BLANK: char = '_';

/// Tiles a full rack holds
pub const RACK_CAPACITY: usize = 7;
