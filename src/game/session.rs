//! Game session: board, rack, bag and score in one place
//!
//! Every operation runs to completion and either commits fully or leaves the
//! session untouched. The presentation layer talks to the session through
//! [`Game::drop_on_slot`], [`Game::remove_from_slot`], [`Game::submit`] and
//! [`Game::restart`], and learns about changes by draining [`GameEvent`]s.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, instrument};

use super::board::{Board, Tile, TileId, BOARD_SIZE};
use super::catalog::Catalog;
use super::inventory::Inventory;
use super::scoring::score_word;
use super::RACK_CAPACITY;

/// Why a drop attempt was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropRejection {
    /// Target index is off the board
    OutOfRange,
    /// No tile with that id is on the rack or board
    UnknownTile,
    /// Another tile already sits on the target square
    Occupied,
    /// Target square does not touch the tiles already placed
    NotAdjacent,
}

impl DropRejection {
    /// Returns a user-friendly message
    pub fn message(&self) -> &'static str {
        match self {
            DropRejection::OutOfRange => "That square is off the board",
            DropRejection::UnknownTile => "That tile is no longer in play",
            DropRejection::Occupied => "That square is taken",
            DropRejection::NotAdjacent => "Tiles must be placed next to each other",
        }
    }
}

/// Result of dropping a tile on a board square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Accepted,
    Rejected(DropRejection),
}

impl DropOutcome {
    /// Returns true if the tile moved
    pub fn is_accepted(&self) -> bool {
        matches!(self, DropOutcome::Accepted)
    }
}

/// Why a submission was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The placed tiles do not form one continuous run (or score nothing)
    NonContinuous,
}

/// Result of submitting the word on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Board was empty; nothing happened
    Empty,
    /// Word scored and cleared
    Accepted { score_delta: u32, new_total: u32 },
    /// Board left as it was so the player can fix it
    Rejected { reason: RejectReason },
}

impl SubmitOutcome {
    /// Returns a user-friendly message
    pub fn message(&self) -> String {
        match self {
            SubmitOutcome::Empty => String::new(),
            SubmitOutcome::Accepted { score_delta, .. } => {
                format!("Word submitted! +{}", score_delta)
            }
            SubmitOutcome::Rejected {
                reason: RejectReason::NonContinuous,
            } => "Word must be continuous. Please try again!".to_string(),
        }
    }
}

/// Change notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged { word_score: u32, total_score: u32 },
    BoardChanged { slot: usize, tile: Option<Tile> },
    RackChanged { added: Vec<Tile> },
    /// Tiles that left the rack, onto the board or out of play
    RackRemoved { removed: Vec<TileId> },
    SubmissionResult(SubmitOutcome),
}

/// Where a tile currently lives
enum Origin {
    Rack(usize),
    Slot(usize),
}

/// A single-player game session
pub struct Game {
    catalog: Catalog,
    inventory: Inventory,
    board: Board,
    rack: Vec<Tile>,
    total_score: u32,
    next_tile_id: u64,
    rng: StdRng,
    events: Vec<GameEvent>,
}

impl Game {
    /// Start a session with a randomly seeded bag.
    pub fn new(catalog: Catalog) -> Self {
        Self::with_rng(catalog, StdRng::from_os_rng())
    }

    /// Start a session whose deals are reproducible.
    pub fn with_seed(catalog: Catalog, seed: u64) -> Self {
        Self::with_rng(catalog, StdRng::seed_from_u64(seed))
    }

    fn with_rng(catalog: Catalog, rng: StdRng) -> Self {
        let inventory = Inventory::full(&catalog);
        let mut game = Self {
            catalog,
            inventory,
            board: Board::new(),
            rack: Vec::with_capacity(RACK_CAPACITY),
            total_score: 0,
            next_tile_id: 0,
            rng,
            events: Vec::new(),
        };
        game.deal_new_tiles(RACK_CAPACITY);
        info!(
            tiles = game.catalog.total_tiles(),
            rack = game.rack.len(),
            "Game started"
        );
        game
    }

    /// The catalog this session deals from
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// What is left in the bag
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Current board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Tiles waiting on the rack, in deal order
    pub fn rack(&self) -> &[Tile] {
        &self.rack
    }

    /// Sum of all accepted words since the last restart
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    /// Score of the word currently on the board
    pub fn current_word_score(&self) -> u32 {
        score_word(&self.board)
    }

    /// Take all pending change notifications
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Draw `count` tiles from the bag onto the rack.
    ///
    /// Returns the new tiles; fewer than `count` when the bag runs short.
    pub fn deal_new_tiles(&mut self, count: usize) -> Vec<Tile> {
        let letters = self.inventory.draw(count, &mut self.rng);

        let mut added = Vec::with_capacity(letters.len());
        for letter in letters {
            let tile = Tile {
                id: TileId(self.next_tile_id),
                letter,
                value: self.catalog.value(letter).unwrap_or(0),
            };
            self.next_tile_id += 1;
            self.rack.push(tile);
            added.push(tile);
        }

        debug!(
            requested = count,
            dealt = added.len(),
            left = self.inventory.total_remaining(),
            "Dealt tiles"
        );

        if !added.is_empty() {
            self.events.push(GameEvent::RackChanged {
                added: added.clone(),
            });
        }
        added
    }

    /// Try to drop a tile (from the rack or another square) on `index`.
    ///
    /// Placement is judged with the tile's old square already vacated, the
    /// way a dragged tile has left its square. Nothing changes on rejection.
    #[instrument(skip(self, tile_id), fields(tile = %tile_id))]
    pub fn drop_on_slot(&mut self, tile_id: TileId, index: usize) -> DropOutcome {
        if index >= BOARD_SIZE {
            return self.reject_drop(DropRejection::OutOfRange);
        }

        let origin = if let Some(pos) = self.rack.iter().position(|t| t.id == tile_id) {
            Origin::Rack(pos)
        } else if let Some(slot) = self.board.find(tile_id) {
            Origin::Slot(slot)
        } else {
            return self.reject_drop(DropRejection::UnknownTile);
        };

        if self.board.get(index).is_some_and(|t| t.id != tile_id) {
            return self.reject_drop(DropRejection::Occupied);
        }

        let valid = match origin {
            Origin::Rack(_) => self.board.is_placement_valid(index),
            Origin::Slot(from) => {
                let mut vacated = self.board.clone();
                vacated.take(from);
                vacated.is_placement_valid(index)
            }
        };
        if !valid {
            return self.reject_drop(DropRejection::NotAdjacent);
        }

        let tile = match origin {
            Origin::Rack(pos) => {
                let tile = self.rack.remove(pos);
                self.events.push(GameEvent::RackRemoved {
                    removed: vec![tile.id],
                });
                tile
            }
            Origin::Slot(from) => {
                let Some(tile) = self.board.take(from) else {
                    return self.reject_drop(DropRejection::UnknownTile);
                };
                self.events.push(GameEvent::BoardChanged {
                    slot: from,
                    tile: None,
                });
                tile
            }
        };

        self.board.place(index, tile);
        self.events.push(GameEvent::BoardChanged {
            slot: index,
            tile: Some(tile),
        });
        self.push_score_changed();

        debug!(letter = %tile.letter, word_score = self.current_word_score(), "Tile placed");
        DropOutcome::Accepted
    }

    fn reject_drop(&self, reason: DropRejection) -> DropOutcome {
        debug!(?reason, "Drop rejected");
        DropOutcome::Rejected(reason)
    }

    /// Move the tile on `index` back to the end of the rack.
    pub fn remove_from_slot(&mut self, index: usize) -> Option<TileId> {
        let tile = self.board.take(index)?;
        self.rack.push(tile);

        self.events.push(GameEvent::BoardChanged {
            slot: index,
            tile: None,
        });
        self.events.push(GameEvent::RackChanged { added: vec![tile] });
        self.push_score_changed();

        debug!(slot = index, letter = %tile.letter, "Tile returned to rack");
        Some(tile.id)
    }

    /// Score the word on the board and, if valid, bank it.
    ///
    /// An accepted word clears the board (its tiles are used up) and the rack
    /// is topped back up to capacity.
    #[instrument(skip(self))]
    pub fn submit(&mut self) -> SubmitOutcome {
        let word_score = self.current_word_score();

        if self.board.is_empty() {
            return SubmitOutcome::Empty;
        }

        if word_score == 0 {
            let outcome = SubmitOutcome::Rejected {
                reason: RejectReason::NonContinuous,
            };
            info!("Submission rejected: word is not continuous");
            self.events.push(GameEvent::SubmissionResult(outcome));
            return outcome;
        }

        self.total_score = self.total_score.saturating_add(word_score);
        self.clear_board();

        let missing = RACK_CAPACITY.saturating_sub(self.rack.len());
        self.deal_new_tiles(missing);

        let outcome = SubmitOutcome::Accepted {
            score_delta: word_score,
            new_total: self.total_score,
        };
        info!(score = word_score, total = self.total_score, "Word submitted");
        self.events.push(GameEvent::SubmissionResult(outcome));
        outcome
    }

    /// Start over: zero score, full bag, fresh rack of seven.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        self.total_score = 0;
        self.inventory.reset(&self.catalog);
        let removed: Vec<TileId> = self.rack.drain(..).map(|t| t.id).collect();
        if !removed.is_empty() {
            self.events.push(GameEvent::RackRemoved { removed });
        }
        self.clear_board();
        self.deal_new_tiles(RACK_CAPACITY);
        info!("Game restarted");
    }

    /// Remove every tile from the board. Removed tiles leave play.
    pub fn clear_board(&mut self) {
        for slot in self.board.clear() {
            self.events.push(GameEvent::BoardChanged { slot, tile: None });
        }
        self.push_score_changed();
    }

    fn push_score_changed(&mut self) {
        self.events.push(GameEvent::ScoreChanged {
            word_score: self.current_word_score(),
            total_score: self.total_score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_game(seed: u64) -> Game {
        Game::with_seed(Catalog::standard().unwrap().clone(), seed)
    }

    /// Catalog with a single scoring letter so tile values are predictable
    fn ab_catalog() -> Catalog {
        Catalog::from_json(
            r#"{
                "A": { "value": 1, "original-distribution": 20 },
                "B": { "value": 3, "original-distribution": 20 },
                "_": { "value": 0, "original-distribution": 0 }
            }"#,
        )
        .unwrap()
    }

    fn rack_tile(game: &Game, letter: char) -> TileId {
        game.rack()
            .iter()
            .find(|t| t.letter == letter)
            .map(|t| t.id)
            .unwrap()
    }

    /// Game whose rack is guaranteed to hold at least one A and one B
    fn ab_game() -> Game {
        (0..)
            .map(|seed| Game::with_seed(ab_catalog(), seed))
            .find(|g| {
                let has = |letter| g.rack().iter().any(|t| t.letter == letter);
                has('A') && has('B')
            })
            .unwrap()
    }

    #[test]
    fn test_new_game_deals_full_rack() {
        let game = standard_game(1);
        assert_eq!(game.rack().len(), RACK_CAPACITY);
        assert_eq!(game.inventory().total_remaining(), 93);
        assert_eq!(game.total_score(), 0);
        assert!(game.board().is_empty());
    }

    #[test]
    fn test_dealt_values_come_from_catalog() {
        let game = standard_game(5);
        for tile in game.rack() {
            assert_eq!(Some(tile.value), game.catalog().value(tile.letter));
        }
    }

    #[test]
    fn test_tile_ids_are_unique() {
        let mut game = standard_game(2);
        game.deal_new_tiles(20);
        let mut ids: Vec<_> = game.rack().iter().map(|t| t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 27);
    }

    #[test]
    fn test_double_word_scenario() {
        let mut game = ab_game();
        let a = rack_tile(&game, 'A');
        let b = rack_tile(&game, 'B');

        assert_eq!(game.drop_on_slot(a, 2), DropOutcome::Accepted);
        assert_eq!(game.current_word_score(), 2);

        assert_eq!(game.drop_on_slot(b, 1), DropOutcome::Accepted);
        assert_eq!(game.current_word_score(), 8);
        assert_eq!(game.rack().len(), RACK_CAPACITY - 2);

        let outcome = game.submit();
        assert_eq!(
            outcome,
            SubmitOutcome::Accepted {
                score_delta: 8,
                new_total: 8
            }
        );
        assert_eq!(game.total_score(), 8);
        assert!(game.board().is_empty());
        assert_eq!(game.rack().len(), RACK_CAPACITY);
    }

    #[test]
    fn test_gap_scenario_rejected() {
        let mut game = ab_game();
        let a = rack_tile(&game, 'A');
        let b = rack_tile(&game, 'B');

        // Build 1-2-3, then pull the middle tile out
        assert!(game.drop_on_slot(a, 1).is_accepted());
        assert!(game.drop_on_slot(b, 2).is_accepted());
        let third = game.rack()[0].id;
        assert!(game.drop_on_slot(third, 3).is_accepted());
        assert_eq!(game.remove_from_slot(2), Some(b));

        assert_eq!(game.current_word_score(), 0);
        let board_before = game.board().clone();

        let outcome = game.submit();
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                reason: RejectReason::NonContinuous
            }
        );
        assert_eq!(game.board(), &board_before);
        assert_eq!(game.total_score(), 0);
    }

    #[test]
    fn test_submit_empty_board_is_noop() {
        let mut game = standard_game(3);
        game.drain_events();
        let rack_before = game.rack().to_vec();

        assert_eq!(game.submit(), SubmitOutcome::Empty);
        assert_eq!(game.rack(), rack_before.as_slice());
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_drop_rejections_leave_state_untouched() {
        let mut game = standard_game(4);
        let first = game.rack()[0].id;
        let second = game.rack()[1].id;
        let third = game.rack()[2].id;

        assert_eq!(
            game.drop_on_slot(first, BOARD_SIZE),
            DropOutcome::Rejected(DropRejection::OutOfRange)
        );
        assert_eq!(
            game.drop_on_slot(TileId(9999), 0),
            DropOutcome::Rejected(DropRejection::UnknownTile)
        );

        assert!(game.drop_on_slot(first, 5).is_accepted());
        assert_eq!(
            game.drop_on_slot(second, 5),
            DropOutcome::Rejected(DropRejection::Occupied)
        );
        assert_eq!(
            game.drop_on_slot(second, 9),
            DropOutcome::Rejected(DropRejection::NotAdjacent)
        );

        assert!(game.drop_on_slot(second, 6).is_accepted());
        assert!(game.drop_on_slot(third, 4).is_accepted());
        assert_eq!(game.board().occupied_count(), 3);
        assert_eq!(game.rack().len(), RACK_CAPACITY - 3);
    }

    #[test]
    fn test_move_tile_between_squares() {
        let mut game = standard_game(6);
        let first = game.rack()[0].id;
        let second = game.rack()[1].id;

        assert!(game.drop_on_slot(first, 5).is_accepted());
        assert!(game.drop_on_slot(second, 6).is_accepted());

        // 6 -> 4 is adjacent to 5 once 6 has been vacated
        assert!(game.drop_on_slot(second, 4).is_accepted());
        assert_eq!(game.board().find(second), Some(4));
        assert!(!game.board().is_occupied(6));

        // 4 -> 10 would leave the tile stranded
        assert_eq!(
            game.drop_on_slot(second, 10),
            DropOutcome::Rejected(DropRejection::NotAdjacent)
        );
        assert_eq!(game.board().find(second), Some(4));
    }

    #[test]
    fn test_lone_tile_can_move_anywhere() {
        let mut game = standard_game(7);
        let first = game.rack()[0].id;

        assert!(game.drop_on_slot(first, 0).is_accepted());
        assert!(game.drop_on_slot(first, 14).is_accepted());
        assert_eq!(game.board().span(), Some((14, 14)));
    }

    #[test]
    fn test_remove_from_slot_returns_to_rack() {
        let mut game = standard_game(8);
        let first = game.rack()[0].id;
        assert!(game.drop_on_slot(first, 3).is_accepted());

        assert_eq!(game.remove_from_slot(3), Some(first));
        assert_eq!(game.rack().last().map(|t| t.id), Some(first));
        assert_eq!(game.rack().len(), RACK_CAPACITY);
        assert_eq!(game.remove_from_slot(3), None);
        assert_eq!(game.remove_from_slot(BOARD_SIZE + 1), None);
    }

    #[test]
    fn test_submit_destroys_tiles_and_refills() {
        let mut game = standard_game(9);
        let ids: Vec<TileId> = game.rack().iter().take(3).map(|t| t.id).collect();
        for (i, id) in ids.iter().enumerate() {
            assert!(game.drop_on_slot(*id, 4 + i).is_accepted());
        }
        let remaining_before = game.inventory().total_remaining();

        // Only two blanks exist, so at least one tile scores
        match game.submit() {
            SubmitOutcome::Accepted {
                score_delta,
                new_total,
            } => {
                assert!(score_delta > 0);
                assert_eq!(new_total, score_delta);
            }
            other => panic!("Expected accepted submission, got {:?}", other),
        }

        assert!(game.board().is_empty());
        assert_eq!(game.rack().len(), RACK_CAPACITY);
        assert_eq!(game.inventory().total_remaining(), remaining_before - 3);
        for id in ids {
            assert!(game.rack().iter().all(|t| t.id != id));
        }
    }

    #[test]
    fn test_total_score_accumulates() {
        let mut game = ab_game();
        let a = rack_tile(&game, 'A');
        assert!(game.drop_on_slot(a, 0).is_accepted());
        assert_eq!(
            game.submit(),
            SubmitOutcome::Accepted {
                score_delta: 1,
                new_total: 1
            }
        );

        let b = rack_tile(&game, 'B');
        assert!(game.drop_on_slot(b, 0).is_accepted());
        assert_eq!(
            game.submit(),
            SubmitOutcome::Accepted {
                score_delta: 3,
                new_total: 4
            }
        );
        assert_eq!(game.total_score(), 4);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut game = standard_game(10);
        let first = game.rack()[0].id;
        assert!(game.drop_on_slot(first, 7).is_accepted());
        game.deal_new_tiles(30);

        game.restart();
        assert_eq!(game.total_score(), 0);
        assert!(game.board().is_empty());
        assert_eq!(game.rack().len(), RACK_CAPACITY);
        assert_eq!(game.inventory().total_remaining(), 100 - RACK_CAPACITY as u32);
    }

    #[test]
    fn test_clear_board_keeps_score_rack_and_bag() {
        let mut game = ab_game();
        let a = rack_tile(&game, 'A');
        assert!(game.drop_on_slot(a, 0).is_accepted());
        game.submit();

        let b = rack_tile(&game, 'B');
        assert!(game.drop_on_slot(b, 3).is_accepted());
        let rack_len = game.rack().len();
        let bag = game.inventory().total_remaining();

        game.clear_board();
        assert!(game.board().is_empty());
        assert_eq!(game.current_word_score(), 0);
        assert_eq!(game.total_score(), 1);
        assert_eq!(game.rack().len(), rack_len);
        assert_eq!(game.inventory().total_remaining(), bag);
    }

    #[test]
    fn test_deal_from_exhausted_bag() {
        let mut game = standard_game(11);
        assert_eq!(game.deal_new_tiles(200).len(), 93);
        assert!(game.deal_new_tiles(5).is_empty());
        assert!(game.inventory().is_empty());
    }

    #[test]
    fn test_events_describe_changes() {
        let mut game = ab_game();
        let events = game.drain_events();
        assert!(matches!(
            events.as_slice(),
            [GameEvent::RackChanged { added }] if added.len() == RACK_CAPACITY
        ));

        let a = rack_tile(&game, 'A');
        game.drop_on_slot(a, 2);
        let events = game.drain_events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], GameEvent::RackRemoved { removed: vec![a] });
        assert!(matches!(
            &events[1],
            GameEvent::BoardChanged { slot: 2, tile: Some(t) } if t.id == a
        ));
        assert_eq!(
            events[2],
            GameEvent::ScoreChanged {
                word_score: 2,
                total_score: 0
            }
        );

        game.submit();
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::BoardChanged { slot: 2, tile: None }));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::RackChanged { added } if added.len() == 1)));
        assert_eq!(
            events.last(),
            Some(&GameEvent::SubmissionResult(SubmitOutcome::Accepted {
                score_delta: 2,
                new_total: 2
            }))
        );
    }

    #[test]
    fn test_moving_board_tile_leaves_rack_alone() {
        let mut game = standard_game(13);
        let first = game.rack()[0].id;
        assert!(game.drop_on_slot(first, 5).is_accepted());
        game.drain_events();

        assert!(game.drop_on_slot(first, 6).is_accepted());
        let events = game.drain_events();
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::RackRemoved { .. })));
    }

    #[test]
    fn test_restart_reports_discarded_rack() {
        let mut game = standard_game(14);
        let first = game.rack()[0].id;
        assert!(game.drop_on_slot(first, 4).is_accepted());
        let left: Vec<TileId> = game.rack().iter().map(|t| t.id).collect();
        game.drain_events();

        game.restart();
        let events = game.drain_events();
        assert_eq!(events[0], GameEvent::RackRemoved { removed: left });
        assert!(events.contains(&GameEvent::BoardChanged { slot: 4, tile: None }));
        assert!(matches!(
            events.last(),
            Some(GameEvent::RackChanged { added }) if added.len() == RACK_CAPACITY
        ));
    }

    #[test]
    fn test_largest_values_score_without_overflow() {
        use crate::game::catalog::MAX_TILE_VALUE;
        let json = format!(
            r#"{{ "A": {{ "value": {}, "original-distribution": 20 }},
                 "_": {{ "value": 0, "original-distribution": 0 }} }}"#,
            MAX_TILE_VALUE
        );
        let mut game = Game::with_seed(Catalog::from_json(&json).unwrap(), 15);
        let first = game.rack()[0].id;

        assert!(game.drop_on_slot(first, 6).is_accepted());
        assert_eq!(game.current_word_score(), MAX_TILE_VALUE * 2);
        assert_eq!(
            game.submit(),
            SubmitOutcome::Accepted {
                score_delta: MAX_TILE_VALUE * 2,
                new_total: MAX_TILE_VALUE * 2
            }
        );
    }

    #[test]
    fn test_rejected_drop_emits_nothing() {
        let mut game = standard_game(12);
        game.drain_events();
        let first = game.rack()[0].id;
        game.drop_on_slot(first, 99);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_submit_messages() {
        assert_eq!(
            SubmitOutcome::Rejected {
                reason: RejectReason::NonContinuous
            }
            .message(),
            "Word must be continuous. Please try again!"
        );
        assert_eq!(
            SubmitOutcome::Accepted {
                score_delta: 8,
                new_total: 20
            }
            .message(),
            "Word submitted! +8"
        );
    }
}
