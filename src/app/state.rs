//! Application state: the keyboard stand-in for drag and drop
//!
//! A tile is "picked up" with Space and "dropped" with Space again over a
//! board square. Only the drop reaches the game session, so cancelling a
//! held tile (Esc) never changes anything.

use crate::game::{DropOutcome, Game, GameEvent, SubmitOutcome, TileId, BOARD_SIZE};
use tracing::debug;

/// Which row the cursor is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Rack,
    Board,
}

/// What the feedback line is reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Info,
    Holding,
    Accepted,
    Rejected,
}

/// Main application state
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,
    /// Row the cursor is on
    pub focus: Focus,
    /// Cursor position on the rack
    pub rack_cursor: usize,
    /// Cursor position on the board
    pub board_cursor: usize,
    /// Tile currently picked up, if any
    pub held: Option<TileId>,
    /// Feedback message from the last action
    pub feedback: String,
    /// Kind of the feedback message, used for colouring
    pub feedback_kind: FeedbackKind,
    /// Score of the word on the board, as last reported by the game
    pub word_score: u32,
    /// Total score, as last reported by the game
    pub total_score: u32,
    game: Game,
}

impl App {
    /// Wrap a freshly started game
    pub fn new(game: Game) -> Self {
        let mut app = Self {
            should_quit: false,
            focus: Focus::Rack,
            rack_cursor: 0,
            board_cursor: BOARD_SIZE / 2,
            held: None,
            feedback: String::new(),
            feedback_kind: FeedbackKind::Info,
            word_score: 0,
            total_score: 0,
            game,
        };
        app.sync();
        app
    }

    /// The game being played
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Signal the application to quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Move the cursor left
    pub fn on_left(&mut self) {
        match self.focus {
            Focus::Rack => self.rack_cursor = self.rack_cursor.saturating_sub(1),
            Focus::Board => self.board_cursor = self.board_cursor.saturating_sub(1),
        }
    }

    /// Move the cursor right
    pub fn on_right(&mut self) {
        match self.focus {
            Focus::Rack => {
                if self.rack_cursor + 1 < self.game.rack().len() {
                    self.rack_cursor += 1;
                }
            }
            Focus::Board => {
                if self.board_cursor + 1 < BOARD_SIZE {
                    self.board_cursor += 1;
                }
            }
        }
    }

    /// Switch between rack and board
    pub fn on_tab(&mut self) {
        self.focus = match self.focus {
            Focus::Rack => Focus::Board,
            Focus::Board => Focus::Rack,
        };
    }

    /// Pick up the tile under the cursor, or put down the held one
    pub fn on_space(&mut self) {
        match self.held.take() {
            None => self.pick_up(),
            Some(tile) => self.put_down(tile),
        }
        self.sync();
    }

    fn pick_up(&mut self) {
        let tile = match self.focus {
            Focus::Rack => self.game.rack().get(self.rack_cursor),
            Focus::Board => self.game.board().get(self.board_cursor),
        }
        .copied();
        if let Some(tile) = tile {
            let text = format!("Holding {}", display_letter(tile.letter));
            self.set_feedback(FeedbackKind::Holding, text);
            self.held = Some(tile.id);
        }
    }

    fn put_down(&mut self, tile: TileId) {
        match self.focus {
            Focus::Board => {
                let outcome = self.game.drop_on_slot(tile, self.board_cursor);
                self.show_drop_outcome(outcome);
            }
            Focus::Rack => {
                if let Some(slot) = self.game.board().find(tile) {
                    self.game.remove_from_slot(slot);
                }
                self.clear_feedback();
            }
        }
    }

    fn show_drop_outcome(&mut self, outcome: DropOutcome) {
        match outcome {
            DropOutcome::Accepted => self.clear_feedback(),
            DropOutcome::Rejected(reason) => {
                self.set_feedback(FeedbackKind::Rejected, reason.message());
            }
        }
    }

    fn set_feedback(&mut self, kind: FeedbackKind, text: impl Into<String>) {
        self.feedback = text.into();
        self.feedback_kind = kind;
    }

    fn clear_feedback(&mut self) {
        self.set_feedback(FeedbackKind::Info, String::new());
    }

    /// Return the tile under the board cursor to the rack
    pub fn on_backspace(&mut self) {
        if self.focus == Focus::Board && self.held.is_none() {
            self.game.remove_from_slot(self.board_cursor);
            self.sync();
        }
    }

    /// Drop a held tile back where it was, or quit
    pub fn on_escape(&mut self) {
        if self.held.take().is_some() {
            self.clear_feedback();
        } else {
            self.quit();
        }
    }

    /// Submit the word on the board
    pub fn on_submit(&mut self) {
        self.held = None;
        if self.game.submit() == SubmitOutcome::Empty {
            self.set_feedback(FeedbackKind::Info, "Place some tiles first");
        }
        self.sync();
    }

    /// Start a new game
    pub fn on_restart(&mut self) {
        self.held = None;
        self.game.restart();
        self.sync();
        self.set_feedback(FeedbackKind::Info, "New game");
    }

    /// Apply pending game events to what the UI shows
    fn sync(&mut self) {
        for event in self.game.drain_events() {
            debug!(?event, "Game event");
            match event {
                GameEvent::ScoreChanged {
                    word_score,
                    total_score,
                } => {
                    self.word_score = word_score;
                    self.total_score = total_score;
                }
                GameEvent::SubmissionResult(outcome) => {
                    let kind = match outcome {
                        SubmitOutcome::Accepted { .. } => FeedbackKind::Accepted,
                        SubmitOutcome::Rejected { .. } => FeedbackKind::Rejected,
                        SubmitOutcome::Empty => FeedbackKind::Info,
                    };
                    self.set_feedback(kind, outcome.message());
                }
                // The rack and board are read straight from the game when drawn
                GameEvent::BoardChanged { .. }
                | GameEvent::RackChanged { .. }
                | GameEvent::RackRemoved { .. } => {}
            }
        }

        let rack_len = self.game.rack().len();
        if self.rack_cursor >= rack_len {
            self.rack_cursor = rack_len.saturating_sub(1);
        }
    }
}

/// How a letter is shown to the player
pub fn display_letter(letter: char) -> char {
    if letter == crate::game::BLANK {
        ' '
    } else {
        letter
    }
}
