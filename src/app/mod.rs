//! Application state and input handling

pub mod state;

pub use state::{display_letter, App, FeedbackKind, Focus};
