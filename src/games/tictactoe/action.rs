//! Move records and move errors.
//!
//! Moves are domain events: the round result reports which mark went where,
//! and every rejected move is described by a [`MoveError`].

use super::{Mark, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A placement: a mark put on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The mark placed.
    #[serde(rename = "player")]
    pub mark: Mark,
    /// Board index (0-8) the mark was placed on.
    pub position: usize,
}

impl MoveRecord {
    /// Creates a new move record.
    #[instrument]
    pub fn new(mark: Mark, position: usize) -> Self {
        Self { mark, position }
    }
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match Position::from_index(self.position) {
            Some(pos) => write!(f, "{} -> {}", self.mark, pos.label()),
            None => write!(f, "{} -> {}", self.mark, self.position),
        }
    }
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The position is not a board square.
    #[display("Position {} is out of range (must be 0-8)", _0)]
    OutOfRange(usize),

    /// The square at the position is already occupied.
    #[display("Position {} is already occupied", _0)]
    CellOccupied(usize),

    /// The game is already over.
    #[display("Game is not in progress")]
    GameNotInProgress,

    /// Move search was asked to play on a full board.
    #[display("No legal move available")]
    NoLegalMove,
}

impl std::error::Error for MoveError {}
