//! Errors surfaced by the game service.

use crate::db::DbError;
use crate::games::tictactoe::{GameId, MoveError};

/// Failure of a service operation.
#[derive(Debug, Clone, derive_more::Display, derive_more::From)]
pub enum GameError {
    /// The move was rejected by the turn engine.
    #[display("Invalid move: {}", _0)]
    Move(MoveError),

    /// The database failed.
    #[display("{}", _0)]
    Db(DbError),

    /// No game has the requested id.
    #[display("Game with id {} not found", _0)]
    #[from(ignore)]
    NotFound(GameId),
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Move(err) => Some(err),
            GameError::Db(err) => Some(err),
            GameError::NotFound(_) => None,
        }
    }
}
