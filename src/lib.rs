//! Strictly Versus - tic-tac-toe against an optimal computer opponent.
//!
//! # Architecture
//!
//! - **Games**: pure game logic (board, win/draw detection, minimax move
//!   search, the turn engine)
//! - **Db**: SQLite persistence of game records via diesel
//! - **Service**: create / move / get / list operations wrapping the engine
//! - **Server**: JSON HTTP API (axum)
//!
//! # Example
//!
//! ```
//! use strictly_versus::{Game, Mark, apply_human_move};
//!
//! let game = Game::new(1, Mark::X);
//! let round = apply_human_move(game, 4).expect("center is free");
//! assert!(!round.game_over);
//! assert_eq!(round.computer_move.map(|m| m.mark), Some(Mark::O));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod db;
mod error;
mod games;
mod server;
mod service;

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - Persistence
pub use db::{
    DbError, GameChanges, GameRecord, GameRepository, MIGRATIONS, NewGameRecord, StoredGame,
};

// Crate-level exports - Errors
pub use error::GameError;

// Crate-level exports - Service
pub use service::{DEFAULT_RECENT_LIMIT, GameService};

// Crate-level exports - HTTP API
pub use server::{
    ApiError, CreateGameRequest, ErrorResponse, GameView, HealthResponse, MakeMoveRequest,
    MoveResponse, StatusView, router,
};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    BOARD_SIZE, Board, Game, GameId, GameStatus, Mark, MoveError, MoveRecord, Outcome, Position,
    RoundResult, Square, apply_human_move, best_move, check_winner, evaluate, evaluate_moves,
    is_draw, is_full,
};
