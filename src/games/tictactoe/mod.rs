//! Tic-tac-toe against an optimal computer opponent.
//!
//! Leaves first: [`types`] holds the board and game records, [`rules`]
//! judges boards, [`oracle`] picks the computer's move and [`engine`] plays
//! a full round. All of it is pure; persistence lives in [`crate::db`].

pub mod action;
pub mod engine;
pub mod oracle;
pub mod position;
pub mod rules;
pub mod types;

pub use action::{MoveError, MoveRecord};
pub use engine::{RoundResult, apply_human_move};
pub use oracle::{best_move, evaluate_moves};
pub use position::Position;
pub use rules::{Outcome, check_winner, evaluate, is_draw, is_full};
pub use types::{BOARD_SIZE, Board, Game, GameId, GameStatus, Mark, Square};
