//! Turn engine: one human move plus the computer's reply.
//!
//! A round consumes the current [`Game`] value and produces the next one.
//! Validation failures return before anything is placed, so the caller's
//! record is never half-updated.

use super::action::{MoveError, MoveRecord};
use super::oracle::best_move;
use super::rules::{Outcome, evaluate};
use super::{Board, Game, GameStatus, Mark, Position};
use tracing::{debug, info, instrument};

/// Everything a caller needs to report one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    /// The game after the round.
    pub game: Game,
    /// The human placement.
    pub human_move: MoveRecord,
    /// The computer placement, absent when the human move ended the game.
    pub computer_move: Option<MoveRecord>,
    /// True when the game reached `Won` or `Draw`.
    pub game_over: bool,
    /// Human-readable summary of the round.
    pub message: String,
}

/// Plays one round: places the current player's mark at `position`, then
/// lets the computer answer with the opposite mark if the game is still open.
///
/// # Errors
///
/// - [`MoveError::GameNotInProgress`] if the game already ended.
/// - [`MoveError::OutOfRange`] if `position` is not 0-8.
/// - [`MoveError::CellOccupied`] if the square is taken.
#[instrument(skip(game), fields(game_id = game.id(), player = %game.current_player()))]
pub fn apply_human_move(game: Game, position: usize) -> Result<RoundResult, MoveError> {
    if game.status().is_terminal() {
        return Err(MoveError::GameNotInProgress);
    }

    let human = game.current_player();
    let computer = human.opponent();
    let human_move = MoveRecord::new(human, position);
    let board = game.board().place(position, human)?;
    debug!(%human_move, "Human move placed");

    let (board, status, computer_move) = match settle(&board) {
        Some(status) => (board, status, None),
        None => {
            let cell = best_move(&board, computer)?;
            let board = board.place(cell, computer)?;
            let computer_move = MoveRecord::new(computer, cell);
            debug!(%computer_move, "Computer move placed");
            let status = settle(&board).unwrap_or(GameStatus::InProgress);
            (board, status, Some(computer_move))
        }
    };

    let next = game.with_round(board, human.opponent(), status);
    let message = round_message(status, human, computer_move);
    info!(status = ?status, computer_move = ?computer_move, "Round complete");

    Ok(RoundResult {
        game: next,
        human_move,
        computer_move,
        game_over: status.is_terminal(),
        message,
    })
}

/// Terminal status for a board, `None` if play continues.
fn settle(board: &Board) -> Option<GameStatus> {
    match evaluate(board) {
        Outcome {
            winner: Some(mark), ..
        } => Some(GameStatus::Won(mark)),
        Outcome { is_over: true, .. } => Some(GameStatus::Draw),
        Outcome { .. } => None,
    }
}

fn round_message(status: GameStatus, human: Mark, computer_move: Option<MoveRecord>) -> String {
    match (status, computer_move) {
        (GameStatus::Won(mark), _) if mark == human => format!("Player {} wins!", mark),
        (GameStatus::Won(mark), _) => format!("Computer ({}) wins!", mark),
        (GameStatus::Draw, _) => "Game ended in a draw!".to_string(),
        (GameStatus::InProgress, Some(reply)) => {
            let label = Position::from_index(reply.position)
                .map(|pos| pos.label())
                .unwrap_or("?");
            format!("Computer ({}) played {}. Your move.", reply.mark, label)
        }
        (GameStatus::InProgress, None) => "Move processed successfully".to_string(),
    }
}
