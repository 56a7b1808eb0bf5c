//! Minimax move search for the computer player.
//!
//! The 3x3 game tree is at most nine plies deep, so the search walks it
//! exhaustively: no pruning, no depth limit, no transposition table.
//! Scores are taken from the computer's point of view:
//!
//! - computer wins: `10 - depth`
//! - opponent wins: `depth - 10`
//! - draw: `0`
//!
//! where `depth` counts plies from the position handed to the search (the
//! computer's own placement is ply 1). Faster wins and slower losses score
//! better.

use super::action::MoveError;
use super::rules::evaluate;
use super::{Board, Mark};
use tracing::{debug, instrument};

const WIN_SCORE: i32 = 10;

/// Returns the optimal cell for `mark` to play on `board`.
///
/// Among equally scored cells the lowest index is returned.
///
/// # Errors
///
/// Returns [`MoveError::NoLegalMove`] if the board has no empty square.
#[instrument(skip(board), fields(empty = board.empty_cells().count()))]
pub fn best_move(board: &Board, mark: Mark) -> Result<usize, MoveError> {
    let mut best: Option<(usize, i32)> = None;

    for (cell, score) in evaluate_moves(board, mark) {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((cell, score)),
        }
    }

    let (cell, score) = best.ok_or(MoveError::NoLegalMove)?;
    debug!(cell, score, %mark, "Selected move");
    Ok(cell)
}

/// Backed-up minimax score of every legal cell for `mark`, ascending by cell.
#[instrument(level = "trace", skip(board))]
pub fn evaluate_moves(board: &Board, mark: Mark) -> Vec<(usize, i32)> {
    board
        .empty_cells()
        .map(|cell| {
            let child = place_scratch(board, cell, mark);
            (cell, minimax(&child, 1, false, mark))
        })
        .collect()
}

/// Scores `board` after `depth` plies; `maximizing` is true when `me` is to move.
fn minimax(board: &Board, depth: i32, maximizing: bool, me: Mark) -> i32 {
    let outcome = evaluate(board);
    if outcome.is_over {
        return match outcome.winner {
            Some(winner) if winner == me => WIN_SCORE - depth,
            Some(_) => depth - WIN_SCORE,
            None => 0,
        };
    }

    let mover = if maximizing { me } else { me.opponent() };
    let scores = board
        .empty_cells()
        .map(|cell| minimax(&place_scratch(board, cell, mover), depth + 1, !maximizing, me));

    // An open board always has an empty cell, so the fold never sees the seed.
    if maximizing {
        scores.fold(i32::MIN, i32::max)
    } else {
        scores.fold(i32::MAX, i32::min)
    }
}

fn place_scratch(board: &Board, cell: usize, mark: Mark) -> Board {
    let mut scratch = *board;
    scratch.set_unchecked(cell, mark);
    scratch
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Option<Mark> = Some(Mark::X);
    const O: Option<Mark> = Some(Mark::O);
    const E: Option<Mark> = None;

    #[test]
    fn test_full_board_has_no_move() {
        let board = Board::from_cells([X, O, X, X, O, O, O, X, X]);
        assert_eq!(best_move(&board, Mark::O), Err(MoveError::NoLegalMove));
    }

    #[test]
    fn test_last_cell_is_taken() {
        let board = Board::from_cells([X, O, X, X, O, O, O, X, E]);
        assert_eq!(best_move(&board, Mark::O), Ok(8));
    }

    #[test]
    fn test_takes_immediate_win_over_block() {
        // O can win at 5; X threatens 2.
        let board = Board::from_cells([X, X, E, O, O, E, X, E, E]);
        assert_eq!(best_move(&board, Mark::O), Ok(5));
    }

    #[test]
    fn test_blocks_threat() {
        // X threatens the top row at 2.
        let board = Board::from_cells([X, X, E, E, O, E, E, E, E]);
        assert_eq!(best_move(&board, Mark::O), Ok(2));
    }

    #[test]
    fn test_reply_to_center_is_corner() {
        let board = Board::from_cells([E, E, E, E, X, E, E, E, E]);
        let cell = best_move(&board, Mark::O).expect("Move exists");
        assert!([0, 2, 6, 8].contains(&cell));
        assert_eq!(cell, 0);
    }

    #[test]
    fn test_immediate_win_scores_nine() {
        let board = Board::from_cells([O, O, E, X, X, E, X, E, E]);
        let scores = evaluate_moves(&board, Mark::O);
        assert_eq!(scores.first(), Some(&(2, 9)));
    }

    #[test]
    fn test_does_not_mutate_input() {
        let board = Board::from_cells([X, E, E, E, E, E, E, E, E]);
        let before = board;
        let _ = best_move(&board, Mark::O);
        assert_eq!(board, before);
    }
}
