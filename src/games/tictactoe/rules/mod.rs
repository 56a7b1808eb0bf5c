//! Game rules for tic-tac-toe.
//!
//! Pure functions for judging a board. Rules are separated from board
//! storage so the turn engine and the move search share one detector.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner};

use super::{Board, Mark};
use tracing::instrument;

/// Verdict on a board: who won, and whether play is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Winning mark, if a line is complete.
    pub winner: Option<Mark>,
    /// True when a line is complete or the board is full.
    pub is_over: bool,
}

impl Outcome {
    /// Play continues.
    pub const OPEN: Outcome = Outcome {
        winner: None,
        is_over: false,
    };

    /// Full board, no winner.
    pub const DRAW: Outcome = Outcome {
        winner: None,
        is_over: true,
    };

    /// `mark` completed a line.
    pub fn won(mark: Mark) -> Self {
        Self {
            winner: Some(mark),
            is_over: true,
        }
    }
}

/// Judges a board.
///
/// A completed line always wins, even on a full board.
#[instrument(level = "trace", skip(board))]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(mark) = check_winner(board) {
        Outcome::won(mark)
    } else if is_full(board) {
        Outcome::DRAW
    } else {
        Outcome::OPEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_board() {
        let board = Board::new().place(4, Mark::X).expect("Valid placement");
        assert_eq!(evaluate(&board), Outcome::OPEN);
    }

    #[test]
    fn test_won_and_full_reports_win() {
        let x = Some(Mark::X);
        let o = Some(Mark::O);
        let board = Board::from_cells([x, x, x, o, o, x, o, x, o]);
        assert_eq!(evaluate(&board), Outcome::won(Mark::X));
    }

    #[test]
    fn test_full_without_line_is_draw() {
        let x = Some(Mark::X);
        let o = Some(Mark::O);
        let board = Board::from_cells([x, o, x, x, o, o, o, x, x]);
        assert_eq!(evaluate(&board), Outcome::DRAW);
    }
}
