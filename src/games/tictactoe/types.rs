//! Core domain types for tic-tac-toe.

use super::action::MoveError;
use super::position::Position;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of squares on the board.
pub const BOARD_SIZE: usize = 9;

/// Database identifier of a game.
pub type GameId = i32;

/// A mark placed on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum Mark {
    /// Mark X (conventionally moves first).
    X,
    /// Mark O.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square holding a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

impl From<Option<Mark>> for Square {
    fn from(cell: Option<Mark>) -> Self {
        cell.map_or(Square::Empty, Square::Occupied)
    }
}

/// 3x3 tic-tac-toe board.
///
/// Boards are values: [`Board::place`] hands back a new board and leaves the
/// receiver as it was, so search code can branch on cheap copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; BOARD_SIZE],
        }
    }

    /// Builds a board from row-major cells, `None` meaning empty.
    pub fn from_cells(cells: [Option<Mark>; BOARD_SIZE]) -> Self {
        Self {
            squares: cells.map(Square::from),
        }
    }

    /// Gets the square at the given index (0-8).
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfRange`] if `index` is not a board square.
    pub fn get(&self, index: usize) -> Result<Square, MoveError> {
        self.squares
            .get(index)
            .copied()
            .ok_or(MoveError::OutOfRange(index))
    }

    /// Gets the square at a named position.
    pub fn at(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Returns a copy of this board with `mark` placed at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfRange`] for an index outside 0-8 and
    /// [`MoveError::CellOccupied`] if the square already holds a mark.
    #[instrument(skip(self))]
    pub fn place(&self, index: usize, mark: Mark) -> Result<Board, MoveError> {
        match self.get(index)? {
            Square::Occupied(_) => Err(MoveError::CellOccupied(index)),
            Square::Empty => {
                let mut next = *self;
                next.squares[index] = Square::Occupied(mark);
                Ok(next)
            }
        }
    }

    /// Places `mark` at an index already known to be empty.
    pub(super) fn set_unchecked(&mut self, index: usize, mark: Mark) {
        debug_assert!(self.is_empty(index), "square {} must be empty", index);
        self.squares[index] = Square::Occupied(mark);
    }

    /// Checks if the square at `index` is empty. Out-of-range indices are not.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Ok(Square::Empty))
    }

    /// Indices of empty squares in ascending order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + Clone + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, sq)| **sq == Square::Empty)
            .map(|(idx, _)| idx)
    }

    /// Checks if every square holds a mark.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Number of squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count()
    }

    /// Returns the board as row-major cells, `None` meaning empty.
    pub fn cells(&self) -> [Option<Mark>; BOARD_SIZE] {
        self.squares.map(Square::mark)
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => pos.to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Mark),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Returns true once the game can accept no more moves.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }
}

/// Authoritative record of one game.
///
/// The winner is carried by [`GameStatus::Won`], so a winner exists exactly
/// when the game is won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    id: GameId,
    board: Board,
    current_player: Mark,
    status: GameStatus,
}

impl Game {
    /// Creates a fresh game where `first_player` makes the first human move.
    #[instrument]
    pub fn new(id: GameId, first_player: Mark) -> Self {
        Self {
            id,
            board: Board::new(),
            current_player: first_player,
            status: GameStatus::InProgress,
        }
    }

    /// Reassembles a game from stored parts.
    pub fn from_parts(id: GameId, board: Board, current_player: Mark, status: GameStatus) -> Self {
        Self {
            id,
            board,
            current_player,
            status,
        }
    }

    /// Returns the game id.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark the next human move will place.
    pub fn current_player(&self) -> Mark {
        self.current_player
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the winner, present only when the game is won.
    pub fn winner(&self) -> Option<Mark> {
        match self.status {
            GameStatus::Won(mark) => Some(mark),
            _ => None,
        }
    }

    pub(super) fn with_round(self, board: Board, current_player: Mark, status: GameStatus) -> Self {
        Self {
            board,
            current_player,
            status,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.empty_cells().count(), 9);
        assert!(!board.is_full());
    }

    #[test]
    fn test_get_out_of_range() {
        let board = Board::new();
        assert_eq!(board.get(9), Err(MoveError::OutOfRange(9)));
        assert_eq!(board.get(8), Ok(Square::Empty));
    }

    #[test]
    fn test_place_returns_new_board() {
        let board = Board::new();
        let next = board.place(4, Mark::X).expect("Valid placement");
        assert_eq!(board.get(4), Ok(Square::Empty));
        assert_eq!(next.get(4), Ok(Square::Occupied(Mark::X)));
    }

    #[test]
    fn test_place_occupied_fails() {
        let board = Board::new().place(0, Mark::O).expect("Valid placement");
        assert_eq!(board.place(0, Mark::X), Err(MoveError::CellOccupied(0)));
        assert_eq!(board.place(12, Mark::X), Err(MoveError::OutOfRange(12)));
    }

    #[test]
    fn test_empty_cells_ascending_and_restartable() {
        let (x, o) = (Some(Mark::X), Some(Mark::O));
        let board = Board::from_cells([x, None, o, None, x, None, None, None, o]);
        let cells = board.empty_cells();
        let first: Vec<_> = cells.clone().collect();
        let second: Vec<_> = cells.collect();
        assert_eq!(first, vec![1, 3, 5, 6, 7]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_cells_round_trip() {
        let cells = [Some(Mark::X), None, None, None, Some(Mark::O), None, None, None, None];
        assert_eq!(Board::from_cells(cells).cells(), cells);
        assert_eq!(Board::from_cells(cells).count(Mark::X), 1);
    }

    #[test]
    fn test_display_grid() {
        let board = Board::new().place(0, Mark::X).expect("Valid placement");
        assert_eq!(board.display(), "X|1|2\n-+-+-\n3|4|5\n-+-+-\n6|7|8");
    }

    #[test]
    fn test_new_game() {
        let game = Game::new(7, Mark::O);
        assert_eq!(game.id(), 7);
        assert_eq!(game.current_player(), Mark::O);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_mark_strings() {
        assert_eq!(Mark::X.to_string(), "X");
        assert_eq!("O".parse::<Mark>(), Ok(Mark::O));
        assert!("Z".parse::<Mark>().is_err());
    }
}
