//! Tests for board squares and their position names.

use strictly_versus::{Board, Mark, MoveError, Position, Square};

#[test]
fn test_position_to_index() {
    assert_eq!(Position::TopLeft.to_index(), 0);
    assert_eq!(Position::Center.to_index(), 4);
    assert_eq!(Position::BottomRight.to_index(), 8);
}

#[test]
fn test_position_from_index() {
    assert_eq!(Position::from_index(0), Some(Position::TopLeft));
    assert_eq!(Position::from_index(4), Some(Position::Center));
    assert_eq!(Position::from_index(8), Some(Position::BottomRight));
    assert_eq!(Position::from_index(9), None);
}

#[test]
fn test_empty_cells_on_new_board() {
    let board = Board::new();
    assert_eq!(board.empty_cells().collect::<Vec<_>>(), (0..9).collect::<Vec<_>>());
}

#[test]
fn test_empty_cells_skip_occupied() {
    let board = Board::new()
        .place(0, Mark::X)
        .and_then(|b| b.place(4, Mark::O))
        .expect("Empty squares");

    let free: Vec<_> = board.empty_cells().collect();
    assert_eq!(free.len(), 7);
    assert!(!free.contains(&Position::TopLeft.to_index()));
    assert!(!free.contains(&Position::Center.to_index()));
    assert!(free.contains(&Position::BottomRight.to_index()));
    assert_eq!(board.at(Position::Center), Square::Occupied(Mark::O));
}

#[test]
fn test_place_leaves_receiver_alone() {
    let board = Board::new();
    let after = board.place(3, Mark::X).expect("Empty square");

    assert!(board.is_empty(3));
    assert_eq!(after.get(3), Ok(Square::Occupied(Mark::X)));
}

#[test]
fn test_place_rejects_occupied_and_out_of_range() {
    let board = Board::new().place(2, Mark::O).expect("Empty square");

    assert_eq!(board.place(2, Mark::X), Err(MoveError::CellOccupied(2)));
    assert_eq!(board.place(9, Mark::X), Err(MoveError::OutOfRange(9)));
    assert_eq!(board.get(9), Err(MoveError::OutOfRange(9)));
}
