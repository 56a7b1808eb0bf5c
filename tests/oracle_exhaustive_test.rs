//! Walks every line of play against the move search and checks it never loses.

use strictly_versus::{Board, Mark, best_move, evaluate};

/// Tries every opponent reply from `board` (opponent to move) and lets the
/// search answer each one. Returns the number of finished games visited.
fn explore(board: Board, computer: Mark) -> usize {
    let opponent = computer.opponent();
    let mut finished = 0;

    for cell in board.empty_cells() {
        let after_opponent = board.place(cell, opponent).expect("Empty square");
        let outcome = evaluate(&after_opponent);
        assert_ne!(
            outcome.winner,
            Some(opponent),
            "search lost:\n{}",
            after_opponent.display()
        );
        if outcome.is_over {
            finished += 1;
            continue;
        }

        let reply = best_move(&after_opponent, computer).expect("Open board has a move");
        assert!(after_opponent.is_empty(reply), "search picked an occupied square");
        let after_reply = after_opponent.place(reply, computer).expect("Empty square");
        if evaluate(&after_reply).is_over {
            finished += 1;
        } else {
            finished += explore(after_reply, computer);
        }
    }

    finished
}

#[test]
fn test_search_as_second_player_never_loses() {
    let finished = explore(Board::new(), Mark::O);
    assert!(finished > 0);
}

#[test]
fn test_search_as_first_player_never_loses() {
    let opening = best_move(&Board::new(), Mark::X).expect("Empty board has a move");
    let board = Board::new().place(opening, Mark::X).expect("Empty square");
    let finished = explore(board, Mark::X);
    assert!(finished > 0);
}

#[test]
fn test_search_takes_win_even_when_opponent_threatens() {
    // For every board where the mover has an immediate win, the search wins at once.
    for board in two_threat_boards() {
        let cell = best_move(&board, Mark::O).expect("Move exists");
        let after = board.place(cell, Mark::O).expect("Empty square");
        assert_eq!(evaluate(&after).winner, Some(Mark::O), "missed win:\n{}", board.display());
    }
}

/// Boards where O (to move) and X each have one open winning square.
fn two_threat_boards() -> Vec<Board> {
    let x = Some(Mark::X);
    let o = Some(Mark::O);
    let e = None;
    vec![
        Board::from_cells([x, x, e, o, o, e, x, e, e]),
        Board::from_cells([o, x, x, o, e, e, e, x, e]),
        Board::from_cells([x, o, e, x, o, e, e, e, x]),
    ]
}
