//! Database models and their mapping to domain types.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use diesel::prelude::*;
use tracing::instrument;

use crate::db::{DbError, schema};
use crate::games::tictactoe::{BOARD_SIZE, Board, Game, GameStatus, Mark};

/// Game row as stored in the `games` table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::games)]
pub struct GameRecord {
    id: i32,
    board_state: String,
    current_player: String,
    status: String,
    winner: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl GameRecord {
    /// Decodes the row into a [`StoredGame`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if any column holds a value the game model rejects.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn to_stored(&self) -> Result<StoredGame, DbError> {
        let board = decode_board(&self.board_state)?;
        let current_player = decode_mark(&self.current_player)?;
        let winner = self.winner.as_deref().map(decode_mark).transpose()?;
        let status = StatusColumn::from_db_string(&self.status)?.into_status(winner)?;

        Ok(StoredGame::new(
            Game::from_parts(self.id, board, current_player, status),
            self.created_at,
            self.updated_at,
        ))
    }
}

/// Insertable row for a fresh game.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::games)]
pub struct NewGameRecord {
    board_state: String,
    current_player: String,
    status: String,
    winner: Option<String>,
}

impl NewGameRecord {
    /// Row for an empty board where `first_player` moves first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the board cannot be encoded.
    #[instrument]
    pub fn opening(first_player: Mark) -> Result<Self, DbError> {
        Ok(Self {
            board_state: encode_board(&Board::new())?,
            current_player: first_player.to_string(),
            status: StatusColumn::InProgress.to_db_string().to_string(),
            winner: None,
        })
    }
}

/// Column values written back after a round.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::games)]
#[diesel(treat_none_as_null = true)]
pub struct GameChanges {
    board_state: String,
    current_player: String,
    status: String,
    winner: Option<String>,
    updated_at: NaiveDateTime,
}

impl GameChanges {
    /// Captures the mutable columns of `game`, stamping `updated_at` now.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the board cannot be encoded.
    #[instrument(skip(game), fields(game_id = game.id()))]
    pub fn from_game(game: &Game) -> Result<Self, DbError> {
        Ok(Self {
            board_state: encode_board(game.board())?,
            current_player: game.current_player().to_string(),
            status: StatusColumn::from_status(game.status()).to_db_string().to_string(),
            winner: game.winner().map(|mark| mark.to_string()),
            updated_at: chrono::Utc::now().naive_utc(),
        })
    }
}

/// A game together with its bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_new::new)]
pub struct StoredGame {
    game: Game,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

/// Status as stored in the `status` column; the winner lives in its own column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusColumn {
    InProgress,
    Won,
    Draw,
}

impl StatusColumn {
    fn from_status(status: GameStatus) -> Self {
        match status {
            GameStatus::InProgress => Self::InProgress,
            GameStatus::Won(_) => Self::Won,
            GameStatus::Draw => Self::Draw,
        }
    }

    fn to_db_string(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Won => "won",
            Self::Draw => "draw",
        }
    }

    fn from_db_string(s: &str) -> Result<Self, DbError> {
        match s {
            "in_progress" => Ok(Self::InProgress),
            "won" => Ok(Self::Won),
            "draw" => Ok(Self::Draw),
            _ => Err(DbError::new(format!("Invalid status: '{}'", s))),
        }
    }

    fn into_status(self, winner: Option<Mark>) -> Result<GameStatus, DbError> {
        match (self, winner) {
            (Self::Won, Some(mark)) => Ok(GameStatus::Won(mark)),
            (Self::InProgress, None) => Ok(GameStatus::InProgress),
            (Self::Draw, None) => Ok(GameStatus::Draw),
            (status, winner) => Err(DbError::new(format!(
                "Status '{}' inconsistent with winner {:?}",
                status.to_db_string(),
                winner
            ))),
        }
    }
}

fn decode_mark(s: &str) -> Result<Mark, DbError> {
    s.parse().map_err(|_| DbError::new(format!("Invalid mark: '{}'", s)))
}

/// Boards are stored as a JSON array of nine `"X"`, `"O"` or `null` entries.
fn encode_board(board: &Board) -> Result<String, DbError> {
    Ok(serde_json::to_string(&board.cells())?)
}

fn decode_board(s: &str) -> Result<Board, DbError> {
    let cells: Vec<Option<Mark>> = serde_json::from_str(s)?;
    let cells: [Option<Mark>; BOARD_SIZE] = cells.try_into().map_err(|cells: Vec<_>| {
        DbError::new(format!("Board must have {} cells, found {}", BOARD_SIZE, cells.len()))
    })?;
    Ok(Board::from_cells(cells))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_encoding() {
        let board = Board::new().place(4, Mark::X).expect("Valid placement");
        let encoded = encode_board(&board).expect("Encode failed");
        assert_eq!(encoded, r#"[null,null,null,null,"X",null,null,null,null]"#);
        assert_eq!(decode_board(&encoded).expect("Decode failed"), board);
    }

    #[test]
    fn test_board_wrong_length_rejected() {
        assert!(decode_board(r#"[null,"X"]"#).is_err());
        assert!(decode_board(r#"[null,null,null,null,"Z",null,null,null,null]"#).is_err());
    }

    #[test]
    fn test_status_winner_consistency() {
        assert_eq!(
            StatusColumn::Won.into_status(Some(Mark::O)).expect("Valid"),
            GameStatus::Won(Mark::O)
        );
        assert!(StatusColumn::Won.into_status(None).is_err());
        assert!(StatusColumn::Draw.into_status(Some(Mark::X)).is_err());
        assert!(StatusColumn::from_db_string("paused").is_err());
    }
}
