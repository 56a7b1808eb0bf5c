//! Game service: the operations exposed to transports.
//!
//! Each operation is a thin pass-through around the turn engine and the
//! repository. No game rules live here.

use tracing::{info, instrument, warn};

use crate::db::{GameRepository, StoredGame};
use crate::error::GameError;
use crate::games::tictactoe::{GameId, Mark, RoundResult, apply_human_move};

/// Default number of games returned by [`GameService::list_recent_games`].
pub const DEFAULT_RECENT_LIMIT: i64 = 10;

/// Game operations backed by a repository.
#[derive(Debug, Clone)]
pub struct GameService {
    repository: GameRepository,
    recent_limit: i64,
}

impl GameService {
    /// Creates a service over `repository`.
    #[instrument(skip(repository))]
    pub fn new(repository: GameRepository, recent_limit: i64) -> Self {
        Self {
            repository,
            recent_limit: recent_limit.max(1),
        }
    }

    /// Starts a new game; `first_player` is the mark of the first human move.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] if the game cannot be stored.
    #[instrument(skip(self))]
    pub fn create_game(&self, first_player: Mark) -> Result<StoredGame, GameError> {
        let stored = self.repository.create_game(first_player)?;
        info!(game_id = stored.game().id(), %first_player, "Game started");
        Ok(stored)
    }

    /// Plays one round on the stored game and persists the outcome atomically.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] for an unknown id, [`GameError::Move`]
    /// for a rejected move (the stored game is left untouched), or
    /// [`GameError::Db`] on database failure.
    #[instrument(skip(self))]
    pub fn make_move(
        &self,
        game_id: GameId,
        position: usize,
    ) -> Result<(StoredGame, RoundResult), GameError> {
        let outcome = self.repository.update_game_with(game_id, |game| {
            let round = apply_human_move(game, position)?;
            Ok((round.game, round))
        });

        match &outcome {
            Ok((_, round)) => info!(
                game_id,
                game_over = round.game_over,
                message = %round.message,
                "Move processed"
            ),
            Err(err) => warn!(game_id, position, error = %err, "Move rejected"),
        }

        outcome
    }

    /// Fetches a game by id.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] for an unknown id or [`GameError::Db`]
    /// on database failure.
    #[instrument(skip(self))]
    pub fn get_game(&self, game_id: GameId) -> Result<StoredGame, GameError> {
        self.repository
            .load_game(game_id)?
            .ok_or(GameError::NotFound(game_id))
    }

    /// The most recently created games, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Db`] on database failure.
    #[instrument(skip(self))]
    pub fn list_recent_games(&self) -> Result<Vec<StoredGame>, GameError> {
        Ok(self.repository.list_recent_games(self.recent_limit)?)
    }
}
