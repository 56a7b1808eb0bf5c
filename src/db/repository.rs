//! Database repository for game records.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{DbError, GameChanges, GameRecord, NewGameRecord, StoredGame, schema};
use crate::error::GameError;
use crate::games::tictactoe::{Game, GameId, Mark};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a connection waits for another writer's lock before giving up.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Database repository for game records.
///
/// Each call opens its own SQLite connection, so the repository is cheap to
/// clone and safe to share across threads. Connections wait up to
/// [`BUSY_TIMEOUT_MS`] for a competing writer instead of failing with
/// `database is locked`.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository for the database at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new("Database path must not be empty"));
        }
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Establishes a database connection that waits out competing writers.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path).map_err(|e| {
            DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e))
        })?;
        conn.batch_execute(&format!("PRAGMA busy_timeout = {};", BUSY_TIMEOUT_MS))?;
        Ok(conn)
    }

    /// Applies any pending schema migrations and switches the database to
    /// WAL journaling, so readers never block the round in progress.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        conn.batch_execute("PRAGMA journal_mode = WAL;")?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Inserts a fresh game with an empty board.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn create_game(&self, first_player: Mark) -> Result<StoredGame, DbError> {
        debug!(%first_player, "Creating game");
        let mut conn = self.connection()?;

        let record = diesel::insert_into(schema::games::table)
            .values(&NewGameRecord::opening(first_player)?)
            .returning(GameRecord::as_returning())
            .get_result(&mut conn)?;

        info!(game_id = record.id(), "Game created");
        record.to_stored()
    }

    /// Loads a game by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs or the row is malformed.
    #[instrument(skip(self))]
    pub fn load_game(&self, id: GameId) -> Result<Option<StoredGame>, DbError> {
        let mut conn = self.connection()?;
        let record = find_record(&mut conn, id)?;

        if record.is_none() {
            debug!(game_id = id, "Game not found");
        }

        record.map(|r| r.to_stored()).transpose()
    }

    /// Overwrites the stored state of `game`.
    ///
    /// Prefer [`GameRepository::update_game_with`] for read-modify-write.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] if no row has the game's id, or
    /// [`GameError::Db`] if a database error occurs.
    #[instrument(skip(self, game), fields(game_id = game.id()))]
    pub fn save_game(&self, game: &Game) -> Result<StoredGame, GameError> {
        let mut conn = self.connection()?;
        let stored = write_game(&mut conn, game)?;
        info!(game_id = game.id(), status = ?game.status(), "Game saved");
        Ok(stored)
    }

    /// Runs `round` against the stored game and writes its result back, all
    /// inside one immediate transaction.
    ///
    /// SQLite takes the write lock when the transaction begins, so two rounds
    /// on the same game can never interleave. If `round` fails nothing is
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] if the game does not exist, whatever
    /// error `round` produces, or [`GameError::Db`] on database failure.
    #[instrument(skip(self, round))]
    pub fn update_game_with<T, F>(&self, id: GameId, round: F) -> Result<(StoredGame, T), GameError>
    where
        F: FnOnce(Game) -> Result<(Game, T), GameError>,
    {
        let mut conn = self.connection()?;

        conn.immediate_transaction::<_, RoundError, _>(|conn| {
            let record = find_record(conn, id)?.ok_or(GameError::NotFound(id))?;
            let current = *record.to_stored()?.game();

            let (next, output) = round(current)?;
            let stored = write_game(conn, &next)?;

            debug!(game_id = id, status = ?next.status(), "Round persisted");
            Ok((stored, output))
        })
        .map_err(|e| match e {
            RoundError::Diesel(err) => GameError::Db(DbError::from(err)),
            RoundError::Game(err) => err,
        })
    }

    /// Lists up to `limit` games, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs or a row is malformed.
    #[instrument(skip(self))]
    pub fn list_recent_games(&self, limit: i64) -> Result<Vec<StoredGame>, DbError> {
        let mut conn = self.connection()?;

        let records = schema::games::table
            .order((schema::games::created_at.desc(), schema::games::id.desc()))
            .limit(limit)
            .select(GameRecord::as_select())
            .load::<GameRecord>(&mut conn)?;

        info!(count = records.len(), "Recent games loaded");
        records.iter().map(GameRecord::to_stored).collect()
    }
}

/// Failure inside a round transaction.
///
/// diesel converts its own begin/commit failures with `From`, so they are
/// kept raw here and turned into [`DbError`] once the transaction returns.
enum RoundError {
    Diesel(diesel::result::Error),
    Game(GameError),
}

impl From<diesel::result::Error> for RoundError {
    fn from(err: diesel::result::Error) -> Self {
        RoundError::Diesel(err)
    }
}

impl From<GameError> for RoundError {
    fn from(err: GameError) -> Self {
        RoundError::Game(err)
    }
}

impl From<DbError> for RoundError {
    fn from(err: DbError) -> Self {
        RoundError::Game(GameError::Db(err))
    }
}

fn find_record(conn: &mut SqliteConnection, id: GameId) -> Result<Option<GameRecord>, DbError> {
    Ok(schema::games::table
        .find(id)
        .select(GameRecord::as_select())
        .first::<GameRecord>(conn)
        .optional()?)
}

fn write_game(conn: &mut SqliteConnection, game: &Game) -> Result<StoredGame, GameError> {
    let record = update_record(conn, game)?.ok_or(GameError::NotFound(game.id()))?;
    Ok(record.to_stored()?)
}

fn update_record(conn: &mut SqliteConnection, game: &Game) -> Result<Option<GameRecord>, DbError> {
    Ok(diesel::update(schema::games::table.find(game.id()))
        .set(&GameChanges::from_game(game)?)
        .returning(GameRecord::as_returning())
        .get_result(conn)
        .optional()?)
}
