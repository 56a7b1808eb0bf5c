//! JSON HTTP API over the game service.
//!
//! Routes:
//! - `GET  /health`             - liveness probe
//! - `POST /games`              - start a game
//! - `GET  /games`              - most recent games
//! - `GET  /games/{id}`         - one game
//! - `POST /games/{id}/moves`   - play a round

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::db::{DbError, StoredGame};
use crate::error::GameError;
use crate::games::tictactoe::{
    BOARD_SIZE, GameId, GameStatus, Mark, MoveError, MoveRecord, RoundResult,
};
use crate::service::GameService;

/// Request body for starting a game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateGameRequest {
    /// Mark of the first human move (defaults to X).
    #[serde(default)]
    pub human_player: Option<Mark>,
}

/// Request body for playing a round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakeMoveRequest {
    /// Position on board (0-8, where 0=top-left, 8=bottom-right).
    pub position: usize,
}

/// Game status as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusView {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won,
    /// Game ended in a draw.
    Draw,
}

/// A game as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    /// Game id.
    pub id: GameId,
    /// Row-major cells, `null` meaning empty.
    pub board_state: [Option<Mark>; BOARD_SIZE],
    /// Mark of the next human move.
    pub current_player: Mark,
    /// Game status.
    pub status: StatusView,
    /// Winner, present only when the status is `won`.
    pub winner: Option<Mark>,
    /// Creation time (UTC).
    pub created_at: NaiveDateTime,
    /// Last update time (UTC).
    pub updated_at: NaiveDateTime,
}

impl From<&StoredGame> for GameView {
    fn from(stored: &StoredGame) -> Self {
        let game = stored.game();
        let status = match game.status() {
            GameStatus::InProgress => StatusView::InProgress,
            GameStatus::Won(_) => StatusView::Won,
            GameStatus::Draw => StatusView::Draw,
        };
        Self {
            id: game.id(),
            board_state: game.board().cells(),
            current_player: game.current_player(),
            status,
            winner: game.winner(),
            created_at: *stored.created_at(),
            updated_at: *stored.updated_at(),
        }
    }
}

/// Response to a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    /// The game after the round.
    pub game: GameView,
    /// The human placement.
    pub human_move: MoveRecord,
    /// The computer placement, if the game was still open.
    pub computer_move: Option<MoveRecord>,
    /// True once the game is won or drawn.
    pub game_over: bool,
    /// Human-readable summary.
    pub message: String,
}

impl MoveResponse {
    fn new(stored: &StoredGame, round: RoundResult) -> Self {
        Self {
            game: GameView::from(stored),
            human_move: round.human_move,
            computer_move: round.computer_move,
            game_over: round.game_over,
            message: round.message,
        }
    }
}

/// Health probe response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Server time (RFC 3339).
    pub timestamp: String,
}

/// Error body returned with every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error.
    pub error: String,
}

/// Service error rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(GameError);

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            GameError::NotFound(_) => StatusCode::NOT_FOUND,
            GameError::Move(MoveError::OutOfRange(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            GameError::Move(MoveError::CellOccupied(_) | MoveError::GameNotInProgress) => {
                StatusCode::CONFLICT
            }
            GameError::Move(MoveError::NoLegalMove) | GameError::Db(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        } else {
            debug!(error = %self.0, %status, "Request rejected");
        }
        (status, Json(ErrorResponse { error: self.0.to_string() })).into_response()
    }
}

/// Builds the API router.
#[instrument(skip(service))]
pub fn router(service: GameService) -> Router {
    info!("Building API router");
    Router::new()
        .route("/health", get(health))
        .route("/games", post(create_game).get(list_recent_games))
        .route("/games/{id}", get(get_game))
        .route("/games/{id}/moves", post(make_move))
        .with_state(service)
}

/// Runs a blocking service call on the blocking thread pool.
async fn blocking<T, F>(service: GameService, call: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&GameService) -> Result<T, GameError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || call(&service))
        .await
        .map_err(|e| {
            error!(error = %e, "Blocking task failed");
            ApiError(GameError::Db(DbError::new(format!("Task failed: {}", e))))
        })?
        .map_err(ApiError::from)
}

#[instrument]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[instrument(skip(service))]
async fn create_game(
    State(service): State<GameService>,
    body: Option<Json<CreateGameRequest>>,
) -> Result<(StatusCode, Json<GameView>), ApiError> {
    let first = body
        .and_then(|Json(req)| req.human_player)
        .unwrap_or(Mark::X);
    let stored = blocking(service, move |s| s.create_game(first)).await?;
    Ok((StatusCode::CREATED, Json(GameView::from(&stored))))
}

#[instrument(skip(service))]
async fn list_recent_games(
    State(service): State<GameService>,
) -> Result<Json<Vec<GameView>>, ApiError> {
    let games = blocking(service, |s| s.list_recent_games()).await?;
    Ok(Json(games.iter().map(GameView::from).collect()))
}

#[instrument(skip(service))]
async fn get_game(
    State(service): State<GameService>,
    Path(id): Path<GameId>,
) -> Result<Json<GameView>, ApiError> {
    let stored = blocking(service, move |s| s.get_game(id)).await?;
    Ok(Json(GameView::from(&stored)))
}

#[instrument(skip(service, req), fields(position = req.position))]
async fn make_move(
    State(service): State<GameService>,
    Path(id): Path<GameId>,
    Json(req): Json<MakeMoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    let position = req.position;
    let (stored, round) = blocking(service, move |s| s.make_move(id, position))
        .await
        .inspect_err(|e| warn!(game_id = id, position, error = %e.0, "Move failed"))?;
    Ok(Json(MoveResponse::new(&stored, round)))
}
