//! Database persistence layer for game records.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use models::{GameChanges, GameRecord, NewGameRecord, StoredGame};
pub use repository::{GameRepository, MIGRATIONS};
