//! Strictly Versus - Unified CLI
//!
//! Serves the game API or inspects the game database.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use strictly_versus::{GameRepository, GameService, ServerConfig, router};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            db_path,
        } => {
            let config = ServerConfig::load_or_default(Some(config.as_path()))?
                .apply_env()?
                .with_overrides(host, port, db_path);
            run_http_server(config).await
        }
        Command::Games { db_path, limit } => show_recent_games(db_path, limit),
    }
}

/// Run the HTTP game server
#[instrument(skip(config), fields(host = %config.host(), port = config.port()))]
async fn run_http_server(config: ServerConfig) -> Result<()> {
    let repository = GameRepository::new(config.database_url().clone())?;
    repository.run_migrations()?;

    let service = GameService::new(repository, *config.recent_games_limit());
    let app = router(service);

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!("Server ready at http://{}:{}/", config.host(), config.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

/// Print recent games as board grids
#[instrument]
fn show_recent_games(db_path: String, limit: i64) -> Result<()> {
    let repository = GameRepository::new(db_path)?;
    repository.run_migrations()?;

    let games = repository.list_recent_games(limit.max(1))?;
    if games.is_empty() {
        println!("No games yet");
        return Ok(());
    }

    for stored in &games {
        let game = stored.game();
        println!(
            "Game {} ({:?}, next: {}, created {})\n{}\n",
            game.id(),
            game.status(),
            game.current_player(),
            stored.created_at(),
            game.board().display()
        );
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,strictly_versus=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
