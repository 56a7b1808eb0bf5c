//! Command-line interface for strictly_versus.

use clap::{Parser, Subcommand};

/// Strictly Versus - tic-tac-toe against a minimax opponent
#[derive(Parser, Debug)]
#[command(name = "strictly_versus")]
#[command(about = "Tic-tac-toe game server with an unbeatable computer player", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long, default_value = "strictly_versus.toml")]
        config: std::path::PathBuf,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the database file (created if it doesn't exist)
        #[arg(long)]
        db_path: Option<String>,
    },

    /// Print the most recent games
    Games {
        /// Path to the database file
        #[arg(long, default_value = "strictly_versus.db")]
        db_path: String,

        /// Maximum number of games to show
        #[arg(short, long, default_value = "10")]
        limit: i64,
    },
}
