//! Operator CLI for the Prisoner's Dilemma bot
//!
//! Works on the files the bot keeps on disk: the snapshot of active
//! sessions and the archive of finished games.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

use commands::MoveArg;

#[derive(Parser, Debug)]
#[command(name = "dilemma", version, about = "Prisoner's Dilemma bot operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank archived games by the opponent's final score
    Leaderboard {
        /// File storing the games that were finished as an archive
        #[arg(short, long, default_value = "archive.json")]
        archive: PathBuf,
    },

    /// List the sessions in a saved snapshot
    Sessions {
        /// File storing the active games of the bot
        #[arg(short, long, default_value = "active_games.json")]
        games: PathBuf,

        /// Engine configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Drop expired sessions and rewrite the snapshot
        #[arg(long)]
        sweep: bool,
    },

    /// Play one move against the bot and persist the result
    Play {
        /// Opponent handle
        #[arg(short, long)]
        opponent: String,

        /// File storing the active games of the bot
        #[arg(short, long, default_value = "active_games.json")]
        games: PathBuf,

        /// File storing the games that were finished as an archive
        #[arg(short, long)]
        archive: Option<PathBuf>,

        /// Engine configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// The opponent's move
        #[arg(value_enum)]
        opponent_move: MoveArg,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respects RUST_LOG, defaults to INFO. Logs go to stderr so reports stay clean.
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Leaderboard { archive } => commands::leaderboard::run(&archive, &mut stdout),
        Commands::Sessions {
            games,
            config,
            sweep,
        } => commands::sessions::run(&games, config.as_deref(), sweep, &mut stdout),
        Commands::Play {
            opponent,
            games,
            archive,
            config,
            opponent_move,
        } => {
            let paths = commands::play::Paths {
                games: &games,
                archive: archive.as_deref(),
                config: config.as_deref(),
            };
            commands::play::run(&paths, &opponent, opponent_move.into(), &mut stdout)
        }
    }
}
