//! Archive of finished games and the leaderboard built from it
//!
//! The archive is JSON Lines: one finished session per line, appended as
//! games end.

use std::fs::OpenOptions;
use std::io::{BufRead, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::ArchiveError;
use crate::session::Session;

pub fn append_game<W: Write>(mut writer: W, game: &Session) -> Result<(), ArchiveError> {
    let mut line = serde_json::to_vec(game)?;
    line.push(b'\n');
    writer.write_all(&line)?;
    writer.flush()?;
    Ok(())
}

pub fn append_game_to_path(path: &Path, game: &Session) -> Result<(), ArchiveError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    append_game(file, game)
}

/// Parse every non-blank line. Line numbers in errors are 1-based.
pub fn read_archive<R: BufRead>(reader: R) -> Result<Vec<Session>, ArchiveError> {
    let mut games = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let game = serde_json::from_str(&line).map_err(|source| ArchiveError::Line {
            line: index + 1,
            source,
        })?;
        games.push(game);
    }
    Ok(games)
}

pub fn read_archive_from_path(path: &Path) -> Result<Vec<Session>, ArchiveError> {
    let file = std::fs::File::open(path)?;
    read_archive(std::io::BufReader::new(file))
}

/// One leaderboard row: an opponent and the score they reached in one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub opponent: String,
    pub score: u32,
}

/// Rank games by the opponent's total, highest first. Ties keep archive order.
pub fn leaderboard(games: &[Session]) -> Vec<Standing> {
    let mut standings: Vec<Standing> = games
        .iter()
        .map(|g| Standing {
            opponent: g.opponent.clone(),
            score: g.total_points.opponent,
        })
        .collect();
    standings.sort_by(|a, b| b.score.cmp(&a.score));
    standings
}
