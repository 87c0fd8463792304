//! Archive leaderboard

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use dilemma_engine::{leaderboard, read_archive_from_path};

pub fn run(archive: &Path, out: &mut impl Write) -> Result<()> {
    let games = read_archive_from_path(archive)
        .with_context(|| format!("failed to read archive {}", archive.display()))?;

    for standing in leaderboard(&games) {
        writeln!(out, "@{}\t\t{}", standing.opponent, standing.score)?;
    }
    Ok(())
}
