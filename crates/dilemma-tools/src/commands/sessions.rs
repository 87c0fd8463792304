//! Saved-session inspection and sweep

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::open_engine;

pub fn run(games: &Path, config: Option<&Path>, sweep: bool, out: &mut impl Write) -> Result<()> {
    let engine = open_engine(games, config)?;
    let now = engine.now();

    if sweep {
        let removed = engine.sweep_expired(now);
        engine
            .save_to_path(games)
            .with_context(|| format!("failed to save sessions to {}", games.display()))?;
        info!(removed, "sweep complete");
    }

    writeln!(out, "opponent\trounds\tme\tthem\tidle_secs")?;
    for (opponent, session) in engine.snapshot() {
        writeln!(
            out,
            "@{}\t{}/{}\t{}\t{}\t{}{}",
            opponent,
            session.rounds_played(),
            engine.moves_to_play(),
            session.total_points.own,
            session.total_points.opponent,
            session.idle_secs(now),
            if session.is_expired(now, engine.timeout_secs()) {
                "\texpired"
            } else {
                ""
            },
        )?;
    }
    Ok(())
}
