//! Offline play against the bot

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use dilemma_engine::{append_game_to_path, Move, Session, Turn, Verdict};

use super::open_engine;

const RULES: &str = "Hi, I'm the Prisoner's Dilemma Bot. We are going to play a game. \
Please reply with COOPERATE or DEFECT.";

pub struct Paths<'a> {
    pub games: &'a Path,
    pub archive: Option<&'a Path>,
    pub config: Option<&'a Path>,
}

pub fn run(paths: &Paths<'_>, opponent: &str, opponent_move: Move, out: &mut impl Write) -> Result<()> {
    let engine = open_engine(paths.games, paths.config)?;

    let turn = engine.play_now(opponent, opponent_move);
    writeln!(out, "{}", render(&turn, engine.moves_to_play()))?;

    engine
        .save_to_path(paths.games)
        .with_context(|| format!("failed to save sessions to {}", paths.games.display()))?;

    if let (Turn::Finished(game), Some(archive)) = (&turn, paths.archive) {
        append_game_to_path(archive, game)
            .with_context(|| format!("failed to archive game in {}", archive.display()))?;
    }
    Ok(())
}

/// Reply text for the opponent, written from their point of view.
pub fn render(turn: &Turn, moves_to_play: usize) -> String {
    match turn {
        Turn::Started(_) => RULES.to_string(),
        Turn::Played(session) => update(session, moves_to_play, ""),
        Turn::Finished(session) => update(session, moves_to_play, verdict_line(session.verdict())),
    }
}

fn update(session: &Session, moves_to_play: usize, ending: &str) -> String {
    let Some(last) = session.last_round() else {
        return RULES.to_string();
    };
    format!(
        "Move {} out of {}\n\nYour move: {}\nMy move: {}\n\n\
         You get {} points and I get {} points\n\n\
         Total points count:\nYou: {}\nMe: {}\n\n{}",
        session.rounds_played(),
        moves_to_play,
        last.opponent,
        last.own,
        session.last_points.opponent,
        session.last_points.own,
        session.total_points.opponent,
        session.total_points.own,
        ending,
    )
    .trim_end()
    .to_string()
}

fn verdict_line(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::OpponentWins => "CONGRATULATIONS - You won!",
        Verdict::BotWins => "You lost the game!",
        Verdict::Draw => "The game is a draw",
    }
}
