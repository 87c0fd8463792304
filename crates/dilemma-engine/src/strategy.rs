//! Strategy definitions and execution

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A move in the Prisoner's Dilemma
///
/// Persisted as a boolean: `true` cooperates, `false` defects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum Move {
    Cooperate,
    Defect,
}

impl Move {
    pub fn is_cooperate(self) -> bool {
        self == Move::Cooperate
    }
}

impl From<bool> for Move {
    fn from(cooperate: bool) -> Self {
        if cooperate {
            Move::Cooperate
        } else {
            Move::Defect
        }
    }
}

impl From<Move> for bool {
    fn from(m: Move) -> Self {
        m.is_cooperate()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Cooperate => f.write_str("C"),
            Move::Defect => f.write_str("D"),
        }
    }
}

/// One recorded round: the bot's move and the opponent's move.
///
/// Persisted as an `[own, opponent]` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(Move, Move)", into = "(Move, Move)")]
pub struct Round {
    pub own: Move,
    pub opponent: Move,
}

impl Round {
    pub fn new(own: Move, opponent: Move) -> Self {
        Self { own, opponent }
    }
}

impl From<(Move, Move)> for Round {
    fn from((own, opponent): (Move, Move)) -> Self {
        Self { own, opponent }
    }
}

impl From<Round> for (Move, Move) {
    fn from(round: Round) -> Self {
        (round.own, round.opponent)
    }
}

/// Chooses the bot's next move from the rounds played so far.
///
/// Called once per round with the history as it stood before that round.
/// Implementations must be deterministic in `history`.
pub trait Strategy: Send + Sync {
    fn next_move(&self, history: &[Round]) -> Move;

    /// Human-readable description shown to operators.
    fn describe(&self) -> &str {
        "User-supplied strategy."
    }
}

impl<F> Strategy for F
where
    F: Fn(&[Round]) -> Move + Send + Sync,
{
    fn next_move(&self, history: &[Round]) -> Move {
        self(history)
    }
}

/// Built-in strategies, selectable by name from configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinStrategy {
    /// Copy opponent's last move. Start with cooperate.
    #[default]
    TitForTat,
    /// Always defect, never cooperate.
    AlwaysDefect,
    /// Always cooperate, never defect.
    AlwaysCooperate,
    /// Tit-for-Tat but start with defect.
    SuspiciousTitForTat,
    /// Cooperate until opponent defects once, then always defect.
    GrimTrigger,
    /// Defect only if opponent defected twice in a row.
    TitForTwoTats,
    /// Win-stay, lose-shift.
    Pavlov,
}

impl BuiltinStrategy {
    pub const ALL: [BuiltinStrategy; 7] = [
        BuiltinStrategy::TitForTat,
        BuiltinStrategy::AlwaysDefect,
        BuiltinStrategy::AlwaysCooperate,
        BuiltinStrategy::SuspiciousTitForTat,
        BuiltinStrategy::GrimTrigger,
        BuiltinStrategy::TitForTwoTats,
        BuiltinStrategy::Pavlov,
    ];

    /// Configuration name of this strategy
    pub fn name(self) -> &'static str {
        match self {
            BuiltinStrategy::TitForTat => "tit_for_tat",
            BuiltinStrategy::AlwaysDefect => "always_defect",
            BuiltinStrategy::AlwaysCooperate => "always_cooperate",
            BuiltinStrategy::SuspiciousTitForTat => "suspicious_tit_for_tat",
            BuiltinStrategy::GrimTrigger => "grim_trigger",
            BuiltinStrategy::TitForTwoTats => "tit_for_two_tats",
            BuiltinStrategy::Pavlov => "pavlov",
        }
    }
}

impl fmt::Display for BuiltinStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        BuiltinStrategy::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownStrategy(s.to_string()))
    }
}

impl Strategy for BuiltinStrategy {
    fn next_move(&self, history: &[Round]) -> Move {
        match self {
            BuiltinStrategy::TitForTat => tit_for_tat(history),
            BuiltinStrategy::AlwaysDefect => Move::Defect,
            BuiltinStrategy::AlwaysCooperate => Move::Cooperate,
            BuiltinStrategy::SuspiciousTitForTat => suspicious_tit_for_tat(history),
            BuiltinStrategy::GrimTrigger => grim_trigger(history),
            BuiltinStrategy::TitForTwoTats => tit_for_two_tats(history),
            BuiltinStrategy::Pavlov => pavlov(history),
        }
    }

    fn describe(&self) -> &str {
        match self {
            BuiltinStrategy::TitForTat => "Copies opponent's last move. Starts by cooperating.",
            BuiltinStrategy::AlwaysDefect => "Never cooperates. Always defects.",
            BuiltinStrategy::AlwaysCooperate => "Never defects. Always cooperates.",
            BuiltinStrategy::SuspiciousTitForTat => "Like Tit-for-Tat, but starts with defect.",
            BuiltinStrategy::GrimTrigger => "Cooperates until betrayed, then always defects.",
            BuiltinStrategy::TitForTwoTats => "Only retaliates after two consecutive defections.",
            BuiltinStrategy::Pavlov => "Repeats its move after a good outcome, switches after a bad one.",
        }
    }
}

/// Tit-for-Tat: Copy opponent's last move, start with cooperate
fn tit_for_tat(history: &[Round]) -> Move {
    history
        .last()
        .map_or(Move::Cooperate, |round| round.opponent)
}

fn suspicious_tit_for_tat(history: &[Round]) -> Move {
    history
        .last()
        .map_or(Move::Defect, |round| round.opponent)
}

fn grim_trigger(history: &[Round]) -> Move {
    if history.iter().any(|r| r.opponent == Move::Defect) {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

fn tit_for_two_tats(history: &[Round]) -> Move {
    if history.len() < 2 {
        return Move::Cooperate;
    }

    let last_two = &history[history.len() - 2..];
    if last_two.iter().all(|r| r.opponent == Move::Defect) {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

/// Pavlov: Win-stay, lose-shift
/// - CC (reward) and DC (temptation) keep the move
/// - CD (sucker) and DD (punishment) switch it
///
/// Which reduces to: cooperate iff both sides played the same move.
fn pavlov(history: &[Round]) -> Move {
    match history.last() {
        None => Move::Cooperate,
        Some(round) if round.own == round.opponent => Move::Cooperate,
        Some(_) => Move::Defect,
    }
}
