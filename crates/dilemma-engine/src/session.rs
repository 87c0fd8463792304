//! Per-opponent session record

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::strategy::{Move, Round};

/// Seconds since the Unix epoch.
pub type Timestamp = i64;

/// A pair of scores, the bot's first.
///
/// Persisted as an `[own, opponent]` pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct Points {
    pub own: u32,
    pub opponent: u32,
}

impl Points {
    pub const fn new(own: u32, opponent: u32) -> Self {
        Self { own, opponent }
    }
}

impl AddAssign for Points {
    fn add_assign(&mut self, rhs: Self) {
        self.own = self.own.saturating_add(rhs.own);
        self.opponent = self.opponent.saturating_add(rhs.opponent);
    }
}

impl From<[u32; 2]> for Points {
    fn from([own, opponent]: [u32; 2]) -> Self {
        Self { own, opponent }
    }
}

impl From<Points> for [u32; 2] {
    fn from(points: Points) -> Self {
        [points.own, points.opponent]
    }
}

/// Outcome of a finished game, from the totals
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    OpponentWins,
    BotWins,
    Draw,
}

/// State of one match against one opponent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "user")]
    pub opponent: String,
    #[serde(rename = "start_time")]
    pub started_at: Timestamp,
    #[serde(rename = "last_time")]
    pub last_activity_at: Timestamp,
    pub moves: Vec<Round>,
    pub total_points: Points,
    pub last_points: Points,
}

impl Session {
    /// Fresh session: no rounds, zeroed points.
    pub fn new(opponent: impl Into<String>, now: Timestamp) -> Self {
        Self {
            opponent: opponent.into(),
            started_at: now,
            last_activity_at: now,
            moves: Vec::new(),
            total_points: Points::default(),
            last_points: Points::default(),
        }
    }

    pub fn rounds_played(&self) -> usize {
        self.moves.len()
    }

    pub fn last_round(&self) -> Option<&Round> {
        self.moves.last()
    }

    /// Strictly more than `timeout_secs` since the last activity.
    pub fn is_expired(&self, now: Timestamp, timeout_secs: i64) -> bool {
        now.saturating_sub(self.last_activity_at) > timeout_secs
    }

    /// Seconds since the last activity, zero if `now` lies before it.
    pub fn idle_secs(&self, now: Timestamp) -> i64 {
        now.saturating_sub(self.last_activity_at).max(0)
    }

    pub fn verdict(&self) -> Verdict {
        let Points { own, opponent } = self.total_points;
        match own.cmp(&opponent) {
            std::cmp::Ordering::Less => Verdict::OpponentWins,
            std::cmp::Ordering::Greater => Verdict::BotWins,
            std::cmp::Ordering::Equal => Verdict::Draw,
        }
    }

    /// Append a scored round and bump the activity time.
    pub(crate) fn record(&mut self, own: Move, opponent: Move, points: Points, now: Timestamp) {
        self.moves.push(Round::new(own, opponent));
        self.last_points = points;
        self.total_points += points;
        // Never let a clock step backwards break last >= start.
        self.last_activity_at = now.max(self.started_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let s = Session::new("alice", 1_000);
        assert_eq!(s.opponent, "alice");
        assert_eq!(s.started_at, 1_000);
        assert_eq!(s.last_activity_at, 1_000);
        assert!(s.moves.is_empty());
        assert_eq!(s.total_points, Points::default());
        assert_eq!(s.last_points, Points::default());
        assert_eq!(s.verdict(), Verdict::Draw);
    }

    #[test]
    fn test_record_accumulates() {
        let mut s = Session::new("alice", 0);
        s.record(Move::Cooperate, Move::Defect, Points::new(0, 5), 10);
        s.record(Move::Defect, Move::Defect, Points::new(1, 1), 20);

        assert_eq!(s.rounds_played(), 2);
        assert_eq!(s.last_round(), Some(&Round::new(Move::Defect, Move::Defect)));
        assert_eq!(s.last_points, Points::new(1, 1));
        assert_eq!(s.total_points, Points::new(1, 6));
        assert_eq!(s.last_activity_at, 20);
        assert_eq!(s.verdict(), Verdict::OpponentWins);
    }

    #[test]
    fn test_record_keeps_activity_after_start() {
        let mut s = Session::new("alice", 100);
        s.record(Move::Cooperate, Move::Cooperate, Points::new(3, 3), 50);
        assert_eq!(s.last_activity_at, 100);
    }

    #[test]
    fn test_expiry_is_strict() {
        let s = Session::new("alice", 0);
        assert!(!s.is_expired(100, 100));
        assert!(s.is_expired(101, 100));
        assert_eq!(s.idle_secs(42), 42);
        assert_eq!(s.idle_secs(-5), 0);
    }

    #[test]
    fn test_verdict() {
        let mut s = Session::new("bob", 0);
        s.total_points = Points::new(9, 4);
        assert_eq!(s.verdict(), Verdict::BotWins);
        s.total_points = Points::new(4, 9);
        assert_eq!(s.verdict(), Verdict::OpponentWins);
    }

    #[test]
    fn test_serialized_field_names() {
        let mut s = Session::new("carol", 5);
        s.record(Move::Cooperate, Move::Cooperate, Points::new(3, 3), 7);

        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "user": "carol",
                "start_time": 5,
                "last_time": 7,
                "moves": [[true, true]],
                "total_points": [3, 3],
                "last_points": [3, 3],
            })
        );
    }
}
