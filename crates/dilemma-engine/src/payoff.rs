//! Payoff matrix for the Prisoner's Dilemma
//!
//! The table is ordered `[temptation, reward, punishment, sucker]`:
//!
//! | own | opponent | own gets      | opponent gets |
//! |-----|----------|---------------|---------------|
//! | C   | C        | `m[1]`        | `m[1]`        |
//! | D   | C        | `m[0]`        | `m[3]`        |
//! | C   | D        | `m[3]`        | `m[0]`        |
//! | D   | D        | `m[2]`        | `m[2]`        |

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::session::Points;
use crate::strategy::Move;

/// Default table: temptation 5, reward 3, punishment 1, sucker 0.
pub const DEFAULT_PAYOFF_MATRIX: [u32; 4] = [5, 3, 1, 0];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayoffMatrix([u32; 4]);

impl PayoffMatrix {
    pub const fn new(values: [u32; 4]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> [u32; 4] {
        self.0
    }

    pub fn temptation(&self) -> u32 {
        self.0[0]
    }

    pub fn reward(&self) -> u32 {
        self.0[1]
    }

    pub fn punishment(&self) -> u32 {
        self.0[2]
    }

    pub fn sucker(&self) -> u32 {
        self.0[3]
    }

    /// Score a single round. Returns (own, opponent).
    pub fn payoff(&self, own: Move, opponent: Move) -> Points {
        payoff(own, opponent, self)
    }
}

impl Default for PayoffMatrix {
    fn default() -> Self {
        Self(DEFAULT_PAYOFF_MATRIX)
    }
}

impl From<[u32; 4]> for PayoffMatrix {
    fn from(values: [u32; 4]) -> Self {
        Self(values)
    }
}

impl TryFrom<&[u32]> for PayoffMatrix {
    type Error = ConfigError;

    fn try_from(values: &[u32]) -> Result<Self, Self::Error> {
        let table: [u32; 4] = values
            .try_into()
            .map_err(|_| ConfigError::PayoffMatrixLength(values.len()))?;
        Ok(Self(table))
    }
}

/// Pure payoff lookup: no state beyond the two moves and the table.
pub fn payoff(own: Move, opponent: Move, matrix: &PayoffMatrix) -> Points {
    let [temptation, reward, punishment, sucker] = matrix.0;
    match (own, opponent) {
        (Move::Cooperate, Move::Cooperate) => Points::new(reward, reward),
        (Move::Defect, Move::Cooperate) => Points::new(temptation, sucker),
        (Move::Cooperate, Move::Defect) => Points::new(sucker, temptation),
        (Move::Defect, Move::Defect) => Points::new(punishment, punishment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_payoff_matrix() {
        let m = PayoffMatrix::default();
        assert_eq!(m.payoff(Move::Cooperate, Move::Cooperate), Points::new(3, 3));
        assert_eq!(m.payoff(Move::Cooperate, Move::Defect), Points::new(0, 5));
        assert_eq!(m.payoff(Move::Defect, Move::Cooperate), Points::new(5, 0));
        assert_eq!(m.payoff(Move::Defect, Move::Defect), Points::new(1, 1));
    }

    #[test]
    fn test_named_entries() {
        let m = PayoffMatrix::new([7, 4, 2, 1]);
        assert_eq!(m.temptation(), 7);
        assert_eq!(m.reward(), 4);
        assert_eq!(m.punishment(), 2);
        assert_eq!(m.sucker(), 1);
    }

    #[test]
    fn test_custom_matrix_symmetry() {
        let m = PayoffMatrix::new([7, 4, 2, 1]);
        assert_eq!(payoff(Move::Cooperate, Move::Cooperate, &m), Points::new(4, 4));
        assert_eq!(payoff(Move::Defect, Move::Defect, &m), Points::new(2, 2));
        assert_eq!(payoff(Move::Defect, Move::Cooperate, &m), Points::new(7, 1));
        assert_eq!(payoff(Move::Cooperate, Move::Defect, &m), Points::new(1, 7));
    }

    #[test]
    fn test_try_from_slice() {
        let m = PayoffMatrix::try_from(&[5u32, 3, 1, 0][..]).unwrap();
        assert_eq!(m, PayoffMatrix::default());

        let err = PayoffMatrix::try_from(&[5u32, 3, 1][..]).unwrap_err();
        assert!(matches!(err, ConfigError::PayoffMatrixLength(3)));

        let err = PayoffMatrix::try_from(&[0u32; 0][..]).unwrap_err();
        assert!(matches!(err, ConfigError::PayoffMatrixLength(0)));
    }
}
