//! Payoff sources: map an ordered action pair to a reward pair

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::GameError;

/// Numeric reward for one agent in one round
pub type Reward = f64;

/// Pure mapping from (action_1, action_2) to (reward_1, reward_2)
///
/// Implementations must be deterministic and free of hidden state; the
/// session calls `payoff` exactly once per step, and only with actions
/// that belong to its action set.
pub trait PayoffSource {
    fn payoff(&self, action_1: Action, action_2: Action) -> (Reward, Reward);

    /// Number of actions this source is defined over, when it knows.
    ///
    /// Sessions use this to reject a source built for a different game.
    fn num_actions(&self) -> Option<usize> {
        None
    }
}

impl<F> PayoffSource for F
where
    F: Fn(Action, Action) -> (Reward, Reward),
{
    fn payoff(&self, action_1: Action, action_2: Action) -> (Reward, Reward) {
        self(action_1, action_2)
    }
}

/// Table-backed payoff source for an N x N bimatrix game
///
/// Serialized as rows of `[reward_1, reward_2]` cells, where row `i` is
/// the first agent's action and column `j` the second's.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<(Reward, Reward)>>", into = "Vec<Vec<(Reward, Reward)>>")]
pub struct PayoffMatrix {
    size: usize,
    cells: Vec<(Reward, Reward)>,
}

impl PayoffMatrix {
    /// Build from row-major cells; `cells.len()` must be `size * size`
    pub fn new(size: usize, cells: Vec<(Reward, Reward)>) -> Result<Self, GameError> {
        if size == 0 {
            return Err(GameError::EmptyActionSet);
        }
        let expected = size * size;
        if cells.len() != expected {
            return Err(GameError::MalformedPayoffTable {
                expected,
                found: cells.len(),
            });
        }
        Ok(Self { size, cells })
    }

    /// Build from one row per first-agent action
    pub fn from_rows(rows: Vec<Vec<(Reward, Reward)>>) -> Result<Self, GameError> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return Err(GameError::MalformedPayoffTable {
                expected: size * size,
                found: rows.iter().map(Vec::len).sum(),
            });
        }
        Self::new(size, rows.into_iter().flatten().collect())
    }

    /// Symmetric game: the second agent's reward for (i, j) is the first
    /// agent's reward for (j, i)
    pub fn symmetric(rows: Vec<Vec<Reward>>) -> Result<Self, GameError> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return Err(GameError::MalformedPayoffTable {
                expected: size * size,
                found: rows.iter().map(Vec::len).sum(),
            });
        }
        let mut cells = Vec::with_capacity(size * size);
        for i in 0..size {
            for j in 0..size {
                cells.push((rows[i][j], rows[j][i]));
            }
        }
        Self::new(size, cells)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Checked lookup
    pub fn get(&self, action_1: Action, action_2: Action) -> Option<(Reward, Reward)> {
        if action_1.0 >= self.size || action_2.0 >= self.size {
            return None;
        }
        Some(self.cells[action_1.0 * self.size + action_2.0])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[(Reward, Reward)]> {
        self.cells.chunks(self.size)
    }
}

impl PayoffSource for PayoffMatrix {
    /// Panics on out-of-range actions, which sessions never pass.
    fn payoff(&self, action_1: Action, action_2: Action) -> (Reward, Reward) {
        assert!(
            action_1.0 < self.size && action_2.0 < self.size,
            "payoff lookup ({}, {}) outside {}x{} table",
            action_1,
            action_2,
            self.size,
            self.size
        );
        self.cells[action_1.0 * self.size + action_2.0]
    }

    fn num_actions(&self) -> Option<usize> {
        Some(self.size)
    }
}

impl TryFrom<Vec<Vec<(Reward, Reward)>>> for PayoffMatrix {
    type Error = GameError;

    fn try_from(rows: Vec<Vec<(Reward, Reward)>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<PayoffMatrix> for Vec<Vec<(Reward, Reward)>> {
    fn from(matrix: PayoffMatrix) -> Self {
        matrix.rows().map(<[_]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dilemma() -> PayoffMatrix {
        PayoffMatrix::from_rows(vec![
            vec![(3.0, 3.0), (0.0, 5.0)],
            vec![(5.0, 0.0), (1.0, 1.0)],
        ])
        .unwrap()
    }

    #[test]
    fn test_payoff_matrix() {
        let m = dilemma();
        assert_eq!(m.payoff(Action(0), Action(0)), (3.0, 3.0));
        assert_eq!(m.payoff(Action(0), Action(1)), (0.0, 5.0));
        assert_eq!(m.payoff(Action(1), Action(0)), (5.0, 0.0));
        assert_eq!(m.payoff(Action(1), Action(1)), (1.0, 1.0));
        assert_eq!(m.num_actions(), Some(2));
    }

    #[test]
    fn test_symmetric_matches_explicit() {
        let m = PayoffMatrix::symmetric(vec![vec![3.0, 0.0], vec![5.0, 1.0]]).unwrap();
        assert_eq!(m, dilemma());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = PayoffMatrix::from_rows(vec![vec![(1.0, 1.0), (0.0, 0.0)], vec![(1.0, 1.0)]])
            .unwrap_err();
        assert!(matches!(
            err,
            GameError::MalformedPayoffTable { expected: 4, found: 3 }
        ));
    }

    #[test]
    fn test_ragged_rows_report_real_cell_count() {
        let err = PayoffMatrix::from_rows(vec![
            vec![(1.0, 1.0), (0.0, 0.0), (2.0, 2.0)],
            vec![(1.0, 1.0)],
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            GameError::MalformedPayoffTable { expected: 4, found: 4 }
        ));

        let err = PayoffMatrix::symmetric(vec![vec![1.0, 2.0, 3.0], vec![4.0], vec![]])
            .unwrap_err();
        assert!(matches!(
            err,
            GameError::MalformedPayoffTable { expected: 9, found: 4 }
        ));
    }

    #[test]
    fn test_wrong_cell_count_rejected() {
        let err = PayoffMatrix::new(2, vec![(0.0, 0.0); 3]).unwrap_err();
        assert!(matches!(
            err,
            GameError::MalformedPayoffTable { expected: 4, found: 3 }
        ));
        assert!(matches!(
            PayoffMatrix::new(0, Vec::new()),
            Err(GameError::EmptyActionSet)
        ));
    }

    #[test]
    fn test_checked_lookup() {
        let m = dilemma();
        assert_eq!(m.get(Action(1), Action(0)), Some((5.0, 0.0)));
        assert_eq!(m.get(Action(2), Action(0)), None);
    }

    #[test]
    #[should_panic(expected = "outside 2x2 table")]
    fn test_unchecked_lookup_panics_out_of_range() {
        dilemma().payoff(Action(0), Action(2));
    }

    #[test]
    fn test_closure_source() {
        let constant = |_: Action, _: Action| (1.0, -1.0);
        assert_eq!(constant.payoff(Action(4), Action(7)), (1.0, -1.0));
        assert_eq!(constant.num_actions(), None);
    }

    #[test]
    fn test_json_rows() {
        let json = "[[[3,3],[0,5]],[[5,0],[1,1]]]";
        let m: PayoffMatrix = serde_json::from_str(json).unwrap();
        assert_eq!(m, dilemma());

        let back = serde_json::to_string(&m).unwrap();
        assert_eq!(back, "[[[3.0,3.0],[0.0,5.0]],[[5.0,0.0],[1.0,1.0]]]");
    }
}
