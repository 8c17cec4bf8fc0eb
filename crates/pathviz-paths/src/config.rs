//! Search tuning: frontier tie-breaking and the step-cost model.

use pathviz_core::{Coordinate, NeighborPolicy};

use crate::SearchError;

/// How the frontier orders candidates with equal `f`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreak {
    /// The node that entered the frontier first wins.
    #[default]
    Fifo,
    /// The node that entered the frontier last wins.
    Lifo,
    /// The node with the smaller heuristic estimate wins, then [`Fifo`](Self::Fifo).
    LowestH,
}

/// Straight-path bias applied by default when diagonals are enabled.
pub const DEFAULT_STRAIGHT_BIAS: f64 = 0.1;

/// Options for one search run.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub tie_break: TieBreak,
    /// Discount taken off orthogonal steps when the grid also allows
    /// diagonal ones, so that among equally long routes the straighter one
    /// is cheaper. Must lie in `[0, 1)`; `None` turns it off.
    ///
    /// With the bias on, the cost model is no longer a metric and the
    /// returned path is not guaranteed shortest in step count. It has no
    /// effect on orthogonal-only grids.
    pub straight_bias: Option<f64>,
    /// Cost of one diagonal step. Must be finite and positive.
    pub diagonal_cost: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::Fifo,
            straight_bias: Some(DEFAULT_STRAIGHT_BIAS),
            diagonal_cost: 1.0,
        }
    }
}

impl SearchConfig {
    /// Plain A*: unit steps, no straight-path bias.
    pub fn unbiased() -> Self {
        Self {
            straight_bias: None,
            ..Self::default()
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_straight_bias(mut self, bias: Option<f64>) -> Self {
        self.straight_bias = bias;
        self
    }

    pub fn with_diagonal_cost(mut self, cost: f64) -> Self {
        self.diagonal_cost = cost;
        self
    }

    /// Reject values that could make a step cost zero or negative.
    pub fn validate(&self) -> Result<(), SearchError> {
        if let Some(bias) = self.straight_bias {
            if !(0.0..1.0).contains(&bias) {
                return Err(SearchError::InvalidConfig("straight_bias must lie in [0, 1)"));
            }
        }
        if !(self.diagonal_cost.is_finite() && self.diagonal_cost > 0.0) {
            return Err(SearchError::InvalidConfig(
                "diagonal_cost must be finite and positive",
            ));
        }
        Ok(())
    }

    /// Cost of moving between the adjacent cells `from` and `to` on a grid
    /// using `policy`.
    pub fn step_cost(&self, policy: NeighborPolicy, from: Coordinate, to: Coordinate) -> f64 {
        if from.is_diagonal_to(to) {
            return self.diagonal_cost;
        }
        match self.straight_bias {
            Some(bias) if policy.includes_diagonals() => 1.0 - bias,
            _ => 1.0,
        }
    }
}
