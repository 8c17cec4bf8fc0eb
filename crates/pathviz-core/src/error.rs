//! Errors raised by grid edits.

use std::fmt;

use crate::geom::{Bounds, Coordinate};
use crate::node::Role;

/// Misuse of a [`Grid`](crate::Grid). A rejected edit leaves the grid
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A grid needs at least one row and one column.
    InvalidDimensions { rows: usize, cols: usize },
    /// The coordinate lies outside the grid.
    OutOfBounds { coord: Coordinate, bounds: Bounds },
    /// The coordinate already holds the opposite endpoint role.
    RoleConflict { coord: Coordinate, held: Role },
    /// Start and End cells cannot become walls.
    ProtectedCell { coord: Coordinate, role: Role },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "grid dimensions must be at least 1x1, got {rows}x{cols}")
            }
            Self::OutOfBounds { coord, bounds } => {
                write!(f, "coordinate {coord} is outside the {bounds} grid")
            }
            Self::RoleConflict { coord, held } => {
                write!(f, "coordinate {coord} already holds the {held:?} role")
            }
            Self::ProtectedCell { coord, role } => {
                write!(f, "cannot place a wall on the {role:?} node at {coord}")
            }
        }
    }
}

impl std::error::Error for GridError {}
