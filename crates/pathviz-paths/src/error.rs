use std::fmt;

use pathviz_core::{Coordinate, GridError, Role};

/// Caller misuse detected before a search starts.
///
/// An exhausted frontier is not an error; it is reported as
/// [`PathResult::NotFound`](crate::PathResult::NotFound).
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// An endpoint is outside the grid.
    Grid(GridError),
    /// No neighbor policy has been applied to the grid yet.
    AdjacencyNotBuilt,
    /// The grid still holds search state from an earlier run.
    StaleSearchState,
    /// An endpoint is a wall.
    Unwalkable(Coordinate),
    /// The grid has no node holding this role.
    MissingEndpoint(Role),
    /// No heuristic is registered under this name.
    UnknownHeuristic(String),
    /// A [`SearchConfig`](crate::SearchConfig) value is out of range.
    InvalidConfig(&'static str),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "invalid search endpoint: {e}"),
            Self::AdjacencyNotBuilt => {
                f.write_str("grid adjacency not built; set a neighbor policy first")
            }
            Self::StaleSearchState => {
                f.write_str("grid holds state from a previous search; reset it first")
            }
            Self::Unwalkable(c) => write!(f, "search endpoint {c} is a wall"),
            Self::MissingEndpoint(role) => write!(f, "grid has no {role:?} node"),
            Self::UnknownHeuristic(name) => write!(f, "unknown heuristic \u{201c}{name}\u{201d}"),
            Self::InvalidConfig(what) => write!(f, "invalid search config: {what}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SearchError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
