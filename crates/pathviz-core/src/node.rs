//! The [`Node`] type — one grid cell's search-relevant state.

use crate::geom::Coordinate;

/// The endpoint role a node may hold.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[default]
    Normal,
    Start,
    End,
}

/// A single grid cell.
///
/// The coordinate is fixed at creation. Walkability and role are edited
/// through [`Grid`](crate::Grid) so that its invariants hold; the
/// search-scoped fields (`g`, `h`, `f`, `predecessor`) are written by the
/// search engine and cleared by
/// [`Grid::reset_search_state`](crate::Grid::reset_search_state).
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    coordinate: Coordinate,
    pub(crate) walkable: bool,
    pub(crate) role: Role,
    pub(crate) neighbors: Vec<Coordinate>,
    /// Cost from the start node.
    pub g: Option<f64>,
    /// Heuristic estimate to the goal.
    pub h: Option<f64>,
    /// `g + h`.
    pub f: Option<f64>,
    /// Node this one was reached from on its best known route.
    pub predecessor: Option<Coordinate>,
}

impl Node {
    /// A walkable, `Normal` node with no neighbors and no search state.
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            walkable: true,
            role: Role::Normal,
            neighbors: Vec::new(),
            g: None,
            h: None,
            f: None,
            predecessor: None,
        }
    }

    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    #[inline]
    pub fn is_walkable(&self) -> bool {
        self.walkable
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        !self.walkable
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Adjacent coordinates under the grid's current neighbor policy.
    #[inline]
    pub fn neighbors(&self) -> &[Coordinate] {
        &self.neighbors
    }

    /// Clear `g`, `h`, `f` and `predecessor`.
    #[inline]
    pub fn reset_search_state(&mut self) {
        self.g = None;
        self.h = None;
        self.f = None;
        self.predecessor = None;
    }

    /// Record a (better) route to this node.
    #[inline]
    pub fn relax(&mut self, g: f64, h: f64, predecessor: Coordinate) {
        self.g = Some(g);
        self.h = Some(h);
        self.f = Some(g + h);
        self.predecessor = Some(predecessor);
    }
}
