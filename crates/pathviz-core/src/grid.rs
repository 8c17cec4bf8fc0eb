//! The [`Grid`] type — an owned, rectangular graph of [`Node`]s.
//!
//! A `Grid` is the only owner of its nodes. Edits go through methods that
//! keep the endpoint invariants intact: at most one Start, at most one End,
//! never on the same cell, and neither of them ever a wall.

use crate::error::GridError;
use crate::geom::{Bounds, Coordinate, Offset};
use crate::node::{Node, Role};

// ---------------------------------------------------------------------------
// NeighborPolicy
// ---------------------------------------------------------------------------

/// Which cells count as adjacent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeighborPolicy {
    /// Up, down, left and right.
    #[default]
    Orthogonal,
    /// Orthogonal plus the four diagonals.
    Diagonal,
}

impl NeighborPolicy {
    #[inline]
    pub fn includes_diagonals(self) -> bool {
        matches!(self, Self::Diagonal)
    }

    /// Offsets in neighbor order: orthogonal first, then diagonals.
    pub fn offsets(self) -> impl Iterator<Item = Offset> {
        let orthogonal: &'static [Offset] = &Offset::ORTHOGONAL;
        let diagonals: &'static [Offset] = if self.includes_diagonals() {
            &Offset::DIAGONAL
        } else {
            &[]
        };
        orthogonal.iter().chain(diagonals).copied()
    }
}

impl From<bool> for NeighborPolicy {
    /// `true` enables diagonal adjacency.
    fn from(include_diagonals: bool) -> Self {
        if include_diagonals {
            Self::Diagonal
        } else {
            Self::Orthogonal
        }
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A `rows × cols` grid of nodes.
///
/// Nodes are created with the grid and live exactly as long as it does;
/// resetting only reinitializes their fields.
#[derive(Clone, Debug)]
pub struct Grid {
    bounds: Bounds,
    nodes: Vec<Node>,
    policy: Option<NeighborPolicy>,
    start: Option<Coordinate>,
    end: Option<Coordinate>,
    searched: bool,
}

impl Grid {
    /// Create a grid of walkable `Normal` nodes with empty neighbor lists.
    ///
    /// Call [`set_neighbor_policy`](Self::set_neighbor_policy) before
    /// searching, or use [`with_policy`](Self::with_policy).
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        let bounds = Bounds::new(rows, cols);
        Ok(Self {
            bounds,
            nodes: bounds.iter().map(Node::new).collect(),
            policy: None,
            start: None,
            end: None,
            searched: false,
        })
    }

    /// Create a grid and build its adjacency in one step.
    pub fn with_policy(
        rows: usize,
        cols: usize,
        policy: impl Into<NeighborPolicy>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(rows, cols)?;
        grid.set_neighbor_policy(policy);
        Ok(grid)
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.bounds.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.bounds.cols
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; a grid has at least one node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, c: Coordinate) -> bool {
        self.bounds.contains(c)
    }

    /// Return `c` unchanged if it is inside the grid.
    pub fn check_bounds(&self, c: Coordinate) -> Result<Coordinate, GridError> {
        if self.contains(c) {
            Ok(c)
        } else {
            Err(GridError::OutOfBounds {
                coord: c,
                bounds: self.bounds,
            })
        }
    }

    #[inline]
    pub fn node(&self, c: Coordinate) -> Option<&Node> {
        self.bounds.index(c).map(|i| &self.nodes[i])
    }

    /// Mutable access for search engines. Only the search-scoped fields are
    /// writable from outside this crate.
    #[inline]
    pub fn node_mut(&mut self, c: Coordinate) -> Option<&mut Node> {
        self.bounds.index(c).map(|i| &mut self.nodes[i])
    }

    /// Row-major iterator over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// `false` for walls and for coordinates outside the grid.
    #[inline]
    pub fn is_walkable(&self, c: Coordinate) -> bool {
        self.node(c).is_some_and(Node::is_walkable)
    }

    /// Neighbors of `c`; empty if `c` is outside the grid.
    #[inline]
    pub fn neighbors(&self, c: Coordinate) -> &[Coordinate] {
        self.node(c).map(Node::neighbors).unwrap_or(&[])
    }

    pub fn wall_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_wall()).count()
    }

    // -----------------------------------------------------------------------
    // Adjacency
    // -----------------------------------------------------------------------

    /// The policy the neighbor lists were last built with, if any.
    #[inline]
    pub fn neighbor_policy(&self) -> Option<NeighborPolicy> {
        self.policy
    }

    /// Rebuild every node's neighbor list under `policy`.
    ///
    /// Edge and corner nodes get fewer neighbors; there is no wraparound.
    /// Wall edits never require calling this again.
    pub fn set_neighbor_policy(&mut self, policy: impl Into<NeighborPolicy>) {
        let policy = policy.into();
        let bounds = self.bounds;
        for node in self.nodes.iter_mut() {
            let c = node.coordinate();
            node.neighbors.clear();
            node.neighbors.extend(
                policy
                    .offsets()
                    .filter_map(|o| c.offset(o))
                    .filter(|&n| bounds.contains(n)),
            );
        }
        self.policy = Some(policy);
    }

    // -----------------------------------------------------------------------
    // Walls
    // -----------------------------------------------------------------------

    /// Mark or clear a wall. Start and End cannot become walls.
    pub fn set_wall(&mut self, c: Coordinate, is_wall: bool) -> Result<(), GridError> {
        let c = self.check_bounds(c)?;
        let node = &mut self.nodes[c.row * self.bounds.cols + c.col];
        if is_wall && node.role != Role::Normal {
            log::debug!("rejected wall on {:?} node {c}", node.role);
            return Err(GridError::ProtectedCell {
                coord: c,
                role: node.role,
            });
        }
        if node.role == Role::Normal {
            node.walkable = !is_wall;
        }
        Ok(())
    }

    /// Flip the wall state of `c`, returning whether it is now a wall.
    pub fn toggle_wall(&mut self, c: Coordinate) -> Result<bool, GridError> {
        let is_wall = !self.check_bounds(c).map(|c| self.is_walkable(c))?;
        self.set_wall(c, !is_wall)?;
        Ok(!is_wall)
    }

    /// Remove every wall. Endpoint roles are kept.
    pub fn clear_walls(&mut self) {
        for node in self.nodes.iter_mut() {
            node.walkable = true;
        }
    }

    // -----------------------------------------------------------------------
    // Endpoints
    // -----------------------------------------------------------------------

    #[inline]
    pub fn start(&self) -> Option<Coordinate> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Coordinate> {
        self.end
    }

    /// Move the Start role to `c`, clearing any wall there.
    ///
    /// Rejected if `c` is currently the End.
    pub fn set_start(&mut self, c: Coordinate) -> Result<(), GridError> {
        self.assign_role(c, Role::Start)
    }

    /// Move the End role to `c`, clearing any wall there.
    ///
    /// Rejected if `c` is currently the Start.
    pub fn set_end(&mut self, c: Coordinate) -> Result<(), GridError> {
        self.assign_role(c, Role::End)
    }

    fn assign_role(&mut self, c: Coordinate, role: Role) -> Result<(), GridError> {
        let c = self.check_bounds(c)?;
        let held = self.node(c).map(Node::role).unwrap_or_default();
        if held != Role::Normal && held != role {
            log::debug!("rejected {role:?} on {c}: already {held:?}");
            return Err(GridError::RoleConflict { coord: c, held });
        }
        let slot = match role {
            Role::Start => &mut self.start,
            Role::End => &mut self.end,
            Role::Normal => return Ok(()),
        };
        let previous = slot.replace(c);
        if let Some(p) = previous.filter(|&p| p != c) {
            if let Some(n) = self.node_mut(p) {
                n.role = Role::Normal;
            }
        }
        if let Some(n) = self.node_mut(c) {
            n.role = role;
            n.walkable = true;
        }
        Ok(())
    }

    /// Place Start and End at the visualizer's default spots: the middle row,
    /// eight columns in from the left and right edges.
    ///
    /// Grids too narrow for that fall back to opposite corners.
    pub fn place_default_endpoints(&mut self) -> Result<(), GridError> {
        if self.len() < 2 {
            return Err(GridError::InvalidDimensions {
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        let row = self.rows() / 2;
        let mut start = Coordinate::new(row, 8.min(self.cols() - 1));
        let mut end = Coordinate::new(row, self.cols().saturating_sub(8));
        if start.col >= end.col {
            start = Coordinate::ZERO;
            end = Coordinate::new(self.rows() - 1, self.cols() - 1);
        }
        self.clear_roles();
        self.set_start(start)?;
        self.set_end(end)
    }

    fn clear_roles(&mut self) {
        for c in [self.start.take(), self.end.take()].into_iter().flatten() {
            if let Some(n) = self.node_mut(c) {
                n.role = Role::Normal;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Search state
    // -----------------------------------------------------------------------

    /// Clear `g`, `h`, `f` and `predecessor` on every node.
    ///
    /// Must be called before each search; engines refuse a grid that was
    /// searched since the last reset.
    pub fn reset_search_state(&mut self) {
        for node in self.nodes.iter_mut() {
            node.reset_search_state();
        }
        self.searched = false;
    }

    /// Whether no search has written to the nodes since the last reset.
    #[inline]
    pub fn is_search_state_clean(&self) -> bool {
        !self.searched
    }

    /// Flag the search-scoped fields as in use. Called by search engines at
    /// the start of a run.
    #[inline]
    pub fn mark_searched(&mut self) {
        self.searched = true;
    }

    /// Follow predecessor links back from `c` and return the chain in
    /// root-to-`c` order.
    ///
    /// The walk stops after `len()` steps so a corrupted chain cannot loop.
    pub fn path_to(&self, c: Coordinate) -> Vec<Coordinate> {
        let mut path = Vec::new();
        let mut cur = self.node(c).map(|_| c);
        while let Some(p) = cur {
            if path.len() == self.len() {
                break;
            }
            path.push(p);
            cur = self.node(p).and_then(|n| n.predecessor);
        }
        path.reverse();
        path
    }

    // -----------------------------------------------------------------------
    // Resizing
    // -----------------------------------------------------------------------

    /// A new grid of the given size carrying over walls, endpoints and the
    /// neighbor policy wherever they still fit. Search state is not copied.
    pub fn resized(&self, rows: usize, cols: usize) -> Result<Grid, GridError> {
        let mut grid = Grid::new(rows, cols)?;
        if let Some(policy) = self.policy {
            grid.set_neighbor_policy(policy);
        }
        for node in self.nodes.iter().filter(|n| n.is_wall()) {
            if let Some(n) = grid.node_mut(node.coordinate()) {
                n.walkable = false;
            }
        }
        if let Some(s) = self.start.filter(|&s| grid.contains(s)) {
            grid.set_start(s)?;
        }
        if let Some(e) = self.end.filter(|&e| grid.contains(e)) {
            grid.set_end(e)?;
        }
        Ok(grid)
    }
}
