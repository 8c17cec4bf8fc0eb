//! **pathviz-core** — grid model for the pathfinding visualizer.
//!
//! This crate provides the graph that search engines run over: geometry
//! primitives, per-cell [`Node`] state, and the owning [`Grid`] with its
//! wall, endpoint and adjacency editing operations.

pub mod error;
pub mod geom;
pub mod grid;
pub mod node;

pub use error::GridError;
pub use geom::{Bounds, Coordinate, Offset};
pub use grid::{Grid, NeighborPolicy};
pub use node::{Node, Role};
