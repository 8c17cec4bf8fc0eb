//! Pathfinding over a [`pathviz_core::Grid`].
//!
//! The engine is a configurable best-first **A\*** search
//! ([`AStar::find_path`], or the [`find_path`] shorthand) that reports its
//! progress to a [`SearchObserver`] as it goes, so a visualizer can replay
//! the exploration cell by cell.
//!
//! | Piece | Role |
//! |---|---|
//! | [`HeuristicRegistry`] | named cost-to-goal estimates ([`manhattan`], [`euclidean`], ...) |
//! | [`SearchConfig`] | tie-break policy and step-cost model |
//! | [`SearchObserver`] | visited / frontier / path notifications |
//! | [`TraceRecorder`] | observer that records events for replay |
//! | [`bfs_distance`] | unweighted reference distances |
//!
//! Search is synchronous and single-threaded. Costs are written into the
//! grid's nodes; reset them with
//! [`Grid::reset_search_state`](pathviz_core::Grid::reset_search_state)
//! before each run.

mod astar;
mod bfs;
mod config;
mod error;
mod frontier;
mod heuristic;
mod observer;

pub use astar::{AStar, PathResult, find_path, find_path_with};
pub use bfs::{bfs_distance, bfs_map};
pub use config::{DEFAULT_STRAIGHT_BIAS, SearchConfig, TieBreak};
pub use error::SearchError;
pub use heuristic::{
    HeuristicFn, HeuristicRegistry, chebyshev, euclidean, manhattan, octile, squared_euclidean,
};
pub use observer::{NoopObserver, SearchEvent, SearchObserver, TraceRecorder};
