//! Cost-to-goal estimates and a name-keyed registry of them.

use pathviz_core::Coordinate;

use crate::SearchError;

/// A pure estimate of the remaining cost from a node to the goal.
///
/// A* only returns optimal paths when the estimate never exceeds the true
/// remaining cost. That is a contract, not something the engine checks.
pub type HeuristicFn = fn(Coordinate, Coordinate) -> f64;

#[inline]
fn deltas(a: Coordinate, b: Coordinate) -> (f64, f64) {
    (
        a.row.abs_diff(b.row) as f64,
        a.col.abs_diff(b.col) as f64,
    )
}

/// Manhattan (L1) distance. Admissible for 4-way movement.
#[inline]
pub fn manhattan(a: Coordinate, b: Coordinate) -> f64 {
    let (dr, dc) = deltas(a, b);
    dr + dc
}

/// Euclidean (L2) distance.
#[inline]
pub fn euclidean(a: Coordinate, b: Coordinate) -> f64 {
    let (dr, dc) = deltas(a, b);
    dr.hypot(dc)
}

/// Chebyshev (L∞) distance. Admissible for 8-way movement with unit
/// diagonal cost.
#[inline]
pub fn chebyshev(a: Coordinate, b: Coordinate) -> f64 {
    let (dr, dc) = deltas(a, b);
    dr.max(dc)
}

/// Octile distance: diagonal steps cost √2.
#[inline]
pub fn octile(a: Coordinate, b: Coordinate) -> f64 {
    let (dr, dc) = deltas(a, b);
    dr.max(dc) + (std::f64::consts::SQRT_2 - 1.0) * dr.min(dc)
}

/// Squared Euclidean distance.
///
/// Overestimates badly beyond one step, so searches with it behave almost
/// greedily and lose optimality. Kept because the visualizer has always
/// offered it and its trace looks very different from the others.
#[inline]
pub fn squared_euclidean(a: Coordinate, b: Coordinate) -> f64 {
    let (dr, dc) = deltas(a, b);
    dr * dr + dc * dc
}

// ---------------------------------------------------------------------------
// HeuristicRegistry
// ---------------------------------------------------------------------------

/// Heuristics by display name, in registration order.
///
/// The registry is a lookup convenience; the engine accepts any
/// `Fn(Coordinate, Coordinate) -> f64` directly.
#[derive(Clone, Debug)]
pub struct HeuristicRegistry {
    entries: Vec<(String, HeuristicFn)>,
}

impl HeuristicRegistry {
    /// Name of the heuristic selected when the caller expresses no preference.
    pub const DEFAULT: &'static str = "Manhattan";

    /// An empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// A registry holding the built-in heuristics, [`DEFAULT`](Self::DEFAULT)
    /// first.
    pub fn with_builtins() -> Self {
        let mut r = Self::new();
        r.register(Self::DEFAULT, manhattan);
        r.register("Euclidean", euclidean);
        r.register("Chebyshev", chebyshev);
        r.register("Octile", octile);
        r.register("Squared Euclidean", squared_euclidean);
        r
    }

    /// Add `f` under `name`. An existing entry with that name is replaced in
    /// place and keeps its position.
    pub fn register(&mut self, name: impl Into<String>, f: HeuristicFn) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = f,
            None => self.entries.push((name, f)),
        }
    }

    pub fn get(&self, name: &str) -> Option<HeuristicFn> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, f)| f)
    }

    /// Like [`get`](Self::get), but a missing name is an error.
    pub fn resolve(&self, name: &str) -> Result<HeuristicFn, SearchError> {
        self.get(name)
            .ok_or_else(|| SearchError::UnknownHeuristic(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, HeuristicFn)> {
        self.entries.iter().map(|(n, f)| (n.as_str(), *f))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for HeuristicRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
