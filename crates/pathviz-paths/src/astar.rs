use pathviz_core::{Coordinate, Grid, GridError, Role};

use crate::config::SearchConfig;
use crate::frontier::Frontier;
use crate::observer::SearchObserver;
use crate::SearchError;

/// Outcome of a completed search.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathResult {
    /// Coordinates from start to end, both inclusive.
    Found(Vec<Coordinate>),
    /// The frontier ran dry without reaching the end.
    NotFound,
    /// The observer asked the search to stop.
    Cancelled,
}

impl PathResult {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn path(&self) -> Option<&[Coordinate]> {
        match self {
            Self::Found(p) => Some(p),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<Vec<Coordinate>> {
        match self {
            Self::Found(p) => Some(p),
            _ => None,
        }
    }

    /// Number of moves along the path.
    pub fn steps(&self) -> Option<usize> {
        self.path().map(|p| p.len().saturating_sub(1))
    }

    /// Total step cost of the path under `config` on `grid`.
    pub fn cost(&self, grid: &Grid, config: &SearchConfig) -> Option<f64> {
        let policy = grid.neighbor_policy().unwrap_or_default();
        self.path().map(|p| {
            p.windows(2)
                .map(|w| config.step_cost(policy, w[0], w[1]))
                .sum()
        })
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Found(_) => "found",
            Self::NotFound => "not found",
            Self::Cancelled => "cancelled",
        }
    }
}

// ---------------------------------------------------------------------------
// AStar
// ---------------------------------------------------------------------------

/// Best-first A* search over a [`Grid`].
///
/// Holds the run configuration and a scratch buffer reused across runs.
/// Node costs and predecessor links are written into the grid itself, so the
/// grid must be reset with [`Grid::reset_search_state`] before every run;
/// a grid that was already searched is refused with
/// [`SearchError::StaleSearchState`].
#[derive(Clone, Debug, Default)]
pub struct AStar {
    config: SearchConfig,
    nbuf: Vec<Coordinate>,
}

impl AStar {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            nbuf: Vec::with_capacity(8),
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search between the grid's own Start and End nodes.
    pub fn search<H, O>(
        &mut self,
        grid: &mut Grid,
        heuristic: H,
        observer: O,
    ) -> Result<PathResult, SearchError>
    where
        H: Fn(Coordinate, Coordinate) -> f64,
        O: SearchObserver,
    {
        let start = grid.start().ok_or(SearchError::MissingEndpoint(Role::Start))?;
        let end = grid.end().ok_or(SearchError::MissingEndpoint(Role::End))?;
        self.find_path(grid, start, end, heuristic, observer)
    }

    /// Find a path from `start` to `end`.
    ///
    /// The frontier is expanded lowest `f` first, ties resolved by the
    /// configured [`TieBreak`](crate::TieBreak). A neighbor is relaxed only
    /// on a strict `f` improvement, which keeps the predecessor links a tree
    /// rooted at `start`. The observer hears about every finalized node,
    /// every new frontier node and, on success, every path node in order.
    pub fn find_path<H, O>(
        &mut self,
        grid: &mut Grid,
        start: Coordinate,
        end: Coordinate,
        heuristic: H,
        mut observer: O,
    ) -> Result<PathResult, SearchError>
    where
        H: Fn(Coordinate, Coordinate) -> f64,
        O: SearchObserver,
    {
        self.config.validate()?;
        let bounds = grid.bounds();
        let start_idx = bounds
            .index(start)
            .ok_or(GridError::OutOfBounds { coord: start, bounds })?;
        grid.check_bounds(end)?;
        let policy = grid
            .neighbor_policy()
            .ok_or(SearchError::AdjacencyNotBuilt)?;
        if !grid.is_search_state_clean() {
            return Err(SearchError::StaleSearchState);
        }
        if let Some(&wall) = [start, end].iter().find(|&&c| !grid.is_walkable(c)) {
            return Err(SearchError::Unwalkable(wall));
        }

        grid.mark_searched();
        log::debug!(
            "A* {start} -> {end} on {bounds} grid ({policy:?}, {:?})",
            self.config.tie_break
        );

        let h0 = heuristic(start, end);
        if let Some(node) = grid.node_mut(start) {
            node.g = Some(0.0);
            node.h = Some(h0);
            node.f = Some(h0);
        }

        let mut open = Frontier::new(bounds.len(), self.config.tie_break);
        let mut closed = vec![false; bounds.len()];
        open.push(start_idx, h0, h0);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expanded = 0usize;

        let result = 'search: loop {
            if observer.should_stop() {
                break 'search PathResult::Cancelled;
            }
            let Some(ci) = open.pop() else {
                break 'search PathResult::NotFound;
            };

            closed[ci] = true;
            expanded += 1;
            let current = bounds.coordinate(ci);
            observer.on_visited(current);

            if current == end {
                break 'search PathResult::Found(grid.path_to(end));
            }

            let current_g = grid.node(current).and_then(|n| n.g).unwrap_or(0.0);
            log::trace!("expand {current} g={current_g}");

            nbuf.clear();
            nbuf.extend_from_slice(grid.neighbors(current));

            for &next in nbuf.iter() {
                let Some(ni) = bounds.index(next) else {
                    continue;
                };
                if closed[ni] || !grid.is_walkable(next) {
                    continue;
                }

                let g = current_g + self.config.step_cost(policy, current, next);
                let h = heuristic(next, end);
                let f = g + h;

                let Some(node) = grid.node_mut(next) else {
                    continue;
                };
                if node.f.is_some_and(|old| f >= old) {
                    continue;
                }
                node.relax(g, h, current);
                log::trace!("relax {next} g={g} h={h} via {current}");

                if open.push(ni, f, h) {
                    observer.on_frontier_added(next);
                }
            }
        };

        self.nbuf = nbuf;

        if let PathResult::Found(path) = &result {
            for &c in path {
                observer.on_path_member(c);
            }
        }
        log::debug!(
            "A* {start} -> {end}: {} after {expanded} expansions",
            result.label()
        );
        Ok(result)
    }
}

/// Find a path from `start` to `end` with the default [`SearchConfig`].
///
/// The grid must have been reset with [`Grid::reset_search_state`] since its
/// last search.
pub fn find_path<H, O>(
    grid: &mut Grid,
    start: Coordinate,
    end: Coordinate,
    heuristic: H,
    observer: O,
) -> Result<PathResult, SearchError>
where
    H: Fn(Coordinate, Coordinate) -> f64,
    O: SearchObserver,
{
    AStar::default().find_path(grid, start, end, heuristic, observer)
}

/// [`find_path`] with an explicit configuration.
pub fn find_path_with<H, O>(
    grid: &mut Grid,
    start: Coordinate,
    end: Coordinate,
    heuristic: H,
    observer: O,
    config: SearchConfig,
) -> Result<PathResult, SearchError>
where
    H: Fn(Coordinate, Coordinate) -> f64,
    O: SearchObserver,
{
    AStar::new(config).find_path(grid, start, end, heuristic, observer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::bfs_distance;
    use crate::heuristic::{chebyshev, manhattan, squared_euclidean};
    use crate::observer::{NoopObserver, SearchEvent, TraceRecorder};
    use crate::TieBreak;
    use pathviz_core::NeighborPolicy;
    use rand::{Rng, SeedableRng};

    fn c(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    fn random_grid(rng: &mut impl Rng, rows: usize, cols: usize, diagonals: bool) -> Grid {
        let mut g = Grid::with_policy(rows, cols, diagonals).unwrap();
        for coord in g.bounds().iter() {
            if rng.random_range(0..10) < 3 {
                g.set_wall(coord, true).unwrap();
            }
        }
        g.set_start(c(0, 0)).unwrap();
        g.set_end(c(rows - 1, cols - 1)).unwrap();
        g
    }

    fn assert_valid_path(g: &Grid, path: &[Coordinate], start: Coordinate, end: Coordinate) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        for w in path.windows(2) {
            assert!(
                g.neighbors(w[0]).contains(&w[1]) && g.neighbors(w[1]).contains(&w[0]),
                "{} and {} are not adjacent",
                w[0],
                w[1]
            );
        }
        assert!(path.iter().all(|&p| g.is_walkable(p)));
    }

    #[test]
    fn open_grid_5x5() {
        let mut g = Grid::with_policy(5, 5, NeighborPolicy::Orthogonal).unwrap();
        let res = find_path(&mut g, c(0, 0), c(4, 4), manhattan, NoopObserver).unwrap();
        let path = res.path().unwrap();
        assert_eq!(res.steps(), Some(8));
        assert_eq!(res.cost(&g, &SearchConfig::default()), Some(8.0));
        assert_valid_path(&g, path, c(0, 0), c(4, 4));
        for w in path.windows(2) {
            assert_eq!(w[1].row + w[1].col, w[0].row + w[0].col + 1);
        }
    }

    #[test]
    fn straight_line_reachable() {
        for (rows, cols) in [(1, 7), (6, 1), (4, 9)] {
            let mut g = Grid::with_policy(rows, cols, false).unwrap();
            let end = c(rows - 1, cols - 1);
            let res = find_path(&mut g, c(0, 0), end, manhattan, NoopObserver).unwrap();
            assert_valid_path(&g, res.path().unwrap(), c(0, 0), end);
        }
    }

    #[test]
    fn detour_around_single_wall() {
        let mut g = Grid::with_policy(3, 3, false).unwrap();
        g.set_wall(c(1, 0), true).unwrap();
        let res = find_path(&mut g, c(0, 0), c(2, 0), manhattan, NoopObserver).unwrap();
        assert_eq!(res.cost(&g, &SearchConfig::default()), Some(4.0));
        assert_valid_path(&g, res.path().unwrap(), c(0, 0), c(2, 0));
        assert!(res.path().unwrap().iter().all(|p| p.col <= 1));
    }

    #[test]
    fn detour_around_wall_row() {
        let mut g = Grid::with_policy(3, 3, false).unwrap();
        g.set_wall(c(1, 0), true).unwrap();
        g.set_wall(c(1, 1), true).unwrap();
        let res = find_path(&mut g, c(0, 0), c(2, 0), manhattan, NoopObserver).unwrap();
        let path = res.path().unwrap();
        assert_eq!(res.steps(), Some(6));
        assert!(path.contains(&c(1, 2)));
        assert_valid_path(&g, path, c(0, 0), c(2, 0));
    }

    #[test]
    fn blocked_column_not_found() {
        let mut g = Grid::with_policy(3, 1, false).unwrap();
        g.set_wall(c(1, 0), true).unwrap();
        let res = find_path(&mut g, c(0, 0), c(2, 0), manhattan, NoopObserver).unwrap();
        assert_eq!(res, PathResult::NotFound);
        assert_eq!(res.steps(), None);
    }

    #[test]
    fn enclosed_end_not_found() {
        for diagonals in [false, true] {
            let mut g = Grid::with_policy(7, 7, diagonals).unwrap();
            for n in g.neighbors(c(3, 3)).to_vec() {
                g.set_wall(n, true).unwrap();
            }
            let mut rec = TraceRecorder::new();
            let res = find_path(&mut g, c(0, 0), c(3, 3), manhattan, &mut rec).unwrap();
            assert_eq!(res, PathResult::NotFound);
            assert!(rec.path().is_empty());
            assert!(!rec.visited().contains(&c(3, 3)));
            // Every walkable cell outside the enclosure got finalized.
            let reachable = g.len() - 1 - g.wall_count();
            assert_eq!(rec.visited().len(), reachable);
        }
    }

    #[test]
    fn start_equals_end() {
        let mut g = Grid::with_policy(3, 3, false).unwrap();
        let mut rec = TraceRecorder::new();
        let res = find_path(&mut g, c(1, 1), c(1, 1), manhattan, &mut rec).unwrap();
        assert_eq!(res, PathResult::Found(vec![c(1, 1)]));
        assert_eq!(
            rec.events(),
            &[SearchEvent::Visited(c(1, 1)), SearchEvent::PathMember(c(1, 1))]
        );
    }

    #[test]
    fn trace_order() {
        let mut g = Grid::with_policy(1, 3, false).unwrap();
        let mut rec = TraceRecorder::new();
        find_path(&mut g, c(0, 0), c(0, 2), manhattan, &mut rec).unwrap();
        assert_eq!(
            rec.into_events(),
            vec![
                SearchEvent::Visited(c(0, 0)),
                SearchEvent::FrontierAdded(c(0, 1)),
                SearchEvent::Visited(c(0, 1)),
                SearchEvent::FrontierAdded(c(0, 2)),
                SearchEvent::Visited(c(0, 2)),
                SearchEvent::PathMember(c(0, 0)),
                SearchEvent::PathMember(c(0, 1)),
                SearchEvent::PathMember(c(0, 2)),
            ]
        );
    }

    #[test]
    fn observer_sees_path_in_order() {
        let mut g = Grid::with_policy(6, 6, true).unwrap();
        g.set_wall(c(2, 2), true).unwrap();
        g.set_wall(c(3, 3), true).unwrap();
        let mut rec = TraceRecorder::new();
        let res = find_path(&mut g, c(0, 0), c(5, 5), chebyshev, &mut rec).unwrap();
        assert_eq!(Some(rec.path().as_slice()), res.path());
        // Path notifications come last, after every visit.
        let first_path = rec
            .events()
            .iter()
            .position(|e| matches!(e, SearchEvent::PathMember(_)))
            .unwrap();
        assert!(rec.events()[first_path..]
            .iter()
            .all(|e| matches!(e, SearchEvent::PathMember(_))));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for tie_break in [TieBreak::Fifo, TieBreak::Lifo, TieBreak::LowestH] {
            let mut g = random_grid(&mut rng, 12, 15, true);
            let cfg = SearchConfig::default().with_tie_break(tie_break);
            let mut astar = AStar::new(cfg);

            let mut first = TraceRecorder::new();
            let a = astar.search(&mut g, manhattan, &mut first).unwrap();
            g.reset_search_state();
            let mut second = TraceRecorder::new();
            let b = astar.search(&mut g, manhattan, &mut second).unwrap();

            assert_eq!(a, b);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn paths_are_valid_on_random_grids() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for i in 0..60 {
            let diagonals = i % 2 == 0;
            let mut g = random_grid(&mut rng, 9, 11, diagonals);
            let (start, end) = (c(0, 0), c(8, 10));
            if let PathResult::Found(path) =
                find_path(&mut g, start, end, chebyshev, NoopObserver).unwrap()
            {
                assert_valid_path(&g, &path, start, end);
            }
            // Every predecessor chain leads back to the start.
            for node in g.nodes().filter(|n| n.predecessor.is_some()) {
                let chain = g.path_to(node.coordinate());
                assert_eq!(chain.first(), Some(&start));
                assert_eq!(chain.last(), Some(&node.coordinate()));
            }
        }
    }

    #[test]
    fn orthogonal_paths_are_shortest() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1234);
        for _ in 0..80 {
            let mut g = random_grid(&mut rng, 10, 10, false);
            let (start, end) = (c(0, 0), c(9, 9));
            let res = find_path_with(
                &mut g,
                start,
                end,
                manhattan,
                NoopObserver,
                SearchConfig::unbiased(),
            )
            .unwrap();
            assert_eq!(res.steps(), bfs_distance(&g, start, end));
        }
    }

    #[test]
    fn straight_bias_prefers_straight_lines() {
        let mut g = Grid::with_policy(3, 7, true).unwrap();
        let res = find_path(&mut g, c(1, 0), c(1, 6), chebyshev, NoopObserver).unwrap();
        let path = res.path().unwrap();
        assert_eq!(path.len(), 7);
        assert!(path.iter().all(|p| p.row == 1));
        assert_valid_path(&g, path, c(1, 0), c(1, 6));
    }

    #[test]
    fn diagonal_shortcut() {
        let mut g = Grid::with_policy(5, 5, true).unwrap();
        let res = find_path_with(
            &mut g,
            c(0, 0),
            c(4, 4),
            chebyshev,
            NoopObserver,
            SearchConfig::unbiased(),
        )
        .unwrap();
        assert_eq!(res.steps(), Some(4));
    }

    #[test]
    fn inadmissible_heuristic_still_finds_a_path() {
        let mut g = Grid::with_policy(8, 8, false).unwrap();
        for row in 0..7 {
            g.set_wall(c(row, 4), true).unwrap();
        }
        let res = find_path(&mut g, c(0, 0), c(0, 7), squared_euclidean, NoopObserver).unwrap();
        assert_valid_path(&g, res.path().unwrap(), c(0, 0), c(0, 7));
    }

    #[test]
    fn visit_limit_cancels() {
        let mut g = Grid::with_policy(10, 10, false).unwrap();
        let mut rec = TraceRecorder::with_visit_limit(3);
        let res = find_path(&mut g, c(0, 0), c(9, 9), manhattan, &mut rec).unwrap();
        assert_eq!(res, PathResult::Cancelled);
        assert_eq!(rec.visited().len(), 3);
        assert!(rec.path().is_empty());
    }

    #[test]
    fn stale_state_is_refused() {
        let mut g = Grid::with_policy(3, 3, false).unwrap();
        find_path(&mut g, c(0, 0), c(2, 2), manhattan, NoopObserver).unwrap();
        assert_eq!(
            find_path(&mut g, c(0, 0), c(2, 2), manhattan, NoopObserver),
            Err(SearchError::StaleSearchState)
        );
        g.reset_search_state();
        assert!(find_path(&mut g, c(0, 0), c(2, 2), manhattan, NoopObserver).is_ok());
    }

    #[test]
    fn misuse_is_reported() {
        let mut bare = Grid::new(3, 3).unwrap();
        assert_eq!(
            find_path(&mut bare, c(0, 0), c(2, 2), manhattan, NoopObserver),
            Err(SearchError::AdjacencyNotBuilt)
        );

        let mut g = Grid::with_policy(3, 3, false).unwrap();
        assert!(matches!(
            find_path(&mut g, c(0, 0), c(3, 0), manhattan, NoopObserver),
            Err(SearchError::Grid(GridError::OutOfBounds { .. }))
        ));
        g.set_wall(c(2, 2), true).unwrap();
        assert_eq!(
            find_path(&mut g, c(0, 0), c(2, 2), manhattan, NoopObserver),
            Err(SearchError::Unwalkable(c(2, 2)))
        );
        assert_eq!(
            AStar::default().search(&mut g, manhattan, NoopObserver),
            Err(SearchError::MissingEndpoint(Role::Start))
        );
        let bad = SearchConfig::default().with_diagonal_cost(-1.0);
        assert!(matches!(
            find_path_with(&mut g, c(0, 0), c(0, 2), manhattan, NoopObserver, bad),
            Err(SearchError::InvalidConfig(_))
        ));
        // None of the refused calls dirtied the grid.
        assert!(g.is_search_state_clean());
    }

    #[test]
    fn search_uses_grid_endpoints() {
        let mut g = Grid::with_policy(29, 60, true).unwrap();
        g.place_default_endpoints().unwrap();
        let res = AStar::default().search(&mut g, manhattan, NoopObserver).unwrap();
        let path = res.path().unwrap();
        assert_eq!(path.first(), g.start().as_ref());
        assert_eq!(path.last(), g.end().as_ref());
    }
}
