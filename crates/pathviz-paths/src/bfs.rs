use std::collections::VecDeque;

use pathviz_core::{Coordinate, Grid};

/// Unweighted hop distances from `sources` to every walkable node, using the
/// grid's current adjacency.
///
/// Indexed like the grid (row-major); `None` marks walls, unreachable nodes
/// and everything when no neighbor policy has been set. Sources that are
/// walls or out of bounds are ignored. Node search state is not touched.
pub fn bfs_map(grid: &Grid, sources: &[Coordinate]) -> Vec<Option<usize>> {
    let bounds = grid.bounds();
    let mut dist: Vec<Option<usize>> = vec![None; bounds.len()];
    let mut queue: VecDeque<Coordinate> = VecDeque::new();

    for &src in sources {
        if !grid.is_walkable(src) {
            continue;
        }
        if let Some(si) = bounds.index(src) {
            if dist[si].is_none() {
                dist[si] = Some(0);
                queue.push_back(src);
            }
        }
    }

    while let Some(cp) = queue.pop_front() {
        let Some(current) = bounds.index(cp).and_then(|i| dist[i]) else {
            continue;
        };
        for &np in grid.neighbors(cp) {
            let Some(ni) = bounds.index(np) else {
                continue;
            };
            if dist[ni].is_some() || !grid.is_walkable(np) {
                continue;
            }
            dist[ni] = Some(current + 1);
            queue.push_back(np);
        }
    }

    dist
}

/// Fewest moves from `from` to `to`, or `None` if `to` cannot be reached.
pub fn bfs_distance(grid: &Grid, from: Coordinate, to: Coordinate) -> Option<usize> {
    let i = grid.bounds().index(to)?;
    bfs_map(grid, &[from])[i]
}
