//! Search loop and heuristics.

use crate::grid::{Grid, Point};
use crate::pqueue::PriorityQueue;

use super::predecessor::PredecessorTable;
use super::types::{PathCost, Route, SearchCfg, SearchOutcome, SearchStats};

/// Canonical heuristic: Manhattan distance, admissible because every move changes
/// exactly one coordinate by one.
#[inline]
pub fn manhattan(p: Point, goal: Point) -> u32 {
    p.distance(goal)
}

/// No length estimate; turns the search into lexicographic Dijkstra.
#[inline]
pub fn zero_heuristic(_p: Point, _goal: Point) -> u32 {
    0
}

/// Search from `grid.start()` to `grid.goal()`.
///
/// `heuristic(p, goal)` estimates the remaining path *length* and must not
/// overestimate it. Returns `None` when the goal is unreachable.
pub fn a_star<H>(grid: &Grid, heuristic: H, cfg: SearchCfg) -> Option<SearchOutcome>
where
    H: Fn(Point, Point) -> u32,
{
    AStarRunner::new(grid, heuristic, cfg).run()
}

/// Minimum number of intersections only.
pub fn a_star_cost<H>(grid: &Grid, heuristic: H) -> Option<u32>
where
    H: Fn(Point, Point) -> u32,
{
    a_star(grid, heuristic, SearchCfg::default()).map(|o| o.intersections)
}

/// Minimum number of intersections plus one route achieving it.
pub fn a_star_route<H>(grid: &Grid, heuristic: H) -> Option<Route>
where
    H: Fn(Point, Point) -> u32,
{
    let outcome = a_star(grid, heuristic, SearchCfg::with_route())?;
    Some(Route {
        intersections: outcome.intersections,
        points: outcome.route.unwrap_or_default(),
    })
}

/// Per-call search state: g-table, open set and the optional predecessor table.
struct AStarRunner<'a, H> {
    grid: &'a Grid,
    heuristic: H,
    g_scores: Vec<PathCost>,
    preds: Option<PredecessorTable>,
    stats: SearchStats,
}

impl<'a, H> AStarRunner<'a, H>
where
    H: Fn(Point, Point) -> u32,
{
    fn new(grid: &'a Grid, heuristic: H, cfg: SearchCfg) -> Self {
        Self {
            grid,
            heuristic,
            g_scores: vec![PathCost::INFINITE; grid.len()],
            preds: cfg.record_route.then(|| PredecessorTable::new(grid)),
            stats: SearchStats::default(),
        }
    }

    /// Open-set key: true intersections, heuristically extended length.
    #[inline]
    fn f_key(&self, g: PathCost, p: Point) -> PathCost {
        let goal = self.grid.goal();
        PathCost::new(g.intersections, g.length.saturating_add((self.heuristic)(p, goal)))
    }

    fn run(mut self) -> Option<SearchOutcome> {
        let grid = self.grid;
        let (start, goal) = (grid.start(), grid.goal());

        let seed = PathCost::new(u32::from(grid.cost(start)), 0);
        self.g_scores[grid.index(start)] = seed;
        let mut open = PriorityQueue::new(PathCost::cheaper);
        open.insert(self.f_key(seed, start), start);
        self.stats.pushed += 1;

        while !open.is_empty() {
            let (key, current) = open.pop();
            self.stats.popped += 1;
            let current_g = self.g_scores[grid.index(current)];
            if key > self.f_key(current_g, current) {
                self.stats.stale += 1;
                continue;
            }
            if current == goal {
                return Some(self.finish(key.intersections));
            }
            for neighbor in grid.neighbor_points(current) {
                let tentative = current_g.step(grid.cost(neighbor));
                let slot = grid.index(neighbor);
                if tentative < self.g_scores[slot] {
                    self.g_scores[slot] = tentative;
                    if let Some(preds) = self.preds.as_mut() {
                        preds.record(neighbor, current);
                    }
                    open.insert(self.f_key(tentative, neighbor), neighbor);
                    self.stats.pushed += 1;
                }
            }
        }
        tracing::debug!(
            popped = self.stats.popped,
            pushed = self.stats.pushed,
            "goal unreachable"
        );
        None
    }

    fn finish(self, intersections: u32) -> SearchOutcome {
        let route = self
            .preds
            .as_ref()
            .map(|preds| preds.route(self.grid.start(), self.grid.goal()));
        tracing::debug!(
            intersections,
            popped = self.stats.popped,
            pushed = self.stats.pushed,
            stale = self.stats.stale,
            route_len = route.as_ref().map(|r| r.len()),
            "goal reached"
        );
        SearchOutcome {
            intersections,
            route,
            stats: self.stats,
        }
    }
}
