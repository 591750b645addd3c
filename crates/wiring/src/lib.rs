//! Minimum-crossing routing of a new wire across an axis-aligned wiring grid.
//!
//! Pipeline
//! - `compress`: collapse empty bands of an arbitrarily large integer grid into a
//!   bounded compact grid without changing the optimal answer.
//! - `grid`: per-node crossing cost and 4-direction neighbor masks (`Grid`).
//! - `pqueue`: array-backed binary min-heap with a caller-supplied comparator.
//! - `search`: A*-style search ordered by (intersections, length), with optional
//!   route reconstruction.
//!
//! API Policy
//! - The engine is stateless between calls. Every `Grid`, predecessor table and
//!   open set is created per instance and dropped with it.

pub mod compress;
pub mod error;
pub mod grid;
pub mod instance;
pub mod pqueue;
pub mod rand;
pub mod search;

pub use error::{GridError, InstanceError};
pub use grid::{Direction, Grid, Neighbors, Point};
pub use instance::{Coord, Instance, Orientation, Wire};
pub use search::{PathCost, PathMask, Route, SearchCfg, SearchOutcome, SearchStats};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::compress::compact;
    pub use crate::grid::{Direction, Grid, Neighbors, Point};
    pub use crate::instance::{Coord, Instance, Wire};
    pub use crate::search::{a_star, a_star_cost, a_star_route, manhattan, Route, SearchCfg};
    pub use crate::{solve, solve_instance, solve_route, Solution};
}

/// Compacted grid of one instance together with its search outcome.
#[derive(Clone, Debug)]
pub struct Solution {
    pub grid: Grid,
    /// `None` when the goal cannot be reached from the start.
    pub outcome: Option<SearchOutcome>,
}

impl Solution {
    /// Minimum number of intersections, if a path exists.
    pub fn intersections(&self) -> Option<u32> {
        self.outcome.as_ref().map(|o| o.intersections)
    }

    /// Reconstructed route; only present when the search recorded predecessors.
    pub fn route(&self) -> Option<Route> {
        let outcome = self.outcome.as_ref()?;
        let points = outcome.route.clone()?;
        Some(Route {
            intersections: outcome.intersections,
            points,
        })
    }
}

/// Compact, build and search one instance with the Manhattan heuristic.
pub fn solve_instance(mut instance: Instance, cfg: SearchCfg) -> Result<Solution, GridError> {
    compress::compact(&mut instance);
    let grid = Grid::from_instance(&instance)?;
    let outcome = search::a_star(&grid, search::manhattan, cfg);
    Ok(Solution { grid, outcome })
}

/// Minimum number of intersections for `instance`, or `None` if the goal is unreachable.
pub fn solve(instance: Instance) -> Result<Option<u32>, GridError> {
    Ok(solve_instance(instance, SearchCfg::default())?.intersections())
}

/// Like `solve`, but also reconstructs one optimal route on the compacted grid.
pub fn solve_route(instance: Instance) -> Result<Option<Route>, GridError> {
    Ok(solve_instance(instance, SearchCfg::with_route())?.route())
}
