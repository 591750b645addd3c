//! PathSearch: A*-style search over the compacted grid.
//!
//! Model
//! - Node-cost graph: stepping from `u` to a neighbor `v` costs `cost[v]`
//!   intersections and one unit of length; the start node's own cost is charged up
//!   front, so a route's intersections are the sum of `cost` over all its nodes.
//! - Scores are `PathCost = (intersections, length)`, compared lexicographically.
//! - The open set key is `(intersections, length + h(node, goal))`. The heuristic only
//!   ever touches the length component, so the first time the goal is popped its
//!   intersection count is exact. Length is only a tie-break hint: among routes with
//!   the minimum number of intersections, the reported one is not guaranteed to be
//!   the shortest.
//! - Lazy deletion: improved nodes are pushed again; an entry whose key is worse than
//!   the node's current score is skipped when popped. No closed set is kept.
//!
//! Split
//! - `types.rs` (scores, outcomes, masks), `predecessor.rs` (route reconstruction),
//!   `astar.rs` (the search loop and heuristics).

mod astar;
mod predecessor;
mod types;

pub use astar::{a_star, a_star_cost, a_star_route, manhattan, zero_heuristic};
pub use predecessor::PredecessorTable;
pub use types::{PathCost, PathMask, Route, SearchCfg, SearchOutcome, SearchStats};

#[cfg(test)]
mod tests;
