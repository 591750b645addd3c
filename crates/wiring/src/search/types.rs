//! Scores, configuration and results of a path search.

use crate::grid::{Grid, Point};

/// Accumulated `(intersections, length)`; the derived order is lexicographic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathCost {
    pub intersections: u32,
    pub length: u32,
}

impl PathCost {
    /// Score of a node that has not been reached.
    pub const INFINITE: PathCost = PathCost {
        intersections: u32::MAX,
        length: u32::MAX,
    };

    #[inline]
    pub fn new(intersections: u32, length: u32) -> Self {
        Self {
            intersections,
            length,
        }
    }

    /// Open-set comparator: strictly cheaper path.
    #[inline]
    pub fn cheaper(a: &PathCost, b: &PathCost) -> bool {
        a < b
    }

    /// Score after stepping onto a node with `node_cost` wires.
    #[inline]
    pub fn step(self, node_cost: u8) -> PathCost {
        PathCost {
            intersections: self.intersections.saturating_add(u32::from(node_cost)),
            length: self.length.saturating_add(1),
        }
    }
}

/// Search configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchCfg {
    /// Keep a predecessor table and reconstruct the route on success.
    pub record_route: bool,
}

impl SearchCfg {
    pub fn with_route() -> Self {
        Self { record_route: true }
    }
}

/// Work counters of one search call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub popped: usize,
    pub pushed: usize,
    /// Popped entries superseded by a later improvement.
    pub stale: usize,
}

/// Successful search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub intersections: u32,
    /// Start-to-goal node sequence; `Some` only with `SearchCfg::record_route`.
    pub route: Option<Vec<Point>>,
    pub stats: SearchStats,
}

/// Reconstructed route from start to goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub intersections: u32,
    pub points: Vec<Point>,
}

impl Route {
    /// Number of steps (one less than the number of nodes).
    pub fn length(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn mask(&self, grid: &Grid) -> PathMask {
        PathMask::from_points(grid, &self.points)
    }
}

/// Boolean "on path" field with the dimensions of the grid it was built for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathMask {
    width: u16,
    height: u16,
    on_path: Vec<bool>,
}

impl PathMask {
    pub fn from_points(grid: &Grid, points: &[Point]) -> Self {
        let mut on_path = vec![false; grid.len()];
        for p in points {
            on_path[grid.index(*p)] = true;
        }
        Self {
            width: grid.width(),
            height: grid.height(),
            on_path,
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// False for points outside the mask.
    pub fn contains(&self, p: Point) -> bool {
        p.x < self.width
            && p.y < self.height
            && self.on_path[usize::from(p.y) * usize::from(self.width) + usize::from(p.x)]
    }

    /// Number of nodes on the path.
    pub fn count(&self) -> usize {
        self.on_path.iter().filter(|b| **b).count()
    }
}
