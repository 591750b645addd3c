//! Predecessor table used for route reconstruction.

use crate::grid::{Grid, Point};

/// For every relaxed node, the point it was most recently reached from.
///
/// Lives for one search call and is sized like the grid it was created for.
#[derive(Clone, Debug)]
pub struct PredecessorTable {
    width: u16,
    from: Vec<Option<Point>>,
}

impl PredecessorTable {
    pub fn new(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            from: vec![None; grid.len()],
        }
    }

    #[inline]
    fn slot(&self, p: Point) -> usize {
        usize::from(p.y) * usize::from(self.width) + usize::from(p.x)
    }

    #[inline]
    pub fn record(&mut self, node: Point, reached_from: Point) {
        let i = self.slot(node);
        self.from[i] = Some(reached_from);
    }

    #[inline]
    pub fn get(&self, node: Point) -> Option<Point> {
        self.from.get(self.slot(node)).copied().flatten()
    }

    /// Walk back from `goal` to `start` and return the route in forward order.
    ///
    /// Panics if the chain is broken, which means the search did not reach `goal`.
    pub fn route(&self, start: Point, goal: Point) -> Vec<Point> {
        let mut points = vec![goal];
        let mut current = goal;
        while current != start {
            assert!(
                points.len() <= self.from.len(),
                "predecessor chain from {goal:?} does not terminate"
            );
            current = match self.get(current) {
                Some(prev) => prev,
                None => panic!(
                    "no predecessor for {current:?}: route reconstructed after a failed search"
                ),
            };
            points.push(current);
        }
        points.reverse();
        points
    }
}
