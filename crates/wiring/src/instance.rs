//! Raw problem instances in the original (uncompacted) coordinate space.
//!
//! Coordinates are `i64` so that sides up to ~10^9 and the intermediate values of
//! `compress::compact` never overflow. `Instance::validate` is the boundary check;
//! the engine itself assumes a validated instance.

use crate::error::InstanceError;

/// Integer point in the raw coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i64,
    pub y: i64,
}

impl Coord {
    #[inline]
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Existing wire given by its two end points (`x1 <= x2`, `y1 <= y2`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Wire {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

/// Axis classification of a wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// `y1 == y2` and `x1 < x2`.
    Horizontal,
    /// `x1 == x2` and `y1 < y2`.
    Vertical,
    /// Diagonal, reversed or zero-length.
    Malformed,
}

impl Wire {
    #[inline]
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn horizontal(y: i64, x1: i64, x2: i64) -> Self {
        Self::new(x1, y, x2, y)
    }

    #[inline]
    pub fn vertical(x: i64, y1: i64, y2: i64) -> Self {
        Self::new(x, y1, x, y2)
    }

    pub fn orientation(&self) -> Orientation {
        if self.y1 == self.y2 && self.x1 < self.x2 {
            Orientation::Horizontal
        } else if self.x1 == self.x2 && self.y1 < self.y2 {
            Orientation::Vertical
        } else {
            Orientation::Malformed
        }
    }

    #[inline]
    pub fn first(&self) -> Coord {
        Coord::new(self.x1, self.y1)
    }

    #[inline]
    pub fn last(&self) -> Coord {
        Coord::new(self.x2, self.y2)
    }

    /// True if `c` lies on the wire (end points included).
    pub fn contains(&self, c: Coord) -> bool {
        (self.x1..=self.x2).contains(&c.x) && (self.y1..=self.y2).contains(&c.y)
    }
}

/// One routing problem: grid bounds, existing wires, and the two points to connect.
///
/// Valid node coordinates are `0..width` and `0..height`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance {
    pub width: i64,
    pub height: i64,
    pub wires: Vec<Wire>,
    pub start: Coord,
    pub goal: Coord,
}

impl Instance {
    /// Square grid of side `side`, as produced by the text protocol.
    pub fn square(side: i64, wires: Vec<Wire>, start: Coord, goal: Coord) -> Self {
        Self {
            width: side,
            height: side,
            wires,
            start,
            goal,
        }
    }

    /// Number of coordinates per axis that take part in compaction (`2m + 3`).
    #[inline]
    pub fn axis_coordinate_count(&self) -> usize {
        2 * self.wires.len() + 3
    }

    #[inline]
    pub fn in_bounds(&self, c: Coord) -> bool {
        (0..self.width).contains(&c.x) && (0..self.height).contains(&c.y)
    }

    /// Check the contract the engine relies on: positive bounds, axis-aligned wires
    /// with strictly increasing end points, and every point inside the grid.
    ///
    /// Overlapping collinear wires are not detected.
    pub fn validate(&self) -> Result<(), InstanceError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(InstanceError::EmptyBounds {
                width: self.width,
                height: self.height,
            });
        }
        for (index, wire) in self.wires.iter().enumerate() {
            if wire.orientation() == Orientation::Malformed {
                return Err(InstanceError::MalformedWire {
                    index,
                    x1: wire.x1,
                    y1: wire.y1,
                    x2: wire.x2,
                    y2: wire.y2,
                });
            }
            self.check_point("wire end point", wire.first())?;
            self.check_point("wire end point", wire.last())?;
        }
        self.check_point("start", self.start)?;
        self.check_point("goal", self.goal)
    }

    fn check_point(&self, what: &'static str, c: Coord) -> Result<(), InstanceError> {
        if self.in_bounds(c) {
            Ok(())
        } else {
            Err(InstanceError::OutOfBounds {
                what,
                x: c.x,
                y: c.y,
                width: self.width,
                height: self.height,
            })
        }
    }
}
