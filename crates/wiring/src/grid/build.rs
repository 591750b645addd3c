//! GraphBuilder: lay compacted wires onto an open grid.

use crate::error::GridError;
use crate::instance::{Coord, Instance, Orientation, Wire};

use super::types::{Direction, Grid, Neighbors, Point};

impl Grid {
    /// Build the grid for `instance`.
    ///
    /// The instance is expected to be compacted (see `compress::compact`); any
    /// instance whose bounds fit `u16` is accepted, which lets small raw instances
    /// be searched directly. Malformed wires are skipped.
    pub fn from_instance(instance: &Instance) -> Result<Self, GridError> {
        let (width, height) = dimensions(instance)?;
        let start = to_point(instance, "start", instance.start)?;
        let goal = to_point(instance, "goal", instance.goal)?;
        let mut grid = Grid::open(width, height, start, goal);
        for (index, wire) in instance.wires.iter().enumerate() {
            let forward = match wire.orientation() {
                Orientation::Horizontal => Direction::XPos,
                Orientation::Vertical => Direction::YPos,
                Orientation::Malformed => {
                    tracing::warn!(index, ?wire, "skipping malformed wire");
                    continue;
                }
            };
            let (from, to) = wire_ends(instance, wire)?;
            grid.lay_wire(from, to, forward);
        }
        Ok(grid)
    }

    /// Walk from `from` to `to` in direction `forward`, closing the lane along the
    /// wire and charging one intersection per covered node.
    fn lay_wire(&mut self, from: Point, to: Point, forward: Direction) {
        let backward = forward.opposite();
        let mut cursor = Some(from);
        while let Some(p) = cursor {
            let mut lane = Neighbors::NONE;
            if p != to {
                lane |= forward.bit();
            }
            if p != from {
                lane |= backward.bit();
            }
            self.close(p, lane);
            self.add_cost(p);
            cursor = if p == to { None } else { forward.step(p) };
        }
    }
}

fn dimensions(instance: &Instance) -> Result<(u16, u16), GridError> {
    let (w, h) = (instance.width, instance.height);
    if w <= 0 || h <= 0 {
        return Err(GridError::Empty {
            width: w,
            height: h,
        });
    }
    match (u16::try_from(w), u16::try_from(h)) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(GridError::TooLarge {
            width: w,
            height: h,
        }),
    }
}

fn to_point(instance: &Instance, what: &'static str, c: Coord) -> Result<Point, GridError> {
    let out_of_bounds = || GridError::OutOfBounds {
        what,
        x: c.x,
        y: c.y,
        width: instance.width,
        height: instance.height,
    };
    if !instance.in_bounds(c) {
        return Err(out_of_bounds());
    }
    // in_bounds plus the u16 dimensions make these conversions infallible
    let x = u16::try_from(c.x).map_err(|_| out_of_bounds())?;
    let y = u16::try_from(c.y).map_err(|_| out_of_bounds())?;
    Ok(Point::new(x, y))
}

fn wire_ends(instance: &Instance, wire: &Wire) -> Result<(Point, Point), GridError> {
    Ok((
        to_point(instance, "wire end point", wire.first())?,
        to_point(instance, "wire end point", wire.last())?,
    ))
}
