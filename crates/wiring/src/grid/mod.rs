//! Compacted grid encoding: per-node crossing cost and 4-direction neighbor masks.
//!
//! Purpose
//! - Turn a (compacted) instance into a flat, bounds-checked `Grid` that the search
//!   can walk without touching the wire list again.
//!
//! Model
//! - Storage is one owned buffer per field, indexed by `y * width + x`.
//! - Every node starts with cost 0 and all in-range directions open.
//! - Laying a wire adds 1 to the cost of every node it covers and closes the lane
//!   along the wire between consecutive covered nodes. Moving across a wire stays
//!   possible; each distinct wire through a node costs one intersection.
//! - Costs are `u8` and saturate at 255.
//!
//! Split
//! - `types.rs` (Point, Direction, Neighbors, Grid) and `build.rs` (GraphBuilder).

mod build;
mod types;

pub use types::{Direction, Grid, Neighbors, Point};
