//! Coordinate compression (grid reduction).
//!
//! Model
//! - Per axis, every coordinate referenced by a wire end point, the upper bound and
//!   the two query points is collected and sorted. The implicit lower bound is `-1`.
//! - Walking the sorted sequence, any gap larger than `MAX_GAP` between consecutive
//!   values is collapsed to exactly `MAX_GAP`; smaller gaps are kept. A band of
//!   identical rows/columns is topologically uniform, so shrinking it cannot change
//!   the minimum number of intersections.
//! - Shifts are accumulated in one running total, which keeps the pass at
//!   O(n log n) for `n = 2m + 3` coordinates per axis (dominated by the sort).
//!
//! Bound
//! - After compaction `width` and `height` are each at most `4m + 5`
//!   (`compacted_bound`), so a compacted instance always fits 16-bit points for the
//!   wire counts accepted by the text protocol.

use crate::instance::{Instance, Wire};

/// Largest gap between consecutive coordinates that survives compaction.
pub const MAX_GAP: i64 = 2;

/// Upper bound on the compacted width/height for `wire_count` wires.
#[inline]
pub fn compacted_bound(wire_count: usize) -> i64 {
    4 * wire_count as i64 + 5
}

/// Compact `instance` in place. Relative order of all coordinates, strict wire
/// orderings and gaps of at most `MAX_GAP` are preserved.
pub fn compact(instance: &mut Instance) {
    let (xs, ys) = axis_slots(instance);
    compact_axis(xs);
    compact_axis(ys);
}

/// Mutable references to every coordinate taking part in compaction, split by axis.
fn axis_slots(instance: &mut Instance) -> (Vec<&mut i64>, Vec<&mut i64>) {
    let n = instance.axis_coordinate_count();
    let Instance {
        width,
        height,
        wires,
        start,
        goal,
    } = instance;
    let mut xs: Vec<&mut i64> = Vec::with_capacity(n);
    let mut ys: Vec<&mut i64> = Vec::with_capacity(n);
    for Wire { x1, y1, x2, y2 } in wires.iter_mut() {
        xs.push(x1);
        xs.push(x2);
        ys.push(y1);
        ys.push(y2);
    }
    // upper bound is included; the lower bound -1 is implicit
    xs.push(width);
    ys.push(height);
    xs.push(&mut start.x);
    ys.push(&mut start.y);
    xs.push(&mut goal.x);
    ys.push(&mut goal.y);
    (xs, ys)
}

fn compact_axis(mut slots: Vec<&mut i64>) {
    slots.sort_unstable_by_key(|v| **v);
    let mut prev = -1;
    let mut total_shift = 0;
    for slot in slots {
        let mut value = *slot - total_shift;
        let gap = value - prev;
        if gap > MAX_GAP {
            let shift = gap - MAX_GAP;
            value -= shift;
            total_shift += shift;
        }
        *slot = value;
        prev = value;
    }
}
