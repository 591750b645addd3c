//! Error types surfaced by the validating boundary and the graph builder.
//!
//! Resource exhaustion is not represented here: allocation failure aborts the
//! process, and precondition violations (empty-queue pops, reconstructing a
//! failed search) panic.

use thiserror::Error;

/// Input that violates the instance contract (checked by `Instance::validate`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceError {
    #[error("grid bounds must be positive, got {width}x{height}")]
    EmptyBounds { width: i64, height: i64 },

    #[error(
        "wire {index} is not axis-aligned with increasing endpoints: ({x1}, {y1}) -> ({x2}, {y2})"
    )]
    MalformedWire {
        index: usize,
        x1: i64,
        y1: i64,
        x2: i64,
        y2: i64,
    },

    #[error("{what} ({x}, {y}) lies outside the {width}x{height} grid")]
    OutOfBounds {
        what: &'static str,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    },
}

/// The instance cannot be encoded as a `Grid`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid bounds must be positive, got {width}x{height}")]
    Empty { width: i64, height: i64 },

    #[error("grid {width}x{height} exceeds 16-bit coordinates (was the instance compacted?)")]
    TooLarge { width: i64, height: i64 },

    #[error("{what} ({x}, {y}) lies outside the {width}x{height} grid")]
    OutOfBounds {
        what: &'static str,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    },
}
