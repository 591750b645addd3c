//! Reproducible random instances (replay tokens + rejection sampling).
//!
//! Purpose
//! - Feed property tests, benchmarks and the CLI `gen` command with valid
//!   instances: axis-aligned wires with strictly increasing end points, no two
//!   collinear wires sharing a point, start/goal anywhere inside the grid.
//!
//! Model
//! - Each wire picks an orientation, a lane and a span uniformly; a candidate that
//!   touches a collinear wire on the same lane is rejected and redrawn, up to
//!   `max_attempts` times per wire. Crossing perpendicular wires is allowed.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use crate::instance::{Coord, Instance, Orientation, Wire};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Wire count distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WireCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl WireCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            WireCount::Fixed(n) => n,
            WireCount::Uniform { min, max } => rng.gen_range(min..=max.max(min)),
        }
    }
}

/// Sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct SamplerCfg {
    pub wires: WireCount,
    /// Side length of the square grid; coordinates are drawn from `0..side`.
    pub side: i64,
    /// Redraws allowed per wire before giving up on it.
    pub max_attempts: usize,
}

impl Default for SamplerCfg {
    fn default() -> Self {
        Self {
            wires: WireCount::Uniform { min: 1, max: 10 },
            side: 30,
            max_attempts: 32,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        StdRng::seed_from_u64(mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15))))
    }
}

/// Draw one instance. Returns `None` if the side is too small to hold a wire or
/// no wire could be placed within the attempt budget.
pub fn draw_instance(cfg: SamplerCfg, tok: ReplayToken) -> Option<Instance> {
    if cfg.side < 2 {
        return None;
    }
    let mut rng = tok.to_std_rng();
    let target = cfg.wires.sample(&mut rng);
    let mut wires: Vec<Wire> = Vec::with_capacity(target);
    for _ in 0..target {
        let placed = (0..cfg.max_attempts.max(1))
            .map(|_| random_wire(&mut rng, cfg.side))
            .find(|candidate| wires.iter().all(|w| !collinear_touch(w, candidate)));
        match placed {
            Some(w) => wires.push(w),
            None => break,
        }
    }
    if wires.is_empty() {
        return None;
    }
    let start = random_coord(&mut rng, cfg.side);
    let goal = random_coord(&mut rng, cfg.side);
    Some(Instance::square(cfg.side, wires, start, goal))
}

fn random_coord<R: Rng>(rng: &mut R, side: i64) -> Coord {
    Coord::new(rng.gen_range(0..side), rng.gen_range(0..side))
}

fn random_wire<R: Rng>(rng: &mut R, side: i64) -> Wire {
    let lane = rng.gen_range(0..side);
    let lo = rng.gen_range(0..side - 1);
    let hi = rng.gen_range(lo + 1..side);
    if rng.gen_bool(0.5) {
        Wire::horizontal(lane, lo, hi)
    } else {
        Wire::vertical(lane, lo, hi)
    }
}

/// Same lane and overlapping or abutting spans.
fn collinear_touch(a: &Wire, b: &Wire) -> bool {
    match (a.orientation(), b.orientation()) {
        (Orientation::Horizontal, Orientation::Horizontal) => {
            a.y1 == b.y1 && a.x1 <= b.x2 && b.x1 <= a.x2
        }
        (Orientation::Vertical, Orientation::Vertical) => {
            a.x1 == b.x1 && a.y1 <= b.y2 && b.y1 <= a.y2
        }
        _ => false,
    }
}

/// Endless stream of instances drawn with consecutive replay indices.
#[derive(Clone, Debug)]
pub struct InstanceSampler {
    cfg: SamplerCfg,
    seed: u64,
    next_index: u64,
}

impl InstanceSampler {
    pub fn new(cfg: SamplerCfg, seed: u64) -> Self {
        Self {
            cfg,
            seed,
            next_index: 0,
        }
    }

    /// Next instance and the token that regenerates it. Indices whose draw fails are
    /// skipped; gives up after `max_attempts` consecutive failures.
    pub fn next_instance(&mut self) -> Option<(ReplayToken, Instance)> {
        for _ in 0..self.cfg.max_attempts.max(1) {
            let tok = ReplayToken {
                seed: self.seed,
                index: self.next_index,
            };
            self.next_index += 1;
            if let Some(inst) = draw_instance(self.cfg, tok) {
                return Some((tok, inst));
            }
        }
        None
    }
}

impl Iterator for InstanceSampler {
    type Item = (ReplayToken, Instance);

    fn next(&mut self) -> Option<Self::Item> {
        self.next_instance()
    }
}
