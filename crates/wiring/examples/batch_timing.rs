//! Timing probe: solve a seeded batch of large random instances end to end.
//!
//! Purpose
//! - Give a reproducible "how long does a 99-wire instance take" data point
//!   without going through the text protocol.
//!
//! Why this shape
//! - Side `999_999_999` forces compaction on every draw; 99 wires is the largest
//!   count the protocol accepts, so the compacted grid is close to its bound.

use std::time::Instant;

use wiring::rand::{InstanceSampler, SamplerCfg, WireCount};
use wiring::solve;

fn main() {
    let cfg = SamplerCfg {
        wires: WireCount::Fixed(99),
        side: 999_999_999,
        max_attempts: 64,
    };
    let batch: Vec<_> = InstanceSampler::new(cfg, 2024).take(200).collect();

    let start = Instant::now();
    let mut unreachable = 0usize;
    let mut total = 0u64;
    for (tok, inst) in batch {
        match solve(inst).expect("sampler instances are valid") {
            Some(n) => total += u64::from(n),
            None => {
                unreachable += 1;
                println!("index {} unreachable", tok.index);
            }
        }
    }
    let elapsed = start.elapsed().as_secs_f64() * 1e3;
    println!("200 instances in {elapsed:.2} ms; crossings total {total}, unreachable {unreachable}");
}
