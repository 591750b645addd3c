use super::*;
use crate::compress::compact;
use crate::grid::{Grid, Point};
use crate::instance::{Coord, Instance, Wire};
use crate::rand::{draw_instance, ReplayToken, SamplerCfg, WireCount};
use crate::{solve, solve_instance, solve_route};
use proptest::prelude::*;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

fn grid_of(inst: &Instance) -> Grid {
    Grid::from_instance(inst).unwrap()
}

/// Dijkstra on the intersection count alone, reading blocked lanes and node costs
/// straight off the wire list.
fn reference_intersections(inst: &Instance) -> Option<u32> {
    let (w, h) = (inst.width, inst.height);
    let idx = |c: Coord| (c.y * w + c.x) as usize;
    let covering = |c: Coord| inst.wires.iter().filter(|wire| wire.contains(c)).count() as u32;
    let blocked = |a: Coord, b: Coord| {
        inst.wires
            .iter()
            .any(|wire| wire.contains(a) && wire.contains(b))
    };

    let mut best = vec![u32::MAX; (w * h) as usize];
    let mut heap = BinaryHeap::new();
    best[idx(inst.start)] = covering(inst.start);
    heap.push(Reverse((covering(inst.start), inst.start.x, inst.start.y)));
    while let Some(Reverse((d, x, y))) = heap.pop() {
        let c = Coord::new(x, y);
        if c == inst.goal {
            return Some(d);
        }
        if d > best[idx(c)] {
            continue;
        }
        for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            let n = Coord::new(x + dx, y + dy);
            if !inst.in_bounds(n) || blocked(c, n) {
                continue;
            }
            let nd = d + covering(n);
            if nd < best[idx(n)] {
                best[idx(n)] = nd;
                heap.push(Reverse((nd, n.x, n.y)));
            }
        }
    }
    None
}

fn small_instance(seed: u64, side: i64) -> Option<Instance> {
    let cfg = SamplerCfg {
        wires: WireCount::Uniform { min: 1, max: 10 },
        side,
        max_attempts: 32,
    };
    draw_instance(cfg, ReplayToken { seed, index: 0 })
}

#[test]
fn crossing_a_full_width_wire_costs_one() {
    let inst = Instance::square(
        5,
        vec![Wire::horizontal(2, 0, 4)],
        Coord::new(0, 0),
        Coord::new(4, 4),
    );
    let grid = grid_of(&inst);
    assert_eq!(a_star_cost(&grid, manhattan), Some(1));
    assert_eq!(solve(inst), Ok(Some(1)));
}

#[test]
fn wire_free_grid_costs_nothing() {
    let inst = Instance::square(9, vec![], Coord::new(8, 0), Coord::new(0, 8));
    let route = a_star_route(&grid_of(&inst), manhattan).unwrap();
    assert_eq!(route.intersections, 0);
    // nothing to avoid, so the heuristic leads straight to a shortest route
    assert_eq!(route.length(), 16);
}

#[test]
fn sealed_junction_is_unreachable() {
    let inst = Instance::square(
        5,
        vec![
            Wire::horizontal(2, 0, 2),
            Wire::horizontal(2, 2, 4),
            Wire::vertical(2, 0, 2),
            Wire::vertical(2, 2, 4),
        ],
        Coord::new(0, 0),
        Coord::new(2, 2),
    );
    assert_eq!(a_star_cost(&grid_of(&inst), manhattan), None);
    assert_eq!(solve(inst), Ok(None));
}

#[test]
fn closed_ring_is_crossed_not_blocking() {
    // wires only close their own lanes, so stepping across the ring costs one
    let inst = Instance::square(
        7,
        vec![
            Wire::horizontal(1, 1, 5),
            Wire::horizontal(5, 1, 5),
            Wire::vertical(1, 1, 5),
            Wire::vertical(5, 1, 5),
        ],
        Coord::new(0, 0),
        Coord::new(3, 3),
    );
    assert_eq!(a_star_cost(&grid_of(&inst), manhattan), Some(1));
    assert_eq!(reference_intersections(&inst), Some(1));
}

#[test]
fn start_sealed_in_a_corner_is_unreachable() {
    let inst = Instance::square(
        6,
        vec![Wire::horizontal(0, 0, 3), Wire::vertical(0, 0, 3)],
        Coord::new(0, 0),
        Coord::new(5, 5),
    );
    let grid = grid_of(&inst);
    assert!(grid.neighbors(grid.start()).is_empty());
    assert_eq!(a_star(&grid, manhattan, SearchCfg::with_route()), None);
}

#[test]
fn start_equal_to_goal_pays_its_own_cost() {
    let inst = Instance::square(
        4,
        vec![Wire::vertical(1, 0, 3)],
        Coord::new(1, 2),
        Coord::new(1, 2),
    );
    let route = a_star_route(&grid_of(&inst), manhattan).unwrap();
    assert_eq!(route.intersections, 1);
    assert_eq!(route.points, vec![Point::new(1, 2)]);
}

#[test]
fn wall_of_parallel_wires_is_crossed_once_each() {
    // three stacked full-width wires between start and goal
    let inst = Instance::square(
        7,
        vec![
            Wire::horizontal(2, 0, 6),
            Wire::horizontal(3, 0, 6),
            Wire::horizontal(4, 0, 6),
        ],
        Coord::new(3, 0),
        Coord::new(3, 6),
    );
    let route = a_star_route(&grid_of(&inst), manhattan).unwrap();
    assert_eq!(route.intersections, 3);
    let mask = route.mask(&grid_of(&inst));
    assert_eq!(mask.count(), route.points.len());
    assert!(mask.contains(Point::new(3, 0)) && mask.contains(Point::new(3, 6)));
}

#[test]
fn detour_through_a_gap_beats_crossing() {
    // horizontal wire with a gap at x = 3; going around costs nothing
    let inst = Instance::square(
        7,
        vec![Wire::horizontal(3, 0, 2), Wire::horizontal(3, 4, 6)],
        Coord::new(0, 0),
        Coord::new(0, 6),
    );
    assert_eq!(a_star_cost(&grid_of(&inst), manhattan), Some(0));
}

#[test]
fn huge_instance_is_compacted_before_search() {
    let side = 999_999_999;
    let inst = Instance::square(
        side,
        vec![
            Wire::horizontal(500_000_000, 0, side - 1),
            Wire::vertical(400_000_000, 0, 499_999_999),
        ],
        Coord::new(0, 0),
        Coord::new(side - 1, side - 1),
    );
    let solution = solve_instance(inst, SearchCfg::with_route()).unwrap();
    assert_eq!(solution.intersections(), Some(1));
    assert!(solution.grid.width() <= 13 && solution.grid.height() <= 13);
    let route = solution.route().unwrap();
    assert_eq!(route.points.first(), Some(&solution.grid.start()));
    assert_eq!(route.points.last(), Some(&solution.grid.goal()));
}

#[test]
fn solve_route_reports_compacted_points() {
    let inst = Instance::square(
        1_000,
        vec![Wire::vertical(500, 0, 999)],
        Coord::new(0, 10),
        Coord::new(999, 10),
    );
    let route = solve_route(inst).unwrap().unwrap();
    assert_eq!(route.intersections, 1);
    assert!(route.points.iter().all(|p| p.x < 16 && p.y < 16));
}

#[test]
fn stats_count_every_push_and_pop() {
    let inst = Instance::square(
        6,
        vec![Wire::vertical(2, 0, 4), Wire::horizontal(4, 1, 5)],
        Coord::new(0, 0),
        Coord::new(5, 5),
    );
    let outcome = a_star(&grid_of(&inst), manhattan, SearchCfg::default()).unwrap();
    assert!(outcome.route.is_none());
    assert!(outcome.stats.popped >= 1);
    assert!(outcome.stats.pushed >= outcome.stats.popped);
    assert!(outcome.stats.stale <= outcome.stats.popped);
}

#[test]
#[should_panic(expected = "failed search")]
fn reconstructing_without_a_chain_panics() {
    let grid = Grid::open(3, 3, Point::new(0, 0), Point::new(2, 2));
    let preds = PredecessorTable::new(&grid);
    let _ = preds.route(grid.start(), grid.goal());
}

proptest! {
    #[test]
    fn no_wires_means_no_intersections(
        side in 1i64..40,
        sx in 0i64..40, sy in 0i64..40, gx in 0i64..40, gy in 0i64..40,
    ) {
        let inst = Instance::square(
            side,
            vec![],
            Coord::new(sx % side, sy % side),
            Coord::new(gx % side, gy % side),
        );
        prop_assert_eq!(a_star_cost(&grid_of(&inst), manhattan), Some(0));
    }

    #[test]
    fn matches_brute_force_reference(seed in any::<u64>(), side in 2i64..=30) {
        let Some(inst) = small_instance(seed, side) else { return Ok(()); };
        let expected = reference_intersections(&inst);
        let grid = grid_of(&inst);
        prop_assert_eq!(a_star_cost(&grid, manhattan), expected);
        prop_assert_eq!(a_star_cost(&grid, zero_heuristic), expected);
    }

    #[test]
    fn compaction_preserves_the_answer(seed in any::<u64>(), side in 2i64..=30) {
        let Some(inst) = small_instance(seed, side) else { return Ok(()); };
        let raw = a_star_cost(&grid_of(&inst), manhattan);
        let mut compacted = inst.clone();
        compact(&mut compacted);
        prop_assert_eq!(a_star_cost(&grid_of(&compacted), manhattan), raw);
        prop_assert_eq!(solve(inst), Ok(raw));
    }

    #[test]
    fn reconstructed_route_is_valid(seed in any::<u64>(), side in 2i64..=30) {
        let Some(inst) = small_instance(seed, side) else { return Ok(()); };
        let grid = grid_of(&inst);
        let Some(route) = a_star_route(&grid, manhattan) else { return Ok(()); };
        prop_assert_eq!(route.points.first(), Some(&grid.start()));
        prop_assert_eq!(route.points.last(), Some(&grid.goal()));
        for pair in route.points.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            prop_assert!(
                grid.neighbor_points(from).any(|q| q == to),
                "{:?} -> {:?} is not an open step", from, to
            );
        }
        let total: u32 = route.points.iter().map(|p| u32::from(grid.cost(*p))).sum();
        prop_assert_eq!(total, route.intersections);
    }
}
