//! Grid data types.

use std::fmt;
use std::ops::{BitOr, BitOrAssign, Sub};

/// Node of the compacted grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    #[inline]
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Manhattan distance.
    #[inline]
    pub fn distance(self, other: Point) -> u32 {
        u32::from(self.x.abs_diff(other.x)) + u32::from(self.y.abs_diff(other.y))
    }
}

/// Axis-aligned unit step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    XPos,
    XNeg,
    YPos,
    YNeg,
}

impl Direction {
    /// Expansion order used by the search.
    pub const ALL: [Direction; 4] = [
        Direction::XNeg,
        Direction::XPos,
        Direction::YNeg,
        Direction::YPos,
    ];

    #[inline]
    pub fn bit(self) -> Neighbors {
        match self {
            Direction::XPos => Neighbors::X_POS,
            Direction::XNeg => Neighbors::X_NEG,
            Direction::YPos => Neighbors::Y_POS,
            Direction::YNeg => Neighbors::Y_NEG,
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::XPos => Direction::XNeg,
            Direction::XNeg => Direction::XPos,
            Direction::YPos => Direction::YNeg,
            Direction::YNeg => Direction::YPos,
        }
    }

    /// `p` moved one step; `None` when leaving the `u16` range.
    #[inline]
    pub fn step(self, p: Point) -> Option<Point> {
        match self {
            Direction::XPos => p.x.checked_add(1).map(|x| Point::new(x, p.y)),
            Direction::XNeg => p.x.checked_sub(1).map(|x| Point::new(x, p.y)),
            Direction::YPos => p.y.checked_add(1).map(|y| Point::new(p.x, y)),
            Direction::YNeg => p.y.checked_sub(1).map(|y| Point::new(p.x, y)),
        }
    }
}

/// Set of open directions out of one node (low 4 bits).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Neighbors(u8);

impl Neighbors {
    pub const NONE: Neighbors = Neighbors(0);
    pub const X_POS: Neighbors = Neighbors(0b0001);
    pub const X_NEG: Neighbors = Neighbors(0b0010);
    pub const Y_POS: Neighbors = Neighbors(0b0100);
    pub const Y_NEG: Neighbors = Neighbors(0b1000);
    pub const ALL: Neighbors = Neighbors(0b1111);

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Drops bits outside the four directions.
    #[inline]
    pub fn from_bits_truncate(bits: u8) -> Self {
        Neighbors(bits & Self::ALL.0)
    }

    #[inline]
    pub fn contains(self, other: Neighbors) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn has(self, dir: Direction) -> bool {
        self.contains(dir.bit())
    }

    #[inline]
    pub fn remove(&mut self, other: Neighbors) {
        self.0 &= !other.0;
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Open directions in `Direction::ALL` order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.has(*d))
    }
}

impl BitOr for Neighbors {
    type Output = Neighbors;
    #[inline]
    fn bitor(self, rhs: Neighbors) -> Neighbors {
        Neighbors(self.0 | rhs.0)
    }
}

impl BitOrAssign for Neighbors {
    #[inline]
    fn bitor_assign(&mut self, rhs: Neighbors) {
        self.0 |= rhs.0;
    }
}

impl Sub for Neighbors {
    type Output = Neighbors;
    #[inline]
    fn sub(self, rhs: Neighbors) -> Neighbors {
        Neighbors(self.0 & !rhs.0)
    }
}

impl From<Direction> for Neighbors {
    fn from(dir: Direction) -> Self {
        dir.bit()
    }
}

impl fmt::Debug for Neighbors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Neighbors, &str); 4] = [
            (Neighbors::X_POS, "+x"),
            (Neighbors::X_NEG, "-x"),
            (Neighbors::Y_POS, "+y"),
            (Neighbors::Y_NEG, "-y"),
        ];
        let names: Vec<&str> = NAMES
            .iter()
            .filter(|(bit, _)| self.contains(*bit))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "Neighbors({})", names.join("|"))
    }
}

/// Compacted routing grid with two parallel node-indexed fields.
///
/// Boundary nodes never carry a direction bit that points out of range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub(super) width: u16,
    pub(super) height: u16,
    pub(super) start: Point,
    pub(super) goal: Point,
    pub(super) cost: Vec<u8>,
    pub(super) neighbors: Vec<Neighbors>,
}

impl Grid {
    /// Wire-free grid: cost 0 everywhere, all in-range directions open.
    ///
    /// Panics if a dimension is zero or a query point lies outside the grid.
    pub fn open(width: u16, height: u16, start: Point, goal: Point) -> Self {
        assert!(width > 0 && height > 0, "grid must have at least one node");
        let n = usize::from(width) * usize::from(height);
        let mut grid = Self {
            width,
            height,
            start,
            goal,
            cost: vec![0; n],
            neighbors: vec![Neighbors::ALL; n],
        };
        assert!(grid.contains(start), "start {start:?} outside the grid");
        assert!(grid.contains(goal), "goal {goal:?} outside the grid");
        for x in 0..width {
            grid.close(Point::new(x, 0), Neighbors::Y_NEG);
            grid.close(Point::new(x, height - 1), Neighbors::Y_POS);
        }
        for y in 0..height {
            grid.close(Point::new(0, y), Neighbors::X_NEG);
            grid.close(Point::new(width - 1, y), Neighbors::X_POS);
        }
        grid
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.cost.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cost.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x < self.width && p.y < self.height
    }

    /// Flat index of `p`. Panics when `p` lies outside the grid.
    #[inline]
    pub fn index(&self, p: Point) -> usize {
        assert!(
            self.contains(p),
            "{p:?} outside {}x{} grid",
            self.width,
            self.height
        );
        usize::from(p.y) * usize::from(self.width) + usize::from(p.x)
    }

    /// Number of existing wires through `p`.
    #[inline]
    pub fn cost(&self, p: Point) -> u8 {
        self.cost[self.index(p)]
    }

    #[inline]
    pub fn neighbors(&self, p: Point) -> Neighbors {
        self.neighbors[self.index(p)]
    }

    /// Points reachable from `p` in one step.
    pub fn neighbor_points(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        self.neighbors(p).iter().filter_map(move |d| d.step(p))
    }

    /// All nodes in row-major order (`y` outer, `x` inner).
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| Point::new(x, y)))
    }

    #[inline]
    pub(super) fn close(&mut self, p: Point, dirs: Neighbors) {
        let i = self.index(p);
        self.neighbors[i].remove(dirs);
    }

    #[inline]
    pub(super) fn add_cost(&mut self, p: Point) {
        let i = self.index(p);
        self.cost[i] = self.cost[i].saturating_add(1);
    }
}
