//! Terminal picture of a compacted grid.
//!
//! One glyph per node, top row first (`y = height - 1`). The glyph shows the open
//! directions of the node; its color shows the node cost, capped at 4. Nodes on the
//! reported route are drawn in reverse video, or as `*` without color.

use std::fmt::Write as _;
use wiring::{Grid, PathMask, Point};

/// Indexed by the 4-bit neighbor mask (`+x = 1`, `-x = 2`, `+y = 4`, `-y = 8`).
const GLYPHS: [&str; 16] = [
    "·", "╶", "╴", "─", "╵", "└", "┘", "┴", "╷", "┌", "┐", "┬", "│", "├", "┤", "┼",
];

const COST_COLORS: [&str; 5] = [
    "\x1b[0;37m",
    "\x1b[1;32m",
    "\x1b[1;36m",
    "\x1b[1;33m",
    "\x1b[1;31m",
];
const REVERSE: &str = "\x1b[7m";
const RESET: &str = "\x1b[0m";
const PATH_PLAIN: &str = "*";

#[derive(Clone, Copy, Debug)]
pub struct Style {
    /// Emit ANSI colors; otherwise glyphs only.
    pub color: bool,
}

pub fn glyph(grid: &Grid, p: Point) -> &'static str {
    GLYPHS[usize::from(grid.neighbors(p).bits())]
}

fn cost_color(cost: u8) -> &'static str {
    COST_COLORS[usize::from(cost).min(COST_COLORS.len() - 1)]
}

/// Render `grid`, highlighting `path` if given, followed by a color legend.
pub fn render_grid(grid: &Grid, path: Option<&PathMask>, style: Style) -> String {
    let mut out = String::new();
    for y in (0..grid.height()).rev() {
        for x in 0..grid.width() {
            let p = Point::new(x, y);
            let on_path = path.is_some_and(|m| m.contains(p));
            match (style.color, on_path) {
                (true, true) => {
                    out.push_str(REVERSE);
                    out.push_str(cost_color(grid.cost(p)));
                    out.push_str(glyph(grid, p));
                    out.push_str(RESET);
                }
                (true, false) => {
                    out.push_str(cost_color(grid.cost(p)));
                    out.push_str(glyph(grid, p));
                }
                (false, true) => out.push_str(PATH_PLAIN),
                (false, false) => out.push_str(glyph(grid, p)),
            }
        }
        if style.color {
            out.push_str(RESET);
        }
        out.push('\n');
    }
    if style.color {
        out.push_str("Color indicates the cost (number of intersections) of a node:");
        for (cost, color) in COST_COLORS.iter().enumerate() {
            let sep = if cost == 0 { " " } else { ", " };
            let _ = write!(out, "{sep}{color}{cost}");
        }
        out.push_str(RESET);
        out.push('\n');
    }
    out
}
