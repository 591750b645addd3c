//! Line-oriented text protocol.
//!
//! Per instance, whitespace-separated: `m s`, then `m` wires as `x1 y1 x2 y2`, then
//! `p1x p1y p2x p2y`. A header with `m = 0` or `s = 0` ends the batch, as does end of
//! input before a header. Line breaks carry no meaning.

use anyhow::{bail, Context, Result};
use std::fmt::Write as _;
use std::str::SplitAsciiWhitespace;
use wiring::{Coord, Instance, Wire};

/// Largest accepted wire count.
pub const MAX_WIRES: i64 = 99;
/// Largest accepted grid side.
pub const MAX_SIDE: i64 = 999_999_999;

/// Pulls instances off a whitespace-separated token stream.
pub struct InstanceReader<'a> {
    tokens: SplitAsciiWhitespace<'a>,
    /// 1-based number of the instance being read, for error messages.
    number: usize,
    done: bool,
}

impl<'a> InstanceReader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            tokens: text.split_ascii_whitespace(),
            number: 0,
            done: false,
        }
    }

    /// Number of instances read so far (the terminator is not counted).
    pub fn count(&self) -> usize {
        self.number
    }

    /// Next instance, or `None` once the terminator or end of input is reached.
    pub fn next_instance(&mut self) -> Result<Option<Instance>> {
        if self.done {
            return Ok(None);
        }
        let Some(m) = self.next_int()? else {
            self.done = true;
            return Ok(None);
        };
        let side = self.require("grid side")?;
        if m == 0 || side == 0 {
            tracing::debug!(m, side, "terminator");
            self.done = true;
            return Ok(None);
        }
        self.number += 1;
        let n = self.number;
        self.read_body(m, side)
            .with_context(|| format!("instance {n}"))
            .map(Some)
    }

    fn read_body(&mut self, m: i64, side: i64) -> Result<Instance> {
        if !(1..=MAX_WIRES).contains(&m) {
            bail!("wire count {m} outside 1..={MAX_WIRES}");
        }
        if !(1..=MAX_SIDE).contains(&side) {
            bail!("grid side {side} outside 1..={MAX_SIDE}");
        }
        let mut wires = Vec::with_capacity(m as usize);
        for i in 0..m {
            let [x1, y1, x2, y2] = self.require_four("wire").with_context(|| format!("wire {i}"))?;
            // end points may come in either order
            wires.push(Wire::new(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2)));
        }
        let [sx, sy, gx, gy] = self.require_four("start/goal")?;
        let inst = Instance::square(side, wires, Coord::new(sx, sy), Coord::new(gx, gy));
        inst.validate()?;
        Ok(inst)
    }

    fn next_int(&mut self) -> Result<Option<i64>> {
        match self.tokens.next() {
            None => Ok(None),
            Some(tok) => tok
                .parse::<i64>()
                .map(Some)
                .with_context(|| format!("expected an integer, found {tok:?}")),
        }
    }

    fn require(&mut self, what: &str) -> Result<i64> {
        self.next_int()?
            .with_context(|| format!("input ended while reading {what}"))
    }

    fn require_four(&mut self, what: &str) -> Result<[i64; 4]> {
        Ok([
            self.require(what)?,
            self.require(what)?,
            self.require(what)?,
            self.require(what)?,
        ])
    }
}

/// Serialize instances in the text protocol, followed by the `0 0` terminator.
pub fn write_instances<'a, I>(instances: I) -> String
where
    I: IntoIterator<Item = &'a Instance>,
{
    let mut out = String::new();
    for inst in instances {
        // writing into a String cannot fail
        let _ = writeln!(out, "{} {}", inst.wires.len(), inst.width);
        let wires: Vec<String> = inst
            .wires
            .iter()
            .map(|w| format!("{} {} {} {}", w.x1, w.y1, w.x2, w.y2))
            .collect();
        let _ = writeln!(out, "{}", wires.join(" "));
        let _ = writeln!(
            out,
            "{} {} {} {}",
            inst.start.x, inst.start.y, inst.goal.x, inst.goal.y
        );
    }
    out.push_str("0 0\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(text: &str) -> Result<Vec<Instance>> {
        let mut reader = InstanceReader::new(text);
        let mut out = Vec::new();
        while let Some(inst) = reader.next_instance()? {
            out.push(inst);
        }
        Ok(out)
    }

    #[test]
    fn reads_one_instance_then_terminator() {
        let text = "1 5\n0 2 4 2\n0 0 4 4\n0 0\n";
        let all = read_all(text).unwrap();
        assert_eq!(
            all,
            vec![Instance::square(
                5,
                vec![Wire::horizontal(2, 0, 4)],
                Coord::new(0, 0),
                Coord::new(4, 4)
            )]
        );
    }

    #[test]
    fn terminator_stops_before_later_data() {
        let text = "0 0\n1 5\n0 2 4 2\n0 0 4 4\n";
        assert!(read_all(text).unwrap().is_empty());
        // zero side alone also terminates
        assert!(read_all("3 0 garbage").unwrap().is_empty());
    }

    #[test]
    fn end_of_input_terminates_cleanly() {
        let text = "1 5 0 2 4 2 0 0 4 4";
        assert_eq!(read_all(text).unwrap().len(), 1);
        assert!(read_all("").unwrap().is_empty());
    }

    #[test]
    fn swapped_end_points_are_normalized() {
        let all = read_all("1 5 3 1 1 1 0 0 4 4 0 0").unwrap();
        assert_eq!(all[0].wires, vec![Wire::horizontal(1, 1, 3)]);
    }

    #[test]
    fn errors_name_the_instance() {
        let text = "1 5 0 2 4 2 0 0 4 4\n1 5 0 2 4 2 0 0 9 4\n";
        let err = read_all(text).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("instance 2"), "{msg}");
        assert!(msg.contains("goal"), "{msg}");
    }

    #[test]
    fn rejects_out_of_range_headers_and_junk() {
        assert!(read_all("100 5").is_err());
        assert!(read_all("1 1000000000").is_err());
        assert!(read_all("-1 5").is_err());
        assert!(read_all("1 5 0 2 x 2 0 0 4 4").is_err());
        let truncated = format!("{:#}", read_all("1 5 0 2 4").unwrap_err());
        assert!(truncated.contains("input ended"), "{truncated}");
    }

    #[test]
    fn diagonal_wire_is_rejected() {
        assert!(read_all("1 5 0 0 2 2 0 0 4 4").is_err());
    }

    #[test]
    fn written_batch_reads_back() {
        let insts = vec![
            Instance::square(
                9,
                vec![Wire::vertical(3, 0, 8), Wire::horizontal(4, 1, 7)],
                Coord::new(0, 0),
                Coord::new(8, 8),
            ),
            Instance::square(4, vec![Wire::horizontal(0, 0, 3)], Coord::new(1, 1), Coord::new(2, 3)),
        ];
        let text = write_instances(&insts);
        assert!(text.ends_with("0 0\n"));
        assert_eq!(read_all(&text).unwrap(), insts);
    }
}
