use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;
use wiring::compress::compact;
use wiring::rand::{InstanceSampler, SamplerCfg, WireCount};
use wiring::search::{a_star, manhattan, SearchCfg};
use wiring::{Grid, Instance};

mod input;
mod provenance;
mod render;

use input::{InstanceReader, MAX_SIDE, MAX_WIRES};
use provenance::{GenParams, Provenance};
use render::{render_grid, Style};

#[derive(Parser)]
#[command(name = "wiring-cli")]
#[command(about = "Route a new wire across a grid of existing wires with as few crossings as possible")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Solve a batch of instances in the text protocol; prints one answer per line
    Solve {
        /// Read from this file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,
        /// Draw each compacted grid to stdout (not with --json, which keeps stdout line-delimited)
        #[arg(long, conflicts_with = "json")]
        print_grid: bool,
        /// Highlight one optimal route in the drawn grid
        #[arg(long)]
        show_path: bool,
        /// Disable ANSI colors in the drawn grid
        #[arg(long)]
        plain: bool,
        /// Log per-stage wall-clock durations
        #[arg(long)]
        timing: bool,
        /// Print one JSON object per instance instead of the bare count
        #[arg(long)]
        json: bool,
    },
    /// Write random instances in the text protocol plus a provenance sidecar
    Gen {
        #[arg(long, default_value_t = 10)]
        count: usize,
        #[arg(long, default_value_t = 10)]
        wires: usize,
        #[arg(long, default_value_t = 1000)]
        side: i64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Solve {
            input,
            print_grid,
            show_path,
            plain,
            timing,
            json,
        } => {
            let opts = SolveOpts {
                print_grid,
                show_path,
                color: !plain,
                timing,
                json,
            };
            solve(input.as_deref(), opts)
        }
        Action::Gen {
            count,
            wires,
            side,
            seed,
            out,
        } => generate(count, wires, side, seed, &out),
        Action::Report => report(),
    }
}

#[derive(Clone, Copy, Debug)]
struct SolveOpts {
    print_grid: bool,
    show_path: bool,
    color: bool,
    timing: bool,
    json: bool,
}

/// One line of `solve --json` output.
#[derive(Debug, Serialize)]
struct ResultRow {
    instance: usize,
    /// Minimum crossings, `-1` when unreachable.
    intersections: i64,
    grid_width: u16,
    grid_height: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    route_len: Option<usize>,
}

#[derive(Debug, Default)]
struct StageTimes {
    compact: Duration,
    build: Duration,
    search: Duration,
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
    }
}

fn solve(input: Option<&Path>, opts: SolveOpts) -> Result<()> {
    let text = read_input(input)?;
    let mut reader = InstanceReader::new(&text);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let started = Instant::now();
    while let Some(inst) = reader.next_instance()? {
        let n = reader.count();
        let row = solve_one(n, inst, opts, &mut out).with_context(|| format!("instance {n}"))?;
        if opts.json {
            serde_json::to_writer(&mut out, &row)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}", row.intersections)?;
        }
    }
    out.flush()?;
    tracing::info!(
        instances = reader.count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "solve finished"
    );
    Ok(())
}

fn solve_one<W: Write>(
    n: usize,
    mut inst: Instance,
    opts: SolveOpts,
    out: &mut W,
) -> Result<ResultRow> {
    let mut times = StageTimes::default();

    let t = Instant::now();
    compact(&mut inst);
    times.compact = t.elapsed();

    let t = Instant::now();
    let grid = Grid::from_instance(&inst)?;
    times.build = t.elapsed();

    let want_route = opts.show_path || opts.json;
    let cfg = SearchCfg {
        record_route: want_route,
    };
    let t = Instant::now();
    let outcome = a_star(&grid, manhattan, cfg);
    times.search = t.elapsed();

    if opts.timing {
        tracing::info!(
            instance = n,
            width = grid.width(),
            height = grid.height(),
            compact_us = times.compact.as_micros() as u64,
            build_us = times.build.as_micros() as u64,
            search_us = times.search.as_micros() as u64,
            "timing"
        );
    }

    let route = outcome.as_ref().and_then(|o| o.route.as_deref());
    if opts.print_grid {
        let mask = if opts.show_path {
            route.map(|points| wiring::PathMask::from_points(&grid, points))
        } else {
            None
        };
        let style = Style { color: opts.color };
        write!(out, "{}", render_grid(&grid, mask.as_ref(), style))?;
    }

    Ok(ResultRow {
        instance: n,
        intersections: outcome.as_ref().map_or(-1, |o| i64::from(o.intersections)),
        grid_width: grid.width(),
        grid_height: grid.height(),
        route_len: route.map(|points| points.len().saturating_sub(1)),
    })
}

fn generate(count: usize, wires: usize, side: i64, seed: u64, out: &Path) -> Result<()> {
    if !(1..=MAX_WIRES as usize).contains(&wires) {
        bail!("--wires must be in 1..={MAX_WIRES}, got {wires}");
    }
    if !(2..=MAX_SIDE).contains(&side) {
        bail!("--side must be in 2..={MAX_SIDE}, got {side}");
    }
    let cfg = SamplerCfg {
        wires: WireCount::Fixed(wires),
        side,
        ..SamplerCfg::default()
    };
    let drawn: Vec<_> = InstanceSampler::new(cfg, seed).take(count).collect();
    if drawn.len() < count {
        tracing::warn!(requested = count, drawn = drawn.len(), "sampler gave up early");
    }

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let text = input::write_instances(drawn.iter().map(|(_, inst)| inst));
    std::fs::write(out, text).with_context(|| format!("writing {}", out.display()))?;

    let params = GenParams {
        count,
        wires,
        side,
        seed,
        indices: drawn.iter().map(|(tok, _)| tok.index).collect(),
    };
    let sidecar = provenance::write_sidecar(out, params)?;
    tracing::info!(
        out = %out.display(),
        sidecar = %sidecar.display(),
        instances = drawn.len(),
        "gen"
    );
    Ok(())
}

fn report() -> Result<()> {
    let doc = Provenance::new(serde_json::json!({}), Vec::new());
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn opts() -> SolveOpts {
        SolveOpts {
            print_grid: false,
            show_path: false,
            color: false,
            timing: false,
            json: false,
        }
    }

    fn answers(text: &str, opts: SolveOpts) -> Vec<ResultRow> {
        let mut reader = InstanceReader::new(text);
        let mut sink = Vec::new();
        let mut rows = Vec::new();
        while let Some(inst) = reader.next_instance().unwrap() {
            rows.push(solve_one(reader.count(), inst, opts, &mut sink).unwrap());
        }
        rows
    }

    #[test]
    fn batch_reports_minus_one_for_unreachable() {
        // second instance: goal on a four-way junction
        let text = "1 5 0 2 4 2 0 0 4 4\n\
                    4 5 0 2 2 2 2 2 4 2 2 0 2 2 2 2 2 4 0 0 2 2\n\
                    0 0\n";
        let rows = answers(text, opts());
        let counts: Vec<i64> = rows.iter().map(|r| r.intersections).collect();
        assert_eq!(counts, vec![1, -1]);
    }

    #[test]
    fn json_rows_carry_route_length() {
        let rows = answers("1 5 0 2 4 2 0 0 0 4 0 0", SolveOpts { json: true, ..opts() });
        let v = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(v["intersections"], 1);
        assert_eq!(v["route_len"], 4);
        assert_eq!(v["instance"], 1);
    }

    #[test]
    fn print_grid_writes_one_row_per_grid_line() {
        let mut sink = Vec::new();
        let inst = InstanceReader::new("1 5 0 2 4 2 0 0 4 4")
            .next_instance()
            .unwrap()
            .unwrap();
        let row = solve_one(
            1,
            inst,
            SolveOpts {
                print_grid: true,
                show_path: true,
                ..opts()
            },
            &mut sink,
        )
        .unwrap();
        let text = String::from_utf8(sink).unwrap();
        assert_eq!(text.lines().count(), usize::from(row.grid_height));
        assert!(text.contains('*'));
    }

    #[test]
    fn gen_output_solves_and_has_sidecar() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("batch.txt");
        generate(3, 4, 50, 11, &out).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(answers(&text, opts()).len(), 3);
        assert!(dir.path().join("batch.provenance.json").exists());
    }

    #[test]
    fn print_grid_conflicts_with_json() {
        assert!(Cmd::try_parse_from(["wiring-cli", "solve", "--print-grid", "--json"]).is_err());
        assert!(Cmd::try_parse_from(["wiring-cli", "solve", "--print-grid", "--show-path"]).is_ok());
        assert!(Cmd::try_parse_from(["wiring-cli", "solve", "--json"]).is_ok());
    }

    #[test]
    fn gen_rejects_bad_parameters() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("x.txt");
        assert!(generate(1, 0, 50, 0, &out).is_err());
        assert!(generate(1, 100, 50, 0, &out).is_err());
        assert!(generate(1, 4, 1, 0, &out).is_err());
    }
}
