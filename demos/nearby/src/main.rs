//! nearby: command-line front end for the stop proximity index.
//!
//! Loads every stop file under a path, builds the ball tree once, then
//! answers one command:
//!
//! ```text
//! nearby data/ query --stop 8814001 --radius 500
//! nearby data/ point --lat 50.85 --lon 4.35 --radius 300
//! nearby data/ walks --max-walk 500 --speed 1.0 --out walks.csv
//! nearby data/ stats
//! ```
//!
//! Set `RUST_LOG=debug` for per-file and tree-shape logging.

mod cli;

use std::io::{self, Write};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ft_core::SphericalPoint;
use ft_footpath::build_walks;
use ft_gtfs::{WalkCsvWriter, load_stops_dir};
use ft_index::{Neighbour, PointStore, StopIndex};

use cli::{Cli, Command};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.index_config();
    config.validate()?;

    // 1. Load stops.
    let t0 = Instant::now();
    let records = load_stops_dir(&cli.data)
        .with_context(|| format!("loading stops from {}", cli.data.display()))?;
    let store = PointStore::build(records)?;
    tracing::info!(
        stops = store.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "point store ready"
    );

    // 2. Build the index.  An empty store aborts here, before any query.
    let index = StopIndex::build_from(store, config).context("building stop index")?;

    // 3. Run the command.
    match &cli.command {
        Command::Query { stop, radius, include_self } => {
            check_radius(*radius)?;
            let idx = index.resolve(stop)?;
            let found = index.near_stop(idx, *radius, *include_self)?;
            print_neighbours(&found)?;
        }
        Command::Point { lat, lon, radius } => {
            check_radius(*radius)?;
            let point = SphericalPoint::try_from_degrees(*lat, *lon)?;
            let found = index.near_point(point, *radius)?;
            print_neighbours(&found)?;
        }
        Command::Walks { out, .. } => {
            let graph = build_walks(&index, &cli.command.footpath_config())?;
            let rows = match out {
                Some(path) => {
                    let mut w = WalkCsvWriter::create(path)
                        .with_context(|| format!("creating {}", path.display()))?;
                    let n = w.write_graph(&graph, index.store())?;
                    w.finish()?;
                    n
                }
                None => {
                    let mut w = WalkCsvWriter::new(io::stdout().lock())?;
                    let n = w.write_graph(&graph, index.store())?;
                    w.finish()?;
                    n
                }
            };
            tracing::info!(rows, "walks written");
        }
        Command::Stats => {
            let tree = index.tree()?;
            let mut out = io::stdout().lock();
            writeln!(out, "stops       {}", index.store().len())?;
            writeln!(out, "leaf_size   {}", tree.leaf_size())?;
            writeln!(out, "depth       {}", tree.depth())?;
            writeln!(out, "nodes       {}", tree.node_count())?;
            writeln!(out, "leaves      {}", tree.leaf_count())?;
            writeln!(out, "root_radius {:.1} m", tree.root().radius())?;
        }
    }

    Ok(())
}

fn check_radius(radius: f64) -> Result<()> {
    if !radius.is_finite() || radius < 0.0 {
        bail!("radius must be a non-negative number of metres, got {radius}");
    }
    Ok(())
}

fn print_neighbours(found: &[Neighbour<'_>]) -> Result<()> {
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{:<16} {:<32} {:>11} {:>11} {:>10}",
        "stop_id", "stop_name", "lat", "lon", "distance_m"
    )?;
    writeln!(out, "{}", "-".repeat(84))?;
    for n in found {
        writeln!(
            out,
            "{:<16} {:<32} {:>11.6} {:>11.6} {:>10.1}",
            n.record.stop_id, n.record.stop_name, n.record.stop_lat, n.record.stop_lon, n.distance_m
        )?;
    }
    writeln!(out, "{} stop(s)", found.len())?;
    Ok(())
}
