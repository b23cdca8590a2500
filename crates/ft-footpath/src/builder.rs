//! Fan-out of radius queries over every stop.

use std::time::Instant;

use ft_core::{FootpathConfig, SphericalPoint, StopIdx};
use ft_index::{BallTree, IndexError, StopIndex};

use crate::{FootpathGraph, FootpathResult, Walk};

/// Walks leaving `from`, nearest first (ties by index).
///
/// Keeps neighbours strictly closer than `config.max_walk_m`; `from` itself
/// is never included.
pub fn walks_from_stop(
    index: &StopIndex,
    from: StopIdx,
    config: &FootpathConfig,
) -> FootpathResult<Vec<Walk>> {
    config.validate()?;
    let tree = index.tree()?;
    let point = index
        .store()
        .try_get(from)
        .ok_or_else(|| IndexError::UnknownStop(from.to_string()))?
        .point;
    Ok(walks_around(tree, from, point, config))
}

/// Build the full walk graph, in parallel when the `parallel` feature is
/// enabled.
pub fn build_walks(index: &StopIndex, config: &FootpathConfig) -> FootpathResult<FootpathGraph> {
    #[cfg(feature = "parallel")]
    {
        build_walks_parallel(index, config)
    }
    #[cfg(not(feature = "parallel"))]
    {
        build_walks_sequential(index, config)
    }
}

/// Build the full walk graph on the calling thread.
pub fn build_walks_sequential(
    index: &StopIndex,
    config: &FootpathConfig,
) -> FootpathResult<FootpathGraph> {
    config.validate()?;
    let tree = index.tree()?;
    let started = Instant::now();

    let mut walks = Vec::new();
    for p in index.store().iter() {
        walks.extend(walks_around(tree, p.id, p.point, config));
    }

    Ok(finish(index, walks, started))
}

/// Build the full walk graph on Rayon's thread pool.
///
/// Each task queries the shared tree and fills its own buffer; buffers are
/// concatenated in stop order.
#[cfg(feature = "parallel")]
pub fn build_walks_parallel(
    index: &StopIndex,
    config: &FootpathConfig,
) -> FootpathResult<FootpathGraph> {
    use rayon::prelude::*;

    config.validate()?;
    let tree = index.tree()?;
    let started = Instant::now();

    let coords = index.store().coordinates();
    let per_stop: Vec<Vec<Walk>> = coords
        .par_iter()
        .enumerate()
        .map(|(i, &point)| walks_around(tree, StopIdx::at(i), point, config))
        .collect();
    let walks = per_stop.into_iter().flatten().collect();

    Ok(finish(index, walks, started))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn walks_around(
    tree: &BallTree,
    from: StopIdx,
    point: SphericalPoint,
    config: &FootpathConfig,
) -> Vec<Walk> {
    let mut hits = tree.query_radius_with_distance(point, config.max_walk_m);
    hits.retain(|&(to, d)| to != from && d < config.max_walk_m);
    hits.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    hits.into_iter()
        .map(|(to, distance_m)| Walk {
            from,
            to,
            distance_m,
            duration_secs: config.walk_secs(distance_m),
        })
        .collect()
}

fn finish(index: &StopIndex, walks: Vec<Walk>, started: Instant) -> FootpathGraph {
    let graph = FootpathGraph::from_sorted(index.store().len(), walks);
    tracing::info!(
        stops = graph.stop_count(),
        walks = graph.walk_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "footpaths built"
    );
    graph
}
