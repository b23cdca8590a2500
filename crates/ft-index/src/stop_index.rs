//! A point store paired with its (lazily built) ball tree.
//!
//! `StopIndex` is what applications hold on to: it owns the stops, builds
//! the tree on request, and maps query results back to stop records with
//! their distances.  Querying before [`StopIndex::build`] has succeeded is
//! reported as [`IndexError::IndexNotBuilt`].

use std::time::Instant;

use ft_core::{IndexConfig, SphericalPoint, StopIdx};

use crate::store::{PointStore, StopRecord};
use crate::tree::BallTree;
use crate::{IndexError, IndexResult};

/// One query match as reported to callers.
#[derive(Clone, Debug, PartialEq)]
pub struct Neighbour<'a> {
    pub idx:        StopIdx,
    pub record:     &'a StopRecord,
    pub distance_m: f64,
}

/// Stops plus their ball tree.
#[derive(Debug)]
pub struct StopIndex {
    store:  PointStore,
    config: IndexConfig,
    tree:   Option<BallTree>,
}

impl StopIndex {
    /// Wrap `store`; the tree is not built yet.
    pub fn new(store: PointStore, config: IndexConfig) -> Self {
        Self { store, config, tree: None }
    }

    /// Convenience: wrap and build in one step.
    pub fn build_from(store: PointStore, config: IndexConfig) -> IndexResult<Self> {
        let mut index = Self::new(store, config);
        index.build()?;
        Ok(index)
    }

    /// Build the ball tree over every stop.  Calling again rebuilds.
    pub fn build(&mut self) -> IndexResult<&BallTree> {
        self.config.validate()?;
        let started = Instant::now();
        let tree = BallTree::build_with_config(self.store.coordinates(), &self.config)?;
        tracing::info!(
            stops = self.store.len(),
            depth = tree.depth(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "stop index built"
        );
        Ok(self.tree.insert(tree))
    }

    pub fn is_built(&self) -> bool {
        self.tree.is_some()
    }

    pub fn store(&self) -> &PointStore {
        &self.store
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// The built tree, or [`IndexError::IndexNotBuilt`].
    pub fn tree(&self) -> IndexResult<&BallTree> {
        self.tree.as_ref().ok_or(IndexError::IndexNotBuilt)
    }

    /// Resolve a `stop_id` to its index.
    pub fn resolve(&self, stop_id: &str) -> IndexResult<StopIdx> {
        self.store
            .find(stop_id)
            .ok_or_else(|| IndexError::UnknownStop(stop_id.to_owned()))
    }

    /// Stops within `radius_m` of `point`, nearest first (ties by index).
    pub fn near_point(&self, point: SphericalPoint, radius_m: f64) -> IndexResult<Vec<Neighbour<'_>>> {
        let tree = self.tree()?;
        let mut hits = tree.query_radius_with_distance(point, radius_m);
        hits.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        Ok(hits
            .into_iter()
            .map(|(idx, distance_m)| Neighbour {
                idx,
                record: self.store.record(idx),
                distance_m,
            })
            .collect())
    }

    /// Stops within `radius_m` of stop `idx`, nearest first.
    ///
    /// `idx` itself is left out unless `include_self` is set.
    pub fn near_stop(
        &self,
        idx: StopIdx,
        radius_m: f64,
        include_self: bool,
    ) -> IndexResult<Vec<Neighbour<'_>>> {
        let point = self
            .store
            .try_get(idx)
            .ok_or_else(|| IndexError::UnknownStop(idx.to_string()))?
            .point;
        let mut found = self.near_point(point, radius_m)?;
        if !include_self {
            found.retain(|n| n.idx != idx);
        }
        Ok(found)
    }
}
