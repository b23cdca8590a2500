//! Ball tree over spherical points.
//!
//! # Data layout
//!
//! Construction permutes a copy of the input points so that every node's
//! points occupy one contiguous slice of `items`:
//!
//! ```text
//! items[ leaf.start .. leaf.end ]   the points of one leaf
//! ```
//!
//! Leaves therefore store a range instead of an index list, and a leaf scan
//! is a linear walk over adjacent `(StopIdx, SphericalPoint)` pairs.
//!
//! # Construction
//!
//! Top-down median split:
//!
//! 1. A subset of at most `leaf_size` points becomes a leaf.
//! 2. Otherwise the axis (latitude or longitude) with the larger variance is
//!    chosen and the subset is split at the median: the left child gets the
//!    lower ⌈n/2⌉ points, median included, the right child the rest.
//!    Equal coordinates are ordered by `StopIdx`, so identical input always
//!    yields an identical tree.
//! 3. Every node (leaf or internal) stores the centroid of its points and
//!    the exact maximum distance from that centroid to any of them.

use std::cmp::Ordering;
use std::ops::Range;

use ft_core::{Haversine, IndexConfig, SphericalPoint, StopIdx};

use crate::store::IndexedPoint;
use crate::{IndexError, IndexResult};

// ── BallNode ──────────────────────────────────────────────────────────────────

/// One node of the tree.  Internal nodes exclusively own their children.
#[derive(Debug)]
pub enum BallNode {
    Leaf {
        center: SphericalPoint,
        radius: f64,
        /// Positions in [`BallTree::items`] held by this leaf.
        range:  Range<usize>,
    },
    Internal {
        center: SphericalPoint,
        radius: f64,
        left:   Box<BallNode>,
        right:  Box<BallNode>,
    },
}

impl BallNode {
    #[inline]
    pub fn center(&self) -> SphericalPoint {
        match self {
            BallNode::Leaf { center, .. } | BallNode::Internal { center, .. } => *center,
        }
    }

    /// Maximum metric distance from [`center`](Self::center) to any point
    /// below this node.
    #[inline]
    pub fn radius(&self) -> f64 {
        match self {
            BallNode::Leaf { radius, .. } | BallNode::Internal { radius, .. } => *radius,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, BallNode::Leaf { .. })
    }
}

// ── BallTree ──────────────────────────────────────────────────────────────────

/// Static ball tree supporting exact radius queries.
///
/// Built once with [`BallTree::build`]; never mutated afterwards, so a
/// shared `&BallTree` can be queried from any number of threads.
#[derive(Debug)]
pub struct BallTree {
    pub(crate) root:   BallNode,
    pub(crate) items:  Vec<IndexedPoint>,
    pub(crate) metric: Haversine,
    leaf_size:         usize,
}

impl BallTree {
    /// Build with the Earth-radius haversine metric.
    pub fn build(points: &[SphericalPoint], leaf_size: usize) -> IndexResult<Self> {
        Self::build_with_metric(points, leaf_size, Haversine::EARTH)
    }

    /// Build using the leaf size and sphere radius from `config`.
    pub fn build_with_config(points: &[SphericalPoint], config: &IndexConfig) -> IndexResult<Self> {
        config.validate()?;
        Self::build_with_metric(points, config.leaf_size, config.metric())
    }

    /// Build with an explicit metric.
    ///
    /// Fails with [`IndexError::EmptyInput`] for zero points and
    /// [`IndexError::InvalidLeafSize`] for `leaf_size == 0`.
    pub fn build_with_metric(
        points: &[SphericalPoint],
        leaf_size: usize,
        metric: Haversine,
    ) -> IndexResult<Self> {
        if points.is_empty() {
            return Err(IndexError::EmptyInput);
        }
        if leaf_size == 0 {
            return Err(IndexError::InvalidLeafSize);
        }
        if points.len() >= StopIdx::MAX_STOPS {
            return Err(IndexError::TooManyPoints(points.len()));
        }

        let mut items: Vec<IndexedPoint> = points
            .iter()
            .enumerate()
            .map(|(i, &point)| IndexedPoint { id: StopIdx::at(i), point })
            .collect();

        let root = build_node(&mut items, 0, leaf_size, metric);

        let tree = Self { root, items, metric, leaf_size };
        tracing::debug!(
            points = tree.len(),
            leaf_size,
            depth = tree.depth(),
            nodes = tree.node_count(),
            "ball tree built"
        );
        Ok(tree)
    }

    // ── Introspection ─────────────────────────────────────────────────────

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`: empty trees cannot be built.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    pub fn metric(&self) -> Haversine {
        self.metric
    }

    pub fn root(&self) -> &BallNode {
        &self.root
    }

    /// Points held by a leaf node; empty for internal nodes.
    pub fn leaf_points(&self, node: &BallNode) -> &[IndexedPoint] {
        match node {
            BallNode::Leaf { range, .. } => &self.items[range.clone()],
            BallNode::Internal { .. } => &[],
        }
    }

    /// Number of levels; a single-leaf tree has depth 1.
    pub fn depth(&self) -> usize {
        fn go(node: &BallNode) -> usize {
            match node {
                BallNode::Leaf { .. } => 1,
                BallNode::Internal { left, right, .. } => 1 + go(left).max(go(right)),
            }
        }
        go(&self.root)
    }

    pub fn node_count(&self) -> usize {
        fn go(node: &BallNode) -> usize {
            match node {
                BallNode::Leaf { .. } => 1,
                BallNode::Internal { left, right, .. } => 1 + go(left) + go(right),
            }
        }
        go(&self.root)
    }

    pub fn leaf_count(&self) -> usize {
        fn go(node: &BallNode) -> usize {
            match node {
                BallNode::Leaf { .. } => 1,
                BallNode::Internal { left, right, .. } => go(left) + go(right),
            }
        }
        go(&self.root)
    }

    /// Walk every node and verify the structural invariants:
    ///
    /// - every leaf holds between 1 and `leaf_size` points;
    /// - every point below a node lies within `node.radius` of `node.center`;
    /// - every stored point appears in exactly one leaf.
    pub fn check_invariants(&self) -> IndexResult<()> {
        let mut seen = vec![false; self.items.len()];
        let covered = self.check_node(&self.root, &mut seen)?;
        if covered.len() != self.items.len() {
            return Err(IndexError::InvariantViolated(format!(
                "tree covers {} of {} points",
                covered.len(),
                self.items.len()
            )));
        }
        if let Some(missing) = seen.iter().position(|&s| !s) {
            return Err(IndexError::InvariantViolated(format!(
                "point {missing} is not held by any leaf"
            )));
        }
        Ok(())
    }

    /// Returns the item range covered by `node` after checking it.
    fn check_node(&self, node: &BallNode, seen: &mut [bool]) -> IndexResult<Range<usize>> {
        let range = match node {
            BallNode::Leaf { range, .. } => {
                if range.is_empty() || range.len() > self.leaf_size {
                    return Err(IndexError::InvariantViolated(format!(
                        "leaf holds {} points, leaf_size is {}",
                        range.len(),
                        self.leaf_size
                    )));
                }
                for item in &self.items[range.clone()] {
                    let slot = &mut seen[item.id.index()];
                    if *slot {
                        return Err(IndexError::InvariantViolated(format!(
                            "{} appears in more than one leaf",
                            item.id
                        )));
                    }
                    *slot = true;
                }
                range.clone()
            }
            BallNode::Internal { left, right, .. } => {
                let l = self.check_node(left, seen)?;
                let r = self.check_node(right, seen)?;
                if l.end != r.start {
                    return Err(IndexError::InvariantViolated(format!(
                        "children ranges {l:?} and {r:?} are not adjacent"
                    )));
                }
                l.start..r.end
            }
        };

        let center = node.center();
        let radius = node.radius();
        for item in &self.items[range.clone()] {
            let d = self.metric.distance(center, item.point);
            if d > radius {
                return Err(IndexError::InvariantViolated(format!(
                    "{} lies {d} m from a node center, radius is {radius} m",
                    item.id
                )));
            }
        }
        Ok(range)
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone)]
enum Axis {
    Lat,
    Lon,
}

impl Axis {
    #[inline]
    fn key(self, p: &IndexedPoint) -> f64 {
        match self {
            Axis::Lat => p.point.lat(),
            Axis::Lon => p.point.lon(),
        }
    }

    /// Total order on one axis; ties fall back to `StopIdx`.
    #[inline]
    fn cmp(self, a: &IndexedPoint, b: &IndexedPoint) -> Ordering {
        self.key(a).total_cmp(&self.key(b)).then(a.id.cmp(&b.id))
    }
}

/// Build the subtree over `items`, which starts at `offset` in the full
/// item array.
fn build_node(
    items: &mut [IndexedPoint],
    offset: usize,
    leaf_size: usize,
    metric: Haversine,
) -> BallNode {
    let center = centroid(items);
    let radius = max_distance(items, center, metric);

    if items.len() <= leaf_size {
        return BallNode::Leaf {
            center,
            radius,
            range: offset..offset + items.len(),
        };
    }

    let axis = widest_axis(items);
    let mid = items.len().div_ceil(2);
    items.select_nth_unstable_by(mid - 1, |a, b| axis.cmp(a, b));

    let (lo, hi) = items.split_at_mut(mid);
    let left = build_node(lo, offset, leaf_size, metric);
    let right = build_node(hi, offset + mid, leaf_size, metric);

    BallNode::Internal {
        center,
        radius,
        left: Box::new(left),
        right: Box::new(right),
    }
}

/// Axis with the larger variance; latitude wins ties.
fn widest_axis(items: &[IndexedPoint]) -> Axis {
    let n = items.len() as f64;
    let (mut sum_lat, mut sum_lon) = (0.0, 0.0);
    for p in items {
        sum_lat += p.point.lat();
        sum_lon += p.point.lon();
    }
    let (mean_lat, mean_lon) = (sum_lat / n, sum_lon / n);

    let (mut var_lat, mut var_lon) = (0.0, 0.0);
    for p in items {
        var_lat += (p.point.lat() - mean_lat).powi(2);
        var_lon += (p.point.lon() - mean_lon).powi(2);
    }

    if var_lon > var_lat { Axis::Lon } else { Axis::Lat }
}

/// Mean direction of the points, projected back onto the sphere.
///
/// Falls back to the first point when the mean vector vanishes (e.g. two
/// antipodal points); any point is a valid center since the radius is
/// measured exactly afterwards.
fn centroid(items: &[IndexedPoint]) -> SphericalPoint {
    let mut acc = [0.0_f64; 3];
    for p in items {
        let v = p.point.to_unit_vector();
        acc[0] += v[0];
        acc[1] += v[1];
        acc[2] += v[2];
    }
    SphericalPoint::from_unit_vector(acc).unwrap_or(items[0].point)
}

fn max_distance(items: &[IndexedPoint], center: SphericalPoint, metric: Haversine) -> f64 {
    items
        .iter()
        .map(|p| metric.distance(center, p.point))
        .fold(0.0, f64::max)
}
