//! Radius queries over a [`BallTree`].
//!
//! Depth-first traversal with an explicit stack.  A node is skipped when
//!
//! ```text
//! distance(query, node.center) − node.radius > radius
//! ```
//!
//! because by the triangle inequality every point `p` below the node has
//! `distance(query, p) ≥ distance(query, center) − node.radius`.  Leaves are
//! scanned exactly, so the result is the same set a linear scan would give.
//!
//! Results come back in traversal order.  The query point's own id is
//! included when it is stored; filtering it out is up to the caller.

use ft_core::{Haversine, SphericalPoint, StopIdx};

use crate::tree::{BallNode, BallTree};

/// Slack added to the pruning bound.  Only ever makes pruning more
/// conservative: it absorbs last-bit rounding in the triangle bound and
/// cannot change which points pass the exact leaf test.
const PRUNE_SLACK_M: f64 = 1e-6;

impl BallTree {
    /// Ids of all points within `radius_m` metres of `query` (inclusive).
    ///
    /// A negative or NaN radius yields an empty result.
    pub fn query_radius(&self, query: SphericalPoint, radius_m: f64) -> Vec<StopIdx> {
        let mut out = Vec::new();
        self.query_radius_into(query, radius_m, &mut out);
        out
    }

    /// Like [`query_radius`](Self::query_radius) but appends into a
    /// caller-owned buffer, so repeated queries can reuse one allocation.
    pub fn query_radius_into(&self, query: SphericalPoint, radius_m: f64, out: &mut Vec<StopIdx>) {
        self.visit_within(query, radius_m, |id, _| out.push(id));
    }

    /// Matches paired with their distance from `query` in metres.
    pub fn query_radius_with_distance(
        &self,
        query: SphericalPoint,
        radius_m: f64,
    ) -> Vec<(StopIdx, f64)> {
        let mut out = Vec::new();
        self.visit_within(query, radius_m, |id, d| out.push((id, d)));
        out
    }

    /// Number of points within `radius_m` of `query`.
    pub fn count_within(&self, query: SphericalPoint, radius_m: f64) -> usize {
        let mut n = 0;
        self.visit_within(query, radius_m, |_, _| n += 1);
        n
    }

    /// Core traversal: calls `f(id, distance)` for every match.
    fn visit_within<F>(&self, query: SphericalPoint, radius_m: f64, mut f: F)
    where
        F: FnMut(StopIdx, f64),
    {
        // Also rejects NaN.
        if !(radius_m >= 0.0) {
            return;
        }

        let mut stack: Vec<&BallNode> = Vec::with_capacity(64);
        stack.push(&self.root);

        while let Some(node) = stack.pop() {
            let d = self.metric.distance(query, node.center());
            if d - node.radius() > radius_m + PRUNE_SLACK_M {
                continue;
            }
            match node {
                BallNode::Leaf { range, .. } => {
                    for item in &self.items[range.clone()] {
                        let d = self.metric.distance(query, item.point);
                        if d <= radius_m {
                            f(item.id, d);
                        }
                    }
                }
                BallNode::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
    }
}

/// Linear-scan reference: ids of all `points` within `radius_m` of `query`,
/// in input order.
///
/// O(N) per query.  Used as ground truth in tests and handy for tiny inputs
/// where building a tree is not worth it.
pub fn brute_force_radius(
    points: &[SphericalPoint],
    query: SphericalPoint,
    radius_m: f64,
    metric: Haversine,
) -> Vec<StopIdx> {
    points
        .iter()
        .enumerate()
        .filter(|&(_, &p)| metric.distance(query, p) <= radius_m)
        .map(|(i, _)| StopIdx::at(i))
        .collect()
}
