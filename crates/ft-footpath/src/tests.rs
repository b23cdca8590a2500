//! Integration tests for ft-footpath.

use ft_core::{FootpathConfig, IndexConfig, StopIdx};
use ft_index::{PointStore, StopIndex, StopRecord};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Four stops along the equator:
///   0 (0, 0), 1 (0, 0.002) ≈ 222 m, 2 (0, 0.004) ≈ 445 m, 3 (0, 0.1) ≈ 11 km
fn line_index() -> StopIndex {
    let store = PointStore::build([
        StopRecord::new("s0", "Zero", 0.0, 0.0),
        StopRecord::new("s1", "One", 0.0, 0.002),
        StopRecord::new("s2", "Two", 0.0, 0.004),
        StopRecord::new("s3", "Far", 0.0, 0.1),
    ])
    .unwrap();
    StopIndex::build_from(store, IndexConfig { leaf_size: 1, ..IndexConfig::default() }).unwrap()
}

/// A 20×20 grid with ~111 m spacing.
fn grid_index(leaf_size: usize) -> StopIndex {
    let mut recs = Vec::new();
    for i in 0..20 {
        for j in 0..20 {
            let id = format!("g{i}_{j}");
            recs.push(StopRecord::new(id.clone(), id, 45.0 + i as f64 * 0.001, 7.0 + j as f64 * 0.001));
        }
    }
    let store = PointStore::build(recs).unwrap();
    StopIndex::build_from(store, IndexConfig { leaf_size, ..IndexConfig::default() }).unwrap()
}

fn cfg(max_walk_m: f64) -> FootpathConfig {
    FootpathConfig { max_walk_m, walk_speed_mps: 1.0 }
}

// ── Single stop ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod single_stop {
    use super::*;
    use crate::{FootpathError, walks_from_stop};
    use ft_index::IndexError;

    #[test]
    fn nearest_first_without_self() {
        let index = line_index();
        let walks = walks_from_stop(&index, StopIdx(0), &cfg(500.0)).unwrap();
        let to: Vec<StopIdx> = walks.iter().map(|w| w.to).collect();
        assert_eq!(to, [StopIdx(1), StopIdx(2)]);
        assert!(walks.iter().all(|w| w.from == StopIdx(0)));
    }

    #[test]
    fn durations_follow_speed() {
        let index = line_index();
        let slow = FootpathConfig { max_walk_m: 500.0, walk_speed_mps: 0.5 };
        let walks = walks_from_stop(&index, StopIdx(0), &slow).unwrap();
        // ≈ 222.4 m at 0.5 m/s → 444 s
        assert_eq!(walks[0].duration_secs, 444);
        assert_eq!(walks[0].duration_secs, (walks[0].distance_m / 0.5) as u32);
    }

    #[test]
    fn boundary_is_exclusive() {
        let index = line_index();
        let exact = walks_from_stop(&index, StopIdx(0), &cfg(500.0)).unwrap()[0].distance_m;
        let walks = walks_from_stop(&index, StopIdx(0), &cfg(exact)).unwrap();
        assert!(walks.is_empty());
    }

    #[test]
    fn not_built_is_reported() {
        let store = PointStore::build([StopRecord::new("a", "A", 1.0, 1.0)]).unwrap();
        let index = StopIndex::new(store, IndexConfig::default());
        let err = walks_from_stop(&index, StopIdx(0), &cfg(500.0)).unwrap_err();
        assert!(matches!(err, FootpathError::Index(IndexError::IndexNotBuilt)));
    }

    #[test]
    fn unknown_stop_is_reported() {
        let index = line_index();
        let err = walks_from_stop(&index, StopIdx(42), &cfg(500.0)).unwrap_err();
        assert!(matches!(err, FootpathError::Index(IndexError::UnknownStop(_))));
    }

    #[test]
    fn invalid_config_is_reported() {
        let index = line_index();
        let bad = FootpathConfig { max_walk_m: f64::NAN, walk_speed_mps: 1.0 };
        assert!(matches!(
            walks_from_stop(&index, StopIdx(0), &bad),
            Err(FootpathError::Config(_))
        ));
    }
}

// ── Whole graph ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod graph {
    use super::*;
    use crate::{FootpathError, build_walks, build_walks_sequential};
    use ft_index::IndexError;

    #[test]
    fn line_graph_shape() {
        let graph = build_walks(&line_index(), &cfg(500.0)).unwrap();
        assert_eq!(graph.stop_count(), 4);
        // 0↔1, 1↔2, 0↔2 (445 m < 500 m)
        assert_eq!(graph.walk_count(), 6);
        assert_eq!(graph.walks_from(StopIdx(1)).len(), 2);
        assert!(graph.walks_from(StopIdx(3)).is_empty());
        assert!(graph.walks_from(StopIdx(99)).is_empty());
    }

    #[test]
    fn walks_are_symmetric_and_self_free() {
        let graph = build_walks(&grid_index(8), &cfg(250.0)).unwrap();
        assert!(!graph.is_empty());
        for w in graph.walks() {
            assert_ne!(w.from, w.to);
            assert!(w.distance_m < 250.0);
            let back = graph
                .walks_from(w.to)
                .iter()
                .find(|r| r.to == w.from)
                .expect("reverse walk");
            assert_eq!(back.distance_m, w.distance_m);
        }
    }

    #[test]
    fn leaf_size_does_not_change_result() {
        let a = build_walks_sequential(&grid_index(1), &cfg(300.0)).unwrap();
        let b = build_walks_sequential(&grid_index(64), &cfg(300.0)).unwrap();
        assert_eq!(a.walks(), b.walks());
    }

    #[test]
    fn matches_pairwise_scan() {
        let index = grid_index(10);
        let graph = build_walks(&index, &cfg(180.0)).unwrap();
        let store = index.store();
        let metric = index.config().metric();
        let mut expected = 0;
        for a in store.iter() {
            for b in store.iter() {
                if a.id != b.id && metric.distance(a.point, b.point) < 180.0 {
                    expected += 1;
                }
            }
        }
        assert_eq!(graph.walk_count(), expected);
    }

    #[test]
    fn zero_distance_yields_no_walks() {
        let graph = build_walks(&line_index(), &cfg(0.0)).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.stop_count(), 4);
    }

    #[test]
    fn not_built_is_reported() {
        let store = PointStore::build([StopRecord::new("a", "A", 1.0, 1.0)]).unwrap();
        let index = StopIndex::new(store, IndexConfig::default());
        assert!(matches!(
            build_walks(&index, &cfg(500.0)),
            Err(FootpathError::Index(IndexError::IndexNotBuilt))
        ));
    }
}

#[cfg(all(test, feature = "parallel"))]
mod parallel {
    use super::*;
    use crate::{build_walks_parallel, build_walks_sequential};

    #[test]
    fn parallel_equals_sequential() {
        let index = grid_index(8);
        let seq = build_walks_sequential(&index, &cfg(400.0)).unwrap();
        let par = build_walks_parallel(&index, &cfg(400.0)).unwrap();
        assert_eq!(seq.walks(), par.walks());
        for s in 0..seq.stop_count() {
            let s = StopIdx(s as u32);
            assert_eq!(seq.walks_from(s), par.walks_from(s));
        }
    }
}
