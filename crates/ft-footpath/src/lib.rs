//! `ft-footpath`: walking connections between nearby stops.
//!
//! # Fan-out
//!
//! ```text
//! for each stop s:
//!   ① Query   radius query around s with max_walk_m.
//!   ② Filter  drop s itself and anything not strictly closer than
//!             max_walk_m.
//!   ③ Emit    Walk { from: s, to, distance_m, duration_secs }, nearest
//!             first.
//! ```
//!
//! The queries only read the built tree, so step ① runs on Rayon's pool
//! with the `parallel` feature.  Per-stop results are concatenated in stop
//! order either way, so both paths produce identical graphs.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the per-stop queries on Rayon's thread pool.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ft_core::{FootpathConfig, IndexConfig};
//! use ft_index::{PointStore, StopIndex};
//! use ft_footpath::build_walks;
//!
//! let index = StopIndex::build_from(PointStore::build(records)?, IndexConfig::default())?;
//! let graph = build_walks(&index, &FootpathConfig::default())?;
//! for walk in graph.walks_from(stop) { /* … */ }
//! ```

pub mod builder;
pub mod error;
pub mod graph;

#[cfg(test)]
mod tests;

#[cfg(feature = "parallel")]
pub use builder::build_walks_parallel;
pub use builder::{build_walks, build_walks_sequential, walks_from_stop};
pub use error::{FootpathError, FootpathResult};
pub use graph::{FootpathGraph, Walk};
