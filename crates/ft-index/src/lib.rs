//! `ft-index`: point store, ball tree, and radius queries.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`store`]      | `StopRecord`, `IndexedPoint`, `PointStore`               |
//! | [`tree`]       | `BallTree` (median-split construction), `BallNode`       |
//! | [`query`]      | radius queries on `BallTree`, `brute_force_radius`       |
//! | [`stop_index`] | `StopIndex` (store + tree), `Neighbour`                  |
//! | [`error`]      | `IndexError`, `IndexResult<T>`                           |
//!
//! # Example
//!
//! ```
//! use ft_index::{PointStore, StopRecord, BallTree};
//!
//! let store = PointStore::build([
//!     StopRecord::new("A", "Alpha", 0.0, 0.0),
//!     StopRecord::new("B", "Bravo", 0.0, 0.009),
//!     StopRecord::new("C", "Charlie", 0.0, 1.0),
//! ])?;
//! let tree = BallTree::build(store.coordinates(), 40)?;
//!
//! let a = store.get(store.find("A").unwrap()).point;
//! let mut hits = tree.query_radius(a, 1_500.0);
//! hits.sort();
//! assert_eq!(hits.len(), 2); // A itself and B
//! # Ok::<(), ft_index::IndexError>(())
//! ```
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `StopRecord`.           |

pub mod error;
pub mod query;
pub mod stop_index;
pub mod store;
pub mod tree;


pub use error::{IndexError, IndexResult};
pub use query::brute_force_radius;
pub use stop_index::{Neighbour, StopIndex};
pub use store::{IndexedPoint, PointStore, StopRecord};
pub use tree::{BallNode, BallTree};
