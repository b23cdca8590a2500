//! `ft-gtfs`: reading stops and writing walks.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`loader`] | `load_stops_csv`, `load_stops_reader`, `find_stop_files`,   |
//! |            | `load_stops_dir`                                            |
//! | [`writer`] | `WalkCsvWriter`                                             |
//! | [`error`]  | `GtfsError`, `GtfsResult<T>`                                |
//!
//! Only the four stop columns are read (`stop_id`, `stop_name`,
//! `stop_lat`, `stop_lon`); any other GTFS columns are ignored.

pub mod error;
pub mod loader;
pub mod writer;


pub use error::{GtfsError, GtfsResult};
pub use loader::{find_stop_files, load_stops_csv, load_stops_dir, load_stops_reader};
pub use writer::WalkCsvWriter;
