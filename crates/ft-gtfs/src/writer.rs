//! CSV output for walking connections.
//!
//! Columns: `from_stop_id,to_stop_id,distance_m,duration_secs`, one row per
//! directed walk, grouped by departure stop.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use ft_footpath::FootpathGraph;
use ft_index::PointStore;

use crate::{GtfsError, GtfsResult};

pub const WALK_HEADER: [&str; 4] = ["from_stop_id", "to_stop_id", "distance_m", "duration_secs"];

/// Writes walks as CSV to any `Write` sink.
pub struct WalkCsvWriter<W: Write> {
    inner:    Writer<W>,
    finished: bool,
}

impl WalkCsvWriter<File> {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: &Path) -> GtfsResult<Self> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> WalkCsvWriter<W> {
    /// Wrap `sink` and write the header row.
    pub fn new(sink: W) -> GtfsResult<Self> {
        let mut inner = Writer::from_writer(sink);
        inner.write_record(WALK_HEADER)?;
        Ok(Self { inner, finished: false })
    }

    /// Write every walk in `graph`, labelling stops with their `stop_id`.
    ///
    /// Returns the number of rows written.
    pub fn write_graph(&mut self, graph: &FootpathGraph, store: &PointStore) -> GtfsResult<usize> {
        for w in graph.walks() {
            let distance = format!("{:.1}", w.distance_m);
            let duration = w.duration_secs.to_string();
            self.inner.write_record([
                store.record(w.from).stop_id.as_str(),
                store.record(w.to).stop_id.as_str(),
                distance.as_str(),
                duration.as_str(),
            ])?;
        }
        Ok(graph.walk_count())
    }

    /// Flush the underlying sink.
    ///
    /// Calling it again is a no-op.
    pub fn finish(&mut self) -> GtfsResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.inner.flush()?;
        Ok(())
    }

    /// Flush and hand back the sink.
    pub fn into_inner(mut self) -> GtfsResult<W> {
        self.finish()?;
        self.inner
            .into_inner()
            .map_err(|e| GtfsError::Io(e.into_error()))
    }
}
