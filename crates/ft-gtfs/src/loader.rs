//! GTFS stops loader.
//!
//! # CSV format
//!
//! One row per stop, header required.  Extra columns are ignored.
//!
//! ```csv
//! stop_id,stop_code,stop_name,stop_lat,stop_lon,location_type
//! 8814001,,Bruxelles-Midi,50.835707,4.336531,0
//! 8812005,,Bruxelles-Nord,50.860166,4.361787,0
//! ```
//!
//! `stop_lat` / `stop_lon` are read as text and parsed here, so a
//! non-numeric or out-of-range coordinate surfaces as
//! [`IndexError::InvalidRecord`] with its row number within the file rather
//! than as an opaque deserialisation error.
//!
//! # Directories
//!
//! Feeds are often unpacked one per agency under a common root.
//! [`load_stops_dir`] walks the root recursively, loads every `stops.txt` /
//! `stops.csv` in path order, and concatenates the records.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use ft_index::{IndexError, StopRecord};

use crate::{GtfsError, GtfsResult};

/// File names recognised as stop tables.
pub const STOP_FILE_NAMES: [&str; 2] = ["stops.txt", "stops.csv"];

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct StopRow {
    stop_id:   String,
    #[serde(default)]
    stop_name: String,
    stop_lat:  String,
    stop_lon:  String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load stop records from one CSV file.
pub fn load_stops_csv(path: &Path) -> GtfsResult<Vec<StopRecord>> {
    let file = fs::File::open(path).map_err(|e| GtfsError::Io(e).in_file(path))?;
    load_stops_reader(file).map_err(|e| e.in_file(path))
}

/// Like [`load_stops_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or reading from an
/// archive entry.
pub fn load_stops_reader<R: Read>(reader: R) -> GtfsResult<Vec<StopRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (row, result) in csv_reader.deserialize::<StopRow>().enumerate() {
        let r = result?;
        let record = StopRecord {
            stop_lat:  parse_coord(&r.stop_lat, "stop_lat", row)?,
            stop_lon:  parse_coord(&r.stop_lon, "stop_lon", row)?,
            stop_id:   r.stop_id,
            stop_name: r.stop_name,
        };
        // Range-check here so the row number is relative to this file.
        record
            .position()
            .to_spherical()
            .map_err(|e| IndexError::InvalidRecord { row, reason: e.to_string() })?;
        records.push(record);
    }
    Ok(records)
}

/// Every stop file under `root`, sorted by path.
///
/// `root` may itself be a stop file.  Symlinked directories below `root` are
/// not followed, so a link back to an ancestor cannot repeat files.
/// Unreadable subdirectories are skipped with a warning; an unreadable
/// `root` is an error.
pub fn find_stop_files(root: &Path) -> GtfsResult<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    let mut first = true;

    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if first => return Err(GtfsError::Io(e).in_file(&dir)),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
                continue;
            }
        };
        first = false;

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            // `file_type` describes the link itself, not its target.
            let kind = entry.file_type()?;
            if kind.is_dir() {
                pending.push(path);
            } else if kind.is_symlink() && path.is_dir() {
                tracing::debug!(dir = %path.display(), "not following symlinked directory");
            } else if is_stop_file(&path) {
                found.push(path);
            }
        }
    }

    found.sort();
    Ok(found)
}

/// Load and concatenate every stop file under `root`.
///
/// Fails with [`GtfsError::NoStopFiles`] when there is nothing to load.
pub fn load_stops_dir(root: &Path) -> GtfsResult<Vec<StopRecord>> {
    let files = find_stop_files(root)?;
    if files.is_empty() {
        return Err(GtfsError::NoStopFiles(root.to_path_buf()));
    }

    let mut records = Vec::new();
    for path in &files {
        let loaded = load_stops_csv(path)?;
        tracing::debug!(file = %path.display(), stops = loaded.len(), "loaded stop file");
        records.extend(loaded);
    }
    tracing::info!(files = files.len(), stops = records.len(), "stops loaded");
    Ok(records)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn is_stop_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| STOP_FILE_NAMES.contains(&n))
}

fn parse_coord(raw: &str, column: &str, row: usize) -> GtfsResult<f64> {
    raw.parse::<f64>().map_err(|_| {
        IndexError::InvalidRecord {
            row,
            reason: format!("{column} {raw:?} is not a number"),
        }
        .into()
    })
}
