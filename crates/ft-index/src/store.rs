//! The point store: validated stop coordinates in radians.
//!
//! # Data layout
//!
//! Records and their converted coordinates are kept in two parallel `Vec`s
//! indexed by `StopIdx`:
//!
//! ```text
//! records[i]  StopRecord as supplied (degrees, labels)
//! coords[i]   SphericalPoint (radians), converted once at build time
//! ```
//!
//! The ball tree only ever reads `coords`; labels are looked up again when
//! results are reported.

use rustc_hash::FxHashMap;

use ft_core::{GeoPoint, SphericalPoint, StopIdx};

use crate::{IndexError, IndexResult};

// ── Records ───────────────────────────────────────────────────────────────────

/// One stop as supplied by a loader: identifier, name, and degrees.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopRecord {
    pub stop_id:   String,
    pub stop_name: String,
    pub stop_lat:  f64,
    pub stop_lon:  f64,
}

impl StopRecord {
    pub fn new(
        stop_id: impl Into<String>,
        stop_name: impl Into<String>,
        stop_lat: f64,
        stop_lon: f64,
    ) -> Self {
        Self {
            stop_id: stop_id.into(),
            stop_name: stop_name.into(),
            stop_lat,
            stop_lon,
        }
    }

    #[inline]
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.stop_lat, self.stop_lon)
    }
}

/// A stored point together with its position in the store.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IndexedPoint {
    pub id:    StopIdx,
    pub point: SphericalPoint,
}

// ── PointStore ────────────────────────────────────────────────────────────────

/// Immutable, 0-indexed sequence of stops.
///
/// Construct with [`PointStore::build`]; there is no way to add or remove
/// stops afterwards.
#[derive(Debug)]
pub struct PointStore {
    records:    Vec<StopRecord>,
    coords:     Vec<SphericalPoint>,
    by_stop_id: FxHashMap<String, StopIdx>,
}

impl PointStore {
    /// Validate every record and convert its coordinates to radians.
    ///
    /// Fails on the first record whose latitude/longitude is non-finite or
    /// out of range; out-of-range values are never clamped.  Duplicate
    /// `stop_id`s are kept as distinct points (`find` returns the first).
    pub fn build<I>(records: I) -> IndexResult<Self>
    where
        I: IntoIterator<Item = StopRecord>,
    {
        let records: Vec<StopRecord> = records.into_iter().collect();
        if records.len() >= StopIdx::MAX_STOPS {
            return Err(IndexError::TooManyPoints(records.len()));
        }

        let mut coords = Vec::with_capacity(records.len());
        let mut by_stop_id =
            FxHashMap::with_capacity_and_hasher(records.len(), Default::default());

        for (row, rec) in records.iter().enumerate() {
            let point = rec
                .position()
                .to_spherical()
                .map_err(|e| IndexError::InvalidRecord { row, reason: e.to_string() })?;
            coords.push(point);
            by_stop_id
                .entry(rec.stop_id.clone())
                .or_insert(StopIdx::at(row));
        }

        Ok(Self { records, coords, by_stop_id })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    // ── Access ────────────────────────────────────────────────────────────

    /// The point at `idx`.  Panics if `idx` is out of range, like slice
    /// indexing; use [`try_get`](Self::try_get) for a checked lookup.
    #[inline]
    pub fn get(&self, idx: StopIdx) -> IndexedPoint {
        IndexedPoint { id: idx, point: self.coords[idx.index()] }
    }

    pub fn try_get(&self, idx: StopIdx) -> Option<IndexedPoint> {
        self.coords
            .get(idx.index())
            .map(|&point| IndexedPoint { id: idx, point })
    }

    /// All coordinates in store order; the input to the tree builder.
    #[inline]
    pub fn coordinates(&self) -> &[SphericalPoint] {
        &self.coords
    }

    #[inline]
    pub fn record(&self, idx: StopIdx) -> &StopRecord {
        &self.records[idx.index()]
    }

    pub fn records(&self) -> &[StopRecord] {
        &self.records
    }

    /// First stop whose `stop_id` equals `stop_id`.
    pub fn find(&self, stop_id: &str) -> Option<StopIdx> {
        self.by_stop_id.get(stop_id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = IndexedPoint> + '_ {
        self.coords
            .iter()
            .enumerate()
            .map(|(i, &point)| IndexedPoint { id: StopIdx::at(i), point })
    }
}
