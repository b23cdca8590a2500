//! Walking connections in Compressed Sparse Row form.
//!
//! Walks are stored sorted by departure stop.  Given a `StopIdx s`, its
//! outgoing walks occupy the slice:
//!
//! ```text
//! walks[ out_start[s] .. out_start[s+1] ]
//! ```

use ft_core::StopIdx;

/// A directed walking connection between two distinct stops.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Walk {
    pub from:          StopIdx,
    pub to:            StopIdx,
    pub distance_m:    f64,
    /// Whole seconds at the configured walking speed (truncated).
    pub duration_secs: u32,
}

/// All walks of a stop set, grouped by departure stop.
#[derive(Debug, Default)]
pub struct FootpathGraph {
    /// CSR row pointer.  Length = `stop_count + 1`.
    out_start: Vec<u32>,
    walks:     Vec<Walk>,
}

impl FootpathGraph {
    /// Build from walks already grouped by ascending `from`.
    pub(crate) fn from_sorted(stop_count: usize, walks: Vec<Walk>) -> Self {
        debug_assert!(walks.windows(2).all(|w| w[0].from <= w[1].from));

        let mut out_start = vec![0u32; stop_count + 1];
        for w in &walks {
            out_start[w.from.index() + 1] += 1;
        }
        for i in 1..=stop_count {
            out_start[i] += out_start[i - 1];
        }
        debug_assert_eq!(out_start[stop_count] as usize, walks.len());

        Self { out_start, walks }
    }

    pub fn stop_count(&self) -> usize {
        self.out_start.len().saturating_sub(1)
    }

    pub fn walk_count(&self) -> usize {
        self.walks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walks.is_empty()
    }

    /// Outgoing walks of `stop`, nearest first.  Empty for unknown stops.
    pub fn walks_from(&self, stop: StopIdx) -> &[Walk] {
        let i = stop.index();
        if i + 1 >= self.out_start.len() {
            return &[];
        }
        let start = self.out_start[i] as usize;
        let end = self.out_start[i + 1] as usize;
        &self.walks[start..end]
    }

    /// Every walk, grouped by departure stop.
    pub fn walks(&self) -> &[Walk] {
        &self.walks
    }
}
