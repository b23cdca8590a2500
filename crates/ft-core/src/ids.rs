//! Stop positions.
//!
//! A [`StopIdx`] is the row a stop occupies in the point store, assigned in
//! load order.  The ball tree, the footpath graph and every query result
//! talk about stops only through it; `stop_id` strings are resolved once at
//! the edges.

use std::fmt;

/// Position of a stop in the point store.
///
/// Identity is the position alone: two stops at identical coordinates keep
/// distinct `StopIdx` values and are never merged.  `u32::MAX` is reserved
/// for [`StopIdx::INVALID`], so a store holds at most [`StopIdx::MAX_STOPS`]
/// stops.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopIdx(pub u32);

impl StopIdx {
    /// Placeholder for "no stop", e.g. in preallocated buffers.
    pub const INVALID: StopIdx = StopIdx(u32::MAX);

    /// Largest number of stops a store can address.
    pub const MAX_STOPS: usize = u32::MAX as usize;

    /// The stop at `position`.
    ///
    /// Callers size-check their collection against [`Self::MAX_STOPS`] once
    /// up front; positions past it are a logic error.
    #[inline]
    pub fn at(position: usize) -> Self {
        debug_assert!(position < Self::MAX_STOPS, "stop position {position} out of range");
        StopIdx(position as u32)
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for StopIdx {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for StopIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "stop #{}", self.0)
        } else {
            f.write_str("stop #<invalid>")
        }
    }
}
