//! Index and footpath configuration.
//!
//! Plain data structs with defaults.  Typically filled from command-line
//! flags by the application crate and passed to the index or footpath
//! builder, which call `validate` before doing any work.

use crate::{CoreError, CoreResult, EARTH_RADIUS_M, Haversine};

/// Default maximum number of points held directly in a leaf.
pub const DEFAULT_LEAF_SIZE: usize = 40;

/// Default maximum walking distance between two stops, metres.
pub const DEFAULT_MAX_WALK_M: f64 = 500.0;

/// Default walking speed, metres per second.
pub const DEFAULT_WALK_SPEED_MPS: f64 = 1.0;

// ── IndexConfig ───────────────────────────────────────────────────────────────

/// Ball-tree construction parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexConfig {
    /// Subsets of at most this many points become leaves.  Must be ≥ 1.
    /// Default: 40.
    pub leaf_size: usize,

    /// Radius of the sphere the haversine metric measures on.
    /// Default: 6 371 000 m.
    pub sphere_radius_m: f64,
}

impl IndexConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if self.leaf_size == 0 {
            return Err(CoreError::Config("leaf_size must be at least 1".into()));
        }
        if !self.sphere_radius_m.is_finite() || self.sphere_radius_m <= 0.0 {
            return Err(CoreError::Config(format!(
                "sphere_radius_m must be a positive finite number, got {}",
                self.sphere_radius_m
            )));
        }
        Ok(())
    }

    /// The metric this configuration measures with.
    #[inline]
    pub fn metric(&self) -> Haversine {
        Haversine::new(self.sphere_radius_m)
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            leaf_size:       DEFAULT_LEAF_SIZE,
            sphere_radius_m: EARTH_RADIUS_M,
        }
    }
}

// ── FootpathConfig ────────────────────────────────────────────────────────────

/// Parameters for turning radius queries into walking connections.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FootpathConfig {
    /// Two stops are connected when strictly closer than this.  Default: 500 m.
    pub max_walk_m: f64,

    /// Walking speed used to turn distance into duration.  Default: 1 m/s.
    pub walk_speed_mps: f64,
}

impl FootpathConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if !self.max_walk_m.is_finite() || self.max_walk_m < 0.0 {
            return Err(CoreError::Config(format!(
                "max_walk_m must be a non-negative finite number, got {}",
                self.max_walk_m
            )));
        }
        if !self.walk_speed_mps.is_finite() || self.walk_speed_mps <= 0.0 {
            return Err(CoreError::Config(format!(
                "walk_speed_mps must be a positive finite number, got {}",
                self.walk_speed_mps
            )));
        }
        Ok(())
    }

    /// Whole seconds needed to walk `distance_m` (truncated).
    #[inline]
    pub fn walk_secs(&self, distance_m: f64) -> u32 {
        (distance_m / self.walk_speed_mps) as u32
    }
}

impl Default for FootpathConfig {
    fn default() -> Self {
        Self {
            max_walk_m:     DEFAULT_MAX_WALK_M,
            walk_speed_mps: DEFAULT_WALK_SPEED_MPS,
        }
    }
}
