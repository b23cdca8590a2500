//! Spherical coordinate types and the haversine metric.
//!
//! Two coordinate types live here:
//!
//! - [`GeoPoint`]: WGS-84 degrees, as supplied by stop files.
//! - [`SphericalPoint`]: radians, validated once and used everywhere the
//!   index does arithmetic.  Converting at load time keeps `to_radians`
//!   out of the query loop.
//!
//! Both are `f64`: walking-distance queries care about metre-level
//! differences, which `f32` lat/lon cannot resolve reliably.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use crate::{CoreError, CoreResult};

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

// ── SphericalPoint ────────────────────────────────────────────────────────────

/// A point on the unit sphere in radians.
///
/// Invariant: `lat ∈ [−π/2, π/2]`, `lon ∈ (−π, π]`.  Fields are private so
/// the invariant cannot be broken after construction.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SphericalPoint {
    lat: f64,
    lon: f64,
}

impl SphericalPoint {
    /// Build a point from radians, rejecting non-finite or out-of-range
    /// values.
    pub fn try_new(lat_rad: f64, lon_rad: f64) -> CoreResult<Self> {
        if !lat_rad.is_finite() || !lon_rad.is_finite() {
            return Err(CoreError::InvalidCoordinate {
                lat:    lat_rad,
                lon:    lon_rad,
                reason: "coordinate is not a finite number",
            });
        }
        if !(-FRAC_PI_2..=FRAC_PI_2).contains(&lat_rad) {
            return Err(CoreError::InvalidCoordinate {
                lat:    lat_rad,
                lon:    lon_rad,
                reason: "latitude outside [-pi/2, pi/2]",
            });
        }
        if lon_rad <= -PI || lon_rad > PI {
            return Err(CoreError::InvalidCoordinate {
                lat:    lat_rad,
                lon:    lon_rad,
                reason: "longitude outside (-pi, pi]",
            });
        }
        Ok(Self { lat: lat_rad, lon: lon_rad })
    }

    /// Build a point from degrees.  Validation happens in degrees so the
    /// documented bounds (`[−90, 90]`, `(−180, 180]`) are exact.
    pub fn try_from_degrees(lat_deg: f64, lon_deg: f64) -> CoreResult<Self> {
        GeoPoint::new(lat_deg, lon_deg).to_spherical()
    }

    #[inline]
    pub fn lat(self) -> f64 {
        self.lat
    }

    #[inline]
    pub fn lon(self) -> f64 {
        self.lon
    }

    /// Convert back to degrees.
    pub fn to_degrees(self) -> GeoPoint {
        GeoPoint::new(self.lat.to_degrees(), self.lon.to_degrees())
    }

    /// Cartesian coordinates on the unit sphere.
    #[inline]
    pub fn to_unit_vector(self) -> [f64; 3] {
        let (sin_lat, cos_lat) = self.lat.sin_cos();
        let (sin_lon, cos_lon) = self.lon.sin_cos();
        [cos_lat * cos_lon, cos_lat * sin_lon, sin_lat]
    }

    /// Project a non-zero 3-vector back onto the sphere.
    ///
    /// Returns `None` when the vector is too short to define a direction
    /// (e.g. the mean of two antipodal points).
    pub fn from_unit_vector(v: [f64; 3]) -> Option<Self> {
        let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        if !norm.is_finite() || norm < 1e-12 {
            return None;
        }
        let lat = (v[2] / norm).clamp(-1.0, 1.0).asin();
        let mut lon = v[1].atan2(v[0]);
        // atan2 may return exactly −π; the half-open range wants +π instead.
        if lon <= -PI {
            lon = PI;
        }
        Some(Self { lat, lon })
    }
}

impl fmt::Display for SphericalPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.8} rad, {:.8} rad)", self.lat, self.lon)
    }
}

// ── GeoPoint ──────────────────────────────────────────────────────────────────

/// A WGS-84 geographic coordinate in degrees.
///
/// Unvalidated: this is the shape stop files arrive in.  Call
/// [`GeoPoint::to_spherical`] to validate and convert.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Validate and convert to radians.
    ///
    /// Rejects non-finite values, latitudes outside `[−90, 90]` and
    /// longitudes outside `(−180, 180]`.  Nothing is clamped except the
    /// last-bit rounding of the degree → radian multiply at the boundaries.
    pub fn to_spherical(self) -> CoreResult<SphericalPoint> {
        let GeoPoint { lat, lon } = self;
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoreError::InvalidCoordinate {
                lat,
                lon,
                reason: "coordinate is not a finite number",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoreError::InvalidCoordinate {
                lat,
                lon,
                reason: "latitude outside [-90, 90]",
            });
        }
        if lon <= -180.0 || lon > 180.0 {
            return Err(CoreError::InvalidCoordinate {
                lat,
                lon,
                reason: "longitude outside (-180, 180]",
            });
        }

        let lat_rad = if lat == 90.0 {
            FRAC_PI_2
        } else if lat == -90.0 {
            -FRAC_PI_2
        } else {
            lat.to_radians().clamp(-FRAC_PI_2, FRAC_PI_2)
        };
        let lon_rad = if lon == 180.0 { PI } else { lon.to_radians().min(PI) };
        SphericalPoint::try_new(lat_rad, lon_rad)
    }

    /// Haversine distance in metres on the mean Earth sphere.
    ///
    /// Both points are validated first, as by [`GeoPoint::to_spherical`].
    pub fn distance_m(self, other: GeoPoint) -> CoreResult<f64> {
        Ok(haversine_m(self.to_spherical()?, other.to_spherical()?))
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── Haversine ─────────────────────────────────────────────────────────────────

/// Great-circle distance on a sphere of radius `radius_m`.
///
/// Symmetric, non-negative, zero for identical points and satisfies the
/// triangle inequality, which the ball tree relies on for pruning.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Haversine {
    pub radius_m: f64,
}

impl Haversine {
    /// The mean Earth sphere.
    pub const EARTH: Haversine = Haversine { radius_m: EARTH_RADIUS_M };

    #[inline]
    pub fn new(radius_m: f64) -> Self {
        Self { radius_m }
    }

    /// Central angle between `a` and `b` in radians.
    #[inline]
    pub fn central_angle(a: SphericalPoint, b: SphericalPoint) -> f64 {
        let half_d_lat = (b.lat - a.lat) * 0.5;
        let half_d_lon = (b.lon - a.lon) * 0.5;

        let h = half_d_lat.sin().powi(2)
            + a.lat.cos() * b.lat.cos() * half_d_lon.sin().powi(2);

        // Rounding can push h a hair outside [0, 1] for coincident or
        // antipodal points; asin would return NaN there.
        2.0 * h.clamp(0.0, 1.0).sqrt().asin()
    }

    /// Distance between `a` and `b` in metres.
    #[inline]
    pub fn distance(&self, a: SphericalPoint, b: SphericalPoint) -> f64 {
        self.radius_m * Self::central_angle(a, b)
    }
}

impl Default for Haversine {
    fn default() -> Self {
        Self::EARTH
    }
}

/// Haversine distance in metres on the mean Earth sphere.
#[inline]
pub fn haversine_m(a: SphericalPoint, b: SphericalPoint) -> f64 {
    Haversine::EARTH.distance(a, b)
}
