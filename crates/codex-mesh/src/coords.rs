//! Coordinate conversion utilities.
//!
//! Provides conversions between unit-sphere Cartesian vectors and geographic
//! coordinates (latitude, longitude), plus great-circle helpers.

use glam::DVec3;

use crate::error::{MeshError, Result};

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Angular separation below which two unit vectors are treated as coincident.
const COINCIDENT_EPS: f64 = 1e-10;

/// Angular distance from `π` below which two unit vectors count as antipodal.
const ANTIPODAL_EPS: f64 = 1e-6;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees, within `[-90, 90]`.
    pub lat: f64,
    /// Longitude in degrees, within `[-180, 180]`.
    pub lon: f64,
}

impl GeoPoint {
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Project a unit vector to latitude and longitude.
    ///
    /// `z` is clamped before `asin` so float overshoot at the poles cannot
    /// produce NaN.
    #[must_use]
    pub fn from_unit(v: DVec3) -> Self {
        let lat = v.z.clamp(-1.0, 1.0).asin().to_degrees();
        let lon = v.y.atan2(v.x).to_degrees();
        Self { lat, lon }
    }

    /// Inverse of [`GeoPoint::from_unit`].
    #[must_use]
    pub fn to_unit(self) -> DVec3 {
        let lat = self.lat.to_radians();
        let lon = self.lon.to_radians();
        DVec3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
    }

    /// GeoJSON position order: `[lon, lat]`.
    #[must_use]
    pub fn lon_lat(self) -> [f64; 2] {
        [self.lon, self.lat]
    }

    /// Haversine distance to `other` on a sphere of the given radius.
    #[must_use]
    pub fn distance_km(self, other: Self, radius_km: f64) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = lat2 - lat1;
        let dlon = (other.lon - self.lon).to_radians();

        let a = (dlat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon * 0.5).sin().powi(2);
        2.0 * radius_km * a.clamp(0.0, 1.0).sqrt().asin()
    }

    /// Forward azimuth from `self` towards `other`, in degrees within `[0, 360)`.
    #[must_use]
    pub fn initial_bearing_deg(self, other: Self) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlon = (other.lon - self.lon).to_radians();

        let x = dlon.sin() * lat2.cos();
        let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
        x.atan2(y).to_degrees().rem_euclid(360.0)
    }
}

/// Great-circle distance between two unit vectors, via the haversine formula.
#[must_use]
pub fn great_circle_km(a: DVec3, b: DVec3, radius_km: f64) -> f64 {
    GeoPoint::from_unit(a).distance_km(GeoPoint::from_unit(b), radius_km)
}

/// Spherical linear interpolation between two unit vectors.
///
/// Rotates `a` towards `b` by `t` times the angle between them, inside the
/// plane spanned by `a` and the tangent at `a` pointing at `b`.
#[must_use]
pub fn slerp(a: DVec3, b: DVec3, t: f64) -> DVec3 {
    let cos_theta = a.dot(b).clamp(-1.0, 1.0);
    let theta = cos_theta.acos();

    // Coincident inputs have no interpolation direction.
    if theta < COINCIDENT_EPS {
        return a;
    }

    // Antipodal inputs span no plane; any tangent at `a` is a valid great circle.
    let tangent = (b - a * cos_theta)
        .try_normalize()
        .filter(|_| theta < std::f64::consts::PI - ANTIPODAL_EPS)
        .unwrap_or_else(|| a.any_orthonormal_vector());

    let (sin, cos) = (t * theta).sin_cos();
    (a * cos + tangent * sin).normalize()
}

/// Sample `n` points along the great-circle arc from `a` to `b`, endpoints included.
///
/// # Errors
///
/// Returns [`MeshError::InvalidArgument`] if `n < 2`.
pub fn densify_arc(a: DVec3, b: DVec3, n: usize) -> Result<Vec<GeoPoint>> {
    if n < 2 {
        return Err(MeshError::invalid(
            "densify",
            format!("need at least 2 points per edge, got {n}"),
        ));
    }

    #[allow(clippy::cast_precision_loss)]
    let last = (n - 1) as f64;
    Ok((0..n)
        .map(|k| {
            #[allow(clippy::cast_precision_loss)]
            let t = k as f64 / last;
            GeoPoint::from_unit(slerp(a, b, t))
        })
        .collect())
}
