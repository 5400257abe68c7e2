//! Spherical-Earth geodesy: distance, initial bearing and destination point.
//!
//! All functions are pure and work on a sphere of radius `EARTH_RADIUS_M`.
//! Angles are in degrees at the API boundary; altitude is ignored except
//! where noted.

use crate::constants::EARTH_RADIUS_M;
use crate::types::GeoPoint;

/// Great-circle distance between two points in meters (haversine).
///
/// Symmetric, and exactly zero for coincident points.
pub fn distance(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    let phi1 = p1.lat.to_radians();
    let phi2 = p2.lat.to_radians();
    let dphi = (p2.lat - p1.lat).to_radians();
    let dlambda = (p2.lon - p1.lon).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    // Rounding can push `a` a hair outside [0, 1].
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Initial great-circle bearing from `p1` to `p2` in degrees, [0, 360).
///
/// Coincident points have no direction; 0 is returned.
pub fn bearing(p1: &GeoPoint, p2: &GeoPoint) -> f64 {
    if p1.lat == p2.lat && p1.lon == p2.lon {
        return 0.0;
    }

    let phi1 = p1.lat.to_radians();
    let phi2 = p2.lat.to_radians();
    let dlambda = (p2.lon - p1.lon).to_radians();

    let y = dlambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Point reached by traveling `distance_m` from `p` along initial bearing `bearing_deg`.
///
/// Longitude is wrapped into [-180, 180). The start altitude is carried over.
pub fn destination(p: &GeoPoint, distance_m: f64, bearing_deg: f64) -> GeoPoint {
    let d = distance_m / EARTH_RADIUS_M;
    let theta = bearing_deg.to_radians();
    let phi1 = p.lat.to_radians();

    let sin_phi2 = (phi1.sin() * d.cos() + phi1.cos() * d.sin() * theta.cos()).clamp(-1.0, 1.0);
    let phi2 = sin_phi2.asin();
    let dlambda = (theta.sin() * d.sin() * phi1.cos()).atan2(d.cos() - phi1.sin() * sin_phi2);

    // Offset in degrees so meridian travel leaves the longitude bit-identical.
    GeoPoint::new(phi2.to_degrees(), wrap_longitude(p.lon + dlambda.to_degrees()), p.alt)
}

/// Normalize an angle into [0, 360).
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid of a tiny negative rounds up to exactly 360.0; `+ 0.0` clears -0.0.
    if a >= 360.0 {
        0.0
    } else {
        a + 0.0
    }
}

/// Wrap an angle difference into (-180, 180].
pub fn wrap_degrees(angle: f64) -> f64 {
    let a = normalize_degrees(angle);
    if a > 180.0 {
        a - 360.0
    } else {
        a
    }
}

/// Wrap a longitude into [-180, 180).
pub fn wrap_longitude(lon: f64) -> f64 {
    if (-180.0..180.0).contains(&lon) {
        lon
    } else {
        normalize_degrees(lon + 180.0) - 180.0
    }
}
