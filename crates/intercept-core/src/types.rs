//! Fundamental geographic and guidance types.

use serde::{Deserialize, Serialize};

use crate::constants::METERS_PER_FOOT;

/// A point on the spherical Earth.
/// `lat`/`lon` in degrees, `alt` in meters above the reference sphere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64, alt: f64) -> Self {
        Self { lat, lon, alt }
    }

    /// Same horizontal position with a different altitude.
    pub fn with_alt(self, alt: f64) -> Self {
        Self { alt, ..self }
    }
}

/// Latest known target position, supplied once per guidance update.
///
/// Not retained by the engine beyond the call it is passed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetState {
    pub lat: f64,
    pub lon: f64,
    /// Altitude in meters.
    pub alt: f64,
}

impl TargetState {
    pub fn new(lat: f64, lon: f64, alt: f64) -> Self {
        Self { lat, lon, alt }
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon, self.alt)
    }
}

impl From<GeoPoint> for TargetState {
    fn from(p: GeoPoint) -> Self {
        Self::new(p.lat, p.lon, p.alt)
    }
}

/// One recorded observation from the flight tracker.
///
/// Trackers report altitude either in meters or in feet; `target()`
/// normalizes to meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackFix {
    /// Seconds since the start of the recorded track.
    pub t: f64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_meters: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_feet: Option<f64>,
}

impl TrackFix {
    /// Altitude in meters. Meters win over feet; missing altitude is sea level.
    pub fn altitude_m(&self) -> f64 {
        match (self.altitude_meters, self.altitude_feet) {
            (Some(m), _) => m,
            (None, Some(ft)) => ft * METERS_PER_FOOT,
            (None, None) => 0.0,
        }
    }

    /// Convert to a guidance target in degrees/meters.
    pub fn target(&self) -> TargetState {
        TargetState::new(self.latitude, self.longitude, self.altitude_m())
    }
}

/// Interceptor state handed to the transport layer after each update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InterceptorSnapshot {
    /// Latitude (degrees).
    pub lat: f64,
    /// Longitude (degrees).
    pub lon: f64,
    /// Altitude (meters).
    pub alt: f64,
    /// Heading (degrees, [0, 360), 0 = North, clockwise).
    pub heading: f64,
    /// Speed (m/s).
    pub speed: f64,
    /// Great-circle distance to the target (meters).
    pub distance_to_target: f64,
    pub active: bool,
}

impl InterceptorSnapshot {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon, self.alt)
    }
}
