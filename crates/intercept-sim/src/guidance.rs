//! Proportional navigation on the sphere.
//!
//! Provides the interceptor's kinematic state and the single sub-step of the
//! guidance loop: LOS rate from successive bearings, PN turn command clamped
//! to the airframe's turn limit, constant-speed advance along the new heading
//! and a first-order lag toward the target altitude.

use std::time::Duration;

use intercept_core::geodesy::{bearing, destination, distance, normalize_degrees, wrap_degrees};
use intercept_core::{GeoPoint, GuidanceConfig, InterceptorSnapshot};

/// Kinematic and navigation state of the interceptor.
#[derive(Debug, Clone, PartialEq)]
pub struct InterceptorState {
    pub position: GeoPoint,
    /// Degrees, always in [0, 360).
    pub heading: f64,
    /// m/s, fixed for the engine's lifetime.
    pub speed: f64,
    pub active: bool,
    /// LOS bearing seen on the previous sub-step. `None` until guidance has
    /// looked at a target since the last launch.
    pub prev_los_deg: Option<f64>,
    /// Clock reading of the previous update or launch.
    pub last_update: Duration,
}

impl InterceptorState {
    /// Unarmed interceptor sitting at `origin`.
    pub fn parked(origin: GeoPoint, speed: f64, now: Duration) -> Self {
        Self {
            position: origin,
            heading: 0.0,
            speed,
            active: false,
            prev_los_deg: None,
            last_update: now,
        }
    }

    pub fn snapshot(&self, distance_to_target: f64) -> InterceptorSnapshot {
        InterceptorSnapshot {
            lat: self.position.lat,
            lon: self.position.lon,
            alt: self.position.alt,
            heading: self.heading,
            speed: self.speed,
            distance_to_target,
            active: self.active,
        }
    }
}

/// What one sub-step observed and commanded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubstepOutcome {
    /// Range to the target before moving (meters).
    pub range: f64,
    /// LOS bearing before moving (degrees).
    pub los_deg: f64,
    /// Commanded turn rate after clamping (deg/s).
    pub turn_rate: f64,
}

/// Rate of change of the LOS bearing in deg/s.
///
/// The difference is taken in (-180, 180] so crossing north does not read as
/// a full revolution. A zero-length step has no rate.
pub fn los_rate(prev_los_deg: f64, los_deg: f64, step: f64) -> f64 {
    if step > 0.0 {
        wrap_degrees(los_deg - prev_los_deg) / step
    } else {
        0.0
    }
}

/// PN turn command: `N * los_rate`, clamped to `±max_turn_rate`.
pub fn pn_turn_rate(los_rate: f64, navigation_constant: f64, max_turn_rate: f64) -> f64 {
    (navigation_constant * los_rate).clamp(-max_turn_rate, max_turn_rate)
}

/// Advance `state` by one sub-step of `step` seconds toward a fixed `target`.
pub fn integrate_substep(
    state: &mut InterceptorState,
    target: &GeoPoint,
    step: f64,
    config: &GuidanceConfig,
) -> SubstepOutcome {
    let los_deg = bearing(&state.position, target);
    let range = distance(&state.position, target);

    // Without history the first look commands no turn.
    let prev = state.prev_los_deg.unwrap_or(los_deg);
    let turn_rate = pn_turn_rate(
        los_rate(prev, los_deg, step),
        config.navigation_constant,
        config.max_turn_rate_deg_s,
    );
    state.heading = normalize_degrees(state.heading + turn_rate * step);
    state.prev_los_deg = Some(los_deg);

    let alt = state.position.alt;
    let moved = destination(&state.position, state.speed * step, state.heading);
    state.position = moved.with_alt(alt + (target.alt - alt) * config.altitude_gain * step);

    SubstepOutcome {
        range,
        los_deg,
        turn_rate,
    }
}
