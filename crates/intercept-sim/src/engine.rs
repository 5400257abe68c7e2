//! Guidance engine — the stateful interceptor controller.
//!
//! `GuidanceEngine` owns the interceptor state, arms it on `launch`, and on
//! each `update` advances simulated time to the clock's current reading while
//! steering toward the supplied target. Completely headless; under a
//! `ManualClock` every run is reproducible.

use serde::Serialize;
use tracing::{debug, info, warn};

use intercept_core::geodesy::{bearing, distance};
use intercept_core::{GeoPoint, GuidanceConfig, InterceptorSnapshot, TargetState};

use crate::clock::{Clock, SystemClock};
use crate::guidance::{self, InterceptorState};

/// Lifecycle of an engine. There is no way back to `Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum GuidancePhase {
    #[default]
    Idle,
    Armed,
}

/// Which path the most recent `update` took.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum UpdateKind {
    /// No update has run yet, or the engine was not armed.
    #[default]
    Inactive,
    /// Heading snapped straight onto the LOS without integrating.
    /// `stale` is set when caused by a long gap rather than missing history.
    Acquired { stale: bool },
    /// Motion was integrated in `substeps` sub-steps.
    Integrated {
        substeps: u32,
        /// The hit threshold ended integration early.
        hit: bool,
        /// `max_substeps` ended integration early.
        capped: bool,
    },
}

/// Confirmation returned by `launch`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LaunchReport {
    pub origin: GeoPoint,
    /// Clock reading at launch (seconds).
    pub launched_at_secs: f64,
}

/// The guidance engine. Owns the interceptor state and its time source.
pub struct GuidanceEngine<C: Clock = SystemClock> {
    config: GuidanceConfig,
    clock: C,
    state: InterceptorState,
    last_update_kind: UpdateKind,
}

impl GuidanceEngine<SystemClock> {
    /// Engine driven by wall-clock time.
    pub fn new(config: GuidanceConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> GuidanceEngine<C> {
    /// Engine driven by an arbitrary clock.
    pub fn with_clock(config: GuidanceConfig, clock: C) -> Self {
        let state = InterceptorState::parked(config.origin, config.speed_mps, clock.now());
        Self {
            config,
            clock,
            state,
            last_update_kind: UpdateKind::default(),
        }
    }

    /// Arm the interceptor and put it back on the launch pad.
    ///
    /// Safe to call repeatedly; each call is a full reset.
    pub fn launch(&mut self) -> LaunchReport {
        let now = self.clock.now();
        self.state = InterceptorState {
            active: true,
            ..InterceptorState::parked(self.config.origin, self.config.speed_mps, now)
        };
        self.last_update_kind = UpdateKind::Inactive;

        let origin = self.config.origin;
        info!(lat = origin.lat, lon = origin.lon, "interceptor launched");
        LaunchReport {
            origin,
            launched_at_secs: now.as_secs_f64(),
        }
    }

    /// Advance to the clock's current time and steer toward `target`.
    ///
    /// Returns `None` while the engine has not been launched.
    pub fn update(&mut self, target: &TargetState) -> Option<InterceptorSnapshot> {
        if !self.state.active {
            self.last_update_kind = UpdateKind::Inactive;
            return None;
        }

        let now = self.clock.now();
        let dt = match now.checked_sub(self.state.last_update) {
            Some(elapsed) => elapsed.as_secs_f64(),
            None => {
                warn!(
                    now_secs = now.as_secs_f64(),
                    last_secs = self.state.last_update.as_secs_f64(),
                    "clock moved backwards, integrating nothing"
                );
                0.0
            }
        };
        self.state.last_update = now;

        let target_pos = target.position();
        let range = distance(&self.state.position, &target_pos);

        let stale = dt > self.config.stale_gap_secs;
        if self.state.prev_los_deg.is_none() || stale {
            let los = bearing(&self.state.position, &target_pos);
            self.state.heading = los;
            self.state.prev_los_deg = Some(los);
            self.last_update_kind = UpdateKind::Acquired { stale };
            debug!(heading = los, range, dt, stale, "target acquired");
            return Some(self.state.snapshot(range));
        }

        self.last_update_kind = self.integrate(&target_pos, dt);
        let final_range = distance(&self.state.position, &target_pos);
        Some(self.state.snapshot(final_range))
    }

    /// Sub-stepped PN integration over `dt` seconds.
    fn integrate(&mut self, target: &GeoPoint, dt: f64) -> UpdateKind {
        let sub_step = self.config.sub_step_secs;
        let mut remaining = dt;
        let mut substeps = 0u32;
        let mut hit = false;
        let mut capped = false;

        while remaining > 0.0 {
            if substeps >= self.config.max_substeps {
                capped = true;
                warn!(
                    substeps,
                    unintegrated_secs = remaining,
                    "sub-step cap reached, dropping remaining time"
                );
                break;
            }

            let step = remaining.min(sub_step);
            let outcome = guidance::integrate_substep(&mut self.state, target, step, &self.config);
            substeps += 1;
            remaining -= step;

            if outcome.range < self.config.hit_threshold_m {
                hit = true;
                debug!(range = outcome.range, substeps, "within hit threshold");
                break;
            }
        }

        UpdateKind::Integrated {
            substeps,
            hit,
            capped,
        }
    }

    /// Current state as seen against `target`, without advancing time.
    pub fn snapshot(&self, target: &TargetState) -> InterceptorSnapshot {
        self.state
            .snapshot(distance(&self.state.position, &target.position()))
    }

    pub fn phase(&self) -> GuidancePhase {
        if self.state.active {
            GuidancePhase::Armed
        } else {
            GuidancePhase::Idle
        }
    }

    pub fn state(&self) -> &InterceptorState {
        &self.state
    }

    pub fn last_update_kind(&self) -> UpdateKind {
        self.last_update_kind
    }
}
