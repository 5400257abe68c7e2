//! Session-scoped ownership of a guidance engine.
//!
//! The engine mutates its state on every call without internal locking, so a
//! session wraps it in a `Mutex`: at most one `launch`/`update` is in flight
//! at a time, whichever request thread it comes from.

use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use thiserror::Error;

use intercept_core::{GuidanceConfig, InterceptorSnapshot, TargetState};
use intercept_sim::{Clock, GuidanceEngine, GuidancePhase, LaunchReport, SystemClock, UpdateKind};

/// Errors surfaced to the service layer.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("target rejected: {0}")]
    InvalidTarget(String),
    #[error("guidance engine lock poisoned")]
    Poisoned,
}

/// Summary of a session for status endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionStatus {
    pub phase: GuidancePhase,
    pub updates_served: u64,
    pub last_update: UpdateKind,
}

struct Inner<C: Clock> {
    engine: GuidanceEngine<C>,
    updates_served: u64,
}

/// One guidance engine, owned by one session.
pub struct InterceptSession<C: Clock = SystemClock> {
    inner: Mutex<Inner<C>>,
}

impl InterceptSession<SystemClock> {
    pub fn new(config: GuidanceConfig) -> Self {
        Self::from_engine(GuidanceEngine::new(config))
    }
}

impl<C: Clock> InterceptSession<C> {
    pub fn from_engine(engine: GuidanceEngine<C>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                engine,
                updates_served: 0,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner<C>>, SessionError> {
        self.inner.lock().map_err(|_| SessionError::Poisoned)
    }

    /// Arm (or re-arm) the interceptor at its launch site.
    pub fn launch(&self) -> Result<LaunchReport, SessionError> {
        let mut inner = self.lock()?;
        Ok(inner.engine.launch())
    }

    /// Feed the latest target fix. `Ok(None)` means the interceptor is not armed;
    /// the target is only validated once it is.
    pub fn update(&self, target: &TargetState) -> Result<Option<InterceptorSnapshot>, SessionError> {
        let mut inner = self.lock()?;
        if inner.engine.phase() == GuidancePhase::Armed {
            validate_target(target)?;
        }
        let snapshot = inner.engine.update(target);
        if snapshot.is_some() {
            inner.updates_served += 1;
        }
        Ok(snapshot)
    }

    pub fn status(&self) -> Result<SessionStatus, SessionError> {
        let inner = self.lock()?;
        Ok(SessionStatus {
            phase: inner.engine.phase(),
            updates_served: inner.updates_served,
            last_update: inner.engine.last_update_kind(),
        })
    }
}

/// Reject coordinates the engine cannot reason about.
pub fn validate_target(target: &TargetState) -> Result<(), SessionError> {
    if !(target.lat.is_finite() && target.lon.is_finite() && target.alt.is_finite()) {
        return Err(SessionError::InvalidTarget(format!(
            "non-finite coordinate ({}, {}, {})",
            target.lat, target.lon, target.alt
        )));
    }
    if !(-90.0..=90.0).contains(&target.lat) {
        return Err(SessionError::InvalidTarget(format!(
            "latitude {} outside [-90, 90]",
            target.lat
        )));
    }
    if !(-180.0..=180.0).contains(&target.lon) {
        return Err(SessionError::InvalidTarget(format!(
            "longitude {} outside [-180, 180]",
            target.lon
        )));
    }
    Ok(())
}
