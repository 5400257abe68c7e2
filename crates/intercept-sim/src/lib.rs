//! Guidance engine for INTERCEPT.
//!
//! Owns the interceptor's kinematic state, advances it with a sub-stepped
//! proportional-navigation loop, and produces `InterceptorSnapshot`s.
//! Time comes from an injectable `Clock`, so the engine is fully
//! deterministic under `ManualClock`.

pub mod clock;
pub mod engine;
pub mod guidance;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{GuidanceEngine, GuidancePhase, LaunchReport, UpdateKind};
