//! Core types and definitions for the INTERCEPT guidance workspace.
//!
//! This crate defines the vocabulary shared across the other crates:
//! geographic points, target fixes, state snapshots, tuning constants,
//! the spherical-Earth geodesy primitives and the guidance configuration.
//! It has no dependency on any runtime or transport layer.

pub mod config;
pub mod constants;
pub mod geodesy;
pub mod types;

pub use config::{ConfigError, GuidanceConfig};
pub use types::{GeoPoint, InterceptorSnapshot, TargetState, TrackFix};

#[cfg(test)]
mod tests;
