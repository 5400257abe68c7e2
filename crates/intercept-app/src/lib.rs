//! INTERCEPT service-side wiring.
//!
//! This crate owns the guidance engine on behalf of a service layer: one
//! `InterceptSession` per tracked engagement, serialized behind a mutex,
//! plus logging setup shared by the binaries.

pub mod logging;
pub mod session;

pub use session::{InterceptSession, SessionError, SessionStatus};
