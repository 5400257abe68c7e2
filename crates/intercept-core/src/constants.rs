//! Guidance constants and reference tuning parameters.

// --- Earth model ---

/// Mean Earth radius in meters (spherical model).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

// --- Launch site ---

/// Launch origin latitude in degrees (Incheon International Airport).
pub const LAUNCH_ORIGIN_LAT: f64 = 37.4602;

/// Launch origin longitude in degrees (Incheon International Airport).
pub const LAUNCH_ORIGIN_LON: f64 = 126.4407;

/// Launch origin altitude in meters.
pub const LAUNCH_ORIGIN_ALT: f64 = 0.0;

// --- Interceptor performance ---

/// Interceptor cruise speed (m/s) — ~Mach 2.3.
pub const INTERCEPTOR_SPEED: f64 = 800.0;

// --- Proportional navigation ---

/// Navigation constant for PN guidance (dimensionless).
pub const PN_NAVIGATION_CONSTANT: f64 = 4.0;

/// Maximum commanded turn rate (deg/s).
pub const PN_MAX_TURN_RATE_DEG: f64 = 30.0;

/// Gain of the first-order altitude lag toward the target altitude (1/s).
pub const ALTITUDE_GAIN: f64 = 2.0;

// --- Integration ---

/// Fixed integration sub-step (seconds).
pub const SUB_STEP_SECS: f64 = 0.01;

/// Gap between updates above which guidance re-acquires instead of integrating (seconds).
pub const STALE_GAP_SECS: f64 = 1.0;

/// Distance below which the target counts as reached (meters).
pub const HIT_THRESHOLD_M: f64 = 5.0;

/// Upper bound on sub-steps integrated by a single update.
pub const MAX_SUBSTEPS: u32 = 1_000;

// --- Units ---

/// Meters per international foot.
pub const METERS_PER_FOOT: f64 = 0.3048;
