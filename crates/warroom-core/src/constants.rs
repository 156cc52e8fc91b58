//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 1;

/// Milliseconds per tick at the default tick rate.
pub const TICK_MILLIS: u64 = 1000 / TICK_RATE as u64;

// --- Mission progress ---

/// Progress value of a finished sub-mission or mission.
pub const PROGRESS_MAX: u32 = 100;

/// Added to the summed leg progress before averaging, so exact fractions
/// do not floor one short.
pub const PROGRESS_EPSILON: f64 = 1e-6;

/// Default progress profiles as (step, lead threshold), cycled by swarm index.
pub const DEFAULT_PROGRESS_PROFILES: [(u32, u32); 3] = [(5, 20), (4, 20), (10, 30)];

// --- Lifecycle ---

/// Ticks a terminal mission stays visible before its id is released.
/// The id clears on the tick the counter drops below zero.
pub const MISSION_FADE_TICKS: i32 = 3;

// --- Fleet defaults ---

/// Airframe kind reported for vehicles when the configuration names none.
pub const DEFAULT_VEHICLE_KIND: &str = "copter";

/// Default prefix for generated vehicle ids.
pub const DEFAULT_VEHICLE_PREFIX: &str = "uav";

/// Default prefix for generated swarm ids.
pub const DEFAULT_SWARM_PREFIX: &str = "swarm";

/// Default staging position (lat, lon, alt).
pub const DEFAULT_ORIGIN: [f64; 3] = [24.773252, 121.046107, 30.0];

/// Default start-position scatter around the origin (degrees).
pub const DEFAULT_SCATTER_DEG: f64 = 0.0005;

/// Validity of a fleet telemetry report, in ticks.
pub const STATUS_TTL: u32 = 1;
