//! Physical and empirical constants used in ballistics calculations.
//!
//! Everything here is in the imperial unit system the solver works in:
//! feet, feet per second, seconds, grains, degrees Fahrenheit and inches
//! of mercury.

/// Gravitational acceleration in ft/s²
pub const GRAVITY_FPS2: f64 = 32.174;

/// Offset between the Fahrenheit and Rankine scales
pub const RANKINE_OFFSET: f64 = 459.67;

/// Standard atmosphere reference temperature (°F)
pub const STD_TEMP_F: f64 = 59.0;

/// Standard atmosphere reference pressure (inHg)
pub const STD_PRESSURE_INHG: f64 = 29.92;

/// Speed of sound factor: c = 49.0223 * sqrt(T_rankine), in ft/s
pub const SPEED_OF_SOUND_FACTOR: f64 = 49.0223;

/// Drag coefficient to retardation conversion constant
///
/// Folds standard sea-level air density and the unit conversion for
/// imperial inputs into one factor:
///
/// ```text
/// retard = density_ratio * v * Cd / BC * DRAG_CONSTANT
/// ```
///
/// Empirical for this unit system. Do not try to derive it away.
pub const DRAG_CONSTANT: f64 = 0.00071054;

/// Below this speed (ft/s) a bullet is considered spent and integration stops
pub const MIN_VELOCITY_FPS: f64 = 100.0;

/// Crosswind relative speeds at or below this magnitude (ft/s) produce no drag
pub const CROSSWIND_DEAD_ZONE_FPS: f64 = 0.1;

/// Default integration time step (s)
pub const DEFAULT_TIME_STEP_S: f64 = 0.0001;

/// Default spacing between trajectory samples (ft), i.e. every 100 yards
pub const DEFAULT_SAMPLE_INTERVAL_FT: f64 = 300.0;

/// Sample spacing used when searching for sightline crossings (one yard)
pub const CROSSING_RESOLUTION_FT: f64 = 3.0;

/// Extra distance simulated past the zero range during the zero search (ft)
pub const ZERO_RANGE_MARGIN_FT: f64 = 10.0;

/// A sample counts as "at the zero range" when within this distance (ft)
pub const ZERO_RANGE_TOLERANCE_FT: f64 = 1.0;

/// Feet per yard
pub const FEET_PER_YARD: f64 = 3.0;

/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Conversion factor: miles per hour to feet per second
pub const MPH_TO_FPS: f64 = 5280.0 / 3600.0;

/// Inches subtended by one minute of angle at 100 yards
pub const MOA_INCHES_PER_100_YARDS: f64 = 1.047;

/// Flight-time cap (s) applied by the report, the zero search and the CLI.
///
/// A slow, high-BC bullet can stay above the spent-bullet cutoff while its
/// downrange speed decays toward zero, so it may never reach the range limit.
pub const MAX_FLIGHT_TIME_S: f64 = 30.0;
