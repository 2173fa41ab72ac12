//! Atmospheric corrections for ballistics.
//!
//! Converts a temperature/pressure pair into the two quantities the
//! integrator needs: the local speed of sound (for Mach number) and the
//! air density relative to the standard atmosphere (for drag scaling).
//! Absolute-zero and below is out of range and not checked here; see
//! `Environment::validate`.

use crate::constants::{RANKINE_OFFSET, SPEED_OF_SOUND_FACTOR, STD_PRESSURE_INHG, STD_TEMP_F};
use crate::Environment;

/// Speed of sound in ft/s for a temperature in °F.
#[inline]
pub fn speed_of_sound(temp_f: f64) -> f64 {
    SPEED_OF_SOUND_FACTOR * (temp_f + RANKINE_OFFSET).sqrt()
}

/// Air density relative to the 59 °F / 29.92 inHg standard atmosphere.
#[inline]
pub fn density_ratio(temp_f: f64, pressure_inhg: f64) -> f64 {
    let std_temp_r = STD_TEMP_F + RANKINE_OFFSET;
    let temp_r = temp_f + RANKINE_OFFSET;
    (pressure_inhg / STD_PRESSURE_INHG) * (std_temp_r / temp_r)
}

/// Atmospheric quantities for one environment, computed once per run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    /// Speed of sound (ft/s)
    pub speed_of_sound: f64,
    /// Density relative to standard
    pub density_ratio: f64,
}

impl Atmosphere {
    pub fn new(temp_f: f64, pressure_inhg: f64) -> Self {
        Self {
            speed_of_sound: speed_of_sound(temp_f),
            density_ratio: density_ratio(temp_f, pressure_inhg),
        }
    }

    pub fn from_environment(environment: &Environment) -> Self {
        Self::new(environment.temperature_f, environment.pressure_inhg)
    }

    /// Mach number for a speed in ft/s
    #[inline]
    pub fn mach(&self, speed_fps: f64) -> f64 {
        speed_fps / self.speed_of_sound
    }
}
