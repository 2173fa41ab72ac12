// CLI API module - input records shared by the solver entry points and the command-line tool
use serde::{Deserialize, Serialize};

use crate::constants::RANKINE_OFFSET;
use crate::error::{ensure_finite, ensure_positive, BallisticsError};
use crate::DragModel;

// Projectile parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub name: String,
    pub mass_grains: f64,
    pub ballistic_coefficient: f64,
    pub drag_model: DragModel,
    pub muzzle_velocity_fps: f64,
}

impl Projectile {
    /// Build a projectile, rejecting non-physical values
    pub fn new(
        name: impl Into<String>,
        mass_grains: f64,
        ballistic_coefficient: f64,
        drag_model: DragModel,
        muzzle_velocity_fps: f64,
    ) -> Result<Self, BallisticsError> {
        let projectile = Self {
            name: name.into(),
            mass_grains,
            ballistic_coefficient,
            drag_model,
            muzzle_velocity_fps,
        };
        projectile.validate()?;
        Ok(projectile)
    }

    pub fn validate(&self) -> Result<(), BallisticsError> {
        ensure_positive("mass_grains", self.mass_grains)?;
        ensure_positive("ballistic_coefficient", self.ballistic_coefficient)?;
        ensure_positive("muzzle_velocity_fps", self.muzzle_velocity_fps)?;
        Ok(())
    }
}

// Environmental conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub temperature_f: f64,
    pub pressure_inhg: f64,
    /// Full-value (90°) wind. `simulate` does not read this field; pass it
    /// as the `wind_speed_fps` argument. The zero search always runs calm.
    pub crosswind_fps: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            temperature_f: 59.0,
            pressure_inhg: 29.92,
            crosswind_fps: 0.0,
        }
    }
}

impl Environment {
    pub fn new(temperature_f: f64, pressure_inhg: f64, crosswind_fps: f64) -> Result<Self, BallisticsError> {
        let environment = Self { temperature_f, pressure_inhg, crosswind_fps };
        environment.validate()?;
        Ok(environment)
    }

    pub fn validate(&self) -> Result<(), BallisticsError> {
        ensure_finite("temperature_f", self.temperature_f)?;
        if self.temperature_f <= -RANKINE_OFFSET {
            return Err(BallisticsError::invalid(
                "temperature_f",
                self.temperature_f,
                "must be above absolute zero",
            ));
        }
        ensure_positive("pressure_inhg", self.pressure_inhg)?;
        ensure_finite("crosswind_fps", self.crosswind_fps)?;
        Ok(())
    }
}

// Rifle sight geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SightSetup {
    pub scope_height_ft: f64,  // scope axis above bore
    pub zero_range_ft: f64,
}

impl SightSetup {
    pub fn new(scope_height_ft: f64, zero_range_ft: f64) -> Result<Self, BallisticsError> {
        let sight = Self { scope_height_ft, zero_range_ft };
        sight.validate()?;
        Ok(sight)
    }

    pub fn validate(&self) -> Result<(), BallisticsError> {
        ensure_finite("scope_height_ft", self.scope_height_ft)?;
        if self.scope_height_ft < 0.0 {
            return Err(BallisticsError::invalid(
                "scope_height_ft",
                self.scope_height_ft,
                "must not be negative",
            ));
        }
        ensure_positive("zero_range_ft", self.zero_range_ft)?;
        Ok(())
    }

    /// Slope of the sightline: a straight line from scope height down to
    /// the bore axis at the zero range.
    pub fn sightline_slope(&self) -> f64 {
        -self.scope_height_ft / self.zero_range_ft
    }

    /// Sightline height above the bore axis at a downrange distance
    pub fn sightline_height(&self, downrange_ft: f64) -> f64 {
        self.scope_height_ft + self.sightline_slope() * downrange_ft
    }
}
