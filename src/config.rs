//! Session configuration: the environment, the rifle, and the loads to compare.
//!
//! Values are in the units a shooter writes down (yards, inches, mph) and
//! are converted to the solver's feet and ft/s on the way in. Every field
//! has a default, so a JSON file only needs the values it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TIME_STEP_S, MAX_FLIGHT_TIME_S, ZERO_RANGE_TOLERANCE_FT};
use crate::error::{ensure_finite, ensure_positive, BallisticsError};
use crate::trajectory_solver::{IntegrationMethod, SimulationSettings};
use crate::units::{inches_to_feet, mph_to_fps, yards_to_feet};
use crate::{DragModel, Environment, Projectile, SightSetup};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub temperature_f: f64,
    pub pressure_inhg: f64,
    /// Full-value (90°) crosswind
    pub wind_mph: f64,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            temperature_f: 60.0,
            pressure_inhg: 29.92,
            wind_mph: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RifleConfig {
    /// Scope axis above the bore
    pub scope_height_in: f64,
    pub zero_distance_yd: f64,
}

impl Default for RifleConfig {
    fn default() -> Self {
        Self {
            scope_height_in: 1.9,
            zero_distance_yd: 100.0,
        }
    }
}

/// One cartridge as listed on a box or in a load book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadConfig {
    pub name: String,
    pub weight_gr: f64,
    pub bc: f64,
    pub model: DragModel,
    pub mv_fps: f64,
}

impl LoadConfig {
    pub fn new(name: &str, weight_gr: f64, bc: f64, model: DragModel, mv_fps: f64) -> Self {
        Self {
            name: name.to_string(),
            weight_gr,
            bc,
            model,
            mv_fps,
        }
    }

    pub fn to_projectile(&self) -> Projectile {
        Projectile {
            name: self.name.clone(),
            mass_grains: self.weight_gr,
            ballistic_coefficient: self.bc,
            drag_model: self.model,
            muzzle_velocity_fps: self.mv_fps,
        }
    }
}

/// Everything needed to build a comparison report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub environment: EnvironmentConfig,
    pub rifle: RifleConfig,
    /// The load the scope is zeroed for
    pub primary: LoadConfig,
    /// Loads fired through the same zero
    pub secondary: Vec<LoadConfig>,
    /// 1001 so the 1000 yd row is not lost to step overshoot
    pub max_range_yd: f64,
    pub report_interval_yd: f64,
    pub time_step_s: f64,
    pub method: IntegrationMethod,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            environment: EnvironmentConfig::default(),
            rifle: RifleConfig::default(),
            primary: LoadConfig::new("NAS3 175Gr LRX", 175.0, 0.254, DragModel::G7, 2725.0),
            secondary: vec![
                LoadConfig::new("NAS3 150 TTSX", 150.0, 0.440, DragModel::G1, 2950.0),
                LoadConfig::new("Barnes 130Gr TTSX", 130.0, 0.350, DragModel::G1, 3125.0),
                LoadConfig::new("Barnes 150Gr TTSX", 150.0, 0.440, DragModel::G1, 2900.0),
                LoadConfig::new("Barnes 168Gr TTSX", 168.0, 0.470, DragModel::G1, 2700.0),
            ],
            max_range_yd: 1001.0,
            report_interval_yd: 100.0,
            time_step_s: DEFAULT_TIME_STEP_S,
            method: IntegrationMethod::Euler,
        }
    }
}

impl SessionConfig {
    /// Load a JSON session file and validate it
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BallisticsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(BallisticsError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self, BallisticsError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BallisticsError> {
        ensure_finite("wind_mph", self.environment.wind_mph)?;
        self.environment().validate()?;
        self.sight().validate()?;

        for load in self.loads() {
            load.to_projectile().validate().map_err(|e| {
                BallisticsError::Config(format!("load '{}': {e}", load.name))
            })?;
        }

        ensure_positive("max_range_yd", self.max_range_yd)?;
        ensure_positive("report_interval_yd", self.report_interval_yd)?;
        ensure_positive("time_step_s", self.time_step_s)?;

        // The zero search looks for a sample within a foot of the zero range
        for load in self.loads() {
            let step_ft = load.mv_fps * self.time_step_s;
            if step_ft >= ZERO_RANGE_TOLERANCE_FT {
                return Err(BallisticsError::Config(format!(
                    "load '{}': time step {} s moves {step_ft:.2} ft per step at the muzzle (must be under {ZERO_RANGE_TOLERANCE_FT} ft)",
                    load.name, self.time_step_s
                )));
            }
        }

        if self.rifle.zero_distance_yd > self.max_range_yd {
            return Err(BallisticsError::Config(format!(
                "zero distance {} yd is beyond max range {} yd",
                self.rifle.zero_distance_yd, self.max_range_yd
            )));
        }
        Ok(())
    }

    /// Primary load first, then the secondaries in order
    pub fn loads(&self) -> impl Iterator<Item = &LoadConfig> {
        std::iter::once(&self.primary).chain(self.secondary.iter())
    }

    pub fn environment(&self) -> Environment {
        Environment {
            temperature_f: self.environment.temperature_f,
            pressure_inhg: self.environment.pressure_inhg,
            crosswind_fps: self.crosswind_fps(),
        }
    }

    pub fn crosswind_fps(&self) -> f64 {
        mph_to_fps(self.environment.wind_mph)
    }

    pub fn sight(&self) -> SightSetup {
        SightSetup {
            scope_height_ft: inches_to_feet(self.rifle.scope_height_in),
            zero_range_ft: yards_to_feet(self.rifle.zero_distance_yd),
        }
    }

    pub fn max_range_ft(&self) -> f64 {
        yards_to_feet(self.max_range_yd)
    }

    /// Integrator settings for the report rows
    pub fn report_settings(&self) -> SimulationSettings {
        SimulationSettings::new(self.max_range_ft())
            .with_time_step(self.time_step_s)
            .with_sample_interval(yards_to_feet(self.report_interval_yd))
            .with_method(self.method)
            .with_max_time(MAX_FLIGHT_TIME_S)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.secondary.len(), 4);
        assert_eq!(config.loads().count(), 5);
        assert_eq!(config.loads().next().unwrap().name, "NAS3 175Gr LRX");

        let sight = config.sight();
        assert!((sight.scope_height_ft - 1.9 / 12.0).abs() < 1e-12);
        assert_eq!(sight.zero_range_ft, 300.0);
        assert_eq!(config.max_range_ft(), 3003.0);
        assert!((config.crosswind_fps() - 14.6667).abs() < 1e-4);

        let settings = config.report_settings();
        assert_eq!(settings.sample_interval_ft, 300.0);
        assert_eq!(settings.time_step_s, 1e-4);
        assert_eq!(settings.max_time_s, MAX_FLIGHT_TIME_S);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "environment": { "wind_mph": 5.0 },
            "rifle": { "zero_distance_yd": 200 },
            "secondary": []
        }"#;
        let config = SessionConfig::from_json_str(json).unwrap();

        assert_eq!(config.environment.wind_mph, 5.0);
        assert_eq!(config.environment.temperature_f, 60.0);
        assert_eq!(config.rifle.zero_distance_yd, 200.0);
        assert_eq!(config.rifle.scope_height_in, 1.9);
        assert_eq!(config.primary.name, "NAS3 175Gr LRX");
        assert!(config.secondary.is_empty());
    }

    #[test]
    fn test_load_model_parsed_case_insensitively() {
        let json = r#"{
            "primary": { "name": "test", "weight_gr": 140, "bc": 0.3, "model": "g7", "mv_fps": 2800 },
            "method": "rk4"
        }"#;
        let config = SessionConfig::from_json_str(json).unwrap();
        assert_eq!(config.primary.model, DragModel::G7);
        assert_eq!(config.method, IntegrationMethod::RungeKutta4);
    }

    #[test]
    fn test_unknown_model_rejected() {
        let json = r#"{
            "primary": { "name": "test", "weight_gr": 140, "bc": 0.3, "model": "G5", "mv_fps": 2800 }
        }"#;
        let err = SessionConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, BallisticsError::Json(_)));
        assert!(err.to_string().contains("unknown drag model 'G5'"), "{err}");
    }

    #[test]
    fn test_validation_errors() {
        let mut config = SessionConfig::default();
        config.secondary[1].bc = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Barnes 130Gr TTSX"), "{err}");

        let mut config = SessionConfig::default();
        config.environment.pressure_inhg = -1.0;
        assert!(config.validate().is_err());

        let mut config = SessionConfig::default();
        config.rifle.zero_distance_yd = 1200.0;
        assert!(matches!(config.validate(), Err(BallisticsError::Config(_))));

        let mut config = SessionConfig::default();
        config.report_interval_yd = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_time_step_too_coarse_for_zero_search() {
        let mut config = SessionConfig::default();
        config.time_step_s = 0.001;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, BallisticsError::Config(_)));
        assert!(err.to_string().contains("NAS3 175Gr LRX"), "{err}");

        // Only the fastest load has to fit: 3125 ft/s * 3e-4 s is under a foot
        let mut config = SessionConfig::default();
        config.time_step_s = 3e-4;
        assert!(config.validate().is_ok());

        config.secondary.push(LoadConfig::new("hot", 55.0, 0.25, DragModel::G1, 3400.0));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'hot'"), "{err}");
    }

    #[test]
    fn test_missing_file() {
        let err = SessionConfig::from_file("/nonexistent/session.json").unwrap_err();
        assert!(matches!(err, BallisticsError::Config(_)));
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = SessionConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert!(json.contains("\"model\": \"G7\""));
        assert_eq!(SessionConfig::from_json_str(&json).unwrap(), config);
    }
}
