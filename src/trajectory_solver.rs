//! Fixed-step 3-DOF trajectory integration.
//!
//! The state is a point mass with three axes, held in `nalgebra` vectors:
//!
//! * `x` - downrange distance (ft)
//! * `y` - height relative to the bore axis (ft, up is positive)
//! * `z` - crosswind deflection (ft)
//!
//! Drag acts on the in-plane (`x`, `y`) velocity. The crosswind axis is an
//! independent problem: drag pulls the bullet's lateral velocity toward the
//! wind speed, with a small dead zone around zero relative speed.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::atmosphere::Atmosphere;
use crate::constants::{
    CROSSWIND_DEAD_ZONE_FPS, DEFAULT_SAMPLE_INTERVAL_FT, DEFAULT_TIME_STEP_S, DRAG_CONSTANT,
    GRAVITY_FPS2, MIN_VELOCITY_FPS,
};
use crate::drag::get_drag_coefficient;
use crate::error::{ensure_positive, BallisticsError};
use crate::{Environment, Projectile, SightSetup};

/// Integration scheme used to advance the state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationMethod {
    /// Velocities first, then positions from the updated velocities
    #[default]
    Euler,
    /// Classic fourth-order Runge-Kutta over the same derivatives
    #[serde(alias = "rk4")]
    RungeKutta4,
}

/// Run-length and resolution controls for one simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Stop once the bullet passes this downrange distance (ft)
    pub max_range_ft: f64,
    /// Integration step (s)
    pub time_step_s: f64,
    /// Distance between emitted samples (ft)
    pub sample_interval_ft: f64,
    pub method: IntegrationMethod,
    /// Stop once flight time passes this (s); unbounded unless set
    pub max_time_s: f64,
}

impl SimulationSettings {
    pub fn new(max_range_ft: f64) -> Self {
        Self {
            max_range_ft,
            time_step_s: DEFAULT_TIME_STEP_S,
            sample_interval_ft: DEFAULT_SAMPLE_INTERVAL_FT,
            method: IntegrationMethod::Euler,
            max_time_s: f64::INFINITY,
        }
    }

    pub fn with_time_step(mut self, time_step_s: f64) -> Self {
        self.time_step_s = time_step_s;
        self
    }

    pub fn with_sample_interval(mut self, sample_interval_ft: f64) -> Self {
        self.sample_interval_ft = sample_interval_ft;
        self
    }

    pub fn with_method(mut self, method: IntegrationMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_max_time(mut self, max_time_s: f64) -> Self {
        self.max_time_s = max_time_s;
        self
    }

    /// A run only terminates if the range is finite and both step sizes are positive.
    pub fn validate(&self) -> Result<(), BallisticsError> {
        ensure_positive("max_range_ft", self.max_range_ft)?;
        ensure_positive("time_step_s", self.time_step_s)?;
        ensure_positive("sample_interval_ft", self.sample_interval_ft)?;
        if self.max_time_s.is_nan() || self.max_time_s <= 0.0 {
            return Err(BallisticsError::invalid("max_time_s", self.max_time_s, "must be positive"));
        }
        Ok(())
    }
}

/// Mutable state of a single integration run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub time: f64,
}

impl SimulationState {
    /// Bullet at the bore with muzzle velocity along the launch angle
    pub fn at_muzzle(muzzle_velocity_fps: f64, launch_angle_rad: f64) -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::new(
                muzzle_velocity_fps * launch_angle_rad.cos(),
                muzzle_velocity_fps * launch_angle_rad.sin(),
                0.0,
            ),
            time: 0.0,
        }
    }

    /// Speed in the vertical plane; the crosswind component is excluded.
    pub fn speed(&self) -> f64 {
        in_plane_speed(&self.velocity)
    }

    fn sample(&self, sight: &SightSetup) -> TrajectorySample {
        TrajectorySample {
            downrange_ft: self.position.x,
            drop_ft: self.position.y - sight.sightline_height(self.position.x),
            windage_ft: self.position.z,
            velocity_fps: self.speed(),
            time_s: self.time,
        }
    }
}

/// One row of a trajectory, relative to the sightline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub downrange_ft: f64,
    /// Height above (+) or below (-) the sightline
    pub drop_ft: f64,
    pub windage_ft: f64,
    pub velocity_fps: f64,
    pub time_s: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Termination {
    RangeExhausted,
    Spent,
    TimeLimit,
}

#[inline]
fn in_plane_speed(velocity: &Vector3<f64>) -> f64 {
    (velocity.x * velocity.x + velocity.y * velocity.y).sqrt()
}

/// Forces acting on one projectile in one environment
struct Dynamics<'a> {
    projectile: &'a Projectile,
    atmosphere: Atmosphere,
    wind_speed_fps: f64,
}

impl<'a> Dynamics<'a> {
    fn new(projectile: &'a Projectile, environment: &Environment, wind_speed_fps: f64) -> Self {
        Self {
            projectile,
            atmosphere: Atmosphere::from_environment(environment),
            wind_speed_fps,
        }
    }

    /// Drag deceleration per unit velocity (1/s)
    fn retardation(&self, speed_fps: f64) -> f64 {
        let mach = self.atmosphere.mach(speed_fps);
        let cd = get_drag_coefficient(mach, self.projectile.drag_model);
        self.atmosphere.density_ratio * speed_fps * cd / self.projectile.ballistic_coefficient
            * DRAG_CONSTANT
    }

    fn acceleration(&self, velocity: &Vector3<f64>) -> Vector3<f64> {
        let retard = self.retardation(in_plane_speed(velocity));

        let relative_crosswind = velocity.z - self.wind_speed_fps;
        let crosswind_accel = if relative_crosswind.abs() > CROSSWIND_DEAD_ZONE_FPS {
            -retard * relative_crosswind
        } else {
            0.0
        };

        Vector3::new(
            -retard * velocity.x,
            -retard * velocity.y - GRAVITY_FPS2,
            crosswind_accel,
        )
    }

    fn euler_step(&self, state: &mut SimulationState, dt: f64) {
        let accel = self.acceleration(&state.velocity);
        state.velocity += accel * dt;
        state.position += state.velocity * dt;
        state.time += dt;
    }

    fn rk4_step(&self, state: &mut SimulationState, dt: f64) {
        let v1 = state.velocity;
        let a1 = self.acceleration(&v1);

        let v2 = v1 + a1 * (0.5 * dt);
        let a2 = self.acceleration(&v2);

        let v3 = v1 + a2 * (0.5 * dt);
        let a3 = self.acceleration(&v3);

        let v4 = v1 + a3 * dt;
        let a4 = self.acceleration(&v4);

        state.position += (v1 + v2 * 2.0 + v3 * 2.0 + v4) * (dt / 6.0);
        state.velocity += (a1 + a2 * 2.0 + a3 * 2.0 + a4) * (dt / 6.0);
        state.time += dt;
    }
}

/// Integrate a trajectory and sample it at regular downrange intervals.
///
/// Samples start at the muzzle and are taken on the first step at or past
/// each interval boundary. Integration stops when the bullet passes
/// `max_range_ft` or slows below 100 ft/s. Never fails: degenerate inputs
/// (zero BC, zero velocity) produce degenerate samples, not errors.
/// `settings.time_step_s` must be positive or the run never ends. A
/// bullet that stays above 100 ft/s without ever reaching `max_range_ft`
/// keeps flying until `settings.max_time_s`, which is unbounded by default.
pub fn simulate(
    projectile: &Projectile,
    launch_angle_rad: f64,
    sight: &SightSetup,
    environment: &Environment,
    wind_speed_fps: f64,
    settings: &SimulationSettings,
) -> Vec<TrajectorySample> {
    let dynamics = Dynamics::new(projectile, environment, wind_speed_fps);
    let mut state = SimulationState::at_muzzle(projectile.muzzle_velocity_fps, launch_angle_rad);
    let dt = settings.time_step_s;

    let mut samples = Vec::new();
    let mut next_sample_ft = 0.0;

    let termination = loop {
        // A NaN position (degenerate inputs) also ends the run
        if state.position.x.is_nan() || state.position.x > settings.max_range_ft {
            break Termination::RangeExhausted;
        }

        if state.position.x >= next_sample_ft {
            samples.push(state.sample(sight));
            next_sample_ft += settings.sample_interval_ft;
        }

        if state.speed() < MIN_VELOCITY_FPS {
            break Termination::Spent;
        }

        if state.time >= settings.max_time_s {
            break Termination::TimeLimit;
        }

        match settings.method {
            IntegrationMethod::Euler => dynamics.euler_step(&mut state, dt),
            IntegrationMethod::RungeKutta4 => dynamics.rk4_step(&mut state, dt),
        }
    };

    if termination == Termination::TimeLimit {
        warn!(
            projectile = %projectile.name,
            downrange_ft = state.position.x,
            max_range_ft = settings.max_range_ft,
            "flight time limit reached before max range"
        );
    }

    trace!(
        projectile = %projectile.name,
        ?termination,
        samples = samples.len(),
        downrange_ft = state.position.x,
        time_s = state.time,
        "trajectory finished"
    );

    samples
}
