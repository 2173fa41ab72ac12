use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{
    DEFAULT_TIME_STEP_S, MAX_FLIGHT_TIME_S, ZERO_RANGE_MARGIN_FT, ZERO_RANGE_TOLERANCE_FT,
};
use crate::trajectory_solver::{simulate, IntegrationMethod, SimulationSettings};
use crate::{Environment, Projectile, SightSetup};

/// Bisection bracket and target precision for the zero-angle search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZeroSearch {
    pub lower_rad: f64,
    /// 0.05 rad is about 2.9°, far above any practical zero
    pub upper_rad: f64,
    /// Final bracket width
    pub tolerance_rad: f64,
    /// Integrator settings for each candidate trajectory
    pub time_step_s: f64,
    pub method: IntegrationMethod,
    /// Flight-time cap for each candidate
    pub max_time_s: f64,
}

impl Default for ZeroSearch {
    fn default() -> Self {
        Self {
            lower_rad: 0.0,
            upper_rad: 0.05,
            tolerance_rad: 1e-9,
            time_step_s: DEFAULT_TIME_STEP_S,
            method: IntegrationMethod::Euler,
            max_time_s: MAX_FLIGHT_TIME_S,
        }
    }
}

impl ZeroSearch {
    /// Halvings needed to shrink the bracket to the tolerance
    pub fn iterations(&self) -> usize {
        let width = (self.upper_rad - self.lower_rad).abs();
        if !self.tolerance_rad.is_finite() || self.tolerance_rad <= 0.0 {
            return 0;
        }
        if !width.is_finite() || width <= self.tolerance_rad {
            return 0;
        }
        (width / self.tolerance_rad).log2().ceil() as usize
    }
}

/// Launch angle (rad) that puts the projectile on the sightline at the
/// zero range, using the default bracket and tolerance.
pub fn find_zero_angle(projectile: &Projectile, sight: &SightSetup, environment: &Environment) -> f64 {
    find_zero_angle_with(projectile, sight, environment, &ZeroSearch::default())
}

/// Bisection over launch angle.
///
/// Each candidate is integrated without wind to just past the zero range.
/// Above the sightline lowers the upper bound; at or below it raises the
/// lower bound. When no sample lands within a foot of the zero range the
/// candidate counts as low. Returns the midpoint of the final bracket.
pub fn find_zero_angle_with(
    projectile: &Projectile,
    sight: &SightSetup,
    environment: &Environment,
    search: &ZeroSearch,
) -> f64 {
    // Interval equal to the zero range puts a sample on the first step past it
    let settings = SimulationSettings::new(sight.zero_range_ft + ZERO_RANGE_MARGIN_FT)
        .with_sample_interval(sight.zero_range_ft)
        .with_time_step(search.time_step_s)
        .with_method(search.method)
        .with_max_time(search.max_time_s);

    let mut low = search.lower_rad;
    let mut high = search.upper_rad;
    let iterations = search.iterations();
    let mut missed = 0;

    for iteration in 0..iterations {
        let mid = 0.5 * (low + high);
        let samples = simulate(projectile, mid, sight, environment, 0.0, &settings);

        let at_zero = samples
            .iter()
            .find(|s| (s.downrange_ft - sight.zero_range_ft).abs() < ZERO_RANGE_TOLERANCE_FT);

        match at_zero {
            Some(sample) => {
                debug!(iteration, angle_rad = mid, drop_ft = sample.drop_ft, "zero search");
                if sample.drop_ft > 0.0 {
                    high = mid;
                } else {
                    low = mid;
                }
            }
            None => {
                debug!(iteration, angle_rad = mid, "zero search: no sample at zero range");
                missed += 1;
                low = mid;
            }
        }
    }

    let angle = 0.5 * (low + high);
    if iterations > 0 && missed == iterations {
        warn!(
            projectile = %projectile.name,
            zero_range_ft = sight.zero_range_ft,
            time_step_s = search.time_step_s,
            "no candidate sampled near the zero range; angle is the upper bound"
        );
    }
    debug!(
        projectile = %projectile.name,
        iterations,
        angle_rad = angle,
        angle_deg = angle.to_degrees(),
        "zero angle found"
    );
    angle
}
