use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::CROSSING_RESOLUTION_FT;
use crate::trajectory_solver::{simulate, SimulationSettings, TrajectorySample};
use crate::{Environment, Projectile, SightSetup};

/// Which way the trajectory passes through the sightline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossingDirection {
    /// Below the sightline to above it (the near zero)
    Upward,
    /// Above the sightline to below it (the far zero)
    Downward,
}

/// A point where the trajectory meets the sightline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crossing {
    pub downrange_ft: f64,
    pub direction: CrossingDirection,
}

/// Find every sightline crossing in a sampled trajectory.
///
/// A crossing is a consecutive pair whose drops have strictly opposite
/// signs; its distance is linearly interpolated between the pair. A sample
/// lying exactly on the sightline does not count on its own.
pub fn find_crossings(samples: &[TrajectorySample]) -> Vec<Crossing> {
    samples
        .windows(2)
        .filter_map(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            let (d1, d2) = (a.drop_ft, b.drop_ft);
            if d1 * d2 >= 0.0 {
                return None;
            }

            let fraction = d1.abs() / (d1.abs() + d2.abs());
            let downrange_ft = a.downrange_ft + fraction * (b.downrange_ft - a.downrange_ft);
            let direction = if d1 < 0.0 {
                CrossingDirection::Upward
            } else {
                CrossingDirection::Downward
            };

            debug!(downrange_ft, ?direction, "sightline crossing");
            Some(Crossing { downrange_ft, direction })
        })
        .collect()
}

/// Distance (ft) at which a load fired at another load's zero angle comes
/// back down through the sightline.
///
/// The trajectory is sampled every yard without wind. Returns the first
/// downward crossing, or `None` when the bullet never drops through the
/// sightline from above before `max_range_ft`.
pub fn find_equivalent_zero(
    projectile: &Projectile,
    launch_angle_rad: f64,
    sight: &SightSetup,
    environment: &Environment,
    max_range_ft: f64,
) -> Option<f64> {
    find_equivalent_zero_with(
        projectile,
        launch_angle_rad,
        sight,
        environment,
        &SimulationSettings::new(max_range_ft),
    )
}

/// As [`find_equivalent_zero`], with the range, time step and integration
/// method taken from `settings`. The sample interval is always one yard.
pub fn find_equivalent_zero_with(
    projectile: &Projectile,
    launch_angle_rad: f64,
    sight: &SightSetup,
    environment: &Environment,
    settings: &SimulationSettings,
) -> Option<f64> {
    let settings = settings.with_sample_interval(CROSSING_RESOLUTION_FT);
    let samples = simulate(projectile, launch_angle_rad, sight, environment, 0.0, &settings);

    find_crossings(&samples)
        .into_iter()
        .find(|c| c.direction == CrossingDirection::Downward)
        .map(|c| c.downrange_ft)
}
