//! Zero comparison report: every load fired through the primary load's zero.

use serde::Serialize;
use tracing::info;

use crate::angle_calculations::{find_zero_angle_with, ZeroSearch};
use crate::config::SessionConfig;
use crate::error::BallisticsError;
use crate::trajectory_sampling::find_equivalent_zero_with;
use crate::trajectory_solver::{simulate, TrajectorySample};
use crate::units::{drop_moa, feet_to_inches, feet_to_yards, radians_to_degrees, radians_to_moa};
use crate::Projectile;

/// One line of a dope table, in yards, inches and MOA
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportRow {
    pub range_yd: f64,
    pub drop_in: f64,
    pub drop_moa: f64,
    pub windage_in: f64,
    pub velocity_fps: f64,
    pub time_s: f64,
}

impl From<&TrajectorySample> for ReportRow {
    fn from(sample: &TrajectorySample) -> Self {
        let range_yd = feet_to_yards(sample.downrange_ft);
        let drop_in = feet_to_inches(sample.drop_ft);
        Self {
            range_yd,
            drop_in,
            drop_moa: drop_moa(drop_in, range_yd),
            windage_in: feet_to_inches(sample.windage_ft),
            velocity_fps: sample.velocity_fps,
            time_s: sample.time_s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReport {
    pub projectile: Projectile,
    pub is_primary: bool,
    pub rows: Vec<ReportRow>,
    /// Where this load re-crosses the sightline; always `None` for the primary
    pub equivalent_zero_yd: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub zero_angle_rad: f64,
    pub zero_angle_deg: f64,
    pub zero_angle_moa: f64,
    pub loads: Vec<LoadReport>,
}

/// Zero the primary load, then run every load at that angle.
pub fn build_report(config: &SessionConfig) -> Result<SessionReport, BallisticsError> {
    config.validate()?;

    let sight = config.sight();
    let environment = config.environment();
    let settings = config.report_settings();
    let search = ZeroSearch {
        time_step_s: config.time_step_s,
        method: config.method,
        ..ZeroSearch::default()
    };

    let primary = config.primary.to_projectile();
    let zero_angle = find_zero_angle_with(&primary, &sight, &environment, &search);
    info!(
        primary = %primary.name,
        zero_yd = config.rifle.zero_distance_yd,
        angle_moa = radians_to_moa(zero_angle),
        "primary load zeroed"
    );

    let loads = config
        .loads()
        .enumerate()
        .map(|(i, load)| {
            let projectile = load.to_projectile();
            let is_primary = i == 0;

            let samples = simulate(
                &projectile,
                zero_angle,
                &sight,
                &environment,
                environment.crosswind_fps,
                &settings,
            );
            let rows = samples.iter().map(ReportRow::from).collect();

            let equivalent_zero_yd = if is_primary {
                None
            } else {
                find_equivalent_zero_with(&projectile, zero_angle, &sight, &environment, &settings)
                    .map(feet_to_yards)
            };

            info!(load = %projectile.name, ?equivalent_zero_yd, "load evaluated");
            LoadReport {
                projectile,
                is_primary,
                rows,
                equivalent_zero_yd,
            }
        })
        .collect();

    Ok(SessionReport {
        zero_angle_rad: zero_angle,
        zero_angle_deg: radians_to_degrees(zero_angle),
        zero_angle_moa: radians_to_moa(zero_angle),
        loads,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_FLIGHT_TIME_S;
    use crate::{DragModel, LoadConfig};

    fn row_near(rows: &[ReportRow], range_yd: f64) -> ReportRow {
        *rows
            .iter()
            .find(|r| (r.range_yd - range_yd).abs() < 1.0)
            .unwrap_or_else(|| panic!("no row at {range_yd} yd"))
    }

    #[test]
    fn test_row_conversion() {
        let sample = TrajectorySample {
            downrange_ft: 600.0,
            drop_ft: -0.5,
            windage_ft: 0.25,
            velocity_fps: 2400.0,
            time_s: 0.24,
        };
        let row = ReportRow::from(&sample);
        assert_eq!(row.range_yd, 200.0);
        assert_eq!(row.drop_in, -6.0);
        assert!((row.drop_moa + 6.0 / 2.094).abs() < 1e-12);
        assert_eq!(row.windage_in, 3.0);
    }

    #[test]
    fn test_default_session_report() {
        let report = build_report(&SessionConfig::default()).unwrap();

        assert!((report.zero_angle_rad - 0.000691).abs() < 2e-6);
        assert!((report.zero_angle_moa - 2.376).abs() < 0.01, "{}", report.zero_angle_moa);
        assert_eq!(report.loads.len(), 5);
        assert!(report.loads[0].is_primary);
        assert!(report.loads[1..].iter().all(|l| !l.is_primary));

        let primary = &report.loads[0];
        assert_eq!(primary.equivalent_zero_yd, None);
        assert_eq!(primary.rows.len(), 11);
        assert_eq!(primary.rows[0].drop_moa, 0.0);
        assert!(row_near(&primary.rows, 100.0).drop_in.abs() < 0.05);
        assert!(row_near(&primary.rows, 300.0).drop_in < 0.0);
        assert!((row_near(&primary.rows, 300.0).windage_in - 9.26).abs() < 0.15);

        let last = row_near(&primary.rows, 1000.0);
        assert!((last.drop_in / 12.0 + 50.95).abs() < 0.5, "drop at 1000 yd: {} in", last.drop_in);
        assert!((last.velocity_fps - 768.0).abs() < 5.0);
    }

    #[test]
    fn test_secondary_equivalent_zeros() {
        let report = build_report(&SessionConfig::default()).unwrap();
        let expected = [137.38, 157.14, 129.69, 90.37];

        for (load, want) in report.loads[1..].iter().zip(expected) {
            let got = load.equivalent_zero_yd.expect("every stock secondary re-crosses");
            assert!((got - want).abs() < 0.5, "{}: {got} yd, expected {want}", load.projectile.name);
        }
    }

    #[test]
    fn test_stalled_secondary_finishes() {
        let mut config = SessionConfig::default();
        config.secondary = vec![LoadConfig::new("subsonic", 175.0, 0.254, DragModel::G7, 150.0)];
        let report = build_report(&config).unwrap();

        let stalled = &report.loads[1];
        assert!(stalled.equivalent_zero_yd.is_none());
        let last = stalled.rows.last().unwrap();
        assert!(last.range_yd < 1000.0);
        assert!(last.time_s <= MAX_FLIGHT_TIME_S);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SessionConfig::default();
        config.primary.mv_fps = 0.0;
        assert!(build_report(&config).is_err());
    }

    #[test]
    fn test_report_serializes() {
        let mut config = SessionConfig::default();
        config.secondary.truncate(1);
        let report = build_report(&config).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["loads"].as_array().unwrap().len(), 2);
        assert_eq!(json["loads"][0]["projectile"]["drag_model"], "G7");
        assert!(json["loads"][0]["equivalent_zero_yd"].is_null());
        assert!(json["loads"][1]["equivalent_zero_yd"].is_number());
    }
}
