//! # Ballistics Zero
//!
//! Point-mass trajectory solver for comparing rifle loads through a shared zero.
//!
//! The core is three pure functions working in feet, ft/s, seconds and radians:
//!
//! * [`simulate`] integrates a trajectory and samples it at fixed downrange intervals.
//! * [`find_zero_angle`] bisects for the launch angle that puts a load on the
//!   sightline at the zero range.
//! * [`find_equivalent_zero`] finds where a different load, fired at that
//!   angle, comes back down through the sightline.
//!
//! [`SessionConfig`] and [`build_report`] wrap these for the command-line tool.

// Re-export the main types and functions
pub use angle_calculations::{find_zero_angle, find_zero_angle_with, ZeroSearch};
pub use cli_api::{Environment, Projectile, SightSetup};
pub use config::{EnvironmentConfig, LoadConfig, RifleConfig, SessionConfig};
pub use drag_model::DragModel;
pub use error::BallisticsError;
pub use report::{build_report, LoadReport, ReportRow, SessionReport};
pub use trajectory_sampling::{
    find_crossings, find_equivalent_zero, find_equivalent_zero_with, Crossing, CrossingDirection,
};
pub use trajectory_solver::{
    simulate, IntegrationMethod, SimulationSettings, SimulationState, TrajectorySample,
};

// Module declarations
mod drag_model;
pub mod cli_api;
pub mod constants;
pub mod drag;
pub mod atmosphere;
mod error;
mod trajectory_solver;
mod trajectory_sampling;
mod angle_calculations;
pub mod units;
pub mod config;
pub mod report;
