//! Conversions between the solver's feet/seconds/radians and the units
//! shooters read off a dope card: yards, inches, mph and MOA.
//!
//! Drops are in shooter's MOA (1.047 in per 100 yd), the way turrets are
//! usually marked. Launch angles are in true MOA (1/60 degree).

use crate::constants::{FEET_PER_YARD, INCHES_PER_FOOT, MOA_INCHES_PER_100_YARDS, MPH_TO_FPS};

/// Minutes of angle in one radian
const MOA_PER_RADIAN: f64 = 10800.0 / std::f64::consts::PI;

#[inline]
pub fn feet_to_yards(feet: f64) -> f64 {
    feet / FEET_PER_YARD
}

#[inline]
pub fn yards_to_feet(yards: f64) -> f64 {
    yards * FEET_PER_YARD
}

#[inline]
pub fn feet_to_inches(feet: f64) -> f64 {
    feet * INCHES_PER_FOOT
}

#[inline]
pub fn inches_to_feet(inches: f64) -> f64 {
    inches / INCHES_PER_FOOT
}

#[inline]
pub fn mph_to_fps(mph: f64) -> f64 {
    mph * MPH_TO_FPS
}

/// Drop at a range expressed in shooter's MOA (1.047" per 100 yd).
///
/// Zero at the muzzle, where the angle is undefined.
pub fn drop_moa(drop_in: f64, range_yd: f64) -> f64 {
    if range_yd > 0.0 {
        drop_in / (range_yd * MOA_INCHES_PER_100_YARDS / 100.0)
    } else {
        0.0
    }
}

/// True minutes of angle
#[inline]
pub fn radians_to_moa(radians: f64) -> f64 {
    radians * MOA_PER_RADIAN
}

#[inline]
pub fn moa_to_radians(moa: f64) -> f64 {
    moa / MOA_PER_RADIAN
}

#[inline]
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_conversions() {
        assert_eq!(feet_to_yards(300.0), 100.0);
        assert_eq!(yards_to_feet(1001.0), 3003.0);
        assert_eq!(feet_to_inches(1.5), 18.0);
        assert!((inches_to_feet(1.9) - 0.158333).abs() < 1e-6);
    }

    #[test]
    fn test_wind_conversion() {
        assert!((mph_to_fps(10.0) - 14.6667).abs() < 1e-4);
        assert!((mph_to_fps(60.0) - 88.0).abs() < 1e-12);
    }

    #[test]
    fn test_drop_moa() {
        // 1.047" at 100 yd is exactly one MOA
        assert!((drop_moa(1.047, 100.0) - 1.0).abs() < 1e-12);
        assert!((drop_moa(-20.94, 200.0) + 10.0).abs() < 1e-9);
        assert_eq!(drop_moa(-1.9, 0.0), 0.0);
    }

    #[test]
    fn test_angle_conversions() {
        assert!((radians_to_moa(std::f64::consts::PI / 10800.0) - 1.0).abs() < 1e-12);
        assert!((moa_to_radians(radians_to_moa(0.000691)) - 0.000691).abs() < 1e-15);
        assert!((radians_to_degrees(std::f64::consts::PI) - 180.0).abs() < 1e-12);
    }
}
