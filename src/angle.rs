//! # Angles with an explicit domain
//!
//! [`Angle`] is a thin newtype over radians. Every constructor states the domain the
//! value is normalized to, so that angles leaving this module are always in a known range:
//!
//! | Constructor            | Domain              | Typical use                         |
//! |------------------------|---------------------|-------------------------------------|
//! | [`Angle::wrapped`]     | `[0, 2π)`           | right ascension, azimuth, LST       |
//! | [`Angle::signed`]      | `(−π, π]`           | hour angle, longitude, parallactic  |
//! | [`Angle::latitude`]    | `[−π/2, π/2]` (checked) | declination, geodetic latitude  |
//!
//! Arithmetic is done on raw `f64` radians; re-wrap the result with the constructor
//! matching the expected domain. The unit constructors [`Angle::from_radians`],
//! [`Angle::from_degrees`] and [`Angle::from_hours`] keep the value as given.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Hour, Radian, DPI, RADEG, RADH};
use crate::obsplan_errors::ObsPlanError;

/// Principal value of an angle in `[0, 2π)`.
pub fn principal_angle(a: Radian) -> Radian {
    let r = a.rem_euclid(DPI);
    // rem_euclid may round up to exactly 2π for tiny negative inputs
    if r >= DPI {
        0.0
    } else {
        r
    }
}

/// Principal value of an angle in `(−π, π]`.
pub fn signed_angle(a: Radian) -> Radian {
    let r = principal_angle(a);
    if r > PI {
        r - DPI
    } else {
        r
    }
}

/// An angle stored in radians.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Angle(Radian);

impl Angle {
    /// Zero angle.
    pub const ZERO: Angle = Angle(0.0);

    /// Angle normalized to `[0, 2π)`.
    pub fn wrapped(rad: Radian) -> Self {
        Angle(principal_angle(rad))
    }

    /// Angle normalized to `(−π, π]`.
    pub fn signed(rad: Radian) -> Self {
        Angle(signed_angle(rad))
    }

    /// Latitude-like angle, rejected unless it lies in `[−π/2, π/2]`.
    ///
    /// Errors
    /// ----------
    /// * [`ObsPlanError::InvalidCoordinate`] if `rad` is not finite or out of range.
    pub fn latitude(rad: Radian) -> Result<Self, ObsPlanError> {
        if !rad.is_finite() {
            return Err(ObsPlanError::InvalidCoordinate(format!(
                "latitude-like angle is not finite: {rad}"
            )));
        }
        if rad.abs() > FRAC_PI_2 {
            return Err(ObsPlanError::InvalidCoordinate(format!(
                "latitude-like angle {:.6}° outside [-90°, 90°]",
                rad / RADEG
            )));
        }
        Ok(Angle(rad))
    }

    /// Checked variant of [`Angle::wrapped`] rejecting NaN and infinities.
    pub fn try_wrapped(rad: Radian) -> Result<Self, ObsPlanError> {
        if !rad.is_finite() {
            return Err(ObsPlanError::InvalidCoordinate(format!(
                "angle is not finite: {rad}"
            )));
        }
        Ok(Angle::wrapped(rad))
    }

    /// Checked variant of [`Angle::signed`] rejecting NaN and infinities.
    pub fn try_signed(rad: Radian) -> Result<Self, ObsPlanError> {
        if !rad.is_finite() {
            return Err(ObsPlanError::InvalidCoordinate(format!(
                "angle is not finite: {rad}"
            )));
        }
        Ok(Angle::signed(rad))
    }

    /// Angle from radians, kept as given.
    pub fn from_radians(rad: Radian) -> Self {
        Angle(rad)
    }

    pub fn from_degrees(deg: Degree) -> Self {
        Angle(deg * RADEG)
    }

    pub fn from_hours(hours: Hour) -> Self {
        Angle(hours * RADH)
    }

    pub fn radians(self) -> Radian {
        self.0
    }

    pub fn degrees(self) -> Degree {
        self.0 / RADEG
    }

    pub fn hours(self) -> Hour {
        self.0 / RADH
    }

    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    pub fn cos(self) -> f64 {
        self.0.cos()
    }

    pub fn tan(self) -> f64 {
        self.0.tan()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*}°", p, self.degrees()),
            None => write!(f, "{}°", self.degrees()),
        }
    }
}

#[cfg(test)]
mod angle_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_principal_angle() {
        assert_eq!(principal_angle(0.0), 0.0);
        assert_abs_diff_eq!(principal_angle(-PI / 2.0), 1.5 * PI, epsilon = 1e-15);
        assert_abs_diff_eq!(principal_angle(5.0 * PI), PI, epsilon = 1e-14);
        assert_eq!(principal_angle(DPI), 0.0);
        assert!(principal_angle(-1e-300) < DPI);
    }

    #[test]
    fn test_signed_angle() {
        assert_eq!(signed_angle(PI), PI);
        assert_abs_diff_eq!(signed_angle(-PI), PI, epsilon = 1e-15);
        assert_abs_diff_eq!(signed_angle(1.5 * PI), -0.5 * PI, epsilon = 1e-15);
        assert_abs_diff_eq!(signed_angle(-0.25), -0.25, epsilon = 1e-15);
    }

    #[test]
    fn test_latitude_domain() {
        assert!(Angle::latitude(FRAC_PI_2).is_ok());
        assert!(Angle::latitude(-FRAC_PI_2).is_ok());
        assert!(matches!(
            Angle::latitude(FRAC_PI_2 + 1e-9),
            Err(ObsPlanError::InvalidCoordinate(_))
        ));
        assert!(Angle::latitude(f64::NAN).is_err());
    }

    #[test]
    fn test_unit_conversions() {
        assert_abs_diff_eq!(Angle::from_hours(6.0).degrees(), 90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(Angle::from_degrees(180.0).radians(), PI, epsilon = 1e-15);
        assert_abs_diff_eq!(Angle::wrapped(PI).hours(), 12.0, epsilon = 1e-12);
        assert!(Angle::try_wrapped(f64::INFINITY).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{:.2}", Angle::from_degrees(32.5)), "32.50°");
    }
}
