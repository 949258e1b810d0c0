//! # Equatorial → horizontal transform
//!
//! Converts the equatorial coordinates of a target into the local horizontal frame of an
//! observer, given the local sidereal time.
//!
//! ## Conventions
//!
//! - **Hour angle** `H = LST − α`, in `(−π, π]`, positive west of the meridian.
//! - **Altitude** in `[−π/2, π/2]`, positive above the horizon.
//! - **Azimuth** in `[0, 2π)`, measured from North, increasing toward East.
//! - **Parallactic angle** in `(−π, π]`, negative east of the meridian.
//!
//! No refraction, aberration or nutation correction is applied.
use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::angle::Angle;
use crate::constants::Radian;
use crate::observers::ObserverAt;
use crate::target::CelestialTarget;

/// Position of a target in the local horizontal frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalPosition {
    pub altitude: Angle,
    pub azimuth: Angle,
    pub hour_angle: Angle,
    pub parallactic_angle: Angle,
}

impl HorizontalPosition {
    pub fn zenith_distance(&self) -> Radian {
        zenith_distance(self.altitude.radians())
    }

    pub fn airmass(&self) -> f64 {
        airmass(self.altitude.radians())
    }
}

/// Horizontal position of `target` for an observer at `latitude`, at local sidereal time `lst`.
///
/// Arguments
/// -----------------
/// * `latitude`: Geodetic latitude of the observer.
/// * `target`: Target with equatorial coordinates of date.
/// * `lst`: Local sidereal time.
///
/// Return
/// ----------
/// * The [`HorizontalPosition`]. Near the zenith the azimuth and parallactic angle are
///   ill-conditioned but remain finite.
pub fn horizontal(latitude: Angle, target: &CelestialTarget, lst: Angle) -> HorizontalPosition {
    let hour_angle = Angle::signed(lst.radians() - target.ra.radians());

    let (sin_h, cos_h) = hour_angle.radians().sin_cos();
    let (sin_d, cos_d) = target.dec.radians().sin_cos();
    let (sin_l, cos_l) = latitude.radians().sin_cos();

    let sin_alt = (sin_d * sin_l + cos_d * cos_l * cos_h).clamp(-1.0, 1.0);
    let altitude = Angle::from_radians(sin_alt.asin());

    let azimuth = Angle::wrapped((-sin_h * cos_d).atan2(cos_l * sin_d - sin_l * cos_d * cos_h));

    let parallactic_angle = Angle::signed(sin_h.atan2(latitude.tan() * cos_d - sin_d * cos_h));

    HorizontalPosition {
        altitude,
        azimuth,
        hour_angle,
        parallactic_angle,
    }
}

/// Horizontal position of `target` for an observer bound to an instant.
pub fn horizontal_at(site: ObserverAt<'_>, target: &CelestialTarget) -> HorizontalPosition {
    horizontal(site.latitude(), target, site.local_sidereal_time())
}

/// Zenith distance `π/2 − altitude`.
pub fn zenith_distance(altitude: Radian) -> Radian {
    FRAC_PI_2 - altitude
}

/// Plane-parallel airmass `sec(z)`.
///
/// Negative below the horizon and unbounded at the horizon; callers filter on the sign.
pub fn airmass(altitude: Radian) -> f64 {
    1.0 / zenith_distance(altitude).cos()
}
