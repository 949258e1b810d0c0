//! # Low-precision solar position
//!
//! Apparent geocentric right ascension and declination of the Sun from the low-precision
//! formulae of the *Astronomical Almanac* (section C, "Low precision formulas for the Sun").
//! With `n = JD − 2451545.0`:
//!
//! ```text
//! L = 280.460° + 0.9856474° n            mean longitude
//! g = 357.528° + 0.9856003° n            mean anomaly
//! λ = L + 1.915° sin g + 0.020° sin 2g   ecliptic longitude (β = 0)
//! ε = 23.439° − 0.0000004° n             obliquity of the ecliptic
//! ```
//!
//! The ecliptic direction is then rotated about the equinox axis by `ε`.
//!
//! Accuracy is about 0.01° in both coordinates between 1950 and 2050, which moves sunset
//! and sunrise by a few seconds of time at mid latitudes.
use hifitime::Epoch;

use crate::angle::{principal_angle, Angle};
use crate::constants::{Radian, JD2000, JDTOMJD, RADEG};
use crate::horizontal::horizontal;
use crate::observers::ObserverAt;
use crate::ref_system::ecliptic_to_equatorial;
use crate::target::CelestialTarget;
use crate::time::mjd_utc;

/// Mean ecliptic longitude, mean anomaly and obliquity of date, in radians.
fn solar_elements(n: f64) -> (Radian, Radian, Radian) {
    let l = principal_angle((280.460 + 0.985_647_4 * n) * RADEG);
    let g = principal_angle((357.528 + 0.985_600_3 * n) * RADEG);
    let eps = (23.439 - 0.000_000_4 * n) * RADEG;
    (l, g, eps)
}

/// Geocentric right ascension and declination of the Sun at `epoch`.
///
/// Return
/// ----------
/// * `(ra, dec)`, `ra` in `[0, 2π)` and `dec` in radians.
pub fn sun_radec(epoch: &Epoch) -> (Angle, Radian) {
    let n = mjd_utc(epoch) + JDTOMJD - JD2000;
    let (l, g, eps) = solar_elements(n);

    let lambda = l + (1.915 * g.sin() + 0.020 * (2.0 * g).sin()) * RADEG;

    ecliptic_to_equatorial(lambda, 0.0, eps)
}

/// The Sun as a [`CelestialTarget`] at `epoch`.
pub fn sun_target(epoch: &Epoch) -> CelestialTarget {
    let (ra, dec) = sun_radec(epoch);
    CelestialTarget {
        name: "Sun".to_string(),
        ra,
        dec: Angle::from_radians(dec),
        magnitude: -26.74,
    }
}

/// Altitude of the Sun above the observer's horizon, in radians.
pub fn sun_altitude(site: ObserverAt<'_>) -> Radian {
    let sun = sun_target(&site.epoch);
    horizontal(site.latitude(), &sun, site.local_sidereal_time())
        .altitude
        .radians()
}

#[cfg(test)]
mod sun_test {
    use super::*;
    use crate::observers::Observer;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_june_solstice() {
        let epoch = Epoch::from_gregorian_utc_hms(2020, 6, 20, 21, 44, 0);
        let (ra, dec) = sun_radec(&epoch);
        assert_abs_diff_eq!(dec / RADEG, 23.44, epsilon = 0.01);
        assert_abs_diff_eq!(ra.degrees(), 90.0, epsilon = 0.05);
    }

    #[test]
    fn test_march_equinox() {
        let epoch = Epoch::from_gregorian_utc_hms(2020, 3, 20, 3, 50, 0);
        let (ra, dec) = sun_radec(&epoch);
        assert_abs_diff_eq!(dec / RADEG, 0.0, epsilon = 0.02);
        let ra_deg = ra.degrees();
        assert!(ra_deg < 0.05 || ra_deg > 359.95);
    }

    #[test]
    fn test_sun_altitude_day_and_night() {
        let lbt = Observer::from_sexagesimal("-109:53:51.0", "32:41:56.9", 3221.0, None).unwrap();

        // Local noon in Arizona is about 19h20 UTC
        let noon = Epoch::from_gregorian_utc_hms(2020, 6, 21, 19, 20, 0);
        assert_abs_diff_eq!(sun_altitude(lbt.at(noon)) / RADEG, 90.0 - 32.7 + 23.44, epsilon = 0.5);

        let midnight = Epoch::from_gregorian_utc_hms(2020, 6, 22, 7, 20, 0);
        assert!(sun_altitude(lbt.at(midnight)) < 0.0);
    }
}
