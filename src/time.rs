use hifitime::{Duration, Epoch, Unit};
use serde::Serializer;

use crate::angle::{principal_angle, Angle};
use crate::constants::{DAYS_PER_JULIAN_CENTURY, DPI, MJD, SECONDS_PER_DAY, SIDEREAL_RATE, T2000};
use crate::obsplan_errors::ObsPlanError;

/// Build a [`Duration`] from a (possibly fractional) number of seconds.
pub fn seconds(value: f64) -> Duration {
    Unit::Second * value
}

/// Parse a calendar date `YYYY-MM-DD` (or `YYYY/MM/DD`) into the epoch of 0h UTC on that day.
///
/// Errors
/// ------
/// * [`ObsPlanError::InvalidDate`] if the string is malformed or the date does not exist.
pub fn parse_date(date: &str) -> Result<Epoch, ObsPlanError> {
    let invalid = || ObsPlanError::InvalidDate(date.to_string());

    let parts: Vec<&str> = date.trim().split(&['-', '/'][..]).collect();
    if parts.len() != 3 {
        return Err(invalid());
    }
    let year: i32 = parts[0].parse().map_err(|_| invalid())?;
    let month: u8 = parts[1].parse().map_err(|_| invalid())?;
    let day: u8 = parts[2].parse().map_err(|_| invalid())?;

    Epoch::maybe_from_gregorian_utc(year, month, day, 0, 0, 0, 0).map_err(|_| invalid())
}

/// 0h UTC of the current day.
pub fn today() -> Result<Epoch, ObsPlanError> {
    let now = Epoch::now()?;
    let (y, m, d, ..) = now.to_gregorian_utc();
    Ok(Epoch::from_gregorian_utc_at_midnight(y, m, d))
}

/// Calendar date of an epoch (UTC) as `YYYY-MM-DD`.
pub fn date_string(epoch: &Epoch) -> String {
    let (y, m, d, ..) = epoch.to_gregorian_utc();
    format!("{y:04}-{m:02}-{d:02}")
}

/// `HH:MM` label of an epoch (UTC), seconds truncated.
pub fn hhmm(epoch: &Epoch) -> String {
    let (_, _, _, h, min, ..) = epoch.to_gregorian_utc();
    format!("{h:02}:{min:02}")
}

/// ISO-8601 rendering of an epoch on the UTC scale, `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub fn iso_utc(epoch: &Epoch) -> String {
    let (y, m, d, h, min, s, ns) = epoch.to_gregorian_utc();
    format!(
        "{y:04}-{m:02}-{d:02}T{h:02}:{min:02}:{s:02}.{:03}Z",
        ns / 1_000_000
    )
}

/// Serde helper writing an epoch as an [`iso_utc`] string.
pub fn serialize_epoch<S: Serializer>(epoch: &Epoch, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&iso_utc(epoch))
}

/// Truncate an epoch to the top of its UTC hour.
pub fn floor_to_hour(epoch: &Epoch) -> Epoch {
    let (y, m, d, h, ..) = epoch.to_gregorian_utc();
    Epoch::from_gregorian_utc(y, m, d, h, 0, 0, 0)
}

/// Modified Julian Date (UTC) of an epoch.
pub fn mjd_utc(epoch: &Epoch) -> MJD {
    epoch.to_mjd_utc_days()
}

/// `n` evenly spaced epochs from `start` to `end`, both included.
///
/// Return
/// ------
/// * an empty vector for `n == 0`, `[start]` for `n == 1`
pub fn linspace(start: Epoch, end: Epoch, n: usize) -> Vec<Epoch> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let span = end - start;
            let last = (n - 1) as f64;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        end
                    } else {
                        start + span * (i as f64 / last)
                    }
                })
                .collect()
        }
    }
}

/// Epochs from `start` to `end` (included when reached exactly) in steps of `step`.
pub fn step_range(start: Epoch, end: Epoch, step: Duration) -> Vec<Epoch> {
    let span = (end - start).to_seconds();
    let step_s = step.to_seconds();
    if span < 0.0 || step_s <= 0.0 {
        return Vec::new();
    }
    let count = (span / step_s).floor() as usize;
    (0..=count).map(|i| start + step * (i as f64)).collect()
}

/// Greenwich mean sidereal time at `tjm` (MJD, read as UT1), in radians within `[0, 2π)`.
///
/// IAU 1982 cubic for the sidereal time at 0h, plus the sidereal angle swept since
/// midnight. Agrees with the ERA-based IAU 2006 GMST to better than 0.1" over the
/// 20th and 21st centuries (Explanatory Supplement, 1992).
pub fn gmst(tjm: MJD) -> f64 {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Integer MJD is 0h UT1; centuries counted from J2000.0
    let itjm = tjm.floor();
    let t = (itjm - T2000) / DAYS_PER_JULIAN_CENTURY;

    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) * DPI / SECONDS_PER_DAY;

    // Sidereal angle swept during the elapsed fraction of the solar day
    let h = (tjm - itjm) * DPI;

    principal_angle(gmst0 + h * SIDEREAL_RATE)
}

/// Local mean sidereal time at `epoch` for an east-positive `longitude`, in `[0, 2π)`.
///
/// UT1 is approximated by UTC. Since |UT1 − UTC| < 0.9 s this shifts the sidereal
/// angle by at most ~13.5".
pub fn local_sidereal_time(epoch: &Epoch, longitude: Angle) -> Angle {
    Angle::wrapped(gmst(mjd_utc(epoch)) + longitude.radians())
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_parse_date() {
        let epoch = parse_date("2020-06-21").unwrap();
        assert_eq!(mjd_utc(&epoch), 59021.0);
        assert_eq!(date_string(&epoch), "2020-06-21");

        assert_eq!(parse_date("2021/01/01").unwrap(), parse_date("2021-01-01").unwrap());
        assert!(matches!(parse_date("2020-13-01"), Err(ObsPlanError::InvalidDate(_))));
        assert!(parse_date("2020-02-30").is_err());
        assert!(parse_date("yesterday").is_err());
    }

    #[test]
    fn test_gmst() {
        let tut = 57028.478514610404;
        assert_abs_diff_eq!(gmst(tut), 4.851925725092499, epsilon = 1e-12);

        assert_abs_diff_eq!(gmst(T2000), 4.894961212789145, epsilon = 1e-12);
    }

    #[test]
    fn test_local_sidereal_time() {
        let epoch = Epoch::from_mjd_utc(T2000);
        let lst = local_sidereal_time(&epoch, Angle::from_degrees(-90.0));
        assert_abs_diff_eq!(lst.degrees(), 280.46061837 - 90.0, epsilon = 1e-6);

        let lst = local_sidereal_time(&epoch, Angle::from_degrees(90.0));
        assert_abs_diff_eq!(lst.degrees(), 280.46061837 + 90.0 - 360.0, epsilon = 1e-6);
    }

    #[test]
    fn test_linspace() {
        let start = parse_date("2020-06-21").unwrap();
        let end = start + Unit::Hour * 10;
        let grid = linspace(start, end, 11);
        assert_eq!(grid.len(), 11);
        assert_eq!(grid[0], start);
        assert_eq!(grid[10], end);
        assert_abs_diff_eq!((grid[5] - start).to_seconds(), 5.0 * 3600.0, epsilon = 1e-6);
        assert!(grid.windows(2).all(|w| w[0] < w[1]));

        assert!(linspace(start, end, 0).is_empty());
        assert_eq!(linspace(start, end, 1), vec![start]);
    }

    #[test]
    fn test_step_range_and_floor() {
        let start = Epoch::from_gregorian_utc(2020, 6, 21, 2, 37, 12, 0);
        assert_eq!(floor_to_hour(&start), Epoch::from_gregorian_utc_hms(2020, 6, 21, 2, 0, 0));
        assert_eq!(hhmm(&start), "02:37");

        let end = start + Unit::Minute * 10;
        let steps = step_range(start, end, Unit::Minute * 1);
        assert_eq!(steps.len(), 11);
        assert_eq!(*steps.last().unwrap(), end);
        assert!(step_range(end, start, Unit::Minute * 1).is_empty());
    }

    #[test]
    fn test_iso_utc() {
        let epoch = Epoch::from_gregorian_utc(2020, 6, 21, 7, 5, 9, 250_000_000);
        assert_eq!(iso_utc(&epoch), "2020-06-21T07:05:09.250Z");
    }
}
