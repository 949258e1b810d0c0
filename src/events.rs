//! # Solar events and the night window
//!
//! Sunset and sunrise are the instants at which the solar altitude crosses a threshold
//! (0° by default). They are found in two stages:
//!
//! 1. **Bracketing.** The altitude is evaluated on a coarse forward grid (10 min by default)
//!    covering the search horizon (24 h by default). The first pair of consecutive samples
//!    whose signs (relative to the threshold) change in the requested [`Direction`] brackets
//!    the event.
//! 2. **Refinement.** Brent's method ([`roots::find_root_brent`]) narrows the bracket down
//!    to the configured tolerance (1 s by default) within a bounded number of iterations.
//!
//! A grid sample lying exactly on the threshold is the event only if the following sample
//! continues in the requested direction, so a grazing contact is not reported as a crossing.
//!
//! When no bracket exists within the horizon (polar day or polar night) the solver returns
//! [`ObsPlanError::NoCrossingFound`]. It never falls back to an approximate instant.
use std::fmt;

use hifitime::{Duration, Epoch, Unit};
use itertools::Itertools;
use log::{debug, info};
use roots::{find_root_brent, SimpleConvergency};
use serde::{Deserialize, Serialize};

use crate::config::{PlannerConfig, SolverConfig};
use crate::constants::Radian;
use crate::obsplan_errors::ObsPlanError;
use crate::observers::Observer;
use crate::sun::sun_altitude;
use crate::time::{hhmm, iso_utc, serialize_epoch};

/// Sense of a threshold crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// From above to below the threshold (setting).
    Falling,
    /// From below to above the threshold (rising).
    Rising,
}

impl Direction {
    /// Whether a value `g` relative to the threshold lies on the "after" side of a crossing.
    fn is_past(self, g: f64) -> bool {
        match self {
            Direction::Falling => g < 0.0,
            Direction::Rising => g > 0.0,
        }
    }

    /// Whether a value `g` relative to the threshold lies on the "before" side of a crossing.
    fn is_before(self, g: f64) -> bool {
        match self {
            Direction::Falling => g > 0.0,
            Direction::Rising => g < 0.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Falling => write!(f, "falling"),
            Direction::Rising => write!(f, "rising"),
        }
    }
}

/// First instant after `start` where `altitude(t)` crosses `threshold` in `direction`.
///
/// Arguments
/// -----------------
/// * `altitude`: Altitude of the body as a function of time, in radians.
/// * `start`: Beginning of the forward search.
/// * `direction`: [`Direction::Falling`] for a setting, [`Direction::Rising`] for a rising.
/// * `threshold`: Altitude defining the event, in radians.
/// * `solver`: Grid step, horizon, tolerance and iteration bound.
///
/// Errors
/// ----------
/// * [`ObsPlanError::NoCrossingFound`] if no crossing is bracketed within the horizon.
/// * [`ObsPlanError::RootFindingError`] if the refinement does not converge.
pub fn find_altitude_crossing<F>(
    altitude: F,
    start: Epoch,
    direction: Direction,
    threshold: Radian,
    solver: &SolverConfig,
) -> Result<Epoch, ObsPlanError>
where
    F: Fn(Epoch) -> Radian,
{
    let step = solver.coarse_step();
    let n_steps = (solver.search_horizon().to_seconds() / step.to_seconds()).ceil() as usize;

    let grid = (0..=n_steps).map(|i| {
        let t = start + step * (i as f64);
        (t, altitude(t) - threshold)
    });

    let bracket = grid.tuple_windows().find_map(|((t0, g0), (t1, g1))| {
        if g0 == 0.0 && direction.is_past(g1) {
            Some((t0, t0))
        } else if direction.is_before(g0) && direction.is_past(g1) {
            Some((t0, t1))
        } else {
            None
        }
    });

    let Some((lower, upper)) = bracket else {
        debug!("no {direction} crossing in {n_steps} steps of {step} from {}", iso_utc(&start));
        return Err(ObsPlanError::NoCrossingFound {
            direction,
            start,
            horizon_hours: solver.search_horizon_hours,
        });
    };
    if lower == upper {
        return Ok(lower);
    }

    // Refine on the offset from the lower bound, in days
    let span_days = (upper - lower).to_unit(Unit::Day);
    let offset = |x: f64| lower + Unit::Day * x;
    let f = |x: f64| altitude(offset(x)) - threshold;

    let mut convergency = SimpleConvergency {
        eps: solver.tolerance_days(),
        max_iter: solver.max_iter,
    };
    let root = find_root_brent(0.0, span_days, &f, &mut convergency)?;
    let event = offset(root.clamp(0.0, span_days));

    debug!(
        "{direction} crossing bracketed in [{}, {}], refined to {}",
        iso_utc(&lower),
        iso_utc(&upper),
        iso_utc(&event)
    );
    Ok(event)
}

/// First crossing of the solar altitude through `threshold` after `start`, as seen by `observer`.
pub fn find_crossing(
    observer: &Observer,
    start: Epoch,
    direction: Direction,
    threshold: Radian,
    solver: &SolverConfig,
) -> Result<Epoch, ObsPlanError> {
    find_altitude_crossing(
        |t| sun_altitude(observer.at(t)),
        start,
        direction,
        threshold,
        solver,
    )
}

/// Interval between a sunset and the following sunrise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NightWindow {
    #[serde(serialize_with = "serialize_epoch")]
    start: Epoch,
    #[serde(serialize_with = "serialize_epoch")]
    end: Epoch,
}

impl NightWindow {
    /// Build a window, rejecting `start >= end`.
    pub fn new(start: Epoch, end: Epoch) -> Result<Self, ObsPlanError> {
        if start >= end {
            return Err(ObsPlanError::InvalidWindow { start, end });
        }
        Ok(NightWindow { start, end })
    }

    /// Sunset.
    pub fn start(&self) -> Epoch {
        self.start
    }

    /// Sunrise.
    pub fn end(&self) -> Epoch {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn contains(&self, epoch: &Epoch) -> bool {
        self.start <= *epoch && *epoch <= self.end
    }
}

impl fmt::Display for NightWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {} UTC ({:.2} h)",
            iso_utc(&self.start),
            hhmm(&self.end),
            self.duration().to_unit(Unit::Hour)
        )
    }
}

/// Approximate local noon of `date` (0h UTC of the calendar day) at an east-positive longitude.
pub fn local_noon(date: Epoch, observer: &Observer) -> Epoch {
    date + Unit::Hour * (12.0 - observer.longitude.hours())
}

/// The night starting on the evening of `date` at `observer`.
///
/// The sunset is the first setting of the Sun after local noon, the sunrise the first rising
/// after that sunset. Both use `cfg.horizon_altitude_deg` as threshold.
///
/// Errors
/// ----------
/// * [`ObsPlanError::NoCrossingFound`] when the Sun does not set or does not rise.
pub fn night_window(
    observer: &Observer,
    date: Epoch,
    cfg: &PlannerConfig,
) -> Result<NightWindow, ObsPlanError> {
    let threshold = cfg.horizon_altitude();
    let noon = local_noon(date, observer);

    let sunset = find_crossing(observer, noon, Direction::Falling, threshold, &cfg.solver)?;
    let sunrise = find_crossing(observer, sunset, Direction::Rising, threshold, &cfg.solver)?;

    let window = NightWindow::new(sunset, sunrise)?;
    info!("night window at {}: {window}", observer.label());
    Ok(window)
}

#[cfg(test)]
mod events_test {
    use super::*;
    use crate::constants::RADEG;
    use crate::time::parse_date;
    use approx::assert_abs_diff_eq;

    fn mount_graham() -> Observer {
        Observer::from_sexagesimal("-109:53:51.0", "32:41:56.9", 3221.0, None).unwrap()
    }

    fn seconds_between(a: Epoch, b: Epoch) -> f64 {
        (a - b).to_seconds().abs()
    }

    #[test]
    fn test_night_window_mount_graham() {
        let cfg = PlannerConfig::default();
        let date = parse_date("2020-06-21").unwrap();
        let window = night_window(&mount_graham(), date, &cfg).unwrap();

        let sunset = Epoch::from_gregorian_utc_hms(2020, 6, 22, 2, 26, 15);
        let sunrise = Epoch::from_gregorian_utc_hms(2020, 6, 22, 12, 17, 7);
        assert!(seconds_between(window.start(), sunset) < 60.0);
        assert!(seconds_between(window.end(), sunrise) < 60.0);

        assert!(window.start() < window.end());
        assert!(window.duration() < Unit::Hour * 12);
        assert!(window.contains(&(window.start() + Unit::Hour * 1)));

        // The solar altitude vanishes at both ends
        let site = mount_graham();
        assert_abs_diff_eq!(sun_altitude(site.at(window.start())), 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(sun_altitude(site.at(window.end())), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_twilight_threshold_narrows_the_night() {
        let date = parse_date("2020-06-21").unwrap();
        let civil = PlannerConfig {
            horizon_altitude_deg: -6.0,
            ..PlannerConfig::default()
        };
        let geometric = night_window(&mount_graham(), date, &PlannerConfig::default()).unwrap();
        let twilight = night_window(&mount_graham(), date, &civil).unwrap();

        assert!(twilight.start() > geometric.start());
        assert!(twilight.end() < geometric.end());
        let site = mount_graham();
        assert_abs_diff_eq!(
            sun_altitude(site.at(twilight.start())),
            -6.0 * RADEG,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_polar_day_has_no_sunset() {
        let svalbard = Observer::new(15.0, 78.0, 0.0, Some("Longyearbyen".into())).unwrap();
        let date = parse_date("2020-06-21").unwrap();
        let err = night_window(&svalbard, date, &PlannerConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ObsPlanError::NoCrossingFound {
                direction: Direction::Falling,
                ..
            }
        ));
    }

    #[test]
    fn test_polar_night_has_no_sunrise() {
        let svalbard = Observer::new(15.0, 78.0, 0.0, None).unwrap();
        let start = parse_date("2020-12-21").unwrap();
        let err = find_crossing(
            &svalbard,
            start,
            Direction::Rising,
            0.0,
            &SolverConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ObsPlanError::NoCrossingFound {
                direction: Direction::Rising,
                start,
                horizon_hours: 24.0
            }
        );
    }

    #[test]
    fn test_crossing_on_grid_point() {
        let start = parse_date("2021-01-01").unwrap();
        let solver = SolverConfig::default();
        // Linear altitude hitting zero exactly one grid step after start
        let step_days = solver.coarse_step().to_unit(Unit::Day);
        let linear = |t: Epoch| -> Radian { step_days - (t - start).to_unit(Unit::Day) };

        let event =
            find_altitude_crossing(linear, start, Direction::Falling, 0.0, &solver).unwrap();
        assert!(seconds_between(event, start + solver.coarse_step()) < 1.0);

        // Grazing contact: touches the threshold without crossing
        let grazing =
            |t: Epoch| -> Radian { (t - start).to_unit(Unit::Hour).powi(2) / 100.0 - 0.01 };
        assert!(find_altitude_crossing(grazing, start, Direction::Rising, 0.0, &solver).is_ok());
        let touch = |t: Epoch| -> Radian { ((t - start).to_unit(Unit::Hour) - 1.0).powi(2) };
        assert!(matches!(
            find_altitude_crossing(touch, start, Direction::Falling, 0.0, &solver),
            Err(ObsPlanError::NoCrossingFound { .. })
        ));
    }

    #[test]
    fn test_invalid_window() {
        let t = parse_date("2020-06-21").unwrap();
        assert_eq!(
            NightWindow::new(t, t),
            Err(ObsPlanError::InvalidWindow { start: t, end: t })
        );
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Falling.to_string(), "falling");
        assert_eq!(Direction::Rising.to_string(), "rising");
    }
}
