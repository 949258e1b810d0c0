//! # Visibility sampler
//!
//! Turns a [`NightWindow`] into filtered time series of the target's horizontal position:
//!
//! | Series                 | Instants                                 | Filter               |
//! |------------------------|------------------------------------------|----------------------|
//! | [`airmass_series`]     | `n_samples` evenly spaced over the night | `0 < airmass < max`  |
//! | [`parallactic_series`] | `n_samples` evenly spaced over the night | `0 < airmass < max`  |
//! | [`altaz_track`]        | fixed step, hour of sunset to sunrise    | zenith dist. `< 90°` |
//!
//! The track starts at the top of the UTC hour containing sunset, so it can begin up to one
//! hour before the window does. An empty series is a valid result (the target never rises,
//! or never climbs above the airmass cut) and is not an error.
//!
//! Every instant is evaluated independently from the immutable observer and target. With the
//! `parallel` feature the evaluation runs on the rayon thread pool; the output order is the
//! time order in both cases.
use std::f64::consts::FRAC_PI_2;
use std::fmt;

use hifitime::{Duration, Epoch};
use log::{debug, warn};
use serde::Serialize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::angle::Angle;
use crate::config::{MAX_SAMPLE_COUNT, MIN_TRACK_STEP_SECONDS};
use crate::constants::{Radian, RADEG};
use crate::events::NightWindow;
use crate::horizontal::{horizontal_at, zenith_distance};
use crate::obsplan_errors::ObsPlanError;
use crate::observers::Observer;
use crate::target::CelestialTarget;
use crate::time::{floor_to_hour, hhmm, linspace, serialize_epoch, step_range};

/// Quantity a [`Series`] was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeriesKind {
    Airmass,
    ParallacticAngle,
    AltAzTrack,
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKind::Airmass => write!(f, "Airmass"),
            SeriesKind::ParallacticAngle => write!(f, "Parallactic angle"),
            SeriesKind::AltAzTrack => write!(f, "Az/Alt track"),
        }
    }
}

/// Which samples are kept in a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum VisibilityFilter {
    /// Keep `0 < airmass < max`.
    Airmass { max: f64 },
    /// Keep zenith distance `< π/2`.
    AboveHorizon,
}

impl VisibilityFilter {
    pub fn accepts(&self, sample: &Sample) -> bool {
        match *self {
            VisibilityFilter::Airmass { max } => sample.airmass > 0.0 && sample.airmass < max,
            VisibilityFilter::AboveHorizon => sample.zenith_distance() < FRAC_PI_2,
        }
    }
}

/// Position of the target at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    #[serde(serialize_with = "serialize_epoch")]
    pub time: Epoch,
    pub altitude: Angle,
    pub azimuth: Angle,
    pub airmass: f64,
    pub parallactic_angle: Angle,
}

impl Sample {
    /// Evaluate the horizontal position of `target` seen by `observer` at `time`.
    pub fn evaluate(observer: &Observer, target: &CelestialTarget, time: Epoch) -> Sample {
        let pos = horizontal_at(observer.at(time), target);
        Sample {
            time,
            altitude: pos.altitude,
            azimuth: pos.azimuth,
            airmass: pos.airmass(),
            parallactic_angle: pos.parallactic_angle,
        }
    }

    pub fn zenith_distance(&self) -> Radian {
        zenith_distance(self.altitude.radians())
    }

    /// `HH:MM` (UTC) annotation of the sample.
    pub fn time_label(&self) -> String {
        hhmm(&self.time)
    }
}

/// An ordered, time-ascending sequence of [`Sample`]s for one target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub kind: SeriesKind,
    pub target_name: String,
    samples: Vec<Sample>,
}

impl Series {
    pub fn new(kind: SeriesKind, target_name: impl Into<String>, samples: Vec<Sample>) -> Self {
        Series {
            kind,
            target_name: target_name.into(),
            samples,
        }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// The sample closest to the zenith; the earliest one on ties. `None` when empty.
    pub fn min_zenith_distance(&self) -> Option<&Sample> {
        self.samples
            .iter()
            .min_by(|a, b| a.zenith_distance().total_cmp(&b.zenith_distance()))
    }

    /// Instants of the samples.
    pub fn times(&self) -> Vec<Epoch> {
        self.samples.iter().map(|s| s.time).collect()
    }

    /// The plotted quantity of each sample: airmass, parallactic angle in degrees, or
    /// zenith distance in degrees for the track.
    pub fn values(&self) -> Vec<f64> {
        self.samples
            .iter()
            .map(|s| match self.kind {
                SeriesKind::Airmass => s.airmass,
                SeriesKind::ParallacticAngle => s.parallactic_angle.degrees(),
                SeriesKind::AltAzTrack => s.zenith_distance() / RADEG,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(feature = "parallel")]
fn evaluate_all(observer: &Observer, target: &CelestialTarget, times: &[Epoch]) -> Vec<Sample> {
    times
        .par_iter()
        .map(|&t| Sample::evaluate(observer, target, t))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_all(observer: &Observer, target: &CelestialTarget, times: &[Epoch]) -> Vec<Sample> {
    times
        .iter()
        .map(|&t| Sample::evaluate(observer, target, t))
        .collect()
}

fn filtered_series(
    observer: &Observer,
    target: &CelestialTarget,
    times: &[Epoch],
    filter: VisibilityFilter,
    kind: SeriesKind,
) -> Series {
    let samples: Vec<Sample> = evaluate_all(observer, target, times)
        .into_iter()
        .filter(|s| filter.accepts(s))
        .collect();

    debug!(
        "{kind} series of {}: kept {} of {} instants",
        target.name,
        samples.len(),
        times.len()
    );
    if samples.is_empty() {
        warn!(
            "{kind} series of {} is empty: target not visible from {}",
            target.name,
            observer.label()
        );
    }
    Series::new(kind, target.name.clone(), samples)
}

/// Sample `target` at `n_samples` evenly spaced instants over `window`, both ends included.
///
/// Errors
/// ----------
/// * [`ObsPlanError::InvalidSampleCount`] if `n_samples` is below 2 or above
///   [`MAX_SAMPLE_COUNT`].
pub fn sample_series(
    observer: &Observer,
    target: &CelestialTarget,
    window: &NightWindow,
    n_samples: usize,
    filter: VisibilityFilter,
    kind: SeriesKind,
) -> Result<Series, ObsPlanError> {
    if !(2..=MAX_SAMPLE_COUNT).contains(&n_samples) {
        return Err(ObsPlanError::InvalidSampleCount(n_samples));
    }
    let times = linspace(window.start(), window.end(), n_samples);
    Ok(filtered_series(observer, target, &times, filter, kind))
}

/// Airmass of `target` over the night, restricted to `0 < airmass < max_airmass`.
pub fn airmass_series(
    observer: &Observer,
    target: &CelestialTarget,
    window: &NightWindow,
    n_samples: usize,
    max_airmass: f64,
) -> Result<Series, ObsPlanError> {
    sample_series(
        observer,
        target,
        window,
        n_samples,
        VisibilityFilter::Airmass { max: max_airmass },
        SeriesKind::Airmass,
    )
}

/// Parallactic angle of `target` over the night, restricted to `0 < airmass < max_airmass`.
pub fn parallactic_series(
    observer: &Observer,
    target: &CelestialTarget,
    window: &NightWindow,
    n_samples: usize,
    max_airmass: f64,
) -> Result<Series, ObsPlanError> {
    sample_series(
        observer,
        target,
        window,
        n_samples,
        VisibilityFilter::Airmass { max: max_airmass },
        SeriesKind::ParallacticAngle,
    )
}

/// Azimuth/altitude track of `target` in steps of `step`, from the top of the hour of
/// sunset through sunrise, restricted to the part above the horizon.
///
/// Errors
/// ----------
/// * [`ObsPlanError::ConfigError`] if `step` is shorter than [`MIN_TRACK_STEP_SECONDS`].
pub fn altaz_track(
    observer: &Observer,
    target: &CelestialTarget,
    window: &NightWindow,
    step: Duration,
) -> Result<Series, ObsPlanError> {
    if step.to_seconds() < MIN_TRACK_STEP_SECONDS {
        return Err(ObsPlanError::ConfigError(format!(
            "track step must be at least {MIN_TRACK_STEP_SECONDS} s, got {step}"
        )));
    }
    let start = floor_to_hour(&window.start());
    let times = step_range(start, window.end(), step);
    Ok(filtered_series(
        observer,
        target,
        &times,
        VisibilityFilter::AboveHorizon,
        SeriesKind::AltAzTrack,
    ))
}
