//! # ObsPlan: one night at one site
//!
//! [`ObsPlan`] is the façade tying the crate together. It binds an [`Observer`] to a
//! [`PlannerConfig`], resolves the evening date once, and computes the [`NightWindow`]
//! lazily on first use. Targets are then planned against that cached window:
//!
//! - [`ObsPlan::airmass_series`], [`ObsPlan::parallactic_series`], [`ObsPlan::altaz_track`]
//!   give the individual series;
//! - [`ObsPlan::night_summary`] bundles all three with the window and the best-time marker;
//! - [`ObsPlan::night_summaries`] does the same for a list of targets.
//!
//! Catalog coordinates are taken as J2000 and precessed to the date of the night unless
//! [`PlannerConfig::precess`] is off.
//!
//! ## Typical usage
//!
//! ```rust,no_run
//! use obsplan::config::PlannerConfig;
//! use obsplan::obsplan::ObsPlan;
//! use obsplan::target::CelestialTarget;
//!
//! let plan = ObsPlan::from_config(PlannerConfig::default().with_date("2020-06-21"))?;
//! let star = CelestialTarget::from_sexagesimal("12:00:00", "+32:41:57", "star", None)?;
//!
//! let summary = plan.night_summary(&star)?;
//! if let Some(best) = summary.best_time() {
//!     println!("highest at {} UTC", best.time_label());
//! }
//! # Ok::<(), obsplan::obsplan_errors::ObsPlanError>(())
//! ```
use std::fmt;

use hifitime::Epoch;
use log::info;
use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::config::PlannerConfig;
use crate::events::{night_window, NightWindow};
use crate::obsplan_errors::ObsPlanError;
use crate::observers::observatories::observatory;
use crate::observers::Observer;
use crate::sampler::{self, Sample, Series};
use crate::series_display::SeriesDisplayExt;
use crate::target::CelestialTarget;
use crate::time::date_string;

#[derive(Debug, Clone)]
pub struct ObsPlan {
    observer: Observer,
    config: PlannerConfig,
    date: Epoch,
    window: OnceCell<NightWindow>,
}

impl ObsPlan {
    /// Build a plan for `observer` with `config`.
    ///
    /// The date is resolved immediately (today when `config.date` is unset); the night
    /// window is only computed when first needed.
    ///
    /// Errors
    /// ----------
    /// * Any validation error of [`PlannerConfig::validate`].
    pub fn new(observer: Observer, config: PlannerConfig) -> Result<Self, ObsPlanError> {
        config.validate()?;
        let date = config.resolve_date()?;
        Ok(ObsPlan {
            observer,
            config,
            date,
            window: OnceCell::new(),
        })
    }

    /// Build a plan at the observatory preset named by `config.observatory`.
    pub fn from_config(config: PlannerConfig) -> Result<Self, ObsPlanError> {
        let observer = observatory(&config.observatory)?;
        ObsPlan::new(observer, config)
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// 0h UTC of the evening date.
    pub fn date(&self) -> Epoch {
        self.date
    }

    /// Sunset to sunrise, computed once and cached.
    pub fn night_window(&self) -> Result<&NightWindow, ObsPlanError> {
        self.window
            .get_or_try_init(|| night_window(&self.observer, self.date, &self.config))
    }

    /// Target coordinates used for the night: precessed to the date when enabled.
    pub fn target_of_date(&self, target: &CelestialTarget) -> CelestialTarget {
        if self.config.precess {
            target.precessed_to(&self.date)
        } else {
            target.clone()
        }
    }

    pub fn airmass_series(&self, target: &CelestialTarget) -> Result<Series, ObsPlanError> {
        sampler::airmass_series(
            &self.observer,
            &self.target_of_date(target),
            self.night_window()?,
            self.config.n_samples,
            self.config.airmass_cutoff,
        )
    }

    pub fn parallactic_series(&self, target: &CelestialTarget) -> Result<Series, ObsPlanError> {
        sampler::parallactic_series(
            &self.observer,
            &self.target_of_date(target),
            self.night_window()?,
            self.config.n_samples,
            self.config.airmass_cutoff,
        )
    }

    pub fn altaz_track(&self, target: &CelestialTarget) -> Result<Series, ObsPlanError> {
        sampler::altaz_track(
            &self.observer,
            &self.target_of_date(target),
            self.night_window()?,
            self.config.track_step(),
        )
    }

    /// Window, airmass, parallactic-angle and az/alt series of `target` for the night.
    ///
    /// Errors
    /// ----------
    /// * [`ObsPlanError::NoCrossingFound`] if the Sun does not set or rise at this site and date.
    pub fn night_summary(&self, target: &CelestialTarget) -> Result<NightSummary, ObsPlanError> {
        let window = *self.night_window()?;
        let of_date = self.target_of_date(target);

        let airmass = sampler::airmass_series(
            &self.observer,
            &of_date,
            &window,
            self.config.n_samples,
            self.config.airmass_cutoff,
        )?;
        let parallactic = sampler::parallactic_series(
            &self.observer,
            &of_date,
            &window,
            self.config.n_samples,
            self.config.airmass_cutoff,
        )?;
        let track = sampler::altaz_track(
            &self.observer,
            &of_date,
            &window,
            self.config.track_step(),
        )?;

        let summary = NightSummary {
            site: self.observer.label().to_string(),
            date: date_string(&self.date),
            target: target.clone(),
            window,
            airmass,
            parallactic,
            track,
        };
        match summary.best_time() {
            Some(best) => info!("{}: highest at {} UTC", target.name, best.time_label()),
            None => info!("{}: not above the horizon tonight", target.name),
        }
        Ok(summary)
    }

    /// [`ObsPlan::night_summary`] for each target, in input order.
    pub fn night_summaries(
        &self,
        targets: &[CelestialTarget],
    ) -> Result<Vec<NightSummary>, ObsPlanError> {
        targets.iter().map(|t| self.night_summary(t)).collect()
    }
}

/// Everything needed to plot one target over one night.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NightSummary {
    pub site: String,
    /// Evening date, `YYYY-MM-DD`.
    pub date: String,
    /// Target as given (catalog coordinates).
    pub target: CelestialTarget,
    pub window: NightWindow,
    pub airmass: Series,
    pub parallactic: Series,
    pub track: Series,
}

impl NightSummary {
    /// Highest point of the az/alt track.
    pub fn best_time(&self) -> Option<&Sample> {
        self.track.min_zenith_distance()
    }

    /// Lowest airmass of the airmass series.
    pub fn best_airmass(&self) -> Option<&Sample> {
        self.airmass.min_zenith_distance()
    }

    /// Whether the target is usable at all during the night.
    pub fn is_observable(&self) -> bool {
        !self.airmass.is_empty()
    }
}

impl fmt::Display for NightSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} at {}, night of {}", self.target, self.site, self.date)?;
        writeln!(f, "Night window: {}", self.window)?;
        match self.best_time() {
            Some(best) => writeln!(
                f,
                "Best time: {} UTC (alt {:.1}°, az {:.1}°, airmass {:.3})",
                best.time_label(),
                best.altitude.degrees(),
                best.azimuth.degrees(),
                best.airmass
            )?,
            None => writeln!(f, "Best time: never above the horizon")?,
        }
        writeln!(f)?;
        writeln!(f, "{}", self.airmass.show())?;
        writeln!(f, "{}", self.parallactic.show())?;
        write!(f, "{}", self.track.show().every(60))
    }
}
