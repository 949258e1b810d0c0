//! Planner configuration and its TOML loader.
//!
//! Every field has a default, so an empty document (or a partial one) is valid:
//!
//! ```toml
//! observatory = "Paranal"
//! date = "2020-06-21"
//! n_samples = 200
//!
//! [solver]
//! tolerance_seconds = 0.5
//! ```
use std::fs;
use std::path::Path;

use hifitime::{Duration, Epoch, Unit};
use serde::{Deserialize, Serialize};

use crate::constants::{
    Degree, Radian, AIRMASS_CUTOFF, DEFAULT_OBSERVATORY, DEFAULT_SAMPLE_COUNT, RADEG,
};
use crate::obsplan_errors::ObsPlanError;
use crate::time::{parse_date, seconds, today};

/// Largest bracketing step of the solver, in minutes.
pub const MAX_COARSE_STEP_MINUTES: f64 = 60.0;

/// Exclusive upper bound on the refinement tolerance, in seconds.
pub const MAX_TOLERANCE_SECONDS: f64 = 60.0;

/// Upper bound on `n_samples`.
pub const MAX_SAMPLE_COUNT: usize = 100_000;

/// Bounds on the track step, in seconds.
pub const MIN_TRACK_STEP_SECONDS: f64 = 1.0;
pub const MAX_TRACK_STEP_SECONDS: f64 = 3600.0;

/// Settings of the sunset/sunrise solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Step of the bracketing scan, in minutes.
    #[serde(default = "default_coarse_step_minutes")]
    pub coarse_step_minutes: f64,
    /// Length of the scan after the start instant, in hours.
    #[serde(default = "default_search_horizon_hours")]
    pub search_horizon_hours: f64,
    /// Convergence tolerance of the refinement, in seconds.
    #[serde(default = "default_tolerance_seconds")]
    pub tolerance_seconds: f64,
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

fn default_coarse_step_minutes() -> f64 {
    10.0
}

fn default_search_horizon_hours() -> f64 {
    24.0
}

fn default_tolerance_seconds() -> f64 {
    1.0
}

fn default_max_iter() -> usize {
    60
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            coarse_step_minutes: default_coarse_step_minutes(),
            search_horizon_hours: default_search_horizon_hours(),
            tolerance_seconds: default_tolerance_seconds(),
            max_iter: default_max_iter(),
        }
    }
}

impl SolverConfig {
    pub fn coarse_step(&self) -> Duration {
        Unit::Minute * self.coarse_step_minutes
    }

    pub fn search_horizon(&self) -> Duration {
        Unit::Hour * self.search_horizon_hours
    }

    /// Tolerance expressed in days, the unit of the refinement variable.
    pub(crate) fn tolerance_days(&self) -> f64 {
        self.tolerance_seconds / 86_400.0
    }

    fn validate(&self) -> Result<(), ObsPlanError> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ObsPlanError::ConfigError(format!(
                    "solver.{name} must be a positive number, got {v}"
                )))
            }
        };
        positive("coarse_step_minutes", self.coarse_step_minutes)?;
        positive("search_horizon_hours", self.search_horizon_hours)?;
        positive("tolerance_seconds", self.tolerance_seconds)?;
        if self.coarse_step_minutes > MAX_COARSE_STEP_MINUTES {
            return Err(ObsPlanError::ConfigError(format!(
                "solver.coarse_step_minutes must be at most {MAX_COARSE_STEP_MINUTES}, got {}",
                self.coarse_step_minutes
            )));
        }
        if self.coarse_step_minutes > self.search_horizon_hours * 60.0 {
            return Err(ObsPlanError::ConfigError(format!(
                "solver.coarse_step_minutes ({}) exceeds the search horizon ({} h)",
                self.coarse_step_minutes, self.search_horizon_hours
            )));
        }
        if self.tolerance_seconds >= MAX_TOLERANCE_SECONDS {
            return Err(ObsPlanError::ConfigError(format!(
                "solver.tolerance_seconds must be below {MAX_TOLERANCE_SECONDS}, got {}",
                self.tolerance_seconds
            )));
        }
        if self.max_iter == 0 {
            return Err(ObsPlanError::ConfigError(
                "solver.max_iter must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings of a night plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Name of the observatory preset.
    #[serde(default = "default_observatory")]
    pub observatory: String,
    /// Calendar date `YYYY-MM-DD` (UTC) of the evening; today when unset.
    #[serde(default)]
    pub date: Option<String>,
    /// Number of instants of the airmass and parallactic-angle series.
    #[serde(default = "default_n_samples")]
    pub n_samples: usize,
    /// Upper airmass bound of the airmass and parallactic-angle series.
    #[serde(default = "default_airmass_cutoff")]
    pub airmass_cutoff: f64,
    /// Step of the azimuth/altitude track, in seconds.
    #[serde(default = "default_track_step_seconds")]
    pub track_step_seconds: f64,
    /// Solar altitude defining sunset and sunrise, in degrees.
    #[serde(default)]
    pub horizon_altitude_deg: Degree,
    /// Precess J2000 catalog coordinates to the date of the night.
    #[serde(default = "default_precess")]
    pub precess: bool,
    #[serde(default)]
    pub solver: SolverConfig,
}

fn default_observatory() -> String {
    DEFAULT_OBSERVATORY.to_string()
}

fn default_n_samples() -> usize {
    DEFAULT_SAMPLE_COUNT
}

fn default_airmass_cutoff() -> f64 {
    AIRMASS_CUTOFF
}

fn default_track_step_seconds() -> f64 {
    60.0
}

fn default_precess() -> bool {
    true
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            observatory: default_observatory(),
            date: None,
            n_samples: default_n_samples(),
            airmass_cutoff: default_airmass_cutoff(),
            track_step_seconds: default_track_step_seconds(),
            horizon_altitude_deg: 0.0,
            precess: default_precess(),
            solver: SolverConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Parse and validate a TOML document.
    ///
    /// Errors
    /// ----------
    /// * [`ObsPlanError::ConfigError`] for invalid TOML, wrongly typed values or out-of-range
    ///   settings.
    pub fn from_toml_str(content: &str) -> Result<Self, ObsPlanError> {
        let config: PlannerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file.
    ///
    /// Errors
    /// ----------
    /// * [`ObsPlanError::IoError`] when the file cannot be read.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ObsPlanError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Builder-style date override.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Check that every numeric setting is usable.
    pub fn validate(&self) -> Result<(), ObsPlanError> {
        if !(2..=MAX_SAMPLE_COUNT).contains(&self.n_samples) {
            return Err(ObsPlanError::InvalidSampleCount(self.n_samples));
        }
        if !(self.airmass_cutoff.is_finite() && self.airmass_cutoff > 1.0) {
            return Err(ObsPlanError::ConfigError(format!(
                "airmass_cutoff must be greater than 1, got {}",
                self.airmass_cutoff
            )));
        }
        if !(MIN_TRACK_STEP_SECONDS..=MAX_TRACK_STEP_SECONDS).contains(&self.track_step_seconds) {
            return Err(ObsPlanError::ConfigError(format!(
                "track_step_seconds must lie in [{MIN_TRACK_STEP_SECONDS}, \
                 {MAX_TRACK_STEP_SECONDS}], got {}",
                self.track_step_seconds
            )));
        }
        if !(self.horizon_altitude_deg.is_finite() && self.horizon_altitude_deg.abs() < 90.0) {
            return Err(ObsPlanError::ConfigError(format!(
                "horizon_altitude_deg must lie in (-90, 90), got {}",
                self.horizon_altitude_deg
            )));
        }
        if let Some(date) = &self.date {
            parse_date(date)?;
        }
        self.solver.validate()
    }

    /// 0h UTC of the configured date, or of today when no date is set.
    pub fn resolve_date(&self) -> Result<Epoch, ObsPlanError> {
        match &self.date {
            Some(date) => parse_date(date),
            None => today(),
        }
    }

    pub fn horizon_altitude(&self) -> Radian {
        self.horizon_altitude_deg * RADEG
    }

    pub fn track_step(&self) -> Duration {
        seconds(self.track_step_seconds)
    }
}
