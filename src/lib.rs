//! Night planning for ground-based observations of fixed targets.
//!
//! Given an observing site, a date and a target, `obsplan` finds the night window
//! (sunset to sunrise) and samples the target's airmass, parallactic angle and
//! azimuth/altitude track across it. Solar and sidereal models are built in; no external
//! ephemeris is needed.
pub mod angle;
pub mod config;
pub mod constants;
pub mod conversion;
pub mod events;
pub mod horizontal;
pub mod obsplan;
pub mod obsplan_errors;
pub mod observers;
mod ref_system;
pub mod sampler;
pub mod series_display;
pub mod sun;
pub mod target;
pub mod time;

pub use crate::angle::Angle;
pub use crate::config::{PlannerConfig, SolverConfig};
pub use crate::events::{Direction, NightWindow};
pub use crate::obsplan::{NightSummary, ObsPlan};
pub use crate::obsplan_errors::ObsPlanError;
pub use crate::observers::observatories::observatory;
pub use crate::observers::Observer;
pub use crate::sampler::{Sample, Series, SeriesKind, VisibilityFilter};
pub use crate::target::CelestialTarget;
