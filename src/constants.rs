//! # Constants and type definitions for obsplan
//!
//! This module centralizes the **astronomical constants**, **conversion factors**, and
//! **type aliases** shared by the sidereal-time, solar and visibility modules.
//!
//! ## Overview
//!
//! - Time origins (J2000.0, MJD/JD offsets) and day lengths
//! - Unit conversions (degrees ↔ radians, hours ↔ radians)
//! - Default thresholds of the visibility filters
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00)
pub const T2000: f64 = 51544.5;

/// JD epoch of J2000.0 (2000-01-01 12:00:00)
pub const JD2000: f64 = 2_451_545.0;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

/// Days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Hours → radians
pub const RADH: f64 = DPI / 24.0;

/// Ratio of the sidereal to the solar rotation rate of the Earth
pub const SIDEREAL_RATE: f64 = 1.00273790934;

// -------------------------------------------------------------------------------------------------
// Visibility defaults
// -------------------------------------------------------------------------------------------------

/// Upper airmass bound of the airmass and parallactic-angle series
pub const AIRMASS_CUTOFF: f64 = 3.5;

/// Default number of instants sampled across the night window
pub const DEFAULT_SAMPLE_COUNT: usize = 100;

/// Magnitude assigned to targets built from bare coordinates
pub const UNKNOWN_MAGNITUDE: f64 = 999.0;

/// Name of the default observatory preset
pub const DEFAULT_OBSERVATORY: &str = "Mount Graham";

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Angle in hours (right ascension, hour angle)
pub type Hour = f64;
/// Distance in meters
pub type Meter = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
