//! # Observer sites
//!
//! An [`Observer`] is a fixed ground location: geodetic latitude, longitude (east positive)
//! and elevation, with an optional human-readable name. It is immutable once built and is
//! shared by reference across all the computations of a night.
//!
//! Time-dependent quantities are obtained by binding the site to an instant with
//! [`Observer::at`], which yields a cheap [`ObserverAt`] value. The sampler creates one per
//! evaluated instant, so no mutable "current date" is ever stored on the site itself.
//!
//! ## Units
//!
//! - Latitude in `[−π/2, π/2]`, longitude in `(−π, π]`, both held as [`Angle`].
//! - Elevation in **meters** above the reference ellipsoid. It is carried for reporting
//!   only: the refraction-free horizontal transform does not use it.
//!
//! ## Named sites
//!
//! [`observatories::observatory`] resolves preset sites by name (case-insensitive), with
//! [`DEFAULT_OBSERVATORY`](crate::constants::DEFAULT_OBSERVATORY) as the default.
//!
//! ```rust
//! use obsplan::observers::Observer;
//!
//! let lbt = Observer::from_sexagesimal("-109:53:51.0", "32:41:56.9", 3221.0, Some("LBT".into()))?;
//! assert!(lbt.longitude.degrees() < 0.0);
//! # Ok::<(), obsplan::obsplan_errors::ObsPlanError>(())
//! ```
use std::fmt;

use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::angle::Angle;
use crate::constants::{Degree, Meter, Radian, RADEG};
use crate::conversion::parse_dms_to_deg;
use crate::obsplan_errors::ObsPlanError;
use crate::time::local_sidereal_time;

pub mod observatories;

/// A fixed ground observing site.
///
/// Deserialization goes through the same checks as [`Observer::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SiteRecord")]
pub struct Observer {
    /// Geodetic latitude, north positive.
    pub latitude: Angle,

    /// Geodetic longitude, east positive, in `(−π, π]`.
    pub longitude: Angle,

    /// Height above the reference ellipsoid in **meters**.
    pub elevation_m: Meter,

    /// Optional human-readable site name.
    pub name: Option<String>,
}

/// Serialized form of an [`Observer`], angles in radians.
#[derive(Deserialize)]
struct SiteRecord {
    latitude: Radian,
    longitude: Radian,
    elevation_m: Meter,
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<SiteRecord> for Observer {
    type Error = ObsPlanError;

    fn try_from(site: SiteRecord) -> Result<Self, Self::Error> {
        Observer::from_radians(site.longitude, site.latitude, site.elevation_m, site.name)
    }
}

impl Observer {
    /// Create a new observer from geodetic coordinates in degrees.
    ///
    /// Arguments
    /// -----------------
    /// * `longitude`: Geodetic longitude in **degrees** (east positive). Any finite value is
    ///   accepted and wrapped to `(−180°, 180°]`.
    /// * `latitude`: Geodetic latitude in **degrees**, within `[−90°, 90°]`.
    /// * `elevation`: Height above the reference ellipsoid in **meters**.
    /// * `name`: Optional site name.
    ///
    /// Errors
    /// ----------
    /// * [`ObsPlanError::InvalidCoordinate`] if an input is non-finite or the latitude is out
    ///   of range.
    pub fn new(
        longitude: Degree,
        latitude: Degree,
        elevation: Meter,
        name: Option<String>,
    ) -> Result<Observer, ObsPlanError> {
        Observer::from_radians(longitude * RADEG, latitude * RADEG, elevation, name)
    }

    fn from_radians(
        longitude: Radian,
        latitude: Radian,
        elevation: Meter,
        name: Option<String>,
    ) -> Result<Observer, ObsPlanError> {
        if !elevation.is_finite() {
            return Err(ObsPlanError::InvalidCoordinate(format!(
                "elevation is not finite: {elevation}"
            )));
        }

        Ok(Observer {
            latitude: Angle::latitude(latitude)?,
            longitude: Angle::try_signed(longitude)?,
            elevation_m: elevation,
            name,
        })
    }

    /// Create an observer from sexagesimal longitude and latitude strings (`"±DDD:MM:SS.s"`).
    ///
    /// Errors
    /// ----------
    /// * [`ObsPlanError::InvalidSexagesimal`] for unparsable strings.
    /// * [`ObsPlanError::InvalidCoordinate`] for an out-of-range latitude.
    pub fn from_sexagesimal(
        longitude: &str,
        latitude: &str,
        elevation: Meter,
        name: Option<String>,
    ) -> Result<Observer, ObsPlanError> {
        Observer::new(
            parse_dms_to_deg(longitude)?,
            parse_dms_to_deg(latitude)?,
            elevation,
            name,
        )
    }

    /// Local mean sidereal time at this site, in `[0, 2π)`.
    pub fn local_sidereal_time(&self, epoch: &Epoch) -> Angle {
        local_sidereal_time(epoch, self.longitude)
    }

    /// Bind this site to an instant.
    pub fn at(&self, epoch: Epoch) -> ObserverAt<'_> {
        ObserverAt {
            observer: self,
            epoch,
        }
    }

    /// Site name, or `"unnamed site"`.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed site")
    }
}

impl fmt::Display for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (lon {:.5}°, lat {:.5}°, elev {:.0} m)",
            self.label(),
            self.longitude.degrees(),
            self.latitude.degrees(),
            self.elevation_m
        )
    }
}

/// An [`Observer`] bound to a UTC instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverAt<'a> {
    pub observer: &'a Observer,
    pub epoch: Epoch,
}

impl ObserverAt<'_> {
    pub fn latitude(&self) -> Angle {
        self.observer.latitude
    }

    /// Local sidereal time at the bound instant.
    pub fn local_sidereal_time(&self) -> Angle {
        self.observer.local_sidereal_time(&self.epoch)
    }
}
