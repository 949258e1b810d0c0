//! Fixed (sidereal) celestial targets.
use std::fmt;

use hifitime::Epoch;
use serde::{Deserialize, Serialize};

use crate::angle::Angle;
use crate::constants::{Degree, Radian, RADEG, UNKNOWN_MAGNITUDE};
use crate::conversion::{format_dms, format_ra, parse_dec_to_deg, parse_ra_to_deg};
use crate::obsplan_errors::ObsPlanError;
use crate::ref_system::precess_from_j2000;
use crate::time::mjd_utc;

/// A resolved target: equatorial coordinates of date, name and visual magnitude.
///
/// `ra` is held in `[0, 2π)` and `dec` in `[−π/2, π/2]`. A magnitude of
/// [`UNKNOWN_MAGNITUDE`] means the brightness is not known.
///
/// Deserialization goes through [`CelestialTarget::new`], so out-of-range coordinates are
/// rejected the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TargetRecord")]
pub struct CelestialTarget {
    pub name: String,
    pub ra: Angle,
    pub dec: Angle,
    pub magnitude: f64,
}

/// Serialized form of a [`CelestialTarget`], angles in radians.
#[derive(Deserialize)]
struct TargetRecord {
    name: String,
    ra: Radian,
    dec: Radian,
    #[serde(default)]
    magnitude: Option<f64>,
}

impl TryFrom<TargetRecord> for CelestialTarget {
    type Error = ObsPlanError;

    fn try_from(record: TargetRecord) -> Result<Self, Self::Error> {
        CelestialTarget::new(record.name, record.ra, record.dec, record.magnitude)
    }
}

impl CelestialTarget {
    /// Build a target from right ascension and declination in radians.
    ///
    /// Arguments
    /// -----------------
    /// * `name`: Display name of the target.
    /// * `ra`: Right ascension in radians, any finite value (wrapped to `[0, 2π)`).
    /// * `dec`: Declination in radians, within `[−π/2, π/2]`.
    /// * `magnitude`: Visual magnitude, `None` for unknown.
    ///
    /// Errors
    /// ----------
    /// * [`ObsPlanError::InvalidCoordinate`] for a non-finite `ra` or an out-of-range `dec`.
    pub fn new(
        name: impl Into<String>,
        ra: Radian,
        dec: Radian,
        magnitude: Option<f64>,
    ) -> Result<Self, ObsPlanError> {
        Ok(CelestialTarget {
            name: name.into(),
            ra: Angle::try_wrapped(ra)?,
            dec: Angle::latitude(dec)?,
            magnitude: magnitude.unwrap_or(UNKNOWN_MAGNITUDE),
        })
    }

    /// Build a target from right ascension and declination in degrees.
    pub fn from_degrees(
        name: impl Into<String>,
        ra: Degree,
        dec: Degree,
        magnitude: Option<f64>,
    ) -> Result<Self, ObsPlanError> {
        CelestialTarget::new(name, ra * RADEG, dec * RADEG, magnitude)
    }

    /// Build a target from sexagesimal strings, `"HH:MM:SS.s"` and `"±DD:MM:SS.s"`.
    ///
    /// Colon- and whitespace-separated fields are both accepted.
    ///
    /// ```rust
    /// use obsplan::target::CelestialTarget;
    ///
    /// let star = CelestialTarget::from_sexagesimal("12:00:00", "+32:41:57", "star", None)?;
    /// assert_eq!(star.magnitude, 999.0);
    /// # Ok::<(), obsplan::obsplan_errors::ObsPlanError>(())
    /// ```
    ///
    /// Errors
    /// ----------
    /// * [`ObsPlanError::InvalidSexagesimal`] for unparsable strings or RA outside `[0h, 24h)`.
    /// * [`ObsPlanError::InvalidCoordinate`] for a declination beyond ±90°.
    pub fn from_sexagesimal(
        ra: &str,
        dec: &str,
        name: impl Into<String>,
        magnitude: Option<f64>,
    ) -> Result<Self, ObsPlanError> {
        CelestialTarget::from_degrees(name, parse_ra_to_deg(ra)?, parse_dec_to_deg(dec)?, magnitude)
    }

    /// Coordinates precessed from the J2000 mean equator to the mean equator of `epoch`.
    pub fn precessed_to(&self, epoch: &Epoch) -> CelestialTarget {
        let (ra, dec) = precess_from_j2000(self.ra.radians(), self.dec.radians(), mjd_utc(epoch));
        CelestialTarget {
            name: self.name.clone(),
            ra,
            dec: Angle::from_radians(dec),
            magnitude: self.magnitude,
        }
    }

    /// Whether a real magnitude is attached.
    pub fn has_magnitude(&self) -> bool {
        self.magnitude != UNKNOWN_MAGNITUDE
    }
}

impl fmt::Display for CelestialTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} RA {} DEC {}",
            self.name,
            format_ra(self.ra.radians(), 2),
            format_dms(self.dec.radians(), 1)
        )?;
        if self.has_magnitude() {
            write!(f, " V={:.2}", self.magnitude)?;
        }
        Ok(())
    }
}
