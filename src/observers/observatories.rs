//! Registry of named observatory presets.
use once_cell::sync::Lazy;

use super::Observer;
use crate::constants::{Degree, Meter, DEFAULT_OBSERVATORY};
use crate::conversion::parse_dms_to_deg;
use crate::obsplan_errors::ObsPlanError;

/// `(name, longitude east, latitude, elevation)`; longitudes and latitudes in sexagesimal degrees.
const PRESETS: &[(&str, &str, &str, Meter)] = &[
    ("Mount Graham", "-109:53:51.0", "32:41:56.9", 3221.0),
    ("Mauna Kea", "-155:28:05.2", "19:49:31.1", 4205.0),
    ("Paranal", "-70:24:16.2", "-24:37:38.0", 2635.0),
    ("La Silla", "-70:43:54.1", "-29:15:24.1", 2400.0),
    ("Kitt Peak", "-111:35:48.0", "31:57:30.0", 2096.0),
    ("Roque de los Muchachos", "-17:53:41.0", "28:45:38.0", 2396.0),
    ("Apache Point", "-105:49:13.0", "32:46:49.0", 2788.0),
    ("Palomar", "-116:51:54.0", "33:21:22.7", 1712.0),
];

static OBSERVATORIES: Lazy<Vec<Observer>> = Lazy::new(|| {
    PRESETS
        .iter()
        .filter_map(|&(name, lon, lat, elev)| {
            let lon: Degree = parse_dms_to_deg(lon).ok()?;
            let lat: Degree = parse_dms_to_deg(lat).ok()?;
            Observer::new(lon, lat, elev, Some(name.to_string())).ok()
        })
        .collect()
});

/// Look up a preset observatory by name, ignoring case and surrounding whitespace.
///
/// Errors
/// ----------
/// * [`ObsPlanError::UnknownObservatory`] if no preset carries this name.
pub fn observatory(name: &str) -> Result<Observer, ObsPlanError> {
    let wanted = name.trim();
    OBSERVATORIES
        .iter()
        .find(|o| o.label().eq_ignore_ascii_case(wanted))
        .cloned()
        .ok_or_else(|| ObsPlanError::UnknownObservatory(name.to_string()))
}

/// The default site, Mount Graham (Arizona).
pub fn default_observatory() -> Result<Observer, ObsPlanError> {
    observatory(DEFAULT_OBSERVATORY)
}

/// Names of all preset observatories, in registry order.
pub fn observatory_names() -> impl Iterator<Item = &'static str> {
    OBSERVATORIES.iter().filter_map(|o| o.name.as_deref())
}

#[cfg(test)]
mod observatories_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_all_presets_parse() {
        assert_eq!(OBSERVATORIES.len(), PRESETS.len());
        assert_eq!(observatory_names().count(), PRESETS.len());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let a = observatory("Mount Graham").unwrap();
        let b = observatory("  mount GRAHAM ").unwrap();
        assert_eq!(a, b);
        assert_eq!(default_observatory().unwrap(), a);

        assert_abs_diff_eq!(a.longitude.degrees(), -109.8975, epsilon = 1e-9);
        assert_abs_diff_eq!(a.latitude.degrees(), 32.69913888888889, epsilon = 1e-9);

        let paranal = observatory("paranal").unwrap();
        assert!(paranal.latitude.degrees() < 0.0);
    }

    #[test]
    fn test_unknown_observatory() {
        assert_eq!(
            observatory("Atlantis"),
            Err(ObsPlanError::UnknownObservatory("Atlantis".to_string()))
        );
    }
}
