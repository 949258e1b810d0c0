use approx::assert_relative_eq;
use hifitime::Epoch;
use obsplan::sampler::Series;
use obsplan::{CelestialTarget, Observer, PlannerConfig};

pub fn mount_graham() -> Observer {
    obsplan::observatory("Mount Graham").unwrap()
}

pub fn solstice_config() -> PlannerConfig {
    PlannerConfig::default().with_date("2020-06-21")
}

/// RA 12:00:00, Dec +32:41:57: passes close to the zenith of Mount Graham.
pub fn near_zenith_target() -> CelestialTarget {
    CelestialTarget::from_sexagesimal("12:00:00", "+32:41:57", "near zenith", None).unwrap()
}

pub fn abs_seconds(a: Epoch, b: Epoch) -> f64 {
    (a - b).to_seconds().abs()
}

pub fn assert_series_close(actual: &Series, expected: &Series, epsilon: f64) {
    assert_eq!(actual.kind, expected.kind);
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert_eq!(a.time, e.time);
        assert_relative_eq!(a.altitude.radians(), e.altitude.radians(), epsilon = epsilon);
        assert_relative_eq!(a.azimuth.radians(), e.azimuth.radians(), epsilon = epsilon);
        assert_relative_eq!(a.airmass, e.airmass, epsilon = epsilon);
        assert_relative_eq!(
            a.parallactic_angle.radians(),
            e.parallactic_angle.radians(),
            epsilon = epsilon
        );
    }
}
