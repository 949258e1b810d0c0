mod common;

use std::fs;

use obsplan::{CelestialTarget, ObsPlan, ObsPlanError, Observer, PlannerConfig};

use common::{assert_series_close, near_zenith_target, solstice_config};

const PLAN_TOML: &str = r#"
observatory = "mount graham"
date = "2020-06-21"
n_samples = 50
airmass_cutoff = 2.0

[solver]
coarse_step_minutes = 5.0
tolerance_seconds = 0.5
"#;

#[test]
fn test_plan_from_toml_file() {
    let path = std::env::temp_dir().join(format!("obsplan_plan_{}.toml", std::process::id()));
    fs::write(&path, PLAN_TOML).unwrap();
    let config = PlannerConfig::from_toml_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(config.n_samples, 50);
    assert_eq!(config.solver.max_iter, 60);

    let plan = ObsPlan::from_config(config).unwrap();
    assert_eq!(plan.observer().label(), "Mount Graham");

    let series = plan.airmass_series(&near_zenith_target()).unwrap();
    assert!(series.len() <= 50);
    assert!(series.iter().all(|s| s.airmass < 2.0));
}

#[test]
fn test_solver_settings_barely_move_the_window() {
    let coarse = ObsPlan::from_config(solstice_config()).unwrap();
    let fine = ObsPlan::from_config(PlannerConfig::from_toml_str(PLAN_TOML).unwrap()).unwrap();

    let a = coarse.night_window().unwrap();
    let b = fine.night_window().unwrap();
    assert!((a.start() - b.start()).to_seconds().abs() < 2.0);
    assert!((a.end() - b.end()).to_seconds().abs() < 2.0);
}

#[test]
fn test_same_config_gives_same_track() {
    let target = near_zenith_target();
    let first = ObsPlan::from_config(solstice_config())
        .unwrap()
        .altaz_track(&target)
        .unwrap();
    let second = ObsPlan::from_config(solstice_config())
        .unwrap()
        .altaz_track(&target)
        .unwrap();
    assert_series_close(&first, &second, 1e-12);
}

#[test]
fn test_bad_configs_are_rejected() {
    let unknown = PlannerConfig::from_toml_str("observatory = \"Atlantis\"").unwrap();
    assert!(matches!(
        ObsPlan::from_config(unknown),
        Err(ObsPlanError::UnknownObservatory(_))
    ));

    assert!(matches!(
        PlannerConfig::from_toml_str("n_samples = 1"),
        Err(ObsPlanError::InvalidSampleCount(1))
    ));
    assert!(matches!(
        PlannerConfig::from_toml_str("date = \"21/06/2020\""),
        Err(ObsPlanError::InvalidDate(_))
    ));
    assert!(matches!(
        PlannerConfig::from_toml_str("n_samples = \"many\""),
        Err(ObsPlanError::ConfigError(_))
    ));
}

#[test]
fn test_plan_rejects_coarse_solver_settings() {
    let mut config = solstice_config();
    config.solver.coarse_step_minutes = 1440.0;
    assert!(matches!(
        ObsPlan::from_config(config),
        Err(ObsPlanError::ConfigError(_))
    ));

    let mut config = solstice_config();
    config.solver.tolerance_seconds = 3600.0;
    assert!(matches!(
        ObsPlan::from_config(config),
        Err(ObsPlanError::ConfigError(_))
    ));
}

#[test]
fn test_sites_and_targets_from_json_are_checked() {
    let site: Result<Observer, _> =
        serde_json::from_str(r#"{"latitude":4.0,"longitude":0.0,"elevation_m":0.0}"#);
    assert!(site.is_err());

    let site: Observer =
        serde_json::from_str(r#"{"latitude":0.57,"longitude":-1.92,"elevation_m":3221.0}"#)
            .unwrap();
    let plan = ObsPlan::new(site, solstice_config()).unwrap();

    let target: Result<CelestialTarget, _> =
        serde_json::from_str(r#"{"name":"x","ra":-1.0,"dec":3.0,"magnitude":1.0}"#);
    assert!(target.is_err());

    let target: CelestialTarget =
        serde_json::from_str(r#"{"name":"near zenith","ra":3.14159,"dec":0.5707}"#).unwrap();
    assert!(plan.night_summary(&target).unwrap().is_observable());
}
