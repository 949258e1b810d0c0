//! Print the night plan of one target.
//!
//! ```text
//! cargo run --example night_summary -- 12:00:00 +32:41:57 --name star --date 2020-06-21
//! cargo run --example night_summary -- 18:36:56 +38:47:01 --observatory Paranal --wide
//! ```
use std::path::PathBuf;

use clap::Parser;
use obsplan::observers::observatories::observatory_names;
use obsplan::series_display::SeriesDisplayExt;
use obsplan::{CelestialTarget, ObsPlan, ObsPlanError, PlannerConfig};

#[derive(Parser)]
#[command(
    name = "night_summary",
    about = "Airmass, parallactic angle and track of a target over one night"
)]
struct Cli {
    /// Right ascension, `HH:MM:SS.s`
    ra: String,
    /// Declination, `±DD:MM:SS.s`
    dec: String,
    /// Target name
    #[arg(long, default_value = "target")]
    name: String,
    /// Visual magnitude
    #[arg(long)]
    magnitude: Option<f64>,
    /// Evening date, `YYYY-MM-DD` (default: today)
    #[arg(long)]
    date: Option<String>,
    /// Observatory preset (see --list)
    #[arg(long)]
    observatory: Option<String>,
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the wide tables
    #[arg(long)]
    wide: bool,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
    /// List the observatory presets and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<(), ObsPlanError> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list {
        for name in observatory_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => PlannerConfig::from_toml_file(path)?,
        None => PlannerConfig::default(),
    };
    if let Some(date) = cli.date {
        config = config.with_date(date);
    }
    if let Some(site) = cli.observatory {
        config.observatory = site;
    }

    let target = CelestialTarget::from_sexagesimal(&cli.ra, &cli.dec, cli.name, cli.magnitude)?;
    let plan = ObsPlan::from_config(config)?;
    let summary = plan.night_summary(&target)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| ObsPlanError::ConfigError(e.to_string()))?;
        println!("{json}");
    } else if cli.wide {
        println!("{} at {}, night of {}", summary.target, summary.site, summary.date);
        println!("Night window: {}\n", summary.window);
        println!("{}", summary.airmass.table_wide());
        println!("{}", summary.parallactic.table_wide());
        println!("{}", summary.track.table_wide().every(15));
    } else {
        println!("{summary}");
    }
    Ok(())
}
