//! # Tabular display for visibility series
//!
//! Zero-copy renderers printing a [`Series`] as a table. The adaptor [`SeriesDisplay`]
//! borrows the series and renders it through `{}`:
//!
//! - **Default** (compact, fixed-width):
//!   `# | UTC | Alt [°] | Az [°] | Airmass | PA [°]`
//! - **Wide** (uses `comfy-table`):
//!   `# | ISO (UTC) | Alt [°] | Az [°] | ZD [°] | Airmass | PA [°] | Alt [rad] | Az [rad]`
//!
//! The best-time sample (minimum zenith distance) is flagged with `*`. Long tracks can be
//! thinned with [`SeriesDisplay::every`]; the `#` column keeps the original index and the
//! best-time row is always printed.
//!
//! ```rust,ignore
//! use obsplan::series_display::SeriesDisplayExt;
//!
//! println!("{}", summary.airmass.show());
//! println!("{}", summary.track.table_wide().every(30).with_precision(2));
//! ```
use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::sampler::{Sample, Series};
use crate::time::{hhmm, iso_utc};

enum TableMode {
    Default,
    Wide,
}

/// Display adaptor rendering a [`Series`] as a table.
pub struct SeriesDisplay<'a> {
    series: &'a Series,
    mode: TableMode,
    /// Fractional digits of the angle columns (default = 1).
    prec: usize,
    /// Print one row out of `stride` (default = 1, every row).
    stride: usize,
}

impl<'a> SeriesDisplay<'a> {
    pub fn new(series: &'a Series) -> Self {
        Self {
            series,
            mode: TableMode::Default,
            prec: 1,
            stride: 1,
        }
    }

    /// Switch to the wide `comfy-table` layout, or back to the compact one.
    pub fn wide(mut self, yes: bool) -> Self {
        self.mode = if yes {
            TableMode::Wide
        } else {
            TableMode::Default
        };
        self
    }

    /// Fractional digits of the degree columns.
    pub fn with_precision(mut self, p: usize) -> Self {
        self.prec = p;
        self
    }

    /// Print only every `n`-th sample (plus the best-time sample). `0` is treated as `1`.
    pub fn every(mut self, n: usize) -> Self {
        self.stride = n.max(1);
        self
    }

    fn best_index(&self) -> Option<usize> {
        let best = self.series.min_zenith_distance()?;
        self.series
            .iter()
            .position(|s| std::ptr::eq(s, best))
    }

    fn rows(&self) -> impl Iterator<Item = (usize, &'a Sample, bool)> + '_ {
        let best = self.best_index();
        let stride = self.stride;
        self.series
            .samples()
            .iter()
            .enumerate()
            .filter(move |(i, _)| i % stride == 0 || Some(*i) == best)
            .map(move |(i, s)| (i, s, Some(i) == best))
    }

    fn render_wide_comfy(&self) -> String {
        let p = self.prec;
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("#"),
            Cell::new("ISO (UTC)"),
            Cell::new("Alt [°]"),
            Cell::new("Az [°]"),
            Cell::new("ZD [°]"),
            Cell::new("Airmass"),
            Cell::new("PA [°]"),
            Cell::new("Alt [rad]"),
            Cell::new("Az [rad]"),
        ]);

        for (i, s, best) in self.rows() {
            let index = if best { format!("{i}*") } else { i.to_string() };
            let cells = [
                index,
                iso_utc(&s.time),
                format!("{:.p$}", s.altitude.degrees()),
                format!("{:.p$}", s.azimuth.degrees()),
                format!("{:.p$}", s.zenith_distance().to_degrees()),
                format!("{:.3}", s.airmass),
                format!("{:.p$}", s.parallactic_angle.degrees()),
                format!("{:.7}", s.altitude.radians()),
                format!("{:.7}", s.azimuth.radians()),
            ];
            table.add_row(Row::from(
                cells
                    .into_iter()
                    .map(|c| Cell::new(c).set_alignment(CellAlignment::Right))
                    .collect::<Vec<_>>(),
            ));
        }

        table.to_string()
    }

    fn write_compact(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.prec;
        writeln!(
            f,
            "{:>4}  {:>5}  {:>7}  {:>7}  {:>8}  {:>7}",
            "#", "UTC", "Alt [°]", "Az [°]", "Airmass", "PA [°]"
        )?;
        for (i, s, best) in self.rows() {
            let mark = if best { '*' } else { ' ' };
            writeln!(
                f,
                "{i:>3}{mark}  {t:>5}  {alt:>7.p$}  {az:>7.p$}  {am:>8.3}  {pa:>7.p$}",
                t = hhmm(&s.time),
                alt = s.altitude.degrees(),
                az = s.azimuth.degrees(),
                am = s.airmass,
                pa = s.parallactic_angle.degrees(),
            )?;
        }
        Ok(())
    }
}

/// Builders for [`SeriesDisplay`].
pub trait SeriesDisplayExt {
    /// Compact fixed-width table.
    fn show(&self) -> SeriesDisplay<'_>;

    /// Wide `comfy-table` table.
    fn table_wide(&self) -> SeriesDisplay<'_> {
        self.show().wide(true)
    }

    fn show_string(&self) -> String {
        format!("{}", self.show())
    }
}

impl SeriesDisplayExt for Series {
    fn show(&self) -> SeriesDisplay<'_> {
        SeriesDisplay::new(self)
    }
}

impl fmt::Display for SeriesDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!(
            "{}: {} (n={})",
            self.series.kind,
            self.series.target_name,
            self.series.len()
        );
        writeln!(f, "{title}")?;
        writeln!(f, "{}", "-".repeat(title.chars().count()))?;

        if self.series.is_empty() {
            return writeln!(f, "(no visible samples)");
        }

        match self.mode {
            TableMode::Wide => f.write_str(&self.render_wide_comfy()),
            TableMode::Default => self.write_compact(f),
        }
    }
}
