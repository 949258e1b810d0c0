//! Sexagesimal parsing and formatting.
//!
//! Strings are accepted either colon-separated (`"12:30:45.5"`, the catalog style) or
//! whitespace-separated (`"12 30 45.5"`, the MPC style). One to three fields are allowed:
//! `"12"`, `"12:30"` and `"12:30:45.5"` are all valid. A leading `+`/`-` on the first
//! field applies to the whole value, so `"-00:30:00"` is half a degree south.

use crate::constants::{Degree, Radian, RADEG, RADH};
use crate::obsplan_errors::ObsPlanError;

/// Split a sexagesimal string into its sign and `(units, minutes, seconds)` fields.
///
/// Arguments
/// ---------
/// * `value`: a sexagesimal string, colon or whitespace separated
///
/// Return
/// ------
/// * `(sign, [units, minutes, seconds])` with `sign` in `{-1.0, 1.0}` and all fields non-negative
fn split_sexagesimal(value: &str) -> Result<(f64, [f64; 3]), ObsPlanError> {
    let invalid = || ObsPlanError::InvalidSexagesimal(value.to_string());

    let trimmed = value.trim();
    let parts: Vec<&str> = if trimmed.contains(':') {
        trimmed.split(':').map(str::trim).collect()
    } else {
        trimmed.split_whitespace().collect()
    };
    if parts.is_empty() || parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
        return Err(invalid());
    }

    let sign = if parts[0].starts_with('-') { -1.0 } else { 1.0 };
    let mut fields = [0.0; 3];
    for (i, &raw) in parts.iter().enumerate() {
        let raw = if i == 0 {
            raw.trim_start_matches(&['-', '+'][..])
        } else {
            raw
        };
        let v: f64 = raw.parse().map_err(|_| invalid())?;
        if !v.is_finite() || v < 0.0 {
            return Err(invalid());
        }
        if i > 0 && v >= 60.0 {
            return Err(invalid());
        }
        fields[i] = v;
    }
    Ok((sign, fields))
}

fn fold_sexagesimal(fields: [f64; 3]) -> f64 {
    fields[0] + fields[1] / 60.0 + fields[2] / 3600.0
}

/// Parse a right ascension string (`HH:MM:SS.ss`) to degrees.
///
/// Errors
/// ------
/// * [`ObsPlanError::InvalidSexagesimal`] for malformed input, a negative sign or hours ≥ 24.
pub fn parse_ra_to_deg(ra: &str) -> Result<Degree, ObsPlanError> {
    let (sign, fields) = split_sexagesimal(ra)?;
    let hours = fold_sexagesimal(fields);
    if sign < 0.0 || hours >= 24.0 {
        return Err(ObsPlanError::InvalidSexagesimal(ra.to_string()));
    }
    Ok(hours * 15.0)
}

/// Parse a signed degree string (`±DD:MM:SS.ss`) to degrees.
///
/// Used for declinations, latitudes and longitudes. Range checks belong to the caller,
/// since each of these quantities has its own domain.
pub fn parse_dms_to_deg(dms: &str) -> Result<Degree, ObsPlanError> {
    let (sign, fields) = split_sexagesimal(dms)?;
    Ok(sign * fold_sexagesimal(fields))
}

/// Parse a declination string (`±DD:MM:SS.ss`) to degrees.
pub fn parse_dec_to_deg(dec: &str) -> Result<Degree, ObsPlanError> {
    parse_dms_to_deg(dec)
}

/// Split an angle into `(hours, minutes, seconds)` with seconds rounded to `prec` digits.
///
/// Rounding carries into minutes and hours, so `11:59:59.9996` printed with three digits
/// becomes `12:00:00.000` and never `11:59:60.000`.
pub fn ra_hms_prec(ra: Radian, prec: usize) -> (u32, u32, f64) {
    let total_hours = (ra / RADH).rem_euclid(24.0);
    let (h, m, s) = split_with_carry(total_hours, prec);
    (h % 24, m, s)
}

/// Split a signed angle into `(sign, degrees, arcminutes, arcseconds)` with carry.
pub fn dec_sdms_prec(dec: Radian, prec: usize) -> (char, u32, u32, f64) {
    let deg = dec / RADEG;
    let sign = if deg < 0.0 { '-' } else { '+' };
    let (d, m, s) = split_with_carry(deg.abs(), prec);
    (sign, d, m, s)
}

fn split_with_carry(value: f64, prec: usize) -> (u32, u32, f64) {
    let scale = 10f64.powi(prec as i32);
    // Work in rounded units of the last printed digit so that carries are exact.
    let total = (value * 3600.0 * scale).round();
    let per_unit = 3600.0 * scale;
    let per_minute = 60.0 * scale;

    let units = (total / per_unit).floor();
    let rem = total - units * per_unit;
    let minutes = (rem / per_minute).floor();
    let seconds = (rem - minutes * per_minute) / scale;

    (units as u32, minutes as u32, seconds)
}

/// Format seconds as `"SS.sss"` with a two-digit integer part.
pub fn fmt_ss(seconds: f64, prec: usize) -> String {
    let width = if prec == 0 { 2 } else { prec + 3 };
    format!("{seconds:0width$.prec$}")
}

/// Render a right ascension as `HH:MM:SS.sss`.
pub fn format_ra(ra: Radian, prec: usize) -> String {
    let (h, m, s) = ra_hms_prec(ra, prec);
    format!("{h:02}:{m:02}:{}", fmt_ss(s, prec))
}

/// Render a signed angle as `±DD:MM:SS.ss`.
pub fn format_dms(angle: Radian, prec: usize) -> String {
    let (sgn, d, m, s) = dec_sdms_prec(angle, prec);
    format!("{sgn}{d:02}:{m:02}:{}", fmt_ss(s, prec))
}
