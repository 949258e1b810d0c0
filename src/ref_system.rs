//! Elementary frame rotations.
//!
//! Two changes of frame are needed: mean ecliptic → mean equator of date (a rotation
//! about the equinox direction by the obliquity) and mean equator J2000 → mean equator of
//! date (IAU 1976 precession).
use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::angle::Angle;
use crate::constants::{Radian, DAYS_PER_JULIAN_CENTURY, MJD, RADEG, T2000};

/// Cartesian axis of an elementary rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Rotation matrix of angle `alpha` about `axis`.
///
/// The matrix rotates vectors (active convention): `rotmt(α, Axis::Z) · x̂` lies at
/// azimuth `α` in the xy plane.
pub fn rotmt(alpha: Radian, axis: Axis) -> Matrix3<f64> {
    let axis = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Unit vector of spherical coordinates `(longitude, latitude)`.
pub fn unit_vector(longitude: Radian, latitude: Radian) -> Vector3<f64> {
    let (sl, cl) = longitude.sin_cos();
    let (sb, cb) = latitude.sin_cos();
    Vector3::new(cb * cl, cb * sl, sb)
}

/// Spherical `(longitude in [0, 2π), latitude)` of a vector.
pub fn spherical(v: &Vector3<f64>) -> (Angle, Radian) {
    let lon = Angle::wrapped(v.y.atan2(v.x));
    let lat = v.z.atan2(v.x.hypot(v.y));
    (lon, lat)
}

/// Equatorial `(ra, dec)` of a point at ecliptic `(λ, β)` for obliquity `eps`.
pub fn ecliptic_to_equatorial(lambda: Radian, beta: Radian, eps: Radian) -> (Angle, Radian) {
    let ecl = unit_vector(lambda, beta);
    let equ = rotmt(eps, Axis::X) * ecl;
    spherical(&equ)
}

/// Precession matrix from the mean equator and equinox of J2000 to those of date (IAU 1976).
///
/// With `T` the Julian centuries since J2000.0:
///
/// ```text
/// ζ = (0.6406161 + 0.0000839 T + 0.0000050 T²) T  [deg]
/// z = (0.6406161 + 0.0003041 T + 0.0000051 T²) T  [deg]
/// θ = (0.5567530 − 0.0001185 T − 0.0000116 T²) T  [deg]
/// ```
///
/// and `x_date = Rz(z) · Ry(−θ) · Rz(ζ) · x_J2000`.
pub fn precession_matrix(tjm: MJD) -> Matrix3<f64> {
    let t = (tjm - T2000) / DAYS_PER_JULIAN_CENTURY;

    let zeta = ((0.0000050 * t + 0.0000839) * t + 0.6406161) * t * RADEG;
    let z = ((0.0000051 * t + 0.0003041) * t + 0.6406161) * t * RADEG;
    let theta = ((-0.0000116 * t - 0.0001185) * t + 0.5567530) * t * RADEG;

    rotmt(z, Axis::Z) * rotmt(-theta, Axis::Y) * rotmt(zeta, Axis::Z)
}

/// Mean `(ra, dec)` of date of a direction given in the J2000 mean equatorial frame.
pub fn precess_from_j2000(ra: Radian, dec: Radian, tjm: MJD) -> (Angle, Radian) {
    let x = precession_matrix(tjm) * unit_vector(ra, dec);
    spherical(&x)
}
