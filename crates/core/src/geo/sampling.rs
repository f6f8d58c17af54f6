//! Uniform random target sampling.

use rand::Rng;
use tracing::debug;

use super::{Coordinate, GeoError};

/// Meters per degree of latitude, the fixed approximation the game uses
/// to size its (small) target discs.
pub const METERS_PER_DEGREE: f64 = 111_300.0;

/// Draw one point uniformly by area from the disc of `radius_m` meters
/// around `center`, using the process-wide RNG.
pub fn sample_point_in_disc(center: Coordinate, radius_m: f64) -> Result<Coordinate, GeoError> {
    sample_point_in_disc_with(center, radius_m, &mut rand::rng())
}

/// As [`sample_point_in_disc`], drawing entropy from a caller-supplied
/// RNG. Seed one for reproducible target placement in tests.
///
/// Returns [`GeoError::InvalidCoordinate`] if the offset leaves the valid
/// range, which can only happen for discs touching a pole or the
/// antimeridian.
pub fn sample_point_in_disc_with<R: Rng + ?Sized>(
    center: Coordinate,
    radius_m: f64,
    rng: &mut R,
) -> Result<Coordinate, GeoError> {
    if radius_m <= 0.0 || radius_m.is_nan() {
        return Err(GeoError::InvalidRadius(radius_m));
    }

    let radius_deg = radius_m / METERS_PER_DEGREE;

    // sqrt(u) makes the radial draw uniform by area, not by radius.
    let u: f64 = rng.random();
    let v: f64 = rng.random();
    let w = radius_deg * u.sqrt();
    let t = 2.0 * std::f64::consts::PI * v;

    // Meridians converge away from the equator; stretch the east-west
    // offset so the disc stays a disc in meters.
    let x = w * t.cos() / center.lat().to_radians().cos();
    let y = w * t.sin();

    let point = Coordinate::new(center.lat() + y, center.lng() + x)?;
    debug!(
        lat = point.lat(),
        lng = point.lng(),
        radius_m,
        "sampled point in disc"
    );

    Ok(point)
}
