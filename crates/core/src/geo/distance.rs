//! Haversine distance.

use super::Coordinate;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance between `a` and `b` in meters.
///
/// `distance_meters(a, a)` is exactly 0. The haversine term is clamped
/// into [0, 1] before the square roots so floating error near coincident
/// or antipodal points cannot produce NaN.
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.lat().to_radians();
    let phi2 = b.lat().to_radians();
    let d_phi = (b.lat() - a.lat()).to_radians();
    let d_lambda = (b.lng() - a.lng()).to_radians();

    let hav = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let hav = hav.clamp(0.0, 1.0);

    let c = 2.0 * hav.sqrt().atan2((1.0 - hav).sqrt());

    EARTH_RADIUS_METERS * c
}
