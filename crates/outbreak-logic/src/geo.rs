//! Haversine great-circle distance between city coordinates.

/// Sphere radius used for distances. Expressed in the simulation's
/// distance units (miles), matching the 200-unit flight cutoff in
/// [`crate::transmission`].
pub const EARTH_RADIUS: f64 = 3956.0;

/// Great-circle distance between two (latitude, longitude) pairs given in
/// degrees.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lon1 = lon1.to_radians();
    let lat2 = lat2.to_radians();
    let lon2 = lon2.to_radians();

    let delta_lat = lat2 - lat1;
    let delta_lon = lon2 - lon1;
    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS * c
}
