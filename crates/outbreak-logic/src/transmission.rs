//! Pairwise flight/land transmission-constant formulas.
//!
//! Both constants are logistic in a shared load term (combined infected
//! population of the two endpoints) plus a proximity term damped by
//! distance. The formulas are symmetric in the two endpoints, which is
//! what lets the graph recalculate only outgoing links of a changed city
//! and still agree with the reverse direction.

use crate::math::logistic;

/// Weight of the combined infected-population load in the flight term.
pub const FLIGHT_LOAD_FACTOR: f64 = 7.5e-8;
/// Weight of the combined infected-population load in the land term.
pub const LAND_LOAD_FACTOR: f64 = FLIGHT_LOAD_FACTOR;
/// Weight of the combined endpoint proximity constants.
pub const PROXIMITY_FACTOR: f64 = 0.25;
/// Below this distance the flight term's distance factor is disabled;
/// nobody flies between neighboring cities.
pub const FLIGHT_DISTANCE_CUTOFF: f64 = 200.0;

/// Infected-population load contributed by one endpoint.
pub fn infected_load(percent_infected: f64, population: u64) -> f64 {
    percent_infected * population as f64
}

/// Binary multiplier disabling the flight distance factor for close pairs.
pub fn flight_adjustment(distance: f64) -> f64 {
    if distance < FLIGHT_DISTANCE_CUTOFF {
        0.0
    } else {
        1.0
    }
}

/// Flight transmission constant between two endpoints.
///
/// `load_sum` is the sum of both endpoints' [`infected_load`];
/// `proximity_sum` the sum of their proximity constants.
pub fn flight_constant(load_sum: f64, proximity_sum: f64, distance: f64) -> f64 {
    logistic(
        FLIGHT_LOAD_FACTOR * load_sum
            + PROXIMITY_FACTOR * proximity_sum * distance.powf(-0.5) * flight_adjustment(distance),
    )
}

/// Land transmission constant between two endpoints. Uses a steeper
/// distance falloff than flight and no cutoff.
pub fn land_constant(load_sum: f64, proximity_sum: f64, distance: f64) -> f64 {
    logistic(LAND_LOAD_FACTOR * load_sum + PROXIMITY_FACTOR * proximity_sum * distance.powf(-0.6))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infected_load() {
        assert!((infected_load(0.25, 1_000_000) - 250_000.0).abs() < 1e-9);
        assert_eq!(infected_load(0.0, 1_000_000), 0.0);
    }

    #[test]
    fn test_flight_adjustment_cutoff() {
        assert_eq!(flight_adjustment(50.0), 0.0);
        assert_eq!(flight_adjustment(199.9), 0.0);
        assert_eq!(flight_adjustment(200.0), 1.0);
        assert_eq!(flight_adjustment(2400.0), 1.0);
    }

    #[test]
    fn test_flight_ignores_proximity_below_cutoff() {
        // Below the cutoff, only the load term survives - the proximity
        // term must contribute nothing at all.
        let with_proximity = flight_constant(10_000.0, 1.4, 50.0);
        let without_proximity = flight_constant(10_000.0, 0.0, 50.0);
        assert!((with_proximity - without_proximity).abs() < 1e-12);
    }

    #[test]
    fn test_land_keeps_proximity_below_cutoff() {
        let with_proximity = land_constant(10_000.0, 1.4, 50.0);
        let without_proximity = land_constant(10_000.0, 0.0, 50.0);
        assert!(with_proximity > without_proximity);
    }

    #[test]
    fn test_constants_in_unit_interval() {
        for distance in [10.0, 200.0, 800.0, 2400.0] {
            for load in [0.0, 1000.0, 10_000_000.0] {
                let f = flight_constant(load, 1.2, distance);
                let l = land_constant(load, 1.2, distance);
                assert!(f > 0.0 && f < 1.0);
                assert!(l > 0.0 && l < 1.0);
            }
        }
    }

    #[test]
    fn test_constants_grow_with_load() {
        let quiet = flight_constant(0.0, 1.0, 500.0);
        let loud = flight_constant(5_000_000.0, 1.0, 500.0);
        assert!(loud > quiet);
        let quiet = land_constant(0.0, 1.0, 500.0);
        let loud = land_constant(5_000_000.0, 1.0, 500.0);
        assert!(loud > quiet);
    }

    #[test]
    fn test_land_falls_with_distance() {
        let near = land_constant(1000.0, 1.5, 250.0);
        let far = land_constant(1000.0, 1.5, 2500.0);
        assert!(near > far);
    }

    #[test]
    fn test_no_load_no_proximity_is_half() {
        // logistic(0) - an empty link sits exactly at the midpoint.
        assert!((flight_constant(0.0, 0.0, 50.0) - 0.5).abs() < 1e-12);
    }
}
