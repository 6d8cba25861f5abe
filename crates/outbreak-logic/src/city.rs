//! City dataset records and derived-metric formulas.
//!
//! The acquisition of the city dataset itself (census scrape, file load,
//! hand-built fixture) is the caller's problem; this module only defines
//! the record shape and the pure math that turns raw tallies into the
//! derived per-city transmission inputs.

use serde::{Deserialize, Serialize};

use crate::math::logistic;

/// Transmission weight of the raw infected-population term.
pub const POPULATION_FACTOR: f64 = 7.5e-6;
/// Transmission weight of population density.
pub const DENSITY_FACTOR: f64 = 7.5e-5;
/// Damping weight of land area - sprawling cities transmit less readily.
pub const AREA_FACTOR: f64 = 5e-3;

/// One city as supplied by the external dataset.
///
/// Names are the dataset's unique key; the engine rejects duplicates at
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub name: String,
    /// Census population estimate.
    pub population: u64,
    /// Square miles; fixed for the whole run.
    pub land_area: f64,
    /// Degrees north.
    pub latitude: f64,
    /// Degrees east (negative for the western hemisphere).
    pub longitude: f64,
}

/// Share of the population represented by `count`.
///
/// A zero population makes the share undefined; it is treated as 0, which
/// only arises in degenerate inputs.
pub fn population_share(count: u64, population: u64) -> f64 {
    if population == 0 {
        0.0
    } else {
        count as f64 / population as f64
    }
}

/// People per square mile.
pub fn population_density(population: u64, land_area: f64) -> f64 {
    population as f64 / land_area
}

/// Logistic proximity transmission constant of a city.
///
/// Grows with the absolute number of infected residents and with density,
/// shrinks with land area. Always in (0, 1).
pub fn proximity_transmission_constant(
    population: u64,
    percent_infected: f64,
    density: f64,
    land_area: f64,
) -> f64 {
    logistic(
        POPULATION_FACTOR * population as f64 * percent_infected + DENSITY_FACTOR * density
            - AREA_FACTOR * land_area,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_share() {
        assert!((population_share(25, 100) - 0.25).abs() < 1e-12);
        assert!((population_share(100, 100) - 1.0).abs() < 1e-12);
        assert_eq!(population_share(0, 100), 0.0);
    }

    #[test]
    fn test_population_share_zero_population_guard() {
        assert_eq!(population_share(0, 0), 0.0);
        assert_eq!(population_share(5, 0), 0.0);
    }

    #[test]
    fn test_population_density() {
        assert!((population_density(1000, 4.0) - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_proximity_constant_in_unit_interval() {
        let density = population_density(8_800_000, 300.5);
        let p = proximity_transmission_constant(8_800_000, 0.1, density, 300.5);
        assert!(p > 0.0 && p < 1.0);
    }

    #[test]
    fn test_proximity_constant_grows_with_infection() {
        let density = population_density(1_000_000, 200.0);
        let clean = proximity_transmission_constant(1_000_000, 0.0, density, 200.0);
        let sick = proximity_transmission_constant(1_000_000, 0.5, density, 200.0);
        assert!(sick > clean);
    }

    #[test]
    fn test_proximity_constant_known_value() {
        // logistic(7.5e-6 * 1_000_000 * 0.2 + 7.5e-5 * 5000 - 5e-3 * 200)
        //   = logistic(1.5 + 0.375 - 1.0) = logistic(0.875)
        let p = proximity_transmission_constant(1_000_000, 0.2, 5000.0, 200.0);
        let expected = 1.0 / (1.0 + (-0.875f64).exp());
        assert!((p - expected).abs() < 1e-12);
    }

    #[test]
    fn test_record_roundtrip_fields() {
        let record = CityRecord {
            name: "Springfield".to_string(),
            population: 116_000,
            land_area: 40.0,
            latitude: 39.8,
            longitude: -89.6,
        };
        assert_eq!(record.population, 116_000);
        assert!(record.land_area > 0.0);
    }
}
