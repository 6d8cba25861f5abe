//! Dense transmission graph between cities.
//!
//! One directed link per ordered pair of distinct cities, O(n²) links for
//! n cities. Links store arena indices rather than references, so the
//! graph never aliases the city world; recalculation reads a snapshot of
//! per-city loads taken by the engine.

use outbreak_logic::{geo, transmission};
use serde::{Deserialize, Serialize};

use crate::components::CityId;

/// Directed transmission link between two cities.
///
/// Direction matters structurally (the start→end link is a distinct object
/// from end→start), but the constants are symmetric in the two endpoints,
/// so both directions carry identical numbers once both are recalculated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TransmissionLink {
    pub start: CityId,
    pub end: CityId,
    /// Great-circle distance, fixed at construction.
    pub distance: f64,
    pub flight_constant: f64,
    pub land_constant: f64,
}

/// Per-city inputs to link recalculation, snapshotted from the world.
#[derive(Debug, Clone, Copy, Default)]
pub struct CityLoad {
    /// percent_infected · population.
    pub infected_load: f64,
    pub proximity_constant: f64,
}

/// Complete directed graph over the city arena.
#[derive(Debug, Clone, Default)]
pub struct TransmissionGraph {
    outgoing: Vec<Vec<TransmissionLink>>,
}

impl TransmissionGraph {
    /// Build the complete graph from city coordinates, one entry per city
    /// in arena order. Distances are computed once here; the transmission
    /// constants start at zero until the first recalculation.
    pub fn build(coordinates: &[(f64, f64)]) -> Self {
        let n = coordinates.len();
        let mut outgoing = Vec::with_capacity(n);
        for start in 0..n {
            let mut links = Vec::with_capacity(n.saturating_sub(1));
            for end in 0..n {
                if end == start {
                    continue;
                }
                let (lat1, lon1) = coordinates[start];
                let (lat2, lon2) = coordinates[end];
                links.push(TransmissionLink {
                    start: start as CityId,
                    end: end as CityId,
                    distance: geo::haversine_distance(lat1, lon1, lat2, lon2),
                    flight_constant: 0.0,
                    land_constant: 0.0,
                });
            }
            outgoing.push(links);
        }
        Self { outgoing }
    }

    pub fn city_count(&self) -> usize {
        self.outgoing.len()
    }

    /// Outgoing links of one city.
    pub fn neighbors_of(&self, city: CityId) -> &[TransmissionLink] {
        self.outgoing
            .get(city as usize)
            .map(|links| links.as_slice())
            .unwrap_or(&[])
    }

    /// Recalculate every outgoing link of each listed city from the given
    /// per-city loads (indexed by `CityId`).
    ///
    /// Incoming links from cities outside the set keep their previous
    /// values; the formulas are symmetric in the endpoints, so a later
    /// recalculation from the other side lands on the same numbers.
    pub fn recalculate_subset(&mut self, cities: &[CityId], loads: &[CityLoad]) {
        for &city in cities {
            let Some(links) = self.outgoing.get_mut(city as usize) else {
                continue;
            };
            for link in links.iter_mut() {
                let start = loads[link.start as usize];
                let end = loads[link.end as usize];
                let load_sum = start.infected_load + end.infected_load;
                let proximity_sum = start.proximity_constant + end.proximity_constant;
                link.flight_constant =
                    transmission::flight_constant(load_sum, proximity_sum, link.distance);
                link.land_constant =
                    transmission::land_constant(load_sum, proximity_sum, link.distance);
            }
        }
    }
}
