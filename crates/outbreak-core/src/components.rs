//! Component definitions for the city ECS.
//!
//! Components are pure data attached to city entities. They have no
//! stepping behavior - that lives in systems - but [`Epidemic`] owns its
//! clamped mutators and the derived-field recalculation, which must run
//! after any mutation before the derived fields are read.

use outbreak_logic::city;
use serde::{Deserialize, Serialize};

/// Stable index of a city in the engine's arena (spawn order). Links and
/// the affected set refer to cities by this index, never by reference.
pub type CityId = u32;

/// City identity component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub name: String,
}

/// Fixed geography of a city.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Geography {
    /// Degrees north.
    pub latitude: f64,
    /// Degrees east (negative for the western hemisphere).
    pub longitude: f64,
    /// Square miles; fixed for the whole run.
    pub land_area: f64,
}

/// Mutable epidemiological and demographic state of a city.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Epidemic {
    /// Living residents. Shrinks with deaths, grows with monthly growth.
    pub population: u64,
    pub currently_infected: u64,
    /// Monotonically non-decreasing.
    pub total_recovered: u64,
    /// Monotonically non-decreasing; already removed from `population`.
    pub total_killed: u64,

    // Derived fields, valid only after `recalculate`.
    pub percent_infected: f64,
    pub percent_recovered: f64,
    pub population_density: f64,
    pub proximity_constant: f64,
}

impl Epidemic {
    /// Fresh untouched city.
    pub fn new(population: u64, land_area: f64) -> Self {
        let mut state = Self {
            population,
            currently_infected: 0,
            total_recovered: 0,
            total_killed: 0,
            percent_infected: 0.0,
            percent_recovered: 0.0,
            population_density: 0.0,
            proximity_constant: 0.0,
        };
        state.recalculate(land_area);
        state
    }

    /// Recompute the derived fields from the current tallies. A zero
    /// population leaves both shares at 0.
    pub fn recalculate(&mut self, land_area: f64) {
        self.percent_recovered = city::population_share(self.total_recovered, self.population);
        self.percent_infected = city::population_share(self.currently_infected, self.population);
        self.population_density = city::population_density(self.population, land_area);
        self.proximity_constant = city::proximity_transmission_constant(
            self.population,
            self.percent_infected,
            self.population_density,
            land_area,
        );
    }

    /// Record deaths: removed from the infected pool and the population.
    pub fn record_deaths(&mut self, killed: u64) {
        let killed = killed.min(self.currently_infected);
        self.currently_infected -= killed;
        self.total_killed += killed;
        self.population = self.population.saturating_sub(killed);
    }

    /// Record recoveries: moved from the infected pool to the immune pool.
    pub fn record_recoveries(&mut self, recovered: u64) {
        let recovered = recovered.min(self.currently_infected);
        self.currently_infected -= recovered;
        self.total_recovered += recovered;
    }

    /// Record new infections.
    pub fn record_infections(&mut self, newly_infected: u64) {
        self.currently_infected += newly_infected;
    }

    /// Whether this city currently has active cases.
    pub fn has_active_cases(&self) -> bool {
        self.currently_infected > 0
    }

    /// Residents never touched by the pathogen.
    pub fn untouched(&self) -> u64 {
        self.population
            .saturating_sub(self.currently_infected + self.total_recovered)
    }
}
