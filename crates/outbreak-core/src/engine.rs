//! Simulation engine - owns the city world, the transmission graph, the
//! pathogen, and the run state, and advances them one month at a time.

use hecs::{Entity, World};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::HashSet;

use outbreak_logic::city::CityRecord;
use outbreak_logic::outcome::{self, MonthlyTally};
use outbreak_logic::pathogen::Pathogen;
use outbreak_logic::transmission;

use crate::components::{City, CityId, Epidemic, Geography};
use crate::config::SimulationConfig;
use crate::graph::{CityLoad, TransmissionGraph};
use crate::systems::{self, CountermeasureState};

/// Errors surfaced while assembling a simulation.
#[derive(Debug, Clone)]
pub enum SetupError {
    /// The supplied city list was empty.
    EmptyCityList,
    /// Two records share a name; names are the dataset's unique key.
    DuplicateCity(String),
    /// The requested starting city is not in the supplied list.
    StartCityNotFound(String),
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::EmptyCityList => write!(f, "city list is empty"),
            SetupError::DuplicateCity(name) => {
                write!(f, "duplicate city name in dataset: {:?}", name)
            }
            SetupError::StartCityNotFound(name) => {
                write!(f, "starting city not found: {:?}", name)
            }
        }
    }
}

impl std::error::Error for SetupError {}

/// Terminal disposition of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunState {
    Running,
    Won,
    Lost,
}

/// Read-only view of one city for rendering or reporting.
#[derive(Debug, Clone, Serialize)]
pub struct CitySnapshot {
    pub name: String,
    pub population: u64,
    pub currently_infected: u64,
    pub percent_infected: f64,
    pub total_recovered: u64,
    pub total_killed: u64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Result of a [`SimulationEngine::run_year`] batch.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct YearOutcome {
    /// Months actually simulated (less than 12 when a terminal state cut
    /// the year short, 0 when the run was already over).
    pub months_simulated: u32,
    pub game_over: bool,
    pub won: bool,
}

/// The simulation engine.
///
/// Owns all city, graph, and pathogen state exclusively for the duration
/// of a run; stepping is synchronous and single-threaded. Once a terminal
/// state is reached, further [`step_month`](Self::step_month) calls are
/// no-ops that keep reporting the terminal result.
pub struct SimulationEngine {
    world: World,
    /// Arena: `cities[id]` is the entity for `CityId = id`, in dataset
    /// order.
    cities: Vec<Entity>,
    graph: TransmissionGraph,
    pathogen: Pathogen,
    config: SimulationConfig,
    rng: StdRng,
    month: u32,
    /// Affected cities in the order the pathogen reached them.
    affected: Vec<CityId>,
    affected_mask: Vec<bool>,
    tally: MonthlyTally,
    countermeasures: CountermeasureState,
    state: RunState,
    clamp_events_seen: u64,
    depleted_cities_seen: usize,
}

impl SimulationEngine {
    /// Build an engine from the external city dataset, a pathogen, and the
    /// name of the city where the outbreak starts.
    ///
    /// The starting city joins the affected set immediately but stays at
    /// zero infected until the first step seeds its index case.
    pub fn new(
        records: Vec<CityRecord>,
        pathogen: Pathogen,
        start_city: &str,
        config: SimulationConfig,
    ) -> Result<Self, SetupError> {
        if records.is_empty() {
            return Err(SetupError::EmptyCityList);
        }
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.name.clone()) {
                return Err(SetupError::DuplicateCity(record.name.clone()));
            }
        }

        let mut world = World::new();
        let mut cities = Vec::with_capacity(records.len());
        let mut coordinates = Vec::with_capacity(records.len());
        let mut start = None;
        for (index, record) in records.into_iter().enumerate() {
            if record.name == start_city {
                start = Some(index as CityId);
            }
            coordinates.push((record.latitude, record.longitude));
            let geography = Geography {
                latitude: record.latitude,
                longitude: record.longitude,
                land_area: record.land_area,
            };
            let state = Epidemic::new(record.population, record.land_area);
            cities.push(world.spawn((City { name: record.name }, geography, state)));
        }
        let Some(start) = start else {
            return Err(SetupError::StartCityNotFound(start_city.to_string()));
        };

        let graph = TransmissionGraph::build(&coordinates);
        let mut affected_mask = vec![false; cities.len()];
        affected_mask[start as usize] = true;
        let rng = StdRng::seed_from_u64(config.seed);

        let mut engine = Self {
            world,
            cities,
            graph,
            pathogen,
            config,
            rng,
            month: 0,
            affected: vec![start],
            affected_mask,
            tally: MonthlyTally::default(),
            countermeasures: CountermeasureState::new(),
            state: RunState::Running,
            clamp_events_seen: 0,
            depleted_cities_seen: 0,
        };
        // Give every link its initial constants.
        let loads = engine.collect_loads();
        let all: Vec<CityId> = (0..engine.cities.len() as CityId).collect();
        engine.graph.recalculate_subset(&all, &loads);
        Ok(engine)
    }

    /// Advance one month. Returns `true` once the run has reached a
    /// terminal state.
    pub fn step_month(&mut self) -> bool {
        if self.state != RunState::Running {
            return true;
        }
        self.month += 1;
        self.tally = MonthlyTally::default();

        // Epidemic dynamics per affected city.
        for index in 0..self.affected.len() {
            let entity = self.cities[self.affected[index] as usize];
            systems::progress_city(
                &mut self.world,
                entity,
                &self.pathogen,
                &self.config,
                &mut self.tally,
                &mut self.rng,
            );
        }

        // Refresh the outgoing links of every affected city.
        let loads = self.collect_loads();
        self.graph.recalculate_subset(&self.affected, &loads);

        // Frontier expansion; merge only after the scan completes.
        let newly_affected = systems::spread_system(
            &mut self.world,
            &self.graph,
            &self.cities,
            &self.affected,
            &self.affected_mask,
            &mut self.rng,
        );
        for city in newly_affected {
            self.affected_mask[city as usize] = true;
            self.affected.push(city);
        }

        // Population growth everywhere, affected or not.
        systems::growth_system(&mut self.world, self.config.monthly_growth_rate);

        // Win/loss, only on evaluation boundaries past the grace period.
        if outcome::is_evaluation_month(
            self.month,
            self.config.evaluation_interval,
            self.config.grace_months,
        ) {
            self.evaluate_outcome();
        }

        // Humanity pushes back.
        self.countermeasures.advance_month(
            &mut self.pathogen,
            self.config.pressure_step,
            self.config.trigger_threshold,
            &mut self.rng,
        );

        self.log_degeneracies();
        debug!(
            "month {}: {} affected, +{} infected, +{} killed, +{} recovered",
            self.month,
            self.affected.len(),
            self.tally.newly_infected,
            self.tally.killed,
            self.tally.recovered
        );
        self.state != RunState::Running
    }

    /// Step up to twelve months, stopping early on a terminal state.
    pub fn run_year(&mut self) -> YearOutcome {
        let start_month = self.month;
        for _ in 0..12 {
            if self.step_month() {
                break;
            }
        }
        YearOutcome {
            months_simulated: self.month - start_month,
            game_over: self.is_game_over(),
            won: self.player_won(),
        }
    }

    /// Text report of the epidemic's reach plus any countermeasure updates
    /// accumulated since the last report (drained on read).
    pub fn summarize(&mut self) -> String {
        let mut report = format!(
            "Month {}: {} of {} cities affected by {}\n",
            self.month,
            self.affected.len(),
            self.cities.len(),
            self.pathogen.name()
        );
        for &city_id in &self.affected {
            let entity = self.cities[city_id as usize];
            let (name, state) = match (
                self.world.get::<&City>(entity),
                self.world.get::<&Epidemic>(entity),
            ) {
                (Ok(city), Ok(state)) => (city.name.clone(), *state),
                _ => continue,
            };
            report.push_str(&format!(
                "   {}: {} infected, {} recovered, {} killed, {} untouched\n",
                name,
                state.currently_infected,
                state.total_recovered,
                state.total_killed,
                state.untouched()
            ));
        }
        match self.state {
            RunState::Running => {}
            RunState::Won => report.push_str("The infection has overwhelmed the network.\n"),
            RunState::Lost => report.push_str("The infection has failed to reach critical mass.\n"),
        }
        for update in self.countermeasures.drain_updates() {
            report.push_str(&update);
            report.push('\n');
        }
        report
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn run_state(&self) -> RunState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state != RunState::Running
    }

    pub fn player_won(&self) -> bool {
        self.state == RunState::Won
    }

    pub fn pathogen(&self) -> &Pathogen {
        &self.pathogen
    }

    /// Mutable pathogen access - the upgrade surface a driving shell uses
    /// between months.
    pub fn pathogen_mut(&mut self) -> &mut Pathogen {
        &mut self.pathogen
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    pub fn affected_count(&self) -> usize {
        self.affected.len()
    }

    pub fn countermeasures_applied(&self) -> u32 {
        self.countermeasures.applied()
    }

    /// The tallies of the most recently simulated month.
    pub fn monthly_tally(&self) -> MonthlyTally {
        self.tally
    }

    /// Linear scan for a city by name.
    pub fn lookup_city(&self, name: &str) -> Option<CityId> {
        for (index, &entity) in self.cities.iter().enumerate() {
            if let Ok(city) = self.world.get::<&City>(entity) {
                if city.name == name {
                    return Some(index as CityId);
                }
            }
        }
        None
    }

    /// Outgoing transmission links of one city.
    pub fn neighbors_of(&self, city: CityId) -> &[crate::graph::TransmissionLink] {
        self.graph.neighbors_of(city)
    }

    /// Snapshot of one city, if the id is valid.
    pub fn city_snapshot(&self, city: CityId) -> Option<CitySnapshot> {
        let entity = *self.cities.get(city as usize)?;
        let name = self.world.get::<&City>(entity).ok()?.name.clone();
        let geography = *self.world.get::<&Geography>(entity).ok()?;
        let state = *self.world.get::<&Epidemic>(entity).ok()?;
        Some(CitySnapshot {
            name,
            population: state.population,
            currently_infected: state.currently_infected,
            percent_infected: state.percent_infected,
            total_recovered: state.total_recovered,
            total_killed: state.total_killed,
            latitude: geography.latitude,
            longitude: geography.longitude,
        })
    }

    /// Snapshots of every affected city, in the order they were reached.
    pub fn affected_snapshots(&self) -> Vec<CitySnapshot> {
        self.affected
            .iter()
            .filter_map(|&city| self.city_snapshot(city))
            .collect()
    }

    /// True only if every city's combined recovered+infected share meets
    /// the threshold.
    pub fn all_cities_meet_threshold(&self, threshold: f64) -> bool {
        let shares: Vec<f64> = self
            .world
            .query::<&Epidemic>()
            .iter()
            .map(|(_, state)| state.percent_recovered + state.percent_infected)
            .collect();
        outcome::all_cities_meet_threshold(shares, threshold)
    }

    fn evaluate_outcome(&mut self) {
        if self.all_cities_meet_threshold(self.config.win_threshold) {
            self.state = RunState::Won;
            return;
        }
        let lost = self.countermeasures.applied() >= self.config.max_countermeasures
            || outcome::epidemic_collapsed(&self.tally, self.config.recovery_dominance)
            || outcome::epidemic_stagnant(&self.tally, self.config.stagnation_floor);
        if lost {
            self.state = RunState::Lost;
        }
    }

    /// Per-city link-recalculation inputs, indexed by `CityId`.
    fn collect_loads(&self) -> Vec<CityLoad> {
        self.cities
            .iter()
            .map(|&entity| match self.world.get::<&Epidemic>(entity) {
                Ok(state) => CityLoad {
                    infected_load: transmission::infected_load(
                        state.percent_infected,
                        state.population,
                    ),
                    proximity_constant: state.proximity_constant,
                },
                Err(_) => CityLoad::default(),
            })
            .collect()
    }

    /// Numeric degeneracy is clamped where it happens; surface it here so
    /// a long silent run is still diagnosable.
    fn log_degeneracies(&mut self) {
        let clamps = self.pathogen.clamp_events();
        if clamps > self.clamp_events_seen {
            warn!(
                "derived pathogen rate clamped to zero ({} events total)",
                clamps
            );
            self.clamp_events_seen = clamps;
        }
        let depleted = self
            .affected
            .iter()
            .filter(|&&city| {
                self.world
                    .get::<&Epidemic>(self.cities[city as usize])
                    .map(|state| state.population == 0)
                    .unwrap_or(false)
            })
            .count();
        if depleted > self.depleted_cities_seen {
            warn!("{} affected cities have zero population", depleted);
            self.depleted_cities_seen = depleted;
        }
    }
}
