//! Per-city monthly epidemic progression.

use hecs::{Entity, World};
use outbreak_logic::epidemic as formulas;
use outbreak_logic::outcome::MonthlyTally;
use outbreak_logic::pathogen::Pathogen;
use rand::Rng;

use crate::components::{Epidemic, Geography};
use crate::config::SimulationConfig;

/// Advance one affected city by one month.
///
/// A city with no active cases receives its first exposure (one index
/// case); otherwise the month's deaths and recoveries are drawn first,
/// both clamped against the infected count at the start of the month.
/// Derived fields are recalculated before the new-infection phase reads
/// them, and again afterwards so the transmission pass downstream sees
/// fresh values.
pub fn progress_city(
    world: &mut World,
    entity: Entity,
    pathogen: &Pathogen,
    config: &SimulationConfig,
    tally: &mut MonthlyTally,
    rng: &mut impl Rng,
) {
    let Ok((geography, state)) = world.query_one_mut::<(&Geography, &mut Epidemic)>(entity) else {
        return;
    };
    let land_area = geography.land_area;

    if state.currently_infected == 0 {
        // First exposure.
        state.record_infections(1);
    } else {
        let infected_at_start = state.currently_infected;
        let fatality = pathogen.fatality_rate();
        let killed = formulas::killed(
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..1.0),
            infected_at_start,
            fatality,
        );
        let recovered = formulas::recovered(
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..1.0),
            infected_at_start,
            killed,
            fatality,
        );
        state.record_deaths(killed);
        state.record_recoveries(recovered);
        tally.killed += killed;
        tally.recovered += recovered;
    }

    state.recalculate(land_area);

    let interactions = formulas::interactions(
        rng.gen_range(0.0..1.0),
        config.social_interactions_per_day,
        config.days_per_month,
        state.proximity_constant,
        state.currently_infected,
    );
    let susceptible = formulas::newly_susceptible(
        rng.gen_range(0.0..1.0),
        interactions,
        pathogen.susceptibility_rate(),
        state.percent_recovered,
    );
    let newly_infected = formulas::newly_infected(
        rng.gen_range(0.0..1.0),
        susceptible,
        pathogen.infection_rate(),
        state.currently_infected,
        state.total_recovered,
        state.population,
    );
    state.record_infections(newly_infected);
    tally.newly_infected += newly_infected;

    state.recalculate(land_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spawn_city(world: &mut World, population: u64, infected: u64) -> Entity {
        let geography = Geography {
            latitude: 40.0,
            longitude: -75.0,
            land_area: 100.0,
        };
        let mut state = Epidemic::new(population, geography.land_area);
        state.record_infections(infected);
        state.recalculate(geography.land_area);
        world.spawn((geography, state))
    }

    #[test]
    fn test_first_exposure_seeds_one_case() {
        let mut world = World::new();
        let entity = spawn_city(&mut world, 1_000_000, 0);
        let pathogen = Pathogen::generic("g", 0.0, 0.0, 0.0);
        let config = SimulationConfig::default();
        let mut tally = MonthlyTally::default();
        let mut rng = StdRng::seed_from_u64(7);

        progress_city(&mut world, entity, &pathogen, &config, &mut tally, &mut rng);

        let state = world.get::<&Epidemic>(entity).unwrap();
        assert_eq!(state.currently_infected, 1);
        assert!(state.percent_infected > 0.0);
        assert_eq!(tally.killed, 0);
        assert_eq!(tally.recovered, 0);
    }

    #[test]
    fn test_month_conserves_people() {
        let mut world = World::new();
        let entity = spawn_city(&mut world, 100_000, 5_000);
        let pathogen = Pathogen::generic("g", 0.8, 0.8, 0.3);
        let config = SimulationConfig::default();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..24 {
            let mut tally = MonthlyTally::default();
            progress_city(&mut world, entity, &pathogen, &config, &mut tally, &mut rng);
            let state = *world.get::<&Epidemic>(entity).unwrap();
            assert!(state.currently_infected + state.total_recovered <= state.population);
            assert_eq!(state.population + state.total_killed, 100_000);
        }
    }

    #[test]
    fn test_totals_monotonic() {
        let mut world = World::new();
        let entity = spawn_city(&mut world, 100_000, 5_000);
        let pathogen = Pathogen::generic("g", 0.8, 0.8, 0.3);
        let config = SimulationConfig::default();
        let mut rng = StdRng::seed_from_u64(11);

        let mut last_recovered = 0;
        let mut last_killed = 0;
        for _ in 0..24 {
            let mut tally = MonthlyTally::default();
            progress_city(&mut world, entity, &pathogen, &config, &mut tally, &mut rng);
            let state = *world.get::<&Epidemic>(entity).unwrap();
            assert!(state.total_recovered >= last_recovered);
            assert!(state.total_killed >= last_killed);
            last_recovered = state.total_recovered;
            last_killed = state.total_killed;
        }
    }

    #[test]
    fn test_harmless_pathogen_never_kills() {
        let mut world = World::new();
        let entity = spawn_city(&mut world, 50_000, 1_000);
        let pathogen = Pathogen::generic("g", 0.0, 0.0, 0.0);
        let config = SimulationConfig::default();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..12 {
            let mut tally = MonthlyTally::default();
            progress_city(&mut world, entity, &pathogen, &config, &mut tally, &mut rng);
            assert_eq!(tally.killed, 0);
            assert_eq!(tally.newly_infected, 0);
        }
        let state = world.get::<&Epidemic>(entity).unwrap();
        assert_eq!(state.total_killed, 0);
        assert_eq!(state.population, 50_000);
    }
}
