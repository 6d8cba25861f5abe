//! Monthly population growth.

use hecs::World;

use crate::components::{Epidemic, Geography};

/// Grow every city's population by the configured monthly rate and refresh
/// its derived fields. Applies to affected and untouched cities alike.
pub fn growth_system(world: &mut World, monthly_growth_rate: f64) {
    for (_, (geography, state)) in world.query_mut::<(&Geography, &mut Epidemic)>() {
        state.population = (state.population as f64 * (1.0 + monthly_growth_rate)).round() as u64;
        state.recalculate(geography.land_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_applies_to_every_city() {
        let mut world = World::new();
        let geography = Geography {
            latitude: 40.0,
            longitude: -75.0,
            land_area: 100.0,
        };
        world.spawn((geography, Epidemic::new(100_000, 100.0)));
        world.spawn((geography, Epidemic::new(1_000, 100.0)));

        growth_system(&mut world, 0.0073);

        let populations: Vec<u64> = world
            .query::<&Epidemic>()
            .iter()
            .map(|(_, state)| state.population)
            .collect();
        // 100_000 * 1.0073 = 100_730; 1_000 * 1.0073 = 1_007.3 -> 1_007
        assert!(populations.contains(&100_730));
        assert!(populations.contains(&1_007));
    }

    #[test]
    fn test_growth_refreshes_derived_fields() {
        let mut world = World::new();
        let geography = Geography {
            latitude: 40.0,
            longitude: -75.0,
            land_area: 100.0,
        };
        let mut state = Epidemic::new(100_000, 100.0);
        state.record_infections(10_000);
        state.recalculate(100.0);
        let entity = world.spawn((geography, state));
        let before = world.get::<&Epidemic>(entity).unwrap().percent_infected;

        growth_system(&mut world, 0.0073);

        let after = world.get::<&Epidemic>(entity).unwrap();
        // Same infected count over a larger population.
        assert!(after.percent_infected < before);
        assert!((after.population_density - after.population as f64 / 100.0).abs() < 1e-9);
    }
}
