//! Inter-city spread - frontier expansion over the transmission graph.

use hecs::{Entity, World};
use rand::Rng;

use crate::components::{CityId, Epidemic, Geography};
use crate::graph::TransmissionGraph;

/// Scan the outgoing links of every infectious affected city and decide
/// which unaffected cities the pathogen reaches this month.
///
/// For each candidate link one draw is weighted by the flight constant and
/// one by the land constant; the city is reached when the combined pull
/// exceeds 1. Reached cities are seeded with a single case here, but the
/// caller merges them into the affected set only after the scan, so a city
/// reached this month does not itself propagate until the next.
pub fn spread_system(
    world: &mut World,
    graph: &TransmissionGraph,
    cities: &[Entity],
    affected: &[CityId],
    affected_mask: &[bool],
    rng: &mut impl Rng,
) -> Vec<CityId> {
    let mut newly_affected: Vec<CityId> = Vec::new();
    let mut reached = vec![false; cities.len()];

    for &source in affected {
        let infectious = world
            .get::<&Epidemic>(cities[source as usize])
            .map(|state| state.has_active_cases())
            .unwrap_or(false);
        if !infectious {
            continue;
        }
        for link in graph.neighbors_of(source) {
            let target = link.end as usize;
            if affected_mask[target] || reached[target] {
                continue;
            }
            let pull = rng.gen_range(0.0..1.0) * link.flight_constant
                + rng.gen_range(0.0..1.0) * link.land_constant;
            if pull > 1.0 {
                reached[target] = true;
                newly_affected.push(link.end);
            }
        }
    }

    for &target in &newly_affected {
        if let Ok((geography, state)) =
            world.query_one_mut::<(&Geography, &mut Epidemic)>(cities[target as usize])
        {
            state.record_infections(1);
            state.recalculate(geography.land_area);
        }
    }

    newly_affected
}
