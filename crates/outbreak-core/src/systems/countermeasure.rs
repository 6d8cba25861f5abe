//! Countermeasure pressure - humanity pushes back.

use outbreak_logic::pathogen::{Pathogen, TraitSlot};
use rand::Rng;

/// Accumulates monthly countermeasure pressure and rolls for weakening
/// events against the pathogen. Messages describing applied weakenings
/// queue up until the next status report drains them.
#[derive(Debug, Clone, Default)]
pub struct CountermeasureState {
    pressure: f64,
    applied: u32,
    pending_updates: Vec<String>,
}

impl CountermeasureState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Countermeasures applied so far.
    pub fn applied(&self) -> u32 {
        self.applied
    }

    /// Current accumulated pressure.
    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    /// Accrue one month of pressure, then roll once per whole unit of
    /// accumulated pressure. Any roll above the trigger threshold fires
    /// one countermeasure: the accumulator resets, a random trait slot is
    /// weakened, and the description joins the pending update queue.
    pub fn advance_month(
        &mut self,
        pathogen: &mut Pathogen,
        pressure_step: f64,
        trigger_threshold: f64,
        rng: &mut impl Rng,
    ) {
        self.pressure += pressure_step;
        let rolls = self.pressure.floor() as u32;
        let mut triggered = false;
        for _ in 0..rolls {
            if rng.gen_range(0.0..1.0) > trigger_threshold {
                triggered = true;
            }
        }
        if triggered {
            self.pressure = 0.0;
            self.applied += 1;
            let slot = TraitSlot::ALL[rng.gen_range(0..TraitSlot::ALL.len())];
            let message = pathogen.weaken_trait(slot);
            self.pending_updates.push(message);
        }
    }

    /// Drain the messages accumulated since the last report.
    pub fn drain_updates(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_logic::pathogen::PathogenKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_no_rolls_below_one_unit_of_pressure() {
        let mut state = CountermeasureState::new();
        let mut pathogen = Pathogen::new(PathogenKind::Virus, "v");
        let mut rng = StdRng::seed_from_u64(1);
        // Trigger threshold of -1 would fire on any roll, but with 0.25
        // pressure per month the first three months produce no rolls.
        for _ in 0..3 {
            state.advance_month(&mut pathogen, 0.25, -1.0, &mut rng);
            assert_eq!(state.applied(), 0);
        }
        // Fourth month: pressure reaches exactly 1.0, one roll, fires.
        state.advance_month(&mut pathogen, 0.25, -1.0, &mut rng);
        assert_eq!(state.applied(), 1);
        assert_eq!(state.pressure(), 0.0);
    }

    #[test]
    fn test_trigger_weakens_a_trait_and_queues_message() {
        let mut state = CountermeasureState::new();
        let mut pathogen = Pathogen::new(PathogenKind::Bacteria, "b");
        let traits_before = [
            pathogen.trait_value(TraitSlot::First),
            pathogen.trait_value(TraitSlot::Second),
            pathogen.trait_value(TraitSlot::Third),
        ];
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..4 {
            state.advance_month(&mut pathogen, 0.25, -1.0, &mut rng);
        }
        assert_eq!(state.applied(), 1);
        let traits_after = [
            pathogen.trait_value(TraitSlot::First),
            pathogen.trait_value(TraitSlot::Second),
            pathogen.trait_value(TraitSlot::Third),
        ];
        let weakened = traits_before
            .iter()
            .zip(traits_after.iter())
            .filter(|(before, after)| after < before)
            .count();
        assert_eq!(weakened, 1);
        let updates = state.drain_updates();
        assert_eq!(updates.len(), 1);
        assert!(updates[0].contains("0.95"));
        // Drained once, gone.
        assert!(state.drain_updates().is_empty());
    }

    #[test]
    fn test_impossible_threshold_never_triggers() {
        let mut state = CountermeasureState::new();
        let mut pathogen = Pathogen::new(PathogenKind::Fungus, "f");
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            state.advance_month(&mut pathogen, 0.25, 2.0, &mut rng);
        }
        assert_eq!(state.applied(), 0);
        // Pressure keeps accruing without a trigger to reset it.
        assert!(state.pressure() > 24.0);
    }
}
