//! Monthly tally and win/loss predicates.

use serde::{Deserialize, Serialize};

/// Counts accumulated over one simulated month, reset at each step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTally {
    pub newly_infected: u64,
    pub killed: u64,
    pub recovered: u64,
}

/// Whether win/loss is evaluated this month: only on `interval` boundaries
/// strictly past the grace period.
pub fn is_evaluation_month(month: u32, interval: u32, grace_months: u32) -> bool {
    interval != 0 && month > grace_months && month % interval == 0
}

/// The epidemic is collapsing: weighted recoveries outpace new damage.
pub fn epidemic_collapsed(tally: &MonthlyTally, recovery_dominance: f64) -> bool {
    recovery_dominance * tally.recovered as f64 > (tally.newly_infected + tally.killed) as f64
}

/// The epidemic has stalled below the monthly spread floor.
pub fn epidemic_stagnant(tally: &MonthlyTally, stagnation_floor: u64) -> bool {
    tally.newly_infected < stagnation_floor
}

/// True only if every city's combined recovered+infected share meets the
/// threshold. A single city below it fails the whole check.
pub fn all_cities_meet_threshold<I>(combined_shares: I, threshold: f64) -> bool
where
    I: IntoIterator<Item = f64>,
{
    combined_shares.into_iter().all(|share| share >= threshold)
}
