//! Engine configuration - every step constant, lifted out of the systems.

use serde::{Deserialize, Serialize};

/// Tunable constants for one simulation run.
///
/// The defaults reproduce the standard ruleset; tests and the simtest
/// harness override individual fields via struct update syntax.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Social interactions per infected person per day.
    pub social_interactions_per_day: u32,
    /// Days folded into one simulated month.
    pub days_per_month: u32,
    /// Monthly population growth rate applied to every city, affected or
    /// not.
    pub monthly_growth_rate: f64,
    /// Countermeasure pressure accrued each month.
    pub pressure_step: f64,
    /// A pressure roll above this value triggers a countermeasure.
    pub trigger_threshold: f64,
    /// Countermeasure applications at which the run is lost.
    pub max_countermeasures: u32,
    /// Weight of monthly recoveries in the die-out loss test.
    pub recovery_dominance: f64,
    /// Minimum monthly new infections before the run counts as stagnant.
    pub stagnation_floor: u64,
    /// Combined recovered+infected share every city must reach to win.
    pub win_threshold: f64,
    /// Months before win/loss evaluation begins.
    pub grace_months: u32,
    /// Evaluation runs on these month boundaries once past the grace
    /// period.
    pub evaluation_interval: u32,
    /// Seed for the engine's random source; equal seeds give equal runs.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            social_interactions_per_day: 12,
            days_per_month: 30,
            monthly_growth_rate: 0.0073,
            pressure_step: 0.1,
            trigger_threshold: 0.9,
            max_countermeasures: 16,
            recovery_dominance: 0.05,
            stagnation_floor: 100,
            win_threshold: 0.8,
            grace_months: 24,
            evaluation_interval: 12,
            seed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.social_interactions_per_day, 12);
        assert_eq!(config.days_per_month, 30);
        assert!((config.monthly_growth_rate - 0.0073).abs() < 1e-12);
        assert_eq!(config.max_countermeasures, 16);
        assert!((config.win_threshold - 0.8).abs() < 1e-12);
        assert_eq!(config.grace_months, 24);
        assert_eq!(config.evaluation_interval, 12);
    }
}
