//! Clamped monthly toll and new-infection arithmetic.
//!
//! Every function takes its uniform random draws as explicit `f64`
//! arguments in [0, 1), so the stochastic step stays a pure function of
//! state plus draws and the engine alone owns the random source.

/// Deaths this month among the currently infected.
///
/// Two independent draws damp the fatality-rate share; the result is
/// clamped to the infected count.
pub fn killed(r1: f64, r2: f64, currently_infected: u64, fatality_rate: f64) -> u64 {
    let raw = (r1 * r2 * currently_infected as f64 * fatality_rate).round();
    clamp_count(raw, currently_infected)
}

/// Recoveries this month, out of those who did not die.
///
/// `currently_infected` is the count at the start of the month, before the
/// month's deaths are subtracted; the clamp keeps deaths plus recoveries
/// within that starting count.
pub fn recovered(
    r1: f64,
    r2: f64,
    currently_infected: u64,
    killed: u64,
    fatality_rate: f64,
) -> u64 {
    let raw = (r1 * r2 * currently_infected as f64 * (1.0 - fatality_rate)).round();
    clamp_count(raw, currently_infected.saturating_sub(killed))
}

/// Infectious social interactions generated by the infected this month.
pub fn interactions(
    r: f64,
    interactions_per_day: u32,
    days_per_month: u32,
    proximity_constant: f64,
    currently_infected: u64,
) -> u64 {
    let raw = r
        * interactions_per_day as f64
        * days_per_month as f64
        * (1.0 + proximity_constant)
        * currently_infected as f64;
    raw.round() as u64
}

/// Of the month's interactions, how many reached someone who could catch
/// the pathogen. Recovered individuals are immune.
pub fn newly_susceptible(
    r: f64,
    interactions: u64,
    susceptibility_rate: f64,
    percent_recovered: f64,
) -> u64 {
    let raw = r * interactions as f64 * susceptibility_rate * (1.0 - percent_recovered);
    clamp_count(raw.round(), u64::MAX)
}

/// New infections this month, capped so infected plus recovered never
/// exceeds the (post-death) population.
pub fn newly_infected(
    r: f64,
    newly_susceptible: u64,
    infection_rate: f64,
    currently_infected: u64,
    total_recovered: u64,
    population: u64,
) -> u64 {
    let raw = (r * newly_susceptible as f64 * infection_rate).round();
    let headroom = population.saturating_sub(currently_infected.saturating_add(total_recovered));
    clamp_count(raw, headroom)
}

/// Clamp a rounded float count into `[0, cap]`.
fn clamp_count(raw: f64, cap: u64) -> u64 {
    if raw <= 0.0 {
        0
    } else {
        (raw as u64).min(cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_killed_known_value() {
        // 0.5 * 0.5 * 1000 * 0.2 = 50
        assert_eq!(killed(0.5, 0.5, 1000, 0.2), 50);
    }

    #[test]
    fn test_killed_clamped_to_infected() {
        // Fatality rates above 1 (upgraded bacteria) cannot kill more
        // people than are infected.
        assert_eq!(killed(1.0, 1.0, 10, 5.0), 10);
    }

    #[test]
    fn test_killed_zero_draws() {
        assert_eq!(killed(0.0, 0.9, 1000, 0.5), 0);
    }

    #[test]
    fn test_recovered_known_value() {
        // 0.5 * 0.5 * 1000 * (1 - 0.2) = 200
        assert_eq!(recovered(0.5, 0.5, 1000, 0, 0.2), 200);
    }

    #[test]
    fn test_recovered_clamped_by_deaths() {
        // Only 1000 - 900 = 100 people are left to recover.
        assert_eq!(recovered(1.0, 1.0, 1000, 900, 0.0), 100);
    }

    #[test]
    fn test_recovered_negative_survival_clamped() {
        // Fatality above 1 makes the survival share negative; nobody
        // recovers rather than a negative count propagating.
        assert_eq!(recovered(0.9, 0.9, 1000, 0, 1.5), 0);
    }

    #[test]
    fn test_interactions_known_value() {
        // 0.5 * 12 * 30 * (1 + 0.5) * 10 = 2700
        assert_eq!(interactions(0.5, 12, 30, 0.5, 10), 2700);
    }

    #[test]
    fn test_interactions_none_without_infected() {
        assert_eq!(interactions(0.9, 12, 30, 0.9, 0), 0);
    }

    #[test]
    fn test_newly_susceptible_known_value() {
        // 0.5 * 2700 * 0.225 * (1 - 0.2) = 243
        assert_eq!(newly_susceptible(0.5, 2700, 0.225, 0.2), 243);
    }

    #[test]
    fn test_newly_susceptible_full_immunity() {
        assert_eq!(newly_susceptible(0.9, 5000, 0.5, 1.0), 0);
    }

    #[test]
    fn test_newly_infected_known_value() {
        // 0.5 * 243 * 0.135 = 16.4 -> 16
        assert_eq!(newly_infected(0.5, 243, 0.135, 100, 0, 100_000), 16);
    }

    #[test]
    fn test_newly_infected_capped_by_population() {
        // Population 1000, 600 infected, 300 recovered: 100 of headroom.
        assert_eq!(newly_infected(1.0, 100_000, 1.0, 600, 300, 1000), 100);
    }

    #[test]
    fn test_newly_infected_no_headroom() {
        assert_eq!(newly_infected(1.0, 100_000, 1.0, 700, 300, 1000), 0);
    }
}
