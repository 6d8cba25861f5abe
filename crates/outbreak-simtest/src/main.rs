//! Outbreak Headless Simulation Harness
//!
//! Validates the epidemic engine end to end without a GUI. Runs entirely
//! in-process - no rendering, no prompts, no network.
//!
//! Usage:
//!   cargo run -p outbreak-simtest
//!   cargo run -p outbreak-simtest -- --verbose

use outbreak_core::prelude::*;
use outbreak_logic::city::CityRecord;
use outbreak_logic::geo;
use outbreak_logic::outcome;
use outbreak_logic::pathogen::{Pathogen, PathogenKind, TraitSlot};

// ── City dataset (bundled snapshot of the census scrape) ────────────────
const CITIES_JSON: &str = include_str!("../../../data/us_cities.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn check(name: &str, passed: bool, detail: String) -> Self {
        Self {
            name: name.to_string(),
            passed,
            detail,
        }
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Outbreak Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. City dataset validation
    let cities = load_cities(&mut results);

    // 2. Pathogen model formulas
    results.extend(validate_pathogens());

    // 3. Geometry and transmission links
    results.extend(validate_geometry(&cities));

    // 4. Win threshold predicate
    results.extend(validate_threshold(&cities));

    // 5. Single-city loss scenario
    results.extend(validate_single_city_loss());

    // 6. Full-dataset seeded run
    results.extend(validate_full_run(&cities));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. City dataset ─────────────────────────────────────────────────────

fn load_cities(results: &mut Vec<TestResult>) -> Vec<CityRecord> {
    println!("--- City Dataset ---");

    let cities: Vec<CityRecord> = match serde_json::from_str(CITIES_JSON) {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult::check(
                "dataset_parse",
                false,
                format!("JSON parse error: {}", e),
            ));
            return Vec::new();
        }
    };

    results.push(TestResult::check(
        "dataset_size",
        cities.len() >= 20,
        format!("{} cities", cities.len()),
    ));

    let mut names = std::collections::HashSet::new();
    let duplicates: Vec<&str> = cities
        .iter()
        .filter(|c| !names.insert(c.name.as_str()))
        .map(|c| c.name.as_str())
        .collect();
    results.push(TestResult::check(
        "dataset_unique_names",
        duplicates.is_empty(),
        format!("duplicates: {:?}", duplicates),
    ));

    let bad_fields = cities
        .iter()
        .filter(|c| {
            c.population == 0
                || c.land_area <= 0.0
                || !(24.0..50.0).contains(&c.latitude)
                || !(-125.0..-66.0).contains(&c.longitude)
        })
        .count();
    results.push(TestResult::check(
        "dataset_fields_plausible",
        bad_fields == 0,
        format!("{} records out of range", bad_fields),
    ));

    cities
}

// ── 2. Pathogen model ───────────────────────────────────────────────────

fn validate_pathogens() -> Vec<TestResult> {
    println!("--- Pathogen Model ---");
    let mut results = Vec::new();

    // Virus with initial traits (0.3, 0.5, 0.3) must report its derived
    // rates immediately after construction, before any step.
    let virus = Pathogen::new(PathogenKind::Virus, "harness");
    results.push(TestResult::check(
        "virus_initial_rates",
        (virus.infection_rate() - 0.135).abs() < 1e-12
            && (virus.susceptibility_rate() - 0.225).abs() < 1e-12
            && (virus.fatality_rate() - 0.0225).abs() < 1e-12,
        format!(
            "susceptibility {:.4}, infection {:.4}, fatality {:.4}",
            virus.susceptibility_rate(),
            virus.infection_rate(),
            virus.fatality_rate()
        ),
    ));

    let bacteria = Pathogen::new(PathogenKind::Bacteria, "harness");
    results.push(TestResult::check(
        "bacteria_initial_rates",
        (bacteria.susceptibility_rate() - 0.2).abs() < 1e-12
            && (bacteria.infection_rate() - 0.24).abs() < 1e-12
            && (bacteria.fatality_rate() - 0.2f64.powf(0.2)).abs() < 1e-12,
        format!("fatality {:.4}", bacteria.fatality_rate()),
    ));

    let fungus = Pathogen::new(PathogenKind::Fungus, "harness");
    results.push(TestResult::check(
        "fungus_initial_rates",
        (fungus.susceptibility_rate() - 0.4 / 3.0).abs() < 1e-12
            && (fungus.infection_rate() - 0.495).abs() < 1e-12,
        format!("infection {:.4}", fungus.infection_rate()),
    ));

    // Weaken then upgrade must not restore the original trait value.
    let mut pathogen = Pathogen::new(PathogenKind::Bacteria, "harness");
    pathogen.weaken_trait(TraitSlot::First);
    pathogen.upgrade_trait(TraitSlot::First);
    let compounded = pathogen.trait_value(TraitSlot::First);
    results.push(TestResult::check(
        "weaken_upgrade_compounds",
        (compounded - 0.2 * 0.95 * 1.05).abs() < 1e-12 && compounded < 0.2,
        format!("0.2 -> {:.6}", compounded),
    ));

    // Virus fatality clamps to zero once transmission effectiveness falls
    // below 0.225.
    let mut weak_virus = Pathogen::new(PathogenKind::Virus, "harness");
    for _ in 0..6 {
        weak_virus.weaken_trait(TraitSlot::Third);
    }
    results.push(TestResult::check(
        "negative_fatality_clamped",
        weak_virus.fatality_rate() == 0.0 && weak_virus.clamp_events() > 0,
        format!(
            "trait {:.4}, fatality {}, {} clamps",
            weak_virus.trait_value(TraitSlot::Third),
            weak_virus.fatality_rate(),
            weak_virus.clamp_events()
        ),
    ));

    results.push(TestResult::check(
        "unknown_tag_rejected",
        Pathogen::from_tag("prion", "harness").is_err()
            && Pathogen::from_tag("Fungus", "harness").is_ok(),
        "tag parsing".to_string(),
    ));

    results
}

// ── 3. Geometry and transmission ────────────────────────────────────────

fn validate_geometry(cities: &[CityRecord]) -> Vec<TestResult> {
    println!("--- Geometry & Transmission ---");
    let mut results = Vec::new();
    if cities.is_empty() {
        return results;
    }

    // Haversine symmetry across every dataset pair.
    let mut worst = 0.0f64;
    for a in cities {
        for b in cities {
            let forward = geo::haversine_distance(a.latitude, a.longitude, b.latitude, b.longitude);
            let backward =
                geo::haversine_distance(b.latitude, b.longitude, a.latitude, a.longitude);
            worst = worst.max((forward - backward).abs());
        }
    }
    results.push(TestResult::check(
        "haversine_symmetric",
        worst < 1e-9,
        format!("worst asymmetry {:e}", worst),
    ));

    let degree = geo::haversine_distance(0.0, 0.0, 0.0, 1.0);
    results.push(TestResult::check(
        "haversine_scale",
        (degree - 69.04).abs() < 0.05,
        format!("one degree at the equator = {:.2}", degree),
    ));

    let ny_la = geo::haversine_distance(40.7128, -74.0060, 34.0522, -118.2437);
    results.push(TestResult::check(
        "haversine_ny_la",
        (2350.0..2550.0).contains(&ny_la),
        format!("{:.0} units", ny_la),
    ));

    // Close pair: Washington-Baltimore sit well under the 200-unit flight
    // cutoff, so with no infections the flight constant is exactly
    // logistic(0) = 0.5 while the land constant keeps its proximity term.
    let close = engine_from(cities, "Washington");
    let washington = close.lookup_city("Washington").expect("Washington");
    let baltimore = close.lookup_city("Baltimore").expect("Baltimore");
    let link = close
        .neighbors_of(washington)
        .iter()
        .find(|l| l.end == baltimore)
        .copied()
        .expect("link");
    results.push(TestResult::check(
        "flight_cutoff_close_pair",
        link.distance < 200.0
            && (link.flight_constant - 0.5).abs() < 1e-12
            && link.land_constant > 0.5,
        format!(
            "distance {:.0}, flight {:.4}, land {:.4}",
            link.distance, link.flight_constant, link.land_constant
        ),
    ));

    let new_york = close.lookup_city("New York").expect("New York");
    let los_angeles = close.lookup_city("Los Angeles").expect("Los Angeles");
    let far_link = close
        .neighbors_of(new_york)
        .iter()
        .find(|l| l.end == los_angeles)
        .copied()
        .expect("link");
    results.push(TestResult::check(
        "flight_active_far_pair",
        far_link.distance >= 200.0 && far_link.flight_constant > 0.5,
        format!(
            "distance {:.0}, flight {:.4}",
            far_link.distance, far_link.flight_constant
        ),
    ));

    results
}

// ── 4. Win threshold predicate ──────────────────────────────────────────

fn validate_threshold(cities: &[CityRecord]) -> Vec<TestResult> {
    println!("--- Win Threshold ---");
    let mut results = Vec::new();
    if cities.is_empty() {
        return results;
    }

    // A single city at 0.79 fails the whole check regardless of the rest.
    let shares = vec![1.0, 0.99, 0.79, 1.0];
    results.push(TestResult::check(
        "threshold_one_city_below",
        !outcome::all_cities_meet_threshold(shares, 0.8),
        "0.79 among 1.0s".to_string(),
    ));
    results.push(TestResult::check(
        "threshold_all_at_or_above",
        outcome::all_cities_meet_threshold(vec![0.8, 0.9, 1.0], 0.8),
        "0.8 counts as meeting 0.8".to_string(),
    ));

    // A fresh engine has every share at zero.
    let engine = engine_from(cities, "New York");
    results.push(TestResult::check(
        "threshold_fresh_engine",
        !engine.all_cities_meet_threshold(0.8) && engine.all_cities_meet_threshold(0.0),
        "untouched cities fail 0.8, pass 0.0".to_string(),
    ));

    results
}

// ── 5. Single-city loss ─────────────────────────────────────────────────

fn validate_single_city_loss() -> Vec<TestResult> {
    println!("--- Single-City Loss ---");
    let mut results = Vec::new();

    let records = vec![CityRecord {
        name: "Lonely".to_string(),
        population: 50_000,
        land_area: 30.0,
        latitude: 45.0,
        longitude: -93.0,
    }];
    let pathogen = Pathogen::generic("dud", 0.05, 0.05, 0.01);
    let config = SimulationConfig {
        seed: 11,
        ..SimulationConfig::default()
    };
    let mut engine = SimulationEngine::new(records, pathogen, "Lonely", config)
        .expect("single-city engine");

    let mut won_early = false;
    for _ in 0..24 {
        engine.step_month();
        won_early |= engine.player_won();
    }
    let mut months = engine.month();
    while !engine.step_month() && months < 600 {
        months = engine.month();
    }
    results.push(TestResult::check(
        "single_city_never_won",
        !won_early && !engine.player_won(),
        "no neighbor to infect".to_string(),
    ));
    results.push(TestResult::check(
        "single_city_lost",
        engine.run_state() == RunState::Lost && engine.month() == 36,
        format!("lost at month {}", engine.month()),
    ));

    results
}

// ── 6. Full-dataset run ─────────────────────────────────────────────────

fn validate_full_run(cities: &[CityRecord]) -> Vec<TestResult> {
    println!("--- Full-Dataset Run ---");
    let mut results = Vec::new();
    if cities.is_empty() {
        return results;
    }

    let mut engine = engine_from(cities, "New York");
    let mut twin = engine_from(cities, "New York");

    let mut conserved = true;
    let mut monotonic = true;
    let mut affected_shrank = false;
    let mut deterministic = true;
    let mut last_affected = engine.affected_count();
    let mut last_totals: std::collections::HashMap<String, (u64, u64)> = Default::default();

    for _ in 0..120 {
        let over = engine.step_month();
        let twin_over = twin.step_month();
        deterministic &= over == twin_over && engine.monthly_tally() == twin.monthly_tally();

        for snapshot in engine.affected_snapshots() {
            conserved &=
                snapshot.currently_infected + snapshot.total_recovered <= snapshot.population;
            if let Some(&(recovered, killed)) = last_totals.get(&snapshot.name) {
                monotonic &=
                    snapshot.total_recovered >= recovered && snapshot.total_killed >= killed;
            }
            last_totals.insert(
                snapshot.name.clone(),
                (snapshot.total_recovered, snapshot.total_killed),
            );
        }
        affected_shrank |= engine.affected_count() < last_affected;
        last_affected = engine.affected_count();
        if over {
            break;
        }
    }

    results.push(TestResult::check(
        "run_people_conserved",
        conserved,
        "infected + recovered <= population".to_string(),
    ));
    results.push(TestResult::check(
        "run_totals_monotonic",
        monotonic,
        "recovered/killed never decrease".to_string(),
    ));
    results.push(TestResult::check(
        "run_affected_set_grows_only",
        !affected_shrank,
        format!("{} cities affected by month {}", last_affected, engine.month()),
    ));
    results.push(TestResult::check(
        "run_deterministic_twin",
        deterministic,
        "equal seeds stayed in lockstep".to_string(),
    ));

    let report = engine.summarize();
    results.push(TestResult::check(
        "run_summary_reports_reach",
        report.contains("cities affected") && report.contains("New York"),
        format!("{} report bytes", report.len()),
    ));

    results
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn engine_from(cities: &[CityRecord], start: &str) -> SimulationEngine {
    let pathogen = Pathogen::from_tag("virus", "Harness Strain").expect("virus tag");
    let config = SimulationConfig {
        seed: 1776,
        ..SimulationConfig::default()
    };
    SimulationEngine::new(cities.to_vec(), pathogen, start, config).expect("engine setup")
}
