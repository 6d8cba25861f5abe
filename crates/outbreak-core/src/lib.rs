//! Outbreak Core - city-network epidemic simulation engine.
//!
//! A turn-based model of an infectious agent spreading month by month
//! across a network of cities. Cities are entities in a `hecs` ECS world:
//! - **Entities**: one per city, spawned in dataset order
//! - **Components**: pure data ([`components::City`],
//!   [`components::Geography`], [`components::Epidemic`])
//! - **Systems**: monthly dynamics that query and update components
//!
//! The dense pairwise transmission graph and the run state (month counter,
//! affected set, countermeasure pressure, terminal flags) live beside the
//! world in [`engine::SimulationEngine`]. All randomness flows from a
//! single seeded source owned by the engine, so equal seeds give equal
//! runs.
//!
//! # Example
//!
//! ```rust,no_run
//! use outbreak_core::prelude::*;
//! use outbreak_logic::city::CityRecord;
//! use outbreak_logic::pathogen::Pathogen;
//!
//! let cities = vec![
//!     CityRecord {
//!         name: "New York".into(),
//!         population: 8_804_190,
//!         land_area: 300.5,
//!         latitude: 40.7128,
//!         longitude: -74.0060,
//!     },
//!     CityRecord {
//!         name: "Chicago".into(),
//!         population: 2_746_388,
//!         land_area: 227.7,
//!         latitude: 41.8781,
//!         longitude: -87.6298,
//!     },
//! ];
//!
//! let pathogen = Pathogen::from_tag("virus", "Ashish").unwrap();
//! let config = SimulationConfig::default();
//! let mut engine = SimulationEngine::new(cities, pathogen, "New York", config).unwrap();
//!
//! while !engine.step_month() {}
//! println!("{}", engine.summarize());
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod graph;
pub mod systems;

/// Commonly used types for convenient importing.
pub mod prelude {
    pub use crate::components::{City, CityId, Epidemic, Geography};
    pub use crate::config::SimulationConfig;
    pub use crate::engine::{
        CitySnapshot, RunState, SetupError, SimulationEngine, YearOutcome,
    };
    pub use crate::graph::{TransmissionGraph, TransmissionLink};
}
