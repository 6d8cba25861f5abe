//! Pathogen variants, tunable traits, and derived rates.
//!
//! A pathogen carries exactly three mutable trait values whose meaning
//! depends on the variant, plus three derived rates (susceptibility,
//! infection, fatality) recomputed from the traits by a variant-specific
//! pure formula after every trait mutation. The countermeasure mechanism
//! may also override a rate directly; the override holds until the next
//! trait mutation recomputes all three.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Multiplier applied by [`Pathogen::weaken_trait`] for every variant.
pub const WEAKEN_FACTOR: f64 = 0.95;

/// The pathogen variant tag, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathogenKind {
    Virus,
    Bacteria,
    Fungus,
    /// Test-only variant whose three traits are the three rates themselves.
    Generic,
}

impl PathogenKind {
    /// Parse a variant tag as supplied by a driving shell.
    ///
    /// The `Generic` variant is deliberately not reachable from a tag.
    pub fn from_tag(tag: &str) -> Result<Self, UnknownPathogen> {
        match tag.to_ascii_lowercase().as_str() {
            "virus" => Ok(Self::Virus),
            "bacteria" => Ok(Self::Bacteria),
            "fungus" => Ok(Self::Fungus),
            _ => Err(UnknownPathogen {
                tag: tag.to_string(),
            }),
        }
    }

    /// Lowercase display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Virus => "virus",
            Self::Bacteria => "bacteria",
            Self::Fungus => "fungus",
            Self::Generic => "generic infection",
        }
    }

    /// Names of the three tunable traits, in slot order.
    pub fn trait_names(self) -> [&'static str; 3] {
        match self {
            Self::Virus => [
                "mutation rate",
                "host dependency factor",
                "transmission effectiveness",
            ],
            Self::Bacteria => ["reproduction rate", "resistance", "environmental tolerance"],
            Self::Fungus => [
                "environmental growth rate",
                "spore reproduction",
                "survivability",
            ],
            Self::Generic => ["susceptibility", "infection", "fatality"],
        }
    }

    /// Trait values a fresh pathogen of this kind starts with.
    fn initial_traits(self) -> [f64; 3] {
        match self {
            Self::Virus => [0.3, 0.5, 0.3],
            Self::Bacteria => [0.2, 0.2, 0.2],
            Self::Fungus => [0.6, 0.7, 0.4],
            Self::Generic => [0.0, 0.0, 0.0],
        }
    }

    /// Per-slot multiplier applied by an upgrade.
    fn growth_factors(self) -> [f64; 3] {
        match self {
            Self::Virus => [1.02, 1.01, 1.01],
            _ => [1.05, 1.05, 1.05],
        }
    }
}

/// One of the three tunable trait slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraitSlot {
    First,
    Second,
    Third,
}

impl TraitSlot {
    pub const ALL: [TraitSlot; 3] = [TraitSlot::First, TraitSlot::Second, TraitSlot::Third];

    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Third => 2,
        }
    }
}

/// Error returned when a pathogen variant tag is not recognized.
#[derive(Debug, Clone)]
pub struct UnknownPathogen {
    pub tag: String,
}

impl fmt::Display for UnknownPathogen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown pathogen variant tag: {:?}", self.tag)
    }
}

impl std::error::Error for UnknownPathogen {}

/// A named infectious agent with three tunable traits and three derived
/// rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pathogen {
    name: String,
    kind: PathogenKind,
    traits: [f64; 3],
    susceptibility_rate: f64,
    infection_rate: f64,
    fatality_rate: f64,
    /// Times a derived rate had to be clamped up to zero.
    clamp_events: u64,
}

impl Pathogen {
    /// Create a pathogen of the given kind with its standard initial traits.
    pub fn new(kind: PathogenKind, name: impl Into<String>) -> Self {
        let mut pathogen = Self {
            name: name.into(),
            kind,
            traits: kind.initial_traits(),
            susceptibility_rate: 0.0,
            infection_rate: 0.0,
            fatality_rate: 0.0,
            clamp_events: 0,
        };
        pathogen.recalculate();
        pathogen
    }

    /// Create a pathogen from a shell-supplied variant tag.
    pub fn from_tag(tag: &str, name: impl Into<String>) -> Result<Self, UnknownPathogen> {
        Ok(Self::new(PathogenKind::from_tag(tag)?, name))
    }

    /// Test-only variant with directly supplied rates. The rates become
    /// the traits, so upgrades and weakens still recompute consistently.
    pub fn generic(
        name: impl Into<String>,
        susceptibility: f64,
        infection: f64,
        fatality: f64,
    ) -> Self {
        let mut pathogen = Self {
            name: name.into(),
            kind: PathogenKind::Generic,
            traits: [susceptibility, infection, fatality],
            susceptibility_rate: 0.0,
            infection_rate: 0.0,
            fatality_rate: 0.0,
            clamp_events: 0,
        };
        pathogen.recalculate();
        pathogen
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PathogenKind {
        self.kind
    }

    pub fn trait_value(&self, slot: TraitSlot) -> f64 {
        self.traits[slot.index()]
    }

    pub fn susceptibility_rate(&self) -> f64 {
        self.susceptibility_rate
    }

    pub fn infection_rate(&self) -> f64 {
        self.infection_rate
    }

    pub fn fatality_rate(&self) -> f64 {
        self.fatality_rate
    }

    /// Times a derived rate was clamped up to zero so far. Exposed so the
    /// engine can log degeneracies without this crate depending on a
    /// logging facade.
    pub fn clamp_events(&self) -> u64 {
        self.clamp_events
    }

    /// Direct rate override, used by the countermeasure mechanism to
    /// degrade a rate independent of the underlying traits.
    pub fn set_susceptibility_rate(&mut self, rate: f64) {
        self.susceptibility_rate = self.clamped(rate);
    }

    /// See [`Pathogen::set_susceptibility_rate`].
    pub fn set_infection_rate(&mut self, rate: f64) {
        self.infection_rate = self.clamped(rate);
    }

    /// See [`Pathogen::set_susceptibility_rate`].
    pub fn set_fatality_rate(&mut self, rate: f64) {
        self.fatality_rate = self.clamped(rate);
    }

    /// Grow one trait by its variant-specific factor and recompute the
    /// derived rates.
    pub fn upgrade_trait(&mut self, slot: TraitSlot) {
        let index = slot.index();
        self.traits[index] *= self.kind.growth_factors()[index];
        self.recalculate();
    }

    /// Shrink one trait by [`WEAKEN_FACTOR`], recompute the derived rates,
    /// and describe the change.
    pub fn weaken_trait(&mut self, slot: TraitSlot) -> String {
        let index = slot.index();
        self.traits[index] *= WEAKEN_FACTOR;
        self.recalculate();
        format!(
            "Medicine has been upgraded. Your {}'s {} has decreased by a factor of {}",
            self.kind.label(),
            self.kind.trait_names()[index],
            WEAKEN_FACTOR
        )
    }

    /// Formatted snapshot of the three traits.
    pub fn describe_stats(&self) -> String {
        let names = self.kind.trait_names();
        let mut out = format!(
            "Your infection is a {}. Here are its stats:",
            self.kind.label()
        );
        for (name, value) in names.iter().zip(self.traits.iter()) {
            out.push_str(&format!("\n   {}: {:.4}", capitalize(name), value));
        }
        out
    }

    /// Recompute all three derived rates from the current traits.
    fn recalculate(&mut self) {
        let [t1, t2, t3] = self.traits;
        let (susceptibility, infection, fatality) = match self.kind {
            PathogenKind::Virus => (t2 * 0.45, t3 * t1 * 1.5, t1 * (t3 - 0.225)),
            PathogenKind::Bacteria => ((t3 * t2).sqrt(), t1 * (1.0 + t3), t2.powf(t2)),
            PathogenKind::Fungus => (t3 / 3.0, t1 * 0.3 + t2 * 0.45, (t1 + t2) / 3.0 * 0.5),
            PathogenKind::Generic => (t1, t2, t3),
        };
        self.susceptibility_rate = self.clamped(susceptibility);
        self.infection_rate = self.clamped(infection);
        self.fatality_rate = self.clamped(fatality);
    }

    /// Rates are probabilities-in-waiting; a formula that dips negative is
    /// clamped to zero and the event counted.
    fn clamped(&mut self, rate: f64) -> f64 {
        if rate < 0.0 {
            self.clamp_events += 1;
            0.0
        } else {
            rate
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
