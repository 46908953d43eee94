//! # pitch-speller: Enharmonic Spelling by Minimum Cut
//!
//! Chooses a letter name and accidental for every pitch in a passage by
//! encoding each pitch as two binary "tendency" nodes in a flow network
//! and reading the spellings off a minimum cut.
//!
//! ## Design Principles
//!
//! 1. **One graph type**: `WeightedGraph<N, W>` backs the speller, the
//!    residual network and the inverter alike
//! 2. **Tables are data**: the six spelling categories are `const` tables
//! 3. **Deterministic cuts**: ties always go to the sink side
//! 4. **Invertible**: `SpellingInverter` produces capacities for any target
//!    spelling, which the speller accepts back as `Weighting::Explicit`
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use pitch_speller::{spell, LetterName, Pitch, Spelling};
//!
//! # fn example() -> pitch_speller::Result<()> {
//! let pitches = BTreeMap::from([(0, Pitch::from(61)), (1, Pitch::from(65))]);
//! let spelled = spell(&pitches, Spelling::natural(LetterName::D))?;
//!
//! assert_eq!(spelled[&0].to_string(), "Db4");
//! assert_eq!(spelled[&1].to_string(), "F4");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Weightings
//!
//! | Weighting   | Capacities                                           |
//! |-------------|------------------------------------------------------|
//! | `Parsimony` | (default) line-of-fifths distance to pivot and pairs |
//! | `Uniform`   | one capacity on every source, sink and internal edge |
//! | `Explicit`  | a `WeightAssignment` from the inverter               |

use std::collections::BTreeMap;

// ============================================================================
// Modules
// ============================================================================

pub mod graph;
pub mod model;
pub mod speller;
pub mod inverter;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    Category, LetterName, Modifier, ModifierDirection,
    Pitch, PitchClass, SpelledPitch, Spelling, Tendency, TendencyPair,
};

// ============================================================================
// Re-exports: Graph
// ============================================================================

pub use graph::{Edge, FlowNetwork, MinimumCut, Path, WeightedGraph};

// ============================================================================
// Re-exports: Speller / Inverter
// ============================================================================

pub use speller::{PitchNode, PitchSpeller, Role, SpellerConfig, Weighting, DEFAULT_PIVOT};
pub use inverter::{AssignedNode, SpellingInverter, WeightAssignment, WeightDependencies};

// ============================================================================
// Entry points
// ============================================================================

/// Spell `pitches` with the default parsimony weighting around `pivot`.
pub fn spell(pitches: &BTreeMap<usize, Pitch>, pivot: Spelling) -> Result<BTreeMap<usize, SpelledPitch>> {
    Ok(PitchSpeller::new(pitches.clone(), pivot)?.spell())
}

/// Capacities under which the speller reproduces `spellings`.
pub fn invert(spellings: &BTreeMap<usize, Spelling>) -> Result<WeightAssignment> {
    SpellingInverter::new(spellings.clone()).weights()
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid pitch class: {value} (expected an integer in 0..=11)")]
    InvalidPitchClass { value: f64 },

    #[error("Unresolved weight dependency: cycle closes at {from} -> {to}")]
    UnresolvedDependency { from: PitchNode, to: PitchNode },

    #[error("Capacity overflow: {0}")]
    CapacityOverflow(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
