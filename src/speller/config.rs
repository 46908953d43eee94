//! Speller configuration.
//!
//! ```json
//! { "pivot": { "letter": "c", "modifier": "natural" },
//!   "weighting": { "kind": "parsimony", "pivot_weight": 2, "pairwise_weight": 1 } }
//! ```
//!
//! Every field is optional; missing ones take their defaults.

use serde::{Deserialize, Serialize};

use crate::inverter::WeightAssignment;
use crate::model::{LetterName, Spelling};
use crate::Result;

/// D natural: the centre of the line of fifths.
pub const DEFAULT_PIVOT: Spelling = Spelling::natural(LetterName::D);

/// How the finite capacities of the network are chosen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Weighting {
    /// Minimise line-of-fifths distance to the pivot and between every pair
    /// of pitches.
    Parsimony { pivot_weight: u64, pairwise_weight: u64 },

    /// Every source, sink and interconnecting edge at the same capacity.
    Uniform { capacity: u64 },

    /// Capacities taken from a [`SpellingInverter`](crate::SpellingInverter)
    /// result. Edges not touching this network's nodes are ignored.
    #[serde(skip)]
    Explicit(WeightAssignment),
}

impl Default for Weighting {
    fn default() -> Self {
        Weighting::Parsimony { pivot_weight: 1, pairwise_weight: 1 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellerConfig {
    /// Reference spelling the parsimony weighting measures against.
    pub pivot: Spelling,
    pub weighting: Weighting,
}

impl Default for SpellerConfig {
    fn default() -> Self {
        Self {
            pivot: DEFAULT_PIVOT,
            weighting: Weighting::default(),
        }
    }
}

impl SpellerConfig {
    pub fn with_pivot(mut self, pivot: Spelling) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
