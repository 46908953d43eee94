//! Tendencies: the binary labels the minimum cut assigns.

use std::fmt;
use serde::{Deserialize, Serialize};

/// Which side of the cut a node fell on: source side is `Down`, sink side
/// is `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tendency {
    Down,
    Up,
}

impl fmt::Display for Tendency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tendency::Down => write!(f, "down"),
            Tendency::Up => write!(f, "up"),
        }
    }
}

/// The tendencies of one pitch's two nodes: `(up node, down node)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TendencyPair {
    pub up: Tendency,
    pub down: Tendency,
}

impl TendencyPair {
    /// The three pairs a cut can produce, ordered by how many of the
    /// pitch's nodes sit on the sink side. `(down, up)` is never produced.
    pub const STATES: [TendencyPair; 3] = [
        TendencyPair::new(Tendency::Down, Tendency::Down),
        TendencyPair::new(Tendency::Up, Tendency::Down),
        TendencyPair::new(Tendency::Up, Tendency::Up),
    ];

    pub const fn new(up: Tendency, down: Tendency) -> Self {
        Self { up, down }
    }
}

impl fmt::Display for TendencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.up, self.down)
    }
}

/// Which way a spelling leans from its pitch class's neutral letter.
///
/// `Up` spells with the letter below (raising accidentals), `Down` with the
/// letter above (lowering accidentals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierDirection {
    Down,
    Neutral,
    Up,
}

impl ModifierDirection {
    pub const ALL: [ModifierDirection; 3] = [
        ModifierDirection::Down,
        ModifierDirection::Neutral,
        ModifierDirection::Up,
    ];
}
