//! # Graph Layer
//!
//! One generic directed graph with weighted edges, and the flow network
//! built on top of it. Nothing in here knows about pitches.
//!
//! ```text
//! WeightedGraph<N, W>  ── nodes, directed weighted edges, BFS, paths
//!        │
//! FlowNetwork<N, W>    ── + source/sink, Edmonds–Karp, minimum cut
//! ```

pub mod path;
pub mod weighted;
pub mod flow;

pub use path::Path;
pub use weighted::WeightedGraph;
pub use flow::{Capacity, FlowNetwork, MinimumCut, push_flow};

use std::fmt;
use serde::{Deserialize, Serialize};

/// A directed edge, identified by its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge<N> {
    pub from: N,
    pub to: N,
}

impl<N> Edge<N> {
    pub fn new(from: N, to: N) -> Self {
        Self { from, to }
    }

    pub fn reversed(self) -> Self {
        Self { from: self.to, to: self.from }
    }
}

impl<N: fmt::Display> fmt::Display for Edge<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
