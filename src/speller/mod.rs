//! # Pitch Speller
//!
//! Builds a flow network from a set of pitches, takes its minimum cut, and
//! reads each pitch's spelling off the side its two nodes fell on.
//!
//! ```text
//!            ┌──────── Down(i) ──────┐
//!  source ───┤           ▲ │ big-M   ├─── ... pairwise edges
//!            │           │ ▼         │
//!            └──────── Up(i) ────────┴──► sink
//! ```
//!
//! The big-M edge `Up(i) -> Down(i)` outweighs every finite edge together,
//! so no minimum cut puts `Up(i)` on the source side with `Down(i)` on the
//! sink side. Class 8 also gets `Down(i) -> Up(i)` at big-M, leaving it only
//! `(down, down)` and `(up, up)`.

pub mod config;
pub mod node;
pub(crate) mod weights;

pub use config::{SpellerConfig, Weighting, DEFAULT_PIVOT};
pub use node::{PitchNode, Role};

use std::collections::BTreeMap;
use tracing::debug;

use crate::graph::{FlowNetwork, MinimumCut, WeightedGraph};
use crate::model::{Category, Pitch, PitchClass, SpelledPitch, Spelling, Tendency, TendencyPair};
use crate::Result;

#[derive(Debug, Clone)]
pub struct PitchSpeller {
    pitches: BTreeMap<usize, Pitch>,
    classes: BTreeMap<usize, PitchClass>,
    config: SpellerConfig,
    network: FlowNetwork<PitchNode, u64>,
}

impl PitchSpeller {
    /// Speller with the default parsimony weighting around `pivot`.
    pub fn new(pitches: BTreeMap<usize, Pitch>, pivot: Spelling) -> Result<Self> {
        Self::with_config(pitches, SpellerConfig::default().with_pivot(pivot))
    }

    /// Fails with `InvalidPitchClass` if any pitch is not a whole note number,
    /// and with `CapacityOverflow` if the weighting's capacities, or their
    /// big-M total, do not fit in a `u64`.
    pub fn with_config(pitches: BTreeMap<usize, Pitch>, config: SpellerConfig) -> Result<Self> {
        let classes = pitches
            .iter()
            .map(|(&index, pitch)| pitch.class().map(|class| (index, class)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        let network = build_network(&classes, &config)?;

        debug!(
            pitches = classes.len(),
            nodes = network.graph().node_count(),
            edges = network.graph().edge_count(),
            "built pitch spelling network"
        );

        Ok(Self { pitches, classes, config, network })
    }

    pub fn pitches(&self) -> &BTreeMap<usize, Pitch> {
        &self.pitches
    }

    pub fn config(&self) -> &SpellerConfig {
        &self.config
    }

    pub fn network(&self) -> &FlowNetwork<PitchNode, u64> {
        &self.network
    }

    /// The tendency pair of every pitch under the minimum cut.
    pub fn tendencies(&self) -> BTreeMap<usize, TendencyPair> {
        let cut = self.network.minimum_cut();
        self.classes
            .keys()
            .map(|&index| (index, tendency_pair(&cut, index)))
            .collect()
    }

    /// Spell every pitch.
    ///
    /// # Panics
    ///
    /// If the cut yields a tendency pair missing from the pitch's category
    /// table. The big-M edges rule that out.
    pub fn spell(&self) -> BTreeMap<usize, SpelledPitch> {
        self.tendencies()
            .into_iter()
            .map(|(index, pair)| {
                let class = self.classes[&index];
                let spelling = Category::of(class).spelling(class, pair).unwrap_or_else(|| {
                    panic!("unreachable tendency combination {pair} for pitch class {class} at index {index}")
                });
                (index, SpelledPitch::new(self.pitches[&index], spelling))
            })
            .collect()
    }
}

fn tendency_of(cut: &MinimumCut<PitchNode>, node: PitchNode) -> Tendency {
    if cut.is_source_side(&node) { Tendency::Down } else { Tendency::Up }
}

fn tendency_pair(cut: &MinimumCut<PitchNode>, index: usize) -> TendencyPair {
    TendencyPair::new(
        tendency_of(cut, PitchNode::up(index)),
        tendency_of(cut, PitchNode::down(index)),
    )
}

fn build_network(classes: &BTreeMap<usize, PitchClass>, config: &SpellerConfig) -> Result<FlowNetwork<PitchNode, u64>> {
    let indices: Vec<usize> = classes.keys().copied().collect();
    let finite = match &config.weighting {
        Weighting::Parsimony { pivot_weight, pairwise_weight } => {
            weights::parsimony(classes, config.pivot, *pivot_weight, *pairwise_weight)?
        }
        Weighting::Uniform { capacity } => weights::uniform(&indices, *capacity)?,
        Weighting::Explicit(assignment) => weights::explicit(&indices, assignment)?,
    };

    let mut graph = WeightedGraph::new();
    graph.insert_node(PitchNode::Source);
    graph.insert_node(PitchNode::Sink);
    for node in weights::internal_nodes(&indices) {
        graph.insert_node(node);
    }
    for (&from, &to, &w) in finite.edges() {
        graph.insert_edge(from, to, w);
    }

    let big_m = weights::big_m(finite.edges().map(|(_, _, w)| w))?;
    for (&index, &class) in classes {
        graph.insert_edge(PitchNode::up(index), PitchNode::down(index), big_m);
        if Category::of(class) == Category::Ambiguous {
            graph.insert_edge(PitchNode::down(index), PitchNode::up(index), big_m);
        }
    }

    Ok(FlowNetwork::new(graph, PitchNode::Source, PitchNode::Sink))
}
