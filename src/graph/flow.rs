//! # Flow Network
//!
//! A [`WeightedGraph`] with a distinguished source and sink, plus the
//! Edmonds–Karp maximum flow and the minimum cut read off its residual.
//!
//! ## Cut tie-break
//!
//! The source side of the cut is the set of nodes reachable from the source
//! in the final residual graph. That is the *smallest* source side among all
//! minimum cuts, so any node that could sit on either side of an equally
//! cheap cut lands on the sink side. Callers decoding the cut (the speller)
//! rely on this.

use std::fmt;
use std::hash::Hash;
use hashbrown::HashSet;
use tracing::{debug, trace};

use super::{Path, WeightedGraph};

// ============================================================================
// Capacity
// ============================================================================

/// Edge capacity: a nonnegative integer with saturating arithmetic.
pub trait Capacity: Copy + Ord + fmt::Debug {
    const ZERO: Self;
    const MAX: Self;

    fn saturating_add(self, rhs: Self) -> Self;
    fn saturating_sub(self, rhs: Self) -> Self;
}

macro_rules! impl_capacity {
    ($($t:ty),*) => {
        $(
            impl Capacity for $t {
                const ZERO: Self = 0;
                const MAX: Self = <$t>::MAX;

                fn saturating_add(self, rhs: Self) -> Self {
                    <$t>::saturating_add(self, rhs)
                }

                fn saturating_sub(self, rhs: Self) -> Self {
                    <$t>::saturating_sub(self, rhs)
                }
            }
        )*
    };
}

impl_capacity!(u8, u16, u32, u64, u128, usize);

// ============================================================================
// Minimum cut
// ============================================================================

/// A source/sink partition of a flow network's nodes.
#[derive(Debug, Clone)]
pub struct MinimumCut<N> {
    pub source_side: HashSet<N>,
    pub sink_side: HashSet<N>,
}

impl<N: Eq + Hash> MinimumCut<N> {
    pub fn is_source_side(&self, node: &N) -> bool {
        self.source_side.contains(node)
    }

    pub fn is_sink_side(&self, node: &N) -> bool {
        self.sink_side.contains(node)
    }
}

// ============================================================================
// FlowNetwork
// ============================================================================

#[derive(Debug, Clone)]
pub struct FlowNetwork<N, W> {
    graph: WeightedGraph<N, W>,
    source: N,
    sink: N,
}

impl<N: Clone + Eq + Hash, W: Capacity> FlowNetwork<N, W> {
    /// Wrap `graph`, inserting `source` and `sink` if absent.
    ///
    /// # Panics
    ///
    /// If `source == sink`.
    pub fn new(mut graph: WeightedGraph<N, W>, source: N, sink: N) -> Self {
        assert!(source != sink, "a flow network needs distinct source and sink");
        graph.insert_node(source.clone());
        graph.insert_node(sink.clone());
        Self { graph, source, sink }
    }

    pub fn source(&self) -> &N {
        &self.source
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn graph(&self) -> &WeightedGraph<N, W> {
        &self.graph
    }

    /// Set the capacity of `from -> to`. Zero capacity removes the edge.
    pub fn insert_edge(&mut self, from: N, to: N, capacity: W) {
        if capacity > W::ZERO {
            self.graph.insert_edge(from, to, capacity);
        } else {
            self.graph.remove_edge(&from, &to);
        }
    }

    /// Fewest-edges source→sink path over edges with positive capacity.
    pub fn shortest_augmenting_path(&self) -> Option<Path<N>> {
        augmenting_path(&self.graph, &self.source, &self.sink)
    }

    /// Edmonds–Karp. Returns the flow value and the final residual graph.
    pub fn maximum_flow_and_residual_network(&self) -> (W, WeightedGraph<N, W>) {
        let mut residual = self.graph.clone();
        let mut flow = W::ZERO;
        let mut augmentations = 0usize;

        while let Some(path) = augmenting_path(&residual, &self.source, &self.sink) {
            let pushed = push_flow(&mut residual, &path);
            trace!(?pushed, hops = path.len(), "pushed flow along augmenting path");
            flow = flow.saturating_add(pushed);
            augmentations += 1;
        }

        debug!(
            ?flow,
            augmentations,
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "maximum flow converged"
        );
        (flow, residual)
    }

    /// Minimum cut, with ties resolved toward the sink side.
    pub fn minimum_cut(&self) -> MinimumCut<N> {
        let (_, residual) = self.maximum_flow_and_residual_network();
        let source_side: HashSet<N> = residual
            .breadth_first_search_where(&self.source, |w| *w > W::ZERO)
            .into_iter()
            .collect();
        let sink_side = self
            .graph
            .nodes()
            .filter(|n| !source_side.contains(*n))
            .cloned()
            .collect();
        MinimumCut { source_side, sink_side }
    }

    /// Total capacity of the edges crossing from `cut`'s source side to its
    /// sink side, measured on this (pre-flow) network.
    pub fn cut_capacity(&self, cut: &MinimumCut<N>) -> W {
        self.graph
            .edges()
            .filter(|(from, to, _)| cut.is_source_side(from) && cut.is_sink_side(to))
            .fold(W::ZERO, |total, (_, _, w)| total.saturating_add(*w))
    }
}

fn augmenting_path<N: Clone + Eq + Hash, W: Capacity>(
    residual: &WeightedGraph<N, W>,
    source: &N,
    sink: &N,
) -> Option<Path<N>> {
    residual.shortest_path_where(source, sink, |w| *w > W::ZERO)
}

/// Push the bottleneck amount of flow along `path` in `residual`.
///
/// Forward edges lose the bottleneck (and disappear at zero); reverse edges
/// gain it (and appear if absent). Returns the amount pushed.
pub fn push_flow<N: Clone + Eq + Hash, W: Capacity>(residual: &mut WeightedGraph<N, W>, path: &Path<N>) -> W {
    let bottleneck = path
        .edges()
        .filter_map(|edge| residual.weight(&edge.from, &edge.to).copied())
        .min()
        .unwrap_or(W::ZERO);
    if bottleneck == W::ZERO {
        return W::ZERO;
    }

    for edge in path.edges() {
        residual.update_edge(&edge.from, &edge.to, |w| w.saturating_sub(bottleneck));
        if residual.weight(&edge.from, &edge.to) == Some(&W::ZERO) {
            residual.remove_edge(&edge.from, &edge.to);
        }
        if !residual.update_edge(&edge.to, &edge.from, |w| w.saturating_add(bottleneck)) {
            residual.insert_edge(edge.to, edge.from, bottleneck);
        }
    }

    bottleneck
}

// ============================================================================
// Tests
// ============================================================================
