//! # Spelling Inverter
//!
//! The speller run backwards: given the spelling every pitch should get,
//! find capacities under which the minimum cut produces exactly those
//! spellings.
//!
//! ## Construction
//!
//! 1. Every node is *assigned* the tendency its target spelling needs. The
//!    source is assigned `down`, the sink `up`.
//! 2. The network has the speller's topology: source and sink edges plus
//!    every ordered pair of distinct internal nodes at unit capacity, with
//!    the speller's big-M edges (`Up(i) -> Down(i)`, and `Down(i) -> Up(i)`
//!    for class 8) at one more than the unit total.
//! 3. While a source→sink path remains, take the shortest one. Its first
//!    edge from a `down` node to an `up` node is the edge the cut must
//!    sever; every other edge on the path must outweigh it. Reverse the
//!    severed edge and repeat.
//! 4. Resolve `weight(e) = 1 + Σ weight(d)` over the edges `e` must
//!    outweigh. The big-M edges then get one more than the resolved total.
//!
//! A severed edge is never severed twice and a reversed edge runs
//! `up -> down`, so the dependencies always point at edges severed earlier
//! and cannot form a cycle. Resolution still checks.

use std::collections::BTreeMap;
use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::{Edge, FlowNetwork, WeightedGraph};
use crate::model::{Category, Spelling, Tendency, TendencyPair};
use crate::speller::{weights, PitchNode, Role};
use crate::{Error, Result};

/// Capacities for the speller's network, keyed by node pairs.
pub type WeightAssignment = WeightedGraph<PitchNode, u64>;

/// A node together with the tendency the target spellings fix for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignedNode {
    pub node: PitchNode,
    pub assignment: Tendency,
}

/// For each edge, the edges whose combined capacity it must exceed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightDependencies {
    edges: HashMap<Edge<PitchNode>, HashSet<Edge<PitchNode>>>,
}

impl WeightDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `edge` must outweigh `dependency`.
    pub fn insert(&mut self, edge: Edge<PitchNode>, dependency: Edge<PitchNode>) -> bool {
        self.edges.entry(edge).or_default().insert(dependency)
    }

    pub fn get(&self, edge: &Edge<PitchNode>) -> Option<&HashSet<Edge<PitchNode>>> {
        self.edges.get(edge)
    }

    pub fn depends_on(&self, edge: &Edge<PitchNode>, dependency: &Edge<PitchNode>) -> bool {
        self.get(edge).is_some_and(|deps| deps.contains(dependency))
    }

    /// Number of edges with at least one dependency.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Edge<PitchNode>, &HashSet<Edge<PitchNode>>)> {
        self.edges.iter()
    }
}

#[derive(Debug, Clone)]
pub struct SpellingInverter {
    spellings: BTreeMap<usize, Spelling>,
    network: FlowNetwork<AssignedNode, u64>,
    big_m: u64,
}

impl SpellingInverter {
    pub fn new(spellings: BTreeMap<usize, Spelling>) -> Self {
        let (network, big_m) = build_assigned_network(&spellings);
        Self { spellings, network, big_m }
    }

    pub fn spellings(&self) -> &BTreeMap<usize, Spelling> {
        &self.spellings
    }

    /// The tendency `node` must end up with. `None` for pitches not in the
    /// target set.
    pub fn assignment(&self, node: PitchNode) -> Option<Tendency> {
        assigned_tendency(node, |index| self.spellings.get(&index).map(|s| s.tendencies()))
    }

    /// Network whose nodes carry their assignments: unit capacities plus
    /// the big-M edges that pin each pitch to a legal tendency pair.
    pub fn assigned_network(&self) -> &FlowNetwork<AssignedNode, u64> {
        &self.network
    }

    pub fn weight_dependencies(&self) -> WeightDependencies {
        let mut residual = self.network.graph().unweighted();
        let source = *self.network.source();
        let sink = *self.network.sink();
        let mut dependencies = WeightDependencies::new();
        let mut paths = 0usize;

        while let Some(path) = residual.shortest_path(&source, &sink) {
            let edges: Vec<Edge<AssignedNode>> = path.edges().collect();
            let severed = edges
                .iter()
                .copied()
                .find(|e| e.from.assignment == Tendency::Down && e.to.assignment == Tendency::Up)
                .expect("a path from a down source to an up sink crosses from down to up");
            let key = unassigned(severed);

            for edge in edges.iter().filter(|e| **e != severed) {
                dependencies.insert(unassigned(*edge), key);
            }

            residual.remove_edge(&severed.from, &severed.to);
            residual.insert_edge(severed.to, severed.from, ());
            paths += 1;
        }

        debug!(paths, constrained = dependencies.len(), "extracted weight dependencies");
        dependencies
    }

    /// Capacities for every edge of the assigned network.
    ///
    /// Fails with `UnresolvedDependency` if the dependencies form a cycle,
    /// and with `CapacityOverflow` if a resolved weight leaves `u64`.
    pub fn weights(&self) -> Result<WeightAssignment> {
        let dependencies = self.weight_dependencies();
        let mut finite = Vec::new();
        let mut pinned = Vec::new();
        for (from, to, &w) in self.network.graph().edges() {
            let edge = Edge::new(from.node, to.node);
            if w == self.big_m { pinned.push(edge) } else { finite.push(edge) }
        }
        let resolved = resolve_weights(&finite, &dependencies)?;
        let big_m = weights::big_m(resolved.values())?;

        let mut assignment = WeightAssignment::new();
        for node in self.network.graph().nodes() {
            assignment.insert_node(node.node);
        }
        for edge in finite {
            assignment.insert_edge(edge.from, edge.to, resolved[&edge]);
        }
        for edge in pinned {
            assignment.insert_edge(edge.from, edge.to, big_m);
        }
        Ok(assignment)
    }
}

fn unassigned(edge: Edge<AssignedNode>) -> Edge<PitchNode> {
    Edge::new(edge.from.node, edge.to.node)
}

fn assigned_tendency(node: PitchNode, target: impl Fn(usize) -> Option<TendencyPair>) -> Option<Tendency> {
    match node {
        PitchNode::Source => Some(Tendency::Down),
        PitchNode::Sink => Some(Tendency::Up),
        PitchNode::Internal { index, role } => {
            let pair = target(index)?;
            Some(match role {
                Role::Up => pair.up,
                Role::Down => pair.down,
            })
        }
    }
}

fn build_assigned_network(spellings: &BTreeMap<usize, Spelling>) -> (FlowNetwork<AssignedNode, u64>, u64) {
    let assign = |node: PitchNode| AssignedNode {
        node,
        assignment: assigned_tendency(node, |index| spellings.get(&index).map(|s| s.tendencies()))
            .expect("every node of the assigned network has a target"),
    };
    let pinned = |from: PitchNode, to: PitchNode| match (from, to) {
        (PitchNode::Internal { index: i, role: Role::Up }, PitchNode::Internal { index: j, role: Role::Down }) => i == j,
        (PitchNode::Internal { index: i, role: Role::Down }, PitchNode::Internal { index: j, role: Role::Up }) => {
            i == j && spellings[&i].category() == Category::Ambiguous
        }
        _ => false,
    };
    let internal: Vec<AssignedNode> = spellings
        .keys()
        .flat_map(|&i| [PitchNode::down(i), PitchNode::up(i)])
        .map(assign)
        .collect();
    let source = assign(PitchNode::Source);
    let sink = assign(PitchNode::Sink);

    let mut graph = WeightedGraph::new();
    for &index in spellings.keys() {
        graph.insert_edge(source, assign(PitchNode::down(index)), 1);
        graph.insert_edge(assign(PitchNode::up(index)), sink, 1);
    }
    for &from in &internal {
        for &to in &internal {
            if from != to && !pinned(from.node, to.node) {
                graph.insert_edge(from, to, 1);
            }
        }
    }

    // Every finite capacity is 1, so big-M is the edge count plus one.
    let big_m = graph.edge_count() as u64 + 1;
    for &from in &internal {
        for &to in &internal {
            if pinned(from.node, to.node) {
                graph.insert_edge(from, to, big_m);
            }
        }
    }

    (FlowNetwork::new(graph, source, sink), big_m)
}

/// `weight(e) = 1 + Σ weight(d)` for every `d` that `e` depends on.
pub(crate) fn resolve_weights(
    edges: &[Edge<PitchNode>],
    dependencies: &WeightDependencies,
) -> Result<HashMap<Edge<PitchNode>, u64>> {
    let mut resolved = HashMap::new();
    let mut visiting = HashSet::new();
    for &edge in edges {
        resolve(edge, dependencies, &mut resolved, &mut visiting)?;
    }
    Ok(resolved)
}

fn resolve(
    edge: Edge<PitchNode>,
    dependencies: &WeightDependencies,
    resolved: &mut HashMap<Edge<PitchNode>, u64>,
    visiting: &mut HashSet<Edge<PitchNode>>,
) -> Result<u64> {
    if let Some(&weight) = resolved.get(&edge) {
        return Ok(weight);
    }
    if !visiting.insert(edge) {
        return Err(Error::UnresolvedDependency { from: edge.from, to: edge.to });
    }

    let mut required: Vec<Edge<PitchNode>> = dependencies
        .get(&edge)
        .map(|deps| deps.iter().copied().collect())
        .unwrap_or_default();
    required.sort();

    let mut weight = 1u64;
    for dependency in required {
        weight = weight
            .checked_add(resolve(dependency, dependencies, resolved, visiting)?)
            .ok_or_else(|| Error::CapacityOverflow(format!("weight of {} -> {}", edge.from, edge.to)))?;
    }

    visiting.remove(&edge);
    resolved.insert(edge, weight);
    Ok(weight)
}
