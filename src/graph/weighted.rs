//! Weighted directed graph.
//!
//! Nodes are interned into dense indices on first sight. Edge weights live
//! in a map keyed by index pairs, so weight lookups are O(1); per-node
//! adjacency lists keep outgoing neighbors in insertion order, which makes
//! every traversal (and therefore every tie between equal-length paths)
//! deterministic for a given construction order.
//!
//! ## Limitations
//!
//! - **No node removal**: nodes live as long as the graph. Edges can be
//!   removed freely.
//! - **Removal is O(degree)**: the adjacency list is scanned to keep order.

use std::collections::VecDeque;
use std::hash::Hash;
use hashbrown::{HashMap, HashSet};

use super::Path;

// ============================================================================
// WeightedGraph
// ============================================================================

/// Directed graph with one weight per `(from, to)` edge.
#[derive(Debug, Clone)]
pub struct WeightedGraph<N, W> {
    nodes: Vec<N>,
    index: HashMap<N, usize>,
    /// node index → outgoing neighbor indices, in insertion order
    adjacency: Vec<Vec<usize>>,
    weights: HashMap<(usize, usize), W>,
}

impl<N, W> Default for WeightedGraph<N, W> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
            weights: HashMap::new(),
        }
    }
}

impl<N: Clone + Eq + Hash, W> WeightedGraph<N, W> {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, node: N) -> usize {
        if let Some(&i) = self.index.get(&node) {
            return i;
        }
        let i = self.nodes.len();
        self.nodes.push(node.clone());
        self.index.insert(node, i);
        self.adjacency.push(Vec::new());
        i
    }

    fn key(&self, from: &N, to: &N) -> Option<(usize, usize)> {
        Some((*self.index.get(from)?, *self.index.get(to)?))
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    /// Insert a node. Returns `false` if it was already present.
    pub fn insert_node(&mut self, node: N) -> bool {
        let before = self.nodes.len();
        self.slot(node);
        self.nodes.len() > before
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.index.contains_key(node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }

    // ========================================================================
    // Edges
    // ========================================================================

    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    /// Insert or replace the edge `from -> to`, inserting missing endpoints.
    /// Returns the weight it replaced, if any.
    pub fn insert_edge(&mut self, from: N, to: N, weight: W) -> Option<W> {
        let a = self.slot(from);
        let b = self.slot(to);
        let previous = self.weights.insert((a, b), weight);
        if previous.is_none() {
            self.adjacency[a].push(b);
        }
        previous
    }

    /// Replace the weight of `from -> to` with `transform(old)`.
    ///
    /// No-op on a missing edge; returns whether the edge existed.
    pub fn update_edge(&mut self, from: &N, to: &N, transform: impl FnOnce(&W) -> W) -> bool {
        let Some(key) = self.key(from, to) else { return false };
        match self.weights.get_mut(&key) {
            Some(weight) => {
                let next = transform(weight);
                *weight = next;
                true
            }
            None => false,
        }
    }

    pub fn remove_edge(&mut self, from: &N, to: &N) -> Option<W> {
        let (a, b) = self.key(from, to)?;
        let removed = self.weights.remove(&(a, b))?;
        self.adjacency[a].retain(|&n| n != b);
        Some(removed)
    }

    pub fn weight(&self, from: &N, to: &N) -> Option<&W> {
        self.key(from, to).and_then(|key| self.weights.get(&key))
    }

    pub fn contains_edge(&self, from: &N, to: &N) -> bool {
        self.weight(from, to).is_some()
    }

    /// All edges as `(from, to, weight)`, grouped by source node in
    /// insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N, &W)> {
        self.adjacency.iter().enumerate().flat_map(move |(a, outgoing)| {
            outgoing
                .iter()
                .map(move |&b| (&self.nodes[a], &self.nodes[b], &self.weights[&(a, b)]))
        })
    }

    /// Outgoing neighbors of `of`, in edge insertion order.
    pub fn neighbors(&self, of: &N) -> Vec<&N> {
        self.index
            .get(of)
            .map(|&a| self.adjacency[a].iter().map(|&b| &self.nodes[b]).collect())
            .unwrap_or_default()
    }

    /// Outgoing neighbors of `of` that are members of `within`.
    pub fn neighbors_in(&self, of: &N, within: &HashSet<N>) -> Vec<&N> {
        self.neighbors(of)
            .into_iter()
            .filter(|n| within.contains(*n))
            .collect()
    }

    // ========================================================================
    // Projections
    // ========================================================================

    /// Same nodes and edges, with every weight passed through `f`.
    pub fn map_weights<V>(&self, mut f: impl FnMut(&W) -> V) -> WeightedGraph<N, V> {
        WeightedGraph {
            nodes: self.nodes.clone(),
            index: self.index.clone(),
            adjacency: self.adjacency.clone(),
            weights: self.weights.iter().map(|(&key, w)| (key, f(w))).collect(),
        }
    }

    /// Edge presence only.
    pub fn unweighted(&self) -> WeightedGraph<N, ()> {
        self.map_weights(|_| ())
    }

    /// Same nodes, keeping only the edges `keep` accepts.
    pub fn filtered(&self, keep: impl Fn(&N, &N, &W) -> bool) -> Self
    where
        W: Clone,
    {
        let mut graph = Self {
            nodes: self.nodes.clone(),
            index: self.index.clone(),
            adjacency: vec![Vec::new(); self.nodes.len()],
            weights: HashMap::new(),
        };
        for (a, outgoing) in self.adjacency.iter().enumerate() {
            for &b in outgoing {
                let weight = &self.weights[&(a, b)];
                if keep(&self.nodes[a], &self.nodes[b], weight) {
                    graph.adjacency[a].push(b);
                    graph.weights.insert((a, b), weight.clone());
                }
            }
        }
        graph
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// BFS from `start` over admissible edges, stopping early at `target`.
    /// Returns visit order and the BFS-tree parent of every visited node.
    fn traverse<F>(&self, start: usize, target: Option<usize>, admissible: F) -> (Vec<usize>, HashMap<usize, usize>)
    where
        F: Fn(&W) -> bool,
    {
        let mut order = vec![start];
        let mut parent = HashMap::new();
        let mut seen = HashSet::new();
        seen.insert(start);
        let mut queue = VecDeque::from([start]);

        while let Some(a) = queue.pop_front() {
            for &b in &self.adjacency[a] {
                if seen.contains(&b) || !admissible(&self.weights[&(a, b)]) {
                    continue;
                }
                seen.insert(b);
                parent.insert(b, a);
                order.push(b);
                if Some(b) == target {
                    return (order, parent);
                }
                queue.push_back(b);
            }
        }

        (order, parent)
    }

    /// Nodes reachable from `from`, in breadth-first order (including `from`).
    pub fn breadth_first_search(&self, from: &N) -> Vec<N> {
        self.breadth_first_search_where(from, |_| true)
    }

    /// Breadth-first order over edges whose weight satisfies `admissible`.
    pub fn breadth_first_search_where(&self, from: &N, admissible: impl Fn(&W) -> bool) -> Vec<N> {
        let Some(&start) = self.index.get(from) else { return Vec::new() };
        let (order, _) = self.traverse(start, None, admissible);
        order.into_iter().map(|i| self.nodes[i].clone()).collect()
    }

    /// Fewest-edges path from `from` to `to`.
    pub fn shortest_path(&self, from: &N, to: &N) -> Option<Path<N>> {
        self.shortest_path_where(from, to, |_| true)
    }

    /// Fewest-edges path using only edges whose weight satisfies `admissible`.
    ///
    /// Among equally short paths, the one discovered first in neighbor
    /// insertion order wins.
    pub fn shortest_path_where(&self, from: &N, to: &N, admissible: impl Fn(&W) -> bool) -> Option<Path<N>> {
        let (start, target) = self.key(from, to)?;
        if start == target {
            return Some(Path::single(from.clone()));
        }
        let (_, parent) = self.traverse(start, Some(target), admissible);
        if !parent.contains_key(&target) {
            return None;
        }

        let mut trail = vec![target];
        let mut current = target;
        while let Some(&previous) = parent.get(&current) {
            trail.push(previous);
            current = previous;
        }

        let mut nodes = trail.into_iter().rev().map(|i| self.nodes[i].clone());
        let mut path = Path::single(nodes.next()?);
        for node in nodes {
            path.append(node);
        }
        Some(path)
    }
}

// ============================================================================
// Tests
// ============================================================================
