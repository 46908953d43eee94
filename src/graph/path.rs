//! Path: a sequence of nodes joined by directed edges.

use smallvec::SmallVec;
use super::Edge;

/// A path in a graph: node -> node -> node ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<N> {
    /// Nodes along the path. Never empty.
    nodes: SmallVec<[N; 8]>,
}

impl<N: Clone> Path<N> {
    pub fn single(node: N) -> Self {
        let mut nodes = SmallVec::new();
        nodes.push(node);
        Self { nodes }
    }

    /// Number of edges on the path.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn start(&self) -> &N {
        self.nodes.first().expect("Path always has at least one node")
    }

    pub fn end(&self) -> &N {
        self.nodes.last().expect("Path always has at least one node")
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Extend the path by one edge ending at `node`.
    pub fn append(&mut self, node: N) {
        self.nodes.push(node);
    }

    /// Consecutive node pairs, in path order.
    pub fn edges(&self) -> impl Iterator<Item = Edge<N>> + '_ {
        self.nodes
            .windows(2)
            .map(|pair| Edge::new(pair[0].clone(), pair[1].clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_node_path_is_empty() {
        let path = Path::single('s');
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.start(), path.end());
        assert_eq!(path.edges().count(), 0);
    }

    #[test]
    fn test_edges_follow_node_order() {
        let mut path = Path::single('s');
        path.append('a');
        path.append('t');

        let edges: Vec<_> = path.edges().collect();
        assert_eq!(edges, vec![Edge::new('s', 'a'), Edge::new('a', 't')]);
        assert_eq!(path.len(), 2);
        assert_eq!(*path.end(), 't');
    }
}
