//! Node identities of the spelling network.

use std::fmt;
use serde::{Deserialize, Serialize};

/// Which of a pitch's two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Down,
    Up,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Down => write!(f, "down"),
            Role::Up => write!(f, "up"),
        }
    }
}

/// A node of the network: the source, the sink, or one of the two nodes
/// belonging to the pitch at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchNode {
    Source,
    Sink,
    Internal { index: usize, role: Role },
}

impl PitchNode {
    pub const fn down(index: usize) -> Self {
        PitchNode::Internal { index, role: Role::Down }
    }

    pub const fn up(index: usize) -> Self {
        PitchNode::Internal { index, role: Role::Up }
    }

    pub fn index(self) -> Option<usize> {
        match self {
            PitchNode::Internal { index, .. } => Some(index),
            _ => None,
        }
    }

    pub fn role(self) -> Option<Role> {
        match self {
            PitchNode::Internal { role, .. } => Some(role),
            _ => None,
        }
    }

    pub fn is_internal(self) -> bool {
        matches!(self, PitchNode::Internal { .. })
    }
}

impl fmt::Display for PitchNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PitchNode::Source => write!(f, "source"),
            PitchNode::Sink => write!(f, "sink"),
            PitchNode::Internal { index, role } => write!(f, "({index}, {role})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_accessors() {
        let node = PitchNode::up(3);
        assert_eq!(node.index(), Some(3));
        assert_eq!(node.role(), Some(Role::Up));
        assert!(node.is_internal());
        assert_eq!(PitchNode::Source.index(), None);
        assert_eq!(PitchNode::Sink.role(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(PitchNode::Source.to_string(), "source");
        assert_eq!(PitchNode::down(1).to_string(), "(1, down)");
        assert_eq!(PitchNode::up(0).to_string(), "(0, up)");
    }
}
