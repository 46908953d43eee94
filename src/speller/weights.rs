//! # Finite Capacities
//!
//! Builders for every finite edge of the spelling network. The big-M edges
//! that tie a pitch's two nodes together are added afterwards by the
//! speller, once the finite total is known.
//!
//! ## Parsimony encoding
//!
//! A pitch's state `s` counts its nodes on the sink side: `0` is
//! `(down, down)`, `1` is `(up, down)`, `2` is `(up, up)`. Node
//! `node(i, 1)` is `Up(i)` and `node(i, 2)` is `Down(i)`; in every legal
//! state `s >= k` exactly when `node(i, k)` is on the sink side.
//!
//! Unary cost `f(s)` of pitch `i`:
//!
//! ```text
//! Up(i)   -> sink    f(0)   cut when both nodes are source side
//! Down(i) -> Up(i)   f(1)   cut when only Up(i) is sink side
//! source  -> Down(i) f(2)   cut when both nodes are sink side
//! ```
//!
//! Pairwise cost `V(a, b)` of pitches `i < j` is split into its second
//! differences `w(k, l) = -(V(k,l) - V(k-1,l) - V(k,l-1) + V(k-1,l-1))`,
//! each on edge `node(j, l) -> node(i, k)`, with the remainder folded into
//! the unary costs of `i` and `j`. `V` is convex in the coordinate
//! difference and coordinates rise with `s`, so every `w` is nonnegative.

use std::collections::BTreeMap;

use crate::graph::WeightedGraph;
use crate::inverter::WeightAssignment;
use crate::model::{Category, PitchClass, Spelling, TendencyPair};
use crate::{Error, Result};
use super::PitchNode;

/// Add `capacity` to `from -> to`, creating the edge if needed.
pub(crate) fn add_capacity(
    graph: &mut WeightedGraph<PitchNode, u64>,
    from: PitchNode,
    to: PitchNode,
    capacity: u64,
) -> Result<()> {
    if capacity == 0 {
        return Ok(());
    }
    let total = graph
        .weight(&from, &to)
        .map_or(Some(capacity), |w| w.checked_add(capacity))
        .ok_or_else(|| Error::CapacityOverflow(format!("edge {from} -> {to}")))?;
    graph.insert_edge(from, to, total);
    Ok(())
}

/// One more than the sum of `capacities`: outweighs any finite cut.
pub(crate) fn big_m<'a>(capacities: impl IntoIterator<Item = &'a u64>) -> Result<u64> {
    capacities
        .into_iter()
        .try_fold(1u64, |total, &w| total.checked_add(w))
        .ok_or_else(|| Error::CapacityOverflow("finite capacities sum past u64::MAX".into()))
}

fn to_capacity(value: i128, from: PitchNode, to: PitchNode) -> Result<u64> {
    u64::try_from(value).map_err(|_| Error::CapacityOverflow(format!("edge {from} -> {to} needs {value}")))
}

/// Line-of-fifths coordinate of each state. Class 8 has no neutral spelling;
/// its state 1 gets the midpoint so coordinates still rise with the state.
pub(crate) fn coordinates(class: PitchClass) -> [i64; 3] {
    let category = Category::of(class);
    let [down, neutral, up] = TendencyPair::STATES.map(|pair| {
        category
            .spelling(class, pair)
            .map(|spelling| i64::from(spelling.line_of_fifths()))
    });
    let down = down.expect("every pitch class has a downward spelling");
    let up = up.expect("every pitch class has an upward spelling");
    [down, neutral.unwrap_or((down + up) / 2), up]
}

/// States a pitch of `class` may take.
pub(crate) fn allowed_states(class: PitchClass) -> &'static [usize] {
    match Category::of(class) {
        Category::Ambiguous => &[0, 2],
        _ => &[0, 1, 2],
    }
}

/// The node standing for "state ≥ k".
fn threshold_node(index: usize, k: usize) -> PitchNode {
    if k == 1 { PitchNode::up(index) } else { PitchNode::down(index) }
}

/// Fails with `CapacityOverflow` when a weight pushes an edge past `u64`.
pub(crate) fn parsimony(
    classes: &BTreeMap<usize, PitchClass>,
    pivot: Spelling,
    pivot_weight: u64,
    pairwise_weight: u64,
) -> Result<WeightedGraph<PitchNode, u64>> {
    // Weights are at most u64::MAX and coordinate gaps are tiny, so every
    // product and sum below fits in i128.
    let pitches: Vec<(usize, [i128; 3])> = classes
        .iter()
        .map(|(&index, &class)| (index, coordinates(class).map(i128::from)))
        .collect();
    let anchor = i128::from(pivot.line_of_fifths());
    let pivot_weight = i128::from(pivot_weight);
    let pairwise_weight = i128::from(pairwise_weight);

    let mut unary: Vec<[i128; 3]> = pitches
        .iter()
        .map(|(_, p)| p.map(|x| pivot_weight * (x - anchor).abs()))
        .collect();
    let mut graph = WeightedGraph::new();

    for a in 0..pitches.len() {
        for b in a + 1..pitches.len() {
            let (i, pi) = pitches[a];
            let (j, pj) = pitches[b];
            let v = |s: usize, t: usize| pairwise_weight * (pi[s] - pj[t]).abs();

            let mut w = [[0i128; 3]; 3];
            for k in 1..3 {
                for l in 1..3 {
                    let second = v(k, l) - v(k - 1, l) - v(k, l - 1) + v(k - 1, l - 1);
                    assert!(second <= 0, "pairwise cost between pitches {i} and {j} is not submodular");
                    w[k][l] = -second;
                    let (from, to) = (threshold_node(j, l), threshold_node(i, k));
                    add_capacity(&mut graph, from, to, to_capacity(w[k][l], from, to)?)?;
                }
            }

            for s in 0..3 {
                let folded: i128 = (1..=s).map(|k| w[k][1] + w[k][2]).sum();
                unary[a][s] += v(s, 0) - folded;
                unary[b][s] += v(0, s) - v(0, 0);
            }
        }
    }

    for ((index, _), f) in pitches.iter().zip(&unary) {
        let class = classes[index];
        let allowed = allowed_states(class);
        let floor = allowed.iter().map(|&s| f[s]).min().unwrap_or(0) - 1;
        let (down, up) = (PitchNode::down(*index), PitchNode::up(*index));

        add_capacity(&mut graph, PitchNode::Source, down, to_capacity(f[2] - floor, PitchNode::Source, down)?)?;
        add_capacity(&mut graph, up, PitchNode::Sink, to_capacity(f[0] - floor, up, PitchNode::Sink)?)?;
        if allowed.contains(&1) {
            add_capacity(&mut graph, down, up, to_capacity(f[1] - floor, down, up)?)?;
        }
    }

    Ok(graph)
}

/// Unit-style topology: source and sink edges plus every ordered pair of
/// distinct internal nodes, all at `capacity`.
pub(crate) fn uniform(indices: &[usize], capacity: u64) -> Result<WeightedGraph<PitchNode, u64>> {
    let mut graph = WeightedGraph::new();
    for &i in indices {
        add_capacity(&mut graph, PitchNode::Source, PitchNode::down(i), capacity)?;
        add_capacity(&mut graph, PitchNode::up(i), PitchNode::Sink, capacity)?;
    }
    for from in internal_nodes(indices) {
        for to in internal_nodes(indices) {
            if from != to {
                add_capacity(&mut graph, from, to, capacity)?;
            }
        }
    }
    Ok(graph)
}

/// The edges of `assignment` whose endpoints all belong to `indices`.
pub(crate) fn explicit(indices: &[usize], assignment: &WeightAssignment) -> Result<WeightedGraph<PitchNode, u64>> {
    let belongs = |node: &PitchNode| node.index().is_none_or(|i| indices.contains(&i));
    let mut graph = WeightedGraph::new();
    for (&from, &to, &w) in assignment.edges() {
        if belongs(&from) && belongs(&to) {
            add_capacity(&mut graph, from, to, w)?;
        }
    }
    Ok(graph)
}

/// `Down(i), Up(i)` for every index, in order.
pub(crate) fn internal_nodes(indices: &[usize]) -> impl Iterator<Item = PitchNode> + '_ {
    indices
        .iter()
        .flat_map(|&i| [PitchNode::down(i), PitchNode::up(i)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LetterName, Modifier};

    fn classes(values: &[i64]) -> BTreeMap<usize, PitchClass> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i, PitchClass::new(v).unwrap()))
            .collect()
    }

    #[test]
    fn test_coordinates_rise_by_twelve_fifths() {
        let c_sharp = coordinates(PitchClass::new(1).unwrap());
        assert_eq!(c_sharp, [-7, 5, 17]);
        let g_sharp = coordinates(PitchClass::new(8).unwrap());
        assert_eq!(g_sharp, [-6, 0, 6]);
    }

    #[test]
    fn test_single_pitch_unary_capacities() {
        // Eb against pivot D: Fbb -17, Eb -5, D# 7, so costs 17, 5, 7.
        let graph = parsimony(&classes(&[3]), Spelling::natural(LetterName::D), 1, 1).unwrap();
        assert_eq!(graph.weight(&PitchNode::up(0), &PitchNode::Sink), Some(&13));
        assert_eq!(graph.weight(&PitchNode::down(0), &PitchNode::up(0)), Some(&1));
        assert_eq!(graph.weight(&PitchNode::Source, &PitchNode::down(0)), Some(&3));
    }

    #[test]
    fn test_ambiguous_class_has_no_neutral_edge() {
        let graph = parsimony(&classes(&[8]), Spelling::new(LetterName::C, Modifier::Natural), 1, 1).unwrap();
        assert!(!graph.contains_edge(&PitchNode::down(0), &PitchNode::up(0)));
        // Ab -6 and G# 6 against C at -2: costs 4 and 8.
        assert_eq!(graph.weight(&PitchNode::up(0), &PitchNode::Sink), Some(&1));
        assert_eq!(graph.weight(&PitchNode::Source, &PitchNode::down(0)), Some(&5));
    }

    #[test]
    fn test_pairwise_edges_point_from_later_to_earlier_pitch() {
        let graph = parsimony(&classes(&[1, 5]), Spelling::natural(LetterName::D), 0, 1).unwrap();
        for (from, to, _) in graph.edges() {
            if from.is_internal() && to.is_internal() && from.index() != to.index() {
                assert_eq!(from.index(), Some(1));
                assert_eq!(to.index(), Some(0));
            }
        }
    }

    #[test]
    fn test_uniform_interconnects_every_internal_pair() {
        let graph = uniform(&[0, 1], 1).unwrap();
        // 2 source + 2 sink + 4 * 3 internal
        assert_eq!(graph.edge_count(), 16);
        assert!(graph.edges().all(|(_, _, w)| *w == 1));
    }

    #[test]
    fn test_explicit_drops_foreign_and_zero_edges() {
        let mut assignment = WeightAssignment::new();
        assignment.insert_edge(PitchNode::Source, PitchNode::down(0), 2);
        assignment.insert_edge(PitchNode::Source, PitchNode::down(5), 2);
        assignment.insert_edge(PitchNode::up(0), PitchNode::Sink, 0);
        let graph = explicit(&[0], &assignment).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.weight(&PitchNode::Source, &PitchNode::down(0)), Some(&2));
    }

    #[test]
    fn test_oversized_pairwise_weight_overflows() {
        let result = parsimony(&classes(&[1, 5]), Spelling::natural(LetterName::D), 1, u64::MAX);
        assert!(matches!(result, Err(Error::CapacityOverflow(_))));
    }

    #[test]
    fn test_oversized_pivot_weight_overflows() {
        let result = parsimony(&classes(&[3]), Spelling::natural(LetterName::D), u64::MAX, 0);
        assert!(matches!(result, Err(Error::CapacityOverflow(_))));
    }

    #[test]
    fn test_capacities_above_i64_max_are_exact() {
        // D against pivot D: Ebb -12, D 0, C## 12.
        let weight = 1u64 << 60;
        let graph = parsimony(&classes(&[2]), Spelling::natural(LetterName::D), weight, 0).unwrap();
        let expected = 12 * weight + 1;
        assert!(expected > i64::MAX as u64);
        assert_eq!(graph.weight(&PitchNode::Source, &PitchNode::down(0)), Some(&expected));
        assert_eq!(graph.weight(&PitchNode::up(0), &PitchNode::Sink), Some(&expected));
        assert_eq!(graph.weight(&PitchNode::down(0), &PitchNode::up(0)), Some(&1));
    }

    #[test]
    fn test_add_capacity_accumulates_and_checks() {
        let mut graph = WeightedGraph::new();
        add_capacity(&mut graph, PitchNode::Source, PitchNode::down(0), 3).unwrap();
        add_capacity(&mut graph, PitchNode::Source, PitchNode::down(0), 4).unwrap();
        assert_eq!(graph.weight(&PitchNode::Source, &PitchNode::down(0)), Some(&7));

        let err = add_capacity(&mut graph, PitchNode::Source, PitchNode::down(0), u64::MAX).unwrap_err();
        assert!(matches!(err, Error::CapacityOverflow(_)));
        assert_eq!(graph.weight(&PitchNode::Source, &PitchNode::down(0)), Some(&7));
    }

    #[test]
    fn test_big_m_is_one_past_the_total() {
        assert_eq!(big_m(&[2, 3, 4]).unwrap(), 10);
        assert_eq!(big_m(&[]).unwrap(), 1);
        assert!(matches!(big_m(&[u64::MAX]), Err(Error::CapacityOverflow(_))));
    }
}
